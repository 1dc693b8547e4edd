// Copyright 2025 Adobe. All rights reserved.
// This file is licensed to you under the Apache License,
// Version 2.0 (http://www.apache.org/licenses/LICENSE-2.0)
// or the MIT license (http://opensource.org/licenses/MIT),
// at your option.
//
// Unless required by applicable law or agreed to in writing,
// this software is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR REPRESENTATIONS OF ANY KIND, either express or
// implied. See the LICENSE-MIT and LICENSE-APACHE files for the
// specific language governing permissions and limitations under
// each license.

//! Object key generation and resolution.
//!
//! Uploaded objects get a unique key of the form `{base}-{uid}{ext}`, stored
//! under the configured folder. Reads and signed URLs take the key the caller
//! hands in as-is, relative to the bucket root. See [`KeyScope`].

use object_store::path::Path as ObjectPath;
use std::fmt::Debug;

use super::error::{StorageError, StorageResult};
use ulid::Ulid;

/// Host that serves public object URLs
pub const PUBLIC_URL_BASE: &str = "https://storage.googleapis.com";

/// Source of the unique suffix appended to uploaded filenames
pub trait KeyGenerator: Send + Sync + Debug {
    fn unique_id(&self) -> String;
}

/// ULID based suffix: 26 Crockford base32 characters, sortable by creation time.
#[derive(Debug, Default, Clone, Copy)]
pub struct UlidKeyGenerator;

impl KeyGenerator for UlidKeyGenerator {
    fn unique_id(&self) -> String {
        Ulid::new().to_string()
    }
}

/// Where an operation's key lives relative to the bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyScope {
    /// `{folder}/{key}`
    Folder,
    /// `{key}` from the bucket root
    Bucket,
}

impl KeyScope {
    /// Object key (without bucket) for `key` under this scope.
    pub fn object_key(self, folder: &str, key: &str) -> String {
        match self {
            KeyScope::Folder => format!("{}/{}", folder, key),
            KeyScope::Bucket => key.to_string(),
        }
    }

    /// Store location for `key` under this scope.
    ///
    /// The object name is taken verbatim, so `100%.pdf` is stored as
    /// `100%.pdf` rather than its percent-encoded form. Names with control
    /// characters, empty segments or `.`/`..` segments are rejected.
    pub fn object_path(self, folder: &str, key: &str) -> StorageResult<ObjectPath> {
        let object_key = self.object_key(folder, key);
        ObjectPath::parse(&object_key).map_err(|e| {
            StorageError::InvalidData(format!("Invalid object key {:?}: {}", object_key, e))
        })
    }
}

/// Split a filename into base name and extension.
///
/// Directory components are dropped. The extension keeps its leading dot and
/// is empty when there is none; dotfiles such as `.env` have no extension.
pub fn split_filename(filename: &str) -> (&str, &str) {
    let name = filename
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default();

    match name.rfind('.') {
        Some(idx) if idx > 0 && !name[..idx].chars().all(|c| c == '.') => {
            (&name[..idx], &name[idx..])
        }
        _ => (name, ""),
    }
}

/// Build the unique key for an upload: `report.pdf` becomes `report-<uid>.pdf`.
pub fn unique_file_key(filename: &str, generator: &dyn KeyGenerator) -> String {
    let (base, ext) = split_filename(filename);
    format!("{}-{}{}", base, generator.unique_id(), ext)
}

/// Public (unsigned) URL of an object.
pub fn public_url(bucket: &str, object_key: &str) -> String {
    format!("{}/{}/{}", PUBLIC_URL_BASE, bucket, object_key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;
    use std::collections::HashSet;

    #[derive(Debug)]
    struct FixedKeyGenerator(&'static str);

    impl KeyGenerator for FixedKeyGenerator {
        fn unique_id(&self) -> String {
            self.0.to_string()
        }
    }

    #[test]
    fn test_split_filename() {
        let cases = vec![
            ("report.pdf", ("report", ".pdf")),
            ("archive.tar.gz", ("archive.tar", ".gz")),
            ("README", ("README", "")),
            (".env", (".env", "")),
            ("photo.", ("photo", ".")),
            ("images/cat.png", ("cat", ".png")),
            ("a/b/", ("b", "")),
            ("..", ("..", "")),
            ("my report.final.docx", ("my report.final", ".docx")),
        ];

        for (input, expected) in cases {
            assert_eq!(split_filename(input), expected, "input: {:?}", input);
        }
    }

    #[test]
    fn test_unique_file_key_with_fixed_id() {
        let generator = FixedKeyGenerator("01HZX");
        assert_eq!(unique_file_key("report.pdf", &generator), "report-01HZX.pdf");
        assert_eq!(unique_file_key("README", &generator), "README-01HZX");
        assert_eq!(unique_file_key(".env", &generator), ".env-01HZX");
    }

    #[test]
    fn test_ulid_keys_are_unique_and_alphanumeric() {
        let generator = UlidKeyGenerator;
        let pattern = Regex::new(r"^report-[0-9A-Za-z]+\.pdf$").unwrap();

        let keys: HashSet<String> = (0..200)
            .map(|_| unique_file_key("report.pdf", &generator))
            .collect();

        assert_eq!(keys.len(), 200);
        for key in &keys {
            assert!(pattern.is_match(key), "unexpected key shape: {}", key);
        }
    }

    #[test]
    fn test_ulid_id_length() {
        assert_eq!(UlidKeyGenerator.unique_id().len(), 26);
    }

    #[test]
    fn test_key_scope_object_key() {
        assert_eq!(KeyScope::Folder.object_key("f", "k.pdf"), "f/k.pdf");
        assert_eq!(KeyScope::Bucket.object_key("f", "k.pdf"), "k.pdf");
        assert_eq!(
            KeyScope::Bucket.object_key("f", "other/k.pdf"),
            "other/k.pdf"
        );
    }

    #[test]
    fn test_key_scope_object_path() {
        let path = KeyScope::Folder.object_path("shop/media", "k.pdf").unwrap();
        assert_eq!(path.as_ref(), "shop/media/k.pdf");

        let path = KeyScope::Bucket.object_path("shop/media", "k.pdf").unwrap();
        assert_eq!(path.as_ref(), "k.pdf");
    }

    #[test]
    fn test_object_path_keeps_reserved_characters_verbatim() {
        for key in ["100%-01HZX.pdf", "a#b-01HZX.png", "[draft] {v2}^|-01HZX.txt"] {
            let path = KeyScope::Folder.object_path("f", key).unwrap();
            assert_eq!(path.as_ref(), format!("f/{}", key));
        }
    }

    #[test]
    fn test_object_path_rejects_unrepresentable_names() {
        for key in ["bad\nname.pdf", "a//b.pdf", "..", "x/./y"] {
            let err = KeyScope::Bucket.object_path("f", key).unwrap_err();
            assert!(err.is_invalid_input(), "key {:?} gave {:?}", key, err);
        }
    }

    #[test]
    fn test_public_url() {
        assert_eq!(
            public_url("b", "f/report-01HZX.pdf"),
            "https://storage.googleapis.com/b/f/report-01HZX.pdf"
        );
    }
}
