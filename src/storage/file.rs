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

use super::error::{StorageError, StorageResult};
use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// A file handed to [`upload`](super::FileProvider::upload)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderUploadFile {
    /// Original filename; its base name and extension shape the stored key
    pub filename: Option<String>,

    /// MIME type, stored as the object's `Content-Type` when present
    pub mime_type: Option<String>,

    pub content: Bytes,
}

impl ProviderUploadFile {
    pub fn new(filename: impl Into<String>, content: impl Into<Bytes>) -> Self {
        Self {
            filename: Some(filename.into()),
            mime_type: None,
            content: content.into(),
        }
    }

    /// Build an upload from a host "binary" string, where every character
    /// holds one byte in its low eight bits.
    pub fn from_binary_string(filename: impl Into<String>, content: &str) -> Self {
        Self::new(filename, decode_binary_string(content))
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    /// The filename, or `InvalidData` when it is absent or empty.
    pub fn require_filename(&self) -> StorageResult<&str> {
        require_filename(self.filename.as_deref())
    }
}

/// Identifies an object to delete, relative to the configured folder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderDeleteFile {
    pub file_key: String,
}

impl ProviderDeleteFile {
    pub fn new(file_key: impl Into<String>) -> Self {
        Self {
            file_key: file_key.into(),
        }
    }
}

/// Identifies an object to read or sign
///
/// Signed URLs use `file_key`; stream and buffer reads use `filename`. Both
/// are taken relative to the bucket root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderGetFile {
    #[serde(default)]
    pub file_key: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

impl ProviderGetFile {
    pub fn from_file_key(file_key: impl Into<String>) -> Self {
        Self {
            file_key: file_key.into(),
            filename: None,
        }
    }

    pub fn from_filename(filename: impl Into<String>) -> Self {
        Self {
            file_key: String::new(),
            filename: Some(filename.into()),
        }
    }

    pub fn require_filename(&self) -> StorageResult<&str> {
        require_filename(self.filename.as_deref())
    }
}

/// Result of a successful upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderFileResult {
    /// Public, unsigned URL of the stored object
    pub url: String,

    /// Generated key, without the folder prefix
    pub key: String,
}

fn require_filename(filename: Option<&str>) -> StorageResult<&str> {
    match filename {
        Some(name) if !name.is_empty() => Ok(name),
        _ => Err(StorageError::InvalidData("No filename provided".to_string())),
    }
}

/// Decode a "binary" string: one byte per UTF-16 code unit, high bits dropped.
pub fn decode_binary_string(content: &str) -> Bytes {
    content
        .encode_utf16()
        .map(|unit| (unit & 0xff) as u8)
        .collect::<Vec<u8>>()
        .into()
}
