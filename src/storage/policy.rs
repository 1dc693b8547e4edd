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

//! Per-operation behaviour table.
//!
//! | Operation                | Key scope | Store errors |
//! |--------------------------|-----------|--------------|
//! | upload                   | folder    | propagate    |
//! | delete                   | folder    | suppress     |
//! | get presigned download   | bucket    | propagate    |
//! | get as stream            | bucket    | propagate    |
//! | get as buffer            | bucket    | propagate    |
//!
//! Delete is the only operation that reports success after a failed store
//! call, and only upload and delete prepend the folder. Both asymmetries are
//! observable by hosts, so they are kept here as data.

use super::error::StorageResult;
use super::key::KeyScope;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// What an operation does with an error returned by the object store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Log and return the error to the caller
    Propagate,
    /// Log and report success
    Suppress,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileOperation {
    Upload,
    Delete,
    PresignedDownloadUrl,
    Stream,
    Buffer,
}

impl FileOperation {
    pub const ALL: [FileOperation; 5] = [
        FileOperation::Upload,
        FileOperation::Delete,
        FileOperation::PresignedDownloadUrl,
        FileOperation::Stream,
        FileOperation::Buffer,
    ];

    pub const fn error_policy(self) -> ErrorPolicy {
        match self {
            FileOperation::Delete => ErrorPolicy::Suppress,
            FileOperation::Upload
            | FileOperation::PresignedDownloadUrl
            | FileOperation::Stream
            | FileOperation::Buffer => ErrorPolicy::Propagate,
        }
    }

    pub const fn key_scope(self) -> KeyScope {
        match self {
            FileOperation::Upload | FileOperation::Delete => KeyScope::Folder,
            FileOperation::PresignedDownloadUrl | FileOperation::Stream | FileOperation::Buffer => {
                KeyScope::Bucket
            }
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            FileOperation::Upload => "upload",
            FileOperation::Delete => "delete",
            FileOperation::PresignedDownloadUrl => "get_presigned_download_url",
            FileOperation::Stream => "get_as_stream",
            FileOperation::Buffer => "get_as_buffer",
        }
    }

    /// Apply this operation's [`ErrorPolicy`] to an outcome that carries no value.
    pub fn settle(self, result: StorageResult<()>) -> StorageResult<()> {
        match (self.error_policy(), result) {
            (ErrorPolicy::Suppress, Err(_)) => Ok(()),
            (_, result) => result,
        }
    }
}

impl Display for FileOperation {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::error::StorageError;

    #[test]
    fn test_only_delete_suppresses() {
        for op in FileOperation::ALL {
            let expected = if op == FileOperation::Delete {
                ErrorPolicy::Suppress
            } else {
                ErrorPolicy::Propagate
            };
            assert_eq!(op.error_policy(), expected, "operation {}", op);
        }
    }

    #[test]
    fn test_key_scopes() {
        assert_eq!(FileOperation::Upload.key_scope(), KeyScope::Folder);
        assert_eq!(FileOperation::Delete.key_scope(), KeyScope::Folder);
        assert_eq!(
            FileOperation::PresignedDownloadUrl.key_scope(),
            KeyScope::Bucket
        );
        assert_eq!(FileOperation::Stream.key_scope(), KeyScope::Bucket);
        assert_eq!(FileOperation::Buffer.key_scope(), KeyScope::Bucket);
    }

    #[test]
    fn test_settle() {
        let failure = || Err(StorageError::ConfigError("boom".to_string()));

        assert!(FileOperation::Delete.settle(failure()).is_ok());
        assert!(FileOperation::Upload.settle(failure()).is_err());
        assert!(FileOperation::Upload.settle(Ok(())).is_ok());
    }

    #[test]
    fn test_display() {
        assert_eq!(FileOperation::Upload.to_string(), "upload");
        assert_eq!(
            FileOperation::PresignedDownloadUrl.to_string(),
            "get_presigned_download_url"
        );
    }
}
