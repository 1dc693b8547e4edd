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

use thiserror::Error;

/// Errors that can occur during file provider operations
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Object store error: {0}")]
    ObjectStoreError(#[from] object_store::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Coarse classification of a [`StorageError`], as seen by the host framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller supplied a missing or malformed file descriptor.
    InvalidInput,
    /// The remote object store rejected or failed the request.
    StoreFailure,
    /// The provider could not be configured.
    Configuration,
}

impl StorageError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StorageError::InvalidData(_) => ErrorKind::InvalidInput,
            StorageError::ObjectStoreError(_) => ErrorKind::StoreFailure,
            StorageError::ConfigError(_) | StorageError::SerializationError(_) => {
                ErrorKind::Configuration
            }
        }
    }

    pub fn is_invalid_input(&self) -> bool {
        self.kind() == ErrorKind::InvalidInput
    }

    /// True when the store reported that the object does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            StorageError::ObjectStoreError(object_store::Error::NotFound { .. })
        )
    }
}

/// Result type for file provider operations
pub type StorageResult<T> = Result<T, StorageError>;
