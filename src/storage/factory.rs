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

use std::sync::Arc;

use super::cloud_storage::CloudStorageFileService;
use super::config::CloudStorageConfig;
use super::error::StorageResult;
use super::provider::FileProvider;

/// Factory for creating file providers
pub struct FileProviderFactory;

impl FileProviderFactory {
    /// Create a file provider from a configuration.
    ///
    /// # Returns
    ///
    /// A `Result` containing:
    /// * `Ok(Arc<dyn FileProvider>)` - A thread-safe reference to the initialized provider
    /// * `Err(StorageError)` - If the provider cannot be created
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// * `bucket` or `folder` is empty
    /// * The GCS client cannot be initialized (e.g. malformed credentials)
    pub fn from_config(config: CloudStorageConfig) -> StorageResult<Arc<dyn FileProvider>> {
        let provider = CloudStorageFileService::new(config)?;
        Ok(Arc::new(provider))
    }

    /// Create a file provider from the host framework's JSON options object.
    pub fn from_json(options: &str) -> StorageResult<Arc<dyn FileProvider>> {
        Self::from_config(CloudStorageConfig::from_json(options)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::error::StorageError;

    #[test]
    fn test_from_json_rejects_malformed_options() {
        match FileProviderFactory::from_json("{\"bucket\":") {
            Err(StorageError::SerializationError(_)) => (),
            other => panic!("Expected SerializationError, got {:?}", other),
        }
    }

    #[test]
    fn test_from_json_rejects_empty_folder() {
        match FileProviderFactory::from_json(r#"{"bucket":"b","folder":""}"#) {
            Err(StorageError::ConfigError(msg)) => assert!(msg.contains("folder")),
            other => panic!("Expected ConfigError, got {:?}", other),
        }
    }

    #[test]
    fn test_from_config_rejects_bad_credentials() {
        let config = CloudStorageConfig::new("b", "f").with_option("service_account_key", "{}");
        assert!(FileProviderFactory::from_config(config).is_err());
    }
}
