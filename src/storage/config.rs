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
use object_store::path::Path as ObjectPath;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Option keys that tune the object store client rather than select credentials.
pub(crate) const CLIENT_OPTION_KEYS: [&str; 6] = [
    "timeout",
    "connect_timeout",
    "max_retries",
    "retry_timeout",
    "pool_idle_timeout",
    "pool_max_idle_per_host",
];

/// Configuration for the Cloud Storage file provider
///
/// The field names follow the host framework's options object, so a provider
/// can be configured straight from its JSON:
///
/// ```
/// use cloud_storage_file::CloudStorageConfig;
///
/// let config = CloudStorageConfig::from_json(
///     r#"{"projectId":"shop-prod","folder":"uploads","bucket":"shop-assets"}"#,
/// )
/// .unwrap();
/// assert_eq!(config.bucket, "shop-assets");
/// ```
///
/// or built in code:
///
/// ```
/// use cloud_storage_file::CloudStorageConfig;
///
/// let config = CloudStorageConfig::new("shop-assets", "uploads")
///     .with_project_id("shop-prod")
///     .with_option("service_account_key_path", "/path/to/key.json");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CloudStorageConfig {
    /// Google Cloud project id. The client derives the project from its
    /// credentials, so this is informational.
    #[serde(default)]
    pub project_id: Option<String>,

    /// Key prefix for uploaded and deleted objects
    pub folder: String,

    /// Target bucket name
    pub bucket: String,

    /// Object store client options
    ///
    /// Credentials:
    /// - service_account_key_path: Path to service account JSON key file
    /// - service_account_key: Service account key as JSON string
    /// - application_credentials: Path to an application default credentials file
    ///
    /// Client tuning (seconds unless noted):
    /// - timeout, connect_timeout ("0" or "disabled" turns them off)
    /// - max_retries, retry_timeout
    /// - pool_idle_timeout, pool_max_idle_per_host (count)
    #[serde(default = "CloudStorageConfig::default_options")]
    pub options: HashMap<String, String>,
}

impl CloudStorageConfig {
    /// Create a configuration for `bucket`, storing uploads under `folder`.
    pub fn new(bucket: impl Into<String>, folder: impl Into<String>) -> Self {
        Self {
            project_id: None,
            folder: folder.into(),
            bucket: bucket.into(),
            options: Self::default_options(),
        }
    }

    /// Parse the host framework's options object.
    ///
    /// Missing `options` fall back to [`CloudStorageConfig::default_options`].
    pub fn from_json(json: &str) -> StorageResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Get default client options.
    ///
    /// # Returns
    ///
    /// A HashMap containing default timeout, retry, and connection pool settings.
    pub fn default_options() -> HashMap<String, String> {
        [
            ("timeout", "1200"),
            ("connect_timeout", "30"),
            ("max_retries", "20"),
            ("retry_timeout", "1200"),
            ("pool_idle_timeout", "15"),
            ("pool_max_idle_per_host", "5"),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    pub fn with_project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    /// Add a client option, replacing any previous value for `key`.
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Add multiple client options.
    pub fn with_options(mut self, options: HashMap<String, String>) -> Self {
        self.options.extend(options);
        self
    }

    pub fn get_option(&self, key: &str) -> Option<&String> {
        self.options.get(key)
    }

    /// Folder with surrounding slashes removed, as used in object keys.
    pub fn folder_prefix(&self) -> &str {
        self.folder.trim_matches('/')
    }

    /// Check the invariants every operation relies on.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::ConfigError` if `bucket` is empty, or if `folder`
    /// is empty once surrounding slashes are removed or is not a valid object
    /// key prefix.
    pub fn validate(&self) -> StorageResult<()> {
        if self.bucket.trim().is_empty() {
            return Err(StorageError::ConfigError(
                "Cloud Storage requires a non-empty 'bucket'".to_string(),
            ));
        }
        if self.folder_prefix().trim().is_empty() {
            return Err(StorageError::ConfigError(
                "Cloud Storage requires a non-empty 'folder'".to_string(),
            ));
        }
        if let Err(e) = ObjectPath::parse(self.folder_prefix()) {
            return Err(StorageError::ConfigError(format!(
                "Invalid 'folder' {:?}: {}",
                self.folder, e
            )));
        }
        Ok(())
    }

    /// Options with client tuning keys removed, safe to log.
    pub fn credential_option_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self
            .options
            .keys()
            .map(String::as_str)
            .filter(|k| !CLIENT_OPTION_KEYS.contains(k))
            .collect();
        keys.sort_unstable();
        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_has_default_options() {
        let config = CloudStorageConfig::new("b", "f");
        assert_eq!(config.bucket, "b");
        assert_eq!(config.folder, "f");
        assert!(config.project_id.is_none());
        assert_eq!(config.options, CloudStorageConfig::default_options());
    }

    #[test]
    fn test_default_options() {
        let options = CloudStorageConfig::default_options();
        assert_eq!(options.get("timeout"), Some(&"1200".to_string()));
        assert_eq!(options.get("connect_timeout"), Some(&"30".to_string()));
        assert_eq!(options.get("max_retries"), Some(&"20".to_string()));
        assert_eq!(options.get("retry_timeout"), Some(&"1200".to_string()));
        assert_eq!(options.get("pool_idle_timeout"), Some(&"15".to_string()));
        assert_eq!(
            options.get("pool_max_idle_per_host"),
            Some(&"5".to_string())
        );
    }

    #[test]
    fn test_from_host_json() {
        let json = r#"{"projectId":"shop-prod","folder":"uploads","bucket":"shop-assets"}"#;
        let config = CloudStorageConfig::from_json(json).unwrap();

        assert_eq!(config.project_id.as_deref(), Some("shop-prod"));
        assert_eq!(config.folder, "uploads");
        assert_eq!(config.bucket, "shop-assets");
        // Missing options fall back to defaults
        assert_eq!(config.get_option("max_retries"), Some(&"20".to_string()));
    }

    #[test]
    fn test_from_host_json_without_project_id() {
        let json = r#"{"folder":"f","bucket":"b","options":{"timeout":"60"}}"#;
        let config = CloudStorageConfig::from_json(json).unwrap();

        assert!(config.project_id.is_none());
        assert_eq!(config.get_option("timeout"), Some(&"60".to_string()));
        assert_eq!(config.get_option("max_retries"), None);
    }

    #[test]
    fn test_from_json_missing_bucket() {
        let result = CloudStorageConfig::from_json(r#"{"folder":"f"}"#);
        match result {
            Err(StorageError::SerializationError(e)) => {
                assert!(e.to_string().contains("bucket"));
            }
            _ => panic!("Expected SerializationError for missing bucket"),
        }
    }

    #[test]
    fn test_serialization_uses_camel_case() {
        let config = CloudStorageConfig::new("b", "f").with_project_id("p");
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"projectId\":\"p\""));
        assert!(json.contains("\"bucket\":\"b\""));
    }

    #[test]
    fn test_with_option_and_override() {
        let config = CloudStorageConfig::new("b", "f")
            .with_option("timeout", "600")
            .with_option("timeout", "900")
            .with_option("service_account_key_path", "/tmp/key.json");

        assert_eq!(config.get_option("timeout"), Some(&"900".to_string()));
        assert_eq!(
            config.get_option("service_account_key_path"),
            Some(&"/tmp/key.json".to_string())
        );
        assert_eq!(config.get_option("nonexistent"), None);
    }

    #[test]
    fn test_with_options() {
        let mut custom = HashMap::new();
        custom.insert("max_retries".to_string(), "3".to_string());
        custom.insert("application_credentials".to_string(), "/adc.json".to_string());

        let config = CloudStorageConfig::new("b", "f").with_options(custom);
        assert_eq!(config.get_option("max_retries"), Some(&"3".to_string()));
        assert_eq!(config.get_option("timeout"), Some(&"1200".to_string()));
    }

    #[test]
    fn test_validate_ok() {
        assert!(CloudStorageConfig::new("b", "f").validate().is_ok());
    }

    #[test]
    fn test_validate_empty_bucket() {
        match CloudStorageConfig::new("  ", "f").validate() {
            Err(StorageError::ConfigError(msg)) => assert!(msg.contains("bucket")),
            _ => panic!("Expected ConfigError for empty bucket"),
        }
    }

    #[test]
    fn test_validate_empty_folder() {
        for folder in ["", "/", "//"] {
            match CloudStorageConfig::new("b", folder).validate() {
                Err(StorageError::ConfigError(msg)) => assert!(msg.contains("folder")),
                _ => panic!("Expected ConfigError for folder {:?}", folder),
            }
        }
    }

    #[test]
    fn test_validate_unusable_folder() {
        for folder in ["shop//media", "media/..", "tab\there"] {
            match CloudStorageConfig::new("b", folder).validate() {
                Err(StorageError::ConfigError(msg)) => assert!(msg.contains("folder")),
                _ => panic!("Expected ConfigError for folder {:?}", folder),
            }
        }
    }

    #[test]
    fn test_folder_prefix_trims_slashes() {
        assert_eq!(CloudStorageConfig::new("b", "/media/").folder_prefix(), "media");
        assert_eq!(
            CloudStorageConfig::new("b", "shop/media").folder_prefix(),
            "shop/media"
        );
    }

    #[test]
    fn test_credential_option_keys() {
        let config = CloudStorageConfig::new("b", "f")
            .with_option("service_account_key", "{}")
            .with_option("application_credentials", "/adc.json");
        assert_eq!(
            config.credential_option_keys(),
            vec!["application_credentials", "service_account_key"]
        );
    }
}
