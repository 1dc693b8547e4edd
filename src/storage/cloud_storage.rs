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

use super::config::{CloudStorageConfig, CLIENT_OPTION_KEYS};
use super::error::{StorageError, StorageResult};
use super::file::{ProviderDeleteFile, ProviderFileResult, ProviderGetFile, ProviderUploadFile};
use super::key::{public_url, unique_file_key, KeyGenerator, UlidKeyGenerator};
use super::policy::FileOperation;
use super::provider::{ByteStream, FileProvider};
use super::signed_url::SIGNED_URL_TTL;
use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::{self, StreamExt, TryStreamExt};
use http::Method;
use object_store::{
    gcp::GoogleCloudStorageBuilder, path::Path as ObjectPath, signer::Signer, Attribute,
    Attributes, ClientOptions, ObjectStore, ObjectStoreExt, PutOptions, PutPayload, RetryConfig,
};
use std::fmt::{Debug, Formatter};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, info_span, warn, Span};

/// File provider backed by a Google Cloud Storage bucket
///
/// One client is built at construction and shared by every call.
///
/// # Examples
///
/// ```no_run
/// use cloud_storage_file::{CloudStorageConfig, CloudStorageFileService, FileProvider, ProviderUploadFile};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
/// let config = CloudStorageConfig::new("shop-assets", "uploads");
/// let service = CloudStorageFileService::new(config)?;
///
/// let result = service
///     .upload(&ProviderUploadFile::new("report.pdf", b"%PDF-1.7".to_vec()))
///     .await?;
/// println!("{} -> {}", result.key, result.url);
/// # Ok(())
/// # }
/// ```
pub struct CloudStorageFileService {
    config: CloudStorageConfig,
    store: Arc<dyn ObjectStore>,
    signer: Arc<dyn Signer>,
    key_generator: Arc<dyn KeyGenerator>,
    span: Span,
}

/// Builder for [`CloudStorageFileService`]
///
/// Without an injected store and signer, `build` creates a GCS client from
/// the configuration.
pub struct CloudStorageFileServiceBuilder {
    config: CloudStorageConfig,
    store: Option<Arc<dyn ObjectStore>>,
    signer: Option<Arc<dyn Signer>>,
    key_generator: Option<Arc<dyn KeyGenerator>>,
    span: Option<Span>,
}

impl CloudStorageFileServiceBuilder {
    pub fn new(config: CloudStorageConfig) -> Self {
        Self {
            config,
            store: None,
            signer: None,
            key_generator: None,
            span: None,
        }
    }

    /// Use an existing object store instead of building a GCS client.
    ///
    /// Must be paired with [`with_signer`](Self::with_signer).
    pub fn with_store(mut self, store: Arc<dyn ObjectStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_signer(mut self, signer: Arc<dyn Signer>) -> Self {
        self.signer = Some(signer);
        self
    }

    pub fn with_key_generator(mut self, key_generator: Arc<dyn KeyGenerator>) -> Self {
        self.key_generator = Some(key_generator);
        self
    }

    /// Span every log event of the service is attached to.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Validate the configuration and construct the service.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// * `bucket` or `folder` is empty
    /// * Only one of store and signer was injected
    /// * The GCS client cannot be built (e.g. malformed service account key)
    pub fn build(self) -> StorageResult<CloudStorageFileService> {
        let mut config = self.config;
        config.validate()?;
        config.folder = config.folder_prefix().to_string();

        let span = self.span.unwrap_or_else(|| {
            info_span!("cloud_storage", bucket = %config.bucket, folder = %config.folder)
        });

        let (store, signer): (Arc<dyn ObjectStore>, Arc<dyn Signer>) =
            match (self.store, self.signer) {
                (Some(store), Some(signer)) => (store, signer),
                (None, None) => {
                    let gcs = Arc::new(CloudStorageFileService::build_gcs_store(&config)?);
                    let store: Arc<dyn ObjectStore> = gcs.clone();
                    let signer: Arc<dyn Signer> = gcs;
                    (store, signer)
                }
                _ => {
                    return Err(StorageError::ConfigError(
                        "An injected object store and signer must be provided together"
                            .to_string(),
                    ))
                }
            };

        info!(
            parent: &span,
            "Initialized Cloud Storage file provider project_id={}, bucket={}, folder={}, credential_options={:?}",
            config.project_id.as_deref().unwrap_or("<from credentials>"),
            config.bucket,
            config.folder,
            config.credential_option_keys()
        );

        Ok(CloudStorageFileService {
            config,
            store,
            signer,
            key_generator: self
                .key_generator
                .unwrap_or_else(|| Arc::new(UlidKeyGenerator)),
            span,
        })
    }
}

impl CloudStorageFileService {
    /// Identifier the host registers this provider under
    pub const IDENTIFIER: &'static str = "cloud-storage";

    /// Create a service with a GCS client built from `config`.
    ///
    /// # Errors
    ///
    /// See [`CloudStorageFileServiceBuilder::build`].
    pub fn new(config: CloudStorageConfig) -> StorageResult<Self> {
        Self::builder(config).build()
    }

    pub fn builder(config: CloudStorageConfig) -> CloudStorageFileServiceBuilder {
        CloudStorageFileServiceBuilder::new(config)
    }

    pub fn config(&self) -> &CloudStorageConfig {
        &self.config
    }

    fn folder(&self) -> &str {
        &self.config.folder
    }

    /// Build a GCS store.
    ///
    /// Credentials not given in `options` are picked up from the environment
    /// the same way `GoogleCloudStorageBuilder::from_env` does.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::ConfigError` if the client cannot be initialized.
    fn build_gcs_store(
        config: &CloudStorageConfig,
    ) -> StorageResult<object_store::gcp::GoogleCloudStorage> {
        let mut builder = GoogleCloudStorageBuilder::from_env()
            .with_bucket_name(&config.bucket)
            .with_client_options(Self::build_connection_options(config))
            .with_retry(Self::build_retry_options(config));

        for (key, value) in &config.options {
            match key.as_str() {
                "service_account_key_path" => builder = builder.with_service_account_path(value),
                "service_account_key" => builder = builder.with_service_account_key(value),
                "application_credentials" => builder = builder.with_application_credentials(value),
                // Already handled by `build_connection_options` and `build_retry_options`
                k if CLIENT_OPTION_KEYS.contains(&k) => (),
                _ => {
                    warn!("Unknown GCS option: {}", key);
                }
            }
        }

        builder
            .build()
            .map_err(|e| StorageError::ConfigError(format!("Failed to create GCS store: {}", e)))
    }

    /// Build connection options from configuration.
    fn build_connection_options(config: &CloudStorageConfig) -> ClientOptions {
        let mut client_options = ClientOptions::default();
        if let Some(timeout_str) = config.get_option("timeout") {
            if timeout_str == "0" || timeout_str == "disabled" {
                client_options = client_options.with_timeout_disabled();
            } else if let Ok(sec) = timeout_str.parse::<u64>() {
                client_options = client_options.with_timeout(Duration::from_secs(sec))
            }
        };
        if let Some(connect_timeout_str) = config.get_option("connect_timeout") {
            if connect_timeout_str == "0" || connect_timeout_str == "disabled" {
                client_options = client_options.with_connect_timeout_disabled();
            } else if let Ok(sec) = connect_timeout_str.parse::<u64>() {
                client_options = client_options.with_connect_timeout(Duration::from_secs(sec))
            }
        }
        if let Some(pool_idle_timeout_str) = config.get_option("pool_idle_timeout") {
            if let Ok(sec) = pool_idle_timeout_str.parse::<u64>() {
                client_options = client_options.with_pool_idle_timeout(Duration::from_secs(sec))
            }
        }
        if let Some(pool_max_idle_per_host_str) = config.get_option("pool_max_idle_per_host") {
            if let Ok(max_idle) = pool_max_idle_per_host_str.parse::<usize>() {
                client_options = client_options.with_pool_max_idle_per_host(max_idle)
            }
        }
        client_options
    }

    /// Build the client's transport retry settings from configuration.
    fn build_retry_options(config: &CloudStorageConfig) -> RetryConfig {
        let default_retry_config = RetryConfig::default();
        let max_retries = config
            .get_option("max_retries")
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(default_retry_config.max_retries);
        let retry_timeout = config
            .get_option("retry_timeout")
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(default_retry_config.retry_timeout);
        RetryConfig {
            backoff: Default::default(),
            max_retries,
            retry_timeout,
        }
    }

    /// Log a failed store call and hand the error back.
    fn failure(&self, operation: FileOperation, location: &str, e: StorageError) -> StorageError {
        error!(
            parent: &self.span,
            "Failed operation={}, location={}, error={}", operation, location, e
        );
        e
    }

    async fn read_object(&self, location: &ObjectPath) -> object_store::Result<Bytes> {
        self.store.get(location).await?.bytes().await
    }
}

#[async_trait]
impl FileProvider for CloudStorageFileService {
    fn identifier(&self) -> &'static str {
        Self::IDENTIFIER
    }

    async fn upload(&self, file: &ProviderUploadFile) -> StorageResult<ProviderFileResult> {
        let operation = FileOperation::Upload;
        let filename = file.require_filename()?;

        let key = unique_file_key(filename, self.key_generator.as_ref());
        let scope = operation.key_scope();
        let object_key = scope.object_key(self.folder(), &key);
        let location = scope.object_path(self.folder(), &key)?;

        let mut attributes = Attributes::new();
        if let Some(mime_type) = &file.mime_type {
            attributes.insert(Attribute::ContentType, mime_type.clone().into());
        }

        self.store
            .put_opts(
                &location,
                PutPayload::from(file.content.clone()),
                PutOptions::from(attributes),
            )
            .await
            .map_err(|e| self.failure(operation, &object_key, e.into()))?;

        info!(
            parent: &self.span,
            "Uploaded file location={}, size={}",
            object_key,
            file.content.len()
        );

        Ok(ProviderFileResult {
            url: public_url(&self.config.bucket, &object_key),
            key,
        })
    }

    async fn delete(&self, file: &ProviderDeleteFile) -> StorageResult<()> {
        let operation = FileOperation::Delete;
        if file.file_key.is_empty() {
            warn!(parent: &self.span, "Skipping delete with empty file key");
            return Ok(());
        }

        let scope = operation.key_scope();
        let object_key = scope.object_key(self.folder(), &file.file_key);
        let result = match scope.object_path(self.folder(), &file.file_key) {
            Ok(location) => self
                .store
                .delete(&location)
                .await
                .map_err(|e| self.failure(operation, &object_key, e.into())),
            Err(e) => Err(self.failure(operation, &object_key, e)),
        };

        if result.is_ok() {
            info!(parent: &self.span, "Deleted file location={}", object_key);
        }
        operation.settle(result)
    }

    async fn get_presigned_download_url(&self, file: &ProviderGetFile) -> StorageResult<String> {
        let operation = FileOperation::PresignedDownloadUrl;
        if file.file_key.is_empty() {
            return Err(StorageError::InvalidData("No file key provided".to_string()));
        }

        let scope = operation.key_scope();
        let object_key = scope.object_key(self.folder(), &file.file_key);
        let location = scope.object_path(self.folder(), &file.file_key)?;
        let url = self
            .signer
            .signed_url(Method::GET, &location, SIGNED_URL_TTL)
            .await
            .map_err(|e| self.failure(operation, &object_key, e.into()))?;

        debug!(
            parent: &self.span,
            "Signed download url location={}, expires_in={}s",
            object_key,
            SIGNED_URL_TTL.as_secs()
        );
        Ok(url.to_string())
    }

    async fn get_as_stream(&self, file: &ProviderGetFile) -> StorageResult<ByteStream> {
        let operation = FileOperation::Stream;
        let filename = file.require_filename()?;

        let scope = operation.key_scope();
        let object_key = scope.object_key(self.folder(), filename);
        let location = scope.object_path(self.folder(), filename)?;
        let store = Arc::clone(&self.store);
        let span = self.span.clone();

        debug!(parent: &self.span, "Opening read stream location={}", object_key);

        // The request is only sent once the caller polls the stream.
        let stream = stream::once(async move { store.get(&location).await })
            .map_ok(|result| result.into_stream())
            .try_flatten()
            .map_err(StorageError::from)
            .inspect_err(move |e| {
                error!(
                    parent: &span,
                    "Failed operation={}, location={}, error={}", operation, object_key, e
                )
            })
            .boxed();

        Ok(stream)
    }

    async fn get_as_buffer(&self, file: &ProviderGetFile) -> StorageResult<Bytes> {
        let operation = FileOperation::Buffer;
        let filename = file.require_filename()?;

        let scope = operation.key_scope();
        let object_key = scope.object_key(self.folder(), filename);
        let location = scope.object_path(self.folder(), filename)?;
        let bytes = self
            .read_object(&location)
            .await
            .map_err(|e| self.failure(operation, &object_key, e.into()))?;

        debug!(
            parent: &self.span,
            "Downloaded file location={}, size={}",
            object_key,
            bytes.len()
        );
        Ok(bytes)
    }
}

impl Debug for CloudStorageFileService {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "FileProvider(identifier={}, bucket={}, folder={}, store={})",
            Self::IDENTIFIER,
            self.config.bucket,
            self.config.folder,
            self.store
        )
    }
}
