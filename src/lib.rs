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

//! # Cloud Storage File
//!
//! A file provider that stores an e-commerce platform's uploads in a Google
//! Cloud Storage bucket.
//!
//! The provider implements five operations:
//!
//! - **upload**: write a file under `{folder}/{name}-{ulid}{ext}` and return its public URL
//! - **delete**: remove a previously uploaded file (failures are logged, never returned)
//! - **get_presigned_download_url**: V4 signed `GET` URL valid for 15 minutes
//! - **get_as_stream**: stream an object's bytes
//! - **get_as_buffer**: download an object into memory
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cloud_storage_file::{
//!     CloudStorageConfig, FileProvider, FileProviderFactory, ProviderGetFile, ProviderUploadFile,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//! let config = CloudStorageConfig::new("shop-assets", "uploads")
//!     .with_option("service_account_key_path", "/path/to/key.json");
//! let provider = FileProviderFactory::from_config(config)?;
//!
//! let uploaded = provider
//!     .upload(&ProviderUploadFile::new("report.pdf", b"%PDF-1.7".to_vec()))
//!     .await?;
//!
//! let link = provider
//!     .get_presigned_download_url(&ProviderGetFile::from_file_key(format!(
//!         "uploads/{}",
//!         uploaded.key
//!     )))
//!     .await?;
//! println!("{}", link);
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`storage`] - Provider contract, configuration and the GCS-backed service

pub mod storage;

// Re-export commonly used types
pub use storage::{
    CloudStorageConfig, CloudStorageFileService, FileProvider, FileProviderFactory,
    ProviderDeleteFile, ProviderFileResult, ProviderGetFile, ProviderUploadFile, StorageError,
    StorageResult,
};
