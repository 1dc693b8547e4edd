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

//! Cloud Storage file provider
//!
//! This module adapts a Google Cloud Storage bucket, accessed through the
//! `object_store` crate, to the host framework's file provider contract
//! ([`FileProvider`]).
//!
//! Authentication, request signing and transport retries are handled by the
//! `object_store` GCS client; this layer only decides which key each
//! operation touches and what happens to its errors (see [`policy`]).

pub mod cloud_storage;
pub mod config;
pub mod error;
pub mod factory;
pub mod file;
pub mod key;
pub mod policy;
pub mod provider;
pub mod signed_url;

// Public exports
pub use cloud_storage::{CloudStorageFileService, CloudStorageFileServiceBuilder};
pub use config::CloudStorageConfig;
pub use error::{ErrorKind, StorageError, StorageResult};
pub use factory::FileProviderFactory;
pub use file::{ProviderDeleteFile, ProviderFileResult, ProviderGetFile, ProviderUploadFile};
pub use key::{KeyGenerator, KeyScope, UlidKeyGenerator};
pub use policy::{ErrorPolicy, FileOperation};
pub use provider::{ByteStream, FileProvider};
pub use signed_url::{signed_url_expiry, SIGNED_URL_TTL};
