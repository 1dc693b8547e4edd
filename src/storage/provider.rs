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

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;
use std::fmt::{Debug, Formatter, Result as FmtResult};

use super::error::StorageResult;
use super::file::{ProviderDeleteFile, ProviderFileResult, ProviderGetFile, ProviderUploadFile};

/// Stream of object bytes; store failures arrive as `Err` items
pub type ByteStream = BoxStream<'static, StorageResult<Bytes>>;

/// File storage contract consumed by the host framework
///
/// Implementations are shared across concurrent requests.
#[async_trait]
pub trait FileProvider: Send + Sync {
    /// Identifier the host registers this provider under.
    fn identifier(&self) -> &'static str;

    /// Store a file under a freshly generated unique key.
    ///
    /// # Returns
    ///
    /// A `Result` containing:
    /// * `Ok(ProviderFileResult)` - The public URL and the generated key
    /// * `Err(StorageError)` - If the upload fails
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// * The filename is absent or empty (`InvalidData`, no store call is made)
    /// * The object store rejects the write
    async fn upload(&self, file: &ProviderUploadFile) -> StorageResult<ProviderFileResult>;

    /// Delete a previously uploaded file.
    ///
    /// Store failures are logged and not returned.
    async fn delete(&self, file: &ProviderDeleteFile) -> StorageResult<()>;

    /// Signed, time-limited download URL for `file.file_key`.
    ///
    /// # Errors
    ///
    /// An empty `file_key` is rejected with `InvalidData` rather than signing
    /// the bucket root.
    async fn get_presigned_download_url(&self, file: &ProviderGetFile) -> StorageResult<String>;

    /// Stream the object named by `file.filename`.
    ///
    /// # Errors
    ///
    /// Only `InvalidData` is returned directly; store failures are yielded by
    /// the stream.
    async fn get_as_stream(&self, file: &ProviderGetFile) -> StorageResult<ByteStream>;

    /// Download the object named by `file.filename` into memory.
    async fn get_as_buffer(&self, file: &ProviderGetFile) -> StorageResult<Bytes>;
}

impl Debug for dyn FileProvider {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "FileProvider(identifier={})", self.identifier())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::error::StorageError;
    use futures::stream::{self, StreamExt, TryStreamExt};

    struct MockProvider;

    #[async_trait]
    impl FileProvider for MockProvider {
        fn identifier(&self) -> &'static str {
            "mock"
        }

        async fn upload(&self, file: &ProviderUploadFile) -> StorageResult<ProviderFileResult> {
            let name = file.require_filename()?;
            Ok(ProviderFileResult {
                url: format!("mock://{}", name),
                key: name.to_string(),
            })
        }

        async fn delete(&self, _file: &ProviderDeleteFile) -> StorageResult<()> {
            Ok(())
        }

        async fn get_presigned_download_url(
            &self,
            file: &ProviderGetFile,
        ) -> StorageResult<String> {
            Ok(format!("mock://{}?signed", file.file_key))
        }

        async fn get_as_stream(&self, file: &ProviderGetFile) -> StorageResult<ByteStream> {
            file.require_filename()?;
            Ok(stream::iter(vec![
                Ok(Bytes::from_static(b"ab")),
                Ok(Bytes::from_static(b"cd")),
            ])
            .boxed())
        }

        async fn get_as_buffer(&self, file: &ProviderGetFile) -> StorageResult<Bytes> {
            file.require_filename()?;
            Ok(Bytes::from_static(b"abcd"))
        }
    }

    #[test]
    fn test_provider_debug() {
        let provider: &dyn FileProvider = &MockProvider;
        let debug_str = format!("{:?}", provider);
        assert_eq!(debug_str, "FileProvider(identifier=mock)");
    }

    #[tokio::test]
    async fn test_provider_as_trait_object() {
        let provider: Box<dyn FileProvider> = Box::new(MockProvider);

        let result = provider
            .upload(&ProviderUploadFile::new("a.txt", Bytes::new()))
            .await
            .unwrap();
        assert_eq!(result.key, "a.txt");

        let chunks: Vec<Bytes> = provider
            .get_as_stream(&ProviderGetFile::from_filename("a.txt"))
            .await
            .unwrap()
            .try_collect()
            .await
            .unwrap();
        assert_eq!(chunks.concat(), b"abcd".to_vec());

        match provider.get_as_buffer(&ProviderGetFile::default()).await {
            Err(StorageError::InvalidData(_)) => (),
            other => panic!("Expected InvalidData, got {:?}", other),
        }
    }
}
