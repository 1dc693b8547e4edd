use cloud_storage_file::storage::signed_url_expiry;
use cloud_storage_file::{
    CloudStorageConfig, FileProvider, FileProviderFactory, ProviderDeleteFile, ProviderGetFile,
    ProviderUploadFile,
};
use futures::TryStreamExt;
use std::error::Error;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = CloudStorageConfig::new("my-bucket-1234", "uploads")
        .with_project_id("my-project")
        .with_option("service_account_key_path", "/path/to/key.json");
    let provider = FileProviderFactory::from_config(config)?;

    let uploaded = provider
        .upload(
            &ProviderUploadFile::new("report.pdf", b"%PDF-1.7 demo".to_vec())
                .with_mime_type("application/pdf"),
        )
        .await?;
    info!("Uploaded key={}, url={}", uploaded.key, uploaded.url);

    let object_key = format!("uploads/{}", uploaded.key);
    let link = provider
        .get_presigned_download_url(&ProviderGetFile::from_file_key(object_key.clone()))
        .await?;
    let expires_at = url::Url::parse(&link).ok().and_then(|u| signed_url_expiry(&u));
    info!("Signed url={}, expires_at={:?}", link, expires_at);

    let buffered = provider
        .get_as_buffer(&ProviderGetFile::from_filename(object_key.clone()))
        .await?;
    let streamed: Vec<bytes::Bytes> = provider
        .get_as_stream(&ProviderGetFile::from_filename(object_key))
        .await?
        .try_collect()
        .await?;
    info!(
        "Read back buffered_size={}, streamed_chunks={}",
        buffered.len(),
        streamed.len()
    );

    provider
        .delete(&ProviderDeleteFile::new(uploaded.key))
        .await?;

    Ok(())
}
