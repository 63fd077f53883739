use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use std::time::Duration;

/// Blob-store port. Object keys returned by `put_as` are what gets persisted
/// on entities; reads trade a key for a short-lived signed URL.
#[async_trait]
#[automock]
pub trait AttachmentStore {
    async fn put_as(
        &self,
        folder: &str,
        bytes: Vec<u8>,
        file_name: &str,
        content_type: &str,
    ) -> Result<String>;

    async fn delete(&self, object_key: &str) -> Result<()>;

    async fn temporary_url(&self, object_key: &str, expires_in: Duration) -> Result<String>;
}
