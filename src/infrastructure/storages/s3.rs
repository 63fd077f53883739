use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use aws_config::{BehaviorVersion, timeout::TimeoutConfig};
use aws_credential_types::Credentials;
use aws_sdk_s3::{
    Client,
    config::Region,
    presigning::PresigningConfig,
    primitives::ByteStream,
};
use http::Uri;

use crate::config::config_model;
use crate::domain::repositories::attachments::AttachmentStore;

#[derive(Debug, Clone)]
pub struct S3Config {
    pub endpoint: String,
    pub region: String,
    pub bucket: String,
    pub access_key: String,
    pub secret_key: String,
    pub connect_timeout_secs: u64,
    pub read_timeout_secs: u64,
}

impl From<&config_model::Storage> for S3Config {
    fn from(storage: &config_model::Storage) -> Self {
        Self {
            endpoint: storage.endpoint.clone(),
            region: storage.region.clone(),
            bucket: storage.bucket.clone(),
            access_key: storage.access_key.clone(),
            secret_key: storage.secret_key.clone(),
            connect_timeout_secs: 10,
            read_timeout_secs: 60,
        }
    }
}

pub struct S3AttachmentStore {
    client: Client,
    bucket: String,
}

impl S3AttachmentStore {
    pub async fn new(config: &S3Config) -> Result<Self> {
        let client = build_s3_client(config).await?;

        Ok(Self {
            client,
            bucket: config.bucket.clone(),
        })
    }
}

#[async_trait]
impl AttachmentStore for S3AttachmentStore {
    async fn put_as(
        &self,
        folder: &str,
        bytes: Vec<u8>,
        file_name: &str,
        content_type: &str,
    ) -> Result<String> {
        let object_key = object_key(folder, file_name);
        let content_type = resolve_content_type(file_name, content_type);

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&object_key)
            .body(ByteStream::from(bytes))
            .content_type(content_type)
            .send()
            .await
            .with_context(|| format!("failed to upload object {}", object_key))?;

        Ok(object_key)
    }

    async fn delete(&self, object_key: &str) -> Result<()> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(object_key)
            .send()
            .await
            .with_context(|| format!("failed to delete object {}", object_key))?;

        Ok(())
    }

    async fn temporary_url(&self, object_key: &str, expires_in: Duration) -> Result<String> {
        let presigning = PresigningConfig::expires_in(expires_in)
            .context("invalid presigning expiration")?;

        let request = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(object_key)
            .presigned(presigning)
            .await
            .with_context(|| format!("failed to presign object {}", object_key))?;

        Ok(request.uri().to_string())
    }
}

fn object_key(folder: &str, file_name: &str) -> String {
    let folder = folder.trim_matches('/');
    if folder.is_empty() {
        file_name.to_string()
    } else {
        format!("{}/{}", folder, file_name)
    }
}

fn resolve_content_type(file_name: &str, content_type: &str) -> String {
    if content_type.is_empty() {
        mime_guess::from_path(file_name)
            .first_or_octet_stream()
            .to_string()
    } else {
        content_type.to_string()
    }
}

async fn build_s3_client(config: &S3Config) -> Result<Client> {
    let endpoint = format!("{}/", config.endpoint.trim_end_matches('/'));
    Uri::from_str(&endpoint).context("invalid s3 endpoint URL")?;

    let credentials = Credentials::new(
        config.access_key.clone(),
        config.secret_key.clone(),
        None,
        None,
        "s3-compatible",
    );

    let region = Region::new(config.region.clone());
    let shared_config = aws_config::defaults(BehaviorVersion::latest())
        .region(region.clone())
        .credentials_provider(credentials)
        .timeout_config(
            TimeoutConfig::builder()
                .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
                .read_timeout(Duration::from_secs(config.read_timeout_secs))
                .build(),
        )
        .load()
        .await;

    let s3_config = aws_sdk_s3::config::Builder::from(&shared_config)
        .endpoint_url(endpoint)
        .force_path_style(true)
        .region(region)
        .build();

    Ok(Client::from_conf(s3_config))
}
