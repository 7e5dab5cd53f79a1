//! S3-compatible object store provider.

use aws_sdk_s3::primitives::ByteStream;

use crate::{ObjectStore, StorageError};

pub struct S3Store {
    client: aws_sdk_s3::Client,
    bucket: String,
    region: String,
}

impl S3Store {
    /// Build a store from the ambient AWS environment (credentials chain,
    /// `AWS_REGION`).
    pub async fn from_env(bucket: impl Into<String>) -> Self {
        let config = aws_config::load_from_env().await;
        let region = config
            .region()
            .map(|r| r.to_string())
            .unwrap_or_else(|| "us-east-1".to_string());
        Self {
            client: aws_sdk_s3::Client::new(&config),
            bucket: bucket.into(),
            region,
        }
    }

    /// Marker this provider's public URLs are split on when recovering the
    /// object path.
    fn url_marker(&self) -> String {
        format!("{}.s3.{}.amazonaws.com/", self.bucket, self.region)
    }
}

#[async_trait::async_trait]
impl ObjectStore for S3Store {
    async fn put(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(path)
            .content_type(content_type)
            .body(ByteStream::from(bytes))
            .send()
            .await
            .map_err(|e| StorageError::Provider(e.to_string()))?;
        Ok(self.public_url(path))
    }

    async fn delete(&self, path: &str) -> Result<(), StorageError> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(path)
            .send()
            .await
            .map_err(|e| StorageError::Provider(e.to_string()))?;
        Ok(())
    }

    fn public_url(&self, path: &str) -> String {
        format!("https://{}{}", self.url_marker(), path)
    }

    fn path_from_url(&self, url: &str) -> Result<String, StorageError> {
        let marker = self.url_marker();
        let path = url
            .split_once(&marker)
            .map(|(_, rest)| rest)
            .ok_or_else(|| StorageError::UnrecognizedUrl(url.to_string()))?;
        Ok(path.split('?').next().unwrap_or(path).to_string())
    }
}
