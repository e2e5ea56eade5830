//! S3-compatible [`ObjectStorage`] backed by `aws-sdk-s3` presigning.

use std::time::Duration;

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_credential_types::Credentials;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::Client;

use crate::config::StorageConfig;
use crate::storage::{ObjectStorage, StorageError};

/// Presigning client for a single bucket.
pub struct S3Storage {
    client: Client,
    bucket: String,
    presign_expiry: Duration,
}

impl S3Storage {
    /// Build a client from configuration.
    ///
    /// Static credentials are used when both key id and secret are set;
    /// otherwise credentials come from the default provider chain.
    pub async fn new(config: &StorageConfig) -> Self {
        let shared = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .load()
            .await;

        let mut builder =
            aws_sdk_s3::config::Builder::from(&shared).force_path_style(config.force_path_style());

        if let Some(endpoint) = &config.endpoint_url {
            builder = builder.endpoint_url(endpoint);
        }

        if let (Some(access_key), Some(secret_key)) =
            (&config.access_key_id, &config.secret_access_key)
        {
            let creds = Credentials::new(access_key, secret_key, None, None, "static");
            builder = builder.credentials_provider(creds);
        }

        tracing::info!(
            bucket = %config.bucket,
            region = %config.region,
            endpoint = ?config.endpoint_url,
            "Object storage client configured"
        );

        Self {
            client: Client::from_conf(builder.build()),
            bucket: config.bucket.clone(),
            presign_expiry: config.presign_expiry,
        }
    }
}

fn presigning_config(expires_in: Duration) -> Result<PresigningConfig, StorageError> {
    PresigningConfig::expires_in(expires_in).map_err(|e| StorageError::InvalidExpiry(e.to_string()))
}

#[async_trait]
impl ObjectStorage for S3Storage {
    async fn presign_put(
        &self,
        key: &str,
        content_type: &str,
        expires_in: Duration,
    ) -> Result<String, StorageError> {
        let presigned = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .presigned(presigning_config(expires_in)?)
            .await
            .map_err(|e| StorageError::Presign(e.to_string()))?;

        tracing::debug!(key, expires_secs = expires_in.as_secs(), "Presigned upload URL");
        Ok(presigned.uri().to_string())
    }

    async fn presign_get(
        &self,
        key: &str,
        content_type: Option<&str>,
        expires_in: Duration,
    ) -> Result<String, StorageError> {
        let presigned = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .set_response_content_type(content_type.map(str::to_string))
            .presigned(presigning_config(expires_in)?)
            .await
            .map_err(|e| StorageError::Presign(e.to_string()))?;

        Ok(presigned.uri().to_string())
    }

    fn default_expiry(&self) -> Duration {
        self.presign_expiry
    }
}
