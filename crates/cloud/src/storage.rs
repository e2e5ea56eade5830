use std::time::Duration;

use async_trait::async_trait;

/// Errors from the object storage backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Invalid presign expiry: {0}")]
    InvalidExpiry(String),

    #[error("Presign failed: {0}")]
    Presign(String),
}

/// An object store able to hand out time-limited signed URLs.
///
/// Bytes never pass through this service; clients upload and download
/// directly against the URLs returned here.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Signed URL permitting a single `PUT` of `key` with `content_type`.
    async fn presign_put(
        &self,
        key: &str,
        content_type: &str,
        expires_in: Duration,
    ) -> Result<String, StorageError>;

    /// Signed URL permitting a `GET` of `key`, optionally overriding the
    /// response content type.
    async fn presign_get(
        &self,
        key: &str,
        content_type: Option<&str>,
        expires_in: Duration,
    ) -> Result<String, StorageError>;

    /// Expiry applied when the caller has no specific requirement.
    fn default_expiry(&self) -> Duration;
}
