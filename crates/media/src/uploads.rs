//! Upload broker: hands out presigned upload URLs.
//!
//! No asset row is written here. The client uploads directly to storage and
//! then commits the returned key through [`crate::AssetService::commit`].

use std::sync::Arc;

use chrono::Utc;
use kurban_cloud::ObjectStorage;
use kurban_core::error::CoreError;
use kurban_core::media::{build_storage_key, validate_mime_type};
use uuid::Uuid;
use validator::Validate;

use crate::dto::{UploadTicket, UploadUrlRequest};
use crate::error::MediaResult;

/// Issues presigned upload URLs scoped to a fresh storage key.
#[derive(Clone)]
pub struct UploadBroker {
    storage: Arc<dyn ObjectStorage>,
}

impl UploadBroker {
    pub fn new(storage: Arc<dyn ObjectStorage>) -> Self {
        Self { storage }
    }

    /// Derive a key for the upload and presign a `PUT` for it.
    ///
    /// The request is fully validated before storage is contacted.
    pub async fn create_upload_url(&self, input: UploadUrlRequest) -> MediaResult<UploadTicket> {
        input.validate()?;
        validate_mime_type(&input.mime_type)?;

        let storage_key =
            build_storage_key(Utc::now(), input.donation_id, Uuid::new_v4(), &input.mime_type);

        let upload_url = self
            .storage
            .presign_put(&storage_key, &input.mime_type, self.storage.default_expiry())
            .await
            .map_err(|e| {
                tracing::error!(
                    storage_key = %storage_key,
                    error = %e,
                    "Failed to presign upload URL"
                );
                CoreError::Dependency(e.to_string())
            })?;

        tracing::info!(
            donation_id = %input.donation_id,
            broadcast_id = ?input.broadcast_id,
            storage_key = %storage_key,
            "Upload URL issued"
        );
        Ok(UploadTicket {
            upload_url,
            storage_key,
        })
    }
}
