//! The asset store: commit uploads, review them, list them.
//!
//! Review is one-way (`uploaded` -> `approved` | `rejected`) but not
//! guarded: reviewing an already reviewed asset re-stamps it, last writer
//! wins. No notification fires from this component.

use std::sync::Arc;

use kurban_core::error::CoreError;
use kurban_core::media::{validate_mime_type, validate_storage_key, AssetStatus, ReviewAction};
use kurban_core::package::validate_note;
use kurban_core::types::DbId;
use kurban_db::models::media_asset::{AssetFilter, AssetReview, MediaAsset, NewMediaAsset};
use kurban_db::MediaStore;
use validator::Validate;

use crate::dto::{AssetListQuery, CommitAssetRequest, ReviewRequest};
use crate::error::MediaResult;

/// Commits, reviews and lists media assets.
#[derive(Clone)]
pub struct AssetService {
    store: Arc<dyn MediaStore>,
}

impl AssetService {
    pub fn new(store: Arc<dyn MediaStore>) -> Self {
        Self { store }
    }

    /// Record a completed upload as a new asset in `uploaded`.
    pub async fn commit(
        &self,
        input: CommitAssetRequest,
        operator_id: Option<DbId>,
    ) -> MediaResult<MediaAsset> {
        input.validate()?;
        validate_storage_key(&input.storage_key)?;
        validate_mime_type(&input.mime_type)?;

        if input.donation_id.is_none() && input.broadcast_id.is_none() {
            tracing::warn!(
                storage_key = %input.storage_key,
                "Committing asset without donation or broadcast reference"
            );
        }

        let asset = self
            .store
            .insert_asset(&NewMediaAsset {
                owner_donation_id: input.donation_id,
                broadcast_id: input.broadcast_id,
                storage_key: input.storage_key,
                mime_type: input.mime_type,
                duration_seconds: input.duration_seconds,
                width: input.width,
                height: input.height,
                size_bytes: input.size_bytes,
                created_by: operator_id,
            })
            .await?;

        tracing::info!(
            asset_id = %asset.id,
            donation_id = ?asset.owner_donation_id,
            mime_type = %asset.mime_type,
            "Media asset committed"
        );
        Ok(asset)
    }

    /// Apply an `approve` / `reject` decision.
    ///
    /// An unknown action fails before the store is touched.
    pub async fn review(
        &self,
        asset_id: DbId,
        input: ReviewRequest,
        operator_id: Option<DbId>,
    ) -> MediaResult<MediaAsset> {
        let action: ReviewAction = input.action.parse()?;
        validate_note(input.note.as_deref())?;
        let status = action.target_status();

        let asset = self
            .store
            .review_asset(
                asset_id,
                &AssetReview {
                    status,
                    reviewed_by: operator_id,
                    note: input.note,
                },
            )
            .await?
            .ok_or(CoreError::NotFound {
                entity: "media asset",
                id: asset_id,
            })?;

        tracing::info!(
            asset_id = %asset_id,
            status = %status,
            reviewed_by = ?operator_id,
            "Media asset reviewed"
        );
        Ok(asset)
    }

    /// Newest assets first, bounded to the list limit.
    pub async fn list(&self, query: &AssetListQuery) -> MediaResult<Vec<MediaAsset>> {
        let status = query
            .status
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(str::parse::<AssetStatus>)
            .transpose()?;
        let owner_donation_id = query
            .donation_id
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.parse::<DbId>()
                    .map_err(|_| CoreError::Validation(format!("invalid donationId: {s}")))
            })
            .transpose()?;

        let filter = AssetFilter {
            status,
            owner_donation_id,
            ..Default::default()
        };
        Ok(self.store.list_assets(&filter).await?)
    }

    pub async fn get(&self, asset_id: DbId) -> MediaResult<MediaAsset> {
        let asset = self
            .store
            .find_asset(asset_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "media asset",
                id: asset_id,
            })?;
        Ok(asset)
    }
}
