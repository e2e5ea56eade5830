//! Media asset models and DTOs.

use kurban_core::media::{AssetStatus, ASSET_LIST_LIMIT};
use kurban_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `media_assets` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaAsset {
    pub id: DbId,
    pub owner_donation_id: Option<DbId>,
    pub broadcast_id: Option<DbId>,
    pub storage_key: String,
    pub mime_type: String,
    pub duration_seconds: Option<i32>,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub size_bytes: Option<i64>,
    pub status: String,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
    pub reviewed_by: Option<DbId>,
    pub reviewed_at: Option<Timestamp>,
    pub review_note: Option<String>,
}

/// DTO for committing an uploaded object as a new asset.
#[derive(Debug, Clone, Default)]
pub struct NewMediaAsset {
    pub owner_donation_id: Option<DbId>,
    pub broadcast_id: Option<DbId>,
    pub storage_key: String,
    pub mime_type: String,
    pub duration_seconds: Option<i32>,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub size_bytes: Option<i64>,
    pub created_by: Option<DbId>,
}

/// Review outcome written onto an asset.
#[derive(Debug, Clone)]
pub struct AssetReview {
    pub status: AssetStatus,
    pub reviewed_by: Option<DbId>,
    pub note: Option<String>,
}

/// Filters for listing assets, newest first.
#[derive(Debug, Clone)]
pub struct AssetFilter {
    pub status: Option<AssetStatus>,
    pub owner_donation_id: Option<DbId>,
    pub limit: i64,
}

impl Default for AssetFilter {
    fn default() -> Self {
        Self {
            status: None,
            owner_donation_id: None,
            limit: ASSET_LIST_LIMIT,
        }
    }
}
