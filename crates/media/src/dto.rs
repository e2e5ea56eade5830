//! Request and response shapes for the media workflow.
//!
//! Field names are camelCase on the wire.

use kurban_core::types::{DbId, Timestamp};
use kurban_db::models::media_package::{MediaPackage, PackageItem};
use serde::{Deserialize, Serialize};
use validator::Validate;

// ---------------------------------------------------------------------------
// Uploads
// ---------------------------------------------------------------------------

/// Request for a presigned upload URL.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UploadUrlRequest {
    pub donation_id: DbId,
    pub broadcast_id: Option<DbId>,
    pub mime_type: String,
    #[validate(range(min = 1))]
    pub size_bytes: Option<i64>,
}

/// A presigned upload URL and the key the client must commit afterwards.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadTicket {
    pub upload_url: String,
    pub storage_key: String,
}

// ---------------------------------------------------------------------------
// Assets
// ---------------------------------------------------------------------------

/// Confirmation that an upload completed.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CommitAssetRequest {
    #[validate(length(min = 1, max = 1024))]
    pub storage_key: String,
    pub donation_id: Option<DbId>,
    pub broadcast_id: Option<DbId>,
    pub mime_type: String,
    #[validate(range(min = 1))]
    pub width: Option<i32>,
    #[validate(range(min = 1))]
    pub height: Option<i32>,
    #[validate(range(min = 0))]
    pub duration_seconds: Option<i32>,
    #[validate(range(min = 1))]
    pub size_bytes: Option<i64>,
}

/// Operator decision on an asset.
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewRequest {
    pub action: String,
    pub note: Option<String>,
}

/// Query parameters for listing assets.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetListQuery {
    pub status: Option<String>,
    /// Kept as text so an empty value means "no filter".
    pub donation_id: Option<String>,
}

/// `{assetId, status}` acknowledgement for commit and review.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetStatusResponse {
    pub asset_id: DbId,
    pub status: String,
}

// ---------------------------------------------------------------------------
// Packages
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePackageRequest {
    pub donation_id: DbId,
    pub title: String,
    pub note: Option<String>,
}

/// Assets to attach to a package, with optional explicit positions.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemsRequest {
    pub media_asset_ids: Vec<DbId>,
    pub positions: Option<Vec<i32>>,
}

/// Partial update of a package: status and/or draft details.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePackageRequest {
    pub status: Option<String>,
    pub title: Option<String>,
    pub note: Option<String>,
}

/// `{packageId, status}` acknowledgement for create and status changes.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageStatusResponse {
    pub package_id: DbId,
    pub status: String,
}

/// `{packageId, itemsCount}` acknowledgement for item batches.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemsResponse {
    pub package_id: DbId,
    pub items_count: usize,
}

/// Operator view of a package and its ordered items.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageDetail {
    #[serde(flatten)]
    pub package: MediaPackage,
    pub items: Vec<PackageItem>,
}

/// Donor view of a published package.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DonorPackage {
    pub package_id: DbId,
    pub title: String,
    pub note: Option<String>,
    pub published_at: Option<Timestamp>,
    pub items: Vec<DonorPackageItem>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DonorPackageItem {
    pub media_asset_id: DbId,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub mime_type: String,
    pub position: i32,
    /// Presigned download URL.
    pub url: String,
}

// ---------------------------------------------------------------------------
// Lists
// ---------------------------------------------------------------------------

/// `{items: [...]}` envelope for list endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct ItemsResponse<T> {
    pub items: Vec<T>,
}
