//! Media package and package item models.

use kurban_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `media_packages` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaPackage {
    pub id: DbId,
    pub donation_id: DbId,
    pub title: String,
    pub note: Option<String>,
    pub status: String,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub published_at: Option<Timestamp>,
}

/// DTO for creating a draft package.
#[derive(Debug, Clone)]
pub struct NewMediaPackage {
    pub donation_id: DbId,
    pub title: String,
    pub note: Option<String>,
    pub created_by: Option<DbId>,
}

/// Partial update of a draft package's operator-supplied text.
#[derive(Debug, Clone, Default)]
pub struct PackageDetailsUpdate {
    pub title: Option<String>,
    pub note: Option<String>,
}

/// A package item joined with the asset it references.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageItem {
    pub media_asset_id: DbId,
    pub position: i32,
    pub storage_key: String,
    pub mime_type: String,
    pub asset_status: String,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub duration_seconds: Option<i32>,
}

/// Result of a status write: the current row and whether it actually moved.
#[derive(Debug, Clone)]
pub struct PackageStatusChange {
    pub package: MediaPackage,
    pub changed: bool,
}
