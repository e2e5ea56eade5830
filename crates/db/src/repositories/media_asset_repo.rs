//! Repository for the `media_assets` table.

use std::collections::HashSet;

use kurban_core::media::AssetStatus;
use kurban_core::types::DbId;
use sqlx::PgPool;

use crate::models::media_asset::{AssetFilter, AssetReview, MediaAsset, NewMediaAsset};

/// Column list for media_assets queries.
const COLUMNS: &str = "id, owner_donation_id, broadcast_id, storage_key, mime_type, \
    duration_seconds, width, height, size_bytes, status, created_by, created_at, \
    reviewed_by, reviewed_at, review_note";

/// Provides CRUD operations for media assets.
pub struct MediaAssetRepo;

impl MediaAssetRepo {
    /// Insert a committed upload with status `uploaded`, returning the row.
    pub async fn create(pool: &PgPool, input: &NewMediaAsset) -> Result<MediaAsset, sqlx::Error> {
        let query = format!(
            "INSERT INTO media_assets \
                (owner_donation_id, broadcast_id, storage_key, mime_type, \
                 duration_seconds, width, height, size_bytes, status, created_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MediaAsset>(&query)
            .bind(input.owner_donation_id)
            .bind(input.broadcast_id)
            .bind(&input.storage_key)
            .bind(&input.mime_type)
            .bind(input.duration_seconds)
            .bind(input.width)
            .bind(input.height)
            .bind(input.size_bytes)
            .bind(AssetStatus::Uploaded.as_str())
            .bind(input.created_by)
            .fetch_one(pool)
            .await
    }

    /// Find an asset by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<MediaAsset>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM media_assets WHERE id = $1");
        sqlx::query_as::<_, MediaAsset>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Write a review decision and stamp `reviewed_at`.
    ///
    /// Returns `None` if the asset does not exist. Re-reviewing an asset
    /// simply overwrites the previous decision.
    pub async fn review(
        pool: &PgPool,
        id: DbId,
        review: &AssetReview,
    ) -> Result<Option<MediaAsset>, sqlx::Error> {
        let query = format!(
            "UPDATE media_assets \
             SET status = $2, reviewed_by = $3, reviewed_at = NOW(), review_note = $4 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MediaAsset>(&query)
            .bind(id)
            .bind(review.status.as_str())
            .bind(review.reviewed_by)
            .bind(review.note.as_deref())
            .fetch_optional(pool)
            .await
    }

    /// List assets matching the filter, newest first.
    pub async fn list(pool: &PgPool, filter: &AssetFilter) -> Result<Vec<MediaAsset>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM media_assets \
             WHERE ($1::TEXT IS NULL OR status = $1) \
               AND ($2::UUID IS NULL OR owner_donation_id = $2) \
             ORDER BY created_at DESC \
             LIMIT $3"
        );
        sqlx::query_as::<_, MediaAsset>(&query)
            .bind(filter.status.map(AssetStatus::as_str))
            .bind(filter.owner_donation_id)
            .bind(filter.limit)
            .fetch_all(pool)
            .await
    }

    /// Return the ids from `ids` that have no matching asset row.
    pub async fn find_missing_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<DbId>, sqlx::Error> {
        let found: Vec<DbId> =
            sqlx::query_scalar("SELECT id FROM media_assets WHERE id = ANY($1)")
                .bind(ids)
                .fetch_all(pool)
                .await?;
        let found: HashSet<DbId> = found.into_iter().collect();
        let mut seen = HashSet::new();
        Ok(ids
            .iter()
            .filter(|id| !found.contains(id) && seen.insert(**id))
            .copied()
            .collect())
    }
}
