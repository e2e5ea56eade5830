//! Repository for the `media_packages` and `media_package_items` tables.

use kurban_core::package::PackageStatus;
use kurban_core::types::DbId;
use sqlx::PgPool;

use crate::models::media_package::{
    MediaPackage, NewMediaPackage, PackageDetailsUpdate, PackageItem, PackageStatusChange,
};

/// Column list for media_packages queries.
const COLUMNS: &str = "id, donation_id, title, note, status, created_by, \
    created_at, updated_at, published_at";

/// Conditional status write: publishing stamps `published_at`, returning
/// to draft clears it, and a row already in `$2` is left alone.
fn status_update_query(status: PackageStatus) -> String {
    let published_at = match status {
        PackageStatus::Published => "NOW()",
        PackageStatus::Draft => "NULL",
    };
    format!(
        "UPDATE media_packages \
         SET status = $2, published_at = {published_at}, updated_at = NOW() \
         WHERE id = $1 AND status <> $2 \
         RETURNING {COLUMNS}"
    )
}

/// Provides CRUD operations for media packages and their items.
pub struct MediaPackageRepo;

impl MediaPackageRepo {
    /// Insert a new package in `draft`, returning the created row.
    pub async fn create(pool: &PgPool, input: &NewMediaPackage) -> Result<MediaPackage, sqlx::Error> {
        let query = format!(
            "INSERT INTO media_packages (donation_id, title, note, status, created_by) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MediaPackage>(&query)
            .bind(input.donation_id)
            .bind(&input.title)
            .bind(input.note.as_deref())
            .bind(PackageStatus::Draft.as_str())
            .bind(input.created_by)
            .fetch_one(pool)
            .await
    }

    /// Find a package by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<MediaPackage>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM media_packages WHERE id = $1");
        sqlx::query_as::<_, MediaPackage>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Update title and/or note of a draft package, then optionally move it
    /// to `status`, in one transaction.
    ///
    /// Returns `None` if the package does not exist or is not a draft; in
    /// that case nothing is written.
    pub async fn update_details(
        pool: &PgPool,
        id: DbId,
        input: &PackageDetailsUpdate,
        status: Option<PackageStatus>,
    ) -> Result<Option<PackageStatusChange>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE media_packages SET \
                title = COALESCE($2, title), \
                note = COALESCE($3, note), \
                updated_at = NOW() \
             WHERE id = $1 AND status = $4 \
             RETURNING {COLUMNS}"
        );
        let edited = sqlx::query_as::<_, MediaPackage>(&query)
            .bind(id)
            .bind(input.title.as_deref())
            .bind(input.note.as_deref())
            .bind(PackageStatus::Draft.as_str())
            .fetch_optional(&mut *tx)
            .await?;
        let Some(package) = edited else {
            return Ok(None);
        };

        let change = match status {
            Some(status) if package.status != status.as_str() => {
                let package = sqlx::query_as::<_, MediaPackage>(&status_update_query(status))
                    .bind(id)
                    .bind(status.as_str())
                    .fetch_one(&mut *tx)
                    .await?;
                PackageStatusChange {
                    package,
                    changed: true,
                }
            }
            _ => PackageStatusChange {
                package,
                changed: false,
            },
        };

        tx.commit().await?;
        Ok(Some(change))
    }

    /// Move a package to `status`.
    ///
    /// Publishing stamps `published_at`; returning to draft clears it. A
    /// write that would not change the status leaves the row untouched and
    /// reports `changed = false`. Returns `None` if the package does not exist.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status: PackageStatus,
    ) -> Result<Option<PackageStatusChange>, sqlx::Error> {
        let updated = sqlx::query_as::<_, MediaPackage>(&status_update_query(status))
            .bind(id)
            .bind(status.as_str())
            .fetch_optional(pool)
            .await?;

        if let Some(package) = updated {
            return Ok(Some(PackageStatusChange {
                package,
                changed: true,
            }));
        }

        Ok(Self::find_by_id(pool, id)
            .await?
            .map(|package| PackageStatusChange {
                package,
                changed: false,
            }))
    }

    /// Upsert a batch of items within a single transaction.
    ///
    /// Existing `(package_id, media_asset_id)` pairs have their position
    /// overwritten. Any failure rolls back the whole batch.
    pub async fn upsert_items(
        pool: &PgPool,
        package_id: DbId,
        items: &[(DbId, i32)],
    ) -> Result<u64, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let mut affected = 0;

        for (media_asset_id, position) in items {
            let result = sqlx::query(
                "INSERT INTO media_package_items (package_id, media_asset_id, position) \
                 VALUES ($1, $2, $3) \
                 ON CONFLICT (package_id, media_asset_id) \
                 DO UPDATE SET position = EXCLUDED.position",
            )
            .bind(package_id)
            .bind(media_asset_id)
            .bind(position)
            .execute(&mut *tx)
            .await?;
            affected += result.rows_affected();
        }

        tx.commit().await?;
        Ok(affected)
    }

    /// List a package's items joined with their assets, in donor order.
    pub async fn list_items(pool: &PgPool, package_id: DbId) -> Result<Vec<PackageItem>, sqlx::Error> {
        sqlx::query_as::<_, PackageItem>(
            "SELECT i.media_asset_id, i.position, a.storage_key, a.mime_type, \
                    a.status AS asset_status, a.width, a.height, a.duration_seconds \
             FROM media_package_items i \
             JOIN media_assets a ON a.id = i.media_asset_id \
             WHERE i.package_id = $1 \
             ORDER BY i.position ASC, i.seq ASC",
        )
        .bind(package_id)
        .fetch_all(pool)
        .await
    }
}
