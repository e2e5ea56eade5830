//! The data-access seam shared by every media component.
//!
//! Components receive an `Arc<dyn MediaStore>` built once at startup.
//! [`PgMediaStore`] backs it with Postgres; [`crate::MemoryStore`] backs it
//! with process memory for tests.

use async_trait::async_trait;
use kurban_core::package::PackageStatus;
use kurban_core::types::DbId;

use crate::models::media_asset::{AssetFilter, AssetReview, MediaAsset, NewMediaAsset};
use crate::models::media_package::{
    MediaPackage, NewMediaPackage, PackageDetailsUpdate, PackageItem, PackageStatusChange,
};
use crate::models::recipient::Stream;
use crate::repositories::{
    DonationRepo, MediaAssetRepo, MediaPackageRepo, PushTokenRepo, StreamRepo,
};
use crate::DbPool;

/// Durable storage for assets, packages and notification recipients.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Verify the backing store is reachable.
    async fn ping(&self) -> Result<(), sqlx::Error>;

    // --- Assets ---

    async fn insert_asset(&self, input: &NewMediaAsset) -> Result<MediaAsset, sqlx::Error>;

    async fn find_asset(&self, id: DbId) -> Result<Option<MediaAsset>, sqlx::Error>;

    /// Apply a review decision. `None` if the asset does not exist.
    async fn review_asset(
        &self,
        id: DbId,
        review: &AssetReview,
    ) -> Result<Option<MediaAsset>, sqlx::Error>;

    async fn list_assets(&self, filter: &AssetFilter) -> Result<Vec<MediaAsset>, sqlx::Error>;

    /// Ids from `ids` that do not refer to an existing asset, deduplicated.
    async fn missing_asset_ids(&self, ids: &[DbId]) -> Result<Vec<DbId>, sqlx::Error>;

    // --- Packages ---

    async fn insert_package(&self, input: &NewMediaPackage) -> Result<MediaPackage, sqlx::Error>;

    async fn find_package(&self, id: DbId) -> Result<Option<MediaPackage>, sqlx::Error>;

    /// Edit a draft package and apply an optional status change with it,
    /// atomically. `None` if missing or no longer a draft.
    async fn update_package_details(
        &self,
        id: DbId,
        input: &PackageDetailsUpdate,
        status: Option<PackageStatus>,
    ) -> Result<Option<PackageStatusChange>, sqlx::Error>;

    /// Move a package to `status`. `None` if the package does not exist.
    async fn set_package_status(
        &self,
        id: DbId,
        status: PackageStatus,
    ) -> Result<Option<PackageStatusChange>, sqlx::Error>;

    /// Upsert all items atomically: either every pair is applied or none.
    async fn upsert_package_items(
        &self,
        package_id: DbId,
        items: &[(DbId, i32)],
    ) -> Result<u64, sqlx::Error>;

    /// Items ordered by position, ties broken by insertion order.
    async fn list_package_items(&self, package_id: DbId) -> Result<Vec<PackageItem>, sqlx::Error>;

    // --- Recipients ---

    async fn donation_exists(&self, id: DbId) -> Result<bool, sqlx::Error>;

    /// The user who made a donation, if the donation exists.
    async fn donation_owner(&self, id: DbId) -> Result<Option<DbId>, sqlx::Error>;

    async fn find_stream(&self, id: DbId) -> Result<Option<Stream>, sqlx::Error>;

    /// Mark a stream live. `None` if missing or already live.
    async fn mark_stream_live(&self, id: DbId) -> Result<Option<Stream>, sqlx::Error>;

    /// Push addresses registered by a user, most recent first.
    async fn push_tokens_for_user(&self, user_id: DbId) -> Result<Vec<String>, sqlx::Error>;
}

/// [`MediaStore`] backed by a Postgres connection pool.
#[derive(Clone)]
pub struct PgMediaStore {
    pool: DbPool,
}

impl PgMediaStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MediaStore for PgMediaStore {
    async fn ping(&self) -> Result<(), sqlx::Error> {
        crate::health_check(&self.pool).await
    }

    async fn insert_asset(&self, input: &NewMediaAsset) -> Result<MediaAsset, sqlx::Error> {
        MediaAssetRepo::create(&self.pool, input).await
    }

    async fn find_asset(&self, id: DbId) -> Result<Option<MediaAsset>, sqlx::Error> {
        MediaAssetRepo::find_by_id(&self.pool, id).await
    }

    async fn review_asset(
        &self,
        id: DbId,
        review: &AssetReview,
    ) -> Result<Option<MediaAsset>, sqlx::Error> {
        MediaAssetRepo::review(&self.pool, id, review).await
    }

    async fn list_assets(&self, filter: &AssetFilter) -> Result<Vec<MediaAsset>, sqlx::Error> {
        MediaAssetRepo::list(&self.pool, filter).await
    }

    async fn missing_asset_ids(&self, ids: &[DbId]) -> Result<Vec<DbId>, sqlx::Error> {
        MediaAssetRepo::find_missing_ids(&self.pool, ids).await
    }

    async fn insert_package(&self, input: &NewMediaPackage) -> Result<MediaPackage, sqlx::Error> {
        MediaPackageRepo::create(&self.pool, input).await
    }

    async fn find_package(&self, id: DbId) -> Result<Option<MediaPackage>, sqlx::Error> {
        MediaPackageRepo::find_by_id(&self.pool, id).await
    }

    async fn update_package_details(
        &self,
        id: DbId,
        input: &PackageDetailsUpdate,
        status: Option<PackageStatus>,
    ) -> Result<Option<PackageStatusChange>, sqlx::Error> {
        MediaPackageRepo::update_details(&self.pool, id, input, status).await
    }

    async fn set_package_status(
        &self,
        id: DbId,
        status: PackageStatus,
    ) -> Result<Option<PackageStatusChange>, sqlx::Error> {
        MediaPackageRepo::set_status(&self.pool, id, status).await
    }

    async fn upsert_package_items(
        &self,
        package_id: DbId,
        items: &[(DbId, i32)],
    ) -> Result<u64, sqlx::Error> {
        MediaPackageRepo::upsert_items(&self.pool, package_id, items).await
    }

    async fn list_package_items(&self, package_id: DbId) -> Result<Vec<PackageItem>, sqlx::Error> {
        MediaPackageRepo::list_items(&self.pool, package_id).await
    }

    async fn donation_exists(&self, id: DbId) -> Result<bool, sqlx::Error> {
        DonationRepo::exists(&self.pool, id).await
    }

    async fn donation_owner(&self, id: DbId) -> Result<Option<DbId>, sqlx::Error> {
        DonationRepo::owner_id(&self.pool, id).await
    }

    async fn find_stream(&self, id: DbId) -> Result<Option<Stream>, sqlx::Error> {
        StreamRepo::find_by_id(&self.pool, id).await
    }

    async fn mark_stream_live(&self, id: DbId) -> Result<Option<Stream>, sqlx::Error> {
        StreamRepo::mark_live(&self.pool, id).await
    }

    async fn push_tokens_for_user(&self, user_id: DbId) -> Result<Vec<String>, sqlx::Error> {
        PushTokenRepo::list_for_user(&self.pool, user_id).await
    }
}
