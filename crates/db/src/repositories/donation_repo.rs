//! Read access to the `donations` table.

use kurban_core::types::DbId;
use sqlx::PgPool;

/// Provides lookups on donations.
pub struct DonationRepo;

impl DonationRepo {
    /// Check whether a donation exists.
    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM donations WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Resolve the user who made a donation.
    pub async fn owner_id(pool: &PgPool, id: DbId) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar("SELECT user_id FROM donations WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
