//! Read access to the `user_push_tokens` table.

use kurban_core::types::DbId;
use sqlx::PgPool;

/// Provides lookups on registered push addresses.
pub struct PushTokenRepo;

impl PushTokenRepo {
    /// All push tokens registered by a user, most recently refreshed first.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT expo_push_token FROM user_push_tokens \
             WHERE user_id = $1 \
             ORDER BY updated_at DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }
}
