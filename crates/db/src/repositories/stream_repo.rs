//! Repository for the `streams` table.

use kurban_core::stream::STREAM_STATUS_LIVE;
use kurban_core::types::DbId;
use sqlx::PgPool;

use crate::models::recipient::Stream;

/// Column list for streams queries.
const COLUMNS: &str = "id, user_id, title, status, started_at";

/// Provides stream lookups and the start transition.
pub struct StreamRepo;

impl StreamRepo {
    /// Find a stream by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Stream>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM streams WHERE id = $1");
        sqlx::query_as::<_, Stream>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Move a stream to `live`, stamping `started_at`.
    ///
    /// Returns `None` if the stream does not exist or is already live.
    pub async fn mark_live(pool: &PgPool, id: DbId) -> Result<Option<Stream>, sqlx::Error> {
        let query = format!(
            "UPDATE streams \
             SET status = $2, started_at = NOW(), updated_at = NOW() \
             WHERE id = $1 AND status <> $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Stream>(&query)
            .bind(id)
            .bind(STREAM_STATUS_LIVE)
            .fetch_optional(pool)
            .await
    }
}
