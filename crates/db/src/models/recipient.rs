//! Read models for the donor-side records notifications are addressed through.

use kurban_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `streams` table (columns used by this service only).
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stream {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub status: String,
    pub started_at: Option<Timestamp>,
}
