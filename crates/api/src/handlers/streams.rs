use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use kurban_core::types::DbId;

use crate::error::AppResult;
use crate::middleware::rbac::RequireOperator;
use crate::state::AppState;

/// POST /api/v1/streams/{id}/start
///
/// Mark the stream live and notify its owner.
pub async fn start_stream(
    RequireOperator(op): RequireOperator,
    State(state): State<AppState>,
    Path(stream_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let stream = state.streams.start_stream(stream_id).await?;
    tracing::info!(user_id = %op.user_id, stream_id = %stream_id, "Stream start requested");
    Ok(Json(stream))
}
