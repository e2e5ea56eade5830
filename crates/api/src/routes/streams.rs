use axum::routing::post;
use axum::Router;

use crate::handlers::streams;
use crate::state::AppState;

/// Routes mounted at `/streams`.
///
/// ```text
/// POST   /{id}/start        -> start_stream
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}/start", post(streams::start_stream))
}
