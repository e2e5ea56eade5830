//! Route definitions for the `/media` resource.

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::media;
use crate::state::AppState;

/// Routes mounted at `/media`.
///
/// ```text
/// GET    /                        -> list_assets (?status=, ?donationId=)
/// POST   /upload-url              -> create_upload_url
/// POST   /commit                  -> commit_asset
/// GET    /{asset_id}              -> get_asset
/// PATCH  /{asset_id}/review       -> review_asset
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(media::list_assets))
        .route("/upload-url", post(media::create_upload_url))
        .route("/commit", post(media::commit_asset))
        .route("/{asset_id}", get(media::get_asset))
        .route("/{asset_id}/review", patch(media::review_asset))
}
