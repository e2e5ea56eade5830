pub mod health;
pub mod media;
pub mod packages;
pub mod streams;
pub mod user;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /media                               list assets (operator)
/// /media/upload-url                    presigned upload URL (operator)
/// /media/commit                        commit an upload (operator)
/// /media/{asset_id}                    asset detail (operator)
/// /media/{asset_id}/review             approve / reject (operator)
///
/// /media-packages                      create (operator)
/// /media-packages/{id}                 get, update status/details (operator)
/// /media-packages/{id}/items           add items (operator)
///
/// /streams/{id}/start                  start a stream (operator)
///
/// /user/media-packages/{id}            published package for its donor
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/media", media::router())
        .nest("/media-packages", packages::router())
        .nest("/streams", streams::router())
        .nest("/user", user::router())
}
