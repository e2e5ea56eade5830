//! Route definitions for the `/media-packages` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::packages;
use crate::state::AppState;

/// Routes mounted at `/media-packages`.
///
/// ```text
/// POST   /                  -> create_package
/// GET    /{id}              -> get_package
/// PATCH  /{id}              -> update_package (status, title, note)
/// POST   /{id}/items        -> add_items
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(packages::create_package))
        .route(
            "/{id}",
            get(packages::get_package).patch(packages::update_package),
        )
        .route("/{id}/items", post(packages::add_items))
}
