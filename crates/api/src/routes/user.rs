use axum::routing::get;
use axum::Router;

use crate::handlers::donor;
use crate::state::AppState;

/// Donor routes mounted at `/user`.
///
/// ```text
/// GET    /media-packages/{id}    -> get_my_package
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/media-packages/{id}", get(donor::get_my_package))
}
