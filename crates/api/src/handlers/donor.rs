//! Donor-facing read endpoints.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use kurban_core::types::DbId;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAuth;
use crate::state::AppState;

/// GET /api/v1/user/media-packages/{id}
///
/// A published package owned by the caller, with presigned download URLs.
/// Anything else is reported as not found.
pub async fn get_my_package(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(package_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let package = state.curator.donor_view(package_id, user.user_id).await?;
    Ok(Json(package))
}
