//! Handlers for media package curation.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use kurban_core::types::DbId;
use kurban_media::dto::{
    AddItemsRequest, AddItemsResponse, CreatePackageRequest, PackageStatusResponse,
    UpdatePackageRequest,
};

use crate::error::AppResult;
use crate::middleware::rbac::RequireOperator;
use crate::state::AppState;

/// POST /api/v1/media-packages
///
/// Create an empty draft package for a donation.
pub async fn create_package(
    RequireOperator(op): RequireOperator,
    State(state): State<AppState>,
    Json(input): Json<CreatePackageRequest>,
) -> AppResult<impl IntoResponse> {
    let package = state.curator.create_package(input, Some(op.user_id)).await?;
    Ok((
        StatusCode::CREATED,
        Json(PackageStatusResponse {
            package_id: package.id,
            status: package.status,
        }),
    ))
}

/// GET /api/v1/media-packages/{id}
///
/// The package with its items in donor order.
pub async fn get_package(
    RequireOperator(_op): RequireOperator,
    State(state): State<AppState>,
    Path(package_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let detail = state.curator.get(package_id).await?;
    Ok(Json(detail))
}

/// POST /api/v1/media-packages/{id}/items
///
/// Attach assets to a package in one all-or-nothing batch.
pub async fn add_items(
    RequireOperator(op): RequireOperator,
    State(state): State<AppState>,
    Path(package_id): Path<DbId>,
    Json(input): Json<AddItemsRequest>,
) -> AppResult<impl IntoResponse> {
    let items_count = state.curator.add_items(package_id, input).await?;
    tracing::debug!(user_id = %op.user_id, package_id = %package_id, items_count, "Items added");
    Ok(Json(AddItemsResponse {
        package_id,
        items_count,
    }))
}

/// PATCH /api/v1/media-packages/{id}
///
/// Edit draft details and/or change status. Publishing notifies the donor
/// in the background.
pub async fn update_package(
    RequireOperator(op): RequireOperator,
    State(state): State<AppState>,
    Path(package_id): Path<DbId>,
    Json(input): Json<UpdatePackageRequest>,
) -> AppResult<impl IntoResponse> {
    let package = state.curator.update(package_id, input).await?;
    tracing::info!(
        user_id = %op.user_id,
        package_id = %package_id,
        status = %package.status,
        "Package updated"
    );
    Ok(Json(PackageStatusResponse {
        package_id: package.id,
        status: package.status,
    }))
}
