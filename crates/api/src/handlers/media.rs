//! Handlers for uploads and asset moderation.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use kurban_core::types::DbId;
use kurban_media::dto::{
    AssetListQuery, AssetStatusResponse, CommitAssetRequest, ItemsResponse, ReviewRequest,
    UploadUrlRequest,
};

use crate::error::AppResult;
use crate::middleware::rbac::RequireOperator;
use crate::state::AppState;

/// POST /api/v1/media/upload-url
///
/// Issue a presigned upload URL and the storage key to commit afterwards.
pub async fn create_upload_url(
    RequireOperator(op): RequireOperator,
    State(state): State<AppState>,
    Json(input): Json<UploadUrlRequest>,
) -> AppResult<impl IntoResponse> {
    let ticket = state.uploads.create_upload_url(input).await?;
    tracing::debug!(user_id = %op.user_id, storage_key = %ticket.storage_key, "Upload URL returned");
    Ok(Json(ticket))
}

/// POST /api/v1/media/commit
///
/// Record a completed upload. The new asset always starts in `uploaded`.
pub async fn commit_asset(
    RequireOperator(op): RequireOperator,
    State(state): State<AppState>,
    Json(input): Json<CommitAssetRequest>,
) -> AppResult<impl IntoResponse> {
    let asset = state.assets.commit(input, Some(op.user_id)).await?;
    Ok((
        StatusCode::CREATED,
        Json(AssetStatusResponse {
            asset_id: asset.id,
            status: asset.status,
        }),
    ))
}

/// GET /api/v1/media?status=&donationId=
pub async fn list_assets(
    RequireOperator(_op): RequireOperator,
    State(state): State<AppState>,
    Query(query): Query<AssetListQuery>,
) -> AppResult<impl IntoResponse> {
    let items = state.assets.list(&query).await?;
    Ok(Json(ItemsResponse { items }))
}

/// GET /api/v1/media/{asset_id}
pub async fn get_asset(
    RequireOperator(_op): RequireOperator,
    State(state): State<AppState>,
    Path(asset_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let asset = state.assets.get(asset_id).await?;
    Ok(Json(asset))
}

/// PATCH /api/v1/media/{asset_id}/review
///
/// Approve or reject an asset. The reviewing operator is recorded.
pub async fn review_asset(
    RequireOperator(op): RequireOperator,
    State(state): State<AppState>,
    Path(asset_id): Path<DbId>,
    Json(input): Json<ReviewRequest>,
) -> AppResult<impl IntoResponse> {
    let asset = state.assets.review(asset_id, input, Some(op.user_id)).await?;
    Ok(Json(AssetStatusResponse {
        asset_id: asset.id,
        status: asset.status,
    }))
}
