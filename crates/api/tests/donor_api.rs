//! HTTP tests for the donor's view of a published package.

mod common;

use axum::http::StatusCode;
use common::{body_json, donor_token, operator_token, FakeStorage, TestApp};
use kurban_core::types::DbId;
use serde_json::json;

/// A published package with one image and one video, owned by `donor_id`.
async fn published_package(app: &TestApp, operator: &str, donor_id: DbId) -> DbId {
    let donation_id = app.store.add_donation(donor_id).await;
    let package_id = app.create_package(operator, donation_id, "Bayram").await;
    let image = app.commit_asset(operator, donation_id, "media/p.jpg").await;
    let video = body_json(
        app.post_json(
            "/api/v1/media/commit",
            operator,
            json!({ "storageKey": "media/v.mp4", "donationId": donation_id, "mimeType": "video/mp4" }),
        )
        .await,
    )
    .await["assetId"]
        .clone();

    app.post_json(
        &format!("/api/v1/media-packages/{package_id}/items"),
        operator,
        json!({ "mediaAssetIds": [video, image] }),
    )
    .await;
    app.patch_json(
        &format!("/api/v1/media-packages/{package_id}"),
        operator,
        json!({ "status": "published", "note": "Allah kabul etsin" }),
    )
    .await;
    package_id
}

#[tokio::test]
async fn owner_sees_items_with_download_urls() {
    let app = TestApp::new();
    let (_, operator) = operator_token();
    let (donor_id, donor) = donor_token();
    let package_id = published_package(&app, &operator, donor_id).await;

    let response = app
        .get(&format!("/api/v1/user/media-packages/{package_id}"), &donor)
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["title"], "Bayram");
    assert_eq!(json["note"], "Allah kabul etsin");
    assert!(json["publishedAt"].is_string());

    let items = json["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["type"], "video");
    assert_eq!(items[0]["mimeType"], "video/mp4");
    assert_eq!(items[0]["position"], 0);
    assert_eq!(items[0]["url"], "https://storage.test/media/v.mp4?signature=get");
    assert_eq!(items[1]["type"], "image");
    assert_eq!(items[1]["position"], 1);
}

#[tokio::test]
async fn other_donor_gets_404() {
    let app = TestApp::new();
    let (_, operator) = operator_token();
    let (owner_id, _) = donor_token();
    let (_, stranger) = donor_token();
    let package_id = published_package(&app, &operator, owner_id).await;

    let response = app
        .get(&format!("/api/v1/user/media-packages/{package_id}"), &stranger)
        .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unpublished_package_is_hidden_again() {
    let app = TestApp::new();
    let (_, operator) = operator_token();
    let (donor_id, donor) = donor_token();
    let package_id = published_package(&app, &operator, donor_id).await;

    app.patch_json(
        &format!("/api/v1/media-packages/{package_id}"),
        &operator,
        json!({ "status": "draft" }),
    )
    .await;

    let response = app
        .get(&format!("/api/v1/user/media-packages/{package_id}"), &donor)
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn storage_outage_is_dependency_failure() {
    let app = TestApp::with_storage(FakeStorage { fail: true });
    let (_, operator) = operator_token();
    let (donor_id, donor) = donor_token();
    let package_id = published_package(&app, &operator, donor_id).await;

    let response = app
        .get(&format!("/api/v1/user/media-packages/{package_id}"), &donor)
        .await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(body_json(response).await["code"], "DEPENDENCY_FAILURE");
}
