//! HTTP tests for the stream start trigger.

mod common;

use axum::http::{Method, StatusCode};
use common::{body_json, operator_token, TestApp};
use kurban_core::notification::stream_started_message;
use kurban_events::NotificationJob;
use uuid::Uuid;

#[tokio::test]
async fn start_marks_live_and_notifies_owner() {
    let mut app = TestApp::new();
    let (_, token) = operator_token();
    let owner = Uuid::new_v4();
    app.store.add_push_token(owner, "ExponentPushToken[old]").await;
    app.store.add_push_token(owner, "ExponentPushToken[new]").await;
    let stream_id = app.store.add_stream(owner, "Sabah Kesimi").await;

    let response = app
        .request(
            Method::POST,
            &format!("/api/v1/streams/{stream_id}/start"),
            Some(&token),
            None,
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "live");
    assert!(json["startedAt"].is_string());

    assert_eq!(
        app.flush_notifications().await,
        vec![NotificationJob::StreamStarted { stream_id }]
    );
    let batches = app.push.batches.lock().await;
    assert_eq!(batches.len(), 1);
    assert_eq!(
        batches[0].0,
        vec![
            "ExponentPushToken[new]".to_string(),
            "ExponentPushToken[old]".to_string()
        ]
    );
    assert_eq!(batches[0].1, stream_started_message(stream_id, "Sabah Kesimi"));
}

#[tokio::test]
async fn starting_a_live_stream_conflicts() {
    let mut app = TestApp::new();
    let (_, token) = operator_token();
    let stream_id = app.store.add_stream(Uuid::new_v4(), "Öğle").await;
    let uri = format!("/api/v1/streams/{stream_id}/start");

    app.request(Method::POST, &uri, Some(&token), None).await;
    app.flush_notifications().await;

    let response = app.request(Method::POST, &uri, Some(&token), None).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert!(app.flush_notifications().await.is_empty());
}

#[tokio::test]
async fn unknown_stream_is_404() {
    let app = TestApp::new();
    let (_, token) = operator_token();

    let response = app
        .request(
            Method::POST,
            &format!("/api/v1/streams/{}/start", Uuid::new_v4()),
            Some(&token),
            None,
        )
        .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
