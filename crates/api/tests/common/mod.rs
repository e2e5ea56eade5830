//! Shared harness for the HTTP integration tests.
//!
//! The router is built exactly as in production, but over an in-memory
//! store, a storage fake that signs nothing, and a push fake that records
//! every batch. Notifications are not run in the background: tests call
//! [`TestApp::flush_notifications`] to process what the handlers enqueued.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use kurban_api::auth::jwt::{generate_access_token, JwtConfig};
use kurban_api::config::ServerConfig;
use kurban_api::router::build_app_router;
use kurban_api::state::AppState;
use kurban_cloud::{ObjectStorage, StorageError};
use kurban_core::notification::PushMessage;
use kurban_core::types::DbId;
use kurban_db::MemoryStore;
use kurban_events::{
    DeliveryNotifier, NotificationJob, NotificationQueue, NotificationWorker, PushError,
    PushSender, PushTicket,
};
use serde_json::Value;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::Mutex;
use tower::ServiceExt;
use uuid::Uuid;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret-that-is-long-enough".to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

// ---------------------------------------------------------------------------
// Collaborator fakes
// ---------------------------------------------------------------------------

/// Object storage that hands out predictable URLs.
#[derive(Default)]
pub struct FakeStorage {
    pub fail: bool,
}

#[async_trait]
impl ObjectStorage for FakeStorage {
    async fn presign_put(
        &self,
        key: &str,
        _content_type: &str,
        _expires_in: Duration,
    ) -> Result<String, StorageError> {
        if self.fail {
            return Err(StorageError::Presign("connection refused".to_string()));
        }
        Ok(format!("https://storage.test/{key}?signature=put"))
    }

    async fn presign_get(
        &self,
        key: &str,
        _content_type: Option<&str>,
        _expires_in: Duration,
    ) -> Result<String, StorageError> {
        if self.fail {
            return Err(StorageError::Presign("connection refused".to_string()));
        }
        Ok(format!("https://storage.test/{key}?signature=get"))
    }

    fn default_expiry(&self) -> Duration {
        Duration::from_secs(900)
    }
}

/// Push sender that records every batch and accepts every address.
#[derive(Default)]
pub struct RecordingPush {
    pub batches: Mutex<Vec<(Vec<String>, PushMessage)>>,
}

#[async_trait]
impl PushSender for RecordingPush {
    async fn send_batch(
        &self,
        addresses: &[String],
        message: &PushMessage,
    ) -> Result<Vec<PushTicket>, PushError> {
        self.batches
            .lock()
            .await
            .push((addresses.to_vec(), message.clone()));
        Ok(addresses
            .iter()
            .map(|a| PushTicket {
                address: a.clone(),
                error: None,
            })
            .collect())
    }
}

// ---------------------------------------------------------------------------
// Test application
// ---------------------------------------------------------------------------

pub struct TestApp {
    pub app: Router,
    pub store: Arc<MemoryStore>,
    pub push: Arc<RecordingPush>,
    notifier: DeliveryNotifier,
    jobs: UnboundedReceiver<NotificationJob>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_storage(FakeStorage::default())
    }

    pub fn with_storage(storage: FakeStorage) -> Self {
        let config = test_config();
        let store = Arc::new(MemoryStore::new());
        let push = Arc::new(RecordingPush::default());
        let (queue, jobs) = NotificationQueue::new();

        let state = AppState::new(config.clone(), store.clone(), Arc::new(storage), queue);
        let app = build_app_router(state, &config);

        Self {
            app,
            notifier: DeliveryNotifier::new(store.clone(), push.clone()),
            store,
            push,
            jobs,
        }
    }

    /// Process every notification enqueued so far, returning the jobs.
    pub async fn flush_notifications(&mut self) -> Vec<NotificationJob> {
        let mut handled = Vec::new();
        while let Ok(job) = self.jobs.try_recv() {
            NotificationWorker::handle(&self.notifier, job).await;
            handled.push(job);
        }
        handled
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Response<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        self.send(builder.body(body).unwrap()).await
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.app.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str, token: &str) -> Response<Body> {
        self.request(Method::GET, uri, Some(token), None).await
    }

    pub async fn post_json(&self, uri: &str, token: &str, body: Value) -> Response<Body> {
        self.request(Method::POST, uri, Some(token), Some(body)).await
    }

    pub async fn patch_json(&self, uri: &str, token: &str, body: Value) -> Response<Body> {
        self.request(Method::PATCH, uri, Some(token), Some(body))
            .await
    }

    /// Commit an asset through the API, returning its id.
    pub async fn commit_asset(&self, token: &str, donation_id: DbId, key: &str) -> DbId {
        let response = self
            .post_json(
                "/api/v1/media/commit",
                token,
                serde_json::json!({
                    "storageKey": key,
                    "donationId": donation_id,
                    "mimeType": "image/jpeg",
                    "width": 1920,
                    "height": 1080,
                }),
            )
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        parse_id(&body_json(response).await["assetId"])
    }

    /// Create a draft package through the API, returning its id.
    pub async fn create_package(&self, token: &str, donation_id: DbId, title: &str) -> DbId {
        let response = self
            .post_json(
                "/api/v1/media-packages",
                token,
                serde_json::json!({ "donationId": donation_id, "title": title }),
            )
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        parse_id(&body_json(response).await["packageId"])
    }
}

// ---------------------------------------------------------------------------
// Tokens and bodies
// ---------------------------------------------------------------------------

/// A fresh operator (`admin`) with a valid token.
pub fn operator_token() -> (DbId, String) {
    token_for("admin")
}

/// A fresh donor (`user`) with a valid token.
pub fn donor_token() -> (DbId, String) {
    token_for("user")
}

pub fn token_for(role: &str) -> (DbId, String) {
    let user_id = Uuid::new_v4();
    let token = generate_access_token(user_id, role, &test_config().jwt).unwrap();
    (user_id, token)
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn parse_id(value: &Value) -> DbId {
    value.as_str().unwrap().parse().unwrap()
}
