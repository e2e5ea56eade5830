//! Push notification delivery through the Expo push service.
//!
//! [`ExpoPushSender`] posts one JSON message per address in a single batch
//! request and maps the per-message tickets the service returns. Each call
//! is a single attempt bounded by the configured timeout.

use std::time::Duration;

use async_trait::async_trait;
use kurban_core::notification::PushMessage;
use serde::{Deserialize, Serialize};

/// Default Expo push endpoint.
pub const DEFAULT_EXPO_PUSH_URL: &str = "https://exp.host/--/api/v2/push/send";

/// Default timeout for a single batch request, in seconds.
const DEFAULT_PUSH_TIMEOUT_SECS: u64 = 10;

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for a failed batch call as a whole.
#[derive(Debug, thiserror::Error)]
pub enum PushError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The push service returned a non-2xx status code.
    #[error("Push service returned HTTP {0}")]
    HttpStatus(u16),

    /// The push service answered with a body we could not interpret.
    #[error("Unexpected push service response: {0}")]
    InvalidResponse(String),
}

// ---------------------------------------------------------------------------
// Collaborator contract
// ---------------------------------------------------------------------------

/// Delivery result for one address in a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushTicket {
    pub address: String,
    /// `None` when the service accepted the message.
    pub error: Option<String>,
}

impl PushTicket {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Sends one message to many push addresses in a single call.
#[async_trait]
pub trait PushSender: Send + Sync {
    async fn send_batch(
        &self,
        addresses: &[String],
        message: &PushMessage,
    ) -> Result<Vec<PushTicket>, PushError>;
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Push client configuration.
#[derive(Debug, Clone)]
pub struct PushConfig {
    pub endpoint: String,
    pub timeout: Duration,
}

impl PushConfig {
    /// Load push configuration from environment variables.
    ///
    /// | Env Var             | Default                                |
    /// |---------------------|----------------------------------------|
    /// | `EXPO_PUSH_URL`     | `https://exp.host/--/api/v2/push/send` |
    /// | `PUSH_TIMEOUT_SECS` | `10`                                   |
    pub fn from_env() -> Self {
        let endpoint =
            std::env::var("EXPO_PUSH_URL").unwrap_or_else(|_| DEFAULT_EXPO_PUSH_URL.into());

        let timeout_secs: u64 = std::env::var("PUSH_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_PUSH_TIMEOUT_SECS.to_string())
            .parse()
            .expect("PUSH_TIMEOUT_SECS must be a valid u64");

        Self {
            endpoint,
            timeout: Duration::from_secs(timeout_secs),
        }
    }
}

impl Default for PushConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_EXPO_PUSH_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_PUSH_TIMEOUT_SECS),
        }
    }
}

// ---------------------------------------------------------------------------
// Expo wire format
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExpoMessage<'a> {
    to: &'a str,
    title: &'a str,
    body: &'a str,
    data: &'a serde_json::Value,
    sound: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    badge: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ExpoResponse {
    data: Vec<ExpoTicket>,
}

#[derive(Debug, Deserialize)]
struct ExpoTicket {
    status: String,
    #[serde(default)]
    message: Option<String>,
}

fn build_payload<'a>(addresses: &'a [String], message: &'a PushMessage) -> Vec<ExpoMessage<'a>> {
    addresses
        .iter()
        .map(|to| ExpoMessage {
            to,
            title: &message.title,
            body: &message.body,
            data: &message.data,
            sound: message.sound,
            badge: message.badge,
        })
        .collect()
}

/// Pair each address with the ticket at the same index.
fn map_tickets(addresses: &[String], body: ExpoResponse) -> Result<Vec<PushTicket>, PushError> {
    if body.data.len() != addresses.len() {
        return Err(PushError::InvalidResponse(format!(
            "expected {} tickets, got {}",
            addresses.len(),
            body.data.len()
        )));
    }

    Ok(addresses
        .iter()
        .zip(body.data)
        .map(|(address, ticket)| PushTicket {
            address: address.clone(),
            error: match ticket.status.as_str() {
                "ok" => None,
                _ => Some(ticket.message.unwrap_or(ticket.status)),
            },
        })
        .collect())
}

// ---------------------------------------------------------------------------
// ExpoPushSender
// ---------------------------------------------------------------------------

/// [`PushSender`] backed by the Expo push HTTP API.
pub struct ExpoPushSender {
    client: reqwest::Client,
    endpoint: String,
}

impl ExpoPushSender {
    /// Create a sender with a pre-configured HTTP client.
    pub fn new(config: &PushConfig) -> Result<Self, PushError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }
}

#[async_trait]
impl PushSender for ExpoPushSender {
    async fn send_batch(
        &self,
        addresses: &[String],
        message: &PushMessage,
    ) -> Result<Vec<PushTicket>, PushError> {
        if addresses.is_empty() {
            return Ok(Vec::new());
        }

        let response = self
            .client
            .post(&self.endpoint)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&build_payload(addresses, message))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(PushError::HttpStatus(response.status().as_u16()));
        }

        let body: ExpoResponse = response
            .json()
            .await
            .map_err(|e| PushError::InvalidResponse(e.to_string()))?;
        map_tickets(addresses, body)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
