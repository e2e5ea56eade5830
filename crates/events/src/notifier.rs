//! Resolves notification recipients and sends the donor-facing messages.
//!
//! Both operations follow the same chain: source record -> owning user ->
//! that user's push addresses -> one batch call. A user with no registered
//! address is not an error.

use std::sync::Arc;

use kurban_core::notification::{package_published_message, stream_started_message, PushMessage};
use kurban_core::types::DbId;
use kurban_db::MediaStore;

use crate::push::{PushError, PushSender};

/// Why a notification could not be sent.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("{entity} {id} not found")]
    Missing { entity: &'static str, id: DbId },

    #[error("Recipient lookup failed: {0}")]
    Store(#[from] sqlx::Error),

    #[error(transparent)]
    Push(#[from] PushError),
}

/// What a notification attempt did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifyOutcome {
    /// The user has no registered push addresses.
    NoRecipients,
    /// One batch call was made.
    Sent { delivered: usize, failed: usize },
}

/// Sends fixed-template push messages to the owner of a package or stream.
pub struct DeliveryNotifier {
    store: Arc<dyn MediaStore>,
    sender: Arc<dyn PushSender>,
}

impl DeliveryNotifier {
    pub fn new(store: Arc<dyn MediaStore>, sender: Arc<dyn PushSender>) -> Self {
        Self { store, sender }
    }

    /// Tell the donor behind a package that it has been published.
    pub async fn notify_package_published(
        &self,
        package_id: DbId,
    ) -> Result<NotifyOutcome, NotifyError> {
        let package = self
            .store
            .find_package(package_id)
            .await?
            .ok_or(NotifyError::Missing {
                entity: "media package",
                id: package_id,
            })?;

        let user_id = self
            .store
            .donation_owner(package.donation_id)
            .await?
            .ok_or(NotifyError::Missing {
                entity: "donation",
                id: package.donation_id,
            })?;

        self.send_to_user(user_id, &package_published_message(package_id))
            .await
    }

    /// Tell a stream's owner that it has gone live.
    pub async fn notify_stream_started(
        &self,
        stream_id: DbId,
    ) -> Result<NotifyOutcome, NotifyError> {
        let stream = self
            .store
            .find_stream(stream_id)
            .await?
            .ok_or(NotifyError::Missing {
                entity: "stream",
                id: stream_id,
            })?;

        self.send_to_user(stream.user_id, &stream_started_message(stream_id, &stream.title))
            .await
    }

    async fn send_to_user(
        &self,
        user_id: DbId,
        message: &PushMessage,
    ) -> Result<NotifyOutcome, NotifyError> {
        let addresses = self.store.push_tokens_for_user(user_id).await?;
        if addresses.is_empty() {
            tracing::debug!(%user_id, "No push addresses registered, skipping notification");
            return Ok(NotifyOutcome::NoRecipients);
        }

        let tickets = self.sender.send_batch(&addresses, message).await?;

        let mut failed = 0;
        for ticket in tickets.iter().filter(|t| !t.is_ok()) {
            failed += 1;
            tracing::warn!(
                %user_id,
                address = %ticket.address,
                error = ticket.error.as_deref().unwrap_or_default(),
                "Push address rejected message"
            );
        }
        let delivered = tickets.len() - failed;

        tracing::info!(%user_id, delivered, failed, title = %message.title, "Push batch sent");
        Ok(NotifyOutcome::Sent { delivered, failed })
    }
}
