//! Fire-and-forget handoff from state transitions to the notifier.
//!
//! Publishing a package or starting a stream only enqueues a
//! [`NotificationJob`]; a [`NotificationWorker`] running as a background task
//! performs the send. Every job is attempted once. Failures are logged and
//! never reach the caller of the triggering transition.

use std::sync::Arc;

use kurban_core::types::DbId;
use tokio::sync::mpsc;

use crate::notifier::{DeliveryNotifier, NotifyOutcome};

/// A notification to send after a committed state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationJob {
    PackagePublished { package_id: DbId },
    StreamStarted { stream_id: DbId },
}

/// Non-blocking producer side of the notification channel.
#[derive(Clone)]
pub struct NotificationQueue {
    sender: mpsc::UnboundedSender<NotificationJob>,
}

impl NotificationQueue {
    /// Create a queue and the receiver its worker drains.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<NotificationJob>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }

    /// Hand a job to the worker without waiting.
    pub fn enqueue(&self, job: NotificationJob) {
        if self.sender.send(job).is_err() {
            tracing::warn!(?job, "Notification worker has stopped, dropping job");
        }
    }
}

/// Background service that drains the notification queue.
pub struct NotificationWorker;

impl NotificationWorker {
    /// Run the worker loop until every [`NotificationQueue`] is dropped.
    pub async fn run(
        notifier: Arc<DeliveryNotifier>,
        mut receiver: mpsc::UnboundedReceiver<NotificationJob>,
    ) {
        while let Some(job) = receiver.recv().await {
            Self::handle(&notifier, job).await;
        }
        tracing::info!("Notification queue closed, worker shutting down");
    }

    /// Attempt a single job, logging the outcome.
    pub async fn handle(notifier: &DeliveryNotifier, job: NotificationJob) {
        let result = match job {
            NotificationJob::PackagePublished { package_id } => {
                notifier.notify_package_published(package_id).await
            }
            NotificationJob::StreamStarted { stream_id } => {
                notifier.notify_stream_started(stream_id).await
            }
        };

        match result {
            Ok(NotifyOutcome::NoRecipients) => {
                tracing::debug!(?job, "Notification skipped, no recipients");
            }
            Ok(NotifyOutcome::Sent { delivered, failed }) => {
                tracing::debug!(?job, delivered, failed, "Notification handled");
            }
            Err(e) => {
                tracing::error!(?job, error = %e, "Notification failed");
            }
        }
    }
}
