//! Stream start trigger.

use std::sync::Arc;

use kurban_core::error::CoreError;
use kurban_core::stream::STREAM_STATUS_LIVE;
use kurban_core::types::DbId;
use kurban_db::models::recipient::Stream;
use kurban_db::MediaStore;
use kurban_events::{NotificationJob, NotificationQueue};

use crate::error::MediaResult;

/// Starts streams and notifies their owners.
#[derive(Clone)]
pub struct StreamService {
    store: Arc<dyn MediaStore>,
    notifications: NotificationQueue,
}

impl StreamService {
    pub fn new(store: Arc<dyn MediaStore>, notifications: NotificationQueue) -> Self {
        Self {
            store,
            notifications,
        }
    }

    /// Mark a stream live and enqueue the "stream started" notification.
    pub async fn start_stream(&self, stream_id: DbId) -> MediaResult<Stream> {
        let existing = self
            .store
            .find_stream(stream_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "stream",
                id: stream_id,
            })?;
        if existing.status == STREAM_STATUS_LIVE {
            return Err(CoreError::Conflict("stream is already live".to_string()).into());
        }

        // Lost a race with a concurrent start.
        let stream = self
            .store
            .mark_stream_live(stream_id)
            .await?
            .ok_or_else(|| CoreError::Conflict("stream is already live".to_string()))?;

        tracing::info!(stream_id = %stream_id, user_id = %stream.user_id, "Stream started");
        self.notifications
            .enqueue(NotificationJob::StreamStarted { stream_id });
        Ok(stream)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use uuid::Uuid;

    use crate::error::MediaError;
    use crate::test_support::Harness;

    #[tokio::test]
    async fn start_marks_live_and_notifies() {
        let mut h = Harness::new();
        let svc = StreamService::new(h.store.clone(), h.queue.clone());
        let stream_id = h.store.add_stream(Uuid::new_v4(), "Sabah Kesimi").await;

        let stream = svc.start_stream(stream_id).await.unwrap();
        assert_eq!(stream.status, "live");
        assert!(stream.started_at.is_some());
        assert_eq!(
            h.drain_jobs(),
            vec![NotificationJob::StreamStarted { stream_id }]
        );
    }

    #[tokio::test]
    async fn second_start_conflicts_without_notifying() {
        let mut h = Harness::new();
        let svc = StreamService::new(h.store.clone(), h.queue.clone());
        let stream_id = h.store.add_stream(Uuid::new_v4(), "Öğle").await;

        svc.start_stream(stream_id).await.unwrap();
        h.drain_jobs();

        let err = svc.start_stream(stream_id).await.unwrap_err();
        assert_matches!(err, MediaError::Core(CoreError::Conflict(_)));
        assert!(h.drain_jobs().is_empty());
    }

    #[tokio::test]
    async fn unknown_stream_is_not_found() {
        let h = Harness::new();
        let svc = StreamService::new(h.store.clone(), h.queue.clone());
        let err = svc.start_stream(Uuid::new_v4()).await.unwrap_err();
        assert_matches!(err, MediaError::Core(CoreError::NotFound { entity: "stream", .. }));
    }
}
