//! Collaborator fakes shared by the component unit tests.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use kurban_cloud::{ObjectStorage, StorageError};
use kurban_db::MemoryStore;
use kurban_events::{NotificationJob, NotificationQueue};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::Mutex;

/// Object storage that records every presign call.
#[derive(Default)]
pub struct RecordingStorage {
    pub puts: Mutex<Vec<(String, String, Duration)>>,
    pub gets: Mutex<Vec<String>>,
    pub fail: bool,
}

impl RecordingStorage {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }
}

#[async_trait]
impl ObjectStorage for RecordingStorage {
    async fn presign_put(
        &self,
        key: &str,
        content_type: &str,
        expires_in: Duration,
    ) -> Result<String, StorageError> {
        self.puts
            .lock()
            .await
            .push((key.to_string(), content_type.to_string(), expires_in));
        if self.fail {
            return Err(StorageError::Presign("bucket unreachable".to_string()));
        }
        Ok(format!("https://storage.test/{key}?signature=put"))
    }

    async fn presign_get(
        &self,
        key: &str,
        _content_type: Option<&str>,
        _expires_in: Duration,
    ) -> Result<String, StorageError> {
        self.gets.lock().await.push(key.to_string());
        if self.fail {
            return Err(StorageError::Presign("bucket unreachable".to_string()));
        }
        Ok(format!("https://storage.test/{key}?signature=get"))
    }

    fn default_expiry(&self) -> Duration {
        Duration::from_secs(900)
    }
}

/// Store, storage and notification queue wired together for a test.
pub struct Harness {
    pub store: Arc<MemoryStore>,
    pub storage: Arc<RecordingStorage>,
    pub queue: NotificationQueue,
    pub jobs: UnboundedReceiver<NotificationJob>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_storage(RecordingStorage::default())
    }

    pub fn with_storage(storage: RecordingStorage) -> Self {
        let (queue, jobs) = NotificationQueue::new();
        Self {
            store: Arc::new(MemoryStore::new()),
            storage: Arc::new(storage),
            queue,
            jobs,
        }
    }

    /// All jobs enqueued so far.
    pub fn drain_jobs(&mut self) -> Vec<NotificationJob> {
        let mut jobs = Vec::new();
        while let Ok(job) = self.jobs.try_recv() {
            jobs.push(job);
        }
        jobs
    }
}
