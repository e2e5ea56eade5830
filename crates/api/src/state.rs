use std::sync::Arc;

use kurban_cloud::ObjectStorage;
use kurban_db::MediaStore;
use kurban_events::NotificationQueue;
use kurban_media::{AssetService, PackageCurator, StreamService, UploadBroker};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (every component holds its collaborators behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Relational store, also used by the health check.
    pub store: Arc<dyn MediaStore>,
    /// Server configuration (accessed by the auth extractor).
    pub config: Arc<ServerConfig>,
    pub assets: AssetService,
    pub curator: PackageCurator,
    pub uploads: UploadBroker,
    pub streams: StreamService,
}

impl AppState {
    /// Wire every media component to the same collaborators.
    pub fn new(
        config: ServerConfig,
        store: Arc<dyn MediaStore>,
        storage: Arc<dyn ObjectStorage>,
        notifications: NotificationQueue,
    ) -> Self {
        Self {
            assets: AssetService::new(Arc::clone(&store)),
            curator: PackageCurator::new(
                Arc::clone(&store),
                Arc::clone(&storage),
                notifications.clone(),
            ),
            uploads: UploadBroker::new(storage),
            streams: StreamService::new(Arc::clone(&store), notifications),
            store,
            config: Arc::new(config),
        }
    }
}
