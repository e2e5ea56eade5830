use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kurban_api::config::ServerConfig;
use kurban_api::router::build_app_router;
use kurban_api::state::AppState;
use kurban_cloud::{S3Storage, StorageConfig};
use kurban_db::PgMediaStore;
use kurban_events::{
    DeliveryNotifier, ExpoPushSender, NotificationQueue, NotificationWorker, PushConfig,
};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kurban_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = kurban_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    kurban_db::health_check(&pool)
        .await
        .expect("Database health check failed");

    kurban_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    let store = Arc::new(PgMediaStore::new(pool));

    // --- Object storage ---
    let storage_config = StorageConfig::from_env();
    let storage = Arc::new(S3Storage::new(&storage_config).await);

    // --- Notifications ---
    let push_config = PushConfig::from_env();
    let sender = Arc::new(ExpoPushSender::new(&push_config).expect("Failed to build push client"));
    let notifier = Arc::new(DeliveryNotifier::new(store.clone(), sender));
    let (queue, receiver) = NotificationQueue::new();
    let worker_handle = tokio::spawn(NotificationWorker::run(notifier, receiver));
    tracing::info!(endpoint = %push_config.endpoint, "Notification worker started");

    // --- App state ---
    let state = AppState::new(config.clone(), store, storage, queue);
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    // The router (and with it every queue handle) is gone once serve returns,
    // so the worker drains what is left and exits.
    tracing::info!("Server stopped accepting connections, draining notifications");
    if tokio::time::timeout(Duration::from_secs(5), worker_handle)
        .await
        .is_err()
    {
        tracing::warn!("Notification worker did not finish in time");
    }

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
