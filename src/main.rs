use std::net::SocketAddr;
use std::sync::Arc;

use tokio::signal;
use tracing_subscriber::EnvFilter;

use airdrop_tracker::config::Config;
use airdrop_tracker::db;
use airdrop_tracker::db::projects::PgProjectStore;
use airdrop_tracker::store::{MemoryProjectStore, ProjectStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    let config = Config::from_env().expect("Failed to load configuration");

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(&config.log_level)
        }))
        .init();

    tracing::info!("Starting airdrop tracker");

    let store: Arc<dyn ProjectStore> = match &config.database_url {
        Some(url) => {
            let pool = db::connect(url, config.db_max_connections)
                .await
                .expect("Failed to connect to database");
            Arc::new(PgProjectStore::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, projects will be kept in memory");
            Arc::new(MemoryProjectStore::new())
        }
    };

    let addr = SocketAddr::new(config.host, config.port);
    let app = airdrop_tracker::build_app(store, config);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
