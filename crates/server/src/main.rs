use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gallery_core::{
    load_config, load_config_from_env, validate_config, CloudinaryClient, Config, MediaHost,
    MetadataTable,
};
use gallery_server::api::create_router;
use gallery_server::state::AppState;

/// Config file used when `GALLERY_CONFIG` is not set.
const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = read_config()?;

    // Validate configuration
    validate_config(&config).context("Configuration validation failed")?;

    info!("Configuration loaded successfully");
    info!(
        "Effective configuration: {}",
        serde_json::to_string(&gallery_core::SanitizedConfig::from(&config)).unwrap_or_default()
    );
    if config.media_host.folder.as_deref().is_none_or(|f| f.trim().is_empty()) {
        warn!("media_host.folder is not set; /api/images will report a configuration error");
    }

    let media_host: Arc<dyn MediaHost> = Arc::new(
        CloudinaryClient::new(&config.media_host).context("Failed to create media host client")?,
    );
    info!("Using Cloudinary cloud {}", config.media_host.cloud_name);

    // Read lazily on the first lookup that needs it
    let metadata = Arc::new(MetadataTable::from_path(&config.metadata.csv_path));
    info!("Badge metadata table: {:?}", config.metadata.csv_path);

    let addr = SocketAddr::new(config.server.host, config.server.port);

    // Create app state
    let state = Arc::new(AppState::new(config, media_host, metadata));

    // Create router
    let app = create_router(state);

    // Start server
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shut down");

    Ok(())
}

/// Load configuration from `GALLERY_CONFIG`, `config.toml`, or the environment alone.
fn read_config() -> Result<Config> {
    match std::env::var("GALLERY_CONFIG").map(PathBuf::from) {
        Ok(path) => {
            info!("Loading configuration from {:?}", path);
            load_config(&path).with_context(|| format!("Failed to load config from {:?}", path))
        }
        Err(_) if PathBuf::from(DEFAULT_CONFIG_PATH).exists() => {
            info!("Loading configuration from {}", DEFAULT_CONFIG_PATH);
            load_config(&PathBuf::from(DEFAULT_CONFIG_PATH))
                .with_context(|| format!("Failed to load config from {}", DEFAULT_CONFIG_PATH))
        }
        Err(_) => {
            info!("No config file, using environment only");
            load_config_from_env().context("Failed to load config from environment")
        }
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
