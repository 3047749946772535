//! MiniRig advisor - SFF build compatibility and power budget service
//!
//! Loads the component catalog once, opens the shared build store and serves
//! the JSON API until Ctrl+C or SIGTERM.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use minirig_advisor::{build_router, AppState};
use minirig_common::config::{
    default_config_path, read_toml_config, ConfigOverrides, LoggingConfig, ResolvedConfig,
};
use minirig_common::db::init_database;
use minirig_common::Catalog;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Command-line arguments for minirig-advisor
#[derive(Parser, Debug)]
#[command(name = "minirig-advisor")]
#[command(about = "SFF PC parts compatibility and power budget advisor")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "MINIRIG_PORT")]
    port: Option<u16>,

    /// Root folder holding the shared build database
    #[arg(short, long, env = "MINIRIG_ROOT_FOLDER")]
    root_folder: Option<PathBuf>,

    /// JSON catalog file (built-in sample catalog when omitted)
    #[arg(long, env = "MINIRIG_CATALOG")]
    catalog: Option<PathBuf>,

    /// SQLite database file (defaults to <root folder>/minirig.db)
    #[arg(long)]
    database: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long, env = "MINIRIG_CONFIG")]
    config: Option<PathBuf>,
}

fn init_tracing(logging: &LoggingConfig) -> Result<()> {
    // RUST_LOG wins over the configured level
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&logging.level).unwrap_or_else(|_| EnvFilter::new("info")),
    };

    match &logging.file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt().with_env_filter(filter).init();
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Read before tracing init so the configured log level applies from the first line
    let config_path = args.config.clone().or_else(default_config_path);
    let toml_config = match &config_path {
        Some(path) => read_toml_config(path).context("Failed to load configuration")?,
        None => None,
    };
    let config_missing = toml_config.is_none();
    let toml_config = toml_config.unwrap_or_default();

    init_tracing(&toml_config.logging)?;

    info!(
        "Starting MiniRig advisor (minirig-advisor) v{} [{}] built {} ({}, {})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE"),
        env!("BUILD_TARGET")
    );

    match (&config_path, config_missing) {
        (Some(path), true) => warn!("Config file {} not found, using defaults", path.display()),
        (Some(path), false) => info!("Loaded configuration from {}", path.display()),
        (None, _) => warn!("No config directory on this platform, using defaults"),
    }

    let config = ResolvedConfig::resolve(
        toml_config,
        ConfigOverrides {
            port: args.port,
            root_folder: args.root_folder,
            catalog_path: args.catalog,
            database_path: args.database,
        },
    )
    .context("Invalid configuration")?;
    info!("Root folder: {}", config.root_folder.display());

    let catalog = match &config.catalog_path {
        Some(path) => Catalog::load_from_file(path)
            .await
            .with_context(|| format!("Failed to load catalog {}", path.display()))?,
        None => Catalog::seed(),
    };

    let db = match init_database(&config.database_path).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("Failed to open database {}: {}", config.database_path.display(), e);
            return Err(e.into());
        }
    };

    let app = build_router(AppState::new(catalog, db));

    let addr = format!("{}:{}", config.bind_address, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("minirig-advisor listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
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
            Ok(mut sigterm) => {
                sigterm.recv().await;
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
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
