//! SawThat backend.
//!
//! # Architecture Overview
//!
//! ```text
//!                         ┌──────────────────────────────────────────────┐
//!                         │                  BACKEND                      │
//!     GET /health         │  ┌─────────┐    ┌────────────┐                │
//!     ────────────────────┼─▶│  http   │───▶│   health   │──▶ datastore   │
//!                         │  │ server  │    │  snapshot  │    ping        │
//!                         │  │         │    └────────────┘                │
//!     GET /ws (upgrade)   │  │         │    ┌────────────┐  ┌──────────┐  │
//!     ────────────────────┼─▶│         │───▶│ websocket  │─▶│ session  │  │
//!                         │  │         │    │  upgrader  │  │ echo × N │  │
//!     GET /, /static      │  │         │    └────────────┘  └──────────┘  │
//!     ────────────────────┼─▶│         │───▶ static files                 │
//!                         │  └─────────┘                                  │
//!                         │   config · observability · lifecycle          │
//!                         └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use sawthat_backend::config::{load_config, validate_config, AppConfig, ConfigError};
use sawthat_backend::lifecycle::{signals, Shutdown};
use sawthat_backend::observability::{logging, metrics};
use sawthat_backend::HttpServer;

#[derive(Parser)]
#[command(name = "sawthat-backend")]
#[command(about = "Health endpoint and WebSocket echo server", long_about = None)]
struct Cli {
    /// Path to a TOML config file. Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
        validate_config(&config).map_err(ConfigError::Validation)?;
    }

    logging::init_logging(&config.observability);

    tracing::info!("sawthat-backend v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        config_file = ?cli.config,
        bind_address = %config.listener.bind_address,
        datastore = ?config.datastore.kind,
        allowed_origins = config.websocket.allowed_origins.len(),
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr);
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        "Listening for connections"
    );

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.signal();
    tokio::spawn(async move {
        signals::wait_for_shutdown().await;
        shutdown.trigger();
    });

    let server = HttpServer::new(config);
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
