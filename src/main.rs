//! Predict Proxy
//!
//! A single-endpoint HTTP proxy in front of a local text-generation backend.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌──────────────────────────────────────────────┐
//!                      │                PREDICT PROXY                 │
//!                      │                                              │
//!  POST /predict       │  ┌──────────┐   ┌──────────┐   ┌──────────┐  │
//!  ────────────────────┼─▶│  http    │──▶│ handlers │──▶│ backend  │──┼──▶ POST /api/generate
//!                      │  │ server   │   │ validate │   │ client   │  │
//!  {"generated": ...}  │  └──────────┘   └──────────┘   └──────────┘  │
//!  ◀───────────────────┼──────────────────────────────────────────────┼─── {"response": ...}
//!                      │                                              │
//!                      │  config · observability · lifecycle          │
//!                      └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use predict_proxy::config::{load_config, ProxyConfig};
use predict_proxy::observability::init_logging;
use predict_proxy::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "predict-proxy")]
#[command(about = "HTTP proxy that forwards prompts to a local generation backend", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file; built-in defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ProxyConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    init_logging(&config.observability);

    tracing::info!("predict-proxy v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        backend_url = %config.backend.url,
        model = %config.backend.model,
        backend_timeout_secs = config.backend.timeout_secs,
        read_timeout_secs = config.timeouts.read_secs,
        write_timeout_secs = config.timeouts.write_secs,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    shutdown.trigger_on_signal();

    let server = HttpServer::new(config)?;
    if let Err(e) = server.run(listener, shutdown.subscribe()).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
