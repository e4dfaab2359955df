//! Trie Router demo server.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ axum listener ──▶ request id / trace / timeout
//!                                              │
//!                                              ▼
//!                                   ┌─────────────────────┐
//!                                   │  RequestContext     │  fresh per request
//!                                   └──────────┬──────────┘
//!                                              ▼
//!                                   ┌─────────────────────┐
//!                                   │  Router (per-method │  static > param > wildcard
//!                                   │  trie forest)       │
//!                                   └──────────┬──────────┘
//!                                              ▼
//!     Client Response ◀──────────────── handler, or 404
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use trie_router::config::{apply_overrides, load_config, EngineConfig};
use trie_router::http::{handlers, Engine};
use trie_router::lifecycle::{signals, Shutdown};
use trie_router::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "trie-router")]
#[command(about = "HTTP server backed by a trie router", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,

    /// Override `observability.log_level`.
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => EngineConfig::default(),
    };
    let config = apply_overrides(config, cli.bind, cli.log_level)?;

    logging::init_logging(&config.observability)?;
    tracing::info!("trie-router v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        max_body_size = config.limits.max_body_size,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    // All registration happens here, before the router is shared.
    let mut engine = Engine::new(config);
    handlers::register(&mut engine)?;

    let shutdown = Shutdown::new();
    signals::install(&shutdown);

    engine.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
