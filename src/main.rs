//! Doctor directory service.
//!
//! # Architecture Overview
//!
//! ```text
//!     Browser / CLI                 ┌──────────────────────────────────────────┐
//!     ─────────────────────────────▶│  http (axum)                             │
//!       GET /api/doctors            │    ├─ doctors  ──▶ upstream client ──────┼──▶ public JSON
//!       GET /api/listing?…          │    └─ listing  ──▶ page controller       │    dataset
//!                                   │                      ├─ filter engine    │
//!                                   │                      └─ query sync       │
//!                                   │  config · observability · lifecycle      │
//!                                   └──────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tokio::net::TcpListener;

use doctor_directory::config::{load_config, DirectoryConfig};
use doctor_directory::lifecycle::{wait_for_shutdown_signal, Shutdown};
use doctor_directory::observability::{logging, metrics};
use doctor_directory::HttpServer;

#[derive(Debug, Parser)]
#[command(name = "doctor-directory", version)]
#[command(about = "Doctor directory listing service with an upstream passthrough proxy")]
struct Args {
    /// TOML configuration file. Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => match load_config(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load {}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        },
        None => DirectoryConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
    }

    if let Err(e) = logging::init_logging(&config.observability) {
        eprintln!("Failed to initialize logging: {}", e);
        return ExitCode::FAILURE;
    }

    match run(config).await {
        Ok(()) => {
            tracing::info!("Shutdown complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Directory service failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: DirectoryConfig) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.url,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config)?;
    let server_task = tokio::spawn(server.run(listener, shutdown.subscribe()));

    wait_for_shutdown_signal().await;
    shutdown.trigger();

    server_task.await??;
    Ok(())
}
