//! par-analyser - PAR feedback microservice
//!
//! **Module Identity:**
//! - Name: par-analyser
//! - Port: 5780 (default)
//!
//! Ingests Post-Action Review records from the configured sheets, serves
//! filtered views of them, and turns a filtered subset into categorized
//! findings via the summarization service.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use par_analyser::services::{ChatCompletionsClient, HttpSheetFetcher, RecordIngestor};
use par_analyser::AppState;

/// Command-line arguments for par-analyser
#[derive(Parser, Debug)]
#[command(name = "par-analyser")]
#[command(about = "PAR Post-Action Review feedback microservice")]
#[command(version)]
struct Args {
    /// Port to listen on (overrides the config file)
    #[arg(short, long, env = "PAR_PORT")]
    port: Option<u16>,

    /// Path to the TOML config file
    #[arg(short, long, env = "PAR_CONFIG")]
    config: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset (overrides the config file)
    #[arg(long)]
    log_level: Option<String>,

    /// Start serving without the initial ingestion
    #[arg(long)]
    skip_initial_fetch: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let toml_config = par_common::config::load_toml_config(args.config.as_deref())
        .context("Failed to load configuration")?;

    // Initialize tracing
    let level = args
        .log_level
        .clone()
        .unwrap_or_else(|| toml_config.logging.level.clone());
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("par_analyser={level},par_common={level},tower_http=info").into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let port = args.port.unwrap_or(toml_config.port);

    info!("Starting par-analyser (PAR feedback) microservice");
    info!(
        "Version: {} ({}, {}, built {})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_PROFILE"),
        env!("BUILD_TIMESTAMP")
    );
    info!(
        sources = toml_config.sources.len(),
        summarizer = %toml_config.summarizer.base_url,
        model = %toml_config.summarizer.model,
        "Configuration loaded"
    );

    let api_key = par_analyser::config::resolve_summarizer_api_key(&toml_config);
    let summarizer = ChatCompletionsClient::new(&toml_config.summarizer, api_key)
        .context("Failed to build summarizer client")?;
    let fetcher = HttpSheetFetcher::new().context("Failed to build sheet client")?;

    let ingestor = RecordIngestor::new(Arc::new(fetcher), toml_config.sources.clone());
    let state = AppState::new(ingestor, Arc::new(summarizer));

    if args.skip_initial_fetch {
        info!("Initial ingestion skipped");
    } else if let Err(e) = state.refresh_records().await {
        warn!(error = %e, "Initial ingestion failed, serving with no records");
    }

    let app = par_analyser::build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("Listening on http://{}", addr);
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
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
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
