//! civic-server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), loads the
//! reference data into memory, and serves the JSON API under `/api`.
//!
//! ```
//! cargo run -p civic-server -- --config config.example.toml
//! ```

mod settings;
mod sink;

use std::{path::PathBuf, sync::Arc, time::Duration};

use anyhow::Context as _;
use axum::Router;
use clap::Parser;
use civic_index::{LookupEngine, SubscriptionStore};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::sink::ConfiguredSink;

#[derive(Parser)]
#[command(author, version, about = "Civic representative lookup server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration.
  let server_cfg =
    settings::load(cli.config).context("failed to read configuration")?;

  // Decode reference data. Any malformed source aborts startup.
  let sources = server_cfg.data.clone();
  let data = tokio::task::spawn_blocking(move || civic_index::load(&sources))
    .await
    .context("reference data loader panicked")?
    .context("failed to load reference data")?;

  // Event sink.
  let sink = ConfiguredSink::from_config(&server_cfg.events).await?;
  match &sink {
    Some(sink) => tracing::info!(sink = %sink.describe(), "publishing follow changes"),
    None => tracing::info!("follow change publishing disabled"),
  }

  let sink = sink.map(Arc::new);
  let follows = SubscriptionStore::from_rows(server_cfg.follows.policy, data.follows)
    .with_optional_sink(sink.clone())
    .with_publish_timeout(Duration::from_millis(server_cfg.events.timeout_ms));

  // The indexes are complete here; from now on they are only read.
  let engine = Arc::new(LookupEngine::new(
    Arc::new(data.representatives),
    Arc::new(data.geography),
    follows,
  ));

  let app = Router::new()
    .nest("/api", civic_api::api_router(engine))
    .layer(TraceLayer::new_for_http());

  let address = format!("{}:{}", server_cfg.host, server_cfg.port);
  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error")?;

  // The router, and with it the engine's handle on the sink, is gone once
  // `serve` returns.
  if let Some(sink) = sink.and_then(Arc::into_inner) {
    sink.shutdown().await?;
  }

  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    tracing::warn!(error = %e, "failed to listen for shutdown signal");
    std::future::pending::<()>().await;
  }
  tracing::info!("shutting down");
}
