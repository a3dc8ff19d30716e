//! felt server binary.
//!
//! Reads `config.toml` (or the path given with `--config`), opens the SQLite
//! store, and serves the JSON API over HTTP. `OPENAI_API_KEY` enables the
//! analysis endpoint; without it the server still runs and `/analyze`
//! answers 503.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use felt_analysis::OpenAiAnalyst;
use felt_api::{AppState, ServerConfig};
use felt_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "felt poker tracker server")]
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
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("FELT"))
    .build()
    .context("failed to read config file")?;

  let mut server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  // The conventional provider variable fills an absent key, never replaces a
  // configured one.
  if server_cfg.analysis.api_key.is_none()
    && let Ok(key) = std::env::var("OPENAI_API_KEY")
  {
    server_cfg.analysis.api_key = Some(key);
  }
  if server_cfg.analysis.api_key.is_none() {
    tracing::warn!("no analysis credential configured; POST /analyze will answer 503");
  }

  // Open SQLite store.
  let store = SqliteStore::open(&server_cfg.store_path)
    .await
    .with_context(|| {
      format!("failed to open store at {:?}", server_cfg.store_path)
    })?;

  let analyst = OpenAiAnalyst::new(server_cfg.analysis.clone())
    .context("failed to build analysis client")?;

  let state = AppState {
    store:   Arc::new(store),
    analyst: Arc::new(analyst),
  };

  let app = felt_api::router(state)
    .layer(CorsLayer::permissive())
    .layer(TraceLayer::new_for_http());

  let address = format!("{}:{}", server_cfg.host, server_cfg.port);
  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
