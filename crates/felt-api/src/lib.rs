//! JSON REST API for the felt poker tracker.
//!
//! Exposes an axum [`Router`] backed by any [`TrackerStore`] and
//! [`HandAnalyst`]. Transport concerns (CORS, request tracing, TLS) are the
//! binary's responsibility.

pub mod analyze;
pub mod error;
pub mod hands;
pub mod sessions;
pub mod stats;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  routing::{get, post},
};
use felt_analysis::OpenAiConfig;
use felt_core::{analysis::HandAnalyst, store::TrackerStore};
use serde::Deserialize;

pub use error::ApiError;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and `FELT_*`
/// environment variables.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
  pub analysis:   OpenAiConfig,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:       "0.0.0.0".into(),
      port:       8080,
      store_path: PathBuf::from("felt.db"),
      analysis:   OpenAiConfig::default(),
    }
  }
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S: TrackerStore, A: HandAnalyst> {
  pub store:   Arc<S>,
  pub analyst: Arc<A>,
}

/// Query parameter shared by the single-record endpoints.
#[derive(Debug, Deserialize)]
pub struct IdParams {
  pub id: String,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the API router for `state`.
pub fn router<S, A>(state: AppState<S, A>) -> Router
where
  S: TrackerStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
  A: HandAnalyst + Clone + Send + Sync + 'static,
{
  Router::new()
    // Sessions
    .route(
      "/sessions",
      get(sessions::list::<S, A>)
        .post(sessions::create::<S, A>)
        .delete(sessions::delete_one::<S, A>),
    )
    .route(
      "/session",
      get(sessions::get_one::<S, A>).put(sessions::update_one::<S, A>),
    )
    // Hands
    .route(
      "/hands",
      get(hands::list::<S, A>)
        .post(hands::create::<S, A>)
        .delete(hands::delete_one::<S, A>),
    )
    .route(
      "/hand",
      get(hands::get_one::<S, A>).put(hands::update_one::<S, A>),
    )
    .route("/toggle-favorite", post(hands::toggle_favorite::<S, A>))
    // Analysis
    .route("/analyze", post(analyze::handler::<S, A>))
    // Stats
    .route("/stats", get(stats::handler::<S, A>))
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────
