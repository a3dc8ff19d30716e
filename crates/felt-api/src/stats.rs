//! Handler for `GET /stats`.

use axum::{Json, extract::State};
use felt_core::{analysis::HandAnalyst, stats::Stats, store::TrackerStore};

use crate::{AppState, error::ApiError};

/// `GET /stats` — profit and win-rate rollups over all sessions and hands.
pub async fn handler<S, A>(
  State(state): State<AppState<S, A>>,
) -> Result<Json<Stats>, ApiError>
where
  S: TrackerStore,
  S::Error: std::error::Error + Send + Sync + 'static,
  A: HandAnalyst,
{
  let stats = state
    .store
    .stats()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(stats))
}
