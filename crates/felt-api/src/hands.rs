//! Handlers for hand endpoints.
//!
//! | Method   | Path                    | Notes |
//! |----------|-------------------------|-------|
//! | `GET`    | `/hands[?session_id=]`  | Newest first, optional session filter |
//! | `POST`   | `/hands`                | Body: hand record, id optional |
//! | `DELETE` | `/hands?id=`            | 404 if not found |
//! | `GET`    | `/hand?id=`             | 404 if not found |
//! | `PUT`    | `/hand?id=`             | Full-field overwrite |
//! | `POST`   | `/toggle-favorite?id=`  | Atomic flip, returns the new value |

use axum::{
  Json,
  extract::{Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use felt_core::{
  analysis::HandAnalyst,
  hand::{Hand, HandUpdate, NewHand},
  store::TrackerStore,
};
use serde::{Deserialize, Serialize};

use crate::{AppState, IdParams, error::ApiError};

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  /// If set, restrict to hands linked to this session.
  pub session_id: Option<String>,
}

/// `GET /hands[?session_id=<id>]`
pub async fn list<S, A>(
  State(state): State<AppState<S, A>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Hand>>, ApiError>
where
  S: TrackerStore,
  S::Error: std::error::Error + Send + Sync + 'static,
  A: HandAnalyst,
{
  let hands = state
    .store
    .list_hands(params.session_id.as_deref())
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(hands))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /hands` — a caller-supplied id is preserved; an empty or absent one
/// is replaced with a generated UUID.
pub async fn create<S, A>(
  State(state): State<AppState<S, A>>,
  Json(body): Json<NewHand>,
) -> Result<impl IntoResponse, ApiError>
where
  S: TrackerStore,
  S::Error: std::error::Error + Send + Sync + 'static,
  A: HandAnalyst,
{
  let hand = state
    .store
    .create_hand(body)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok((StatusCode::CREATED, Json(hand)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /hand?id=<id>`
pub async fn get_one<S, A>(
  State(state): State<AppState<S, A>>,
  Query(params): Query<IdParams>,
) -> Result<Json<Hand>, ApiError>
where
  S: TrackerStore,
  S::Error: std::error::Error + Send + Sync + 'static,
  A: HandAnalyst,
{
  let hand = state
    .store
    .get_hand(&params.id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("hand {} not found", params.id)))?;
  Ok(Json(hand))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /hand?id=<id>` — overwrites the mutable fields and returns the stored
/// record. The session link and analysis timestamp are untouched.
pub async fn update_one<S, A>(
  State(state): State<AppState<S, A>>,
  Query(params): Query<IdParams>,
  Json(body): Json<HandUpdate>,
) -> Result<Json<Hand>, ApiError>
where
  S: TrackerStore,
  S::Error: std::error::Error + Send + Sync + 'static,
  A: HandAnalyst,
{
  let hand = state
    .store
    .update_hand(&params.id, body)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("hand {} not found", params.id)))?;
  Ok(Json(hand))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /hands?id=<id>`
pub async fn delete_one<S, A>(
  State(state): State<AppState<S, A>>,
  Query(params): Query<IdParams>,
) -> Result<StatusCode, ApiError>
where
  S: TrackerStore,
  S::Error: std::error::Error + Send + Sync + 'static,
  A: HandAnalyst,
{
  let deleted = state
    .store
    .delete_hand(&params.id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  if !deleted {
    return Err(ApiError::NotFound(format!("hand {} not found", params.id)));
  }
  Ok(StatusCode::NO_CONTENT)
}

// ─── Favorite toggle ──────────────────────────────────────────────────────────

/// Response body for the favorite toggle.
#[derive(Debug, Serialize)]
pub struct ToggleResponse {
  pub favorite: bool,
}

/// `POST /toggle-favorite?id=<id>` — flips the flag in a single statement and
/// returns the new value.
pub async fn toggle_favorite<S, A>(
  State(state): State<AppState<S, A>>,
  Query(params): Query<IdParams>,
) -> Result<Json<ToggleResponse>, ApiError>
where
  S: TrackerStore,
  S::Error: std::error::Error + Send + Sync + 'static,
  A: HandAnalyst,
{
  let favorite = state
    .store
    .toggle_favorite(&params.id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("hand {} not found", params.id)))?;
  Ok(Json(ToggleResponse { favorite }))
}
