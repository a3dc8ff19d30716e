//! Handlers for session endpoints.
//!
//! | Method   | Path            | Notes |
//! |----------|-----------------|-------|
//! | `GET`    | `/sessions`     | Newest date first |
//! | `POST`   | `/sessions`     | Body: session record, id optional |
//! | `DELETE` | `/sessions?id=` | Cascades to the session's hands |
//! | `GET`    | `/session?id=`  | 404 if not found |
//! | `PUT`    | `/session?id=`  | Full-field overwrite |

use axum::{
  Json,
  extract::{Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use felt_core::{
  analysis::HandAnalyst,
  session::{NewSession, Session, SessionUpdate},
  store::TrackerStore,
};

use crate::{AppState, IdParams, error::ApiError};

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /sessions`
pub async fn list<S, A>(
  State(state): State<AppState<S, A>>,
) -> Result<Json<Vec<Session>>, ApiError>
where
  S: TrackerStore,
  S::Error: std::error::Error + Send + Sync + 'static,
  A: HandAnalyst,
{
  let sessions = state
    .store
    .list_sessions()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(sessions))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /sessions` — a caller-supplied id is preserved; an empty or absent
/// one is replaced with a generated UUID.
pub async fn create<S, A>(
  State(state): State<AppState<S, A>>,
  Json(body): Json<NewSession>,
) -> Result<impl IntoResponse, ApiError>
where
  S: TrackerStore,
  S::Error: std::error::Error + Send + Sync + 'static,
  A: HandAnalyst,
{
  let session = state
    .store
    .create_session(body)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok((StatusCode::CREATED, Json(session)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /session?id=<id>`
pub async fn get_one<S, A>(
  State(state): State<AppState<S, A>>,
  Query(params): Query<IdParams>,
) -> Result<Json<Session>, ApiError>
where
  S: TrackerStore,
  S::Error: std::error::Error + Send + Sync + 'static,
  A: HandAnalyst,
{
  let session = state
    .store
    .get_session(&params.id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("session {} not found", params.id)))?;
  Ok(Json(session))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /session?id=<id>` — overwrites every mutable field and returns the
/// stored record.
pub async fn update_one<S, A>(
  State(state): State<AppState<S, A>>,
  Query(params): Query<IdParams>,
  Json(body): Json<SessionUpdate>,
) -> Result<Json<Session>, ApiError>
where
  S: TrackerStore,
  S::Error: std::error::Error + Send + Sync + 'static,
  A: HandAnalyst,
{
  let session = state
    .store
    .update_session(&params.id, body)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("session {} not found", params.id)))?;
  Ok(Json(session))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /sessions?id=<id>` — the foreign key cascades to the session's
/// hands.
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
    .delete_session(&params.id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  if !deleted {
    return Err(ApiError::NotFound(format!(
      "session {} not found",
      params.id
    )));
  }
  Ok(StatusCode::NO_CONTENT)
}
