//! Handler for `POST /analyze`.
//!
//! Two body shapes are accepted:
//!
//! - `{"handId": "..."}` — analyze a stored hand and persist the commentary
//!   back onto it (`analysis` + `analysisDate`, nothing else).
//! - `{"hand": {...}}` — analyze an inline hand without persisting anything.
//!
//! Either way the response is `{"analysis": ..., "analysisDate": ...}`.

use axum::{Json, extract::State};
use chrono::Utc;
use felt_core::{analysis::HandAnalyst, hand::NewHand, store::TrackerStore};
use serde::{Deserialize, Serialize};

use crate::{AppState, error::ApiError};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeBody {
  pub hand_id: Option<String>,
  pub hand:    Option<NewHand>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
  pub analysis:      String,
  pub analysis_date: String,
}

/// `POST /analyze`
pub async fn handler<S, A>(
  State(state): State<AppState<S, A>>,
  Json(body): Json<AnalyzeBody>,
) -> Result<Json<AnalyzeResponse>, ApiError>
where
  S: TrackerStore,
  S::Error: std::error::Error + Send + Sync + 'static,
  A: HandAnalyst,
{
  let (details, result, persist_to) = match (body.hand_id, body.hand) {
    (Some(id), _) => {
      let hand = state
        .store
        .get_hand(&id)
        .await
        .map_err(|e| ApiError::Store(Box::new(e)))?
        .ok_or_else(|| ApiError::NotFound(format!("hand {id} not found")))?;
      (hand.details, hand.result, Some(id))
    }
    (None, Some(hand)) => (hand.details, hand.result, None),
    (None, None) => {
      return Err(ApiError::BadRequest(
        "either handId or hand is required".into(),
      ));
    }
  };

  if details.is_empty() {
    return Err(ApiError::BadRequest(
      "hand details are required for analysis".into(),
    ));
  }

  let analysis = state.analyst.analyze(&details, result).await?;
  let analyzed_at = Utc::now();

  if let Some(id) = persist_to {
    let recorded = state
      .store
      .record_analysis(&id, &analysis, analyzed_at)
      .await
      .map_err(|e| ApiError::Store(Box::new(e)))?;
    if !recorded {
      // The hand vanished between the read and the write-back.
      return Err(ApiError::NotFound(format!("hand {id} not found")));
    }
  }

  Ok(Json(AnalyzeResponse {
    analysis,
    analysis_date: analyzed_at.to_rfc3339(),
  }))
}
