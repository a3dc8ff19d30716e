//! Hand and villain records.
//!
//! A hand is mutable: it is overwritten field-by-field on update, flipped by
//! the favorite toggle, and annotated by the analysis write-back. The villain
//! list travels as a JSON array in a single storage column.

use serde::{Deserialize, Serialize};

/// An opposing player noted within a hand record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Villain {
  pub id:         String,
  pub hole_cards: String,
  pub position:   String,
}

/// One dealt hand, optionally linked to a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hand {
  pub id:            String,
  /// Empty when the hand is not linked to any session.
  pub session_id:    String,
  pub position:      String,
  pub hole_cards:    String,
  pub board:         String,
  /// Free-text play-by-play; required before analysis can run.
  pub details:       String,
  pub note:          String,
  /// Signed monetary delta for the hand.
  pub result:        i64,
  pub date:          String,
  pub tag:           String,
  pub villains:      Vec<Villain>,
  pub analysis:      String,
  pub analysis_date: String,
  pub favorite:      bool,
}

/// Input to [`crate::store::TrackerStore::create_hand`].
///
/// A caller-supplied `id` is preserved; an empty one is replaced with a
/// freshly generated v4 UUID by the store. Defaults mirror the read-side
/// coalescing, so a minimal body round-trips cleanly.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewHand {
  pub id:            String,
  pub session_id:    String,
  pub position:      String,
  pub hole_cards:    String,
  pub board:         String,
  pub details:       String,
  pub note:          String,
  pub result:        i64,
  pub date:          String,
  pub tag:           String,
  pub villains:      Vec<Villain>,
  pub analysis:      String,
  pub analysis_date: String,
  pub favorite:      bool,
}

/// Full-field overwrite for [`crate::store::TrackerStore::update_hand`].
///
/// The session link and the analysis timestamp are deliberately absent:
/// updates never relink a hand, and `analysis_date` is written only by the
/// analysis operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HandUpdate {
  pub position:   String,
  pub hole_cards: String,
  pub board:      String,
  pub details:    String,
  pub note:       String,
  pub result:     i64,
  pub date:       String,
  pub tag:        String,
  pub villains:   Vec<Villain>,
  pub analysis:   String,
  pub favorite:   bool,
}
