//! Session — the game-context record hands are played within.

use serde::{Deserialize, Serialize};

/// A recorded poker-playing outing with fixed stakes and location.
///
/// Every field is concrete: reads coalesce missing storage values to the
/// type's zero value, so callers never see a null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
  pub id:              String,
  pub location:        String,
  /// Free-text date; stored and sorted as text, never parsed.
  pub date:            String,
  pub small_blind:     i64,
  pub big_blind:       i64,
  pub currency:        String,
  pub effective_stack: i64,
  pub table_size:      i64,
  pub tag:             String,
}

/// Input to [`crate::store::TrackerStore::create_session`].
///
/// A caller-supplied `id` is preserved; an empty one is replaced with a
/// freshly generated v4 UUID by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewSession {
  pub id:              String,
  pub location:        String,
  pub date:            String,
  pub small_blind:     i64,
  pub big_blind:       i64,
  pub currency:        String,
  pub effective_stack: i64,
  pub table_size:      i64,
  pub tag:             String,
}

impl Default for NewSession {
  fn default() -> Self {
    Self {
      id:              String::new(),
      location:        String::new(),
      date:            String::new(),
      small_blind:     0,
      big_blind:       0,
      currency:        String::new(),
      effective_stack: 0,
      table_size:      6,
      tag:             String::new(),
    }
  }
}

/// Full-field overwrite for [`crate::store::TrackerStore::update_session`].
/// The identifier is addressed separately and never changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionUpdate {
  pub location:        String,
  pub date:            String,
  pub small_blind:     i64,
  pub big_blind:       i64,
  pub currency:        String,
  pub effective_stack: i64,
  pub table_size:      i64,
  pub tag:             String,
}

impl Default for SessionUpdate {
  fn default() -> Self {
    Self {
      location:        String::new(),
      date:            String::new(),
      small_blind:     0,
      big_blind:       0,
      currency:        String::new(),
      effective_stack: 0,
      table_size:      6,
      tag:             String::new(),
    }
  }
}
