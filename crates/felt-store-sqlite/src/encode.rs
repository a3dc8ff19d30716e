//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings, villain lists as compact JSON.
//! Nullable columns are coalesced to their zero values in SQL, so the raw row
//! types below carry no `Option`s.

use chrono::{DateTime, Utc};
use felt_core::{
  hand::{Hand, Villain},
  session::Session,
};

use crate::Result;

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

// ─── Villains ────────────────────────────────────────────────────────────────

pub fn encode_villains(villains: &[Villain]) -> Result<String> {
  Ok(serde_json::to_string(villains)?)
}

/// Decode the villains column. Corrupt JSON is a data-integrity problem, not
/// a request failure: it is logged and treated as an empty list.
pub fn decode_villains(text: &str, hand_id: &str) -> Vec<Villain> {
  if text.is_empty() || text == "[]" {
    return Vec::new();
  }
  match serde_json::from_str(text) {
    Ok(villains) => villains,
    Err(e) => {
      tracing::warn!(
        hand_id,
        error = %e,
        "corrupt villains column, treating as empty list"
      );
      Vec::new()
    }
  }
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Coalesced strings and numbers read directly from a `sessions` row.
pub struct RawSession {
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

impl RawSession {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:              row.get(0)?,
      location:        row.get(1)?,
      date:            row.get(2)?,
      small_blind:     row.get(3)?,
      big_blind:       row.get(4)?,
      currency:        row.get(5)?,
      effective_stack: row.get(6)?,
      table_size:      row.get(7)?,
      tag:             row.get(8)?,
    })
  }

  pub fn into_session(self) -> Session {
    Session {
      id:              self.id,
      location:        self.location,
      date:            self.date,
      small_blind:     self.small_blind,
      big_blind:       self.big_blind,
      currency:        self.currency,
      effective_stack: self.effective_stack,
      table_size:      self.table_size,
      tag:             self.tag,
    }
  }
}

/// Coalesced values read directly from a `hands` row. The villains column is
/// kept as text until [`RawHand::into_hand`] decodes it.
pub struct RawHand {
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
  pub villains:      String,
  pub analysis:      String,
  pub analysis_date: String,
  pub favorite:      bool,
}

impl RawHand {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:            row.get(0)?,
      session_id:    row.get(1)?,
      position:      row.get(2)?,
      hole_cards:    row.get(3)?,
      board:         row.get(4)?,
      details:       row.get(5)?,
      note:          row.get(6)?,
      result:        row.get(7)?,
      date:          row.get(8)?,
      tag:           row.get(9)?,
      villains:      row.get(10)?,
      analysis:      row.get(11)?,
      analysis_date: row.get(12)?,
      favorite:      row.get(13)?,
    })
  }

  pub fn into_hand(self) -> Hand {
    let villains = decode_villains(&self.villains, &self.id);
    Hand {
      id:            self.id,
      session_id:    self.session_id,
      position:      self.position,
      hole_cards:    self.hole_cards,
      board:         self.board,
      details:       self.details,
      note:          self.note,
      result:        self.result,
      date:          self.date,
      tag:           self.tag,
      villains,
      analysis:      self.analysis,
      analysis_date: self.analysis_date,
      favorite:      self.favorite,
    }
  }
}
