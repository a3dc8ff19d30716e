//! [`SqliteStore`] — the SQLite implementation of [`TrackerStore`].

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use felt_core::{
  hand::{Hand, HandUpdate, NewHand},
  session::{NewSession, Session, SessionUpdate},
  stats::{HandRow, SessionRow, Stats},
  store::TrackerStore,
};

use crate::{
  Error, Result,
  encode::{RawHand, RawSession, encode_dt, encode_villains},
  schema::SCHEMA,
};

/// Coalesced column list shared by every session SELECT. The external
/// contract never exposes a null, so the coalescing happens here, once.
const SESSION_COLUMNS: &str = "\
  id, \
  COALESCE(location, ''), \
  COALESCE(date, ''), \
  COALESCE(small_blind, 0), \
  COALESCE(big_blind, 0), \
  COALESCE(currency, ''), \
  COALESCE(effective_stack, 0), \
  COALESCE(table_size, 6), \
  COALESCE(tag, '')";

/// Coalesced column list shared by every hand SELECT.
const HAND_COLUMNS: &str = "\
  id, \
  COALESCE(session_id, ''), \
  COALESCE(position, ''), \
  COALESCE(hole_cards, ''), \
  COALESCE(board, ''), \
  COALESCE(details, ''), \
  COALESCE(note, ''), \
  COALESCE(result_amount, 0), \
  COALESCE(date, ''), \
  COALESCE(tag, ''), \
  COALESCE(villains, '[]'), \
  COALESCE(analysis, ''), \
  COALESCE(analysis_date, ''), \
  COALESCE(is_favorite, 0)";

/// Preserve a caller-supplied identifier; mint a v4 UUID otherwise.
fn resolve_id(id: String) -> String {
  if id.is_empty() {
    Uuid::new_v4().to_string()
  } else {
    id
  }
}

/// An empty session link is stored as NULL so the foreign key only binds
/// hands that actually name a session.
fn session_link(session_id: &str) -> Option<String> {
  if session_id.is_empty() {
    None
  } else {
    Some(session_id.to_owned())
  }
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A felt tracker store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

#[cfg(test)]
impl SqliteStore {
  /// Test hook: run arbitrary SQL against the underlying connection.
  pub(crate) async fn execute_raw(&self, sql: &'static str) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.execute_batch(sql)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── TrackerStore impl ───────────────────────────────────────────────────────

impl TrackerStore for SqliteStore {
  type Error = Error;

  // ── Sessions ──────────────────────────────────────────────────────────────

  async fn create_session(&self, input: NewSession) -> Result<Session> {
    let session = Session {
      id:              resolve_id(input.id),
      location:        input.location,
      date:            input.date,
      small_blind:     input.small_blind,
      big_blind:       input.big_blind,
      currency:        input.currency,
      effective_stack: input.effective_stack,
      table_size:      input.table_size,
      tag:             input.tag,
    };

    let s       = session.clone();
    let now_str = encode_dt(Utc::now());

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO sessions (
             id, location, date, small_blind, big_blind, currency,
             effective_stack, table_size, tag, created_at, updated_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
          rusqlite::params![
            s.id,
            s.location,
            s.date,
            s.small_blind,
            s.big_blind,
            s.currency,
            s.effective_stack,
            s.table_size,
            s.tag,
            now_str,
            now_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(session)
  }

  async fn get_session(&self, id: &str) -> Result<Option<Session>> {
    let id_owned = id.to_owned();

    let raw: Option<RawSession> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {SESSION_COLUMNS} FROM sessions WHERE id = ?1"),
              rusqlite::params![id_owned],
              RawSession::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    Ok(raw.map(RawSession::into_session))
  }

  async fn list_sessions(&self) -> Result<Vec<Session>> {
    let raws: Vec<RawSession> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {SESSION_COLUMNS} FROM sessions ORDER BY date DESC"
        ))?;
        let rows = stmt
          .query_map([], RawSession::from_row)?
          .filter_map(|row| match row {
            Ok(raw) => Some(raw),
            Err(e) => {
              tracing::warn!(error = %e, "skipping unreadable session row");
              None
            }
          })
          .collect();
        Ok(rows)
      })
      .await?;

    Ok(raws.into_iter().map(RawSession::into_session).collect())
  }

  async fn update_session(
    &self,
    id:     &str,
    update: SessionUpdate,
  ) -> Result<Option<Session>> {
    let id_owned = id.to_owned();
    let now_str  = encode_dt(Utc::now());

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE sessions SET
             location = ?1, date = ?2, small_blind = ?3, big_blind = ?4,
             currency = ?5, effective_stack = ?6, table_size = ?7, tag = ?8,
             updated_at = ?9
           WHERE id = ?10",
          rusqlite::params![
            update.location,
            update.date,
            update.small_blind,
            update.big_blind,
            update.currency,
            update.effective_stack,
            update.table_size,
            update.tag,
            now_str,
            id_owned,
          ],
        )?)
      })
      .await?;

    if changed == 0 {
      return Ok(None);
    }
    self.get_session(id).await
  }

  async fn delete_session(&self, id: &str) -> Result<bool> {
    let id_owned = id.to_owned();

    let deleted = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM sessions WHERE id = ?1",
          rusqlite::params![id_owned],
        )?)
      })
      .await?;

    Ok(deleted > 0)
  }

  // ── Hands ─────────────────────────────────────────────────────────────────

  async fn create_hand(&self, input: NewHand) -> Result<Hand> {
    let hand = Hand {
      id:            resolve_id(input.id),
      session_id:    input.session_id,
      position:      input.position,
      hole_cards:    input.hole_cards,
      board:         input.board,
      details:       input.details,
      note:          input.note,
      result:        input.result,
      date:          input.date,
      tag:           input.tag,
      villains:      input.villains,
      analysis:      input.analysis,
      analysis_date: input.analysis_date,
      favorite:      input.favorite,
    };

    let h             = hand.clone();
    let villains_json = encode_villains(&hand.villains)?;
    let link          = session_link(&hand.session_id);
    let now_str       = encode_dt(Utc::now());

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO hands (
             id, session_id, position, hole_cards, board, details, note,
             result_amount, date, tag, villains, analysis, analysis_date,
             is_favorite, created_at, updated_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13,
                     ?14, ?15, ?16)",
          rusqlite::params![
            h.id,
            link,
            h.position,
            h.hole_cards,
            h.board,
            h.details,
            h.note,
            h.result,
            h.date,
            h.tag,
            villains_json,
            h.analysis,
            h.analysis_date,
            h.favorite,
            now_str,
            now_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(hand)
  }

  async fn get_hand(&self, id: &str) -> Result<Option<Hand>> {
    let id_owned = id.to_owned();

    let raw: Option<RawHand> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {HAND_COLUMNS} FROM hands WHERE id = ?1"),
              rusqlite::params![id_owned],
              RawHand::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    Ok(raw.map(RawHand::into_hand))
  }

  async fn list_hands(&self, session_id: Option<&str>) -> Result<Vec<Hand>> {
    let session_id_owned = session_id.map(str::to_owned);

    let raws: Vec<RawHand> = self
      .conn
      .call(move |conn| {
        let skip_bad = |row: rusqlite::Result<RawHand>| match row {
          Ok(raw) => Some(raw),
          Err(e) => {
            tracing::warn!(error = %e, "skipping unreadable hand row");
            None
          }
        };

        let rows = if let Some(sid) = session_id_owned {
          let mut stmt = conn.prepare(&format!(
            "SELECT {HAND_COLUMNS} FROM hands WHERE session_id = ?1
             ORDER BY created_at DESC"
          ))?;
          stmt
            .query_map(rusqlite::params![sid], RawHand::from_row)?
            .filter_map(skip_bad)
            .collect()
        } else {
          let mut stmt = conn.prepare(&format!(
            "SELECT {HAND_COLUMNS} FROM hands ORDER BY created_at DESC"
          ))?;
          stmt
            .query_map([], RawHand::from_row)?
            .filter_map(skip_bad)
            .collect()
        };
        Ok(rows)
      })
      .await?;

    Ok(raws.into_iter().map(RawHand::into_hand).collect())
  }

  async fn update_hand(
    &self,
    id:     &str,
    update: HandUpdate,
  ) -> Result<Option<Hand>> {
    let id_owned      = id.to_owned();
    let villains_json = encode_villains(&update.villains)?;
    let now_str       = encode_dt(Utc::now());

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE hands SET
             position = ?1, hole_cards = ?2, board = ?3, details = ?4,
             note = ?5, result_amount = ?6, date = ?7, tag = ?8,
             villains = ?9, analysis = ?10, is_favorite = ?11,
             updated_at = ?12
           WHERE id = ?13",
          rusqlite::params![
            update.position,
            update.hole_cards,
            update.board,
            update.details,
            update.note,
            update.result,
            update.date,
            update.tag,
            villains_json,
            update.analysis,
            update.favorite,
            now_str,
            id_owned,
          ],
        )?)
      })
      .await?;

    if changed == 0 {
      return Ok(None);
    }
    self.get_hand(id).await
  }

  async fn delete_hand(&self, id: &str) -> Result<bool> {
    let id_owned = id.to_owned();

    let deleted = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM hands WHERE id = ?1",
          rusqlite::params![id_owned],
        )?)
      })
      .await?;

    Ok(deleted > 0)
  }

  async fn toggle_favorite(&self, id: &str) -> Result<Option<bool>> {
    let id_owned = id.to_owned();
    let now_str  = encode_dt(Utc::now());

    // Single statement, so two concurrent toggles on the same hand cannot
    // lose an update.
    let flipped: Option<bool> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "UPDATE hands
               SET is_favorite = NOT COALESCE(is_favorite, 0), updated_at = ?2
               WHERE id = ?1
               RETURNING is_favorite",
              rusqlite::params![id_owned, now_str],
              |row| row.get(0),
            )
            .optional()?,
        )
      })
      .await?;

    Ok(flipped)
  }

  async fn record_analysis(
    &self,
    id:          &str,
    analysis:    &str,
    analyzed_at: DateTime<Utc>,
  ) -> Result<bool> {
    let id_owned       = id.to_owned();
    let analysis_owned = analysis.to_owned();
    let at_str         = encode_dt(analyzed_at);
    let now_str        = encode_dt(Utc::now());

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE hands
           SET analysis = ?2, analysis_date = ?3, updated_at = ?4
           WHERE id = ?1",
          rusqlite::params![id_owned, analysis_owned, at_str, now_str],
        )?)
      })
      .await?;

    Ok(changed > 0)
  }

  // ── Stats ─────────────────────────────────────────────────────────────────

  async fn stats(&self) -> Result<Stats> {
    let (hand_rows, session_rows): (Vec<HandRow>, Vec<SessionRow>) = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT COALESCE(result_amount, 0), COALESCE(session_id, '')
           FROM hands",
        )?;
        let hands = stmt
          .query_map([], |row| {
            Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?))
          })?
          .filter_map(|row| match row {
            Ok((result, session_id)) => Some(HandRow {
              session_id: (!session_id.is_empty()).then_some(session_id),
              result,
            }),
            Err(e) => {
              tracing::warn!(error = %e, "skipping unreadable hand row in stats scan");
              None
            }
          })
          .collect();

        let mut stmt = conn.prepare(
          "SELECT id, COALESCE(location, ''), COALESCE(small_blind, 0),
                  COALESCE(big_blind, 0)
           FROM sessions",
        )?;
        let sessions = stmt
          .query_map([], |row| {
            Ok(SessionRow {
              id:          row.get(0)?,
              location:    row.get(1)?,
              small_blind: row.get(2)?,
              big_blind:   row.get(3)?,
            })
          })?
          .filter_map(|row| match row {
            Ok(raw) => Some(raw),
            Err(e) => {
              tracing::warn!(error = %e, "skipping unreadable session row in stats scan");
              None
            }
          })
          .collect();

        Ok((hands, sessions))
      })
      .await?;

    Ok(Stats::compute(&hand_rows, &session_rows))
  }
}
