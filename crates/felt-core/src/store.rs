//! The `TrackerStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `felt-store-sqlite`).
//! Higher layers (`felt-api`) depend on this abstraction, not on any concrete
//! backend.

use std::future::Future;

use chrono::{DateTime, Utc};

use crate::{
  hand::{Hand, HandUpdate, NewHand},
  session::{NewSession, Session, SessionUpdate},
  stats::Stats,
};

/// Abstraction over a felt tracker storage backend.
///
/// Reads never surface a null: every missing column value is coalesced to
/// its type's zero value before a record is handed back. Writes preserve
/// caller-supplied identifiers and generate a v4 UUID string otherwise.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait TrackerStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Sessions ──────────────────────────────────────────────────────────

  /// Persist a new session, generating an id if the input has none.
  fn create_session(
    &self,
    input: NewSession,
  ) -> impl Future<Output = Result<Session, Self::Error>> + Send + '_;

  /// Retrieve a session by id. Returns `None` if not found.
  fn get_session<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<Option<Session>, Self::Error>> + Send + 'a;

  /// List all sessions, newest date first.
  fn list_sessions(
    &self,
  ) -> impl Future<Output = Result<Vec<Session>, Self::Error>> + Send + '_;

  /// Overwrite every mutable field of a session and return the stored
  /// record. Returns `None` if no session has this id.
  fn update_session<'a>(
    &'a self,
    id: &'a str,
    update: SessionUpdate,
  ) -> impl Future<Output = Result<Option<Session>, Self::Error>> + Send + 'a;

  /// Delete a session and, via the foreign key, every hand linked to it.
  /// Returns `false` if no session had this id.
  fn delete_session<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;

  // ── Hands ─────────────────────────────────────────────────────────────

  /// Persist a new hand, generating an id if the input has none.
  fn create_hand(
    &self,
    input: NewHand,
  ) -> impl Future<Output = Result<Hand, Self::Error>> + Send + '_;

  /// Retrieve a hand by id. Returns `None` if not found.
  fn get_hand<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<Option<Hand>, Self::Error>> + Send + 'a;

  /// List hands, newest first, optionally restricted to one session.
  fn list_hands<'a>(
    &'a self,
    session_id: Option<&'a str>,
  ) -> impl Future<Output = Result<Vec<Hand>, Self::Error>> + Send + 'a;

  /// Overwrite the mutable fields of a hand and return the stored record.
  /// Returns `None` if no hand has this id.
  fn update_hand<'a>(
    &'a self,
    id: &'a str,
    update: HandUpdate,
  ) -> impl Future<Output = Result<Option<Hand>, Self::Error>> + Send + 'a;

  /// Delete a hand. Returns `false` if no hand had this id.
  fn delete_hand<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;

  /// Atomically flip a hand's favorite flag and return the new value.
  /// Returns `None` if no hand has this id.
  fn toggle_favorite<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<Option<bool>, Self::Error>> + Send + 'a;

  /// Write analysis commentary and its timestamp onto a hand, touching no
  /// other field. Returns `false` if no hand had this id.
  fn record_analysis<'a>(
    &'a self,
    id: &'a str,
    analysis: &'a str,
    analyzed_at: DateTime<Utc>,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;

  // ── Stats ─────────────────────────────────────────────────────────────

  /// Aggregate profit and win-rate rollups from two full-table scans.
  ///
  /// The scans are independent; there is no cross-scan consistency
  /// guarantee. Rows that fail to scan are skipped, not fatal.
  fn stats(
    &self,
  ) -> impl Future<Output = Result<Stats, Self::Error>> + Send + '_;
}
