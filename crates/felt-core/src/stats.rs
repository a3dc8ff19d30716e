//! Profit and win-rate rollups derived from the sessions and hands tables.
//!
//! Aggregation is a pure function over plain row types; storage backends feed
//! it from their own scans. Hands referencing no known session contribute to
//! the overall profit but to no per-session bucket.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ─── Scan rows ───────────────────────────────────────────────────────────────

/// One hand's contribution to the rollups.
#[derive(Debug, Clone)]
pub struct HandRow {
  /// `None` when the hand is not linked to a session.
  pub session_id: Option<String>,
  pub result:     i64,
}

/// The session columns the aggregator needs.
#[derive(Debug, Clone)]
pub struct SessionRow {
  pub id:          String,
  pub location:    String,
  pub small_blind: i64,
  pub big_blind:   i64,
}

// ─── Stats ───────────────────────────────────────────────────────────────────

/// The aggregate report served by `GET /stats`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
  pub total_profit:   i64,
  pub total_sessions: i64,
  /// Integer percentage in `[0, 100]`, rounded down.
  pub win_rate:       i64,
  pub avg_session:    f64,
  pub by_stakes:      BTreeMap<String, i64>,
  pub by_location:    BTreeMap<String, i64>,
}

impl Stats {
  /// Aggregate hand and session rows into the rollup record.
  ///
  /// A session wins only when its summed hand results are strictly positive;
  /// break-even is not a win. Sessions sharing an exact blind pair or a
  /// location merge into one bucket. With no sessions at all, `win_rate` and
  /// `avg_session` are zero rather than a division by zero.
  pub fn compute(hands: &[HandRow], sessions: &[SessionRow]) -> Self {
    let mut total_profit = 0i64;
    let mut session_profits: BTreeMap<&str, i64> = BTreeMap::new();

    for hand in hands {
      total_profit += hand.result;
      if let Some(id) = hand.session_id.as_deref() {
        *session_profits.entry(id).or_insert(0) += hand.result;
      }
    }

    let mut by_stakes: BTreeMap<String, i64> = BTreeMap::new();
    let mut by_location: BTreeMap<String, i64> = BTreeMap::new();
    let mut win_sessions = 0i64;

    for session in sessions {
      let profit = session_profits
        .get(session.id.as_str())
        .copied()
        .unwrap_or(0);
      if profit > 0 {
        win_sessions += 1;
      }
      let label = stakes_label(session.small_blind, session.big_blind);
      *by_stakes.entry(label).or_insert(0) += profit;
      *by_location.entry(session.location.clone()).or_insert(0) += profit;
    }

    let total_sessions = sessions.len() as i64;
    let (win_rate, avg_session) = if total_sessions == 0 {
      (0, 0.0)
    } else {
      (
        win_sessions * 100 / total_sessions,
        total_profit as f64 / total_sessions as f64,
      )
    };

    Stats {
      total_profit,
      total_sessions,
      win_rate,
      avg_session,
      by_stakes,
      by_location,
    }
  }
}

/// The bucket label for a small/big blind pair, e.g. `"$1/2"`.
pub fn stakes_label(small_blind: i64, big_blind: i64) -> String {
  format!("${small_blind}/{big_blind}")
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  fn hand(session_id: Option<&str>, result: i64) -> HandRow {
    HandRow {
      session_id: session_id.map(str::to_owned),
      result,
    }
  }

  fn session(id: &str, location: &str, sb: i64, bb: i64) -> SessionRow {
    SessionRow {
      id:          id.to_owned(),
      location:    location.to_owned(),
      small_blind: sb,
      big_blind:   bb,
    }
  }

  #[test]
  fn empty_inputs_are_all_zero() {
    let stats = Stats::compute(&[], &[]);
    assert_eq!(stats, Stats::default());
  }

  #[test]
  fn two_sessions_sharing_stakes_merge_into_one_bucket() {
    let sessions = vec![
      session("s1", "CasinoA", 1, 2),
      session("s2", "CasinoB", 1, 2),
    ];
    let hands = vec![hand(Some("s1"), 100), hand(Some("s2"), -50)];

    let stats = Stats::compute(&hands, &sessions);

    assert_eq!(stats.total_profit, 50);
    assert_eq!(stats.total_sessions, 2);
    assert_eq!(stats.win_rate, 50);
    assert_eq!(stats.avg_session, 25.0);
    assert_eq!(stats.by_stakes["$1/2"], 50);
    assert_eq!(stats.by_location["CasinoA"], 100);
    assert_eq!(stats.by_location["CasinoB"], -50);
  }

  #[test]
  fn unlinked_hands_count_only_toward_total_profit() {
    let sessions = vec![session("s1", "Home", 1, 2)];
    let hands = vec![
      hand(Some("s1"), 30),
      hand(None, 70),
      hand(Some("missing"), 11),
    ];

    let stats = Stats::compute(&hands, &sessions);

    assert_eq!(stats.total_profit, 111);
    assert_eq!(stats.by_location["Home"], 30);
    assert_eq!(stats.by_stakes["$1/2"], 30);
  }

  #[test]
  fn handless_session_has_zero_profit_and_is_not_a_win() {
    let sessions = vec![session("s1", "Home", 2, 5)];

    let stats = Stats::compute(&[], &sessions);

    assert_eq!(stats.total_sessions, 1);
    assert_eq!(stats.win_rate, 0);
    assert_eq!(stats.by_stakes["$2/5"], 0);
    assert_eq!(stats.by_location["Home"], 0);
  }

  #[test]
  fn break_even_session_is_not_a_win() {
    let sessions = vec![session("s1", "Home", 1, 2)];
    let hands = vec![hand(Some("s1"), 40), hand(Some("s1"), -40)];

    let stats = Stats::compute(&hands, &sessions);

    assert_eq!(stats.win_rate, 0);
  }

  #[test]
  fn win_rate_rounds_down() {
    let sessions = vec![
      session("s1", "A", 1, 2),
      session("s2", "B", 1, 2),
      session("s3", "C", 1, 2),
    ];
    let hands = vec![hand(Some("s1"), 10)];

    let stats = Stats::compute(&hands, &sessions);

    // 1 of 3 wins: 33.33% floors to 33.
    assert_eq!(stats.win_rate, 33);
  }

  #[test]
  fn total_profit_splits_into_session_and_orphan_sums() {
    let sessions = vec![session("s1", "A", 1, 2), session("s2", "B", 2, 5)];
    let hands = vec![
      hand(Some("s1"), 100),
      hand(Some("s2"), -20),
      hand(None, 7),
      hand(None, -3),
    ];

    let stats = Stats::compute(&hands, &sessions);

    let session_sum: i64 = stats.by_location.values().sum();
    assert_eq!(session_sum, 80);
    assert_eq!(stats.total_profit, session_sum + 7 - 3);
  }

  #[test]
  fn stakes_label_format() {
    assert_eq!(stakes_label(1, 2), "$1/2");
    assert_eq!(stakes_label(25, 50), "$25/50");
  }
}
