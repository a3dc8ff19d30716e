//! Integration tests for `SqliteStore` against an in-memory database.

use felt_core::{
  hand::{HandUpdate, NewHand, Villain},
  session::{NewSession, SessionUpdate},
  store::TrackerStore,
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn session_input(id: &str, location: &str, date: &str) -> NewSession {
  NewSession {
    id: id.into(),
    location: location.into(),
    date: date.into(),
    small_blind: 1,
    big_blind: 2,
    currency: "USD".into(),
    effective_stack: 200,
    ..NewSession::default()
  }
}

fn hand_input(session_id: &str, result: i64) -> NewHand {
  NewHand {
    session_id: session_id.into(),
    details: "UTG opens, hero 3-bets from the button".into(),
    result,
    ..NewHand::default()
  }
}

// ─── Sessions ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_session_generates_id_when_missing() {
  let s = store().await;

  let session = s
    .create_session(session_input("", "CasinoA", "2024-03-01"))
    .await
    .unwrap();
  assert!(!session.id.is_empty());

  let fetched = s.get_session(&session.id).await.unwrap().unwrap();
  assert_eq!(fetched, session);
}

#[tokio::test]
async fn create_session_preserves_client_id() {
  let s = store().await;

  let session = s
    .create_session(session_input("client-id-1", "Home", "2024-03-01"))
    .await
    .unwrap();
  assert_eq!(session.id, "client-id-1");
}

#[tokio::test]
async fn get_session_missing_returns_none() {
  let s = store().await;
  assert!(s.get_session("nope").await.unwrap().is_none());
}

#[tokio::test]
async fn list_sessions_newest_date_first() {
  let s = store().await;
  s.create_session(session_input("s1", "A", "2024-01-15"))
    .await
    .unwrap();
  s.create_session(session_input("s2", "B", "2024-02-01"))
    .await
    .unwrap();

  let all = s.list_sessions().await.unwrap();
  assert_eq!(all.len(), 2);
  assert_eq!(all[0].id, "s2");
  assert_eq!(all[1].id, "s1");
}

#[tokio::test]
async fn update_session_overwrites_all_fields() {
  let s = store().await;
  s.create_session(session_input("s1", "A", "2024-01-15"))
    .await
    .unwrap();

  let updated = s
    .update_session("s1", SessionUpdate {
      location:        "B".into(),
      date:            "2024-01-16".into(),
      small_blind:     2,
      big_blind:       5,
      currency:        "EUR".into(),
      effective_stack: 500,
      table_size:      9,
      tag:             "deep".into(),
    })
    .await
    .unwrap()
    .unwrap();

  assert_eq!(updated.location, "B");
  assert_eq!(updated.small_blind, 2);
  assert_eq!(updated.big_blind, 5);
  assert_eq!(updated.table_size, 9);
  assert_eq!(updated.tag, "deep");
}

#[tokio::test]
async fn update_missing_session_returns_none() {
  let s = store().await;
  let result = s
    .update_session("ghost", SessionUpdate::default())
    .await
    .unwrap();
  assert!(result.is_none());
}

#[tokio::test]
async fn delete_session_returns_false_when_missing() {
  let s = store().await;
  assert!(!s.delete_session("ghost").await.unwrap());
}

#[tokio::test]
async fn delete_session_cascades_to_its_hands() {
  let s = store().await;
  s.create_session(session_input("s1", "A", "2024-01-01"))
    .await
    .unwrap();
  s.create_session(session_input("s2", "B", "2024-01-02"))
    .await
    .unwrap();
  s.create_hand(hand_input("s1", 100)).await.unwrap();
  s.create_hand(hand_input("s1", -20)).await.unwrap();
  let kept = s.create_hand(hand_input("s2", 50)).await.unwrap();
  let orphan = s.create_hand(hand_input("", 7)).await.unwrap();

  assert!(s.delete_session("s1").await.unwrap());

  let remaining = s.list_hands(None).await.unwrap();
  let ids: Vec<_> = remaining.iter().map(|h| h.id.as_str()).collect();
  assert_eq!(remaining.len(), 2);
  assert!(ids.contains(&kept.id.as_str()));
  assert!(ids.contains(&orphan.id.as_str()));
}

// ─── Hands ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_hand_round_trips_villains_in_order() {
  let s = store().await;

  let mut input = hand_input("", 40);
  input.villains = vec![
    Villain {
      id:         "v1".into(),
      hole_cards: "AhKs".into(),
      position:   "BTN".into(),
    },
    Villain {
      id:         "v2".into(),
      hole_cards: "7c7d".into(),
      position:   "BB".into(),
    },
  ];

  let hand = s.create_hand(input.clone()).await.unwrap();
  let fetched = s.get_hand(&hand.id).await.unwrap().unwrap();

  assert_eq!(fetched.villains, input.villains);
}

#[tokio::test]
async fn create_hand_defaults_coalesce_to_zero_values() {
  let s = store().await;

  let hand = s.create_hand(NewHand::default()).await.unwrap();
  let fetched = s.get_hand(&hand.id).await.unwrap().unwrap();

  assert_eq!(fetched.session_id, "");
  assert_eq!(fetched.position, "");
  assert_eq!(fetched.result, 0);
  assert_eq!(fetched.analysis, "");
  assert_eq!(fetched.analysis_date, "");
  assert!(fetched.villains.is_empty());
  assert!(!fetched.favorite);
}

#[tokio::test]
async fn hand_with_unknown_session_is_rejected() {
  let s = store().await;
  let result = s.create_hand(hand_input("no-such-session", 10)).await;
  assert!(result.is_err());
}

#[tokio::test]
async fn list_hands_filtered_by_session() {
  let s = store().await;
  s.create_session(session_input("s1", "A", "2024-01-01"))
    .await
    .unwrap();
  s.create_session(session_input("s2", "B", "2024-01-02"))
    .await
    .unwrap();
  s.create_hand(hand_input("s1", 10)).await.unwrap();
  s.create_hand(hand_input("s1", 20)).await.unwrap();
  s.create_hand(hand_input("s2", 30)).await.unwrap();
  s.create_hand(hand_input("", 40)).await.unwrap();

  let all = s.list_hands(None).await.unwrap();
  assert_eq!(all.len(), 4);

  let linked = s.list_hands(Some("s1")).await.unwrap();
  assert_eq!(linked.len(), 2);
  assert!(linked.iter().all(|h| h.session_id == "s1"));
}

#[tokio::test]
async fn update_hand_overwrites_fields_but_not_the_link() {
  let s = store().await;
  s.create_session(session_input("s1", "A", "2024-01-01"))
    .await
    .unwrap();
  let hand = s.create_hand(hand_input("s1", 10)).await.unwrap();

  let updated = s
    .update_hand(&hand.id, HandUpdate {
      position:   "CO".into(),
      hole_cards: "QsQh".into(),
      board:      "2c 7d Jh".into(),
      details:    "flatted a 3-bet out of position".into(),
      note:       "review sizing".into(),
      result:     -150,
      date:       "2024-01-01".into(),
      tag:        "bluff-catch".into(),
      villains:   vec![Villain {
        id:         "v1".into(),
        hole_cards: "".into(),
        position:   "SB".into(),
      }],
      analysis:   "kept notes".into(),
      favorite:   true,
    })
    .await
    .unwrap()
    .unwrap();

  assert_eq!(updated.session_id, "s1");
  assert_eq!(updated.position, "CO");
  assert_eq!(updated.result, -150);
  assert_eq!(updated.villains.len(), 1);
  assert!(updated.favorite);
  // The analysis timestamp is owned by the analysis operation.
  assert_eq!(updated.analysis_date, "");
}

#[tokio::test]
async fn update_missing_hand_returns_none() {
  let s = store().await;
  let result = s.update_hand("ghost", HandUpdate::default()).await.unwrap();
  assert!(result.is_none());
}

#[tokio::test]
async fn delete_hand_removes_it() {
  let s = store().await;
  let hand = s.create_hand(hand_input("", 5)).await.unwrap();

  assert!(s.delete_hand(&hand.id).await.unwrap());
  assert!(s.get_hand(&hand.id).await.unwrap().is_none());
  assert!(!s.delete_hand(&hand.id).await.unwrap());
}

#[tokio::test]
async fn malformed_villains_column_decodes_as_empty_list() {
  let s = store().await;
  s.execute_raw(
    r#"INSERT INTO hands (id, villains, created_at, updated_at)
       VALUES ('bad-villains', '[{"id": trunc', '2024-01-01T00:00:00+00:00',
               '2024-01-01T00:00:00+00:00')"#,
  )
  .await
  .unwrap();

  let hand = s.get_hand("bad-villains").await.unwrap().unwrap();
  assert!(hand.villains.is_empty());

  // Bulk reads tolerate it the same way.
  let all = s.list_hands(None).await.unwrap();
  assert_eq!(all.len(), 1);
  assert!(all[0].villains.is_empty());
}

// ─── Favorite toggle ─────────────────────────────────────────────────────────

#[tokio::test]
async fn toggle_favorite_returns_the_new_value_each_time() {
  let s = store().await;
  let hand = s.create_hand(hand_input("", 10)).await.unwrap();
  assert!(!hand.favorite);

  let first = s.toggle_favorite(&hand.id).await.unwrap().unwrap();
  assert!(first);

  let second = s.toggle_favorite(&hand.id).await.unwrap().unwrap();
  assert!(!second);

  let fetched = s.get_hand(&hand.id).await.unwrap().unwrap();
  assert!(!fetched.favorite);
}

#[tokio::test]
async fn toggle_favorite_missing_returns_none() {
  let s = store().await;
  assert!(s.toggle_favorite("ghost").await.unwrap().is_none());
}

// ─── Analysis write-back ─────────────────────────────────────────────────────

#[tokio::test]
async fn record_analysis_writes_only_the_two_fields() {
  let s = store().await;
  let hand = s.create_hand(hand_input("", 80)).await.unwrap();
  let analyzed_at = chrono::Utc::now();

  assert!(
    s.record_analysis(&hand.id, "well played", analyzed_at)
      .await
      .unwrap()
  );

  let fetched = s.get_hand(&hand.id).await.unwrap().unwrap();
  assert_eq!(fetched.analysis, "well played");
  assert_eq!(fetched.analysis_date, analyzed_at.to_rfc3339());
  assert_eq!(fetched.details, hand.details);
  assert_eq!(fetched.result, hand.result);
}

#[tokio::test]
async fn record_analysis_missing_returns_false() {
  let s = store().await;
  let recorded = s
    .record_analysis("ghost", "text", chrono::Utc::now())
    .await
    .unwrap();
  assert!(!recorded);
}

// ─── Stats ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn stats_empty_store_is_all_zero() {
  let s = store().await;
  let stats = s.stats().await.unwrap();
  assert_eq!(stats, felt_core::stats::Stats::default());
}

#[tokio::test]
async fn stats_buckets_by_stakes_and_location() {
  let s = store().await;
  s.create_session(session_input("s1", "CasinoA", "2024-01-01"))
    .await
    .unwrap();
  s.create_session(session_input("s2", "CasinoB", "2024-01-02"))
    .await
    .unwrap();
  s.create_hand(hand_input("s1", 100)).await.unwrap();
  s.create_hand(hand_input("s2", -50)).await.unwrap();

  let stats = s.stats().await.unwrap();

  assert_eq!(stats.total_profit, 50);
  assert_eq!(stats.total_sessions, 2);
  assert_eq!(stats.win_rate, 50);
  assert_eq!(stats.by_stakes["$1/2"], 50);
  assert_eq!(stats.by_location["CasinoA"], 100);
  assert_eq!(stats.by_location["CasinoB"], -50);
}

#[tokio::test]
async fn stats_counts_unlinked_hands_toward_total_only() {
  let s = store().await;
  s.create_session(session_input("s1", "Home", "2024-01-01"))
    .await
    .unwrap();
  s.create_hand(hand_input("s1", 30)).await.unwrap();
  s.create_hand(hand_input("", 70)).await.unwrap();

  let stats = s.stats().await.unwrap();

  assert_eq!(stats.total_profit, 100);
  assert_eq!(stats.by_location["Home"], 30);
}
