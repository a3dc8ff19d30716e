//! SQL schema for the felt SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS sessions (
    id              TEXT PRIMARY KEY,
    location        TEXT,
    date            TEXT,            -- free text, sorted lexically
    small_blind     INTEGER,
    big_blind       INTEGER,
    currency        TEXT,
    effective_stack INTEGER,
    table_size      INTEGER DEFAULT 6,
    tag             TEXT,
    created_at      TEXT NOT NULL,   -- ISO 8601 UTC; server-assigned
    updated_at      TEXT NOT NULL
);

-- A NULL session_id is a supported state (an unlinked hand); a non-NULL one
-- must reference a session, and deleting the session deletes its hands.
CREATE TABLE IF NOT EXISTS hands (
    id            TEXT PRIMARY KEY,
    session_id    TEXT REFERENCES sessions(id) ON DELETE CASCADE,
    position      TEXT,
    hole_cards    TEXT,
    board         TEXT,
    details       TEXT,
    note          TEXT,
    result_amount INTEGER DEFAULT 0,
    date          TEXT,
    villains      TEXT DEFAULT '[]', -- JSON array of villain records
    analysis      TEXT,
    analysis_date TEXT,
    is_favorite   INTEGER DEFAULT 0,
    tag           TEXT,
    created_at    TEXT NOT NULL,
    updated_at    TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_sessions_date     ON sessions(date);
CREATE INDEX IF NOT EXISTS idx_hands_session_id  ON hands(session_id);
CREATE INDEX IF NOT EXISTS idx_hands_is_favorite ON hands(is_favorite);

PRAGMA user_version = 1;
";
