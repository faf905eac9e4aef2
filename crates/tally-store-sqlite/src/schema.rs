//! SQL schema for the tally SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- Aggregate counters per feedback item. Rows are created lazily on first
-- read or first vote and are never deleted.
CREATE TABLE IF NOT EXISTS feedback_items (
    id          TEXT PRIMARY KEY,      -- caller-supplied opaque identifier
    likes       INTEGER NOT NULL DEFAULT 0,
    dislikes    INTEGER NOT NULL DEFAULT 0,
    created_at  TEXT NOT NULL,         -- ISO 8601 UTC; server-assigned
    updated_at  TEXT NOT NULL
);

-- One row per (item, session): the vote that session currently holds.
-- Deleted on toggle-off, updated in place on vote change.
CREATE TABLE IF NOT EXISTS user_votes (
    item_id     TEXT NOT NULL REFERENCES feedback_items(id),
    session_id  TEXT NOT NULL,
    vote_type   TEXT NOT NULL CHECK (vote_type IN ('like', 'dislike')),
    created_at  TEXT NOT NULL,
    UNIQUE (item_id, session_id)
);

CREATE INDEX IF NOT EXISTS user_votes_item_idx ON user_votes(item_id);

PRAGMA user_version = 1;
";
