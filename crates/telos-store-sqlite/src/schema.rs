//! SQL schema for the telos SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS users (
    user_id           TEXT PRIMARY KEY,
    username          TEXT NOT NULL UNIQUE,
    email             TEXT,
    profile_photo_url TEXT,
    created_at        TEXT NOT NULL    -- ISO 8601 UTC
);

CREATE TABLE IF NOT EXISTS categories (
    category_id TEXT PRIMARY KEY,
    owner_id    TEXT NOT NULL REFERENCES users(user_id),
    name        TEXT NOT NULL,
    color       TEXT NOT NULL,       -- opaque semantic style token
    order_index INTEGER NOT NULL DEFAULT 0
);

-- No FK on category_id: rows imported from old backups may reference
-- categories that no longer exist, and such goals must stay readable.
CREATE TABLE IF NOT EXISTS goals (
    goal_id      TEXT PRIMARY KEY,
    owner_id     TEXT NOT NULL REFERENCES users(user_id),
    category_id  TEXT NOT NULL,
    year         INTEGER NOT NULL,
    emoji        TEXT NOT NULL,
    title        TEXT NOT NULL,
    description  TEXT,
    kind         TEXT NOT NULL,      -- 'NUMERIC' | 'BOOLEAN'
    target_value REAL,
    unit         TEXT,
    order_index  INTEGER NOT NULL DEFAULT 0
);

-- One row per (owner, goal, year, month) cell; writes are natural-key
-- upserts. No FK on goal_id: deleting a goal keeps its records as history.
CREATE TABLE IF NOT EXISTS monthly_records (
    record_id     TEXT PRIMARY KEY,
    owner_id      TEXT NOT NULL REFERENCES users(user_id),
    goal_id       TEXT NOT NULL,
    year          INTEGER NOT NULL,
    month         INTEGER NOT NULL,  -- 1-12
    numeric_value REAL,
    status        TEXT,              -- 'SUCCESS' | 'FAIL' | 'HOLD'
    achieved      INTEGER,           -- deprecated two-state flag; legacy rows only
    UNIQUE (owner_id, goal_id, year, month)
);

CREATE TABLE IF NOT EXISTS retrospectives (
    retrospective_id TEXT PRIMARY KEY,
    owner_id         TEXT NOT NULL REFERENCES users(user_id),
    year             INTEGER NOT NULL,
    month            INTEGER NOT NULL,
    content          TEXT NOT NULL,
    UNIQUE (owner_id, year, month)
);

CREATE TABLE IF NOT EXISTS resolutions (
    resolution_id TEXT PRIMARY KEY,
    owner_id      TEXT NOT NULL REFERENCES users(user_id),
    year          INTEGER NOT NULL,
    content       TEXT NOT NULL,
    UNIQUE (owner_id, year)
);

CREATE TABLE IF NOT EXISTS feedback (
    feedback_id TEXT PRIMARY KEY,
    email       TEXT NOT NULL,
    message     TEXT NOT NULL,
    created_at  TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS goals_owner_year_idx   ON goals(owner_id, year);
CREATE INDEX IF NOT EXISTS records_owner_year_idx ON monthly_records(owner_id, year);

PRAGMA user_version = 1;
";
