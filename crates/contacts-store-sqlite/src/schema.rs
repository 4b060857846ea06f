//! SQL schema for the contacts SQLite store.
//!
//! Executed once at connection startup. `PRAGMA user_version` records the
//! layout so later revisions can detect older files.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- AUTOINCREMENT keeps ids strictly increasing and never reused.
-- The UNIQUE email constraint is the authoritative uniqueness guarantee.
CREATE TABLE IF NOT EXISTS contacts (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT NOT NULL,
    email       TEXT NOT NULL UNIQUE,
    phone       TEXT NOT NULL DEFAULT '',
    address     TEXT,
    created_at  TEXT NOT NULL,   -- RFC 3339 UTC; set once on insert
    updated_at  TEXT NOT NULL    -- RFC 3339 UTC; refreshed on every write
);

CREATE INDEX IF NOT EXISTS contacts_name_idx ON contacts(name);

PRAGMA user_version = 1;
";
