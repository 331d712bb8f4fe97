//! SQL schema for the Atrium SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- One row per record of any kind. The payload is the full camelCase JSON
-- serialisation of the record; kind, status and created_at are copied out
-- for indexing and ordering.
CREATE TABLE IF NOT EXISTS records (
    id          TEXT NOT NULL,
    kind        TEXT NOT NULL,   -- 'contact' | 'career' | 'subscriber'
    status      TEXT NOT NULL,
    created_at  TEXT NOT NULL,   -- ISO 8601 UTC; server-assigned
    payload     TEXT NOT NULL,
    PRIMARY KEY (kind, id)
);

CREATE TABLE IF NOT EXISTS resumes (
    application_id TEXT PRIMARY KEY,
    file_name      TEXT    NOT NULL,
    content_type   TEXT    NOT NULL,
    size           INTEGER NOT NULL,
    content_hash   TEXT    NOT NULL,
    data           BLOB    NOT NULL
);

CREATE INDEX IF NOT EXISTS records_kind_created_idx ON records(kind, created_at);

PRAGMA user_version = 1;
";
