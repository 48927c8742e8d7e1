//! SQL schema for the roster SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS people (
    person_id  TEXT PRIMARY KEY,
    name       TEXT NOT NULL,
    name_key   TEXT NOT NULL UNIQUE   -- trimmed, lower-cased name
);

-- Duty records are append-mostly. The only UPDATE ever issued sets end_date
-- on a record whose end_date is still NULL.
CREATE TABLE IF NOT EXISTS duties (
    record_id   TEXT PRIMARY KEY,
    person_id   TEXT NOT NULL REFERENCES people(person_id),
    rank        TEXT NOT NULL,
    title       TEXT NOT NULL,
    start_date  TEXT NOT NULL,   -- YYYY-MM-DD
    end_date    TEXT,            -- YYYY-MM-DD, NULL while in effect
    UNIQUE (person_id, rank, title, start_date)
);

-- At most one open duty per person.
CREATE UNIQUE INDEX IF NOT EXISTS duties_one_open_idx
    ON duties(person_id) WHERE end_date IS NULL;

CREATE INDEX IF NOT EXISTS duties_person_start_idx
    ON duties(person_id, start_date);

-- Denormalised current status; one row per person, rebuilt from duties.
CREATE TABLE IF NOT EXISTS status_snapshots (
    person_id          TEXT PRIMARY KEY REFERENCES people(person_id),
    current_rank       TEXT NOT NULL,
    current_title      TEXT NOT NULL,
    career_start_date  TEXT NOT NULL,
    career_end_date    TEXT
);

PRAGMA user_version = 1;
";
