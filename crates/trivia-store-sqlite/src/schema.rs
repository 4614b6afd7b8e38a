//! SQL schema for the trivia SQLite store.
//!
//! Executed once at connection startup.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS categories (
    id    INTEGER PRIMARY KEY,
    type  TEXT NOT NULL
);

-- Rows are inserted whole and deleted by id; never updated.
-- AUTOINCREMENT keeps ids of deleted questions from being reissued.
CREATE TABLE IF NOT EXISTS questions (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    question    TEXT    NOT NULL,
    answer      TEXT    NOT NULL,
    category    INTEGER NOT NULL REFERENCES categories(id),
    difficulty  INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS questions_category_idx ON questions(category);
";
