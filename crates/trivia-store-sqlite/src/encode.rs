//! Conversions between SQLite rows and domain types.
//!
//! Ids are stored as plain `INTEGER` columns. Search runs through the
//! [`CONTAINS_FN`] scalar function rather than `LIKE`, whose case folding
//! only covers ASCII.

use rusqlite::functions::FunctionFlags;
use trivia_core::{
  category::{Category, CategoryId},
  question::{Question, QuestionId},
};

/// Column list matching [`question_from_row`].
pub const QUESTION_COLUMNS: &str = "id, question, answer, category, difficulty";

/// Column list matching [`category_from_row`].
pub const CATEGORY_COLUMNS: &str = "id, type";

pub fn question_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Question> {
  Ok(Question {
    id:         QuestionId(row.get(0)?),
    question:   row.get(1)?,
    answer:     row.get(2)?,
    category:   CategoryId(row.get(3)?),
    difficulty: row.get(4)?,
  })
}

pub fn category_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Category> {
  Ok(Category {
    id:   CategoryId(row.get(0)?),
    kind: row.get(1)?,
  })
}

/// Name of the scalar SQL function wrapping [`contains_ignore_case`].
pub const CONTAINS_FN: &str = "contains_ci";

/// Unicode-aware, case-insensitive literal substring test.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
  haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Register [`CONTAINS_FN`] on `conn`. A NULL argument never matches.
pub fn register_functions(conn: &rusqlite::Connection) -> rusqlite::Result<()> {
  conn.create_scalar_function(
    CONTAINS_FN,
    2,
    FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
    |ctx| {
      let haystack: Option<String> = ctx.get(0)?;
      let needle: Option<String> = ctx.get(1)?;
      Ok(match (haystack, needle) {
        (Some(h), Some(n)) => contains_ignore_case(&h, &n),
        _ => false,
      })
    },
  )
}
