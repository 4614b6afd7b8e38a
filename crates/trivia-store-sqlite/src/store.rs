//! [`SqliteStore`] — the SQLite implementation of [`TriviaStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;

use trivia_core::{
  category::{Category, CategoryId},
  question::{NewQuestion, Question, QuestionId},
  store::{QuestionFilter, TriviaStore},
};

use crate::{
  Error, Result,
  encode::{
    CATEGORY_COLUMNS, CONTAINS_FN, QUESTION_COLUMNS, category_from_row,
    question_from_row, register_functions,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A trivia store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        register_functions(conn)?;
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Insert each of `kinds` as a category, but only when the categories
  /// table is empty. Returns the number of rows inserted.
  pub async fn seed_categories(&self, kinds: &[&str]) -> Result<usize> {
    let kinds: Vec<String> = kinds.iter().map(|k| (*k).to_owned()).collect();

    let inserted = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let existing: i64 =
          tx.query_row("SELECT COUNT(*) FROM categories", [], |r| r.get(0))?;
        if existing > 0 {
          return Ok(0);
        }
        for kind in &kinds {
          tx.execute(
            "INSERT INTO categories (type) VALUES (?1)",
            rusqlite::params![kind],
          )?;
        }
        tx.commit()?;
        Ok(kinds.len())
      })
      .await?;

    Ok(inserted)
  }

  /// Close the underlying connection, flushing any pending work.
  pub async fn close(self) -> Result<()> {
    self.conn.close().await?;
    Ok(())
  }
}

// ─── TriviaStore impl ────────────────────────────────────────────────────────

impl TriviaStore for SqliteStore {
  type Error = Error;

  // ── Categories ────────────────────────────────────────────────────────────

  async fn add_category(&self, kind: String) -> Result<Category> {
    let row_kind = kind.clone();
    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO categories (type) VALUES (?1)",
          rusqlite::params![row_kind],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(Category { id: CategoryId(id), kind })
  }

  async fn list_categories(&self) -> Result<Vec<Category>> {
    let categories = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {CATEGORY_COLUMNS} FROM categories ORDER BY id"
        ))?;
        let rows = stmt
          .query_map([], category_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(categories)
  }

  async fn get_category(&self, id: CategoryId) -> Result<Option<Category>> {
    let category = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {CATEGORY_COLUMNS} FROM categories WHERE id = ?1"),
              rusqlite::params![id.0],
              category_from_row,
            )
            .optional()?,
        )
      })
      .await?;

    Ok(category)
  }

  async fn find_category_by_type(&self, kind: &str) -> Result<Option<Category>> {
    let kind = kind.to_owned();

    let category = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {CATEGORY_COLUMNS} FROM categories
                 WHERE type = ?1 ORDER BY id LIMIT 1"
              ),
              rusqlite::params![kind],
              category_from_row,
            )
            .optional()?,
        )
      })
      .await?;

    Ok(category)
  }

  // ── Questions ─────────────────────────────────────────────────────────────

  async fn add_question(&self, input: NewQuestion) -> Result<Question> {
    let category = input.category;
    let row = input.clone();

    // `None` means the referenced category does not exist.
    let id: Option<i64> = self
      .conn
      .call(move |conn| {
        let known: bool = conn
          .query_row(
            "SELECT 1 FROM categories WHERE id = ?1",
            rusqlite::params![row.category.0],
            |_| Ok(true),
          )
          .optional()?
          .unwrap_or(false);

        if !known {
          return Ok(None);
        }

        conn.execute(
          "INSERT INTO questions (question, answer, category, difficulty)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![
            row.question,
            row.answer,
            row.category.0,
            row.difficulty,
          ],
        )?;
        Ok(Some(conn.last_insert_rowid()))
      })
      .await?;

    let id = id.ok_or(trivia_core::Error::UnknownCategory(category))?;

    Ok(Question {
      id:         QuestionId(id),
      question:   input.question,
      answer:     input.answer,
      category:   input.category,
      difficulty: input.difficulty,
    })
  }

  async fn get_question(&self, id: QuestionId) -> Result<Option<Question>> {
    let question = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {QUESTION_COLUMNS} FROM questions WHERE id = ?1"),
              rusqlite::params![id.0],
              question_from_row,
            )
            .optional()?,
        )
      })
      .await?;

    Ok(question)
  }

  async fn list_questions(&self, filter: &QuestionFilter) -> Result<Vec<Question>> {
    let category = filter.category.map(|c| c.0);
    let term = filter.search.clone();

    let questions = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {QUESTION_COLUMNS} FROM questions
           WHERE (?1 IS NULL OR category = ?1)
             AND (?2 IS NULL OR {CONTAINS_FN}(question, ?2))
           ORDER BY id"
        ))?;
        let rows = stmt
          .query_map(
            rusqlite::params![category, term.as_deref()],
            question_from_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(questions)
  }

  async fn delete_question(&self, id: QuestionId) -> Result<bool> {
    let deleted = self
      .conn
      .call(move |conn| {
        let n = conn.execute(
          "DELETE FROM questions WHERE id = ?1",
          rusqlite::params![id.0],
        )?;
        Ok(n > 0)
      })
      .await?;

    Ok(deleted)
  }
}
