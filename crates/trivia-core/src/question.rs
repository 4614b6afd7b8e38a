//! Question types.
//!
//! Questions are inserted whole and deleted by id. They are never updated in
//! place.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Error, Result, category::CategoryId};

/// Primary key of a [`Question`], generated by the store on insert.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize,
  Deserialize,
)]
#[serde(transparent)]
pub struct QuestionId(pub i64);

impl fmt::Display for QuestionId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

/// A stored question. Serialises to the formatted shape returned by every
/// listing endpoint: `{id, question, answer, category, difficulty}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
  pub id:         QuestionId,
  pub question:   String,
  pub answer:     String,
  pub category:   CategoryId,
  pub difficulty: i64,
}

// ─── NewQuestion ─────────────────────────────────────────────────────────────

/// Input to [`crate::store::TriviaStore::add_question`].
/// The id is always assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestion {
  pub question:   String,
  pub answer:     String,
  pub category:   CategoryId,
  pub difficulty: i64,
}

impl NewQuestion {
  /// Build a new question, rejecting blank question or answer text.
  pub fn new(
    question: impl Into<String>,
    answer: impl Into<String>,
    category: CategoryId,
    difficulty: i64,
  ) -> Result<Self> {
    let question = question.into();
    let answer = answer.into();
    if question.trim().is_empty() {
      return Err(Error::EmptyField("question"));
    }
    if answer.trim().is_empty() {
      return Err(Error::EmptyField("answer"));
    }
    Ok(Self { question, answer, category, difficulty })
  }
}
