//! Error types for `trivia-core`.

use thiserror::Error;

use crate::category::CategoryId;

#[derive(Debug, Error)]
pub enum Error {
  #[error("question field `{0}` must not be empty")]
  EmptyField(&'static str),

  #[error("category not found: {0}")]
  UnknownCategory(CategoryId),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
