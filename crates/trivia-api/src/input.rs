//! Lenient request-body field types shared by the handlers.

use serde::Deserialize;

use crate::error::ApiError;

/// An integer that clients may send either as a JSON number or as a string
/// holding a number (`4` and `"4"` are both accepted).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum IntField {
  Int(i64),
  Text(String),
}

impl IntField {
  /// The integer value, or `None` for a blank or non-numeric string.
  pub fn parse(&self) -> Option<i64> {
    match self {
      IntField::Int(n) => Some(*n),
      IntField::Text(s) => s.trim().parse().ok(),
    }
  }
}

/// Unwrap a body field that must be present.
pub fn required<T>(value: Option<T>, field: &str) -> Result<T, ApiError> {
  value.ok_or_else(|| ApiError::Unprocessable(format!("`{field}` is required")))
}

/// Unwrap a body field that must be present and hold an integer.
pub fn required_int(value: Option<&IntField>, field: &str) -> Result<i64, ApiError> {
  required(value, field)?
    .parse()
    .ok_or_else(|| ApiError::Unprocessable(format!("`{field}` must be an integer")))
}
