//! The `TriviaStore` trait and supporting query types.
//!
//! The trait is implemented by storage backends (e.g. `trivia-store-sqlite`).
//! The API crate depends on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::{
  category::{Category, CategoryId},
  question::{NewQuestion, Question, QuestionId},
};

// ─── Query type ──────────────────────────────────────────────────────────────

/// Parameters for [`TriviaStore::list_questions`].
///
/// Both filters are optional and combine with AND. An empty filter selects
/// every question.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionFilter {
  /// Restrict to questions in this category.
  pub category: Option<CategoryId>,
  /// Case-insensitive substring match against the question text. The term is
  /// matched literally; SQL wildcards in it carry no special meaning.
  pub search:   Option<String>,
}

impl QuestionFilter {
  pub fn all() -> Self { Self::default() }

  pub fn in_category(category: CategoryId) -> Self {
    Self { category: Some(category), search: None }
  }

  pub fn matching(term: impl Into<String>) -> Self {
    Self { category: None, search: Some(term.into()) }
  }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a trivia store backend.
///
/// Every listing returns rows in ascending id order.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait TriviaStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Categories ────────────────────────────────────────────────────────

  /// Create and persist a category. Not reachable over HTTP; used for
  /// seeding.
  fn add_category(
    &self,
    kind: String,
  ) -> impl Future<Output = Result<Category, Self::Error>> + Send + '_;

  /// List every category.
  fn list_categories(
    &self,
  ) -> impl Future<Output = Result<Vec<Category>, Self::Error>> + Send + '_;

  /// Retrieve a category by id. Returns `None` if not found.
  fn get_category(
    &self,
    id: CategoryId,
  ) -> impl Future<Output = Result<Option<Category>, Self::Error>> + Send + '_;

  /// Retrieve the lowest-id category whose type equals `kind` exactly.
  fn find_category_by_type<'a>(
    &'a self,
    kind: &'a str,
  ) -> impl Future<Output = Result<Option<Category>, Self::Error>> + Send + 'a;

  // ── Questions ─────────────────────────────────────────────────────────

  /// Insert a question and return it with its generated id.
  ///
  /// Returns an error if `input.category` does not reference an existing
  /// category.
  fn add_question(
    &self,
    input: NewQuestion,
  ) -> impl Future<Output = Result<Question, Self::Error>> + Send + '_;

  /// Retrieve a question by id. Returns `None` if not found.
  fn get_question(
    &self,
    id: QuestionId,
  ) -> impl Future<Output = Result<Option<Question>, Self::Error>> + Send + '_;

  /// Return every question matching `filter`.
  fn list_questions<'a>(
    &'a self,
    filter: &'a QuestionFilter,
  ) -> impl Future<Output = Result<Vec<Question>, Self::Error>> + Send + 'a;

  /// Permanently delete a question. Returns `false` if no row had that id.
  fn delete_question(
    &self,
    id: QuestionId,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}
