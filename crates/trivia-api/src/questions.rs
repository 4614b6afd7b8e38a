//! Handlers for `/questions` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/questions` | Optional `?page=N` and `?category=<type>` |
//! | `POST`   | `/questions` | Body: [`CreateBody`] |
//! | `DELETE` | `/questions/{id}` | 404 if not found |
//! | `POST`   | `/questions/search` | Body: `{"searchTerm":"..."}`; optional `?page=N` |

use std::sync::Arc;

use axum::{
  Json,
  extract::{
    Path, Query, State,
    rejection::{JsonRejection, PathRejection},
  },
};
use serde::{Deserialize, Serialize};
use trivia_core::{
  category::{CategoryId, CategoryMap, category_map},
  pagination::{paginate, parse_page},
  question::{NewQuestion, Question, QuestionId},
  store::{QuestionFilter, TriviaStore},
};

use crate::{
  error::ApiError,
  input::{IntField, required, required_int},
};

// ─── Responses ────────────────────────────────────────────────────────────────

/// One page of questions plus the context the listing views need.
#[derive(Debug, Serialize)]
pub struct QuestionPage {
  pub success:          bool,
  pub questions:        Vec<Question>,
  pub total_questions:  usize,
  pub current_category: Option<String>,
  pub categories:       CategoryMap,
}

#[derive(Debug, Serialize)]
pub struct Created {
  pub success: bool,
  pub message: &'static str,
  pub created: QuestionId,
}

#[derive(Debug, Serialize)]
pub struct Deleted {
  pub success: bool,
  pub message: &'static str,
  pub deleted: QuestionId,
}

/// Fetch everything matching `filter`, cut out page `page`, and wrap it with
/// the category map. An empty page is a 404.
async fn question_page<S>(
  store: &S,
  filter: &QuestionFilter,
  page: u32,
  current_category: Option<String>,
) -> Result<QuestionPage, ApiError>
where
  S: TriviaStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let questions = store
    .list_questions(filter)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  let current = paginate(&questions, page);
  if current.is_empty() {
    return Err(ApiError::NotFound(format!(
      "page {page} of {} questions is empty",
      questions.len()
    )));
  }
  let current = current.to_vec();

  let categories = store
    .list_categories()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  Ok(QuestionPage {
    success: true,
    questions: current,
    total_questions: questions.len(),
    current_category,
    categories: category_map(&categories),
  })
}

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Default)]
pub struct ListParams {
  /// 1-indexed page; non-numeric values fall back to 1.
  pub page:     Option<String>,
  /// Category type name. `all`, `null` or empty means no filter.
  pub category: Option<String>,
}

/// `GET /questions[?page=N][&category=<type>]`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<QuestionPage>, ApiError>
where
  S: TriviaStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let page = parse_page(params.page.as_deref());

  let (filter, current_category) = match params.category.as_deref().map(str::trim) {
    None | Some("" | "all" | "null") => (QuestionFilter::all(), None),
    Some(name) => {
      let category = store
        .find_category_by_type(name)
        .await
        .map_err(|e| ApiError::Store(Box::new(e)))?
        .ok_or_else(|| ApiError::NotFound(format!("category {name:?} not found")))?;
      (QuestionFilter::in_category(category.id), Some(category.kind))
    }
  };

  let body = question_page(store.as_ref(), &filter, page, current_category).await?;
  Ok(Json(body))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /questions`. Every field is required.
#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub question:   Option<String>,
  pub answer:     Option<String>,
  pub difficulty: Option<IntField>,
  pub category:   Option<IntField>,
}

/// `POST /questions` — validates the body and the category reference, then
/// inserts.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  body: Result<Json<CreateBody>, JsonRejection>,
) -> Result<Json<Created>, ApiError>
where
  S: TriviaStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let Json(body) = body?;

  let question = required(body.question, "question")?;
  let answer = required(body.answer, "answer")?;
  let difficulty = required_int(body.difficulty.as_ref(), "difficulty")?;
  let category = CategoryId(required_int(body.category.as_ref(), "category")?);

  let input = NewQuestion::new(question, answer, category, difficulty)
    .map_err(|e| ApiError::Unprocessable(e.to_string()))?;

  store
    .get_category(category)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::Unprocessable(format!("category {category} does not exist")))?;

  let stored = store
    .add_question(input)
    .await
    .map_err(|e| ApiError::Unprocessable(format!("insert failed: {e}")))?;

  tracing::info!(id = %stored.id, category = %stored.category, "question created");

  Ok(Json(Created {
    success: true,
    message: "Question is added successfully",
    created: stored.id,
  }))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /questions/{id}`
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Deleted>, ApiError>
where
  S: TriviaStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let Path(id) = id?;
  let id = QuestionId(id);

  let deleted = store
    .delete_question(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  if !deleted {
    return Err(ApiError::NotFound(format!("question {id} not found")));
  }

  tracing::info!(%id, "question deleted");

  Ok(Json(Deleted {
    success: true,
    message: "Your Question is deleted Successfully",
    deleted: id,
  }))
}

// ─── Search ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Default)]
pub struct PageParams {
  pub page: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchBody {
  #[serde(rename = "searchTerm", alias = "search_term")]
  pub search_term: Option<String>,
}

/// `POST /questions/search[?page=N]` — body: `{"searchTerm":"..."}`
pub async fn search<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<PageParams>,
  body: Result<Json<SearchBody>, JsonRejection>,
) -> Result<Json<QuestionPage>, ApiError>
where
  S: TriviaStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let Json(body) = body?;
  let term = required(body.search_term, "searchTerm")?;
  if term.trim().is_empty() {
    return Err(ApiError::Unprocessable("search term is empty".to_owned()));
  }

  let page = parse_page(params.page.as_deref());
  let filter = QuestionFilter::matching(term);

  let body = question_page(store.as_ref(), &filter, page, None).await?;
  Ok(Json(body))
}
