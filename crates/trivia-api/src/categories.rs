//! Handlers for `/categories` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/categories` | 404 if the store holds no categories |
//! | `GET`  | `/categories/{id}/questions` | Optional `?page=N`; 404 if the category is unknown or empty |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State, rejection::PathRejection},
};
use serde::Serialize;
use trivia_core::{
  category::{CategoryId, CategoryMap, category_map},
  pagination::{paginate, parse_page},
  question::Question,
  store::{QuestionFilter, TriviaStore},
};

use crate::{error::ApiError, questions::PageParams};

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct CategoryList {
  pub success:    bool,
  pub categories: CategoryMap,
}

/// `GET /categories`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<CategoryList>, ApiError>
where
  S: TriviaStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let categories = store
    .list_categories()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  if categories.is_empty() {
    return Err(ApiError::NotFound("no categories".to_owned()));
  }

  Ok(Json(CategoryList {
    success:    true,
    categories: category_map(&categories),
  }))
}

// ─── Questions in a category ──────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct CategoryQuestions {
  pub success:             bool,
  pub questions:           Vec<Question>,
  pub total_questions:     usize,
  pub current_category:    String,
  pub current_category_id: CategoryId,
}

/// `GET /categories/{id}/questions[?page=N]`
pub async fn questions<S>(
  State(store): State<Arc<S>>,
  id: Result<Path<i64>, PathRejection>,
  Query(params): Query<PageParams>,
) -> Result<Json<CategoryQuestions>, ApiError>
where
  S: TriviaStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let Path(id) = id?;
  let id = CategoryId(id);

  let category = store
    .get_category(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("category {id} not found")))?;

  let questions = store
    .list_questions(&QuestionFilter::in_category(id))
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  let page = parse_page(params.page.as_deref());
  let current = paginate(&questions, page);
  if current.is_empty() {
    return Err(ApiError::NotFound(format!(
      "page {page} of category {id} is empty"
    )));
  }

  Ok(Json(CategoryQuestions {
    success:             true,
    questions:           current.to_vec(),
    total_questions:     questions.len(),
    current_category:    category.kind,
    current_category_id: category.id,
  }))
}
