//! Handler for `POST /quizzes`.
//!
//! Body: `{"previous_questions": [ids], "quiz_category": {"id": N, "type": "..."}}`.
//! `id == 0` draws from every category. When every candidate has already been
//! served the response is `{"success": true}` with no question.

use std::{collections::HashSet, sync::Arc};

use axum::{
  Json,
  extract::{State, rejection::JsonRejection},
};
use serde::{Deserialize, Serialize};
use trivia_core::{
  category::CategoryId,
  question::{Question, QuestionId},
  quiz::{QuizPick, pick_unseen},
  store::{QuestionFilter, TriviaStore},
};

use crate::{
  error::ApiError,
  input::{IntField, required, required_int},
};

#[derive(Debug, Deserialize)]
pub struct QuizCategory {
  pub id:   Option<IntField>,
  #[serde(rename = "type")]
  pub kind: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct QuizBody {
  #[serde(alias = "previousQuestions")]
  pub previous_questions: Option<Vec<IntField>>,
  #[serde(alias = "quizCategory")]
  pub quiz_category:      Option<QuizCategory>,
}

#[derive(Debug, Serialize)]
pub struct QuizResponse {
  pub success:  bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub question: Option<Question>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub prev:     Option<Vec<QuestionId>>,
}

/// `POST /quizzes`
pub async fn play<S>(
  State(store): State<Arc<S>>,
  body: Result<Json<QuizBody>, JsonRejection>,
) -> Result<Json<QuizResponse>, ApiError>
where
  S: TriviaStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let Json(body) = body?;

  let previous = required(body.previous_questions, "previous_questions")?
    .iter()
    .map(|f| f.parse().map(QuestionId))
    .collect::<Option<Vec<_>>>()
    .ok_or_else(|| {
      ApiError::Unprocessable("previous_questions must hold integer ids".to_owned())
    })?;
  let quiz_category = required(body.quiz_category, "quiz_category")?;
  let category = CategoryId(required_int(quiz_category.id.as_ref(), "quiz_category.id")?);

  let filter = if category.is_all() {
    QuestionFilter::all()
  } else {
    store
      .get_category(category)
      .await
      .map_err(|e| ApiError::Store(Box::new(e)))?
      .ok_or_else(|| ApiError::NotFound(format!("category {category} not found")))?;
    QuestionFilter::in_category(category)
  };

  let pool = store
    .list_questions(&filter)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  let excluded: HashSet<QuestionId> = previous.iter().copied().collect();
  let pick = pick_unseen(&pool, &excluded, &mut rand::thread_rng());

  match pick {
    QuizPick::Question(question) => Ok(Json(QuizResponse {
      success:  true,
      question: Some(question.clone()),
      prev:     Some(previous),
    })),
    QuizPick::Exhausted => {
      tracing::debug!(
        %category,
        category_type = quiz_category.kind.as_deref().unwrap_or("all"),
        served = previous.len(),
        "quiz pool exhausted"
      );
      Ok(Json(QuizResponse { success: true, question: None, prev: None }))
    }
    QuizPick::EmptyPool => Err(ApiError::NotFound(format!(
      "category {category} has no questions"
    ))),
  }
}
