//! Router tests driving [`api_router`] with an in-memory SQLite store.

use std::sync::Arc;

use axum::{
  Router,
  body::Body,
  http::{Request, StatusCode, header},
};
use serde_json::{Value, json};
use tower::ServiceExt as _;
use trivia_core::{
  category::{Category, CategoryId, DEFAULT_CATEGORIES},
  question::{NewQuestion, Question, QuestionId},
  store::{QuestionFilter, TriviaStore},
};
use trivia_store_sqlite::SqliteStore;

use super::api_router;

// ─── Fixtures ────────────────────────────────────────────────────────────────

const SPORTS: i64 = 6;

/// Default categories plus 13 questions: eleven in Science, one "title"
/// question in Entertainment and one in Sports.
async fn seeded_store() -> Arc<SqliteStore> {
  let store = SqliteStore::open_in_memory().await.unwrap();
  store.seed_categories(&DEFAULT_CATEGORIES).await.unwrap();

  for i in 1..=11 {
    store
      .add_question(
        NewQuestion::new(format!("Science question {i}"), "42", CategoryId(1), 3)
          .unwrap(),
      )
      .await
      .unwrap();
  }
  store
    .add_question(
      NewQuestion::new(
        "What was the title of the 1990 fantasy directed by Tim Burton?",
        "Edward Scissorhands",
        CategoryId(5),
        3,
      )
      .unwrap(),
    )
    .await
    .unwrap();
  store
    .add_question(
      NewQuestion::new(
        "How many times has Al-Ahly won the CAF Champions League?",
        "9",
        CategoryId(SPORTS),
        4,
      )
      .unwrap(),
    )
    .await
    .unwrap();

  Arc::new(store)
}

async fn app() -> Router { api_router(seeded_store().await) }

async fn send(
  app: Router,
  method: &str,
  uri: &str,
  body: Option<Value>,
) -> (StatusCode, Value) {
  let mut builder = Request::builder().method(method).uri(uri);
  let body = match body {
    Some(v) => {
      builder = builder.header(header::CONTENT_TYPE, "application/json");
      Body::from(v.to_string())
    }
    None => Body::empty(),
  };
  let resp = app.oneshot(builder.body(body).unwrap()).await.unwrap();
  let status = resp.status();
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
    .await
    .unwrap();
  let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
  (status, json)
}

fn assert_envelope(json: &Value, code: u16, message: &str) {
  assert_eq!(json["success"], false, "body: {json}");
  assert_eq!(json["error"], code, "body: {json}");
  assert_eq!(json["message"], message, "body: {json}");
}

// ─── Root & categories ───────────────────────────────────────────────────────

#[tokio::test]
async fn welcome_route() {
  let (status, json) = send(app().await, "GET", "/", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(json["welcome"], "hello");
}

#[tokio::test]
async fn get_categories() {
  let (status, json) = send(app().await, "GET", "/categories", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(json["success"], true);
  assert_eq!(json["categories"]["1"], "Science");
  assert_eq!(json["categories"]["6"], "Sports");
  assert_eq!(json["categories"].as_object().unwrap().len(), 6);
}

#[tokio::test]
async fn get_categories_on_empty_store_is_404() {
  let store = Arc::new(SqliteStore::open_in_memory().await.unwrap());
  let (status, json) = send(api_router(store), "GET", "/categories", None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_envelope(&json, 404, "resource not found");
}

// ─── Listing & pagination ────────────────────────────────────────────────────

#[tokio::test]
async fn first_page_of_questions() {
  let (status, json) = send(app().await, "GET", "/questions", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(json["success"], true);
  assert_eq!(json["questions"].as_array().unwrap().len(), 10);
  assert_eq!(json["total_questions"], 13);
  assert_eq!(json["current_category"], Value::Null);
  assert_eq!(json["categories"]["2"], "Art");
  assert_eq!(json["questions"][0]["id"], 1);
}

#[tokio::test]
async fn second_page_continues_the_first() {
  let (status, json) = send(app().await, "GET", "/questions?page=2", None).await;
  assert_eq!(status, StatusCode::OK);
  let ids: Vec<i64> = json["questions"]
    .as_array()
    .unwrap()
    .iter()
    .map(|q| q["id"].as_i64().unwrap())
    .collect();
  assert_eq!(ids, vec![11, 12, 13]);
  assert_eq!(json["total_questions"], 13);
}

#[tokio::test]
async fn page_beyond_the_end_is_404() {
  let (status, json) = send(app().await, "GET", "/questions?page=1000", None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_envelope(&json, 404, "resource not found");
}

#[tokio::test]
async fn page_number_beyond_u32_is_404() {
  let (status, json) =
    send(app().await, "GET", "/questions?page=4294967297", None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_envelope(&json, 404, "resource not found");
}

#[tokio::test]
async fn non_numeric_page_falls_back_to_first() {
  let (status, json) = send(app().await, "GET", "/questions?page=abc", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(json["questions"][0]["id"], 1);
}

#[tokio::test]
async fn list_filtered_by_category_name() {
  let (status, json) = send(app().await, "GET", "/questions?category=Sports", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(json["total_questions"], 1);
  assert_eq!(json["current_category"], "Sports");
  assert_eq!(json["questions"][0]["category"], SPORTS);
}

#[tokio::test]
async fn list_with_all_category_is_unfiltered() {
  let (status, json) = send(app().await, "GET", "/questions?category=all", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(json["total_questions"], 13);
}

#[tokio::test]
async fn list_with_unknown_category_name_is_404() {
  let (status, json) = send(app().await, "GET", "/questions?category=Cooking", None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_envelope(&json, 404, "resource not found");
}

// ─── Questions by category ───────────────────────────────────────────────────

#[tokio::test]
async fn questions_per_category() {
  let (status, json) = send(app().await, "GET", "/categories/1/questions", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(json["success"], true);
  assert_eq!(json["total_questions"], 11);
  assert_eq!(json["questions"].as_array().unwrap().len(), 10);
  assert_eq!(json["current_category"], "Science");
  assert_eq!(json["current_category_id"], 1);
  assert!(
    json["questions"]
      .as_array()
      .unwrap()
      .iter()
      .all(|q| q["category"] == 1)
  );
}

#[tokio::test]
async fn questions_per_unknown_category_is_404() {
  let (status, json) = send(app().await, "GET", "/categories/20/questions", None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_envelope(&json, 404, "resource not found");
}

#[tokio::test]
async fn questions_per_empty_category_is_404() {
  let (status, _) = send(app().await, "GET", "/categories/4/questions", None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}

// ─── Create ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_question_then_retrieve_it() {
  let store = seeded_store().await;
  let body = json!({
    "question":   "Which country hosted the 2010 World Cup?",
    "answer":     "South Africa",
    "category":   "6",
    "difficulty": 4,
  });
  let (status, json) = send(api_router(store.clone()), "POST", "/questions", Some(body)).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(json["success"], true);
  assert_eq!(json["message"], "Question is added successfully");

  let id = QuestionId(json["created"].as_i64().unwrap());
  let stored = store.get_question(id).await.unwrap().unwrap();
  assert_eq!(stored.answer, "South Africa");
  assert_eq!(stored.category, CategoryId(SPORTS));

  let (_, json) = send(api_router(store), "GET", "/questions?category=Sports", None).await;
  assert_eq!(json["total_questions"], 2);
}

#[tokio::test]
async fn create_question_missing_any_field_is_422() {
  let full = json!({
    "question":   "How many times has Al-Ahly won the CAF Champions League?",
    "answer":     "9",
    "category":   "6",
    "difficulty": 4,
  });
  for field in ["question", "answer", "category", "difficulty"] {
    let mut body = full.clone();
    body.as_object_mut().unwrap().remove(field);
    let (status, json) = send(app().await, "POST", "/questions", Some(body)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "missing {field}");
    assert_envelope(&json, 422, "unprocessable");
  }
}

#[tokio::test]
async fn create_question_with_empty_field_is_422() {
  let body = json!({ "question": "", "answer": "9", "category": 6, "difficulty": 4 });
  let (status, _) = send(app().await, "POST", "/questions", Some(body)).await;
  assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

  let body = json!({ "question": "Q?", "answer": "9", "category": 6, "difficulty": "" });
  let (status, _) = send(app().await, "POST", "/questions", Some(body)).await;
  assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn create_question_with_unknown_category_is_422() {
  let store = seeded_store().await;
  let body = json!({ "question": "Q?", "answer": "A", "category": 99, "difficulty": 1 });
  let (status, json) = send(api_router(store.clone()), "POST", "/questions", Some(body)).await;
  assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
  assert_envelope(&json, 422, "unprocessable");
  assert_eq!(store.list_questions(&QuestionFilter::all()).await.unwrap().len(), 13);
}

#[tokio::test]
async fn create_question_with_malformed_json_is_422() {
  let req = Request::builder()
    .method("POST")
    .uri("/questions")
    .header(header::CONTENT_TYPE, "application/json")
    .body(Body::from("{not json"))
    .unwrap();
  let resp = app().await.oneshot(req).await.unwrap();
  assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// ─── Delete ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_question_removes_it() {
  let store = seeded_store().await;
  let (status, json) = send(api_router(store.clone()), "DELETE", "/questions/12", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(json["success"], true);
  assert_eq!(json["message"], "Your Question is deleted Successfully");
  assert_eq!(json["deleted"], 12);

  assert!(store.get_question(QuestionId(12)).await.unwrap().is_none());

  let (status, _) = send(
    api_router(store.clone()),
    "POST",
    "/questions/search",
    Some(json!({ "searchTerm": "title" })),
  )
  .await;
  assert_eq!(status, StatusCode::NOT_FOUND);

  let (status, _) = send(api_router(store), "DELETE", "/questions/12", None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_missing_question_is_404() {
  let (status, json) = send(app().await, "DELETE", "/questions/100", None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_envelope(&json, 404, "resource not found");
}

#[tokio::test]
async fn delete_with_non_numeric_id_is_404() {
  let (status, json) = send(app().await, "DELETE", "/questions/abc", None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_envelope(&json, 404, "resource not found");
}

// ─── Search ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn search_questions() {
  let body = json!({ "searchTerm": "TITLE" });
  let (status, json) = send(app().await, "POST", "/questions/search", Some(body)).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(json["success"], true);
  assert_eq!(json["total_questions"], 1);
  assert_eq!(json["current_category"], Value::Null);
  assert_eq!(json["categories"]["5"], "Entertainment");
  assert_eq!(json["questions"][0]["answer"], "Edward Scissorhands");
}

#[tokio::test]
async fn search_matches_accented_text_in_any_case() {
  let store = seeded_store().await;
  store
    .add_question(NewQuestion::new("Où est l'ÉCOLE?", "Ici", CategoryId(3), 1).unwrap())
    .await
    .unwrap();

  let body = json!({ "searchTerm": "école" });
  let (status, json) = send(api_router(store), "POST", "/questions/search", Some(body)).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(json["total_questions"], 1);
  assert_eq!(json["questions"][0]["question"], "Où est l'ÉCOLE?");
}

#[tokio::test]
async fn search_is_paginated() {
  let body = json!({ "searchTerm": "science" });
  let (status, json) =
    send(app().await, "POST", "/questions/search?page=2", Some(body)).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(json["total_questions"], 11);
  assert_eq!(json["questions"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn search_with_empty_term_is_422() {
  let body = json!({ "searchTerm": "" });
  let (status, json) = send(app().await, "POST", "/questions/search", Some(body)).await;
  assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
  assert_envelope(&json, 422, "unprocessable");

  let (status, _) = send(app().await, "POST", "/questions/search", Some(json!({}))).await;
  assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn search_without_matches_is_404() {
  let body = json!({ "searchTerm": "not_exist_word" });
  let (status, json) = send(app().await, "POST", "/questions/search", Some(body)).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_envelope(&json, 404, "resource not found");
}

// ─── Quiz ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn play_quiz_in_category() {
  let body = json!({
    "previous_questions": [],
    "quiz_category": { "id": SPORTS, "type": "Sports" },
  });
  let (status, json) = send(app().await, "POST", "/quizzes", Some(body)).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(json["success"], true);
  assert_eq!(json["question"]["id"], 13);
  assert_eq!(json["question"]["category"], SPORTS);
  assert_eq!(json["prev"], json!([]));
}

#[tokio::test]
async fn play_quiz_with_exhausted_category_has_no_question() {
  let body = json!({
    "previous_questions": [13],
    "quiz_category": { "id": SPORTS, "type": "Sports" },
  });
  let (status, json) = send(app().await, "POST", "/quizzes", Some(body)).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(json, json!({ "success": true }));
}

#[tokio::test]
async fn play_quiz_over_all_categories_skips_previous() {
  let previous: Vec<i64> = (1..=12).collect();
  let body = json!({
    "previous_questions": previous,
    "quiz_category": { "id": 0, "type": "click" },
  });
  for _ in 0..10 {
    let (status, json) = send(app().await, "POST", "/quizzes", Some(body.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["question"]["id"], 13);
  }
}

#[tokio::test]
async fn play_quiz_accepts_camel_case_and_string_ids() {
  let body = json!({
    "previousQuestions": ["13"],
    "quizCategory": { "id": "6" },
  });
  let (status, json) = send(app().await, "POST", "/quizzes", Some(body)).await;
  assert_eq!(status, StatusCode::OK);
  assert!(json.get("question").is_none());
}

#[tokio::test]
async fn play_quiz_missing_category_is_422() {
  let body = json!({ "previous_questions": [] });
  let (status, json) = send(app().await, "POST", "/quizzes", Some(body)).await;
  assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
  assert_envelope(&json, 422, "unprocessable");
}

#[tokio::test]
async fn play_quiz_missing_previous_questions_is_422() {
  for body in [
    json!({ "quiz_category": { "id": 1 } }),
    json!({ "previous_questions": "", "quiz_category": { "id": 1 } }),
    json!({ "previous_questions": null, "quiz_category": { "id": 1 } }),
  ] {
    let (status, _) = send(app().await, "POST", "/quizzes", Some(body)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
  }
}

#[tokio::test]
async fn play_quiz_in_unknown_or_empty_category_is_404() {
  for id in [20, 4] {
    let body = json!({ "previous_questions": [], "quiz_category": { "id": id } });
    let (status, json) = send(app().await, "POST", "/quizzes", Some(body)).await;
    assert_eq!(status, StatusCode::NOT_FOUND, "category {id}");
    assert_envelope(&json, 404, "resource not found");
  }
}

// ─── Routing, CORS & server errors ───────────────────────────────────────────

#[tokio::test]
async fn unknown_route_is_404_envelope() {
  let (status, json) = send(app().await, "GET", "/nope", None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_envelope(&json, 404, "resource not found");
}

#[tokio::test]
async fn wrong_method_is_405_envelope() {
  let (status, json) = send(app().await, "GET", "/quizzes", None).await;
  assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
  assert_envelope(&json, 405, "Method not allowed");

  let (status, _) = send(app().await, "PUT", "/questions/1", None).await;
  assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn cors_allows_any_origin() {
  let req = Request::builder()
    .method("GET")
    .uri("/categories")
    .header(header::ORIGIN, "http://localhost:3000")
    .body(Body::empty())
    .unwrap();
  let resp = app().await.oneshot(req).await.unwrap();
  assert_eq!(resp.status(), StatusCode::OK);
  let origin = resp
    .headers()
    .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
    .unwrap();
  assert_eq!(origin, "*");
}

#[tokio::test]
async fn cors_preflight_lists_methods() {
  let req = Request::builder()
    .method("OPTIONS")
    .uri("/questions/1")
    .header(header::ORIGIN, "http://localhost:3000")
    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "DELETE")
    .body(Body::empty())
    .unwrap();
  let resp = app().await.oneshot(req).await.unwrap();
  assert!(resp.status().is_success());
  let methods = resp
    .headers()
    .get(header::ACCESS_CONTROL_ALLOW_METHODS)
    .unwrap()
    .to_str()
    .unwrap();
  assert!(methods.contains("DELETE"), "methods: {methods}");
  assert!(methods.contains("PATCH"), "methods: {methods}");
}

// A store whose every call fails, for exercising the 500 path.
#[derive(Clone)]
struct BrokenStore;

fn broken() -> std::io::Error { std::io::Error::other("disk on fire") }

impl TriviaStore for BrokenStore {
  type Error = std::io::Error;
  async fn add_category(&self, _: String) -> Result<Category, Self::Error> { Err(broken()) }
  async fn list_categories(&self) -> Result<Vec<Category>, Self::Error> { Err(broken()) }
  async fn get_category(&self, _: CategoryId) -> Result<Option<Category>, Self::Error> { Err(broken()) }
  async fn find_category_by_type(&self, _: &str) -> Result<Option<Category>, Self::Error> { Err(broken()) }
  async fn add_question(&self, _: NewQuestion) -> Result<Question, Self::Error> { Err(broken()) }
  async fn get_question(&self, _: QuestionId) -> Result<Option<Question>, Self::Error> { Err(broken()) }
  async fn list_questions(&self, _: &QuestionFilter) -> Result<Vec<Question>, Self::Error> { Err(broken()) }
  async fn delete_question(&self, _: QuestionId) -> Result<bool, Self::Error> { Err(broken()) }
}

#[tokio::test]
async fn store_failure_is_500_envelope() {
  let app = api_router(Arc::new(BrokenStore));
  let (status, json) = send(app, "GET", "/questions", None).await;
  assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
  assert_envelope(&json, 500, "Internal Server Error");
}
