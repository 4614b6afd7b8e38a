//! JSON REST API for the trivia service.
//!
//! Exposes an axum [`Router`] backed by any [`trivia_core::store::TriviaStore`].
//! Every response body carries a `success` flag; failures use the envelope
//! described in [`error`].
//!
//! # Mounting
//!
//! ```rust,ignore
//! axum::serve(listener, trivia_api::api_router(store.clone())).await?;
//! ```

pub mod categories;
pub mod error;
pub mod input;
pub mod questions;
pub mod quizzes;

use std::sync::Arc;

use axum::{
  Json, Router,
  http::{Method, header},
  routing::{delete, get, post},
};
use serde_json::{Value, json};
use tower_http::{
  cors::{Any, CorsLayer},
  trace::TraceLayer,
};
use trivia_core::store::TriviaStore;

pub use error::ApiError;

/// Build the fully-materialised API router for `store`.
///
/// Unknown paths answer with the 404 envelope and known paths hit with the
/// wrong method answer with the 405 envelope. CORS allows any origin.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: TriviaStore + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    .route("/", get(welcome))
    // Categories
    .route("/categories", get(categories::list::<S>))
    .route("/categories/{id}/questions", get(categories::questions::<S>))
    // Questions
    .route("/questions", get(questions::list::<S>).post(questions::create::<S>))
    .route("/questions/search", post(questions::search::<S>))
    .route("/questions/{id}", delete(questions::delete_one::<S>))
    // Quiz
    .route("/quizzes", post(quizzes::play::<S>))
    .fallback(not_found)
    .method_not_allowed_fallback(method_not_allowed)
    .with_state(store)
    .layer(cors_layer())
    .layer(TraceLayer::new_for_http())
}

fn cors_layer() -> CorsLayer {
  CorsLayer::new()
    .allow_origin(Any)
    .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
    .allow_methods([
      Method::GET,
      Method::PATCH,
      Method::POST,
      Method::DELETE,
      Method::OPTIONS,
    ])
}

/// `GET /`
async fn welcome() -> Json<Value> {
  Json(json!({ "success": true, "welcome": "hello" }))
}

async fn not_found() -> ApiError {
  ApiError::NotFound("no such route".to_owned())
}

async fn method_not_allowed() -> ApiError { ApiError::MethodNotAllowed }

#[cfg(test)]
mod tests;
