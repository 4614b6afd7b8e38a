//! Core types and trait definitions for the trivia service.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! The store backend and the API crate both depend on it.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod category;
pub mod error;
pub mod pagination;
pub mod question;
pub mod quiz;
pub mod store;

pub use error::{Error, Result};
