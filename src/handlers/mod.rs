// src/handlers/mod.rs

use crate::error::AppError;

pub mod categories;
pub mod questions;
pub mod quizzes;

/// Fallback for paths no route matches.
pub async fn not_found() -> AppError {
    AppError::NotFound("no route matches".to_string())
}

/// Fallback for a known path hit with an unsupported method.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
