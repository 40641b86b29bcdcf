// src/models/quiz.rs

use std::collections::BTreeSet;

use serde::Deserialize;
use serde_json::Value;

use crate::{
    error::AppError,
    utils::coerce::{int_from_json, is_truthy},
};

/// Body of `POST /api/quizzes`.
#[derive(Debug, Default, Deserialize)]
pub struct QuizRequest {
    /// Ids already served in this quiz session.
    #[serde(default)]
    pub previous_questions: Option<Vec<i64>>,

    /// `{"id": ..., "type": ...}` as sent by the client. Kept raw so that a
    /// falsy value can be told apart from a malformed one.
    #[serde(default)]
    pub quiz_category: Option<Value>,
}

/// Which questions a quiz draw may pick from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizScope {
    AnyCategory,
    Category(i64),
}

impl QuizScope {
    pub fn category(&self) -> Option<i64> {
        match self {
            QuizScope::AnyCategory => None,
            QuizScope::Category(id) => Some(*id),
        }
    }
}

impl QuizRequest {
    /// Resolves `quiz_category` into a scope.
    ///
    /// * absent or falsy category -> `BadRequest`
    /// * missing or non-integer id -> `BadRequest`
    /// * negative id -> `Unprocessable`
    /// * `0` -> every category
    pub fn scope(&self) -> Result<QuizScope, AppError> {
        let category = self
            .quiz_category
            .as_ref()
            .filter(|c| is_truthy(c))
            .ok_or_else(|| AppError::BadRequest("quiz_category is required".to_string()))?;

        let id = category
            .get("id")
            .and_then(int_from_json)
            .ok_or_else(|| {
                AppError::BadRequest(format!("quiz_category has no integer id: {}", category))
            })?;

        match id {
            id if id < 0 => Err(AppError::Unprocessable(format!(
                "quiz category id {} is negative",
                id
            ))),
            0 => Ok(QuizScope::AnyCategory),
            id => Ok(QuizScope::Category(id)),
        }
    }

    /// Previously served ids, sorted and without duplicates.
    pub fn excluded_ids(&self) -> Vec<i64> {
        self.previous_questions
            .iter()
            .flatten()
            .copied()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
