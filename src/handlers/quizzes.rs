// src/handlers/quizzes.rs

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::IntoResponse,
};

use crate::{error::AppError, models::quiz::QuizRequest, repository::DynRepository};

/// Draws one random question the player has not seen yet.
///
/// Category `0` draws from every category. When nothing is left to draw the
/// response carries `"question": null`.
pub async fn next_question(
    State(repo): State<DynRepository>,
    payload: Result<Json<QuizRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(req) = payload?;
    let scope = req.scope()?;
    let excluded = req.excluded_ids();

    let question = repo
        .random_question(scope.category(), &excluded)
        .await
        .map_err(|e| {
            tracing::error!("Failed to draw quiz question: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?;

    if question.is_none() {
        tracing::debug!(
            "Quiz pool exhausted for {:?} after {} questions",
            scope,
            excluded.len()
        );
    }

    Ok(Json(serde_json::json!({
        "question": question,
        "success": true
    })))
}
