// src/handlers/questions.rs

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    response::IntoResponse,
};
use serde_json::{Value, json};

use super::categories::category_ids;
use crate::{
    error::AppError,
    models::question::{ListParams, QuestionPage, QuestionsPostRequest},
    repository::DynRepository,
    utils::pagination::{PageWindow, QUESTIONS_PER_PAGE, paginate},
};

fn page_window(page: i64) -> Result<PageWindow, AppError> {
    paginate(QUESTIONS_PER_PAGE, page)
        .ok_or_else(|| AppError::NotFound(format!("page {} is out of range", page)))
}

/// Lists questions ten at a time.
///
/// `total_questions` always counts the whole table so clients can compute
/// the number of pages. A page with no questions is a 404.
pub async fn list_questions(
    State(repo): State<DynRepository>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Query(params) = params?;
    let page = params.page();
    let window = page_window(page)?;

    let questions = repo.list_questions(window).await?;
    if questions.is_empty() {
        return Err(AppError::NotFound(format!("no questions on page {}", page)));
    }

    let total_questions = repo.count_questions().await?;
    let categories = category_ids(&repo).await?;

    Ok(Json(QuestionPage {
        questions,
        total_questions,
        current_category: params.category(),
        categories,
    }))
}

/// Lists the questions of one category, ten at a time.
/// `total_questions` is the unfiltered count, as in `list_questions`.
pub async fn list_questions_by_category(
    State(repo): State<DynRepository>,
    category: Result<Path<i64>, PathRejection>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path(category) = category?;
    let Query(params) = params?;
    let page = params.page();
    let window = page_window(page)?;

    let questions = repo.list_questions_by_category(category, window).await?;
    if questions.is_empty() {
        return Err(AppError::NotFound(format!(
            "no questions in category {} on page {}",
            category, page
        )));
    }

    let total_questions = repo.count_questions().await?;
    let categories = category_ids(&repo).await?;

    Ok(Json(QuestionPage {
        questions,
        total_questions,
        current_category: category,
        categories,
    }))
}

/// Retrieves a single question by ID.
pub async fn get_question(
    State(repo): State<DynRepository>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path(id) = id?;

    let question = repo
        .find_question(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("question {} not found", id)))?;

    Ok(Json(question))
}

/// Searches questions when the body carries a truthy `searchTerm`,
/// otherwise creates a question from the body.
pub async fn search_or_create_question(
    State(repo): State<DynRepository>,
    payload: Result<Json<QuestionsPostRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(payload) = payload?;

    match payload.search_term()? {
        Some(term) => search_questions(&repo, &term).await,
        None => create_question(&repo, payload).await,
    }
}

async fn search_questions(repo: &DynRepository, term: &str) -> Result<Json<Value>, AppError> {
    let questions = repo.search_questions(term).await.map_err(|e| {
        tracing::error!("Failed to search questions: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;
    let categories = category_ids(repo).await?;
    let current_category: Vec<i64> = questions.iter().map(|q| q.category).collect();

    Ok(Json(json!({
        "questions": questions,
        "total_questions": questions.len(),
        "categories": categories,
        "current_category": current_category,
        "success": true
    })))
}

async fn create_question(
    repo: &DynRepository,
    payload: QuestionsPostRequest,
) -> Result<Json<Value>, AppError> {
    let new_question = payload.into_new_question()?;

    // Constraint violations (e.g. an unknown category) are the client's fault.
    let id = repo.insert_question(&new_question).await.map_err(|e| match e {
        sqlx::Error::Database(db_err) => AppError::Unprocessable(db_err.to_string()),
        other => {
            tracing::error!("Failed to create question: {:?}", other);
            AppError::InternalServerError(other.to_string())
        }
    })?;

    tracing::info!("Created question {} in category {}", id, new_question.category);

    Ok(Json(json!({
        "question": id,
        "success": true
    })))
}

/// Deletes a question by ID. A missing question is a 404 and leaves
/// storage untouched.
pub async fn delete_question(
    State(repo): State<DynRepository>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path(id) = id?;

    let deleted = repo
        .delete_question(id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to delete question: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?
        .ok_or_else(|| AppError::NotFound(format!("question {} not found", id)))?;

    tracing::info!("Deleted question {}", deleted);

    Ok(Json(json!({
        "deleted": deleted,
        "success": true
    })))
}
