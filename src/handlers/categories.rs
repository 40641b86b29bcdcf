// src/handlers/categories.rs

use axum::{Json, extract::State, response::IntoResponse};

use crate::{error::AppError, repository::DynRepository};

/// Lists every category id in storage order.
pub async fn list_categories(
    State(repo): State<DynRepository>,
) -> Result<impl IntoResponse, AppError> {
    let categories = category_ids(&repo).await?;

    Ok(Json(serde_json::json!({
        "categories": categories,
        "success": true
    })))
}

/// Category ids in primary-key order, as embedded in most responses.
pub(crate) async fn category_ids(repo: &DynRepository) -> Result<Vec<i64>, AppError> {
    repo.list_category_ids().await.map_err(|e| {
        tracing::error!("Failed to list categories: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })
}
