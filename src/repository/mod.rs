// src/repository/mod.rs

//! Storage access for categories and questions.
//!
//! Handlers only see the [`TriviaRepository`] trait; the concrete backend is
//! chosen from the scheme of `DATABASE_URL` when the app starts.

pub mod postgres;
pub mod sqlite;

use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    config::Config,
    models::question::{NewQuestion, Question},
    utils::pagination::PageWindow,
};

pub use postgres::PgRepository;
pub use sqlite::SqliteRepository;

/// Shared handle stored in `AppState`.
pub type DynRepository = Arc<dyn TriviaRepository>;

/// Every query the HTTP layer needs. Each method is a single statement, so
/// inserts and deletes are atomic per row.
#[async_trait]
pub trait TriviaRepository: Send + Sync {
    /// Every category id in primary-key order. The API never exposes
    /// category names, so only ids are read.
    async fn list_category_ids(&self) -> Result<Vec<i64>, sqlx::Error>;

    /// Total number of questions, ignoring any filter.
    async fn count_questions(&self) -> Result<i64, sqlx::Error>;

    /// One page of all questions, ordered by id.
    async fn list_questions(&self, window: PageWindow) -> Result<Vec<Question>, sqlx::Error>;

    /// One page of the questions in `category`, ordered by id.
    async fn list_questions_by_category(
        &self,
        category: i64,
        window: PageWindow,
    ) -> Result<Vec<Question>, sqlx::Error>;

    /// Questions whose text contains `term`, ignoring case.
    async fn search_questions(&self, term: &str) -> Result<Vec<Question>, sqlx::Error>;

    async fn find_question(&self, id: i64) -> Result<Option<Question>, sqlx::Error>;

    /// Inserts the question and returns the id storage assigned to it.
    async fn insert_question(&self, question: &NewQuestion) -> Result<i64, sqlx::Error>;

    /// Deletes the question, returning its id, or `None` if it did not exist.
    async fn delete_question(&self, id: i64) -> Result<Option<i64>, sqlx::Error>;

    /// Picks one question uniformly at random, optionally restricted to a
    /// category, skipping every id in `exclude`.
    async fn random_question(
        &self,
        category: Option<i64>,
        exclude: &[i64],
    ) -> Result<Option<Question>, sqlx::Error>;
}

/// Escapes `LIKE` wildcards so the term matches literally (escape char `\`).
pub(crate) fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

/// Connects to the database named by `config.database_url`, applies the
/// embedded migrations and returns the matching repository.
pub async fn connect(config: &Config) -> Result<DynRepository, Box<dyn std::error::Error>> {
    let url = config.database_url.as_str();

    if url.starts_with("postgres://") || url.starts_with("postgresql://") {
        let repo = PgRepository::connect(url, config.max_connections).await?;
        repo.migrate().await?;
        Ok(Arc::new(repo))
    } else if url.starts_with("sqlite:") {
        let repo = SqliteRepository::connect(url, config.max_connections).await?;
        repo.migrate().await?;
        Ok(Arc::new(repo))
    } else {
        Err(format!("unsupported DATABASE_URL scheme: {}", url).into())
    }
}
