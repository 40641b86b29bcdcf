// src/repository/postgres.rs

use std::time::Duration;

use async_trait::async_trait;
use sqlx::{PgPool, migrate::MigrateError, postgres::PgPoolOptions};

use super::{TriviaRepository, like_pattern};
use crate::{
    models::question::{NewQuestion, Question},
    utils::pagination::PageWindow,
};

/// PostgreSQL-backed repository, used in production.
#[derive(Clone)]
pub struct PgRepository {
    pool: PgPool,
}

impl PgRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect(url)
            .await?;

        Ok(Self::new(pool))
    }

    pub async fn migrate(&self) -> Result<(), MigrateError> {
        sqlx::migrate!("./migrations/postgres").run(&self.pool).await
    }
}

#[async_trait]
impl TriviaRepository for PgRepository {
    async fn list_category_ids(&self) -> Result<Vec<i64>, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(r#"SELECT id FROM categories ORDER BY id"#)
            .fetch_all(&self.pool)
            .await
    }

    async fn count_questions(&self) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(r#"SELECT COUNT(*) FROM questions"#)
            .fetch_one(&self.pool)
            .await
    }

    async fn list_questions(&self, window: PageWindow) -> Result<Vec<Question>, sqlx::Error> {
        sqlx::query_as::<_, Question>(
            r#"
            SELECT id, question, answer, category, difficulty
            FROM questions
            ORDER BY id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(window.limit())
        .bind(window.offset())
        .fetch_all(&self.pool)
        .await
    }

    async fn list_questions_by_category(
        &self,
        category: i64,
        window: PageWindow,
    ) -> Result<Vec<Question>, sqlx::Error> {
        sqlx::query_as::<_, Question>(
            r#"
            SELECT id, question, answer, category, difficulty
            FROM questions
            WHERE category = $1
            ORDER BY id
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(category)
        .bind(window.limit())
        .bind(window.offset())
        .fetch_all(&self.pool)
        .await
    }

    async fn search_questions(&self, term: &str) -> Result<Vec<Question>, sqlx::Error> {
        sqlx::query_as::<_, Question>(
            r#"
            SELECT id, question, answer, category, difficulty
            FROM questions
            WHERE question ILIKE $1 ESCAPE '\'
            ORDER BY id
            "#,
        )
        .bind(like_pattern(term))
        .fetch_all(&self.pool)
        .await
    }

    async fn find_question(&self, id: i64) -> Result<Option<Question>, sqlx::Error> {
        sqlx::query_as::<_, Question>(
            r#"
            SELECT id, question, answer, category, difficulty
            FROM questions
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn insert_question(&self, question: &NewQuestion) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO questions (question, answer, category, difficulty)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&question.question)
        .bind(&question.answer)
        .bind(question.category)
        .bind(question.difficulty)
        .fetch_one(&self.pool)
        .await
    }

    async fn delete_question(&self, id: i64) -> Result<Option<i64>, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(r#"DELETE FROM questions WHERE id = $1 RETURNING id"#)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn random_question(
        &self,
        category: Option<i64>,
        exclude: &[i64],
    ) -> Result<Option<Question>, sqlx::Error> {
        sqlx::query_as::<_, Question>(
            r#"
            SELECT id, question, answer, category, difficulty
            FROM questions
            WHERE ($1::BIGINT IS NULL OR category = $1)
              AND NOT (id = ANY($2))
            ORDER BY RANDOM()
            LIMIT 1
            "#,
        )
        .bind(category)
        .bind(exclude)
        .fetch_optional(&self.pool)
        .await
    }
}
