// src/repository/sqlite.rs

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::{
    QueryBuilder, Sqlite, SqlitePool,
    migrate::MigrateError,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};

use super::{TriviaRepository, like_pattern};
use crate::{
    models::question::{NewQuestion, Question},
    utils::pagination::PageWindow,
};

/// SQLite-backed repository, for local runs and the integration tests.
///
/// SQLite's `LIKE` only folds ASCII case, so searches are case-insensitive
/// for ASCII text only.
#[derive(Clone)]
pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        Ok(Self::new(pool))
    }

    /// A fresh, migrated in-memory database.
    ///
    /// The pool holds exactly one connection that never expires, because an
    /// in-memory database lives only as long as its connection.
    pub async fn in_memory() -> Result<Self, Box<dyn std::error::Error>> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        let repo = Self::new(pool);
        repo.migrate().await?;
        Ok(repo)
    }

    pub async fn migrate(&self) -> Result<(), MigrateError> {
        sqlx::migrate!("./migrations/sqlite").run(&self.pool).await
    }
}

#[async_trait]
impl TriviaRepository for SqliteRepository {
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
            LIMIT ? OFFSET ?
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
            WHERE category = ?
            ORDER BY id
            LIMIT ? OFFSET ?
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
            WHERE question LIKE ? ESCAPE '\'
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
            WHERE id = ?
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
            VALUES (?, ?, ?, ?)
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
        sqlx::query_scalar::<_, i64>(r#"DELETE FROM questions WHERE id = ? RETURNING id"#)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn random_question(
        &self,
        category: Option<i64>,
        exclude: &[i64],
    ) -> Result<Option<Question>, sqlx::Error> {
        // SQLite cannot bind arrays, so the exclusion list is expanded inline.
        let mut query_builder = QueryBuilder::<Sqlite>::new(
            "SELECT id, question, answer, category, difficulty FROM questions WHERE 1 = 1",
        );

        if let Some(category) = category {
            query_builder.push(" AND category = ").push_bind(category);
        }

        if !exclude.is_empty() {
            query_builder.push(" AND id NOT IN (");
            let mut separated = query_builder.separated(", ");
            for id in exclude {
                separated.push_bind(*id);
            }
            separated.push_unseparated(")");
        }

        query_builder.push(" ORDER BY RANDOM() LIMIT 1");

        query_builder
            .build_query_as::<Question>()
            .fetch_optional(&self.pool)
            .await
    }
}
