// tests/common/mod.rs

#![allow(dead_code)]

use std::{str::FromStr, sync::Arc};

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use trivia::{
    models::question::NewQuestion,
    repository::{DynRepository, PgRepository, SqliteRepository},
    routes,
    state::AppState,
};

pub struct TestApp {
    /// Base URL, e.g. "http://127.0.0.1:12345".
    pub address: String,
    pub repository: DynRepository,
    pub client: reqwest::Client,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }
}

/// Serves the router over `repository` on a random port.
async fn serve(repository: DynRepository) -> TestApp {
    let app = routes::create_router(AppState::new(repository.clone()));

    // Bind to port 0 to get a random available port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestApp {
        address: format!("http://127.0.0.1:{}", port),
        repository,
        client: reqwest::Client::new(),
    }
}

/// Spawns the app on a random port, backed by a fresh in-memory database
/// holding the six seeded categories and no questions.
pub async fn spawn_app() -> TestApp {
    let repository: DynRepository = Arc::new(
        SqliteRepository::in_memory()
            .await
            .expect("Failed to create in-memory database"),
    );

    serve(repository).await
}

/// Spawns the app over PostgreSQL when `DATABASE_URL` points at one.
///
/// Each call migrates a fresh schema (selected through `search_path`) so
/// tests never see each other's rows. Returns `None` when no Postgres
/// database is configured, letting the caller skip.
pub async fn spawn_pg_app() -> Option<TestApp> {
    let database_url = match std::env::var("DATABASE_URL") {
        Ok(url) if url.starts_with("postgres://") || url.starts_with("postgresql://") => url,
        _ => {
            eprintln!("DATABASE_URL is not a Postgres URL; skipping Postgres test");
            return None;
        }
    };

    let schema = format!("trivia_test_{}", uuid::Uuid::new_v4().simple());

    let admin = PgPoolOptions::new()
        .max_connections(1)
        .connect(&database_url)
        .await
        .expect("Failed to connect to Postgres for testing. Make sure DATABASE_URL is set.");
    sqlx::query(&format!(r#"CREATE SCHEMA "{}""#, schema))
        .execute(&admin)
        .await
        .expect("Failed to create test schema");

    let options = PgConnectOptions::from_str(&database_url)
        .expect("Invalid DATABASE_URL")
        .options([("search_path", schema.as_str())]);
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect_with(options)
        .await
        .expect("Failed to connect to test schema");

    let repository = PgRepository::new(pool);
    repository
        .migrate()
        .await
        .expect("Failed to migrate database");

    Some(serve(Arc::new(repository)).await)
}

/// Inserts `sample_questions()` in order and returns the assigned ids.
pub async fn seed(app: &TestApp) -> Vec<i64> {
    let mut ids = Vec::new();
    for question in sample_questions() {
        ids.push(app.repository.insert_question(&question).await.unwrap());
    }
    ids
}

/// Same as `spawn_app`, with `sample_questions()` inserted in order.
/// Returns the assigned ids alongside the app.
pub async fn spawn_seeded_app() -> (TestApp, Vec<i64>) {
    let app = spawn_app().await;
    let ids = seed(&app).await;
    (app, ids)
}

fn q(question: &str, answer: &str, category: i64, difficulty: i64) -> NewQuestion {
    NewQuestion {
        question: question.to_string(),
        answer: answer.to_string(),
        category,
        difficulty,
    }
}

/// 23 questions: four in categories 1-5, three in category 6.
pub fn sample_questions() -> Vec<NewQuestion> {
    vec![
        q("What is the heaviest organ in the human body?", "The Liver", 1, 4),
        q("Who discovered penicillin?", "Alexander Fleming", 1, 3),
        q("Hematology is a branch of medicine involving the study of what?", "Blood", 1, 4),
        q("What is the chemical symbol for gold?", "Au", 1, 2),
        q("Which Dutch graphic artist, initials M C, was a creator of optical illusions?", "Escher", 2, 1),
        q("La Giaconda is better known as what?", "Mona Lisa", 2, 3),
        q("How many paintings did Van Gogh sell in his lifetime?", "One", 2, 4),
        q("What is the name of the art movement led by Picasso and Braque?", "Cubism", 2, 3),
        q("What is the largest lake in Africa?", "Lake Victoria", 3, 2),
        q("In which royal palace would you find the Hall of Mirrors?", "The Palace of Versailles", 3, 3),
        q("The Taj Mahal is located in which Indian city?", "Agra", 3, 2),
        q("What is the NAME of the longest river in South America?", "The Amazon", 3, 2),
        q("Whose autobiography is entitled 'I Know Why the Caged Bird Sings'?", "Maya Angelou", 4, 2),
        q("What boxer's original name is Cassius Clay?", "Muhammad Ali", 4, 1),
        q("Who invented Peanut Butter?", "George Washington Carver", 4, 2),
        q("Which dung beetle was worshipped by the ancient Egyptians?", "Scarab", 4, 4),
        q("What movie earned Tom Hanks his third straight Oscar nomination, in 1996?", "Apollo 13", 5, 4),
        q("What actor did author Anne Rice first denounce, then praise in the role of her beloved Lestat?", "Tom Cruise", 5, 4),
        q("What was the title of the 1990 fantasy directed by Tim Burton about a young man with multi-bladed appendages?", "Edward Scissorhands", 5, 3),
        q("Which band Named its debut album 'Please Please Me'?", "The Beatles", 5, 2),
        q("Which is the only team to play in every soccer World Cup tournament?", "Brazil", 6, 3),
        q("Which country won the first ever soccer World Cup in 1930?", "Uruguay", 6, 4),
        q("How many players are on the field for one basketball team?", "Five", 6, 1),
    ]
}
