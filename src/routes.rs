// src/routes.rs

use axum::{
    Router,
    http::{Method, header},
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    error::panic_response,
    handlers::{self, categories, questions, quizzes},
    state::AppState,
};

/// Assembles the main application router.
///
/// * Mounts every endpoint under `/api`.
/// * Answers unknown paths and unsupported methods with the JSON error body.
/// * Applies global middleware (Trace, CORS, panic recovery).
pub fn create_router(state: AppState) -> Router {
    // Any origin may call the API with credentials, so the request origin is
    // echoed back instead of using a wildcard.
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::PATCH,
            Method::POST,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Router::new()
        .route("/api/categories", get(categories::list_categories))
        .route(
            "/api/categories/{id}/questions",
            get(questions::list_questions_by_category),
        )
        .route(
            "/api/questions",
            get(questions::list_questions).post(questions::search_or_create_question),
        )
        .route(
            "/api/questions/{id}",
            get(questions::get_question).delete(questions::delete_question),
        )
        .route("/api/quizzes", post(quizzes::next_question))
        .fallback(handlers::not_found)
        .method_not_allowed_fallback(handlers::method_not_allowed)
        // Global Middleware (applied from outside in)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(CatchPanicLayer::custom(panic_response)),
        )
        .with_state(state)
}
