use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/journal", post(handlers::journal_form))
        .route("/auth", get(handlers::auth_page))
        .route("/auth/login", post(handlers::login_form))
        .route("/auth/signup", post(handlers::signup_form))
        .route("/auth/oauth/:provider", get(handlers::oauth_placeholder))
        .route("/premium", get(handlers::premium_placeholder))
        .route("/api/journal", post(handlers::submit))
        .route("/api/entries", get(handlers::get_entries))
        .route("/api/stats", get(handlers::get_stats))
        .route("/api/login", post(handlers::login))
        .route("/api/signup", post(handlers::signup))
        .with_state(state)
}
