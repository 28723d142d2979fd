pub mod config;
pub mod error;
pub mod handlers;
pub mod state;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use state::AppState;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/health", get(handlers::health))
        .route(
            "/api/v1/profile",
            post(handlers::save_profile).get(handlers::get_profile),
        )
        .route("/api/v1/conferences", post(handlers::create_conference))
        .route(
            "/api/v1/conferences/created",
            get(handlers::get_conferences_created),
        )
        .route(
            "/api/v1/conferences/query",
            post(handlers::query_conferences),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
