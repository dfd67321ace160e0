pub mod generate;
pub mod health;

pub use generate::*;
pub use health::*;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::config::Config;
use crate::middleware::logging_middleware;
use crate::state::AppState;

/// API routes plus the static front end for every other path.
pub fn create_router(state: AppState, config: &Config) -> Router {
    let state = state.with_max_upload_size_mb(config.max_upload_size_mb);

    Router::new()
        .route("/api/health", get(health_handler))
        .route("/api/generate", post(generate_handler))
        .fallback_service(ServeDir::new(&config.static_dir))
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(logging_middleware))
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(DefaultBodyLimit::max(config.max_upload_size_bytes())),
        )
        .with_state(state)
}
