//! Cover letter generator service
//!
//! Accepts an application form with an optional PDF resume, extracts the
//! resume text, and asks Google Gemini to write the cover letter.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use handlers::create_router;
pub use state::AppState;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the global subscriber; `RUST_LOG` overrides `default_filter`.
pub fn init_tracing(default_filter: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}
