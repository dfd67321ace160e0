use std::sync::Arc;

use crate::services::{CoverLetterGenerator, CoverLetterService};

/// Shared application state handed to every handler through axum's `State`.
#[derive(Clone)]
pub struct AppState {
    pub cover_letters: CoverLetterService,
    /// Reported to clients whose upload hits the body limit.
    pub max_upload_size_mb: usize,
}

impl AppState {
    pub fn new(generator: Arc<dyn CoverLetterGenerator>) -> Self {
        Self {
            cover_letters: CoverLetterService::new(generator),
            max_upload_size_mb: crate::config::Config::default().max_upload_size_mb,
        }
    }

    pub fn with_max_upload_size_mb(mut self, max_upload_size_mb: usize) -> Self {
        self.max_upload_size_mb = max_upload_size_mb;
        self
    }
}
