use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Gemini API key is not configured")]
    MissingCredential,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Prompt blocked by upstream: {reason}")]
    Blocked { reason: String },

    #[error("Malformed upstream response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Upstream returned no text")]
    EmptyContent,
}

impl GenerationError {
    /// Short form used by the model probe: the status code when there is one.
    pub fn summary(&self) -> String {
        match self {
            GenerationError::Api { status, .. } => status.to_string(),
            GenerationError::Http(e) => match e.status() {
                Some(status) => status.as_u16().to_string(),
                None => e.to_string(),
            },
            other => other.to_string(),
        }
    }
}

/// Capability to turn a prompt into generated text.
///
/// Handlers only see this trait; the concrete provider is chosen at startup
/// and carried in `AppState`.
#[async_trait]
pub trait CoverLetterGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}
