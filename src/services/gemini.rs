//! Google Gemini `generateContent` client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::Config;
use crate::services::generator::{CoverLetterGenerator, GenerationError};

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    role: &'a str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

impl GenerateContentResponse {
    /// Text of the first candidate, all text parts joined.
    fn text(&self) -> Option<String> {
        let candidate = self.candidates.first()?;
        let text: String = candidate
            .content
            .as_ref()?
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(
        api_key: Option<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, GenerationError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            api_key,
            model: model.into(),
            base_url: base_url.into(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, GenerationError> {
        Self::new(
            config.usable_api_key().map(str::to_string),
            config.gemini_model.clone(),
            config.gemini_api_base_url.clone(),
            config.generation_timeout(),
        )
    }

    /// Same credentials and transport, different model.
    pub fn with_model(&self, model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..self.clone()
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

#[async_trait]
impl CoverLetterGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(GenerationError::MissingCredential)?;

        let request_body = GenerateContentRequest {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        debug!(model = %self.model, prompt_length = prompt.len(), "Calling Gemini generateContent");

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<GeminiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            warn!(status = status.as_u16(), "Gemini API returned an error");
            return Err(GenerationError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body)?;

        if let Some(reason) = parsed
            .prompt_feedback
            .as_ref()
            .and_then(|feedback| feedback.block_reason.clone())
        {
            return Err(GenerationError::Blocked { reason });
        }

        let text = parsed.text().ok_or_else(|| {
            if let Some(reason) = parsed.candidates.first().and_then(|c| c.finish_reason.as_deref()) {
                debug!(finish_reason = reason, "Gemini candidate carried no text");
            }
            GenerationError::EmptyContent
        })?;

        debug!(model = %self.model, response_length = text.len(), "Gemini call succeeded");
        Ok(text)
    }
}
