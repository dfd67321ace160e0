use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::error::Error as _;
use thiserror::Error;

use crate::services::GenerationError;

pub type AppResult<T> = Result<T, AppError>;

pub const INVALID_FILE_TYPE_MESSAGE: &str = "Invalid file type. Please upload a PDF.";
pub const GENERATION_FAILED_MESSAGE: &str =
    "Failed to generate cover letter. Ensure API Key is set and valid.";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid file type. Please upload a PDF.")]
    InvalidFileType { mime_type: Option<String> },

    #[error("Missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("Invalid form data: {message}")]
    InvalidMultipart { message: String },

    #[error("File too large. Maximum upload size is {limit_mb}MB.")]
    PayloadTooLarge { limit_mb: usize },

    #[error("Failed to parse resume PDF: {message}")]
    ExtractionFailed { message: String },

    #[error("Failed to generate cover letter. Ensure API Key is set and valid.")]
    Generation(#[source] GenerationError),

    #[error("Internal server error: {message}")]
    Internal { message: String },
}

impl AppError {
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::InvalidFileType { .. } => "INVALID_FILE_TYPE",
            AppError::MissingField { .. } => "MISSING_FIELD",
            AppError::InvalidMultipart { .. } => "INVALID_MULTIPART",
            AppError::PayloadTooLarge { .. } => "PAYLOAD_TOO_LARGE",
            AppError::ExtractionFailed { .. } => "EXTRACTION_FAILED",
            AppError::Generation(_) => "GENERATION_FAILED",
            AppError::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidFileType { .. } => StatusCode::BAD_REQUEST,
            AppError::MissingField { .. } => StatusCode::BAD_REQUEST,
            AppError::InvalidMultipart { .. } => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::ExtractionFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Generation(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message sent to the client. Internal failures are reduced to a generic line.
    pub fn client_message(&self) -> String {
        match self {
            AppError::Internal { .. } => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

/// Error details attached to the response so the request logging middleware
/// can report them under the request's own `x-request-id`.
#[derive(Debug, Clone)]
pub struct ErrorContext {
    pub error_code: &'static str,
    pub detail: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let detail = match self.source() {
            Some(source) => format!("{}: {}", self, source),
            None => self.to_string(),
        };

        let body = Json(json!({ "error": self.client_message() }));

        let mut response = (status, body).into_response();
        response.extensions_mut().insert(ErrorContext {
            error_code: self.error_code(),
            detail,
        });
        response
    }
}

impl From<GenerationError> for AppError {
    fn from(err: GenerationError) -> Self {
        AppError::Generation(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal {
            message: err.to_string(),
        }
    }
}

impl AppError {
    /// A body cut off by the upload limit surfaces as a multipart read error.
    pub fn from_multipart(err: MultipartError, limit_mb: usize) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge { limit_mb }
        } else {
            AppError::InvalidMultipart {
                message: err.body_text(),
            }
        }
    }

    pub fn extraction(message: impl Into<String>) -> Self {
        AppError::ExtractionFailed {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        AppError::Internal {
            message: message.into(),
        }
    }

    pub fn multipart(message: impl Into<String>) -> Self {
        AppError::InvalidMultipart {
            message: message.into(),
        }
    }
}
