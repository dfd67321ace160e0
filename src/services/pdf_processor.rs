use std::time::Instant;
use lopdf::Document;

use crate::error::{AppError, AppResult};
use crate::models::ResumeFile;

/// Upper bound on resume characters forwarded into the prompt.
pub const MAX_RESUME_CHARS: usize = 3000;

#[derive(Debug, Clone, Default)]
pub struct PdfProcessor;

#[derive(Debug)]
pub struct ExtractionResult {
    /// Normalized and truncated text, ready for the prompt.
    pub text: String,
    pub raw_length: usize,
    pub pages: Option<usize>,
    pub processing_time_ms: u64,
}

impl ExtractionResult {
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl PdfProcessor {
    pub fn new() -> Self {
        Self
    }

    pub async fn extract_text(&self, file: &ResumeFile) -> AppResult<ExtractionResult> {
        let start = Instant::now();

        tracing::info!(
            "Starting PDF text extraction for file: {} ({} bytes)",
            file.name,
            file.size
        );

        if !file.is_pdf() {
            return Err(AppError::InvalidFileType {
                mime_type: file.mime_type.clone(),
            });
        }

        // pdf-extract is synchronous and may panic on malformed input
        let content = file.content.clone();
        let extracted = tokio::task::spawn_blocking(move || {
            let pages = count_pages(&content);
            pdf_extract::extract_text_from_mem(&content)
                .map(|text| (text, pages))
                .map_err(|e| e.to_string())
        })
        .await;

        let (raw_text, pages) = match extracted {
            Ok(Ok(result)) => result,
            Ok(Err(message)) => {
                tracing::error!("PDF text extraction failed: {}", message);
                return Err(AppError::extraction(message));
            }
            Err(join_err) if join_err.is_panic() => {
                tracing::error!("PDF parser panicked while reading {}", file.name);
                return Err(AppError::extraction("PDF parser could not read the document"));
            }
            Err(join_err) => {
                return Err(AppError::internal(format!("Extraction task failed: {}", join_err)));
            }
        };

        if raw_text.trim().is_empty() {
            tracing::warn!("Parsed PDF text is empty");
        } else {
            tracing::debug!("PDF text extraction successful, {} characters", raw_text.len());
        }

        let text = normalize_resume_text(&raw_text);
        let processing_time = start.elapsed().as_millis() as u64;

        tracing::info!(
            raw_length = raw_text.len(),
            normalized_length = text.chars().count(),
            pages = ?pages,
            processing_time_ms = processing_time,
            "PDF parsed successfully"
        );

        Ok(ExtractionResult {
            text,
            raw_length: raw_text.len(),
            pages,
            processing_time_ms: processing_time,
        })
    }

    /// Check if the PDF processor is available
    pub fn is_available(&self) -> bool {
        // pure-Rust parser, nothing to probe at runtime
        true
    }
}

/// Collapses every run of `\n` into one space, trims, and keeps the first
/// [`MAX_RESUME_CHARS`] characters.
pub fn normalize_resume_text(raw: &str) -> String {
    let mut collapsed = String::with_capacity(raw.len());
    let mut in_newline_run = false;

    for ch in raw.chars() {
        if ch == '\n' {
            if !in_newline_run {
                collapsed.push(' ');
                in_newline_run = true;
            }
        } else {
            collapsed.push(ch);
            in_newline_run = false;
        }
    }

    collapsed.trim().chars().take(MAX_RESUME_CHARS).collect()
}

fn count_pages(pdf_content: &[u8]) -> Option<usize> {
    match Document::load_mem(pdf_content) {
        Ok(doc) => Some(doc.get_pages().len()),
        Err(e) => {
            tracing::warn!("PDF structure validation failed: {}, trying text extraction anyway", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PDF_MIME_TYPE;

    #[test]
    fn test_newline_runs_collapse_to_single_space() {
        assert_eq!(normalize_resume_text("Jane\n\n\nDoe\nRust"), "Jane Doe Rust");
    }

    #[test]
    fn test_only_newlines_are_collapsed() {
        // tabs and repeated spaces are left alone
        assert_eq!(normalize_resume_text("a  b\tc"), "a  b\tc");
    }

    #[test]
    fn test_leading_and_trailing_whitespace_trimmed() {
        assert_eq!(normalize_resume_text("\n\n  Senior Engineer \n"), "Senior Engineer");
        assert_eq!(normalize_resume_text("\n\n\n"), "");
    }

    #[test]
    fn test_truncates_to_max_chars() {
        let raw = "x".repeat(MAX_RESUME_CHARS + 500);
        let text = normalize_resume_text(&raw);
        assert_eq!(text.len(), MAX_RESUME_CHARS);
    }

    #[test]
    fn test_truncation_counts_characters_not_bytes() {
        let raw = "é".repeat(MAX_RESUME_CHARS + 10);
        let text = normalize_resume_text(&raw);
        assert_eq!(text.chars().count(), MAX_RESUME_CHARS);
    }

    #[test]
    fn test_truncation_happens_after_normalization() {
        let raw = format!("\n\n\n{}", "a\n\n".repeat(MAX_RESUME_CHARS));
        let text = normalize_resume_text(&raw);
        assert_eq!(text.chars().count(), MAX_RESUME_CHARS);
        assert!(text.starts_with("a a a"));
    }

    #[tokio::test]
    async fn test_garbage_bytes_are_an_extraction_error() {
        let file = ResumeFile::new("cv.pdf", &b"this is not a pdf"[..]).with_mime_type(PDF_MIME_TYPE);
        let err = PdfProcessor::new().extract_text(&file).await.unwrap_err();
        assert_eq!(err.error_code(), "EXTRACTION_FAILED");
        assert!(err.client_message().starts_with("Failed to parse resume PDF: "));
    }

    #[tokio::test]
    async fn test_rejects_non_pdf_before_parsing() {
        let file = ResumeFile::new("cv.png", &b"\x89PNG"[..]).with_mime_type("image/png");
        let err = PdfProcessor::new().extract_text(&file).await.unwrap_err();
        assert_eq!(err.error_code(), "INVALID_FILE_TYPE");
    }

    #[test]
    fn test_pdf_processor_availability() {
        assert!(PdfProcessor::default().is_available());
    }
}
