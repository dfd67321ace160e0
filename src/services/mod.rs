pub mod cover_letter;
pub mod gemini;
pub mod generator;
pub mod pdf_processor;
pub mod prompt;

pub use cover_letter::CoverLetterService;
pub use gemini::GeminiClient;
pub use generator::{CoverLetterGenerator, GenerationError};
pub use pdf_processor::{normalize_resume_text, ExtractionResult, PdfProcessor, MAX_RESUME_CHARS};
pub use prompt::build_prompt;
