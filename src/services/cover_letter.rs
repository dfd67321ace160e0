use std::sync::Arc;

use tracing::{info, warn};

use crate::error::AppResult;
use crate::models::{CoverLetterRequest, ResumeFile};
use crate::services::generator::CoverLetterGenerator;
use crate::services::pdf_processor::PdfProcessor;
use crate::services::prompt::build_prompt;

/// The request pipeline: extraction, prompt assembly, generation.
#[derive(Clone)]
pub struct CoverLetterService {
    extractor: PdfProcessor,
    generator: Arc<dyn CoverLetterGenerator>,
}

impl CoverLetterService {
    pub fn new(generator: Arc<dyn CoverLetterGenerator>) -> Self {
        Self {
            extractor: PdfProcessor::new(),
            generator,
        }
    }

    /// Extracts the resume (when given) and assembles the prompt.
    pub async fn prepare_prompt(
        &self,
        request: &CoverLetterRequest,
        resume: Option<&ResumeFile>,
    ) -> AppResult<String> {
        let resume_text = match resume {
            Some(file) => {
                let extraction = self.extractor.extract_text(file).await?;
                if extraction.is_empty() {
                    warn!(file_name = %file.name, "Resume yielded no text, continuing without it");
                }
                extraction.text
            }
            None => String::new(),
        };

        Ok(build_prompt(request, &resume_text))
    }

    pub async fn generate(
        &self,
        request: &CoverLetterRequest,
        resume: Option<&ResumeFile>,
    ) -> AppResult<String> {
        let prompt = self.prepare_prompt(request, resume).await?;

        info!(prompt_length = prompt.len(), "Prompt assembled, calling generator");

        let cover_letter = self.generator.generate(&prompt).await?;

        info!(cover_letter_length = cover_letter.len(), "Cover letter generated");
        Ok(cover_letter)
    }
}
