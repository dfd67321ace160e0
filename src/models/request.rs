use bytes::Bytes;

pub const PDF_MIME_TYPE: &str = "application/pdf";

/// Form fields of a single `/api/generate` submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoverLetterRequest {
    pub name: String,
    pub job_role: String,
    pub company: String,
    pub skills: Option<String>,
}

impl CoverLetterRequest {
    pub fn new(
        name: impl Into<String>,
        job_role: impl Into<String>,
        company: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            job_role: job_role.into(),
            company: company.into(),
            skills: None,
        }
    }

    pub fn with_skills(mut self, skills: impl Into<String>) -> Self {
        self.skills = Some(skills.into());
        self
    }

    /// Skills text, if a non-empty value was submitted. Whitespace counts.
    pub fn skills(&self) -> Option<&str> {
        self.skills.as_deref().filter(|s| !s.is_empty())
    }
}

/// An uploaded resume, held in memory for the lifetime of one request.
#[derive(Debug, Clone)]
pub struct ResumeFile {
    pub name: String,
    pub size: usize,
    pub content: Bytes,
    pub mime_type: Option<String>,
}

impl ResumeFile {
    pub fn new(name: impl Into<String>, content: impl Into<Bytes>) -> Self {
        let content = content.into();
        Self {
            name: name.into(),
            size: content.len(),
            content,
            mime_type: None,
        }
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    /// Only the declared media type counts; file name and magic bytes are ignored.
    pub fn is_pdf(&self) -> bool {
        self.mime_type.as_deref() == Some(PDF_MIME_TYPE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_pdf_requires_exact_mime_type() {
        let pdf = ResumeFile::new("cv.pdf", &b"%PDF-1.5"[..]).with_mime_type(PDF_MIME_TYPE);
        assert!(pdf.is_pdf());

        let png = ResumeFile::new("cv.pdf", &b"%PDF-1.5"[..]).with_mime_type("image/png");
        assert!(!png.is_pdf());

        let untyped = ResumeFile::new("cv.pdf", &b"%PDF-1.5"[..]);
        assert!(!untyped.is_pdf());

        let with_params =
            ResumeFile::new("cv.pdf", &b"%PDF"[..]).with_mime_type("application/pdf; charset=binary");
        assert!(!with_params.is_pdf());
    }

    #[test]
    fn test_only_empty_skills_are_ignored() {
        let request = CoverLetterRequest::new("Jane", "Engineer", "Acme").with_skills("");
        assert_eq!(request.skills(), None);

        let request = CoverLetterRequest::new("Jane", "Engineer", "Acme").with_skills("   ");
        assert_eq!(request.skills(), Some("   "));

        let request = CoverLetterRequest::new("Jane", "Engineer", "Acme").with_skills("Rust");
        assert_eq!(request.skills(), Some("Rust"));
    }

    #[test]
    fn test_size_tracks_content() {
        let file = ResumeFile::new("cv.pdf", vec![0u8; 42]);
        assert_eq!(file.size, 42);
    }
}
