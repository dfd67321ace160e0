use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, State,
    },
    http::HeaderMap,
    response::Json,
};
use std::time::Instant;
use tracing::{debug, info};

use crate::error::{AppError, AppResult};
use crate::middleware::request_id;
use crate::models::{CoverLetterRequest, CoverLetterResponse, ResumeFile};
use crate::state::AppState;

/// Raw multipart fields, before validation.
#[derive(Debug, Default)]
struct GenerationForm {
    name: Option<String>,
    job_role: Option<String>,
    company: Option<String>,
    skills: Option<String>,
    resume: Option<ResumeFile>,
}

impl GenerationForm {
    /// File type is checked before required fields so a bad upload always
    /// gets the invalid-type answer.
    fn validate(self) -> AppResult<(CoverLetterRequest, Option<ResumeFile>)> {
        if let Some(file) = &self.resume {
            if !file.is_pdf() {
                return Err(AppError::InvalidFileType {
                    mime_type: file.mime_type.clone(),
                });
            }
        }

        let request = CoverLetterRequest {
            name: required(self.name, "name")?,
            job_role: required(self.job_role, "jobRole")?,
            company: required(self.company, "company")?,
            skills: self.skills,
        };

        Ok((request, self.resume))
    }
}

fn required(value: Option<String>, field: &'static str) -> AppResult<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AppError::MissingField { field }),
    }
}

pub async fn generate_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<CoverLetterResponse>> {
    let start = Instant::now();
    let request_id = request_id(&headers);

    info!(request_id = %request_id, "Starting cover letter request");

    let multipart = multipart.map_err(|rejection| AppError::multipart(rejection.body_text()))?;

    let form = read_form(multipart, state.max_upload_size_mb).await.map_err(|e| {
        debug!(request_id = %request_id, error = %e, "Failed to read multipart form");
        e
    })?;

    if let Some(file) = &form.resume {
        info!(
            request_id = %request_id,
            file_name = %file.name,
            mime_type = ?file.mime_type,
            file_size = file.size,
            "Processing file"
        );
    }

    let (request, resume) = form.validate()?;

    debug!(
        request_id = %request_id,
        job_role = %request.job_role,
        company = %request.company,
        has_skills = request.skills().is_some(),
        has_resume = resume.is_some(),
        "Form validated"
    );

    let cover_letter = state
        .cover_letters
        .generate(&request, resume.as_ref())
        .await?;

    info!(
        request_id = %request_id,
        total_time_ms = start.elapsed().as_millis() as u64,
        "Request completed successfully"
    );

    Ok(Json(CoverLetterResponse::new(cover_letter)))
}

async fn read_form(mut multipart: Multipart, limit_mb: usize) -> AppResult<GenerationForm> {
    let to_app_error = |e: MultipartError| AppError::from_multipart(e, limit_mb);
    let mut form = GenerationForm::default();

    while let Some(field) = multipart.next_field().await.map_err(to_app_error)? {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "resume" => {
                let file_name = field.file_name().unwrap_or("").to_string();
                let content_type = field.content_type().map(|ct| ct.to_string());
                let data = field.bytes().await.map_err(to_app_error)?;

                // a part without a file name is not an upload, whatever its body
                if file_name.is_empty() {
                    debug!(
                        discarded_bytes = data.len(),
                        "Resume part has no file name, treating as no file"
                    );
                    continue;
                }

                let mut file = ResumeFile::new(file_name, data);
                if let Some(mime_type) = content_type {
                    file = file.with_mime_type(mime_type);
                }
                form.resume = Some(file);
            }
            "name" => form.name = Some(field.text().await.map_err(to_app_error)?),
            "jobRole" => form.job_role = Some(field.text().await.map_err(to_app_error)?),
            "company" => form.company = Some(field.text().await.map_err(to_app_error)?),
            "skills" => form.skills = Some(field.text().await.map_err(to_app_error)?),
            other => debug!("Ignoring unexpected form field: {}", other),
        }
    }

    Ok(form)
}
