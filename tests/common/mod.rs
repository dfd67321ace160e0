//! Shared fixtures for the integration tests

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request},
    Router,
};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use coverletter::{
    create_router,
    services::{CoverLetterGenerator, GenerationError},
    AppState, Config,
};

/// Returns a fixed reply and remembers every prompt it was given.
pub struct RecordingGenerator {
    reply: String,
    prompts: Mutex<Vec<String>>,
}

impl RecordingGenerator {
    pub fn new(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: reply.to_string(),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn last_prompt(&self) -> String {
        self.prompts().pop().expect("generator was never called")
    }
}

#[async_trait]
impl CoverLetterGenerator for RecordingGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(self.reply.clone())
    }
}

/// Always fails the way an upstream quota error would.
pub struct FailingGenerator;

#[async_trait]
impl CoverLetterGenerator for FailingGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, GenerationError> {
        Err(GenerationError::Api {
            status: 429,
            message: "Resource has been exhausted".to_string(),
        })
    }
}

pub fn router_with(generator: Arc<dyn CoverLetterGenerator>) -> Router {
    router_with_config(generator, &Config::default())
}

pub fn router_with_config(generator: Arc<dyn CoverLetterGenerator>, config: &Config) -> Router {
    create_router(AppState::new(generator), config)
}

const BOUNDARY: &str = "----coverletter-test-boundary";

/// Hand-built `multipart/form-data` body.
#[derive(Default)]
pub struct MultipartBody {
    body: Vec<u8>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, file_name: &str, content_type: &str, data: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(data);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    pub fn into_request(mut self) -> Request<Body> {
        self.body
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        Request::builder()
            .method("POST")
            .uri("/api/generate")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(self.body))
            .unwrap()
    }
}

/// The three required fields for Jane Doe's application.
pub fn jane_doe_form() -> MultipartBody {
    MultipartBody::new()
        .text("name", "Jane Doe")
        .text("jobRole", "Backend Engineer")
        .text("company", "Acme Corp")
}

/// One-page PDF with one text line per entry in `lines`.
pub fn pdf_with_lines(lines: &[&str]) -> Vec<u8> {
    let mut operations = vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), 10.into()]),
        Operation::new("TL", vec![12.into()]),
        Operation::new("Td", vec![40.into(), 800.into()]),
    ];
    for line in lines {
        operations.push(Operation::new("Tj", vec![Object::string_literal(*line)]));
        operations.push(Operation::new("T*", vec![]));
    }
    operations.push(Operation::new("ET", vec![]));

    build_pdf(Content { operations })
}

/// One-page PDF whose page draws nothing.
pub fn empty_pdf() -> Vec<u8> {
    build_pdf(Content { operations: vec![] })
}

fn build_pdf(content: Content) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    });
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).unwrap();
    buffer
}

/// The quoted resume text inside a prompt, if the clause is present.
pub fn resume_clause(prompt: &str) -> Option<&str> {
    const OPEN: &str = "for reference to make it more personalized:\n\"";
    const CLOSE: &str = "\"\n\nRequirements:";
    let start = prompt.find(OPEN)? + OPEN.len();
    let end = prompt.find(CLOSE)?;
    Some(&prompt[start..end])
}
