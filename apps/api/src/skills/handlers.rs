//! Axum route handler for the skill extraction API.

use anyhow::Context;
use async_trait::async_trait;
use axum::{
    extract::{multipart::MultipartError, FromRequest, Multipart, Request, State},
    http::{header::CONTENT_TYPE, StatusCode},
    Json,
};
use bytes::Bytes;
use serde_json::Value;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::skills::upload::read_document;
use crate::skills::SkillReport;
use crate::state::AppState;

/// Multipart field carrying the uploaded resume.
pub const RESUME_FIELD: &str = "resume";

pub const NO_CONTENT: &str =
    "No resume content provided. Please send either text data or upload a file.";
pub const EMPTY_TEXT: &str = "Failed to extract text from the provided content";
pub const TEXT_NOT_STRING: &str = "Field 'text' must be a string";

// ────────────────────────────────────────────────────────────────────────────
// Request extraction
// ────────────────────────────────────────────────────────────────────────────

/// Where the resume text comes from, decided by the request's content type.
#[derive(Debug)]
pub enum ResumeInput {
    /// Multipart upload in the `resume` field.
    File { filename: String, data: Bytes },
    /// JSON body `{"text": "..."}`.
    Text(String),
    /// Neither a `resume` file nor a `text` field.
    Missing,
}

#[async_trait]
impl<S> FromRequest<S> for ResumeInput
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.to_ascii_lowercase().starts_with("multipart/form-data"));

        if is_multipart {
            let mut multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| AppError::Validation(e.body_text()))?;
            return read_multipart(&mut multipart).await;
        }

        let body = Bytes::from_request(req, state).await.map_err(|e| {
            if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                AppError::PayloadTooLarge
            } else {
                AppError::Validation(e.body_text())
            }
        })?;
        parse_json_text(&body)
    }
}

/// Returns the first `resume` field that carries a filename.
async fn read_multipart(multipart: &mut Multipart) -> Result<ResumeInput, AppError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(RESUME_FIELD) {
            continue;
        }
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };
        let data = field.bytes().await.map_err(multipart_error)?;
        return Ok(ResumeInput::File { filename, data });
    }
    Ok(ResumeInput::Missing)
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge
    } else {
        AppError::Validation(format!("Invalid multipart body: {}", e.body_text()))
    }
}

/// Non-JSON bodies and bodies without `text` count as missing content. A `null`
/// text is present but empty, so it fails the empty-text check instead.
fn parse_json_text(body: &[u8]) -> Result<ResumeInput, AppError> {
    let Ok(value) = serde_json::from_slice::<Value>(body) else {
        return Ok(ResumeInput::Missing);
    };
    match value.get("text") {
        None => Ok(ResumeInput::Missing),
        Some(Value::Null) => Ok(ResumeInput::Text(String::new())),
        Some(Value::String(text)) => Ok(ResumeInput::Text(text.clone())),
        Some(_) => Err(AppError::Validation(TEXT_NOT_STRING.to_string())),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/extract-skills
///
/// Accepts a multipart `resume` upload (.pdf/.txt) or JSON `{"text": ...}` and
/// returns the sorted, deduplicated skills found in it.
pub async fn handle_extract_skills(
    State(state): State<AppState>,
    input: ResumeInput,
) -> Result<Json<SkillReport>, AppError> {
    let text = match input {
        ResumeInput::File { filename, data } => {
            debug!("Received upload '{filename}' ({} bytes)", data.len());
            read_document(&state.config.upload_dir, &filename, data).await?
        }
        ResumeInput::Text(text) => text,
        ResumeInput::Missing => return Err(AppError::Validation(NO_CONTENT.to_string())),
    };

    if text.trim().is_empty() {
        return Err(AppError::Validation(EMPTY_TEXT.to_string()));
    }

    let extractor = state.extractor.clone();
    let report = tokio::task::spawn_blocking(move || extractor.extract(&text))
        .await
        .context("Skill extraction task failed")?;

    info!("Extracted {} skills", report.count);
    Ok(Json(report))
}
