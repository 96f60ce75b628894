//! Upload handling — stages an uploaded resume on disk and turns it into text.
//!
//! The staged file is owned by a `StagedUpload` guard and removed when the guard
//! drops, on success and error paths alike. A failed removal is only logged.

use std::path::{Path, PathBuf};

use bytes::Bytes;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::errors::AppError;

pub const INVALID_FORMAT: &str = "Invalid file format. Allowed formats: PDF, TXT";

/// Accepted upload types, chosen by filename suffix only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Text,
}

impl DocumentKind {
    /// Case-insensitive suffix check. `None` for anything but `.pdf` and `.txt`.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let (_, ext) = filename.rsplit_once('.')?;
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(DocumentKind::Pdf),
            "txt" => Some(DocumentKind::Text),
            _ => None,
        }
    }

    fn extension(self) -> &'static str {
        match self {
            DocumentKind::Pdf => "pdf",
            DocumentKind::Text => "txt",
        }
    }
}

/// An upload written to the upload directory under a generated name.
#[derive(Debug)]
pub struct StagedUpload {
    path: PathBuf,
}

impl StagedUpload {
    pub async fn write(dir: &Path, kind: DocumentKind, data: &[u8]) -> std::io::Result<Self> {
        let path = dir.join(format!("{}.{}", Uuid::new_v4(), kind.extension()));
        // Guard exists before the write so a partial file is still removed.
        let staged = StagedUpload { path };
        tokio::fs::write(&staged.path, data).await?;
        Ok(staged)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for StagedUpload {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!("Removed staged upload {}", self.path.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!(
                "Failed to remove staged upload {}: {e}",
                self.path.display()
            ),
        }
    }
}

/// Validates the filename, stages the bytes and extracts their text.
///
/// PDF decoding failures produce empty text rather than an error; the caller's
/// empty-text check reports them. Storage and UTF-8 failures are `AppError::Upload`.
pub async fn read_document(
    upload_dir: &Path,
    filename: &str,
    data: Bytes,
) -> Result<String, AppError> {
    let kind = DocumentKind::from_filename(filename)
        .ok_or_else(|| AppError::Validation(INVALID_FORMAT.to_string()))?;

    let staged = StagedUpload::write(upload_dir, kind, &data)
        .await
        .map_err(|e| AppError::Upload(e.to_string()))?;
    debug!(
        "Staged {} byte {:?} upload at {}",
        data.len(),
        kind,
        staged.path().display()
    );

    let stored = tokio::fs::read(staged.path())
        .await
        .map_err(|e| AppError::Upload(e.to_string()))?;

    match kind {
        DocumentKind::Text => {
            String::from_utf8(stored).map_err(|e| AppError::Upload(e.to_string()))
        }
        DocumentKind::Pdf => Ok(extract_pdf_text(stored).await),
    }
}

/// Decodes PDF text off the async runtime. Errors and decoder panics yield "".
async fn extract_pdf_text(data: Vec<u8>) -> String {
    match tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&data)).await {
        Ok(Ok(text)) => text,
        Ok(Err(e)) => {
            warn!("Error extracting text from PDF: {e}");
            String::new()
        }
        Err(e) => {
            warn!("PDF extraction task failed: {e}");
            String::new()
        }
    }
}
