//! Upload boundary: local checks that run before any analysis starts.

use bytes::Bytes;
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use crate::analysis::PDF_MIME_TYPE;

const PDF_SIGNATURE: &[u8] = b"%PDF-";
const PREVIEW_MAX_CHARS: usize = 4000;

#[derive(Debug, Error, PartialEq)]
pub enum UploadError {
    #[error("Please upload a PDF file (received {0})")]
    UnsupportedType(String),

    #[error("The uploaded file is empty")]
    Empty,

    #[error("File is too large ({size} bytes, limit {limit} bytes)")]
    TooLarge { size: usize, limit: usize },

    #[error("The uploaded file is not a valid PDF document")]
    NotPdf,

    #[error("No file was provided in the '{0}' field")]
    MissingFile(&'static str),
}

/// A PDF that passed local validation.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub file_name: String,
    pub bytes: Bytes,
}

impl UploadedDocument {
    pub fn size_bytes(&self) -> usize {
        self.bytes.len()
    }
}

/// Metadata about the document under analysis, shown next to the dashboard.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DocumentInfo {
    pub file_name: String,
    pub size_bytes: usize,
    pub preview_text: Option<String>,
}

/// Rejects anything that is not a PDF before the model is ever called.
///
/// A missing content type falls back to the file extension.
pub fn validate_upload(
    file_name: &str,
    content_type: Option<&str>,
    bytes: Bytes,
    max_bytes: usize,
) -> Result<UploadedDocument, UploadError> {
    match content_type.map(|c| c.trim().to_ascii_lowercase()) {
        Some(ct) if !ct.is_empty() => {
            let essence = ct.split(';').next().unwrap_or_default().trim().to_string();
            if essence != PDF_MIME_TYPE {
                return Err(UploadError::UnsupportedType(essence));
            }
        }
        _ => {
            if !file_name.to_ascii_lowercase().ends_with(".pdf") {
                return Err(UploadError::UnsupportedType("unknown type".to_string()));
            }
        }
    }

    if bytes.is_empty() {
        return Err(UploadError::Empty);
    }
    if bytes.len() > max_bytes {
        return Err(UploadError::TooLarge {
            size: bytes.len(),
            limit: max_bytes,
        });
    }
    if !bytes.starts_with(PDF_SIGNATURE) {
        return Err(UploadError::NotPdf);
    }

    let file_name = if file_name.trim().is_empty() {
        "resume.pdf".to_string()
    } else {
        file_name.trim().to_string()
    };

    Ok(UploadedDocument { file_name, bytes })
}

/// Extracts a plain-text preview of the document. Never fails the upload.
pub async fn extract_preview(bytes: Bytes) -> Option<String> {
    let extracted =
        tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes)).await;

    match extracted {
        Ok(Ok(text)) => Some(truncate_preview(&text)).filter(|t| !t.is_empty()),
        Ok(Err(e)) => {
            warn!("Could not extract preview text: {e}");
            None
        }
        Err(e) => {
            warn!("Preview extraction task failed: {e}");
            None
        }
    }
}

fn truncate_preview(text: &str) -> String {
    let collapsed = text
        .lines()
        .map(str::trim_end)
        .filter(|l| !l.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n");
    collapsed.chars().take(PREVIEW_MAX_CHARS).collect()
}
