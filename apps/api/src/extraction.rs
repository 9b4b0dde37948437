//! Document-to-text extraction for uploaded resumes and job descriptions.
//!
//! Runs before the matching core and guarantees it only ever sees usable text:
//! unsupported formats and empty extractions are rejected here.

use std::collections::HashMap;

use axum::extract::Multipart;
use bytes::Bytes;
use tracing::{info, warn};

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Text,
    Docx,
}

impl DocumentFormat {
    /// Detects the format from the file extension (case-insensitive).
    pub fn from_filename(filename: &str) -> Option<Self> {
        match file_extension(filename)?.as_str() {
            "pdf" => Some(DocumentFormat::Pdf),
            "txt" => Some(DocumentFormat::Text),
            "docx" => Some(DocumentFormat::Docx),
            _ => None,
        }
    }
}

pub fn file_extension(filename: &str) -> Option<String> {
    let (_, ext) = filename.rsplit_once('.')?;
    if ext.is_empty() {
        return None;
    }
    Some(ext.to_lowercase())
}

/// A single uploaded document, as received from a multipart field.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub filename: String,
    pub bytes: Bytes,
}

/// Files and text fields of a multipart upload, keyed by field name.
#[derive(Debug, Default)]
pub struct UploadForm {
    files: HashMap<String, UploadedDocument>,
    fields: HashMap<String, String>,
}

impl UploadForm {
    /// Drains a multipart body. Parts with a filename are files; others are text fields.
    /// Any file larger than `max_file_size` rejects the whole upload.
    pub async fn from_multipart(
        mut multipart: Multipart,
        max_file_size: usize,
    ) -> Result<Self, AppError> {
        let mut form = UploadForm::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();
            match field.file_name().map(str::to_string) {
                Some(filename) => {
                    let bytes = field.bytes().await?;
                    if bytes.len() > max_file_size {
                        return Err(AppError::PayloadTooLarge(format!(
                            "'{filename}' is {} bytes; the limit is {max_file_size}",
                            bytes.len()
                        )));
                    }
                    form.files.insert(name, UploadedDocument { filename, bytes });
                }
                None => {
                    form.fields.insert(name, field.text().await?);
                }
            }
        }

        Ok(form)
    }

    pub fn file(&self, name: &str) -> Option<&UploadedDocument> {
        self.files.get(name)
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }
}

/// Extracts plain text from an uploaded document.
///
/// `role` names the document in error messages ("resume", "job description").
pub async fn extract_text(
    document: &UploadedDocument,
    allowed_extensions: &[String],
    role: &str,
) -> Result<String, AppError> {
    let ext = file_extension(&document.filename).unwrap_or_default();
    if !allowed_extensions.iter().any(|allowed| *allowed == ext) {
        warn!("Rejected {role} upload with extension '{ext}'");
        return Err(AppError::UnsupportedFormat(format!(
            "Unsupported {role} format '.{ext}'. Allowed: {}",
            allowed_extensions.join(", ")
        )));
    }

    let text = match DocumentFormat::from_filename(&document.filename) {
        Some(DocumentFormat::Text) => String::from_utf8_lossy(&document.bytes).into_owned(),
        Some(DocumentFormat::Pdf) => extract_pdf(document.bytes.clone()).await?,
        Some(DocumentFormat::Docx) => {
            return Err(AppError::UnsupportedFormat(
                "DOCX extraction is not supported. Please upload a PDF or TXT file.".to_string(),
            ))
        }
        None => {
            return Err(AppError::UnsupportedFormat(format!(
                "Unsupported {role} format '.{ext}'"
            )))
        }
    };

    if text.trim().is_empty() {
        return Err(AppError::UnprocessableEntity(format!(
            "Could not extract text from {role}"
        )));
    }

    info!(
        "Extracted {} chars from {role} '{}'",
        text.len(),
        document.filename
    );
    Ok(text)
}

/// PDF parsing is CPU-bound and synchronous; keep it off the async workers.
async fn extract_pdf(bytes: Bytes) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("PDF extraction task failed: {e}")))?
        .map_err(|e| AppError::Extraction(format!("Failed to extract text from PDF: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allowed() -> Vec<String> {
        vec!["pdf".to_string(), "txt".to_string(), "docx".to_string()]
    }

    fn doc(filename: &str, body: &[u8]) -> UploadedDocument {
        UploadedDocument {
            filename: filename.to_string(),
            bytes: Bytes::copy_from_slice(body),
        }
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(
            DocumentFormat::from_filename("cv.PDF"),
            Some(DocumentFormat::Pdf)
        );
        assert_eq!(
            DocumentFormat::from_filename("jd.final.txt"),
            Some(DocumentFormat::Text)
        );
        assert_eq!(
            DocumentFormat::from_filename("resume.docx"),
            Some(DocumentFormat::Docx)
        );
        assert_eq!(DocumentFormat::from_filename("notes.md"), None);
        assert_eq!(DocumentFormat::from_filename("README"), None);
        assert_eq!(DocumentFormat::from_filename("trailing."), None);
    }

    #[tokio::test]
    async fn test_plain_text_extraction() {
        let text = extract_text(&doc("resume.txt", b"Rust engineer"), &allowed(), "resume")
            .await
            .unwrap();
        assert_eq!(text, "Rust engineer");
    }

    #[tokio::test]
    async fn test_blank_text_is_unprocessable() {
        let err = extract_text(&doc("resume.txt", b"  \n "), &allowed(), "resume")
            .await
            .unwrap_err();
        match err {
            AppError::UnprocessableEntity(msg) => assert!(msg.contains("resume")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_disallowed_extension_rejected() {
        let only_pdf = vec!["pdf".to_string()];
        let err = extract_text(&doc("jd.txt", b"text"), &only_pdf, "job description")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UnsupportedFormat(_)));
    }

    #[tokio::test]
    async fn test_docx_is_unsupported() {
        let err = extract_text(&doc("resume.docx", b"PK"), &allowed(), "resume")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UnsupportedFormat(_)));
    }

    #[tokio::test]
    async fn test_corrupt_pdf_reports_extraction_error() {
        let err = extract_text(&doc("resume.pdf", b"not a pdf"), &allowed(), "resume")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Extraction(_) | AppError::Internal(_)
        ));
    }
}
