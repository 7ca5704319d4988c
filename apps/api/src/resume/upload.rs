//! Multipart form parsing for resume uploads.

use axum::extract::multipart::{Multipart, MultipartError};
use tracing::debug;

use crate::errors::AppError;
use crate::models::resume::UploadedFile;

const FILE_FIELD: &str = "file";
const JSON_FIELD: &str = "jsonContent";
const FALLBACK_FILENAME: &str = "resume";

#[derive(Debug)]
pub struct ResumeForm {
    pub file: UploadedFile,
    /// Raw `jsonContent` field, when the client sent one.
    pub json_content: Option<String>,
}

/// Reads the `file` field and the optional `jsonContent` field. Unknown
/// fields are ignored.
pub async fn read_form(mut multipart: Multipart) -> Result<ResumeForm, AppError> {
    let mut file = None;
    let mut json_content = None;

    while let Some(field) = multipart.next_field().await.map_err(upload_error)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            FILE_FIELD => {
                let filename = field
                    .file_name()
                    .filter(|f| !f.trim().is_empty())
                    .unwrap_or(FALLBACK_FILENAME)
                    .to_string();
                let content_type = field
                    .content_type()
                    .map(str::to_string)
                    .unwrap_or_else(|| guess_content_type(&filename));
                let data = field.bytes().await.map_err(upload_error)?;
                file = Some(UploadedFile {
                    filename,
                    content_type,
                    data,
                });
            }
            JSON_FIELD => {
                json_content = Some(field.text().await.map_err(upload_error)?);
            }
            other => debug!(field = other, "Ignoring unknown multipart field"),
        }
    }

    let file = file.ok_or_else(|| {
        AppError::Validation(format!("Multipart field '{FILE_FIELD}' is required"))
    })?;
    if file.data.is_empty() {
        return Err(AppError::Validation("Uploaded file is empty".to_string()));
    }

    Ok(ResumeForm { file, json_content })
}

fn guess_content_type(filename: &str) -> String {
    mime_guess::from_path(filename)
        .first_or_octet_stream()
        .to_string()
}

fn upload_error(e: MultipartError) -> AppError {
    AppError::Validation(format!("Failed to read upload: {e}"))
}
