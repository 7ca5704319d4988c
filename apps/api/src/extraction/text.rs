//! Document → plain text.
//!
//! Uploads are staged in a named temp file for the duration of the
//! extraction. The file handle is owned by `with_staged`, so the file is
//! removed when it drops: on success, on error, and on a parser panic.

use std::io::Write;
use std::path::Path;

use async_trait::async_trait;
use tracing::debug;

use crate::errors::AppError;
use crate::models::resume::UploadedFile;

const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract_text(&self, file: &UploadedFile) -> Result<String, AppError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
    PlainText,
}

impl DocumentKind {
    /// Detects the kind from the file extension, falling back to the
    /// declared content type.
    pub fn detect(filename: &str, content_type: &str) -> Option<Self> {
        let extension = filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "pdf" => return Some(DocumentKind::Pdf),
            "docx" => return Some(DocumentKind::Docx),
            "txt" | "md" | "text" => return Some(DocumentKind::PlainText),
            _ => {}
        }

        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match essence.as_str() {
            "application/pdf" => Some(DocumentKind::Pdf),
            DOCX_MIME => Some(DocumentKind::Docx),
            "text/plain" | "text/markdown" => Some(DocumentKind::PlainText),
            _ => None,
        }
    }

    fn suffix(self) -> &'static str {
        match self {
            DocumentKind::Pdf => ".pdf",
            DocumentKind::Docx => ".docx",
            DocumentKind::PlainText => ".txt",
        }
    }
}

/// PDF via `pdf-extract`, DOCX via `docx-rs`, plain text as UTF-8.
#[derive(Debug, Clone, Default)]
pub struct DocumentTextExtractor;

#[async_trait]
impl TextExtractor for DocumentTextExtractor {
    async fn extract_text(&self, file: &UploadedFile) -> Result<String, AppError> {
        let kind = DocumentKind::detect(&file.filename, &file.content_type).ok_or_else(|| {
            AppError::Extraction(format!(
                "Unsupported document type: {} ({})",
                file.filename, file.content_type
            ))
        })?;

        let data = file.data.clone();
        let text = tokio::task::spawn_blocking(move || {
            with_staged(&data, kind.suffix(), |path| read_document(kind, path))
        })
        .await
        .map_err(|e| {
            if e.is_panic() {
                AppError::Extraction(format!("Document parser crashed on {:?} input", kind))
            } else {
                AppError::Internal(anyhow::anyhow!("Text extraction task failed: {e}"))
            }
        })??;

        let text = tidy(&text);
        if text.is_empty() {
            return Err(AppError::Extraction(
                "Document contains no extractable text".to_string(),
            ));
        }

        debug!(filename = %file.filename, ?kind, chars = text.len(), "Extracted document text");
        Ok(text)
    }
}

/// Writes `data` to a temp file, hands its path to `read`, and removes the
/// file before returning.
fn with_staged<T>(
    data: &[u8],
    suffix: &str,
    read: impl FnOnce(&Path) -> Result<T, AppError>,
) -> Result<T, AppError> {
    let mut staged = tempfile::Builder::new()
        .prefix("uploaded-")
        .suffix(suffix)
        .tempfile()
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to stage upload: {e}")))?;
    staged
        .write_all(data)
        .and_then(|_| staged.flush())
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to stage upload: {e}")))?;

    read(staged.path())
}

fn read_document(kind: DocumentKind, path: &Path) -> Result<String, AppError> {
    match kind {
        DocumentKind::Pdf => pdf_extract::extract_text(path)
            .map_err(|e| AppError::Extraction(format!("Unreadable PDF: {e}"))),
        DocumentKind::Docx => docx_text(&read_bytes(path)?),
        DocumentKind::PlainText => String::from_utf8(read_bytes(path)?)
            .map_err(|_| AppError::Extraction("Text file is not valid UTF-8".to_string())),
    }
}

fn read_bytes(path: &Path) -> Result<Vec<u8>, AppError> {
    std::fs::read(path)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to read staged upload: {e}")))
}

fn docx_text(data: &[u8]) -> Result<String, AppError> {
    let doc = docx_rs::read_docx(data)
        .map_err(|e| AppError::Extraction(format!("Unreadable DOCX: {e}")))?;

    let mut content = String::new();
    for child in &doc.document.children {
        match child {
            docx_rs::DocumentChild::Paragraph(p) => push_paragraph(&mut content, p),
            docx_rs::DocumentChild::Table(t) => push_table(&mut content, t),
            _ => {}
        }
    }
    Ok(content)
}

fn push_paragraph(out: &mut String, paragraph: &docx_rs::Paragraph) {
    push_runs(out, &paragraph.children);
    out.push('\n');
}

/// Run text, including runs inside hyperlinks.
fn push_runs(out: &mut String, children: &[docx_rs::ParagraphChild]) {
    for child in children {
        match child {
            docx_rs::ParagraphChild::Run(run) => {
                for child in &run.children {
                    if let docx_rs::RunChild::Text(t) = child {
                        out.push_str(&t.text);
                    }
                }
            }
            docx_rs::ParagraphChild::Hyperlink(link) => push_runs(out, &link.children),
            _ => {}
        }
    }
}

/// One line per cell paragraph, row by row. Nested tables are walked too.
#[allow(irrefutable_let_patterns)]
fn push_table(out: &mut String, table: &docx_rs::Table) {
    for child in &table.rows {
        let docx_rs::TableChild::TableRow(row) = child else {
            continue;
        };
        for child in &row.cells {
            let docx_rs::TableRowChild::TableCell(cell) = child else {
                continue;
            };
            for content in &cell.children {
                match content {
                    docx_rs::TableCellContent::Paragraph(p) => push_paragraph(out, p),
                    docx_rs::TableCellContent::Table(t) => push_table(out, t),
                    _ => {}
                }
            }
        }
    }
}

/// Trims trailing whitespace per line and collapses runs of blank lines.
fn tidy(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut blank_run = 0;
    for line in text.lines().map(str::trim_end) {
        if line.is_empty() {
            blank_run += 1;
            if blank_run > 1 {
                continue;
            }
        } else {
            blank_run = 0;
        }
        out.push_str(line);
        out.push('\n');
    }
    out.trim().to_string()
}
