use std::fmt;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// How the profile JSON of a stored resume came to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResumeOrigin {
    /// Extracted by the model from the uploaded document.
    UserUploaded,
    /// Supplied by the client alongside the document.
    SystemGenerated,
}

impl ResumeOrigin {
    pub fn as_str(self) -> &'static str {
        match self {
            ResumeOrigin::UserUploaded => "USER_UPLOADED",
            ResumeOrigin::SystemGenerated => "SYSTEM_GENERATED",
        }
    }
}

/// Lifecycle of a profile:
/// `UPLOADED → TEXT_EXTRACTED → STRUCTURED → [ANALYZED]* → DELETED`.
///
/// Only STRUCTURED and ANALYZED are ever persisted; the earlier states live
/// inside a single extraction request and DELETED removes the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProfileState {
    Uploaded,
    TextExtracted,
    Structured,
    Analyzed,
    Deleted,
}

impl ProfileState {
    pub fn as_str(self) -> &'static str {
        match self {
            ProfileState::Uploaded => "UPLOADED",
            ProfileState::TextExtracted => "TEXT_EXTRACTED",
            ProfileState::Structured => "STRUCTURED",
            ProfileState::Analyzed => "ANALYZED",
            ProfileState::Deleted => "DELETED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "UPLOADED" => Some(ProfileState::Uploaded),
            "TEXT_EXTRACTED" => Some(ProfileState::TextExtracted),
            "STRUCTURED" => Some(ProfileState::Structured),
            "ANALYZED" => Some(ProfileState::Analyzed),
            "DELETED" => Some(ProfileState::Deleted),
            _ => None,
        }
    }

    pub fn can_transition_to(self, next: ProfileState) -> bool {
        use ProfileState::*;
        matches!(
            (self, next),
            (Uploaded, TextExtracted)
                // client-supplied JSON skips text extraction
                | (Uploaded, Structured)
                | (TextExtracted, Structured)
                | (Structured, Analyzed)
                | (Analyzed, Analyzed)
                | (Structured, Deleted)
                | (Analyzed, Deleted)
        )
    }
}

impl fmt::Display for ProfileState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored resume: original document plus its validated profile.
#[derive(Debug, Clone, FromRow)]
pub struct ResumeRow {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub filename: String,
    pub content_type: String,
    pub size: i64,
    pub file_data: Vec<u8>,
    pub json_content: Value,
    pub origin: String,
    pub status: String,
    pub score: Option<i32>,
    pub uploaded_at: DateTime<Utc>,
}

impl ResumeRow {
    pub fn state(&self) -> Option<ProfileState> {
        ProfileState::parse(&self.status)
    }

    pub fn summary(&self) -> ResumeSummary {
        ResumeSummary {
            id: self.id,
            filename: self.filename.clone(),
            content_type: self.content_type.clone(),
            size: self.size,
            origin: self.origin.clone(),
            status: self.status.clone(),
            score: self.score,
            uploaded_at: self.uploaded_at,
        }
    }
}

/// List view of a stored resume, without the document bytes or profile.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ResumeSummary {
    pub id: Uuid,
    pub filename: String,
    pub content_type: String,
    pub size: i64,
    pub origin: String,
    pub status: String,
    pub score: Option<i32>,
    pub uploaded_at: DateTime<Utc>,
}

/// Single-resume view: summary fields plus the profile JSON.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeDetail {
    #[serde(flatten)]
    pub summary: ResumeSummary,
    pub json_content: Value,
}

impl From<ResumeRow> for ResumeDetail {
    fn from(row: ResumeRow) -> Self {
        let summary = row.summary();
        ResumeDetail {
            summary,
            json_content: row.json_content,
        }
    }
}

/// A document received over HTTP.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub content_type: String,
    pub data: Bytes,
}

/// Everything needed to insert a resume row.
#[derive(Debug, Clone)]
pub struct NewResume {
    pub owner_id: Uuid,
    pub file: UploadedFile,
    /// Must already have passed the response validator.
    pub json_content: Value,
    pub origin: ResumeOrigin,
}
