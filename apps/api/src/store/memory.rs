//! In-memory `ProfileStore` used by tests.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::ProfileStore;
use crate::errors::AppError;
use crate::models::resume::{NewResume, ProfileState, ResumeRow, ResumeSummary};

#[derive(Default)]
pub struct MemoryProfileStore {
    rows: Mutex<Vec<ResumeRow>>,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: Uuid) -> Option<ResumeRow> {
        self.rows.lock().unwrap().iter().find(|r| r.id == id).cloned()
    }

    pub fn set_status(&self, id: Uuid, status: &str) {
        if let Some(row) = self.rows.lock().unwrap().iter_mut().find(|r| r.id == id) {
            row.status = status.to_string();
        }
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn save(&self, resume: NewResume) -> Result<ResumeRow, AppError> {
        let row = ResumeRow {
            id: Uuid::new_v4(),
            owner_id: resume.owner_id,
            filename: resume.file.filename,
            content_type: resume.file.content_type,
            size: resume.file.data.len() as i64,
            file_data: resume.file.data.to_vec(),
            json_content: resume.json_content,
            origin: resume.origin.as_str().to_string(),
            status: ProfileState::Structured.as_str().to_string(),
            score: None,
            uploaded_at: Utc::now(),
        };
        self.rows.lock().unwrap().push(row.clone());
        Ok(row)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ResumeRow>, AppError> {
        Ok(self.get(id))
    }

    async fn find_all_by_owner(&self, owner_id: Uuid) -> Result<Vec<ResumeSummary>, AppError> {
        let mut rows: Vec<ResumeSummary> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.owner_id == owner_id)
            .map(ResumeRow::summary)
            .collect();
        rows.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at));
        Ok(rows)
    }

    async fn update_score(&self, id: Uuid, score: i32) -> Result<(), AppError> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))?;
        row.score = Some(score);
        row.status = ProfileState::Analyzed.as_str().to_string();
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|r| r.id != id);
        Ok(rows.len() < before)
    }
}
