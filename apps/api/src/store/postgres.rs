use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use super::ProfileStore;
use crate::errors::AppError;
use crate::models::resume::{NewResume, ProfileState, ResumeRow, ResumeSummary};

#[derive(Clone)]
pub struct PgProfileStore {
    pool: PgPool,
}

impl PgProfileStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileStore for PgProfileStore {
    async fn save(&self, resume: NewResume) -> Result<ResumeRow, AppError> {
        let NewResume {
            owner_id,
            file,
            json_content,
            origin,
        } = resume;

        let row: ResumeRow = sqlx::query_as(
            r#"
            INSERT INTO resumes
                (id, owner_id, filename, content_type, size, file_data,
                 json_content, origin, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(owner_id)
        .bind(&file.filename)
        .bind(&file.content_type)
        .bind(file.data.len() as i64)
        .bind(file.data.as_ref())
        .bind(&json_content)
        .bind(origin.as_str())
        .bind(ProfileState::Structured.as_str())
        .fetch_one(&self.pool)
        .await?;

        info!(resume_id = %row.id, owner_id = %owner_id, origin = origin.as_str(), "Stored resume");
        Ok(row)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ResumeRow>, AppError> {
        let row = sqlx::query_as("SELECT * FROM resumes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_all_by_owner(&self, owner_id: Uuid) -> Result<Vec<ResumeSummary>, AppError> {
        let rows = sqlx::query_as(
            r#"
            SELECT id, filename, content_type, size, origin, status, score, uploaded_at
            FROM resumes
            WHERE owner_id = $1
            ORDER BY uploaded_at DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn update_score(&self, id: Uuid, score: i32) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE resumes SET score = $1, status = $2 WHERE id = $3")
            .bind(score)
            .bind(ProfileState::Analyzed.as_str())
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Resume {id} not found")));
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM resumes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
