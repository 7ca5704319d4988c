//! Profile persistence behind a trait so engines and handlers can be tested
//! against an in-memory store.

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::{NewResume, ResumeRow, ResumeSummary};

#[cfg(test)]
pub mod memory;
pub mod postgres;

pub use postgres::PgProfileStore;

/// Storage contract. No ownership checks happen here; callers go through
/// `resume::load_owned` and friends.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn save(&self, resume: NewResume) -> Result<ResumeRow, AppError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ResumeRow>, AppError>;

    /// Newest first.
    async fn find_all_by_owner(&self, owner_id: Uuid) -> Result<Vec<ResumeSummary>, AppError>;

    /// Sets the score and moves the profile to ANALYZED.
    async fn update_score(&self, id: Uuid, score: i32) -> Result<(), AppError>;

    /// Returns whether a row was removed.
    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;
}
