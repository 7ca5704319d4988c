//! Owner-scoped access to stored resumes.
//!
//! Every read or delete of a single resume goes through `load_owned`, which
//! distinguishes "unknown id" (404) from "someone else's resume" (403).

pub mod handlers;
pub mod upload;

use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::identity::Identity;
use crate::models::resume::{ResumeRow, ResumeSummary};
use crate::store::ProfileStore;

/// Loads a resume the caller owns.
pub async fn load_owned(
    store: &dyn ProfileStore,
    identity: &Identity,
    id: Uuid,
) -> Result<ResumeRow, AppError> {
    let row = store
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))?;

    if !identity.owns(row.owner_id) {
        warn!(resume_id = %id, user_id = %identity.user_id, "Cross-owner access denied");
        return Err(AppError::Forbidden(
            "You are not allowed to access this resume".to_string(),
        ));
    }
    Ok(row)
}

/// Resolves a list of ids for a multi-profile operation.
///
/// Duplicates collapse to their first occurrence and unknown ids are
/// skipped. An id owned by someone else fails the whole call.
pub async fn resolve_owned(
    store: &dyn ProfileStore,
    identity: &Identity,
    ids: &[Uuid],
) -> Result<Vec<ResumeRow>, AppError> {
    let mut seen = Vec::with_capacity(ids.len());
    let mut rows = Vec::with_capacity(ids.len());

    for &id in ids {
        if seen.contains(&id) {
            continue;
        }
        seen.push(id);

        match load_owned(store, identity, id).await {
            Ok(row) => rows.push(row),
            Err(AppError::NotFound(_)) => {
                warn!(resume_id = %id, "Skipping unresolvable resume id");
            }
            Err(e) => return Err(e),
        }
    }
    Ok(rows)
}

pub async fn list_owned(
    store: &dyn ProfileStore,
    identity: &Identity,
) -> Result<Vec<ResumeSummary>, AppError> {
    store.find_all_by_owner(identity.user_id).await
}

pub async fn delete_owned(
    store: &dyn ProfileStore,
    identity: &Identity,
    id: Uuid,
) -> Result<(), AppError> {
    load_owned(store, identity, id).await?;
    if !store.delete(id).await? {
        return Err(AppError::NotFound(format!("Resume {id} not found")));
    }
    info!(resume_id = %id, user_id = %identity.user_id, "Deleted resume");
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::test_support::seed;
    use super::*;
    use crate::store::memory::MemoryProfileStore;
    use serde_json::json;

    #[tokio::test]
    async fn test_owner_can_read() {
        let store = MemoryProfileStore::new();
        let owner = Identity::new(Uuid::new_v4());
        let row = seed(&store, owner.user_id, json!({"skills": ["Rust"]})).await;

        let loaded = load_owned(&store, &owner, row.id).await.unwrap();
        assert_eq!(loaded.json_content["skills"], json!(["Rust"]));
    }

    #[tokio::test]
    async fn test_cross_owner_read_is_forbidden() {
        let store = MemoryProfileStore::new();
        let owner = Uuid::new_v4();
        let intruder = Identity::new(Uuid::new_v4());
        let row = seed(&store, owner, json!({})).await;

        let err = load_owned(&store, &intruder, row.id).await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_cross_owner_delete_is_forbidden_and_keeps_row() {
        let store = MemoryProfileStore::new();
        let owner = Uuid::new_v4();
        let intruder = Identity::new(Uuid::new_v4());
        let row = seed(&store, owner, json!({"skills": ["Go"]})).await;

        let err = delete_owned(&store, &intruder, row.id).await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));

        let kept = store.get(row.id).unwrap();
        assert_eq!(kept.json_content, row.json_content);
        assert_eq!(kept.score, row.score);
    }

    #[tokio::test]
    async fn test_owner_delete_removes_row() {
        let store = MemoryProfileStore::new();
        let owner = Identity::new(Uuid::new_v4());
        let row = seed(&store, owner.user_id, json!({})).await;

        delete_owned(&store, &owner, row.id).await.unwrap();
        assert!(store.get(row.id).is_none());
        assert!(matches!(
            load_owned(&store, &owner, row.id).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found() {
        let store = MemoryProfileStore::new();
        let caller = Identity::new(Uuid::new_v4());
        let err = load_owned(&store, &caller, Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_resolve_skips_unknown_and_dedupes() {
        let store = MemoryProfileStore::new();
        let owner = Identity::new(Uuid::new_v4());
        let a = seed(&store, owner.user_id, json!({})).await;

        let rows = resolve_owned(&store, &owner, &[a.id, Uuid::new_v4(), a.id])
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, a.id);
    }

    #[tokio::test]
    async fn test_resolve_rejects_foreign_ids() {
        let store = MemoryProfileStore::new();
        let owner = Identity::new(Uuid::new_v4());
        let mine = seed(&store, owner.user_id, json!({})).await;
        let theirs = seed(&store, Uuid::new_v4(), json!({})).await;

        let err = resolve_owned(&store, &owner, &[mine.id, theirs.id])
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_list_only_returns_own_resumes() {
        let store = MemoryProfileStore::new();
        let owner = Identity::new(Uuid::new_v4());
        seed(&store, owner.user_id, json!({})).await;
        seed(&store, Uuid::new_v4(), json!({})).await;

        let list = list_owned(&store, &owner).await.unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(store.len(), 2);
    }
}
