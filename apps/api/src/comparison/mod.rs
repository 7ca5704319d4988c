//! Side-by-side comparison of two or more profiles.

pub mod prompts;

use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::identity::Identity;
use crate::llm_client::prompts::GROUNDED_JSON_SYSTEM;
use crate::llm_client::InvokeOptions;
use crate::models::comparison::ComparisonReport;
use crate::pipeline::ModelStage;
use crate::prompt::{self, TemplateId};
use crate::resume::resolve_owned;
use crate::store::ProfileStore;
use crate::validation::schema::COMPARISON_REPORT;

const TEMPERATURE: f32 = 0.25;
const MIN_PROFILES: usize = 2;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ComparedResume<'a> {
    resume_id: Uuid,
    profile: &'a Value,
}

/// Compares the caller's resumes. Fewer than two resolvable profiles yield
/// the empty report without a model call.
pub async fn compare(
    stage: &ModelStage<'_>,
    store: &dyn ProfileStore,
    identity: &Identity,
    ids: &[Uuid],
) -> Result<ComparisonReport, AppError> {
    let rows = resolve_owned(store, identity, ids).await?;
    if rows.len() < MIN_PROFILES {
        info!(resolved = rows.len(), "Not enough resumes to compare");
        return Ok(ComparisonReport::default());
    }

    let entries: Vec<ComparedResume<'_>> = rows
        .iter()
        .map(|row| ComparedResume {
            resume_id: row.id,
            profile: &row.json_content,
        })
        .collect();
    let resumes_json = serde_json::to_string_pretty(&entries)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize profiles: {e}")))?;

    let prompt = prompt::build(TemplateId::Comparison, &[("resumes_json", resumes_json.as_str())])?;
    let options = InvokeOptions::with_temperature(TEMPERATURE).with_system(GROUNDED_JSON_SYSTEM);
    let report: ComparisonReport = stage.run(&prompt, &COMPARISON_REPORT, &options).await?;

    if report.is_empty() {
        warn!(resumes = rows.len(), "Model returned an empty comparison");
    } else {
        info!(resumes = rows.len(), "Resumes compared");
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::ScriptedModel;
    use crate::pipeline::RetryPolicy;
    use crate::resume::test_support::seed;
    use crate::store::memory::MemoryProfileStore;
    use serde_json::json;

    #[tokio::test]
    async fn test_fewer_than_two_profiles_returns_empty_report() {
        let store = MemoryProfileStore::new();
        let owner = Identity::new(Uuid::new_v4());
        let only = seed(&store, owner.user_id, json!({"skills": ["Java"]})).await;

        let model = ScriptedModel::new();
        let policy = RetryPolicy::none();
        let stage = ModelStage::new(&model, &policy);

        for ids in [vec![], vec![only.id], vec![only.id, only.id]] {
            let report = compare(&stage, &store, &owner, &ids).await.unwrap();
            assert!(report.is_empty());
        }
        assert_eq!(model.call_count(), 0);
    }

    #[tokio::test]
    async fn test_disjoint_skills_are_keyed_by_resume_id() {
        let store = MemoryProfileStore::new();
        let owner = Identity::new(Uuid::new_v4());
        let a = seed(&store, owner.user_id, json!({"skills": ["Java"]})).await;
        let b = seed(&store, owner.user_id, json!({"skills": ["Python"]})).await;

        let reply = json!({
            "resumeSummaries": [
                {"resumeId": a.id.to_string(), "uniqueSkills": ["Java"]},
                {"resumeId": b.id.to_string(), "uniqueSkills": ["Python"]}
            ],
            "comparison": {
                "commonSkills": [],
                "uniqueSkillsByResume": {
                    a.id.to_string(): ["Java"],
                    b.id.to_string(): ["Python"]
                }
            },
            "finalVerdict": "Pick by target stack."
        });
        let model = ScriptedModel::new().reply(reply.to_string());
        let policy = RetryPolicy::none();
        let stage = ModelStage::new(&model, &policy);

        let report = compare(&stage, &store, &owner, &[a.id, b.id]).await.unwrap();

        assert!(report.comparison.common_skills.is_empty());
        assert_eq!(
            report.comparison.unique_skills_by_resume[&a.id.to_string()],
            vec!["Java".to_string()]
        );
        assert_eq!(
            report.comparison.unique_skills_by_resume[&b.id.to_string()],
            vec!["Python".to_string()]
        );
        assert!(report.comparison.role_suitability.is_empty());
        assert_eq!(report.comparison.experience_comparison.summary, None);

        let prompt = &model.prompts()[0];
        assert!(prompt.contains(&a.id.to_string()));
        assert!(prompt.contains(&b.id.to_string()));
        assert!(prompt.contains("\"resumeId\""));
        assert_eq!(model.options()[0].temperature, Some(0.25));
    }

    #[tokio::test]
    async fn test_foreign_resume_in_comparison_is_forbidden() {
        let store = MemoryProfileStore::new();
        let owner = Identity::new(Uuid::new_v4());
        let mine = seed(&store, owner.user_id, json!({})).await;
        let theirs = seed(&store, Uuid::new_v4(), json!({})).await;

        let model = ScriptedModel::new();
        let policy = RetryPolicy::none();
        let stage = ModelStage::new(&model, &policy);

        let err = compare(&stage, &store, &owner, &[mine.id, theirs.id])
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
        assert_eq!(model.call_count(), 0);
    }
}
