//! Filter-aware recommendations over one or more profiles.
//!
//! Filters are handed to the model as constraints; the returned items are
//! checked against the schema but not re-filtered.

pub mod prompts;

use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::identity::Identity;
use crate::llm_client::prompts::GROUNDED_JSON_SYSTEM;
use crate::llm_client::InvokeOptions;
use crate::models::recommendation::{RecommendationFilters, RecommendationItem};
use crate::pipeline::ModelStage;
use crate::prompt::{self, TemplateId};
use crate::resume::resolve_owned;
use crate::store::ProfileStore;
use crate::validation::schema::RECOMMENDATIONS;

const TEMPERATURE: f32 = 0.25;

pub async fn recommend(
    stage: &ModelStage<'_>,
    store: &dyn ProfileStore,
    identity: &Identity,
    ids: &[Uuid],
    filters: &RecommendationFilters,
) -> Result<Vec<RecommendationItem>, AppError> {
    let rows = resolve_owned(store, identity, ids).await?;
    if rows.is_empty() {
        info!(requested = ids.len(), "No resolvable resumes, skipping recommendations");
        return Ok(Vec::new());
    }

    let profiles: Vec<&Value> = rows.iter().map(|row| &row.json_content).collect();
    let resumes_json = to_pretty(&profiles)?;
    let filters_json = to_pretty(filters)?;
    let instructions = filter_instructions(filters);

    let prompt = prompt::build(
        TemplateId::Recommendations,
        &[
            ("resumes_json", resumes_json.as_str()),
            ("filters_json", filters_json.as_str()),
            ("filter_instructions", instructions.as_str()),
        ],
    )?;

    let options = InvokeOptions::with_temperature(TEMPERATURE).with_system(GROUNDED_JSON_SYSTEM);
    let items: Vec<RecommendationItem> = stage.run(&prompt, &RECOMMENDATIONS, &options).await?;

    info!(resumes = rows.len(), items = items.len(), "Recommendations generated");
    Ok(items)
}

/// One line per active filter. Inactive filters add nothing.
pub fn filter_instructions(filters: &RecommendationFilters) -> String {
    let mut lines = Vec::new();

    if !filters.types.is_empty() {
        let types: Vec<String> = filters.types.iter().map(enum_name).collect();
        lines.push(format!("- \"type\" must be one of: {}", types.join(", ")));
    }
    if !filters.levels.is_empty() {
        let levels: Vec<String> = filters.levels.iter().map(enum_name).collect();
        lines.push(format!("- \"level\" must be one of: {}", levels.join(", ")));
    }
    if filters.free_only {
        lines.push("- Only free items: \"price\" must be 0".to_string());
    } else if let Some(range) = filters.price_range {
        match (range.min, range.max) {
            (Some(min), Some(max)) => {
                lines.push(format!("- \"price\" must be between {min} and {max}"))
            }
            (Some(min), None) => lines.push(format!("- \"price\" must be at least {min}")),
            (None, Some(max)) => lines.push(format!("- \"price\" must be at most {max}")),
            (None, None) => {}
        }
    }
    if !filters.durations.is_empty() {
        let durations: Vec<&str> = filters.durations.iter().map(|d| d.describe()).collect();
        lines.push(format!("- \"duration\" must be {}", durations.join(" or ")));
    }
    if !filters.providers.is_empty() {
        lines.push(format!(
            "- \"provider\" must be one of: {}",
            filters.providers.join(", ")
        ));
    }
    if let Some(query) = filters
        .search_query
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
    {
        lines.push(format!(
            "- \"title\" or \"description\" must relate to: \"{query}\""
        ));
    }

    if lines.is_empty() {
        return "- No additional constraints".to_string();
    }
    lines.join("\n")
}

fn enum_name<T: serde::Serialize>(value: &T) -> String {
    match serde_json::to_value(value) {
        Ok(Value::String(name)) => name,
        _ => String::new(),
    }
}

fn to_pretty<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, AppError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize prompt input: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::ScriptedModel;
    use crate::models::recommendation::{
        DurationBucket, Level, PriceRange, RecommendationType,
    };
    use crate::pipeline::RetryPolicy;
    use crate::resume::test_support::seed;
    use crate::store::memory::MemoryProfileStore;
    use serde_json::json;

    #[test]
    fn test_no_filters_means_no_constraints() {
        let text = filter_instructions(&RecommendationFilters::default());
        assert_eq!(text, "- No additional constraints");
    }

    #[test]
    fn test_only_active_filters_are_listed() {
        let filters = RecommendationFilters {
            types: vec![RecommendationType::Course, RecommendationType::Certification],
            levels: vec![Level::Beginner],
            durations: vec![DurationBucket::Short],
            search_query: Some("  kubernetes ".into()),
            ..Default::default()
        };
        let text = filter_instructions(&filters);

        assert!(text.contains("\"type\" must be one of: COURSE, CERTIFICATION"));
        assert!(text.contains("\"level\" must be one of: BEGINNER"));
        assert!(text.contains("under 4 weeks"));
        assert!(text.contains("\"kubernetes\""));
        assert!(!text.contains("price"));
        assert!(!text.contains("provider"));
    }

    #[test]
    fn test_each_active_filter_is_one_line() {
        let filters = RecommendationFilters {
            providers: vec!["Coursera".into(), "edX".into()],
            price_range: Some(PriceRange {
                min: None,
                max: Some(50.0),
            }),
            ..Default::default()
        };
        assert_eq!(
            filter_instructions(&filters),
            "- \"price\" must be at most 50\n- \"provider\" must be one of: Coursera, edX"
        );
    }

    #[test]
    fn test_free_only_overrides_price_range() {
        let filters = RecommendationFilters {
            free_only: true,
            price_range: Some(PriceRange {
                min: Some(10.0),
                max: Some(50.0),
            }),
            ..Default::default()
        };
        let text = filter_instructions(&filters);
        assert!(text.contains("must be 0"));
        assert!(!text.contains("between"));
    }

    #[test]
    fn test_filters_deserialize_from_camel_case() {
        let filters: RecommendationFilters = serde_json::from_value(json!({
            "types": ["COURSE"],
            "priceRange": {"min": 0, "max": 100},
            "freeOnly": false,
            "providers": ["Coursera"]
        }))
        .unwrap();
        assert_eq!(filters.types, vec![RecommendationType::Course]);
        assert_eq!(filters.price_range.unwrap().max, Some(100.0));
        assert!(filters.levels.is_empty());
    }

    #[tokio::test]
    async fn test_empty_array_is_a_valid_answer() {
        let store = MemoryProfileStore::new();
        let owner = Identity::new(Uuid::new_v4());
        let row = seed(&store, owner.user_id, json!({"skills": ["Python"]})).await;

        let model = ScriptedModel::new().reply("[]");
        let policy = RetryPolicy::none();
        let stage = ModelStage::new(&model, &policy);

        let items = recommend(
            &stage,
            &store,
            &owner,
            &[row.id],
            &RecommendationFilters::default(),
        )
        .await
        .unwrap();

        assert!(items.is_empty());
        assert_eq!(model.call_count(), 1);
    }

    #[tokio::test]
    async fn test_filters_and_profiles_reach_the_prompt() {
        let store = MemoryProfileStore::new();
        let owner = Identity::new(Uuid::new_v4());
        let row = seed(&store, owner.user_id, json!({"skills": ["Terraform"]})).await;

        let model = ScriptedModel::new().reply(
            r#"```json
            [{"type": "COURSE", "title": "Intro to Kubernetes", "level": "BEGINNER",
              "price": 0, "matchScore": "88", "skills": ["Kubernetes"]}]
            ```"#,
        );
        let policy = RetryPolicy::none();
        let stage = ModelStage::new(&model, &policy);
        let filters = RecommendationFilters {
            types: vec![RecommendationType::Course],
            free_only: true,
            ..Default::default()
        };

        let items = recommend(&stage, &store, &owner, &[row.id], &filters)
            .await
            .unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].kind, Some(RecommendationType::Course));
        assert_eq!(items[0].match_score, Some(88.0));
        assert_eq!(items[0].provider, None);

        let prompt = &model.prompts()[0];
        assert!(prompt.contains("Terraform"));
        assert!(prompt.contains("\"freeOnly\": true"));
        assert!(prompt.contains("\"type\" must be one of: COURSE"));
        assert_eq!(model.options()[0].temperature, Some(0.25));
    }

    #[tokio::test]
    async fn test_unknown_recommendation_type_is_a_schema_violation() {
        let store = MemoryProfileStore::new();
        let owner = Identity::new(Uuid::new_v4());
        let row = seed(&store, owner.user_id, json!({})).await;

        let model = ScriptedModel::new().reply(r#"[{"type": "WEBINAR", "title": "x"}]"#);
        let policy = RetryPolicy::none();
        let stage = ModelStage::new(&model, &policy);

        let err = recommend(
            &stage,
            &store,
            &owner,
            &[row.id],
            &RecommendationFilters::default(),
        )
        .await
        .unwrap_err();

        match err {
            AppError::SchemaViolation { path, .. } => assert_eq!(path, "$[0].type"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_no_resolvable_profiles_skips_the_model() {
        let store = MemoryProfileStore::new();
        let owner = Identity::new(Uuid::new_v4());
        let model = ScriptedModel::new();
        let policy = RetryPolicy::none();
        let stage = ModelStage::new(&model, &policy);

        let items = recommend(
            &stage,
            &store,
            &owner,
            &[Uuid::new_v4()],
            &RecommendationFilters::default(),
        )
        .await
        .unwrap();

        assert!(items.is_empty());
        assert_eq!(model.call_count(), 0);
    }
}
