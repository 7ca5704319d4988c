//! Single-profile quality review.

pub mod prompts;

use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::identity::Identity;
use crate::llm_client::prompts::GROUNDED_JSON_SYSTEM;
use crate::llm_client::InvokeOptions;
use crate::models::analysis::AnalysisReport;
use crate::models::resume::ProfileState;
use crate::pipeline::ModelStage;
use crate::prompt::{self, TemplateId};
use crate::resume::load_owned;
use crate::store::ProfileStore;
use crate::validation::schema::ANALYSIS_REPORT;

/// Reviews a stored profile. A report that carries a score also updates the
/// stored score; a report without one leaves it untouched.
pub async fn analyze(
    stage: &ModelStage<'_>,
    store: &dyn ProfileStore,
    identity: &Identity,
    id: Uuid,
) -> Result<AnalysisReport, AppError> {
    let row = load_owned(store, identity, id).await?;
    match row.state() {
        Some(state) if state.can_transition_to(ProfileState::Analyzed) => {}
        Some(state) => {
            return Err(AppError::Validation(format!(
                "Resume {id} cannot be analyzed in state {state}"
            )))
        }
        None => {
            return Err(AppError::Internal(anyhow::anyhow!(
                "Resume {id} has unknown status '{}'",
                row.status
            )))
        }
    }

    let resume_json = serde_json::to_string_pretty(&row.json_content)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize profile: {e}")))?;
    let prompt = prompt::build(TemplateId::Analysis, &[("resume_json", resume_json.as_str())])?;

    let options = InvokeOptions::default().with_system(GROUNDED_JSON_SYSTEM);
    let report: AnalysisReport = stage.run(&prompt, &ANALYSIS_REPORT, &options).await?;

    if let Some(score) = report.score {
        store.update_score(id, i32::from(score)).await?;
    }

    info!(resume_id = %id, score = ?report.score, "Resume analyzed");
    Ok(report)
}
