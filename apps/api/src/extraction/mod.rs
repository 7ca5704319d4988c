//! Extraction path: document → text → model → validated profile → store.

pub mod prompts;
pub mod text;

use tracing::{debug, info};

use crate::errors::AppError;
use crate::identity::Identity;
use crate::llm_client::InvokeOptions;
use crate::models::profile::ResumeProfile;
use crate::models::resume::{NewResume, ProfileState, ResumeOrigin, ResumeRow, UploadedFile};
use crate::pipeline::ModelStage;
use crate::prompt::{self, TemplateId};
use crate::store::ProfileStore;
use crate::validation::{self, schema::RESUME_PROFILE};
use text::TextExtractor;

/// Turns resume text into a validated profile.
pub async fn extract_profile(
    stage: &ModelStage<'_>,
    resume_text: &str,
) -> Result<ResumeProfile, AppError> {
    let prompt = prompt::build(TemplateId::Extraction, &[("resume_text", resume_text)])?;
    stage
        .run(&prompt, &RESUME_PROFILE, &InvokeOptions::default())
        .await
}

/// Full upload-and-process pipeline. Nothing is stored unless every step
/// succeeds.
pub async fn process_upload(
    extractor: &dyn TextExtractor,
    stage: &ModelStage<'_>,
    store: &dyn ProfileStore,
    identity: &Identity,
    file: UploadedFile,
) -> Result<(ResumeRow, ResumeProfile), AppError> {
    let mut state = ProfileState::Uploaded;

    let text = extractor.extract_text(&file).await?;
    advance(&mut state, ProfileState::TextExtracted);

    let profile = extract_profile(stage, &text).await?;
    let json_content = serde_json::to_value(&profile)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize profile: {e}")))?;
    advance(&mut state, ProfileState::Structured);

    let row = store
        .save(NewResume {
            owner_id: identity.user_id,
            file,
            json_content,
            origin: ResumeOrigin::UserUploaded,
        })
        .await?;

    info!(resume_id = %row.id, user_id = %identity.user_id, "Resume extracted and stored");
    Ok((row, profile))
}

/// Stores a document together with a client-supplied profile. The profile
/// goes through the same validator as model output.
pub async fn store_supplied_profile(
    store: &dyn ProfileStore,
    identity: &Identity,
    file: UploadedFile,
    profile: serde_json::Value,
) -> Result<ResumeRow, AppError> {
    let json_content = validation::conform_value(profile, &RESUME_PROFILE).map_err(|e| {
        AppError::Validation(format!("jsonContent is not a valid resume profile: {e}"))
    })?;

    let row = store
        .save(NewResume {
            owner_id: identity.user_id,
            file,
            json_content,
            origin: ResumeOrigin::SystemGenerated,
        })
        .await?;

    info!(resume_id = %row.id, user_id = %identity.user_id, "Resume stored with supplied profile");
    Ok(row)
}

fn advance(state: &mut ProfileState, next: ProfileState) {
    debug_assert!(state.can_transition_to(next), "{state} -> {next}");
    debug!(from = %state, to = %next, "Profile state transition");
    *state = next;
}
