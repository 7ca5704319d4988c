use axum::{
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::analysis::analyze;
use crate::comparison::compare;
use crate::errors::AppError;
use crate::extraction::{process_upload, store_supplied_profile};
use crate::identity::Identity;
use crate::models::analysis::AnalysisReport;
use crate::models::comparison::ComparisonReport;
use crate::models::profile::ResumeProfile;
use crate::models::recommendation::{RecommendationItem, RecommendationRequest};
use crate::models::resume::{ResumeDetail, ResumeSummary};
use crate::recommendation::recommend;
use crate::resume::upload::read_form;
use crate::resume::{delete_owned, list_owned, load_owned};
use crate::state::AppState;

/// POST /resume/extract
pub async fn handle_extract(
    State(state): State<AppState>,
    _identity: Identity,
    multipart: Multipart,
) -> Result<String, AppError> {
    let form = read_form(multipart).await?;
    state.extractor.extract_text(&form.file).await
}

/// POST /resume/upload-and-process
pub async fn handle_upload_and_process(
    State(state): State<AppState>,
    identity: Identity,
    multipart: Multipart,
) -> Result<Json<ResumeProfile>, AppError> {
    let form = read_form(multipart).await?;
    let (_, profile) = process_upload(
        state.extractor.as_ref(),
        &state.stage(),
        state.store.as_ref(),
        &identity,
        form.file,
    )
    .await?;
    Ok(Json(profile))
}

/// POST /resume/upload
pub async fn handle_upload(
    State(state): State<AppState>,
    identity: Identity,
    multipart: Multipart,
) -> Result<StatusCode, AppError> {
    let form = read_form(multipart).await?;
    let raw = form
        .json_content
        .ok_or_else(|| AppError::Validation("Multipart field 'jsonContent' is required".into()))?;
    let profile = serde_json::from_str(&raw)
        .map_err(|e| AppError::Validation(format!("jsonContent is not valid JSON: {e}")))?;

    store_supplied_profile(state.store.as_ref(), &identity, form.file, profile).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /resume
pub async fn handle_list(
    State(state): State<AppState>,
    identity: Identity,
) -> Result<Json<Vec<ResumeSummary>>, AppError> {
    Ok(Json(list_owned(state.store.as_ref(), &identity).await?))
}

/// GET /resume/:id
pub async fn handle_get(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<Uuid>,
) -> Result<Json<ResumeDetail>, AppError> {
    let row = load_owned(state.store.as_ref(), &identity, id).await?;
    Ok(Json(row.into()))
}

/// DELETE /resume/:id
pub async fn handle_delete(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    delete_owned(state.store.as_ref(), &identity, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /resume/:id/file
pub async fn handle_download(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let row = load_owned(state.store.as_ref(), &identity, id).await?;
    let disposition = format!(
        "attachment; filename=\"{}\"",
        header_safe_filename(&row.filename)
    );
    Ok((
        [
            (header::CONTENT_TYPE, row.content_type),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        row.file_data,
    ))
}

/// GET /resume/:id/analysis
pub async fn handle_analysis(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<Uuid>,
) -> Result<Json<AnalysisReport>, AppError> {
    let report = analyze(&state.stage(), state.store.as_ref(), &identity, id).await?;
    Ok(Json(report))
}

/// POST /resume/career/recommendations
pub async fn handle_recommendations(
    State(state): State<AppState>,
    identity: Identity,
    Json(req): Json<RecommendationRequest>,
) -> Result<Json<Vec<RecommendationItem>>, AppError> {
    let items = recommend(
        &state.stage(),
        state.store.as_ref(),
        &identity,
        &req.resume_ids,
        &req.filters,
    )
    .await?;
    Ok(Json(items))
}

/// POST /resume/resumes-comparison
pub async fn handle_comparison(
    State(state): State<AppState>,
    identity: Identity,
    Json(ids): Json<Vec<Uuid>>,
) -> Result<Json<ComparisonReport>, AppError> {
    let report = compare(&state.stage(), state.store.as_ref(), &identity, &ids).await?;
    Ok(Json(report))
}

/// Keeps a stored filename usable inside a quoted header parameter.
fn header_safe_filename(filename: &str) -> String {
    let cleaned: String = filename
        .chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c.is_control() || !c.is_ascii() => '_',
            c => c,
        })
        .collect();
    if cleaned.trim().is_empty() {
        "resume".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_filename_is_sanitized() {
        assert_eq!(header_safe_filename("cv.pdf"), "cv.pdf");
        assert_eq!(header_safe_filename("my \"best\" cv.pdf"), "my _best_ cv.pdf");
        assert_eq!(header_safe_filename("résumé.pdf"), "r_sum_.pdf");
        assert_eq!(header_safe_filename("a\r\nb"), "a__b");
        assert_eq!(header_safe_filename(""), "resume");
    }
}
