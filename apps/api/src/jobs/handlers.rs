//! Axum route handlers for the job catalog.

use axum::{
    extract::{Multipart, Path, Query, State},
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::extraction::{extract_text, UploadForm};
use crate::jobs::{FilterOptions, JobFilter};
use crate::matching::profile::{extract_profile, ResumeProfile};
use crate::models::job::{Job, RankedJob};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct JobListResponse {
    pub count: usize,
    pub data: Vec<Job>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchAllResponse {
    pub count: usize,
    pub data: Vec<RankedJob>,
    pub profile: ResumeProfile,
    pub resume_length: usize,
}

/// GET /api/jobs
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    Query(filter): Query<JobFilter>,
) -> Result<Json<JobListResponse>, AppError> {
    let data = state.jobs.search(&filter)?;
    Ok(Json(JobListResponse {
        count: data.len(),
        data,
    }))
}

/// GET /api/jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Job>, AppError> {
    state
        .jobs
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Job {id} not found")))
}

/// GET /api/filters
pub async fn handle_filters(State(state): State<AppState>) -> Json<FilterOptions> {
    Json(state.jobs.filter_options())
}

/// POST /api/match-all
///
/// Multipart: `resume` file. Ranks every catalog job against the resume.
pub async fn handle_match_all(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<MatchAllResponse>, AppError> {
    let form = UploadForm::from_multipart(multipart, state.config.max_file_size).await?;
    let resume = form
        .file("resume")
        .ok_or_else(|| AppError::Validation("Resume required".to_string()))?;

    let resume_text = extract_text(resume, &state.config.allowed_extensions, "resume").await?;
    let profile = extract_profile(&resume_text);
    let data = state.jobs.rank(&resume_text, &state.matcher);

    info!(
        "Ranked {} jobs for resume '{}' (best: {}%)",
        data.len(),
        resume.filename,
        data.first().map(|j| j.match_percentage).unwrap_or(0)
    );

    Ok(Json(MatchAllResponse {
        count: data.len(),
        data,
        profile,
        resume_length: resume_text.chars().count(),
    }))
}
