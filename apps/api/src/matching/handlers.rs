//! Axum route handlers for resume ↔ job description matching.

use axum::{
    extract::{Multipart, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::{extract_text, UploadForm, UploadedDocument};
use crate::history::clamp_limit;
use crate::matching::MatchResult;
use crate::models::match_result::{MatchResultRow, NewMatchRecord};
use crate::state::AppState;

const RESUME_FIELD: &str = "resume";
const JD_FIELD: &str = "jobDescription";
const USER_ID_FIELD: &str = "user_id";

/// Characters of extracted text echoed back by the debug endpoint.
const DEBUG_PREVIEW_CHARS: usize = 1000;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub user_id: Uuid,
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugExtractResponse {
    pub text_length: usize,
    pub keyword_count: usize,
    pub keywords: Vec<String>,
    pub extracted_text: String,
}

fn required_file<'a>(form: &'a UploadForm, name: &str) -> Result<&'a UploadedDocument, AppError> {
    form.file(name)
        .ok_or_else(|| AppError::Validation(format!("'{name}' file is required")))
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/matching/compare
///
/// Multipart: `resume` + `jobDescription` files, optional `user_id` text field.
/// When `user_id` is present the result is also written to match history.
pub async fn handle_compare(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<MatchResult>, AppError> {
    let form = UploadForm::from_multipart(multipart, state.config.max_file_size).await?;

    let (resume, jd) = match (form.file(RESUME_FIELD), form.file(JD_FIELD)) {
        (Some(resume), Some(jd)) => (resume, jd),
        _ => {
            return Err(AppError::Validation(
                "Both resume and job description are required".to_string(),
            ))
        }
    };

    let user_id = form
        .field(USER_ID_FIELD)
        .map(|raw| {
            Uuid::parse_str(raw)
                .map_err(|_| AppError::Validation(format!("user_id '{raw}' is not a valid UUID")))
        })
        .transpose()?;

    let allowed = &state.config.allowed_extensions;
    let resume_text = extract_text(resume, allowed, "resume").await?;
    let jd_text = extract_text(jd, allowed, "job description").await?;

    let result = state.matcher.analyze_match(&resume_text, &jd_text);
    info!(
        "Comparison complete: {}% ({} matched, {} missing)",
        result.match_percentage,
        result.matched_keywords.len(),
        result.missing_skills.len()
    );

    if let Some(user_id) = user_id {
        state
            .history
            .save(NewMatchRecord {
                user_id,
                resume_file_name: resume.filename.clone(),
                jd_file_name: jd.filename.clone(),
                result: result.clone(),
            })
            .await?;
    }

    Ok(Json(result))
}

/// POST /api/matching/debug-extract
///
/// Shows what the extractor and tokenizer see for a single resume upload.
pub async fn handle_debug_extract(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<DebugExtractResponse>, AppError> {
    let form = UploadForm::from_multipart(multipart, state.config.max_file_size).await?;
    let resume = required_file(&form, RESUME_FIELD)?;

    let text = extract_text(resume, &state.config.allowed_extensions, "resume").await?;
    let keywords = state
        .matcher
        .tokenizer()
        .extract_keywords(&text, state.matcher.config().top_keywords);

    Ok(Json(DebugExtractResponse {
        text_length: text.chars().count(),
        keyword_count: keywords.len(),
        keywords: keywords.keys(),
        extracted_text: text.chars().take(DEBUG_PREVIEW_CHARS).collect(),
    }))
}

/// GET /api/matching/history?user_id=..&limit=..
pub async fn handle_history(
    State(state): State<AppState>,
    Query(params): Query<HistoryQuery>,
) -> Result<Json<Vec<MatchResultRow>>, AppError> {
    let rows = state
        .history
        .recent(params.user_id, clamp_limit(params.limit))
        .await?;
    Ok(Json(rows))
}
