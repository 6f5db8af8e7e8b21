//! Axum route handlers for the job-description API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::jd::keywords::{extract_keywords, extract_phrases};
use crate::jd::metadata::JobDescriptionMetadata;
use crate::state::AppState;

const PHRASE_MAX_WORDS: usize = 3;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct KeywordsRequest {
    pub jd_text: String,
    pub top_n: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct KeywordsResponse {
    pub keywords: Vec<String>,
    pub phrases: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeJdRequest {
    pub jd_text: String,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeJdResponse {
    pub metadata: JobDescriptionMetadata,
    pub suggested_experience_years: String,
    pub leadership_guidance: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/keywords
///
/// Top-N keywords (configured default when `top_n` is omitted) plus recurring phrases.
pub async fn handle_keywords(
    State(state): State<AppState>,
    Json(request): Json<KeywordsRequest>,
) -> Result<Json<KeywordsResponse>, AppError> {
    if request.jd_text.trim().is_empty() {
        return Err(AppError::Validation("jd_text cannot be empty".to_string()));
    }

    let top_n = request
        .top_n
        .unwrap_or(state.config.validation.top_keywords_count);

    Ok(Json(KeywordsResponse {
        keywords: extract_keywords(&request.jd_text, top_n),
        phrases: extract_phrases(&request.jd_text, PHRASE_MAX_WORDS),
    }))
}

/// POST /api/v1/jd/analyze
///
/// Resolves metadata (model first, heuristics on failure) and the derived
/// prompt hints.
pub async fn handle_analyze_jd(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeJdRequest>,
) -> Result<Json<AnalyzeJdResponse>, AppError> {
    if request.jd_text.trim().is_empty() {
        return Err(AppError::Validation("jd_text cannot be empty".to_string()));
    }

    let metadata = state.resolver.resolve(&request.jd_text).await;

    Ok(Json(AnalyzeJdResponse {
        suggested_experience_years: metadata.suggested_experience_years(),
        leadership_guidance: metadata.leadership_guidance().to_string(),
        metadata,
    }))
}
