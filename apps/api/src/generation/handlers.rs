//! Axum route handlers for end-to-end tailoring and the per-section
//! regenerate / refine cycle.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::generation::pipeline::{TailorOutcome, TailorPipeline, TailorRequest};
use crate::jd::keywords::extract_keywords;
use crate::jd::ValidationContext;
use crate::latex::SectionKind;
use crate::state::AppState;
use crate::validation::ValidationResult;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GenerateSectionRequest {
    pub section: SectionKind,
    /// Current section LaTeX; `\item` lines for the summary.
    pub current: String,
    pub jd_text: String,
}

#[derive(Debug, Deserialize)]
pub struct RefineSectionRequest {
    pub section: SectionKind,
    pub current: String,
    /// Free-text request, e.g. "Add more metrics".
    pub instruction: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Supplies keywords when none are given and enables the semantic summary rules.
    pub jd_text: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SectionRevision {
    pub section: SectionKind,
    pub content: String,
    pub keywords: Vec<String>,
    pub validation: ValidationResult,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/tailor
///
/// Rewrites the summary (required) plus the first experience entry and the
/// skills section when present, then validates the result.
pub async fn handle_tailor(
    State(state): State<AppState>,
    Json(request): Json<TailorRequest>,
) -> Result<Json<TailorOutcome>, AppError> {
    if request.latex.trim().is_empty() {
        return Err(AppError::Validation("latex cannot be empty".to_string()));
    }
    if request.jd_text.trim().is_empty() {
        return Err(AppError::Validation("jd_text cannot be empty".to_string()));
    }

    let pipeline = TailorPipeline {
        sections: &state.sections,
        resolver: &state.resolver,
        validators: &state.validators,
        top_keywords: state.config.validation.top_keywords_count,
    };
    let outcome = pipeline.run(&request).await?;
    Ok(Json(outcome))
}

/// POST /api/v1/sections/generate
///
/// Regenerates one section against the job description and validates it.
/// Nothing is applied to a document; the caller decides what to keep.
pub async fn handle_generate_section(
    State(state): State<AppState>,
    Json(request): Json<GenerateSectionRequest>,
) -> Result<Json<SectionRevision>, AppError> {
    if request.current.trim().is_empty() {
        return Err(AppError::Validation("current cannot be empty".to_string()));
    }
    if request.jd_text.trim().is_empty() {
        return Err(AppError::Validation("jd_text cannot be empty".to_string()));
    }

    let keywords = extract_keywords(&request.jd_text, state.config.validation.top_keywords_count);
    let metadata = state.resolver.resolve(&request.jd_text).await;
    let content = state
        .sections
        .regenerate(
            request.section,
            &request.current,
            &request.jd_text,
            &keywords,
            &metadata,
        )
        .await?;

    let context = ValidationContext::from(&metadata);
    let validation =
        state
            .validators
            .validate_section(request.section, &content, &keywords, Some(&context));
    info!(
        "{} regenerated: score={}, passed={}",
        request.section, validation.score, validation.passed
    );

    Ok(Json(SectionRevision {
        section: request.section,
        content,
        keywords,
        validation,
    }))
}

/// POST /api/v1/sections/refine
///
/// Revises one section following a free-text instruction and validates it.
pub async fn handle_refine_section(
    State(state): State<AppState>,
    Json(request): Json<RefineSectionRequest>,
) -> Result<Json<SectionRevision>, AppError> {
    if request.current.trim().is_empty() {
        return Err(AppError::Validation("current cannot be empty".to_string()));
    }
    if request.instruction.trim().is_empty() {
        return Err(AppError::Validation("instruction cannot be empty".to_string()));
    }

    let jd_text = request.jd_text.as_deref().filter(|t| !t.trim().is_empty());

    let keywords = match (request.keywords.is_empty(), jd_text) {
        (true, Some(jd)) => extract_keywords(jd, state.config.validation.top_keywords_count),
        _ => request.keywords,
    };

    let context = match jd_text {
        Some(jd) => Some(ValidationContext::from(&state.resolver.resolve(jd).await)),
        None => None,
    };

    let content = state
        .sections
        .refine(
            request.section,
            &request.current,
            &request.instruction,
            &keywords,
        )
        .await?;

    let validation =
        state
            .validators
            .validate_section(request.section, &content, &keywords, context.as_ref());
    info!(
        "{} refined: score={}, passed={}",
        request.section, validation.score, validation.passed
    );

    Ok(Json(SectionRevision {
        section: request.section,
        content,
        keywords,
        validation,
    }))
}
