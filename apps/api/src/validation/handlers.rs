//! Axum route handler for standalone section validation.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::jd::keywords::extract_keywords;
use crate::jd::ValidationContext;
use crate::state::AppState;
use crate::validation::{OverallReport, SectionScores, SectionTexts};

#[derive(Debug, Deserialize)]
pub struct ValidateSectionsRequest {
    /// `\item` lines, one bullet per line.
    pub summary: Option<String>,
    pub experience: Option<String>,
    pub skills: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    /// When present, enables the semantic summary rules and supplies keywords
    /// if none were given.
    pub jd_text: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ValidateSectionsResponse {
    pub sections: SectionScores,
    pub report: OverallReport,
    pub keywords: Vec<String>,
    pub context: Option<ValidationContext>,
}

/// POST /api/v1/sections/validate
pub async fn handle_validate_sections(
    State(state): State<AppState>,
    Json(request): Json<ValidateSectionsRequest>,
) -> Result<Json<ValidateSectionsResponse>, AppError> {
    if request.summary.is_none() && request.experience.is_none() && request.skills.is_none() {
        return Err(AppError::Validation(
            "at least one of summary, experience or skills is required".to_string(),
        ));
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

    let texts = SectionTexts {
        summary: request.summary.as_deref(),
        experience: request.experience.as_deref(),
        skills: request.skills.as_deref(),
    };
    let (sections, report) = state
        .validators
        .validate_all(&texts, &keywords, context.as_ref());

    Ok(Json(ValidateSectionsResponse {
        sections,
        report,
        keywords,
        context,
    }))
}
