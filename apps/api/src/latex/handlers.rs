//! Axum route handlers for the section engine.

use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::latex::{
    apply_edits, escape_latex_special_chars, extract_all, latex_to_plain_text, ExtractedSections,
    SectionEdits,
};

#[derive(Debug, Deserialize)]
pub struct ExtractSectionsRequest {
    pub latex: String,
}

#[derive(Debug, Serialize)]
pub struct ExtractSectionsResponse {
    pub sections: ExtractedSections,
    /// Readable previews of the experience and skills blocks.
    pub experience_preview: Option<String>,
    pub skills_preview: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ApplySectionsRequest {
    pub latex: String,
    /// Treat summary bullets as plain text and escape `% $ & # _ { } ^ ~`.
    #[serde(default)]
    pub escape_summary: bool,
    #[serde(flatten)]
    pub edits: SectionEdits,
}

#[derive(Debug, Serialize)]
pub struct ApplySectionsResponse {
    pub latex: String,
}

/// POST /api/v1/sections/extract
///
/// Missing sections come back as `null`; that is not an error.
pub async fn handle_extract_sections(
    Json(request): Json<ExtractSectionsRequest>,
) -> Result<Json<ExtractSectionsResponse>, AppError> {
    if request.latex.trim().is_empty() {
        return Err(AppError::Validation("latex cannot be empty".to_string()));
    }

    let sections = extract_all(&request.latex);
    Ok(Json(ExtractSectionsResponse {
        experience_preview: sections.experience.as_deref().map(latex_to_plain_text),
        skills_preview: sections.skills.as_deref().map(latex_to_plain_text),
        sections,
    }))
}

/// POST /api/v1/sections/apply
///
/// Applies every provided replacement or none of them: a missing anchor is a 422.
pub async fn handle_apply_sections(
    Json(request): Json<ApplySectionsRequest>,
) -> Result<Json<ApplySectionsResponse>, AppError> {
    if request.latex.trim().is_empty() {
        return Err(AppError::Validation("latex cannot be empty".to_string()));
    }

    let mut edits = request.edits;
    if request.escape_summary {
        if let Some(bullets) = edits.summary.as_mut() {
            for bullet in bullets.iter_mut() {
                *bullet = escape_latex_special_chars(bullet);
            }
        }
    }

    let latex = apply_edits(&request.latex, &edits)?;
    Ok(Json(ApplySectionsResponse { latex }))
}
