//! Tailoring pipeline: one resume, one job description, one pass.
//!
//! Flow: extract keywords → resolve JD metadata → extract sections →
//!       generate replacements → apply edits → validate → aggregate.
//!
//! The summary is mandatory; experience and skills are rewritten only when the
//! document has them. Nothing is applied unless every generation step succeeded.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::generation::generator::{item_lines, SectionGenerator};
use crate::jd::keywords::extract_keywords;
use crate::jd::{JobDescriptionMetadata, MetadataResolver, ValidationContext};
use crate::latex::{
    apply_edits, extract_all, ExtractedSections, SectionEdits, SectionError, SectionKind,
};
use crate::validation::{OverallReport, SectionScores, SectionTexts, SectionValidators};

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct TailorRequest {
    pub latex: String,
    pub jd_text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TailorOutcome {
    /// The full updated document.
    pub latex: String,
    pub keywords: Vec<String>,
    pub metadata: JobDescriptionMetadata,
    pub original_sections: ExtractedSections,
    pub tailored_sections: ExtractedSections,
    pub validation: SectionScores,
    pub report: OverallReport,
}

/// Everything the pipeline needs, borrowed from application state.
pub struct TailorPipeline<'a> {
    pub sections: &'a SectionGenerator,
    pub resolver: &'a MetadataResolver,
    pub validators: &'a SectionValidators,
    pub top_keywords: usize,
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline
// ────────────────────────────────────────────────────────────────────────────

impl TailorPipeline<'_> {
    pub async fn run(&self, request: &TailorRequest) -> Result<TailorOutcome, AppError> {
        let jd_text = request.jd_text.as_str();

        // Step 1: keywords
        let keywords = extract_keywords(jd_text, self.top_keywords);
        info!("Extracted {} keywords: {:?}", keywords.len(), keywords);

        // Step 2: metadata (never fails; heuristics cover model outages)
        let metadata = self.resolver.resolve(jd_text).await;
        info!(
            "JD metadata: role_level={}, companies={:?}, leadership_required={}",
            metadata.role_level, metadata.company_names, metadata.leadership_required
        );

        // Step 3: current sections
        let original = extract_all(&request.latex);
        let old_summary = original
            .summary
            .as_deref()
            .ok_or(SectionError::AnchorNotFound(SectionKind::Summary))?;

        // Step 4: generation
        let summary = self
            .sections
            .generate_summary(old_summary, jd_text, &keywords, &metadata)
            .await?;

        let experience = match original.experience.as_deref() {
            Some(old) => Some(
                self.sections
                    .generate_experience(old, jd_text, &keywords)
                    .await?,
            ),
            None => {
                info!("No experience entry found, leaving it untouched");
                None
            }
        };

        let skills = match original.skills.as_deref() {
            Some(old) => Some(self.sections.generate_skills(old, jd_text, &keywords).await?),
            None => {
                info!("No skills section found, leaving it untouched");
                None
            }
        };

        // Step 5: apply
        let edits = SectionEdits {
            summary: Some(summary),
            experience,
            skills,
        };
        let latex = apply_edits(&request.latex, &edits)?;

        // Step 6: validate + aggregate
        let summary_lines = edits.summary.as_deref().map(item_lines);
        let texts = SectionTexts {
            summary: summary_lines.as_deref(),
            experience: edits.experience.as_deref(),
            skills: edits.skills.as_deref(),
        };
        let context = ValidationContext::from(&metadata);
        let (validation, report) = self
            .validators
            .validate_all(&texts, &keywords, Some(&context));

        info!(
            "Tailoring complete: overall_score={}, band={:?}, all_passed={}",
            report.overall_score, report.band, report.all_passed
        );

        let SectionEdits {
            summary,
            experience,
            skills,
        } = edits;

        Ok(TailorOutcome {
            latex,
            keywords,
            metadata,
            original_sections: original,
            tailored_sections: ExtractedSections {
                summary,
                experience,
                skills,
            },
            validation,
            report,
        })
    }
}
