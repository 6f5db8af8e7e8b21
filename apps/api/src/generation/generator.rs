//! Section Generator — rewrites one resume section at a time through the model.
//!
//! Each call renders a section prompt, asks for LaTeX only, and cleans the reply
//! down to the first LaTeX construct. The summary is additionally parsed back into
//! bullets and retried when the model returns no `\item` lines.
//!
//! `regenerate` and `refine` drive the per-section edit cycle: a fresh rewrite
//! against the job description, or a revision following a free-text request.

use std::sync::Arc;

use tracing::{info, warn};

use crate::errors::AppError;
use crate::generation::prompts::{
    EXPERIENCE_PROMPT_TEMPLATE, REFINEMENT_PROMPT_TEMPLATE, SKILLS_PROMPT_TEMPLATE,
    SUMMARY_PROMPT_TEMPLATE,
};
use crate::jd::JobDescriptionMetadata;
use crate::latex::{parse_item_lines, SectionKind};
use crate::llm_client::{prompts::LATEX_ONLY_SYSTEM, strip_code_fences, TextGenerator};
use crate::validation::SummaryRules;

const GENERATION_TEMPERATURE: f32 = 0.7;

/// Max extra attempts when the summary reply contains no bullets.
const MAX_GENERATION_RETRIES: u32 = 2;

/// Lines that mark where the LaTeX body of a reply begins.
const LATEX_START_MARKERS: [&str; 4] = ["\\item", "\\section", "\\begin", "\\resumeSubheading"];

pub struct SectionGenerator {
    generator: Arc<dyn TextGenerator>,
    summary_rules: SummaryRules,
}

impl SectionGenerator {
    pub fn new(generator: Arc<dyn TextGenerator>, summary_rules: SummaryRules) -> Self {
        Self {
            generator,
            summary_rules,
        }
    }

    /// Returns the new summary bullets, without the `\item` prefix.
    pub async fn generate_summary(
        &self,
        old_bullets: &[String],
        jd_text: &str,
        keywords: &[String],
        metadata: &JobDescriptionMetadata,
    ) -> Result<Vec<String>, AppError> {
        let old_summary = item_lines(old_bullets);
        let company_names = if metadata.company_names.is_empty() {
            "unknown".to_string()
        } else {
            metadata.company_names.join(", ")
        };

        let prompt = SUMMARY_PROMPT_TEMPLATE
            .replace("{old_summary}", &old_summary)
            .replace("{job_description}", jd_text)
            .replace("{keywords}", &keywords.join(", "))
            .replace("{company_names}", &company_names)
            .replace("{role_level}", metadata.role_level.as_str())
            .replace("{experience_range}", &metadata.suggested_experience_years())
            .replace("{leadership_guidance}", metadata.leadership_guidance())
            .replace("{bullet_count}", &self.summary_rules.bullet_count.to_string())
            .replace("{char_min}", &self.summary_rules.char_min.to_string())
            .replace("{char_max}", &self.summary_rules.char_max.to_string());

        for attempt in 0..=MAX_GENERATION_RETRIES {
            let latex = self.complete(&prompt, "Summary generation").await?;
            let bullets = parse_item_lines(&latex);
            if !bullets.is_empty() {
                info!(
                    "Summary generated: {} bullets (attempt {})",
                    bullets.len(),
                    attempt + 1
                );
                return Ok(bullets);
            }
            warn!(
                "Summary reply had no \\item lines (attempt {}/{})",
                attempt + 1,
                MAX_GENERATION_RETRIES + 1
            );
        }

        Err(AppError::Llm(format!(
            "Summary generation returned no bullets after {} attempts",
            MAX_GENERATION_RETRIES + 1
        )))
    }

    /// Returns the new `\resumeSubheading ... \resumeItemListEnd` block.
    pub async fn generate_experience(
        &self,
        old_experience: &str,
        jd_text: &str,
        keywords: &[String],
    ) -> Result<String, AppError> {
        let prompt = EXPERIENCE_PROMPT_TEMPLATE
            .replace("{old_experience}", old_experience)
            .replace("{job_description}", jd_text)
            .replace("{keywords}", &keywords.join(", "));
        self.complete(&prompt, "Experience generation").await
    }

    /// Returns the new skills section, heading included.
    pub async fn generate_skills(
        &self,
        old_skills: &str,
        jd_text: &str,
        keywords: &[String],
    ) -> Result<String, AppError> {
        let prompt = SKILLS_PROMPT_TEMPLATE
            .replace("{old_skills}", old_skills)
            .replace("{job_description}", jd_text)
            .replace("{keywords}", &keywords.join(", "));
        self.complete(&prompt, "Skills generation").await
    }

    /// Rewrites one section from its current LaTeX. Summary content goes in and
    /// comes out as `\item` lines.
    pub async fn regenerate(
        &self,
        section: SectionKind,
        current: &str,
        jd_text: &str,
        keywords: &[String],
        metadata: &JobDescriptionMetadata,
    ) -> Result<String, AppError> {
        match section {
            SectionKind::Summary => {
                let bullets = self
                    .generate_summary(&parse_item_lines(current), jd_text, keywords, metadata)
                    .await?;
                Ok(item_lines(&bullets))
            }
            SectionKind::Experience => self.generate_experience(current, jd_text, keywords).await,
            SectionKind::Skills => self.generate_skills(current, jd_text, keywords).await,
        }
    }

    /// Revises `current` according to a free-text `user_request`, keeping the
    /// section's LaTeX shape.
    pub async fn refine(
        &self,
        section: SectionKind,
        current: &str,
        user_request: &str,
        keywords: &[String],
    ) -> Result<String, AppError> {
        let prompt = REFINEMENT_PROMPT_TEMPLATE
            .replace("{section_type}", &section.to_string())
            .replace("{format_rules}", &self.format_rules(section))
            .replace("{keywords}", &keywords.join(", "))
            .replace("{current_content}", current)
            .replace("{user_request}", user_request);

        let refined = self
            .complete(&prompt, &format!("{section} refinement"))
            .await?;
        if section == SectionKind::Summary && parse_item_lines(&refined).is_empty() {
            return Err(AppError::Llm(
                "Summary refinement returned no bullets".to_string(),
            ));
        }
        info!("{section} refined ({} chars)", refined.len());
        Ok(refined)
    }

    fn format_rules(&self, section: SectionKind) -> String {
        match section {
            SectionKind::Summary => format!(
                "- Exactly {} bullets, each a single line starting with \\item\n\
                 - Each bullet is {}-{} characters long, counted after \"\\item \"\n\
                 - Bullet 1 starts with \"<Role> with <N>+ yrs\"\n\
                 - No trailing periods",
                self.summary_rules.bullet_count,
                self.summary_rules.char_min,
                self.summary_rules.char_max
            ),
            SectionKind::Experience => "- Keep the \\resumeSubheading line and its four arguments\n\
                 - Keep the \\resumeItemListStart / \\resumeItemListEnd wrapper\n\
                 - 4-6 \\resumeItem bullets, each opening with an action verb and carrying a metric\n\
                 - No trailing periods"
                .to_string(),
            SectionKind::Skills => "- Keep the \\section heading and the itemize environment\n\
                 - One \\item \\textbf{Category:} line per category\n\
                 - No duplicate skills"
                .to_string(),
        }
    }

    async fn complete(&self, prompt: &str, step: &str) -> Result<String, AppError> {
        let raw = self
            .generator
            .complete(prompt, LATEX_ONLY_SYSTEM, GENERATION_TEMPERATURE)
            .await
            .map_err(|e| AppError::Llm(format!("{step} failed: {e}")))?;
        Ok(clean_generated_latex(&raw))
    }
}

/// Joins bullets back into `\item` lines, one per line.
pub(crate) fn item_lines(bullets: &[String]) -> String {
    bullets
        .iter()
        .map(|b| format!("\\item {b}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Strips code fences and any preamble before the first LaTeX construct.
/// A reply with no recognizable construct is returned trimmed but otherwise intact.
pub fn clean_generated_latex(text: &str) -> String {
    let body = strip_code_fences(text);
    let lines: Vec<&str> = body.lines().collect();
    let start = lines
        .iter()
        .position(|line| LATEX_START_MARKERS.iter().any(|m| line.contains(m)));
    match start {
        Some(idx) => lines[idx..].join("\n").trim().to_string(),
        None => body.trim().to_string(),
    }
}
