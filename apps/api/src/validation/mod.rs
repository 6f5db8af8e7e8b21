//! Validation Rule Engine.
//!
//! Three stateless validators (summary, experience, skills) share one result
//! shape. Each `validate` call is a pure function of (text, keywords, optional
//! context); thresholds are injected through the `*Rules` records at
//! construction.

use serde::{Deserialize, Serialize};

use crate::config::ValidationConfig;
use crate::jd::ValidationContext;
use crate::latex::SectionKind;

pub mod experience;
pub mod handlers;
pub mod report;
pub mod skills;
pub mod summary;

pub use experience::ExperienceValidator;
pub use report::{OverallReport, ScoreBand, SectionScores};
pub use skills::SkillsValidator;
pub use summary::SummaryValidator;

/// Outcome of validating one section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// True iff `errors` is empty. Warnings never fail a section.
    pub passed: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    /// Always within 0..=100.
    pub score: u8,
    pub keywords_matched: usize,
}

impl ValidationResult {
    /// Builds a result from a raw (unclamped) score.
    pub(crate) fn new(
        errors: Vec<String>,
        warnings: Vec<String>,
        raw_score: i64,
        keywords_matched: usize,
    ) -> Self {
        Self {
            passed: errors.is_empty(),
            errors,
            warnings,
            score: raw_score.clamp(0, 100) as u8,
            keywords_matched,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRules {
    pub char_min: usize,
    pub char_max: usize,
    pub bullet_count: usize,
    pub min_keywords: usize,
}

impl Default for SummaryRules {
    fn default() -> Self {
        ValidationConfig::default().summary_rules()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExperienceRules {
    pub min_bullets: usize,
    pub max_bullets: usize,
    pub ideal_bullets: usize,
    pub min_keywords: usize,
}

impl Default for ExperienceRules {
    fn default() -> Self {
        Self {
            min_bullets: 4,
            max_bullets: 6,
            ideal_bullets: 5,
            min_keywords: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkillsRules {
    pub min_skills: usize,
    pub max_skills: usize,
    /// Skill counts in this range earn a bonus.
    pub ideal_skills: std::ops::RangeInclusive<usize>,
    pub min_keywords: usize,
}

impl Default for SkillsRules {
    fn default() -> Self {
        Self {
            min_skills: 8,
            max_skills: 20,
            ideal_skills: 12..=15,
            min_keywords: 3,
        }
    }
}

/// All three validators, built once from configuration and shared across requests.
#[derive(Debug, Clone)]
pub struct SectionValidators {
    pub summary: SummaryValidator,
    pub experience: ExperienceValidator,
    pub skills: SkillsValidator,
}

impl SectionValidators {
    pub fn new(config: &ValidationConfig) -> Self {
        Self {
            summary: SummaryValidator::new(config.summary_rules()),
            experience: ExperienceValidator::new(config.experience_rules()),
            skills: SkillsValidator::new(config.skills_rules()),
        }
    }

    /// Validates whichever sections are present and aggregates the scores.
    pub fn validate_all(
        &self,
        sections: &SectionTexts<'_>,
        keywords: &[String],
        context: Option<&ValidationContext>,
    ) -> (SectionScores, OverallReport) {
        let scores = SectionScores {
            summary: sections
                .summary
                .map(|text| self.summary.validate(text, keywords, context)),
            experience: sections
                .experience
                .map(|text| self.experience.validate(text, keywords)),
            skills: sections.skills.map(|text| self.skills.validate(text, keywords)),
        };
        let report = OverallReport::from_scores(&scores);
        (scores, report)
    }

    /// Validates a single section; `context` only affects the summary.
    pub fn validate_section(
        &self,
        kind: SectionKind,
        text: &str,
        keywords: &[String],
        context: Option<&ValidationContext>,
    ) -> ValidationResult {
        match kind {
            SectionKind::Summary => self.summary.validate(text, keywords, context),
            SectionKind::Experience => self.experience.validate(text, keywords),
            SectionKind::Skills => self.skills.validate(text, keywords),
        }
    }
}

/// Borrowed section texts to validate; absent sections are skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct SectionTexts<'a> {
    pub summary: Option<&'a str>,
    pub experience: Option<&'a str>,
    pub skills: Option<&'a str>,
}

/// `round(matched / max(total, 1) * weight)`.
pub(crate) fn keyword_bonus(matched: usize, total: usize, weight: f64) -> i64 {
    let ratio = matched as f64 / total.max(1) as f64;
    (ratio * weight).round() as i64
}

/// Message shared by all three validators when coverage is short.
pub(crate) fn keyword_shortfall(matched: usize, total: usize, required: usize) -> String {
    format!("Only {matched}/{total} keywords found (need {required})")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_passed_tracks_errors_only() {
        let result = ValidationResult::new(vec![], vec!["w".into(); 3], 85, 2);
        assert!(result.passed);
        let result = ValidationResult::new(vec!["e".into()], vec![], 85, 2);
        assert!(!result.passed);
    }

    #[test]
    fn test_result_score_is_clamped() {
        assert_eq!(ValidationResult::new(vec![], vec![], -140, 0).score, 0);
        assert_eq!(ValidationResult::new(vec![], vec![], 115, 0).score, 100);
        assert_eq!(ValidationResult::new(vec![], vec![], 73, 0).score, 73);
    }

    #[test]
    fn test_keyword_bonus_rounds_and_handles_empty_list() {
        assert_eq!(keyword_bonus(1, 3, 10.0), 3);
        assert_eq!(keyword_bonus(2, 3, 10.0), 7);
        assert_eq!(keyword_bonus(5, 8, 20.0), 13);
        assert_eq!(keyword_bonus(0, 0, 15.0), 0);
    }

    #[test]
    fn test_rules_defaults() {
        assert_eq!(SummaryRules::default().char_min, 105);
        assert_eq!(ExperienceRules::default().max_bullets, 6);
        assert!(SkillsRules::default().ideal_skills.contains(&13));
    }

    #[test]
    fn test_validate_all_skips_absent_sections() {
        let validators = SectionValidators::new(&ValidationConfig::default());
        let sections = SectionTexts {
            skills: Some("\\section{Skills}\n\\begin{itemize}\n\\item \\textbf{Languages:} Python, Rust\n\\end{itemize}"),
            ..Default::default()
        };
        let (scores, report) = validators.validate_all(&sections, &["python".to_string()], None);
        assert!(scores.summary.is_none());
        assert!(scores.experience.is_none());
        let skills = scores.skills.unwrap();
        assert_eq!(report.overall_score, skills.score);
    }

    #[test]
    fn test_validate_section_matches_validate_all() {
        let validators = SectionValidators::new(&ValidationConfig::default());
        let skills = "\\section{Skills}\n\\begin{itemize}\n\\item \\textbf{Languages:} Python, Rust\n\\end{itemize}";
        let keywords = ["python".to_string(), "go".to_string()];
        let sections = SectionTexts {
            skills: Some(skills),
            ..Default::default()
        };
        let (scores, _) = validators.validate_all(&sections, &keywords, None);
        assert_eq!(
            Some(validators.validate_section(SectionKind::Skills, skills, &keywords, None)),
            scores.skills
        );
    }
}
