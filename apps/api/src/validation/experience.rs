//! Experience validator for a single `\resumeSubheading` entry.

use std::sync::LazyLock;

use regex::Regex;

use super::{keyword_bonus, keyword_shortfall, ExperienceRules, ValidationResult};
use crate::jd::keywords::count_keyword_matches;
use crate::latex::resume_items;

const ERROR_PENALTY: i64 = 15;
const WARNING_PENALTY: i64 = 5;
const KEYWORD_WEIGHT: f64 = 15.0;
const IDEAL_COUNT_BONUS: i64 = 5;

const ACTION_VERBS: &[&str] = &[
    "led", "developed", "implemented", "designed", "built", "created", "managed", "delivered",
    "launched", "optimized", "improved", "reduced", "increased", "achieved", "established",
    "drove", "spearheaded", "facilitated", "deployed", "architected", "engineered",
    "collaborated", "coordinated",
];

/// Percentages, "N+", K/M/B scale, dollar amounts, multipliers, or any bare digit.
static METRIC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d+%|\d+\+|\d+[KMB]|\$\d+|\d+x|\d").expect("metric pattern is valid")
});

#[derive(Debug, Clone, Default)]
pub struct ExperienceValidator {
    rules: ExperienceRules,
}

impl ExperienceValidator {
    pub fn new(rules: ExperienceRules) -> Self {
        Self { rules }
    }

    pub fn validate(&self, text: &str, keywords: &[String]) -> ValidationResult {
        let rules = &self.rules;
        let bullets = resume_items(text);
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        if bullets.len() < rules.min_bullets {
            errors.push(format!(
                "Need at least {} bullets (found {})",
                rules.min_bullets,
                bullets.len()
            ));
        } else if bullets.len() > rules.max_bullets {
            warnings.push(format!(
                "Consider reducing to {} bullets (found {})",
                rules.max_bullets,
                bullets.len()
            ));
        }

        for (i, bullet) in bullets.iter().enumerate() {
            let n = i + 1;
            if !starts_with_action_verb(bullet) {
                warnings.push(format!("Bullet {n}: Consider starting with strong action verb"));
            }
            if !METRIC.is_match(bullet) {
                warnings.push(format!("Bullet {n}: Add quantifiable metrics (%, numbers, scale)"));
            }
            if bullet.trim_end().ends_with('.') {
                errors.push(format!("Bullet {n}: Remove trailing period"));
            }
        }

        let keywords_matched = count_keyword_matches(&bullets.join(" "), keywords);
        if keywords_matched < rules.min_keywords {
            errors.push(keyword_shortfall(
                keywords_matched,
                keywords.len(),
                rules.min_keywords,
            ));
        }

        if !text.contains("\\resumeSubheading") || !text.contains("\\resumeItem") {
            errors.push("Invalid LaTeX format - must use \\resumeItem structure".to_string());
        }

        let mut score = 100
            - ERROR_PENALTY * errors.len() as i64
            - WARNING_PENALTY * warnings.len() as i64
            + keyword_bonus(keywords_matched, keywords.len(), KEYWORD_WEIGHT);
        if bullets.len() == rules.ideal_bullets {
            score += IDEAL_COUNT_BONUS;
        }

        ValidationResult::new(errors, warnings, score, keywords_matched)
    }
}

fn starts_with_action_verb(bullet: &str) -> bool {
    bullet
        .split_whitespace()
        .next()
        .map(|word| ACTION_VERBS.contains(&word.to_lowercase().as_str()))
        .unwrap_or(false)
}
