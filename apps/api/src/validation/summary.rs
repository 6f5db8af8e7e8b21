//! Summary validator: structural, lexical and metadata-conditioned semantic rules.
//!
//! Semantic rules run per bullet in a fixed order and stop at the first
//! violation for that bullet. They never short-circuit the structural rules.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use super::{keyword_bonus, keyword_shortfall, SummaryRules, ValidationResult};
use crate::jd::keywords::count_keyword_matches;
use crate::jd::{RoleLevel, ValidationContext};
use crate::latex::has_unescaped_special;

const SEMANTIC_ERROR_PENALTY: i64 = 20;
const ERROR_PENALTY: i64 = 15;
const WARNING_PENALTY: i64 = 5;
const KEYWORD_WEIGHT: f64 = 10.0;

static FIRST_BULLET_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[a-z][a-z\s/-]*\s+with\s+\d+\+?\s+(?:yrs?|years)")
        .expect("first bullet pattern is valid")
});

/// Checked in this order; the first verb present is the one reported.
const LEADERSHIP_VERBS: [&str; 15] = [
    "led", "leading", "lead", "managed", "managing", "manage", "directed", "directing", "direct",
    "oversaw", "overseeing", "oversee", "supervised", "supervising", "supervise",
];

static LEADERSHIP_VERB_PATTERNS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    LEADERSHIP_VERBS
        .iter()
        .map(|verb| {
            let pattern = format!(r"\b{verb}\b");
            (*verb, Regex::new(&pattern).expect("leadership verb pattern is valid"))
        })
        .collect()
});

static CLAIMED_YEARS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+)\+?\s*(?:yrs?|years?)").expect("claimed years pattern is valid")
});

/// A context-derived rule broken by a single bullet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    CompanyName(String),
    LeadershipVerb { verb: String, role: RoleLevel },
    ExperienceCeiling { years: u32, max: u32, role: RoleLevel },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::CompanyName(name) => write!(
                f,
                "Company name '{name}' found in bullet. Never mention the target company as if you work there."
            ),
            Violation::LeadershipVerb { verb, role } => write!(
                f,
                "Leadership verb '{verb}' inappropriate for {role}-level role. Use contributor language: collaborated, contributed, implemented, supported."
            ),
            Violation::ExperienceCeiling { years, max, role } => write!(
                f,
                "Experience level '{years}+ yrs' exceeds maximum {max} for {role}-level role. Adjust to match job requirements."
            ),
        }
    }
}

type SemanticRule = fn(&str, &ValidationContext) -> Option<Violation>;

/// Evaluated in order; the first hit is the bullet's violation.
const SEMANTIC_RULES: [SemanticRule; 3] = [company_rule, leadership_rule, experience_rule];

/// Returns the first semantic violation in `bullet`, if any.
pub fn check_bullet(bullet: &str, context: &ValidationContext) -> Option<Violation> {
    let lower = bullet.to_lowercase();
    SEMANTIC_RULES.iter().find_map(|rule| rule(&lower, context))
}

fn company_rule(lower: &str, context: &ValidationContext) -> Option<Violation> {
    context
        .company_names
        .iter()
        .filter(|name| !name.trim().is_empty())
        .find(|name| mentions_company(lower, name))
        .map(|name| Violation::CompanyName(name.clone()))
}

/// Whole-word match, including the "for X" and "at X" lead-ins.
fn mentions_company(lower: &str, name: &str) -> bool {
    let escaped = regex::escape(&name.trim().to_lowercase());
    let pattern = format!(r"\b{escaped}\b|for\s+{escaped}\b|at\s+{escaped}\b");
    Regex::new(&pattern).is_ok_and(|re| re.is_match(lower))
}

fn leadership_rule(lower: &str, context: &ValidationContext) -> Option<Violation> {
    if context.leadership_allowed {
        return None;
    }
    LEADERSHIP_VERB_PATTERNS
        .iter()
        .find(|(_, pattern)| pattern.is_match(lower))
        .map(|(verb, _)| Violation::LeadershipVerb {
            verb: verb.to_string(),
            role: context.role_level,
        })
}

fn experience_rule(lower: &str, context: &ValidationContext) -> Option<Violation> {
    let max = context.max_experience_years?;
    let years: u32 = CLAIMED_YEARS.captures(lower)?.get(1)?.as_str().parse().ok()?;
    (years > max).then_some(Violation::ExperienceCeiling {
        years,
        max,
        role: context.role_level,
    })
}

/// Validates `\item`-prefixed summary bullets.
#[derive(Debug, Clone, Default)]
pub struct SummaryValidator {
    rules: SummaryRules,
}

impl SummaryValidator {
    pub fn new(rules: SummaryRules) -> Self {
        Self { rules }
    }

    pub fn validate(
        &self,
        text: &str,
        keywords: &[String],
        context: Option<&ValidationContext>,
    ) -> ValidationResult {
        let rules = &self.rules;
        let bullets = parse_bullets(text);
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        let mut semantic_errors = 0;
        if let Some(context) = context {
            for (i, bullet) in bullets.iter().enumerate() {
                if let Some(violation) = check_bullet(bullet, context) {
                    errors.push(format!("Bullet {}: {violation}", i + 1));
                    semantic_errors += 1;
                }
            }
        }

        if bullets.len() != rules.bullet_count {
            errors.push(format!(
                "Must have exactly {} bullets (found {})",
                rules.bullet_count,
                bullets.len()
            ));
        }

        for (i, bullet) in bullets.iter().enumerate() {
            let n = i + 1;
            let chars = bullet.chars().count();
            if chars < rules.char_min || chars > rules.char_max {
                errors.push(format!(
                    "Bullet {n}: {chars} chars (must be {}-{})",
                    rules.char_min, rules.char_max
                ));
            }
            if n == 1 && !FIRST_BULLET_SHAPE.is_match(bullet) {
                errors.push("Bullet 1 must start with '[Role] with X+ yrs'".to_string());
            }
            if bullet.trim_end().ends_with('.') {
                errors.push(format!("Bullet {n}: Remove trailing period"));
            }
            if !bullet.chars().any(|c| c.is_ascii_digit()) {
                warnings.push(format!(
                    "Bullet {n}: Consider adding measurable impact (numbers/percentages)"
                ));
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

        if has_unescaped_special(text) {
            warnings.push("Some special characters may not be properly escaped".to_string());
        }

        let other_errors = (errors.len() - semantic_errors) as i64;
        let score = 100
            - SEMANTIC_ERROR_PENALTY * semantic_errors as i64
            - ERROR_PENALTY * other_errors
            - WARNING_PENALTY * warnings.len() as i64
            + keyword_bonus(keywords_matched, keywords.len(), KEYWORD_WEIGHT);

        ValidationResult::new(errors, warnings, score, keywords_matched)
    }
}

/// Bullet bodies from lines starting with `\item`.
fn parse_bullets(text: &str) -> Vec<String> {
    text.lines()
        .filter_map(|line| line.trim().strip_prefix("\\item"))
        .map(|rest| rest.trim().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    // Exactly 105 characters each, digits present, no trailing period.
    const B1: &str = "AI Engineer with 5+ yrs building Python ML pipelines and LLM services for healthcare analytics at 20M QPS";
    const B2: &str = "Shipped retrieval systems in Python serving 40K daily users, cutting p95 latency from 900ms down to 200ms";
    const B3: &str = "Built evaluation tooling for LLM prompts across 12 product teams, raising answer accuracy by 18 pts today";
    const B4: &str = "Collaborated with data engineers on Kubernetes deployments of 30 models, keeping uptime at 99.9\\% monthly";

    fn keywords() -> Vec<String> {
        ["python", "llm", "kubernetes", "retrieval", "evaluation", "pipelines"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    fn items(bullets: &[&str]) -> String {
        bullets
            .iter()
            .map(|b| format!("\\item {b}"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn context() -> ValidationContext {
        ValidationContext {
            company_names: vec!["R37".to_string()],
            role_level: RoleLevel::Mid,
            max_experience_years: Some(6),
            leadership_allowed: false,
        }
    }

    #[test]
    fn test_fixture_bullets_are_105_chars() {
        for bullet in [B1, B2, B3, B4] {
            assert_eq!(bullet.chars().count(), 105, "{bullet}");
        }
    }

    #[test]
    fn test_valid_summary_passes() {
        let result = SummaryValidator::default().validate(
            &items(&[B1, B2, B3, B4]),
            &keywords(),
            Some(&context()),
        );
        assert!(result.passed, "{:?}", result.errors);
        assert!(result.warnings.is_empty(), "{:?}", result.warnings);
        assert_eq!(result.keywords_matched, 6);
        assert_eq!(result.score, 100);
    }

    #[test]
    fn test_count_error_iff_count_differs() {
        let validator = SummaryValidator::default();
        for n in 1..=6 {
            let bullets: Vec<&str> = [B1, B2, B3, B4].iter().cycle().take(n).copied().collect();
            let result = validator.validate(&items(&bullets), &keywords(), None);
            let has_count_error = result.errors.iter().any(|e| e.starts_with("Must have exactly"));
            assert_eq!(has_count_error, n != 4, "n = {n}");
        }
    }

    #[test]
    fn test_length_bounds_are_inclusive() {
        let validator = SummaryValidator::default();
        let at_min = B2;
        let at_max = format!("{B2} 123");
        let below = &B2[..104];
        let above = format!("{B2} 1234");
        assert_eq!(at_max.chars().count(), 109);

        let length_errors = |bullet: &str| {
            validator
                .validate(&items(&[B1, bullet, B3, B4]), &keywords(), None)
                .errors
                .into_iter()
                .filter(|e| e.starts_with("Bullet 2:") && e.contains("chars"))
                .count()
        };
        assert_eq!(length_errors(at_min), 0);
        assert_eq!(length_errors(&at_max), 0);
        assert_eq!(length_errors(below), 1);
        assert_eq!(length_errors(&above), 1);
    }

    #[test]
    fn test_exactly_105_passes_104_and_110_fail() {
        let validator = SummaryValidator::default();
        let check = |bullet: String| {
            validator
                .validate(&items(&[B1, &bullet, B3, B4]), &keywords(), None)
                .errors
                .iter()
                .any(|e| e.starts_with("Bullet 2:") && e.contains("chars"))
        };
        assert!(!check("x1".repeat(52) + "y"));
        assert!(check("x1".repeat(52)));
        assert!(check("x1".repeat(55)));
    }

    #[test]
    fn test_first_bullet_shape() {
        let validator = SummaryValidator::default();
        let bad = "Building Python ML pipelines and LLM services for healthcare analytics at 2M scale for 5+ yrs now okay";
        let result = validator.validate(&items(&[bad, B2, B3, B4]), &keywords(), None);
        assert!(result
            .errors
            .contains(&"Bullet 1 must start with '[Role] with X+ yrs'".to_string()));
        assert!(FIRST_BULLET_SHAPE.is_match("Full-stack AI/ML Engineer with 7 years of experience"));
    }

    #[test]
    fn test_trailing_period_and_missing_digits() {
        let validator = SummaryValidator::default();
        let result = validator.validate("\\item Shipped things.", &keywords(), None);
        assert!(result.errors.contains(&"Bullet 1: Remove trailing period".to_string()));
        assert!(result
            .warnings
            .contains(&"Bullet 1: Consider adding measurable impact (numbers/percentages)".to_string()));
    }

    #[test]
    fn test_unescaped_special_is_single_warning() {
        let text = items(&[B1, B2, B3, "Cut spend 30% & grew margin 5% with snake_case tooling"]);
        let result = SummaryValidator::default().validate(&text, &keywords(), None);
        let escaping = result
            .warnings
            .iter()
            .filter(|w| w.contains("special characters"))
            .count();
        assert_eq!(escaping, 1);
    }

    #[test]
    fn test_keyword_shortfall_error() {
        let result = SummaryValidator::default().validate(
            &items(&[B1, B2, B3, B4]),
            &["rust".to_string(), "golang".to_string()],
            None,
        );
        assert!(result
            .errors
            .contains(&"Only 0/2 keywords found (need 5)".to_string()));
    }

    #[test]
    fn test_company_whole_word_only() {
        let ctx = context();
        assert_eq!(
            check_bullet("Built ranking models for R37 clinicians", &ctx),
            Some(Violation::CompanyName("R37".to_string()))
        );
        assert_eq!(check_bullet("Tuned the R37x accelerator firmware", &ctx), None);
    }

    #[test]
    fn test_leadership_verb_for_mid_level() {
        let violation = check_bullet("Led team experience initiatives across 3 squads", &context());
        assert_eq!(
            violation,
            Some(Violation::LeadershipVerb {
                verb: "led".to_string(),
                role: RoleLevel::Mid
            })
        );
        assert!(violation
            .unwrap()
            .to_string()
            .starts_with("Leadership verb 'led' inappropriate for Mid-level role."));
    }

    #[test]
    fn test_leadership_allowed_suppresses_rule() {
        let ctx = ValidationContext {
            leadership_allowed: true,
            ..context()
        };
        assert_eq!(check_bullet("Led team experience initiatives", &ctx), None);
    }

    #[test]
    fn test_leadership_verb_reported_in_list_order() {
        assert_eq!(
            check_bullet("Managed rollout and led migration of 40 services", &context()),
            Some(Violation::LeadershipVerb {
                verb: "led".to_string(),
                role: RoleLevel::Mid
            })
        );
    }

    #[test]
    fn test_leadership_verbs_are_whole_words() {
        assert_eq!(check_bullet("Misled nobody; leadership summit speaker", &context()), None);
    }

    #[test]
    fn test_experience_ceiling() {
        let ctx = context();
        assert_eq!(
            check_bullet("ML Engineer with 9+ yrs shipping models", &ctx),
            Some(Violation::ExperienceCeiling {
                years: 9,
                max: 6,
                role: RoleLevel::Mid
            })
        );
        assert_eq!(check_bullet("ML Engineer with 6+ yrs shipping models", &ctx), None);
        let no_ceiling = ValidationContext {
            max_experience_years: None,
            ..ctx
        };
        assert_eq!(check_bullet("ML Engineer with 30 years", &no_ceiling), None);
    }

    #[test]
    fn test_first_violation_wins_per_bullet() {
        let violation = check_bullet("Led R37 platform work for 12 years", &context());
        assert!(matches!(violation, Some(Violation::CompanyName(_))));
    }

    #[test]
    fn test_semantic_errors_weigh_more() {
        let b1 = "AI Engineer with 5+ yrs building Python ML pipelines and LLM services for healthcare analytics at R37 now";
        assert_eq!(b1.chars().count(), 105);
        let result = SummaryValidator::default().validate(
            &items(&[b1, B2, B3, B4]),
            &keywords(),
            Some(&context()),
        );
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].starts_with("Bullet 1: Company name 'R37'"));
        assert_eq!(result.score, 100 - 20 + 10);
        assert!(!result.passed);
    }

    #[test]
    fn test_score_clamps_at_zero() {
        let text = "\\item a.\n".repeat(12);
        let result = SummaryValidator::default().validate(&text, &keywords(), None);
        assert_eq!(result.score, 0);
    }
}
