use std::str::FromStr;

use anyhow::{Context, Result};

use crate::jd::keywords::DEFAULT_TOP_N;
use crate::validation::{ExperienceRules, SkillsRules, SummaryRules};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub port: u16,
    pub rust_log: String,
    pub pdflatex_bin: String,
    pub validation: ValidationConfig,
}

/// Thresholds consumed by the validators and the keyword extractor.
/// Injected explicitly; nothing in the core reads the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationConfig {
    pub summary_char_min: usize,
    pub summary_char_max: usize,
    pub summary_bullet_count: usize,
    pub min_keywords_required: usize,
    pub top_keywords_count: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            summary_char_min: 105,
            summary_char_max: 109,
            summary_bullet_count: 4,
            min_keywords_required: 5,
            top_keywords_count: DEFAULT_TOP_N,
        }
    }
}

impl ValidationConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            summary_char_min: env_or("SUMMARY_CHAR_MIN", defaults.summary_char_min)?,
            summary_char_max: env_or("SUMMARY_CHAR_MAX", defaults.summary_char_max)?,
            summary_bullet_count: env_or("SUMMARY_BULLET_COUNT", defaults.summary_bullet_count)?,
            min_keywords_required: env_or(
                "MIN_KEYWORDS_REQUIRED",
                defaults.min_keywords_required,
            )?,
            top_keywords_count: env_or("TOP_KEYWORDS_COUNT", defaults.top_keywords_count)?,
        })
    }

    pub fn summary_rules(&self) -> SummaryRules {
        SummaryRules {
            char_min: self.summary_char_min,
            char_max: self.summary_char_max,
            bullet_count: self.summary_bullet_count,
            min_keywords: self.min_keywords_required,
        }
    }

    pub fn experience_rules(&self) -> ExperienceRules {
        ExperienceRules::default()
    }

    pub fn skills_rules(&self) -> SkillsRules {
        SkillsRules::default()
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            port: env_or("PORT", 8080u16)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            pdflatex_bin: std::env::var("PDFLATEX_BIN").unwrap_or_else(|_| "pdflatex".to_string()),
            validation: ValidationConfig::from_env()?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number (got '{raw}')")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_documented_thresholds() {
        let cfg = ValidationConfig::default();
        assert_eq!(cfg.summary_char_min, 105);
        assert_eq!(cfg.summary_char_max, 109);
        assert_eq!(cfg.summary_bullet_count, 4);
        assert_eq!(cfg.min_keywords_required, 5);
        assert_eq!(cfg.top_keywords_count, 8);
    }

    #[test]
    fn test_summary_rules_projection() {
        let cfg = ValidationConfig {
            summary_char_min: 90,
            summary_char_max: 120,
            summary_bullet_count: 3,
            min_keywords_required: 2,
            top_keywords_count: 10,
        };
        let rules = cfg.summary_rules();
        assert_eq!(rules.char_min, 90);
        assert_eq!(rules.char_max, 120);
        assert_eq!(rules.bullet_count, 3);
        assert_eq!(rules.min_keywords, 2);
    }

    #[test]
    fn test_env_or_falls_back_when_unset() {
        let v: usize = env_or("RESUMEFORGE_TEST_SURELY_UNSET_VAR", 42).unwrap();
        assert_eq!(v, 42);
    }
}
