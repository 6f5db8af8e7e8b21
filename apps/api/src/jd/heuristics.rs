//! Deterministic metadata inference used when the model cannot be reached or
//! returns something unparseable. Pure regex work over the raw description.

use std::sync::LazyLock;

use regex::Regex;

use super::metadata::{JobDescriptionMetadata, RoleLevel};

const MAX_COMPANIES: usize = 3;

/// Capitalized words that the company patterns pick up but never name a company.
const NOT_COMPANIES: &[&str] = &["We", "You", "The", "This", "Our", "It", "They", "He", "She"];

const LEADERSHIP_PHRASES: &[&str] = &[
    "lead team",
    "manage team",
    "direct report",
    "people management",
];

static COMPANY_PATTERNS: LazyLock<[Regex; 2]> = LazyLock::new(|| {
    [
        Regex::new(r"\b(?:[Aa]t|[Jj]oin|[Ff]or)\s+([A-Z][A-Za-z0-9]+)")
            .expect("company pattern is valid"),
        Regex::new(r"\b([A-Z][A-Za-z0-9]+)\s+(?:is|are|seeks)\b")
            .expect("company pattern is valid"),
    ]
});

/// Level markers in precedence order. Numeric and explicit levels are checked
/// before the generic "senior" wording.
static LEVEL_MARKERS: LazyLock<Vec<(Regex, RoleLevel)>> = LazyLock::new(|| {
    [
        (r"\bii\b|\blevel (?:ii|2)\b", RoleLevel::Mid),
        (r"\biii\b|\blevel 3\b", RoleLevel::Senior),
        (
            r"\b(?:engineer|developer|scientist|analyst)\s+i\b|\blevel (?:i|1)\b|\bjunior\b|\bentry\b",
            RoleLevel::Junior,
        ),
        (r"\biv\b|\bstaff\b|\bprincipal\b", RoleLevel::Staff),
        (r"\blead\b|\bmanager\b", RoleLevel::Lead),
        (r"\bsenior\b|\bsr\.", RoleLevel::Senior),
    ]
    .into_iter()
    .map(|(pattern, level)| (Regex::new(pattern).expect("level pattern is valid"), level))
    .collect()
});

static EXPERIENCE_YEARS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+)\s*(?:-|–|to)?\s*(\d+)?\s*\+?\s*years?\b")
        .expect("experience pattern is valid")
});

/// Best-effort metadata from the description text alone.
pub fn infer_metadata(jd_text: &str) -> JobDescriptionMetadata {
    let lower = jd_text.to_lowercase();
    let (experience_years_min, experience_years_max) = experience_years(&lower);

    JobDescriptionMetadata {
        company_names: company_names(jd_text),
        role_level: role_level(&lower),
        experience_years_min,
        experience_years_max,
        key_responsibilities: Vec::new(),
        leadership_required: LEADERSHIP_PHRASES.iter().any(|p| lower.contains(p)),
    }
    .normalized()
}

fn company_names(jd_text: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for pattern in COMPANY_PATTERNS.iter() {
        for caps in pattern.captures_iter(jd_text) {
            let name = &caps[1];
            let seen = names.iter().any(|n| n.eq_ignore_ascii_case(name));
            if seen || NOT_COMPANIES.contains(&name) {
                continue;
            }
            names.push(name.to_string());
        }
    }
    names.truncate(MAX_COMPANIES);
    names
}

fn role_level(lower: &str) -> RoleLevel {
    LEVEL_MARKERS
        .iter()
        .find(|(re, _)| re.is_match(lower))
        .map(|(_, level)| *level)
        .unwrap_or_default()
}

fn experience_years(lower: &str) -> (Option<u32>, Option<u32>) {
    let Some(caps) = EXPERIENCE_YEARS.captures(lower) else {
        return (None, None);
    };
    let min = caps.get(1).and_then(|m| m.as_str().parse().ok());
    let max = caps.get(2).and_then(|m| m.as_str().parse().ok());
    (min, max)
}
