//! Skills validator for a categorized `\item` list.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use super::{keyword_bonus, keyword_shortfall, SkillsRules, ValidationResult};
use crate::jd::keywords::count_keyword_matches;
use crate::latex::unwrap_formatting;

const ERROR_PENALTY: i64 = 15;
const WARNING_PENALTY: i64 = 5;
const KEYWORD_WEIGHT: f64 = 20.0;
const IDEAL_COUNT_BONUS: i64 = 5;

static CATEGORY_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\\textbf\{[^}]*:|languages:|frameworks:|tools:|technologies:")
        .expect("category pattern is valid")
});

static SKILL_DELIMITER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[,;|]").expect("delimiter pattern is valid"));

#[derive(Debug, Clone, Default)]
pub struct SkillsValidator {
    rules: SkillsRules,
}

impl SkillsValidator {
    pub fn new(rules: SkillsRules) -> Self {
        Self { rules }
    }

    pub fn validate(&self, text: &str, keywords: &[String]) -> ValidationResult {
        let rules = &self.rules;
        let skills = parse_skills(text);
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        if skills.len() < rules.min_skills {
            warnings.push(format!(
                "Consider adding more skills (found {}, recommended {}+)",
                skills.len(),
                rules.min_skills
            ));
        } else if skills.len() > rules.max_skills {
            warnings.push(format!(
                "Consider reducing skills (found {}, recommended max {})",
                skills.len(),
                rules.max_skills
            ));
        }

        let keywords_matched = count_keyword_matches(&skills.join(" "), keywords);
        if keywords_matched < rules.min_keywords {
            errors.push(keyword_shortfall(
                keywords_matched,
                keywords.len(),
                rules.min_keywords,
            ));
        }

        if !CATEGORY_MARKER.is_match(text) {
            warnings.push(
                "Consider organizing skills into categories (Languages, Frameworks, Tools, etc.)"
                    .to_string(),
            );
        }

        let has_items = text.contains("\\item");
        let has_container = text.contains("\\section") || text.contains("\\begin{itemize}");
        if !(has_items && has_container) {
            errors.push("Invalid LaTeX format - must use \\item structure".to_string());
        }

        let duplicates = find_duplicates(&skills);
        if !duplicates.is_empty() {
            warnings.push(format!("Duplicate skills found: {}", duplicates.join(", ")));
        }

        let mut score = 100
            - ERROR_PENALTY * errors.len() as i64
            - WARNING_PENALTY * warnings.len() as i64
            + keyword_bonus(keywords_matched, keywords.len(), KEYWORD_WEIGHT);
        if rules.ideal_skills.contains(&skills.len()) {
            score += IDEAL_COUNT_BONUS;
        }

        ValidationResult::new(errors, warnings, score, keywords_matched)
    }
}

/// Individual skills from `\item` lines: split on `,` `;` `|`, formatting and a
/// leading "Category:" label removed.
fn parse_skills(text: &str) -> Vec<String> {
    let mut skills = Vec::new();
    for line in text.lines() {
        let Some(content) = line.trim().strip_prefix("\\item") else {
            continue;
        };
        let content = unwrap_formatting(content.trim());
        for (idx, part) in SKILL_DELIMITER.split(&content).enumerate() {
            let mut skill = part.replace(['{', '}'], "");
            skill = skill.trim().trim_end_matches("\\\\").trim().to_string();
            if idx == 0 {
                if let Some((_, rest)) = skill.split_once(':') {
                    skill = rest.trim().to_string();
                }
            }
            if !skill.is_empty() && skill != ":" {
                skills.push(skill);
            }
        }
    }
    skills
}

/// Later occurrences of case-insensitively repeated skills, in order.
fn find_duplicates(skills: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    skills
        .iter()
        .filter(|skill| !seen.insert(skill.to_lowercase()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLOCK: &str = r"\section{Technical Skills}
\begin{itemize}[leftmargin=0.15in, label={}]
    \item \textbf{Languages:} Python, Rust, SQL, TypeScript \\
    \item \textbf{Frameworks:} PyTorch; FastAPI; LangChain
    \item \textbf{Tools:} Docker | Kubernetes | Terraform | Airflow | Spark
\end{itemize}";

    fn keywords() -> Vec<String> {
        ["python", "pytorch", "kubernetes", "airflow"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn test_parse_skills_strips_labels_and_delimiters() {
        assert_eq!(
            parse_skills(BLOCK),
            vec![
                "Python", "Rust", "SQL", "TypeScript", "PyTorch", "FastAPI", "LangChain", "Docker",
                "Kubernetes", "Terraform", "Airflow", "Spark"
            ]
        );
    }

    #[test]
    fn test_well_formed_block_scores_with_bonus() {
        let result = SkillsValidator::default().validate(BLOCK, &keywords());
        assert!(result.passed, "{:?}", result.errors);
        assert!(result.warnings.is_empty(), "{:?}", result.warnings);
        assert_eq!(result.keywords_matched, 4);
        assert_eq!(result.score, 100);
    }

    #[test]
    fn test_duplicate_case_variants_warn() {
        let block = BLOCK.replace("Spark", "python");
        let result = SkillsValidator::default().validate(&block, &keywords());
        assert!(result
            .warnings
            .contains(&"Duplicate skills found: python".to_string()));
        assert!(result.passed);
    }

    #[test]
    fn test_count_outside_range_is_warning_only() {
        let block = "\\section{Skills}\n\\begin{itemize}\n\\item \\textbf{Languages:} Python, PyTorch, Kubernetes\n\\end{itemize}";
        let result = SkillsValidator::default().validate(block, &keywords());
        assert!(result
            .warnings
            .contains(&"Consider adding more skills (found 3, recommended 8+)".to_string()));
        assert!(result.passed);
        // One warning, 3/4 keywords: round(15.0) = 15.
        assert_eq!(result.score, 100);

        let many: Vec<String> = (0..21).map(|i| format!("skill{i}")).collect();
        let block = format!(
            "\\section{{Skills}}\n\\begin{{itemize}}\n\\item \\textbf{{Tools:}} {}\n\\end{{itemize}}",
            many.join(", ")
        );
        let result = SkillsValidator::default().validate(&block, &keywords());
        assert!(result
            .warnings
            .contains(&"Consider reducing skills (found 21, recommended max 20)".to_string()));
    }

    #[test]
    fn test_missing_categories_warns() {
        let block = "\\begin{itemize}\n\\item Python, PyTorch, Kubernetes, Airflow\n\\end{itemize}";
        let result = SkillsValidator::default().validate(block, &keywords());
        assert!(result.warnings.iter().any(|w| w.starts_with("Consider organizing")));
    }

    #[test]
    fn test_missing_item_structure_is_error() {
        let result =
            SkillsValidator::default().validate("Python, PyTorch, Kubernetes, Airflow", &keywords());
        assert!(result
            .errors
            .contains(&"Invalid LaTeX format - must use \\item structure".to_string()));
        assert!(!result.passed);
    }

    #[test]
    fn test_keyword_shortfall() {
        let result = SkillsValidator::default().validate(BLOCK, &["cobol".to_string()]);
        assert!(result
            .errors
            .contains(&"Only 0/1 keywords found (need 3)".to_string()));
    }
}
