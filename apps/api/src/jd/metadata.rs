//! Structured job-description metadata and the validation context derived from it.

use std::fmt;

use serde::{Deserialize, Serialize};

const MAX_RESPONSIBILITIES: usize = 5;

/// Seniority of the target role. Always one of five values; anything the
/// model returns outside this set is normalized on deserialization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum RoleLevel {
    Junior,
    #[default]
    Mid,
    Senior,
    Staff,
    Lead,
}

impl RoleLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoleLevel::Junior => "Junior",
            RoleLevel::Mid => "Mid",
            RoleLevel::Senior => "Senior",
            RoleLevel::Staff => "Staff",
            RoleLevel::Lead => "Lead",
        }
    }

    /// Typical years of experience to claim when the description gives none.
    fn default_experience(&self) -> &'static str {
        match self {
            RoleLevel::Junior => "2+",
            RoleLevel::Mid => "4+",
            RoleLevel::Senior => "7+",
            RoleLevel::Staff => "10+",
            RoleLevel::Lead => "12+",
        }
    }
}

impl fmt::Display for RoleLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for RoleLevel {
    /// Exact names win; otherwise substring heuristics in fixed order, else Mid.
    fn from(raw: &str) -> Self {
        match raw {
            "Junior" => return RoleLevel::Junior,
            "Mid" => return RoleLevel::Mid,
            "Senior" => return RoleLevel::Senior,
            "Staff" => return RoleLevel::Staff,
            "Lead" => return RoleLevel::Lead,
            _ => {}
        }

        let lower = raw.trim().to_lowercase();
        let has = |needle: &str| lower.contains(needle);
        if has("junior") || has("entry") || lower == "i" {
            RoleLevel::Junior
        } else if has("senior") || has("sr") || has("iii") {
            RoleLevel::Senior
        } else if has("staff") || has("principal") || has("iv") {
            RoleLevel::Staff
        } else if has("lead") || has("manager") {
            RoleLevel::Lead
        } else {
            RoleLevel::Mid
        }
    }
}

impl From<String> for RoleLevel {
    fn from(raw: String) -> Self {
        RoleLevel::from(raw.as_str())
    }
}

/// What the resolver knows about a job description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobDescriptionMetadata {
    pub company_names: Vec<String>,
    pub role_level: RoleLevel,
    pub experience_years_min: Option<u32>,
    pub experience_years_max: Option<u32>,
    pub key_responsibilities: Vec<String>,
    pub leadership_required: bool,
}

impl JobDescriptionMetadata {
    /// Drops blank and case-insensitively repeated company names (first spelling
    /// kept) and caps responsibilities at five.
    pub fn normalized(mut self) -> Self {
        let mut seen = Vec::<String>::new();
        self.company_names.retain(|name| {
            let key = name.trim().to_lowercase();
            if key.is_empty() || seen.contains(&key) {
                return false;
            }
            seen.push(key);
            true
        });
        for name in &mut self.company_names {
            *name = name.trim().to_string();
        }
        self.key_responsibilities.truncate(MAX_RESPONSIBILITIES);
        self
    }

    /// Experience to claim in the summary, e.g. `"6+"`.
    pub fn suggested_experience_years(&self) -> String {
        match (self.experience_years_min, self.experience_years_max) {
            (Some(min), Some(max)) if min > 0 && max > 0 => format!("{}+", (min + max) / 2),
            (Some(min), _) if min > 0 => format!("{min}+"),
            _ => self.role_level.default_experience().to_string(),
        }
    }

    pub fn leadership_guidance(&self) -> &'static str {
        if self.leadership_allowed() {
            "Leadership language encouraged (led, managed, directed)"
        } else if self.role_level == RoleLevel::Senior {
            "Moderate leadership language acceptable (led small teams, mentored)"
        } else {
            "Use contributor language (collaborated, contributed, implemented, supported)"
        }
    }

    fn leadership_allowed(&self) -> bool {
        self.leadership_required || matches!(self.role_level, RoleLevel::Staff | RoleLevel::Lead)
    }
}

/// Read-only projection of metadata consumed by the summary validator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationContext {
    pub company_names: Vec<String>,
    pub role_level: RoleLevel,
    pub max_experience_years: Option<u32>,
    pub leadership_allowed: bool,
}

impl From<&JobDescriptionMetadata> for ValidationContext {
    fn from(metadata: &JobDescriptionMetadata) -> Self {
        Self {
            company_names: metadata.company_names.clone(),
            role_level: metadata.role_level,
            max_experience_years: metadata.experience_years_max,
            leadership_allowed: metadata.leadership_allowed(),
        }
    }
}
