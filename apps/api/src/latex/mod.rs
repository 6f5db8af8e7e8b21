//! LaTeX Section Engine — locates and swaps the three tailorable resume sections.
//!
//! Each section shape owns its own pattern module:
//! - `summary`: `%---SUMMARY---` marker + `\section{Summary}` + itemize; decomposed into bullets
//! - `experience`: first `\resumeSubheading ... \resumeItemListEnd` under Professional Experience
//! - `skills`: whole `\section{SKILLS}` / `\section{Technical Skills}` block through `\end{itemize}`
//!
//! All matching is case-insensitive and whitespace-tolerant. Extraction returns `None`
//! when the anchor is missing; replacement returns `SectionError::AnchorNotFound` instead
//! of silently handing back the input.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod experience;
pub mod handlers;
pub mod skills;
pub mod summary;
pub mod text;

pub use text::{
    escape_latex_special_chars, has_unescaped_special, latex_to_plain_text, parse_item_lines,
    resume_items, unwrap_formatting, validate_latex_structure,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Summary,
    Experience,
    Skills,
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SectionKind::Summary => "Summary",
            SectionKind::Experience => "Professional Experience",
            SectionKind::Skills => "Skills",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SectionError {
    #[error("{0} section anchor not found in document")]
    AnchorNotFound(SectionKind),
}

/// The current contents of every section the engine knows how to find.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedSections {
    pub summary: Option<Vec<String>>,
    pub experience: Option<String>,
    pub skills: Option<String>,
}

/// Replacement values for any subset of sections.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SectionEdits {
    pub summary: Option<Vec<String>>,
    pub experience: Option<String>,
    pub skills: Option<String>,
}

pub fn extract_all(doc: &str) -> ExtractedSections {
    ExtractedSections {
        summary: summary::extract(doc),
        experience: experience::extract(doc),
        skills: skills::extract(doc),
    }
}

/// Applies every provided edit in order summary → experience → skills.
/// Fails on the first section whose anchor cannot be found; no partial document
/// is ever returned.
pub fn apply_edits(doc: &str, edits: &SectionEdits) -> Result<String, SectionError> {
    let mut updated = doc.to_string();
    if let Some(bullets) = &edits.summary {
        updated = summary::replace(&updated, bullets)?;
    }
    if let Some(block) = &edits.experience {
        updated = experience::replace(&updated, block)?;
    }
    if let Some(block) = &edits.skills {
        updated = skills::replace(&updated, block)?;
    }
    Ok(updated)
}

/// A lazily-matched region must not swallow a following section.
/// Returns true when `segment` contains at most one `\section` heading.
pub(crate) fn spans_single_section(segment: &str) -> bool {
    segment.to_ascii_lowercase().matches("\\section").count() <= 1
}

/// Splices `replacement` over `range` without interpreting `$` group references.
pub(crate) fn splice(doc: &str, range: std::ops::Range<usize>, replacement: &str) -> String {
    let mut out = String::with_capacity(doc.len() + replacement.len());
    out.push_str(&doc[..range.start]);
    out.push_str(replacement);
    out.push_str(&doc[range.end..]);
    out
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// A trimmed-down Jake's-resume style document with all three sections.
    pub(crate) const RESUME: &str = r"\documentclass[letterpaper,11pt]{article}
\begin{document}

%-----------SUMMARY-----------
\section{Summary}
\begin{itemize}[leftmargin=0.15in, label={}]
    \item AI Engineer with 5+ yrs building production ML systems across healthcare and fintech
    \item Shipped LLM retrieval pipelines serving 2M requests per day
      with 99.9\% uptime
\end{itemize}

%-----------EXPERIENCE-----------
\section{Professional Experience}
  \resumeSubHeadingListStart
    \resumeSubheading
      {Acme Health}{Jan 2022 -- Present}
      {Machine Learning Engineer}{Remote}
      \resumeItemListStart
        \resumeItem{Built \textbf{RAG} search over 3M clinical notes}
        \resumeItem{Reduced inference cost by 40\%}
      \resumeItemListEnd
    \resumeSubheading
      {Beta Corp}{2019 -- 2021}
      {Software Engineer}{NYC}
      \resumeItemListStart
        \resumeItem{Developed billing APIs}
      \resumeItemListEnd
  \resumeSubHeadingListEnd

%-----------SKILLS-----------
\section{Technical Skills}
\begin{itemize}[leftmargin=0.15in, label={}]
    \item \textbf{Languages:} Python, Rust, SQL
    \item \textbf{Tools:} Docker, Kubernetes
\end{itemize}

\end{document}
";

    #[test]
    fn test_extract_all_finds_every_section() {
        let sections = extract_all(RESUME);
        assert_eq!(sections.summary.map(|b| b.len()), Some(2));
        assert!(sections
            .experience
            .unwrap()
            .starts_with("\\resumeSubheading"));
        assert!(sections
            .skills
            .unwrap()
            .starts_with("\\section{Technical Skills}"));
    }

    #[test]
    fn test_apply_edits_replaces_all_sections() {
        let edits = SectionEdits {
            summary: Some(vec!["New summary bullet".to_string()]),
            experience: Some("\\resumeSubheading{X}{Y}{Z}{W}\n\\resumeItemListStart\n\\resumeItem{Did it}\n\\resumeItemListEnd".to_string()),
            skills: Some("\\section{Technical Skills}\n\\begin{itemize}\n\\item Go\n\\end{itemize}".to_string()),
        };
        let updated = apply_edits(RESUME, &edits).unwrap();
        let sections = extract_all(&updated);
        assert_eq!(sections.summary, Some(vec!["New summary bullet".to_string()]));
        assert!(sections.experience.unwrap().contains("Did it"));
        assert!(sections.skills.unwrap().contains("\\item Go"));
        // Second job untouched.
        assert!(updated.contains("Developed billing APIs"));
    }

    #[test]
    fn test_apply_edits_fails_without_partial_output() {
        let doc = RESUME.replace("\\section{Technical Skills}", "\\section{Abilities}");
        let edits = SectionEdits {
            summary: Some(vec!["Changed".to_string()]),
            experience: None,
            skills: Some("\\section{SKILLS}".to_string()),
        };
        let err = apply_edits(&doc, &edits).unwrap_err();
        assert_eq!(err, SectionError::AnchorNotFound(SectionKind::Skills));
    }

    #[test]
    fn test_apply_no_edits_is_identity() {
        assert_eq!(apply_edits(RESUME, &SectionEdits::default()).unwrap(), RESUME);
    }

    #[test]
    fn test_section_error_message_names_section() {
        let err = SectionError::AnchorNotFound(SectionKind::Experience);
        assert_eq!(
            err.to_string(),
            "Professional Experience section anchor not found in document"
        );
    }

    #[test]
    fn test_splice_keeps_dollar_signs_literal() {
        assert_eq!(splice("a-b-c", 2..3, "$1 \\$"), "a-$1 \\$-c");
    }
}
