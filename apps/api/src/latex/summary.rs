//! Summary section: `%---SUMMARY---` marker, `\section{Summary}`, one itemize list.
//! Extracted as decomposed bullet bodies so each bullet can be length-checked.

use std::sync::LazyLock;

use regex::Regex;

use super::{spans_single_section, splice, SectionError, SectionKind};

static SUMMARY_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?is)%-+\s*SUMMARY\s*-+.*?\\section\*?\s*\{\s*Summary\s*\}.*?\\begin\s*\{\s*itemize\s*\}(.*?)\\end\s*\{\s*itemize\s*\}",
    )
    .expect("summary block pattern is valid")
});

/// Same anchor, split into (anchor through list-open line, body, list-close).
static SUMMARY_PARTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?is)(%-+\s*SUMMARY\s*-+.*?\\section\*?\s*\{\s*Summary\s*\}.*?\\begin\s*\{\s*itemize\s*\}[^\n]*\n)(.*?)(\\end\s*\{\s*itemize\s*\})",
    )
    .expect("summary parts pattern is valid")
});

static ITEM_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\item\s+").expect("item marker pattern is valid"));

/// Returns the summary bullets with whitespace runs (including newlines) collapsed
/// to single spaces, or `None` if the anchor or any bullet is missing.
pub fn extract(doc: &str) -> Option<Vec<String>> {
    let caps = SUMMARY_BLOCK.captures(doc)?;
    if !spans_single_section(caps.get(0)?.as_str()) {
        return None;
    }
    let body = caps.get(1)?.as_str();

    let bullets: Vec<String> = ITEM_MARKER
        .split(body)
        .skip(1) // list options / whitespace before the first \item
        .map(normalize_whitespace)
        .filter(|b| !b.is_empty())
        .collect();

    if bullets.is_empty() {
        None
    } else {
        Some(bullets)
    }
}

/// Rebuilds the list body as one `\item <bullet>` line per bullet. The marker,
/// heading, list-open line and `\end{itemize}` are kept byte-for-byte.
pub fn replace(doc: &str, bullets: &[String]) -> Result<String, SectionError> {
    let not_found = SectionError::AnchorNotFound(SectionKind::Summary);
    let caps = SUMMARY_PARTS.captures(doc).ok_or(not_found.clone())?;
    let whole = caps.get(0).ok_or(not_found.clone())?;
    if !spans_single_section(whole.as_str()) {
        return Err(not_found);
    }
    let body = caps.get(2).ok_or(not_found)?;

    let mut rebuilt = bullets
        .iter()
        .map(|b| format!("\\item {}", b.trim()))
        .collect::<Vec<_>>()
        .join("\n");
    rebuilt.push('\n');

    Ok(splice(doc, body.range(), &rebuilt))
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::latex::tests::RESUME;

    #[test]
    fn test_extract_collapses_multiline_bullets() {
        let bullets = extract(RESUME).unwrap();
        assert_eq!(
            bullets[0],
            "AI Engineer with 5+ yrs building production ML systems across healthcare and fintech"
        );
        assert_eq!(
            bullets[1],
            "Shipped LLM retrieval pipelines serving 2M requests per day with 99.9\\% uptime"
        );
    }

    #[test]
    fn test_extract_is_case_insensitive_and_whitespace_tolerant() {
        let doc = "%--- summary ---\n\\SECTION{ summary }\n\\begin{ itemize }\n\\item One\n\\item Two\n\\end{itemize}";
        assert_eq!(
            extract(doc),
            Some(vec!["One".to_string(), "Two".to_string()])
        );
    }

    #[test]
    fn test_extract_without_marker_is_none() {
        let doc = "\\section{Summary}\n\\begin{itemize}\n\\item One\n\\end{itemize}";
        assert_eq!(extract(doc), None);
    }

    #[test]
    fn test_extract_with_empty_list_is_none() {
        let doc = "%---SUMMARY---\n\\section{Summary}\n\\begin{itemize}\n\\end{itemize}";
        assert_eq!(extract(doc), None);
    }

    #[test]
    fn test_extract_does_not_borrow_list_from_next_section() {
        let doc = "%---SUMMARY---\n\\section{Summary}\nPlain paragraph.\n\\section{Projects}\n\\begin{itemize}\n\\item Not a summary\n\\end{itemize}";
        assert_eq!(extract(doc), None);
    }

    #[test]
    fn test_replace_then_extract_round_trips_content() {
        let original = extract(RESUME).unwrap();
        let updated = replace(RESUME, &original).unwrap();
        assert_eq!(extract(&updated).unwrap(), original);
        // Anchor and list-open line survive untouched.
        assert!(updated.contains("\\begin{itemize}[leftmargin=0.15in, label={}]\n\\item AI Engineer"));
    }

    #[test]
    fn test_replace_only_touches_list_body() {
        let updated = replace(RESUME, &["Fresh bullet".to_string()]).unwrap();
        assert!(updated.contains("%-----------SUMMARY-----------\n\\section{Summary}"));
        assert!(updated.contains("\\item Fresh bullet\n\\end{itemize}"));
        assert!(!updated.contains("Shipped LLM"));
        assert!(updated.contains("\\section{Technical Skills}"));
    }

    #[test]
    fn test_replace_keeps_latex_backslashes_literal() {
        let updated = replace(RESUME, &["Cut costs 30\\% using $1 tricks".to_string()]).unwrap();
        assert!(updated.contains("\\item Cut costs 30\\% using $1 tricks"));
    }

    #[test]
    fn test_replace_without_anchor_is_not_found() {
        let doc = "\\begin{document}\\end{document}";
        assert_eq!(
            replace(doc, &["x".to_string()]),
            Err(SectionError::AnchorNotFound(SectionKind::Summary))
        );
    }
}
