//! Experience section: the first `\resumeSubheading` entry (through its
//! `\resumeItemListEnd`) after the `\resumeSubHeadingListStart` that follows
//! `\section{Professional Experience}`. Only that entry is ever touched.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use super::{spans_single_section, splice, SectionError, SectionKind};

static FIRST_ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?is)(\\section\*?\s*\{\s*Professional\s+Experience\s*\}.*?\\resumeSubHeadingListStart\s*)(\\resumeSubheading.*?\\resumeItemListEnd)",
    )
    .expect("experience entry pattern is valid")
});

const LIST_END: &str = "\\resumesubheadinglistend";

/// Byte range of the first entry. `None` when the lazy match runs past the end
/// of the entry list or into another section.
fn first_entry(doc: &str) -> Option<Range<usize>> {
    let caps = FIRST_ENTRY.captures(doc)?;
    let entry = caps.get(2)?;
    if !spans_single_section(caps.get(0)?.as_str())
        || entry.as_str().to_lowercase().contains(LIST_END)
    {
        return None;
    }
    Some(entry.range())
}

/// Returns the first experience entry verbatim (trimmed), or `None`.
pub fn extract(doc: &str) -> Option<String> {
    first_entry(doc).map(|range| doc[range].trim().to_string())
}

/// Swaps exactly the first entry for `new_entry`; later entries, the list start
/// marker and everything before it are preserved.
pub fn replace(doc: &str, new_entry: &str) -> Result<String, SectionError> {
    let range =
        first_entry(doc).ok_or(SectionError::AnchorNotFound(SectionKind::Experience))?;
    Ok(splice(doc, range, new_entry))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::latex::tests::RESUME;

    const NEW_ENTRY: &str = r"\resumeSubheading
      {Acme Health}{Jan 2022 -- Present}
      {Senior ML Engineer}{Remote}
      \resumeItemListStart
        \resumeItem{Designed evaluation harness for 12 models}
      \resumeItemListEnd";

    #[test]
    fn test_extract_returns_only_first_entry() {
        let entry = extract(RESUME).unwrap();
        assert!(entry.starts_with("\\resumeSubheading"));
        assert!(entry.ends_with("\\resumeItemListEnd"));
        assert!(entry.contains("Acme Health"));
        assert!(!entry.contains("Beta Corp"));
    }

    #[test]
    fn test_extract_missing_heading_is_none() {
        let doc = RESUME.replace("Professional Experience", "Work History");
        assert_eq!(extract(&doc), None);
    }

    #[test]
    fn test_extract_tolerates_heading_whitespace_and_case() {
        let doc = RESUME.replace(
            "\\section{Professional Experience}",
            "\\section{ PROFESSIONAL\n  EXPERIENCE }",
        );
        assert!(extract(&doc).unwrap().contains("Acme Health"));
    }

    #[test]
    fn test_replace_swaps_exactly_one_entry() {
        let updated = replace(RESUME, NEW_ENTRY).unwrap();
        assert!(updated.contains("Designed evaluation harness"));
        assert!(!updated.contains("Reduced inference cost"));
        assert!(updated.contains("Beta Corp"));
        assert!(updated.contains("Developed billing APIs"));
        assert_eq!(updated.matches("\\resumeSubHeadingListStart").count(), 1);
        assert_eq!(extract(&updated).unwrap(), NEW_ENTRY.trim());
    }

    #[test]
    fn test_replace_preserves_text_before_list_start() {
        let updated = replace(RESUME, NEW_ENTRY).unwrap();
        let before_new = updated.split("Designed evaluation").next().unwrap();
        let before_old = RESUME.split("\\resumeSubheading\n      {Acme").next().unwrap();
        assert!(before_new.starts_with(before_old));
    }

    #[test]
    fn test_replace_without_anchor_is_not_found() {
        let doc = RESUME.replace("\\resumeSubHeadingListStart", "");
        assert_eq!(
            replace(&doc, NEW_ENTRY),
            Err(SectionError::AnchorNotFound(SectionKind::Experience))
        );
    }

    #[test]
    fn test_entry_without_item_list_does_not_reach_next_section() {
        let doc = r"\section{Professional Experience}
  \resumeSubHeadingListStart
    \resumeSubheading{Acme}{2020}{Engineer}{Remote}
  \resumeSubHeadingListEnd

\section{Projects}
  \resumeSubHeadingListStart
    \resumeSubheading{Ledger}{2021}{Author}{Online}
      \resumeItemListStart
        \resumeItem{Shipped a double-entry ledger}
      \resumeItemListEnd
  \resumeSubHeadingListEnd
\end{document}";

        assert_eq!(extract(doc), None);
        assert_eq!(
            replace(doc, r"\resumeSubheading{New}{x}{y}{z}"),
            Err(SectionError::AnchorNotFound(SectionKind::Experience))
        );
    }

    #[test]
    fn test_entry_without_item_list_stops_at_list_end() {
        let doc = r"\section{Professional Experience}
  \resumeSubHeadingListStart
    \resumeSubheading{Acme}{2020}{Engineer}{Remote}
  \resumeSubHeadingListEnd
\resumeItemListEnd";
        assert_eq!(extract(doc), None);
    }
}
