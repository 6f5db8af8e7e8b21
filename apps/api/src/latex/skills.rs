//! Skills section: the whole block from the heading through `\end{itemize}`.
//! Heading variants are tried in fixed order; the first one present wins.

use std::sync::LazyLock;

use regex::{Match, Regex};

use super::{spans_single_section, splice, SectionError, SectionKind};

static HEADING_VARIANTS: LazyLock<[Regex; 2]> = LazyLock::new(|| {
    [
        Regex::new(
            r"(?is)\\section\*?\s*\{\s*SKILLS\s*\}.*?\\begin\s*\{\s*itemize\s*\}.*?\\end\s*\{\s*itemize\s*\}",
        )
        .expect("skills pattern is valid"),
        Regex::new(
            r"(?is)\\section\*?\s*\{\s*Technical\s+Skills\s*\}.*?\\begin\s*\{\s*itemize\s*\}.*?\\end\s*\{\s*itemize\s*\}",
        )
        .expect("technical skills pattern is valid"),
    ]
});

fn locate(doc: &str) -> Option<Match<'_>> {
    HEADING_VARIANTS
        .iter()
        .filter_map(|re| re.find(doc))
        .find(|m| spans_single_section(m.as_str()))
}

/// Returns the full skills block (heading and list delimiters included), or `None`.
pub fn extract(doc: &str) -> Option<String> {
    locate(doc).map(|m| m.as_str().trim().to_string())
}

/// Replaces the entire matched block with `new_block` verbatim.
pub fn replace(doc: &str, new_block: &str) -> Result<String, SectionError> {
    let block = locate(doc).ok_or(SectionError::AnchorNotFound(SectionKind::Skills))?;
    Ok(splice(doc, block.range(), new_block))
}
