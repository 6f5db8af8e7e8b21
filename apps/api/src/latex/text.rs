//! Small LaTeX text helpers shared by the validators, the generator and the API.

use std::sync::LazyLock;

use regex::Regex;

/// Characters LaTeX treats specially in running text.
const SPECIAL_CHARS: &[char] = &['%', '$', '&', '#', '_', '{', '}', '^', '~'];

static EMPHASIS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\\(?:textbf|textit|emph|underline)\s*\{([^{}]*)\}")
        .expect("emphasis pattern is valid")
});

static TEXTCOLOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\\textcolor\s*\{[^{}]*\}\s*\{([^{}]*)\}").expect("textcolor pattern is valid")
});

static ITEM_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\\+item\s*").expect("item line pattern is valid"));

/// Escapes LaTeX special characters that are not already preceded by a backslash.
pub fn escape_latex_special_chars(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 8);
    let mut prev: Option<char> = None;
    for ch in text.chars() {
        if SPECIAL_CHARS.contains(&ch) && prev != Some('\\') {
            match ch {
                '^' => out.push_str("\\^{}"),
                '~' => out.push_str("\\~{}"),
                _ => {
                    out.push('\\');
                    out.push(ch);
                }
            }
        } else {
            out.push(ch);
        }
        prev = Some(ch);
    }
    out
}

/// True if any special character appears without a preceding backslash.
pub fn has_unescaped_special(text: &str) -> bool {
    let mut prev: Option<char> = None;
    for ch in text.chars() {
        if SPECIAL_CHARS.contains(&ch) && prev != Some('\\') {
            return true;
        }
        prev = Some(ch);
    }
    false
}

/// Minimal structural sanity check for a full document.
pub fn validate_latex_structure(doc: &str) -> bool {
    ["\\documentclass", "\\begin{document}", "\\end{document}"]
        .iter()
        .all(|marker| doc.contains(marker))
}

/// Strips emphasis and colour wrappers, keeping their inner text.
/// Nested wrappers are peeled from the inside out.
pub fn unwrap_formatting(text: &str) -> String {
    let mut current = text.to_string();
    loop {
        let next = EMPHASIS.replace_all(&current, "$1");
        let next = TEXTCOLOR.replace_all(&next, "$1").into_owned();
        if next == current {
            return current;
        }
        current = next;
    }
}

/// Bodies of every `\<command>{...}` occurrence, braces balanced.
///
/// `\resumeItemListStart` is not an occurrence of `\resumeItem`: the command
/// name must end at a non-letter. Escaped braces (`\{`, `\}`) do not nest.
pub fn command_arguments<'a>(text: &'a str, command: &str) -> Vec<&'a str> {
    let needle = format!("\\{command}");
    let mut args = Vec::new();
    let mut search_from = 0;

    while let Some(found) = text[search_from..].find(&needle) {
        let after_name = search_from + found + needle.len();
        search_from = after_name;

        let rest = &text[after_name..];
        if rest.starts_with(|c: char| c.is_ascii_alphabetic()) {
            continue;
        }
        let trimmed = rest.trim_start();
        if !trimmed.starts_with('{') {
            continue;
        }
        let open = after_name + (rest.len() - trimmed.len());
        if let Some(close) = matching_brace(text, open) {
            args.push(&text[open + 1..close]);
            search_from = close + 1;
        }
    }
    args
}

/// Byte index of the `}` closing the `{` at `open`.
fn matching_brace(text: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut escaped = false;
    for (offset, ch) in text[open..].char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' => escaped = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + offset);
                }
            }
            _ => {}
        }
    }
    None
}

/// Bullet texts of every `\resumeItem{...}` with formatting wrappers removed.
pub fn resume_items(text: &str) -> Vec<String> {
    command_arguments(text, "resumeItem")
        .into_iter()
        .map(|body| unwrap_formatting(body.trim()))
        .collect()
}

/// Parses generated `\item ...` lines into bullet strings. Lines that do not start
/// with an item marker are ignored; doubled backslashes are accepted.
pub fn parse_item_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| ITEM_LINE.is_match(line))
        .map(|line| ITEM_LINE.replace(line, "").trim().to_string())
        .filter(|bullet| !bullet.is_empty())
        .collect()
}

static SUBHEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\\resumeSubheading\s*\{([^}]*)\}\s*\{([^}]*)\}\s*\{([^}]*)\}\s*\{([^}]*)\}",
    )
    .expect("subheading pattern is valid")
});
static RESUME_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\resumeItem\{([^}]*)\}").expect("resume item pattern is valid"));
static PLAIN_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\item\s+").expect("plain item pattern is valid"));
static SECTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\section\*?\{([^}]*)\}").expect("section pattern is valid"));
static ENVIRONMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\\(?:begin|end)\{[^}]*\}(?:\[[^\]]*\])?").expect("environment pattern is valid")
});
static BARE_COMMAND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\[a-zA-Z]+").expect("command pattern is valid"));
static BLANK_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n(?:\s*\n)+").expect("blank runs pattern is valid"));

/// Readable preview of a section block: headings and bullets survive,
/// markup does not.
pub fn latex_to_plain_text(block: &str) -> String {
    let text = unwrap_formatting(block);
    let text = SUBHEADING.replace_all(&text, "$1 | $2\n$3 | $4\n");
    let text = RESUME_ITEM.replace_all(&text, "• $1");
    let text = PLAIN_ITEM.replace_all(&text, "• ");
    let text = SECTION.replace_all(&text, "$1");
    let text = ENVIRONMENT.replace_all(&text, "");
    let text = text.replace("\\%", "%").replace("\\&", "&").replace("\\$", "$");
    let text = BARE_COMMAND.replace_all(&text, "");
    let text = BLANK_RUNS.replace_all(&text, "\n\n");
    text.lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}
