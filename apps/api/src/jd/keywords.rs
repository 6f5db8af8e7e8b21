//! Keyword Extractor — frequency-ranked terms from a job description.
//!
//! Ranking is by count descending; equal counts keep first-occurrence order,
//! so the same description always yields the same list.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

pub const DEFAULT_TOP_N: usize = 8;
const MAX_PHRASES: usize = 10;

static TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[a-z0-9]+(?:-[a-z0-9]+)*\b").expect("token pattern is valid")
});

const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
    "from", "as", "is", "was", "are", "were", "be", "been", "being", "have", "has", "had", "do",
    "does", "did", "will", "would", "should", "could", "may", "might", "must", "can", "this",
    "that", "these", "those", "i", "you", "he", "she", "it", "we", "they", "what", "which", "who",
    "when", "where", "why", "how", "all", "each", "every", "both", "few", "more", "most", "other",
    "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than", "too", "very", "our",
    "your", "their",
];

/// Lowercased word tokens with stop words and tokens of two chars or fewer removed.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    TOKEN
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|word| word.len() > 2 && !STOP_WORDS.contains(word))
        .map(str::to_string)
        .collect()
}

/// Top `top_n` tokens by frequency.
pub fn extract_keywords(text: &str, top_n: usize) -> Vec<String> {
    most_common(tokenize(text), top_n)
        .into_iter()
        .map(|(word, _)| word)
        .collect()
}

/// Recurring 2..=`max_words` word windows over the filtered token stream.
/// At most ten phrases, each seen more than once.
pub fn extract_phrases(text: &str, max_words: usize) -> Vec<String> {
    let words = tokenize(text);
    let mut phrases = Vec::new();
    for n in 2..=max_words {
        if n > words.len() {
            break;
        }
        phrases.extend(words.windows(n).map(|window| window.join(" ")));
    }

    most_common(phrases, MAX_PHRASES)
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(phrase, _)| phrase)
        .collect()
}

/// Number of `keywords` present in `text` (case-insensitive substring match).
pub fn count_keyword_matches(text: &str, keywords: &[String]) -> usize {
    matched_keywords(text, keywords).len()
}

/// The subset of `keywords` present in `text`, in input order.
pub fn matched_keywords(text: &str, keywords: &[String]) -> Vec<String> {
    let haystack = text.to_lowercase();
    keywords
        .iter()
        .filter(|kw| haystack.contains(&kw.to_lowercase()))
        .cloned()
        .collect()
}

/// Counts items and returns the `n` most common, ties broken by first appearance.
fn most_common(items: Vec<String>, n: usize) -> Vec<(String, usize)> {
    let mut first_seen: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(&str, usize)> = Vec::new();

    for item in &items {
        match first_seen.get(item.as_str()) {
            Some(&idx) => counts[idx].1 += 1,
            None => {
                first_seen.insert(item.as_str(), counts.len());
                counts.push((item.as_str(), 1));
            }
        }
    }

    // Stable sort keeps insertion order among equal counts.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .take(n)
        .map(|(item, count)| (item.to_string(), count))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const JD: &str = "Senior Machine Learning Engineer. You will build machine learning \
        pipelines in Python and deploy LLM services on Kubernetes. Python is required; \
        experience with machine learning infrastructure and real-time inference is a plus.";

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_tokenize_drops_stop_words_and_short_tokens() {
        let tokens = tokenize("We are building AI tools for the ML team");
        assert_eq!(tokens, strings(&["building", "tools", "team"]));
    }

    #[test]
    fn test_tokenize_keeps_hyphenated_compounds() {
        assert_eq!(
            tokenize("Real-time, event-driven systems"),
            strings(&["real-time", "event-driven", "systems"])
        );
    }

    #[test]
    fn test_extract_keywords_ranks_by_frequency() {
        let keywords = extract_keywords(JD, 3);
        assert_eq!(keywords, strings(&["machine", "learning", "python"]));
    }

    #[test]
    fn test_extract_keywords_ties_keep_first_seen_order() {
        let keywords = extract_keywords("zeta alpha beta zeta alpha beta", 3);
        assert_eq!(keywords, strings(&["zeta", "alpha", "beta"]));
    }

    #[test]
    fn test_extract_keywords_fewer_than_requested() {
        assert_eq!(extract_keywords("rust", DEFAULT_TOP_N), strings(&["rust"]));
        assert!(extract_keywords("", DEFAULT_TOP_N).is_empty());
    }

    #[test]
    fn test_extract_phrases_requires_repetition() {
        let phrases = extract_phrases(JD, 3);
        assert_eq!(phrases, strings(&["machine learning"]));
    }

    #[test]
    fn test_extract_phrases_short_input() {
        assert!(extract_phrases("rust", 3).is_empty());
    }

    #[test]
    fn test_keyword_matches_are_case_insensitive_substrings() {
        let keywords = strings(&["Python", "kubernetes", "ai", "golang"]);
        let text = "Deployed PYTHON services on Kubernetes with fair scheduling";
        assert_eq!(count_keyword_matches(text, &keywords), 3);
        assert_eq!(
            matched_keywords(text, &keywords),
            strings(&["Python", "kubernetes", "ai"])
        );
    }
}
