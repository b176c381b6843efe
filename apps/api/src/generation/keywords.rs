//! Keyword Extractor — bag-of-words signal from a free-text job description.
//!
//! Intentionally the simplest possible signal: alphanumeric runs are tokens,
//! everything else separates, tokens are lower-cased and collapsed into a
//! set. No stemming, no stopword removal, no minimum-length filter. The set
//! only biases prompt phrasing, so linguistic sophistication buys nothing.

use std::collections::BTreeSet;

/// Tokenizes free text into a set of lowercase word tokens.
///
/// Empty or whitespace-only input yields an empty set, never an error.
/// A sorted set keeps the joined keyword clause reproducible across runs.
pub fn extract_keywords(text: &str) -> BTreeSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(|token| token.to_lowercase())
        .collect()
}

/// Joins a keyword set into the comma-separated clause embedded in prompts.
pub fn join_keywords(keywords: &BTreeSet<String>) -> String {
    keywords
        .iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
