//! Query normalization: free-text question → compact provider query.
//!
//! Two composed passes. [`extract_keywords`] removes interrogative and
//! filler vocabulary (word-boundary matched) and terminal punctuation;
//! [`simplify`] strips everything outside `[a-z0-9\s]` and drops short or
//! stop-listed tokens. A question made entirely of filler normalizes to
//! the empty string, which is valid input to the fetch stage and simply
//! yields zero results.

use regex::Regex;
use std::sync::LazyLock;

/// Interrogative and filler words/phrases removed by the first pass.
const FILLER_PHRASES: &[&str] = &[
    "what",
    "who",
    "when",
    "where",
    "why",
    "how",
    "does",
    "do",
    "did",
    "is",
    "are",
    "was",
    "were",
    "the",
    "in",
    "on",
    "of",
    "and",
    "for",
    "to",
    "with",
    "about",
    "this",
    "that",
    "any",
    "current",
    "present",
    "say",
    "tell me",
    "can you",
    "give me",
    "please",
    "long-term",
    "long term",
    "explain",
    "find",
    "show",
    "report",
];

/// Short stopwords dropped by the second pass.
const STOPWORDS: &[&str] = &[
    "what", "is", "are", "do", "does", "did", "the", "a", "an", "of", "in", "on", "to", "and",
    "with", "for", "by", "about", "that", "this", "it", "any",
];

/// One word-boundary pattern per filler phrase, compiled once.
static FILLER_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    FILLER_PHRASES
        .iter()
        .map(|phrase| {
            Regex::new(&format!(r"\b{}\b", regex::escape(phrase)))
                .expect("filler phrase patterns are valid")
        })
        .collect()
});

/// First pass: strip question words, filler phrases, and punctuation.
///
/// The input is lowercased, each filler phrase is removed at word
/// boundaries, `? . , !` are stripped, and whitespace runs collapse to a
/// single space.
pub fn extract_keywords(question: &str) -> String {
    let mut text = question.to_lowercase();
    for pattern in FILLER_PATTERNS.iter() {
        text = pattern.replace_all(&text, "").into_owned();
    }
    let text: String = text.chars().filter(|c| !"?.,!".contains(*c)).collect();
    collapse_whitespace(&text)
}

/// Second pass: keep only `[a-z0-9]` tokens longer than two characters
/// that are not stopwords.
pub fn simplify(raw: &str) -> String {
    raw.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
        .collect::<String>()
        .split_whitespace()
        .filter(|word| word.len() > 2 && !STOPWORDS.contains(word))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Full normalization: raw question → keyword-extracted → simplified.
pub fn normalize(question: &str) -> String {
    simplify(&extract_keywords(question))
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
