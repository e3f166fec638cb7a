//! Core types for literature search results.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single retrieved, scored bibliographic item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paper {
    /// Provider-assigned identifier, unique within the provider.
    pub id: String,
    /// Article title with HTML entities decoded.
    pub title: String,
    /// Decoded abstract text, empty when the detail fetch failed or the
    /// payload had no recognizable abstract region.
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    /// Publication year; `1900` when the provider omits or mangles the date.
    pub year: i32,
    /// Journal or venue name, empty if unknown.
    pub venue: String,
    /// Whether the article is a review/meta-analysis or a normal study.
    pub kind: PaperKind,
    /// Deterministic relevance score in `0..=6`.
    pub score: u8,
    /// Canonical article URL, derived from `id`.
    pub url: String,
}

/// Document classification used by the relevance scorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaperKind {
    /// A primary study or any article not matched as a review.
    Normal,
    /// A systematic review or meta-analysis.
    Review,
}

impl PaperKind {
    /// Returns the human-readable name of this classification.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Review => "review",
        }
    }
}

impl fmt::Display for PaperKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The terminal result of one resilient search call.
///
/// Constructed once per orchestrator invocation and returned by value;
/// nothing is persisted between calls. An empty `papers` list with
/// `reformulated: None` is the "no results anywhere" outcome, not an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchOutcome {
    /// The query string that produced `papers` (or, when empty, the
    /// originally normalized query).
    pub query_used: String,
    /// Top-ranked papers, sorted by score descending.
    pub papers: Vec<Paper>,
    /// Set when a reformulation rule produced the successful query.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reformulated: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_paper() -> Paper {
        Paper {
            id: "12345".into(),
            title: "Creatine supplementation and renal function".into(),
            abstract_text: "A randomized trial of creatine.".into(),
            year: 2021,
            venue: "J Sports Med".into(),
            kind: PaperKind::Normal,
            score: 4,
            url: "https://pubmed.ncbi.nlm.nih.gov/12345/".into(),
        }
    }

    #[test]
    fn paper_construction() {
        let paper = make_paper();
        assert_eq!(paper.id, "12345");
        assert_eq!(paper.year, 2021);
        assert_eq!(paper.kind, PaperKind::Normal);
    }

    #[test]
    fn paper_serde_round_trip() {
        let paper = make_paper();
        let json = serde_json::to_string(&paper).expect("serialize");
        // The abstract field serializes under its wire name.
        assert!(json.contains("\"abstract\""));
        let decoded: Paper = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(decoded.title, paper.title);
        assert_eq!(decoded.abstract_text, paper.abstract_text);
        assert_eq!(decoded.kind, PaperKind::Normal);
    }

    #[test]
    fn paper_kind_display() {
        assert_eq!(PaperKind::Normal.to_string(), "normal");
        assert_eq!(PaperKind::Review.to_string(), "review");
    }

    #[test]
    fn paper_kind_serializes_lowercase() {
        let json = serde_json::to_string(&PaperKind::Review).expect("serialize");
        assert_eq!(json, "\"review\"");
    }

    #[test]
    fn outcome_without_reformulation_omits_field() {
        let outcome = SearchOutcome {
            query_used: "creatine safety".into(),
            papers: vec![],
            reformulated: None,
        };
        let json = serde_json::to_string(&outcome).expect("serialize");
        assert!(!json.contains("reformulated"));
    }

    #[test]
    fn outcome_serde_round_trip() {
        let outcome = SearchOutcome {
            query_used: "creatine safety systematic review".into(),
            papers: vec![make_paper()],
            reformulated: Some("creatine safety systematic review".into()),
        };
        let json = serde_json::to_string(&outcome).expect("serialize");
        let decoded: SearchOutcome = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(decoded.papers.len(), 1);
        assert_eq!(
            decoded.reformulated.as_deref(),
            Some("creatine safety systematic review")
        );
    }
}
