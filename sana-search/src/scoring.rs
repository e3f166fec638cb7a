//! Deterministic relevance scoring and ranking.
//!
//! Pure functions with no I/O: document classification, the integer
//! scoring formula, and the filter → stable-sort → truncate ranking step.
//! Scores are recomputable: identical inputs always produce the identical
//! value.
//!
//! Scoring formula (range 0–6):
//!
//! ```text
//! score = year_score + keyword_score + venue_score + review_bonus
//! year_score    = 2 if year >= 2018 else 0
//! keyword_score = 2 if >= 3 query tokens occur in the abstract,
//!                 1 if >= 1, else 0
//! venue_score   = 1 if the venue is non-empty
//! review_bonus  = 1 for reviews/meta-analyses
//! ```

use crate::types::{Paper, PaperKind};
use regex::Regex;
use std::sync::LazyLock;

/// Publication years at or after this value earn the recency bonus.
const RECENT_YEAR: i32 = 2018;

static REVIEW_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)meta-?analysis|systematic review").expect("review pattern is valid")
});

/// Classify a document as a review/meta-analysis from its title or abstract.
pub fn classify_kind(title: &str, abstract_text: &str) -> PaperKind {
    if REVIEW_PATTERN.is_match(title) || REVIEW_PATTERN.is_match(abstract_text) {
        PaperKind::Review
    } else {
        PaperKind::Normal
    }
}

/// Compute the relevance score for one document.
///
/// `query` is the normalized search query whose whitespace-separated
/// tokens are substring-matched (case-insensitively) against the
/// abstract. Multi-word terms are deliberately scored per token, not as
/// phrases.
pub fn compute_score(
    query: &str,
    abstract_text: &str,
    year: i32,
    venue: &str,
    kind: PaperKind,
) -> u8 {
    let abstract_lower = abstract_text.to_lowercase();
    let match_count = query
        .to_lowercase()
        .split_whitespace()
        .filter(|keyword| abstract_lower.contains(keyword))
        .count();

    let year_score = if year >= RECENT_YEAR { 2 } else { 0 };
    let keyword_score = match match_count {
        0 => 0,
        1 | 2 => 1,
        _ => 2,
    };
    let venue_score = u8::from(!venue.is_empty());
    let review_bonus = u8::from(kind == PaperKind::Review);

    year_score + keyword_score + venue_score + review_bonus
}

/// Filter, sort, and truncate candidates into the final result list.
///
/// Documents with an empty title or empty abstract are never surfaced.
/// The sort is stable and descending by score, so ties keep their
/// original fetch order; at most `top_n` entries are returned.
pub fn rank(mut papers: Vec<Paper>, top_n: usize) -> Vec<Paper> {
    papers.retain(|p| !p.title.is_empty() && !p.abstract_text.is_empty());
    papers.sort_by(|a, b| b.score.cmp(&a.score));
    papers.truncate(top_n);
    papers
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_paper(id: &str, score: u8) -> Paper {
        Paper {
            id: id.into(),
            title: format!("Title {id}"),
            abstract_text: format!("Abstract {id}"),
            year: 2020,
            venue: "J Test".into(),
            kind: PaperKind::Normal,
            score,
            url: format!("https://pubmed.ncbi.nlm.nih.gov/{id}/"),
        }
    }

    #[test]
    fn classify_detects_meta_analysis_variants() {
        assert_eq!(
            classify_kind("A meta-analysis of creatine trials", ""),
            PaperKind::Review
        );
        assert_eq!(
            classify_kind("A METAANALYSIS of trials", ""),
            PaperKind::Review
        );
        assert_eq!(
            classify_kind("", "We performed a systematic review."),
            PaperKind::Review
        );
    }

    #[test]
    fn classify_normal_when_no_pattern() {
        assert_eq!(
            classify_kind("A randomized trial", "Double-blind study."),
            PaperKind::Normal
        );
    }

    #[test]
    fn score_is_deterministic() {
        let a = compute_score("creatine muscle", "creatine builds muscle", 2020, "J", PaperKind::Normal);
        let b = compute_score("creatine muscle", "creatine builds muscle", 2020, "J", PaperKind::Normal);
        assert_eq!(a, b);
    }

    #[test]
    fn score_in_range() {
        // Maximum: recent + >=3 keywords + venue + review.
        let max = compute_score(
            "creatine muscle strength",
            "creatine improves muscle strength",
            2022,
            "Sports Med",
            PaperKind::Review,
        );
        assert_eq!(max, 6);

        // Minimum: old, no matches, no venue, normal.
        let min = compute_score("creatine", "nothing relevant", 1900, "", PaperKind::Normal);
        assert_eq!(min, 0);
    }

    #[test]
    fn year_boundary_at_2018() {
        let recent = compute_score("x", "", 2018, "", PaperKind::Normal);
        let old = compute_score("x", "", 2017, "", PaperKind::Normal);
        assert_eq!(recent, 2);
        assert_eq!(old, 0);
    }

    #[test]
    fn keyword_tiers() {
        let abstract_text = "creatine improves muscle strength in athletes";
        // Three matches → 2.
        assert_eq!(
            compute_score("creatine muscle strength", abstract_text, 1900, "", PaperKind::Normal),
            2
        );
        // One match → 1.
        assert_eq!(
            compute_score("creatine running cycling", abstract_text, 1900, "", PaperKind::Normal),
            1
        );
        // Two matches → still 1.
        assert_eq!(
            compute_score("creatine muscle cycling", abstract_text, 1900, "", PaperKind::Normal),
            1
        );
        // No matches → 0.
        assert_eq!(
            compute_score("swimming running", abstract_text, 1900, "", PaperKind::Normal),
            0
        );
    }

    #[test]
    fn keyword_matching_case_insensitive() {
        let score = compute_score("CREATINE", "Creatine is studied.", 1900, "", PaperKind::Normal);
        assert_eq!(score, 1);
    }

    #[test]
    fn empty_query_scores_no_keywords() {
        let score = compute_score("", "any abstract text", 2020, "J", PaperKind::Normal);
        assert_eq!(score, 3); // year 2 + venue 1
    }

    #[test]
    fn keywords_match_per_token_not_as_phrase() {
        // "energy value" is split: both tokens match individually even
        // though the phrase never occurs.
        let score = compute_score(
            "energy value",
            "the value of high energy diets",
            1900,
            "",
            PaperKind::Normal,
        );
        assert_eq!(score, 1); // 2 matches → tier 1
    }

    #[test]
    fn venue_and_review_bonuses() {
        assert_eq!(compute_score("x", "", 1900, "Lancet", PaperKind::Normal), 1);
        assert_eq!(compute_score("x", "", 1900, "", PaperKind::Review), 1);
        assert_eq!(compute_score("x", "", 1900, "Lancet", PaperKind::Review), 2);
    }

    #[test]
    fn rank_filters_empty_title_or_abstract() {
        let mut no_title = make_paper("1", 5);
        no_title.title = String::new();
        let mut no_abstract = make_paper("2", 5);
        no_abstract.abstract_text = String::new();
        let ok = make_paper("3", 1);

        let ranked = rank(vec![no_title, no_abstract, ok], 5);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].id, "3");
    }

    #[test]
    fn rank_sorts_descending_and_truncates() {
        let papers = vec![
            make_paper("a", 1),
            make_paper("b", 5),
            make_paper("c", 3),
            make_paper("d", 4),
            make_paper("e", 2),
            make_paper("f", 0),
        ];
        let ranked = rank(papers, 5);
        assert_eq!(ranked.len(), 5);
        let scores: Vec<u8> = ranked.iter().map(|p| p.score).collect();
        assert_eq!(scores, vec![5, 4, 3, 2, 1]);
    }

    #[test]
    fn rank_ties_keep_fetch_order() {
        let papers = vec![
            make_paper("first", 3),
            make_paper("second", 3),
            make_paper("third", 3),
        ];
        let ranked = rank(papers, 5);
        let ids: Vec<&str> = ranked.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second", "third"]);
    }

    #[test]
    fn rank_empty_input() {
        assert!(rank(vec![], 5).is_empty());
    }
}
