//! Fallback query reformulation rules.
//!
//! A fixed, ordered table of scientific-terminology synonym swaps, applied
//! only when a search attempt returned zero results. Rules are pure text
//! rewrites; the orchestrator tries them in declared order, skipping any
//! rule that leaves the query unchanged or reproduces a query already
//! attempted in the same call.

use regex::Regex;
use std::sync::LazyLock;

/// A single deterministic rewrite: case-insensitive pattern → replacement.
pub struct RewriteRule {
    pattern: Regex,
    replacement: &'static str,
}

impl RewriteRule {
    fn new(pattern: &str, replacement: &'static str) -> Self {
        Self {
            pattern: Regex::new(&format!("(?i){pattern}"))
                .expect("rewrite rule patterns are valid"),
            replacement,
        }
    }

    /// Apply this rule to `query`, replacing every match.
    pub fn apply(&self, query: &str) -> String {
        self.pattern.replace_all(query, self.replacement).into_owned()
    }
}

/// The rewrite rules, in the order they are tried.
static RULES: LazyLock<Vec<RewriteRule>> = LazyLock::new(|| {
    vec![
        RewriteRule::new("caloric content|calorie content", "energy value"),
        RewriteRule::new("long[- ]?term health effects", "safety"),
        RewriteRule::new("determined and verified", "measurement"),
        RewriteRule::new("ingredients", "composition"),
        RewriteRule::new("current scientific research say", "systematic review"),
        RewriteRule::new("do they contribute calories", "nutritional analysis"),
        RewriteRule::new("review", "systematic review"),
        RewriteRule::new("impact", "effect"),
    ]
});

/// All rules in declared order.
pub fn rules() -> &'static [RewriteRule] {
    &RULES
}
