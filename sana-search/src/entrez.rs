//! Literature provider endpoints and response parsing.
//!
//! URL construction for the three E-utilities endpoints (search, summary,
//! detail), serde models for the JSON payloads, and the text extraction
//! helpers shared by the batch fetcher: abstract region extraction from
//! detail XML, HTML entity decoding, and publication year parsing.

use crate::config::SearchConfig;
use crate::error::{Result, SearchError};
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Live provider endpoint root.
pub const DEFAULT_BASE_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils";

/// Article URL root; document URLs are derived from identifiers.
const ARTICLE_BASE_URL: &str = "https://pubmed.ncbi.nlm.nih.gov";

static MARKUP_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("markup tag pattern is valid"));

/// Search endpoint URL: resolves a query to an ordered identifier list.
pub fn search_url(config: &SearchConfig, query: &str) -> String {
    format!(
        "{}/esearch.fcgi?db=pubmed&retmode=json&retmax={}&term={}&api_key={}",
        config.base_url,
        config.max_results,
        urlencoding::encode(query),
        config.api_key,
    )
}

/// Summary endpoint URL for one batch of identifiers.
pub fn summary_url(config: &SearchConfig, ids: &[String]) -> String {
    format!(
        "{}/esummary.fcgi?db=pubmed&retmode=json&id={}&api_key={}",
        config.base_url,
        ids.join(","),
        config.api_key,
    )
}

/// Detail endpoint URL for a single identifier.
pub fn detail_url(config: &SearchConfig, id: &str) -> String {
    format!(
        "{}/efetch.fcgi?db=pubmed&retmode=xml&id={}&api_key={}",
        config.base_url, id, config.api_key,
    )
}

/// Canonical article URL for a provider identifier.
pub fn article_url(id: &str) -> String {
    format!("{ARTICLE_BASE_URL}/{id}/")
}

/// Search endpoint response envelope.
#[derive(Debug, Deserialize)]
pub struct EsearchResponse {
    #[serde(default)]
    pub esearchresult: EsearchResult,
}

/// The identifier list inside a search response.
#[derive(Debug, Default, Deserialize)]
pub struct EsearchResult {
    #[serde(default, rename = "idlist")]
    pub id_list: Vec<String>,
}

/// Parse a search response body into its identifier list.
pub fn parse_search_ids(body: &str) -> Result<Vec<String>> {
    let response: EsearchResponse = serde_json::from_str(body)
        .map_err(|e| SearchError::Parse(format!("search response: {e}")))?;
    Ok(response.esearchresult.id_list)
}

/// Per-document metadata from the summary endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocSummary {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub pubdate: String,
    /// Journal/venue name.
    #[serde(default)]
    pub source: String,
}

/// Parse a summary response body into an id → metadata map.
///
/// The payload keys each document by its identifier alongside a `uids`
/// index array, which is skipped. Entries that do not deserialize are
/// dropped rather than failing the batch.
pub fn parse_summaries(body: &str) -> Result<HashMap<String, DocSummary>> {
    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| SearchError::Parse(format!("summary response: {e}")))?;

    let mut summaries = HashMap::new();
    if let Some(result) = value.get("result").and_then(|r| r.as_object()) {
        for (id, entry) in result {
            if id == "uids" {
                continue;
            }
            if let Ok(summary) = serde_json::from_value::<DocSummary>(entry.clone()) {
                summaries.insert(id.clone(), summary);
            }
        }
    }
    Ok(summaries)
}

/// Extract the first `<Abstract>…</Abstract>` region from detail XML.
///
/// Embedded markup tags are stripped and whitespace collapsed. Returns an
/// empty string when no abstract region is present: a malformed document
/// is "a document with an empty abstract", not an error.
pub fn extract_abstract(xml: &str) -> String {
    let Some(start) = xml.find("<Abstract>") else {
        return String::new();
    };
    let inner = &xml[start + "<Abstract>".len()..];
    let Some(end) = inner.find("</Abstract>") else {
        return String::new();
    };
    let stripped = MARKUP_TAG.replace_all(&inner[..end], " ");
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Decode the fixed set of HTML character entities found in provider
/// titles and abstracts.
pub fn decode_entities(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    text.replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x2013;", "\u{2013}")
        .replace("&#x2014;", "\u{2014}")
        .replace("&nbsp;", " ")
        .replace("&hellip;", "\u{2026}")
        .replace("&#x2026;", "\u{2026}")
}

/// Parse a publication year from the summary `pubdate` field.
///
/// Takes the first four characters (`"2021 Mar 15"` → 2021); anything
/// absent or non-numeric falls back to the sentinel `1900`.
pub fn parse_year(pubdate: &str) -> i32 {
    pubdate
        .get(..4)
        .and_then(|prefix| prefix.parse().ok())
        .unwrap_or(1900)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SearchConfig {
        SearchConfig {
            base_url: "http://localhost:9999".into(),
            api_key: "k123".into(),
            ..Default::default()
        }
    }

    #[test]
    fn search_url_encodes_query() {
        let url = search_url(&test_config(), "creatine safe use");
        assert!(url.starts_with("http://localhost:9999/esearch.fcgi?"));
        assert!(url.contains("term=creatine%20safe%20use"));
        assert!(url.contains("retmax=20"));
        assert!(url.contains("api_key=k123"));
    }

    #[test]
    fn summary_url_joins_ids() {
        let ids = vec!["1".to_string(), "2".to_string(), "3".to_string()];
        let url = summary_url(&test_config(), &ids);
        assert!(url.contains("esummary.fcgi"));
        assert!(url.contains("id=1,2,3"));
    }

    #[test]
    fn detail_url_single_id() {
        let url = detail_url(&test_config(), "42");
        assert!(url.contains("efetch.fcgi"));
        assert!(url.contains("retmode=xml"));
        assert!(url.contains("id=42"));
    }

    #[test]
    fn article_url_derived_from_id() {
        assert_eq!(article_url("12345"), "https://pubmed.ncbi.nlm.nih.gov/12345/");
    }

    #[test]
    fn parse_search_ids_happy_path() {
        let body = r#"{"esearchresult": {"idlist": ["111", "222"]}}"#;
        let ids = parse_search_ids(body).expect("should parse");
        assert_eq!(ids, vec!["111", "222"]);
    }

    #[test]
    fn parse_search_ids_missing_list_is_empty() {
        let body = r#"{"esearchresult": {}}"#;
        assert!(parse_search_ids(body).expect("should parse").is_empty());
        let body = r#"{}"#;
        assert!(parse_search_ids(body).expect("should parse").is_empty());
    }

    #[test]
    fn parse_search_ids_rejects_invalid_json() {
        assert!(parse_search_ids("not json").is_err());
    }

    #[test]
    fn parse_summaries_skips_uids_index() {
        let body = r#"{
            "result": {
                "uids": ["111", "222"],
                "111": {"title": "First", "pubdate": "2020 Jan", "source": "Nutr J"},
                "222": {"title": "Second", "pubdate": "2019", "source": ""}
            }
        }"#;
        let summaries = parse_summaries(body).expect("should parse");
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries["111"].title, "First");
        assert_eq!(summaries["111"].source, "Nutr J");
        assert_eq!(summaries["222"].pubdate, "2019");
    }

    #[test]
    fn parse_summaries_missing_result_is_empty() {
        let summaries = parse_summaries("{}").expect("should parse");
        assert!(summaries.is_empty());
    }

    #[test]
    fn extract_abstract_strips_markup_and_collapses_whitespace() {
        let xml = "<PubmedArticle><Abstract><AbstractText Label=\"BACKGROUND\">Creatine is\n  widely used.</AbstractText><AbstractText>It appears safe.</AbstractText></Abstract></PubmedArticle>";
        assert_eq!(
            extract_abstract(xml),
            "Creatine is widely used. It appears safe."
        );
    }

    #[test]
    fn extract_abstract_takes_first_region() {
        let xml = "<Abstract>First.</Abstract><Abstract>Second.</Abstract>";
        assert_eq!(extract_abstract(xml), "First.");
    }

    #[test]
    fn extract_abstract_missing_region_is_empty() {
        assert_eq!(extract_abstract("<PubmedArticle></PubmedArticle>"), "");
        assert_eq!(extract_abstract("<Abstract>unterminated"), "");
    }

    #[test]
    fn decode_entities_fixed_set() {
        assert_eq!(decode_entities("a &amp; b"), "a & b");
        assert_eq!(decode_entities("&lt;p&gt;"), "<p>");
        assert_eq!(decode_entities("&quot;quoted&quot;"), "\"quoted\"");
        assert_eq!(decode_entities("it&#39;s"), "it's");
        assert_eq!(decode_entities("2010&#x2013;2020"), "2010\u{2013}2020");
        assert_eq!(decode_entities("dash&#x2014;here"), "dash\u{2014}here");
        assert_eq!(decode_entities("non&nbsp;breaking"), "non breaking");
        assert_eq!(decode_entities("more&hellip;"), "more\u{2026}");
        assert_eq!(decode_entities("more&#x2026;"), "more\u{2026}");
    }

    #[test]
    fn decode_entities_empty_input() {
        assert_eq!(decode_entities(""), "");
    }

    #[test]
    fn parse_year_first_four_digits() {
        assert_eq!(parse_year("2021 Mar 15"), 2021);
        assert_eq!(parse_year("1987"), 1987);
    }

    #[test]
    fn parse_year_sentinel_on_garbage() {
        assert_eq!(parse_year(""), 1900);
        assert_eq!(parse_year("Mar 2021"), 1900);
        assert_eq!(parse_year("20"), 1900);
    }
}
