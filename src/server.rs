//! HTTP service endpoint: question in, cited synthesis out.
//!
//! `POST /api/ask` runs the full pipeline: decompose the question into
//! sub-questions, run the resilient literature search for each, merge the
//! papers (deduplicated by URL), fall back to the original question if
//! the sub-questions found nothing, then summarize the evidence. "No
//! papers anywhere" is a 404 with full diagnostics; only transport-level
//! failures become 500s.

use crate::agents::{clarify, summarize};
use crate::error::Result;
use crate::llm::ChatClient;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use sana_search::{Paper, SearchConfig};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Shared state for request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Text-generation client shared by both agents.
    pub chat: Arc<ChatClient>,
    /// Literature retrieval configuration.
    pub search: SearchConfig,
    /// Output token budget for summaries.
    pub summary_max_tokens: u32,
}

/// Build the service router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/ask", post(ask))
        .with_state(state)
}

/// Request body for `/api/ask`.
#[derive(Debug, Deserialize)]
pub struct AskRequest {
    /// The user's natural-language question.
    #[serde(default)]
    pub question: String,
}

/// One entry of the numbered reference list, aligned with the `[n]`
/// citations in the answer.
#[derive(Debug, Serialize)]
pub struct Reference {
    pub n: usize,
    pub title: String,
    pub url: String,
}

/// Response body for `/api/ask`, on both the found (200) and not-found
/// (404) paths.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AskResponse {
    /// Markdown synthesis, or a fixed message when nothing was found.
    pub answer: String,
    pub references: Vec<Reference>,
    /// Sub-questions produced by the decomposition agent.
    pub clarified: Vec<String>,
    /// Sub-questions whose search actually contributed papers.
    pub used_sub_questions: Vec<String>,
    /// Provider queries behind the contributing searches.
    pub queries_used: Vec<String>,
    /// Rewritten queries, when reformulation rescued a search.
    pub reformulations: Vec<String>,
}

async fn ask(State(state): State<AppState>, Json(request): Json<AskRequest>) -> Response {
    let question = request.question.trim();
    if question.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": "Missing question." })),
        )
            .into_response();
    }

    match answer_question(&state, question).await {
        Ok(outcome) => {
            let status = if outcome.references.is_empty() {
                StatusCode::NOT_FOUND
            } else {
                StatusCode::OK
            };
            (status, Json(outcome)).into_response()
        }
        Err(err) => {
            tracing::error!(error = %err, "ask pipeline failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({
                    "error": "Internal error",
                    "details": err.to_string(),
                })),
            )
                .into_response()
        }
    }
}

/// Run decomposition, per-sub-question retrieval, and summarization.
async fn answer_question(state: &AppState, question: &str) -> Result<AskResponse> {
    let clarified = clarify::clarify_question(&state.chat, question).await?;
    let sub_questions = if clarified.is_empty() {
        vec![question.to_owned()]
    } else {
        clarified.clone()
    };

    let mut papers: Vec<Paper> = Vec::new();
    let mut used_sub_questions = Vec::new();
    let mut queries_used = Vec::new();
    let mut reformulations = Vec::new();

    for sub_question in &sub_questions {
        let outcome = sana_search::resilient_search(sub_question, &state.search).await?;
        if outcome.papers.is_empty() {
            continue;
        }
        merge_papers(&mut papers, outcome.papers);
        used_sub_questions.push(sub_question.clone());
        queries_used.push(outcome.query_used);
        if let Some(reformulated) = outcome.reformulated {
            reformulations.push(reformulated);
        }
    }

    // Last resort: the original question verbatim, if not already tried.
    if papers.is_empty() && !sub_questions.iter().any(|q| q == question) {
        let outcome = sana_search::resilient_search(question, &state.search).await?;
        if !outcome.papers.is_empty() {
            used_sub_questions.push(question.to_owned());
            queries_used.push(outcome.query_used);
            if let Some(reformulated) = outcome.reformulated {
                reformulations.push(reformulated);
            }
            papers = outcome.papers;
        }
    }

    if papers.is_empty() {
        return Ok(AskResponse {
            answer: "No relevant research papers found.".to_owned(),
            references: Vec::new(),
            clarified,
            used_sub_questions,
            queries_used,
            reformulations,
        });
    }

    let answer =
        summarize::summarize_papers(&state.chat, question, &papers, state.summary_max_tokens)
            .await?;
    let references = papers
        .iter()
        .enumerate()
        .map(|(i, paper)| Reference {
            n: i + 1,
            title: paper.title.clone(),
            url: paper.url.clone(),
        })
        .collect();

    Ok(AskResponse {
        answer,
        references,
        clarified,
        used_sub_questions,
        queries_used,
        reformulations,
    })
}

/// Append `incoming` papers not already present, comparing by URL.
fn merge_papers(papers: &mut Vec<Paper>, incoming: Vec<Paper>) {
    for paper in incoming {
        if !papers.iter().any(|existing| existing.url == paper.url) {
            papers.push(paper);
        }
    }
}
