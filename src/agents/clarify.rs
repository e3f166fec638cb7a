//! Question decomposition agent.
//!
//! Breaks a user question into 2–4 precise, researchable sub-questions
//! via the text-generation provider. The model is instructed to return a
//! bare JSON string array; replies wrapped in markdown code fences are
//! unwrapped before parsing. A reply that still does not parse degrades
//! to an empty list; the caller falls back to the original question.

use crate::error::Result;
use crate::llm::{ChatClient, ChatMessage};

const SYSTEM_PROMPT: &str = "You are a helpful research assistant for health and fitness topics. \
For every user query, your job is to break it down into 2-4 precise, researchable sub-questions \
that could be answered by searching peer-reviewed scientific literature. \
These should be highly specific and clearly written, to enable a search agent to find concrete, evidence-based answers. \
Always return ONLY a valid JSON array of strings - no extra explanation, no markdown, no commentary.";

/// Decompose `question` into researchable sub-questions.
///
/// # Errors
///
/// Returns [`crate::error::AgentError::Llm`] only for transport-level
/// failures; an unparseable reply is logged and yields `Ok(vec![])`.
pub async fn clarify_question(client: &ChatClient, question: &str) -> Result<Vec<String>> {
    let messages = [
        ChatMessage::system(SYSTEM_PROMPT),
        ChatMessage::user(format!("Query: \"{question}\"")),
    ];

    let reply = client.complete(&messages, None).await?;
    let cleaned = strip_code_fence(&reply);

    match serde_json::from_str::<Vec<String>>(cleaned) {
        Ok(sub_questions) => Ok(sub_questions),
        Err(err) => {
            tracing::error!(error = %err, reply = cleaned, "failed to parse clarify reply");
            Ok(Vec::new())
        }
    }
}

/// Unwrap a markdown code fence (```` ``` ```` or ```` ```json ````) if present.
fn strip_code_fence(reply: &str) -> &str {
    let trimmed = reply.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest
        .strip_prefix("json")
        .or_else(|| rest.strip_prefix("JSON"))
        .unwrap_or(rest);
    let rest = rest.strip_prefix('\n').unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}
