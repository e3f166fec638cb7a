//! Evidence summarization agent.
//!
//! Turns the retrieved papers into a balanced, bracket-cited markdown
//! synthesis of the evidence, answering the user's original question.
//! Papers are presented to the model as a numbered reference block so
//! that `[1]`, `[2]` citations line up with the reference list the
//! service returns alongside the answer.

use crate::error::Result;
use crate::llm::{ChatClient, ChatMessage};
use sana_search::{Paper, PaperKind};

/// Returned without calling the provider when there is nothing to cite.
pub const NO_PAPERS_MESSAGE: &str =
    "No research papers found for your query. Try a different or broader phrasing.";

/// Summarize `papers` as evidence for `question`.
///
/// `max_tokens` caps the generated answer length.
///
/// # Errors
///
/// Returns [`crate::error::AgentError::Llm`] when the provider call
/// fails. An empty paper list is not an error.
pub async fn summarize_papers(
    client: &ChatClient,
    question: &str,
    papers: &[Paper],
    max_tokens: u32,
) -> Result<String> {
    if papers.is_empty() {
        return Ok(NO_PAPERS_MESSAGE.to_owned());
    }

    let prompt = build_prompt(question, papers);
    client
        .complete(&[ChatMessage::user(prompt)], Some(max_tokens))
        .await
}

/// Assemble the synthesis prompt: instructions plus the numbered
/// reference block.
fn build_prompt(question: &str, papers: &[Paper]) -> String {
    format!(
        r#"You are an expert scientific research assistant for health and fitness. A user has asked: "{question}"

Below are the abstracts of relevant peer-reviewed papers. Your job is to:
- **Synthesize a clear, accurate, and balanced summary of the evidence.**
- **Start with a "Key Takeaways" section in bullet points** for non-experts, focusing on what a smart health-conscious person should remember or act on.
- Highlight where the evidence is strong, weak, or conflicting. Mention if the research is based on human studies, animals, or reviews/meta-analyses.
- If studies disagree, explain why and what is still unknown.
- Reference each paper as [1], [2], etc., but DO NOT include any reference list at the end.

{references}
Please format your answer in Markdown.
"#,
        references = reference_block(papers),
    )
}

/// Render papers as `Paper [n]:` entries, tagging reviews/meta-analyses.
fn reference_block(papers: &[Paper]) -> String {
    let mut block = String::new();
    for (i, paper) in papers.iter().enumerate() {
        let tag = if paper.kind == PaperKind::Review {
            "**[Review/Meta-analysis]**\n"
        } else {
            ""
        };
        block.push_str(&format!(
            "Paper [{n}]:\n{tag}Title: {title}\nURL: {url}\nAbstract: {abstract_text}\n\n",
            n = i + 1,
            title = paper.title,
            url = paper.url,
            abstract_text = paper.abstract_text,
        ));
    }
    block
}
