//! Sana: evidence-cited health & nutrition research assistant.
//!
//! Answers natural-language health questions with a cited synthesis of
//! peer-reviewed literature. The pipeline:
//!
//! Question → decomposition (LLM) → resilient literature search
//! (`sana-search`) → evidence summarization (LLM) → cited markdown
//!
//! # Architecture
//!
//! The retrieval core lives in the `sana-search` workspace member; this
//! crate is the thin service around it:
//! - **Agents**: question decomposition and evidence summarization, both
//!   thin wrappers over an OpenAI-compatible chat API
//! - **Server**: the axum `POST /api/ask` endpoint stitching the stages
//!   together
//! - **Config**: TOML file plus environment-variable credential overrides

pub mod agents;
pub mod config;
pub mod error;
pub mod llm;
pub mod server;

pub use config::AppConfig;
pub use error::{AgentError, Result};
pub use llm::{ChatClient, ChatMessage};
pub use server::AppState;
