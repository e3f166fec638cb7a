//! Service binary: configuration, logging, and the axum server.
//!
//! Usage: `sana-server [config.toml]`. With no argument the built-in
//! defaults are used; `OPENAI_API_KEY` and `PUBMED_API_KEY` override the
//! file's credentials either way.

use sana::config::AppConfig;
use sana::llm::ChatClient;
use sana::server::{self, AppState};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("sana=info,sana_search=info")),
        )
        .init();

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = AppConfig::load(config_path.as_deref())?;

    let chat = ChatClient::new(config.llm.clone())?;
    let state = AppState {
        chat: Arc::new(chat),
        search: config.search.to_search_config(),
        summary_max_tokens: config.llm.summary_max_tokens,
    };

    let app = server::router(state);
    let listener = tokio::net::TcpListener::bind(&config.server.listen_addr).await?;
    tracing::info!(addr = %config.server.listen_addr, "sana-server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
