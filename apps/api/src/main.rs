mod analysis;
mod config;
mod errors;
mod fallback;
mod ident;
mod input;
mod llm_client;
mod money;
mod risk;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::assistant::AssistantClient;
use crate::llm_client::{CompletionService, OpenAiClient};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Business Intelligence API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the completion client
    let openai = OpenAiClient::new(config.openai_api_key.clone(), config.model.clone());
    info!("LLM client initialized (model: {})", openai.model());
    let llm: Arc<dyn CompletionService> = Arc::new(openai);

    // The assistant-backed risk branch is optional; without it the risk
    // pipeline always takes the direct completion path.
    let assistant = match (&config.rag_assistant_id, &config.rag_vector_store_id) {
        (Some(assistant_id), Some(_)) => {
            info!("Assistant-backed risk assessment enabled (assistant: {assistant_id})");
            Some(Arc::new(AssistantClient::new(
                config.openai_api_key.clone(),
                assistant_id.clone(),
            )))
        }
        _ => {
            info!("RAG configuration not found; risk assessment uses direct completion only");
            None
        }
    };

    let state = AppState {
        llm,
        assistant,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
