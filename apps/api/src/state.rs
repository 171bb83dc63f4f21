use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::assistant::AssistantClient;
use crate::llm_client::CompletionService;

/// Shared application state injected into all route handlers via Axum
/// extractors. Read-only across requests; each request builds its own
/// working data on top of it.
#[derive(Clone)]
pub struct AppState {
    /// Completion capability behind a trait so tests can inject a stub.
    pub llm: Arc<dyn CompletionService>,
    /// Present only when the RAG environment is configured; the risk
    /// pipeline falls back to direct completion without it.
    pub assistant: Option<Arc<AssistantClient>>,
    pub config: Config,
}
