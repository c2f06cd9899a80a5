use crate::llm_client::LlmClient;
use crate::notion::NotionClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub llm: LlmClient,
    pub notion: NotionClient,
}
