use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::LlmClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub llm: LlmClient,
    /// Profile text extracted once at startup. Immutable and shared by every
    /// in-flight request for the process lifetime.
    pub profile_text: Arc<str>,
    pub config: Config,
}
