use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::TextGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable generation adapter. Production wires AnthropicGenerator;
    /// tests substitute a double without touching handler code.
    pub generator: Arc<dyn TextGenerator>,
    pub config: Config,
}
