//! Session configuration: backend location and per-operation parameters.

use openflux_domain::{BackendEndpoint, DEFAULT_MAX_ITERATIONS, SearchRequest};
use std::time::Duration;

/// Runtime parameters for one orchestration session.
///
/// | Field | Used by |
/// |-------|---------|
/// | `endpoint`, `request_timeout` | backend connector |
/// | `use_ollama` | indexing provider |
/// | `search_top_k` | search |
/// | `max_iterations` | agent provider, composer |
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub endpoint: BackendEndpoint,
    /// Per-request timeout. Backend operations are slow, so this is minutes-scale.
    pub request_timeout: Duration,
    pub use_ollama: bool,
    pub search_top_k: usize,
    pub max_iterations: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            endpoint: BackendEndpoint::default(),
            request_timeout: Duration::from_secs(300),
            use_ollama: true,
            search_top_k: SearchRequest::DEFAULT_TOP_K,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl SessionConfig {
    // ==================== Builder Methods ====================

    pub fn with_endpoint(mut self, endpoint: BackendEndpoint) -> Self {
        self.endpoint = endpoint;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_use_ollama(mut self, use_ollama: bool) -> Self {
        self.use_ollama = use_ollama;
        self
    }

    pub fn with_search_top_k(mut self, top_k: usize) -> Self {
        self.search_top_k = top_k;
        self
    }

    pub fn with_max_iterations(mut self, max: u32) -> Self {
        self.max_iterations = max;
        self
    }
}
