//! Per-operation settings (`[indexing]`, `[search]`, `[agent]` sections)

use openflux_domain::{DEFAULT_MAX_ITERATIONS, SearchRequest};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileIndexingConfig {
    /// Ask the backend to embed with its local Ollama models
    pub use_ollama: bool,
}

impl Default for FileIndexingConfig {
    fn default() -> Self {
        Self { use_ollama: true }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSearchConfig {
    /// Maximum number of hits requested per search
    pub top_k: usize,
}

impl Default for FileSearchConfig {
    fn default() -> Self {
        Self {
            top_k: SearchRequest::DEFAULT_TOP_K,
        }
    }
}

/// Raw agent configuration from TOML
///
/// ```toml
/// [agent]
/// max_iterations = 5    # 1..=50
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAgentConfig {
    pub max_iterations: u32,
}

impl Default for FileAgentConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}
