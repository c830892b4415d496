//! Backend configuration from TOML (`[backend]` section)

use openflux_domain::DEFAULT_BACKEND_URL;
use serde::{Deserialize, Serialize};

/// Raw backend configuration from TOML
///
/// # Example
///
/// ```toml
/// [backend]
/// url = "http://localhost:8000"
/// timeout_seconds = 300
/// ```
///
/// Also settable through `OPENFLUX_BACKEND__URL`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBackendConfig {
    /// Base URL of the agent backend
    pub url: String,
    /// Per-request timeout. Indexing and agent runs are slow.
    pub timeout_seconds: u64,
}

impl Default for FileBackendConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_BACKEND_URL.to_string(),
            timeout_seconds: 300,
        }
    }
}
