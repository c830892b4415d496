//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into the application's
//! [`SessionConfig`] after validation.

mod backend;
mod operations;
mod output;

pub use backend::FileBackendConfig;
pub use operations::{FileAgentConfig, FileIndexingConfig, FileSearchConfig};
pub use output::FileOutputConfig;

use openflux_application::SessionConfig;
use openflux_domain::{BackendEndpoint, DomainError, MAX_ITERATIONS_LIMIT};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error)]
pub enum ConfigValidationError {
    #[error("backend.timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("backend.url cannot be empty")]
    EmptyBackendUrl,

    #[error("backend.url is invalid: {0}")]
    InvalidBackendUrl(#[source] DomainError),

    #[error("search.top_k must be at least 1")]
    InvalidTopK,

    #[error("agent.max_iterations must be between 1 and {max}, got {value}")]
    InvalidMaxIterations { value: u32, max: u32 },
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Backend location and request timeout
    pub backend: FileBackendConfig,
    /// Indexing settings
    pub indexing: FileIndexingConfig,
    /// Search settings
    pub search: FileSearchConfig,
    /// Agent settings
    pub agent: FileAgentConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Check every field the session depends on.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        self.endpoint()?;
        if self.backend.timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout);
        }
        if self.search.top_k == 0 {
            return Err(ConfigValidationError::InvalidTopK);
        }
        let iterations = self.agent.max_iterations;
        if iterations == 0 || iterations > MAX_ITERATIONS_LIMIT {
            return Err(ConfigValidationError::InvalidMaxIterations {
                value: iterations,
                max: MAX_ITERATIONS_LIMIT,
            });
        }
        Ok(())
    }

    /// Normalized backend endpoint.
    pub fn endpoint(&self) -> Result<BackendEndpoint, ConfigValidationError> {
        if self.backend.url.trim().is_empty() {
            return Err(ConfigValidationError::EmptyBackendUrl);
        }
        BackendEndpoint::parse(&self.backend.url).map_err(ConfigValidationError::InvalidBackendUrl)
    }

    /// Validate and convert into the runtime session configuration.
    pub fn to_session_config(&self) -> Result<SessionConfig, ConfigValidationError> {
        self.validate()?;
        Ok(SessionConfig::default()
            .with_endpoint(self.endpoint()?)
            .with_request_timeout(Duration::from_secs(self.backend.timeout_seconds))
            .with_use_ollama(self.indexing.use_ollama)
            .with_search_top_k(self.search.top_k)
            .with_max_iterations(self.agent.max_iterations))
    }

    /// Effective configuration rendered as TOML.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
