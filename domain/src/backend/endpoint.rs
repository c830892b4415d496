//! Backend endpoint value object

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Base URL used when nothing is configured.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// Normalized base URL of the agent backend.
///
/// Trailing slashes are stripped so paths can be appended with [`join`](Self::join).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BackendEndpoint(String);

impl BackendEndpoint {
    pub fn parse(url: &str) -> Result<Self, DomainError> {
        let trimmed = url.trim().trim_end_matches('/');

        let rest = trimmed
            .strip_prefix("http://")
            .or_else(|| trimmed.strip_prefix("https://"))
            .ok_or_else(|| DomainError::InvalidEndpoint(url.to_string()))?;
        if rest.is_empty() {
            return Err(DomainError::InvalidEndpoint(url.to_string()));
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Absolute URL for an API path (`"/"`, `"/api/index"`, ...).
    pub fn join(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.0, path)
        } else {
            format!("{}/{}", self.0, path)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for BackendEndpoint {
    fn default() -> Self {
        Self(DEFAULT_BACKEND_URL.to_string())
    }
}

impl fmt::Display for BackendEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for BackendEndpoint {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<BackendEndpoint> for String {
    fn from(endpoint: BackendEndpoint) -> Self {
        endpoint.0
    }
}
