//! Goal value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Iteration budget used when the caller does not pick one.
pub const DEFAULT_MAX_ITERATIONS: u32 = 5;

/// Upper bound accepted for a single agent run.
pub const MAX_ITERATIONS_LIMIT: u32 = 50;

/// An instruction for the agent backend (Value Object)
///
/// Bundles the user's free-text goal with the workspace it applies to and
/// the iteration budget. Created per agent invocation and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    text: String,
    workspace_path: PathBuf,
    max_iterations: u32,
}

impl Goal {
    /// Create a goal with the default iteration budget.
    ///
    /// The text is trimmed; an empty or whitespace-only text is rejected.
    pub fn new(
        text: impl Into<String>,
        workspace_path: impl Into<PathBuf>,
    ) -> Result<Self, DomainError> {
        let text = text.into();
        let text = text.trim();
        if text.is_empty() {
            return Err(DomainError::EmptyGoal);
        }

        let workspace_path = workspace_path.into();
        if workspace_path.as_os_str().is_empty() {
            return Err(DomainError::EmptyWorkspacePath);
        }

        Ok(Self {
            text: text.to_string(),
            workspace_path,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        })
    }

    /// Override the iteration budget (1..=[`MAX_ITERATIONS_LIMIT`]).
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Result<Self, DomainError> {
        if max_iterations == 0 || max_iterations > MAX_ITERATIONS_LIMIT {
            return Err(DomainError::InvalidMaxIterations {
                value: max_iterations,
                max: MAX_ITERATIONS_LIMIT,
            });
        }
        self.max_iterations = max_iterations;
        Ok(self)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn workspace_path(&self) -> &Path {
        &self.workspace_path
    }

    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }
}

impl std::fmt::Display for Goal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}
