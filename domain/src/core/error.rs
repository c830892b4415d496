//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Goal cannot be empty")]
    EmptyGoal,

    #[error("Workspace path cannot be empty")]
    EmptyWorkspacePath,

    #[error("max_iterations must be between 1 and {max}, got {value}")]
    InvalidMaxIterations { value: u32, max: u32 },

    #[error("Invalid backend endpoint: {0}")]
    InvalidEndpoint(String),
}

impl DomainError {
    /// Check if this error was caused by user input rather than configuration
    pub fn is_user_input(&self) -> bool {
        matches!(self, DomainError::EmptyGoal | DomainError::EmptyWorkspacePath)
    }
}
