//! Host environment ports.
//!
//! The session runs inside a host (an editor, or the terminal shell) that
//! owns the workspace, user prompts, notifications and documents. These
//! ports are the only way use cases reach it.

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

use super::progress::ProgressPort;

/// Errors raised by host adapters.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("Host capability unavailable: {0}")]
    Unavailable(String),
}

/// Resolves the workspace folder operations run against.
pub trait WorkspacePort: Send + Sync {
    /// The first open workspace folder, if any.
    fn current_workspace(&self) -> Option<PathBuf>;
}

/// Free-text input request shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptRequest {
    pub prompt: String,
    pub placeholder: String,
}

impl PromptRequest {
    pub fn new(prompt: impl Into<String>, placeholder: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            placeholder: placeholder.into(),
        }
    }
}

/// Asks the user for free text.
#[async_trait]
pub trait PromptPort: Send + Sync {
    /// Returns `None` when the user dismissed the prompt.
    async fn prompt(&self, request: &PromptRequest) -> Option<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Warning,
    Error,
}

/// Shows toast/modal notifications.
pub trait NotifierPort: Send + Sync {
    fn notify(&self, level: NotificationLevel, message: &str);

    fn info(&self, message: &str) {
        self.notify(NotificationLevel::Info, message);
    }

    fn warn(&self, message: &str) {
        self.notify(NotificationLevel::Warning, message);
    }

    fn error(&self, message: &str) {
        self.notify(NotificationLevel::Error, message);
    }
}

/// Opens rendered documents (search results).
#[async_trait]
pub trait DocumentPort: Send + Sync {
    async fn open_markdown(&self, content: &str) -> Result<(), HostError>;
}

/// Persistent, append-only log view for agent runs.
///
/// Appends are fire-and-forget; adapters swallow their own write failures.
pub trait TranscriptLog: Send + Sync {
    fn append_line(&self, line: &str);

    /// Bring the log into view.
    fn reveal(&self);
}

/// Bundle of host adapters handed to providers.
#[derive(Clone)]
pub struct HostServices {
    pub workspace: Arc<dyn WorkspacePort>,
    pub prompt: Arc<dyn PromptPort>,
    pub notifier: Arc<dyn NotifierPort>,
    pub documents: Arc<dyn DocumentPort>,
    pub transcript: Arc<dyn TranscriptLog>,
    pub progress: Arc<dyn ProgressPort>,
}
