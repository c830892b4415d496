//! Presentation layer for openflux
//!
//! This crate contains the CLI definition and the terminal host: console
//! notifications, the status line, stdin prompts, progress spinners and
//! the interactive composer.

pub mod cli;
pub mod composer;
pub mod host;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{Cli, Command};
pub use cli::set_color_enabled;
pub use composer::{TerminalPanelHost, TerminalSurface};
pub use host::{
    ConsoleDocumentViewer, ConsoleNotifier, ConsoleStatusLine, ConsoleTranscript,
    DirectoryWorkspace, StdinPrompt, TranscriptFanout,
};
pub use progress::reporter::{ProgressReporter, SimpleProgress};
