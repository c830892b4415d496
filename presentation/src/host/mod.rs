//! Terminal implementations of the host ports.

pub mod documents;
pub mod notifier;
pub mod prompt;
pub mod status_line;
pub mod transcript;
pub mod workspace;

pub use documents::ConsoleDocumentViewer;
pub use notifier::ConsoleNotifier;
pub use prompt::StdinPrompt;
pub use status_line::ConsoleStatusLine;
pub use transcript::{ConsoleTranscript, TranscriptFanout};
pub use workspace::DirectoryWorkspace;
