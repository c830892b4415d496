//! Logging infrastructure: persistent transcript of agent runs.
//!
//! Provides [`FileTranscriptLog`], an append-only file writer that implements
//! the [`TranscriptLog`](openflux_application::TranscriptLog) port.

mod file_transcript;

pub use file_transcript::FileTranscriptLog;
