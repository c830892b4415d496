//! Append-only file writer for agent run transcripts.
//!
//! Each appended line is prefixed with an RFC 3339 timestamp. Existing
//! content is kept across sessions.

use openflux_application::ports::host::TranscriptLog;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{info, warn};

/// Transcript log backed by a file.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Every line is flushed.
pub struct FileTranscriptLog {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl FileTranscriptLog {
    /// Open (or create) the log at the given path.
    ///
    /// Creates parent directories if they don't exist.
    /// Returns `None` if the file cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create transcript directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not open transcript file {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }
}

impl TranscriptLog for FileTranscriptLog {
    fn append_line(&self, line: &str) {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "[{}] {}", timestamp, line);
            let _ = writer.flush();
        }
    }

    fn reveal(&self) {
        info!("Transcript written to {}", self.path.display());
    }
}

impl Drop for FileTranscriptLog {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}
