//! Agent run log shown in the terminal

use colored::Colorize;
use openflux_application::ports::host::TranscriptLog;
use std::sync::{Arc, Mutex};

/// Buffers appended lines and prints them when revealed.
pub struct ConsoleTranscript {
    pending: Mutex<Vec<String>>,
}

impl ConsoleTranscript {
    pub fn new() -> Self {
        Self {
            pending: Mutex::new(Vec::new()),
        }
    }

    /// Lines appended since the last reveal.
    pub fn pending(&self) -> Vec<String> {
        self.pending
            .lock()
            .map(|lines| lines.clone())
            .unwrap_or_default()
    }
}

impl Default for ConsoleTranscript {
    fn default() -> Self {
        Self::new()
    }
}

impl TranscriptLog for ConsoleTranscript {
    fn append_line(&self, line: &str) {
        if let Ok(mut lines) = self.pending.lock() {
            lines.push(line.to_string());
        }
    }

    fn reveal(&self) {
        let lines = match self.pending.lock() {
            Ok(mut lines) => std::mem::take(&mut *lines),
            Err(_) => return,
        };
        println!();
        println!("{}", "── OpenFlux Agent ──".cyan().bold());
        for line in lines {
            println!("{}", line);
        }
    }
}

/// Writes every line to several logs (terminal plus file, for instance).
pub struct TranscriptFanout {
    logs: Vec<Arc<dyn TranscriptLog>>,
}

impl TranscriptFanout {
    pub fn new(logs: Vec<Arc<dyn TranscriptLog>>) -> Self {
        Self { logs }
    }
}

impl TranscriptLog for TranscriptFanout {
    fn append_line(&self, line: &str) {
        for log in &self.logs {
            log.append_line(line);
        }
    }

    fn reveal(&self) {
        for log in &self.logs {
            log.reveal();
        }
    }
}
