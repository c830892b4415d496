//! Free-text prompts on stdin

use async_trait::async_trait;
use colored::Colorize;
use openflux_application::ports::host::{PromptPort, PromptRequest};
use std::io::{self, Write};
use std::sync::Mutex;
use tracing::warn;

/// Reads one line from stdin per prompt.
///
/// A preset answer (given on the command line) is returned for the first
/// prompt instead of asking. End of input counts as a dismissed prompt.
pub struct StdinPrompt {
    preset: Mutex<Option<String>>,
}

impl StdinPrompt {
    pub fn new() -> Self {
        Self {
            preset: Mutex::new(None),
        }
    }

    pub fn with_preset(answer: Option<String>) -> Self {
        Self {
            preset: Mutex::new(answer),
        }
    }

    fn take_preset(&self) -> Option<String> {
        self.preset.lock().ok().and_then(|mut preset| preset.take())
    }

    fn read_line(request: &PromptRequest) -> io::Result<Option<String>> {
        print!(
            "{} {} ",
            request.prompt.cyan().bold(),
            format!("({})", request.placeholder).dimmed()
        );
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            return Ok(None);
        }
        Ok(Some(input.trim().to_string()))
    }
}

impl Default for StdinPrompt {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PromptPort for StdinPrompt {
    async fn prompt(&self, request: &PromptRequest) -> Option<String> {
        if let Some(answer) = self.take_preset() {
            return Some(answer);
        }

        let request = request.clone();
        match tokio::task::spawn_blocking(move || Self::read_line(&request)).await {
            Ok(Ok(answer)) => answer,
            Ok(Err(e)) => {
                warn!("Failed to read input: {}", e);
                None
            }
            Err(e) => {
                warn!("Input task failed: {}", e);
                None
            }
        }
    }
}
