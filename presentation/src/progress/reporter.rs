//! Progress reporting for backend operations

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use openflux_application::ports::progress::{ProgressHandle, ProgressPort};
use std::time::Duration;

/// Spinner per progress scope.
///
/// Backend calls report no intermediate progress, so each scope is an
/// indeterminate spinner with the latest message.
pub struct ProgressReporter;

impl ProgressReporter {
    pub fn new() -> Self {
        Self
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressPort for ProgressReporter {
    fn begin(&self, title: &str) -> Box<dyn ProgressHandle> {
        let bar = ProgressBar::new_spinner();
        bar.set_style(Self::spinner_style());
        bar.set_prefix(title.to_string());
        bar.enable_steady_tick(Duration::from_millis(100));
        Box::new(SpinnerHandle {
            bar,
            percent: 0,
        })
    }
}

struct SpinnerHandle {
    bar: ProgressBar,
    percent: u32,
}

impl ProgressHandle for SpinnerHandle {
    fn report(&mut self, increment: Option<u32>, message: Option<&str>) {
        if let Some(step) = increment {
            self.percent = self.percent.saturating_add(step).min(100);
        }
        if let Some(message) = message {
            self.bar.set_message(message.to_string());
        }
    }
}

impl Drop for SpinnerHandle {
    fn drop(&mut self) {
        if self.percent >= 100 {
            self.bar
                .finish_with_message(format!("{}", "done".green()));
        } else {
            self.bar.finish_and_clear();
        }
    }
}

/// Plain line-per-scope progress for non-interactive output.
pub struct SimpleProgress;

struct SimpleHandle {
    title: String,
}

impl ProgressPort for SimpleProgress {
    fn begin(&self, title: &str) -> Box<dyn ProgressHandle> {
        eprintln!("{} {}", "->".cyan(), title.bold());
        Box::new(SimpleHandle {
            title: title.to_string(),
        })
    }
}

impl ProgressHandle for SimpleHandle {
    fn report(&mut self, _increment: Option<u32>, message: Option<&str>) {
        if let Some(message) = message {
            eprintln!("   {} {}", self.title.dimmed(), message);
        }
    }
}
