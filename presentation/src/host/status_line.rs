//! Terminal status line
//!
//! The indicator labels carry editor icon tokens (`$(check)`, `$(sync~spin)`).
//! The terminal replaces them with plain glyphs and only prints a line when
//! the label actually changes. The tooltip is printed too when the bound
//! action is the backend instructions, since it says how to recover.

use colored::Colorize;
use openflux_application::ports::status_indicator::StatusIndicatorPort;
use openflux_domain::{HostCommand, StatusView};
use std::sync::Mutex;
use tracing::{debug, info};

pub struct ConsoleStatusLine {
    last: Mutex<Option<String>>,
}

impl ConsoleStatusLine {
    pub fn new() -> Self {
        Self {
            last: Mutex::new(None),
        }
    }

    /// Replace icon tokens with terminal glyphs.
    pub fn render_label(text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut rest = text;
        while let Some(start) = rest.find("$(") {
            out.push_str(&rest[..start]);
            let Some(len) = rest[start..].find(')') else {
                out.push_str(&rest[start..]);
                return out;
            };
            let icon = &rest[start + 2..start + len];
            out.push_str(glyph(icon));
            rest = &rest[start + len + 1..];
        }
        out.push_str(rest);
        out
    }

    /// The line printed for a view.
    pub fn format_view(view: &StatusView) -> String {
        let label = Self::render_label(&view.text);
        let mut line = format!("{} {}", "[status]".dimmed(), label.bold());
        if view.command == HostCommand::ShowBackendInstructions {
            line.push_str(&format!("\n         {}", view.tooltip.dimmed()));
        }
        line
    }
}

fn glyph(icon: &str) -> &'static str {
    match icon.split('~').next().unwrap_or(icon) {
        "check" => "*",
        "warning" => "!",
        "sync" => "~",
        "run" => ">",
        _ => "-",
    }
}

impl Default for ConsoleStatusLine {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusIndicatorPort for ConsoleStatusLine {
    fn show(&self, view: &StatusView) {
        let label = Self::render_label(&view.text);
        debug!("Status: {} -> {}", label, view.command.id());

        let Ok(mut last) = self.last.lock() else {
            return;
        };
        if last.as_deref() == Some(label.as_str()) {
            return;
        }
        info!("Status: {}", view.tooltip);
        eprintln!("{}", Self::format_view(view));
        *last = Some(label);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use openflux_domain::{ActivityState, BackendEndpoint};

    #[test]
    fn test_render_label_replaces_icons() {
        assert_eq!(ConsoleStatusLine::render_label("$(check) OpenFlux"), "* OpenFlux");
        assert_eq!(
            ConsoleStatusLine::render_label("$(sync~spin) OpenFlux (indexing)"),
            "~ OpenFlux (indexing)"
        );
        assert_eq!(
            ConsoleStatusLine::render_label("$(warning) OpenFlux (backend offline)"),
            "! OpenFlux (backend offline)"
        );
    }

    #[test]
    fn test_offline_view_includes_recovery_hint() {
        colored::control::set_override(false);
        let endpoint = BackendEndpoint::parse("http://localhost:8000").unwrap();

        let offline = ConsoleStatusLine::format_view(&StatusView::for_state(
            ActivityState::Offline,
            &endpoint,
        ));
        let lines: Vec<&str> = offline.lines().collect();
        assert_eq!(lines[0], "[status] ! OpenFlux (backend offline)");
        assert!(lines[1].contains("./scripts/start_server.sh"));

        let idle = ConsoleStatusLine::format_view(&StatusView::for_state(
            ActivityState::Idle,
            &endpoint,
        ));
        assert_eq!(idle, "[status] * OpenFlux");
    }

    #[test]
    fn test_render_label_tolerates_unterminated_token() {
        assert_eq!(ConsoleStatusLine::render_label("$(run OpenFlux"), "$(run OpenFlux");
        assert_eq!(ConsoleStatusLine::render_label("plain"), "plain");
    }
}
