//! Status indicator port.

use openflux_domain::StatusView;

/// The host's activity indicator (status bar item, status line, ...).
pub trait StatusIndicatorPort: Send + Sync {
    /// Apply label, tooltip and bound command, and make the indicator visible.
    fn show(&self, view: &StatusView);
}
