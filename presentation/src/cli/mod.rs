//! Command-line interface

pub mod commands;

/// Turn terminal colors on or off for every writer in this crate.
pub fn set_color_enabled(enabled: bool) {
    if enabled {
        colored::control::unset_override();
    } else {
        colored::control::set_override(false);
    }
}
