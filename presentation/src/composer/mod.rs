//! Interactive composer in the terminal

pub mod terminal;

pub use terminal::{TerminalPanelHost, TerminalSurface, run_input};
