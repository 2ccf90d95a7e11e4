//! Terminal UI module.
//!
//! Provides the interactive full-screen view, the plain text rendering used
//! by non-interactive commands, and the shared color theme.

mod colors;
pub mod keyboard;
pub mod tui;
mod tui_runner;

pub use colors::Theme;
pub use keyboard::{Action, KeyBindings};
pub use tui_runner::{run_interactive, terminal_width};
