//! Ratatui-based TUI module.
//!
//! Provides the interactive recipe view:
//! - Layout and widgets for the recipe card
//! - Fade and scale transitions with easing
//! - Application state and input handling

pub mod animation;
pub mod app;
pub mod widgets;

pub use animation::{AnimationState, Tween};
pub use app::{init_terminal, restore_terminal, App, AppState};
pub use widgets::{
    render_page_string, FooterWidget, HeaderWidget, RecipeCardWidget, ScreenLayout,
};
