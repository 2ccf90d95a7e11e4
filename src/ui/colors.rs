//! 24-bit RGB color theme for terminal output.
//!
//! A warm orange palette on a light card. Colors are kept as RGB triples so
//! the transition effect can blend them towards the card background.

use owo_colors::OwoColorize;
use ratatui::style::Color;

use crate::ui::tui::animation::Tweenable;

/// An RGB triple.
pub type Rgb = (u8, u8, u8);

/// Color theme for the recipe view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Accent color - orange (249, 115, 22)
    pub accent: Rgb,
    /// Title glyph color - dark orange (234, 88, 12)
    pub accent_strong: Rgb,
    /// Headings - near black (31, 41, 55)
    pub heading: Rgb,
    /// Body text - dark gray (55, 65, 81)
    pub text: Rgb,
    /// Secondary text - gray (75, 85, 99)
    pub muted: Rgb,
    /// Footer text - light gray (107, 114, 128)
    pub subtle: Rgb,
    /// Page background - cream (255, 247, 237)
    pub page: Rgb,
    /// Card background - white
    pub card: Rgb,
    /// Text drawn on accent backgrounds - white
    pub on_accent: Rgb,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            accent: (249, 115, 22),
            accent_strong: (234, 88, 12),
            heading: (31, 41, 55),
            text: (55, 65, 81),
            muted: (75, 85, 99),
            subtle: (107, 114, 128),
            page: (255, 247, 237),
            card: (255, 255, 255),
            on_accent: (255, 255, 255),
        }
    }
}

impl Theme {
    /// Create a new theme with default colors.
    pub fn new() -> Self {
        Self::default()
    }

    /// Blend `rgb` towards the card background.
    ///
    /// `opacity` 1.0 returns `rgb` unchanged, 0.0 returns the card color.
    pub fn fade(&self, rgb: Rgb, opacity: f64) -> Rgb {
        self.card.lerp(&rgb, opacity.clamp(0.0, 1.0))
    }
}

/// Convert an RGB triple to a ratatui color.
pub fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

/// Paint text for plain (non-TUI) output, or pass it through unchanged.
pub fn paint(text: &str, rgb: Rgb, enabled: bool) -> String {
    if enabled {
        text.truecolor(rgb.0, rgb.1, rgb.2).to_string()
    } else {
        text.to_string()
    }
}

/// Like [`paint`], in bold.
pub fn paint_bold(text: &str, rgb: Rgb, enabled: bool) -> String {
    if enabled {
        text.truecolor(rgb.0, rgb.1, rgb.2).bold().to_string()
    } else {
        text.to_string()
    }
}
