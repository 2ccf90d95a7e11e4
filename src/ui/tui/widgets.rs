//! Custom ratatui widgets for the recipe view.
//!
//! Provides:
//! - The page header and footer
//! - The recipe card with its "New Recipe" button
//! - Plain string rendering of the same content for non-interactive output

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Padding, Paragraph, Widget, Wrap},
};

use crate::catalog::Recipe;
use crate::ui::colors::{color, paint, paint_bold, Theme};

/// Page title.
pub const TITLE: &str = "Quick & Easy Recipes";
/// Line under the title.
pub const SUBTITLE: &str = "Simple recipes with just 3-5 ingredients";
/// Line under the card.
pub const FOOTER: &str = "Perfect for busy weeknights and cooking beginners!";

const TITLE_GLYPH: &str = "🍳";
const CLOCK_GLYPH: &str = "◷";
const SERVINGS_GLYPH: &str = "⚇";
const BULLET: &str = "•";

/// Label of the new-recipe control.
pub const BUTTON_LABEL: &str = "↻ New Recipe";
/// Spinner frames shown in place of the refresh glyph while transitioning.
pub const BUTTON_SPINNER: &[&str] = &["◐", "◓", "◑", "◒"];
/// Width of the button, label plus one cell of padding on each side.
pub const BUTTON_WIDTH: u16 = 14;

/// Widest the page gets before it is centered.
pub const MAX_PAGE_WIDTH: u16 = 80;

// ============================================================================
// Layout
// ============================================================================

/// Where each part of the page goes for a given terminal area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    /// Title and subtitle
    pub header: Rect,
    /// The recipe card at full scale
    pub card: Rect,
    /// Footer line
    pub footer: Rect,
    /// Key hint line
    pub hint: Rect,
}

impl ScreenLayout {
    /// Compute the layout for `area`.
    pub fn new(area: Rect) -> Self {
        let width = area.width.min(MAX_PAGE_WIDTH);
        let page = Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y,
            width,
            height: area.height,
        };

        let [_, header, _, card, footer, hint] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(page);

        Self {
            header,
            card,
            footer,
            hint,
        }
    }

    /// The "New Recipe" button as drawn with the card at `scale`.
    ///
    /// `None` when the card is too small to be drawn at all.
    pub fn button_at(&self, scale: f64) -> Option<Rect> {
        drawn_card(self.card, scale).map(button_rect)
    }

    /// Whether a terminal cell lies on the button drawn at `scale`.
    pub fn hits_button(&self, column: u16, row: u16, scale: f64) -> bool {
        self.button_at(scale).is_some_and(|button| {
            button.width > 0
                && column >= button.x
                && column < button.right()
                && row >= button.y
                && row < button.bottom()
        })
    }
}

/// Smallest card that is drawn.
const MIN_CARD_WIDTH: u16 = 20;
const MIN_CARD_HEIGHT: u16 = 4;

/// The card's outer rectangle at `scale`, if it is large enough to draw.
fn drawn_card(area: Rect, scale: f64) -> Option<Rect> {
    let rect = scaled(area, scale);
    (rect.width >= MIN_CARD_WIDTH && rect.height >= MIN_CARD_HEIGHT).then_some(rect)
}

/// Title-row button of a card drawn in `card`.
fn button_rect(card: Rect) -> Rect {
    let inner = card_block().inner(card);
    let width = BUTTON_WIDTH.min(inner.width);
    Rect {
        x: inner.right().saturating_sub(width),
        y: inner.y,
        width,
        height: inner.height.min(1),
    }
}

/// Shrink `area` around its center; `scale` 1.0 keeps it unchanged.
pub fn scaled(area: Rect, scale: f64) -> Rect {
    let scale = scale.clamp(0.0, 1.0);
    let inset_x = ((1.0 - scale) * area.width as f64 / 2.0).round() as u16;
    let inset_y = ((1.0 - scale) * area.height as f64 / 2.0).round() as u16;
    Rect {
        x: area.x + inset_x,
        y: area.y + inset_y,
        width: area.width.saturating_sub(inset_x * 2),
        height: area.height.saturating_sub(inset_y * 2),
    }
}

fn card_block() -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .padding(Padding::new(2, 2, 1, 1))
}

// ============================================================================
// Header and Footer
// ============================================================================

/// Title and subtitle, centered.
#[derive(Debug, Clone)]
pub struct HeaderWidget {
    theme: Theme,
}

impl HeaderWidget {
    /// Create a new header widget.
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    /// Render as a formatted string.
    pub fn render_string(&self, use_colors: bool) -> String {
        format!(
            "{} {}\n{}",
            TITLE_GLYPH,
            paint_bold(TITLE, self.theme.accent_strong, use_colors),
            paint(SUBTITLE, self.theme.muted, use_colors)
        )
    }
}

impl Widget for HeaderWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 1 {
            return;
        }

        let lines = vec![
            Line::from(vec![
                Span::styled(
                    format!("{} ", TITLE_GLYPH),
                    Style::default().fg(color(self.theme.accent_strong)),
                ),
                Span::styled(
                    TITLE,
                    Style::default()
                        .fg(color(self.theme.heading))
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(Span::styled(
                SUBTITLE,
                Style::default().fg(color(self.theme.muted)),
            )),
        ];
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(area, buf);
    }
}

/// A single centered line of secondary text.
#[derive(Debug, Clone)]
pub struct FooterWidget {
    text: String,
    theme: Theme,
}

impl FooterWidget {
    /// Create a footer showing `text`.
    pub fn new(text: impl Into<String>, theme: Theme) -> Self {
        Self {
            text: text.into(),
            theme,
        }
    }
}

impl Widget for FooterWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 1 {
            return;
        }
        Paragraph::new(Span::styled(
            self.text,
            Style::default().fg(color(self.theme.subtle)),
        ))
        .alignment(Alignment::Center)
        .render(area, buf);
    }
}

// ============================================================================
// Recipe Card Widget
// ============================================================================

/// The recipe card: name, button, prep time, servings, ingredients, steps.
#[derive(Debug, Clone)]
pub struct RecipeCardWidget {
    recipe: &'static Recipe,
    theme: Theme,
    /// 0.0 fully faded into the card background, 1.0 fully visible
    opacity: f64,
    /// 1.0 full size
    scale: f64,
    /// Replaces the refresh glyph on the button
    spinner: Option<&'static str>,
    show_button: bool,
    use_colors: bool,
}

impl RecipeCardWidget {
    /// Create a fully visible card.
    pub fn new(recipe: &'static Recipe) -> Self {
        Self {
            recipe,
            theme: Theme::default(),
            opacity: 1.0,
            scale: 1.0,
            spinner: None,
            show_button: true,
            use_colors: true,
        }
    }

    /// Set the theme.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Set opacity and scale for the transition effect.
    pub fn with_transition(mut self, opacity: f64, scale: f64) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self.scale = scale.clamp(0.0, 1.0);
        self
    }

    /// Show a spinner frame on the button.
    pub fn with_spinner(mut self, frame: Option<&'static str>) -> Self {
        self.spinner = frame;
        self
    }

    /// Show or hide the button.
    pub fn with_button(mut self, show: bool) -> Self {
        self.show_button = show;
        self
    }

    /// Enable or disable colors in string output.
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    /// Label drawn on the button.
    pub fn button_label(&self) -> String {
        match self.spinner {
            Some(frame) => format!("{}{}", frame, &BUTTON_LABEL[BUTTON_LABEL_GLYPH_LEN..]),
            None => BUTTON_LABEL.to_string(),
        }
    }

    /// Render as a formatted string, wrapping steps to `width` columns.
    pub fn render_string(&self, width: usize) -> String {
        let theme = &self.theme;
        let colors = self.use_colors;
        let mut output = String::new();

        let name = paint_bold(self.recipe.name, theme.heading, colors);
        if self.show_button {
            let label = format!("[{}]", self.button_label());
            let used = self.recipe.name.chars().count() + label.chars().count();
            let gap = width.saturating_sub(used).max(2);
            output.push_str(&format!(
                "{}{}{}\n",
                name,
                " ".repeat(gap),
                paint(&label, theme.accent, colors)
            ));
        } else {
            output.push_str(&format!("{}\n", name));
        }

        output.push_str(&format!(
            "{} {}   {} {} servings\n",
            paint(CLOCK_GLYPH, theme.accent, colors),
            self.recipe.prep_time,
            paint(SERVINGS_GLYPH, theme.accent, colors),
            self.recipe.servings
        ));

        output.push('\n');
        output.push_str(&paint_bold("Ingredients", theme.heading, colors));
        output.push('\n');
        for ingredient in self.recipe.ingredients {
            output.push_str(&format!(
                "  {} {}\n",
                paint(BULLET, theme.accent, colors),
                ingredient
            ));
        }

        output.push('\n');
        output.push_str(&paint_bold("Instructions", theme.heading, colors));
        output.push('\n');
        for (index, step) in self.recipe.steps.iter().enumerate() {
            let number = format!("{}.", index + 1);
            let indent = 2 + number.chars().count() + 1;
            let mut lines = wrap_words(step, width.saturating_sub(indent)).into_iter();
            if let Some(first) = lines.next() {
                output.push_str(&format!(
                    "  {} {}\n",
                    paint(&number, theme.accent, colors),
                    first
                ));
            }
            for rest in lines {
                output.push_str(&format!("{}{}\n", " ".repeat(indent), rest));
            }
        }

        output
    }

    fn fg(&self, rgb: (u8, u8, u8)) -> Style {
        Style::default().fg(color(self.theme.fade(rgb, self.opacity)))
    }

    fn body_lines(&self) -> Vec<Line<'static>> {
        let theme = &self.theme;
        let heading = self.fg(theme.heading).add_modifier(Modifier::BOLD);
        let mut lines = vec![
            Line::default(),
            Line::from(vec![
                Span::styled(format!("{} ", CLOCK_GLYPH), self.fg(theme.accent)),
                Span::styled(self.recipe.prep_time, self.fg(theme.muted)),
                Span::raw("    "),
                Span::styled(format!("{} ", SERVINGS_GLYPH), self.fg(theme.accent)),
                Span::styled(
                    format!("{} servings", self.recipe.servings),
                    self.fg(theme.muted),
                ),
            ]),
            Line::default(),
            Line::from(Span::styled("Ingredients", heading)),
        ];

        for ingredient in self.recipe.ingredients {
            lines.push(Line::from(vec![
                Span::styled(format!("  {} ", BULLET), self.fg(theme.accent)),
                Span::styled(*ingredient, self.fg(theme.text)),
            ]));
        }

        lines.push(Line::default());
        lines.push(Line::from(Span::styled("Instructions", heading)));

        let badge = Style::default()
            .fg(color(self.theme.fade(theme.on_accent, self.opacity)))
            .bg(color(self.theme.fade(theme.accent, self.opacity)))
            .add_modifier(Modifier::BOLD);
        for (index, step) in self.recipe.steps.iter().enumerate() {
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(format!(" {} ", index + 1), badge),
                Span::raw(" "),
                Span::styled(*step, self.fg(theme.text)),
            ]));
        }

        lines
    }
}

/// Byte length of the refresh glyph at the start of [`BUTTON_LABEL`].
const BUTTON_LABEL_GLYPH_LEN: usize = "↻".len();

impl Widget for RecipeCardWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some(rect) = drawn_card(area, self.scale) else {
            return;
        };

        let theme = self.theme;
        let block = card_block()
            .border_style(Style::default().fg(color(theme.fade(theme.accent, self.opacity))))
            .style(Style::default().bg(color(theme.card)));
        let inner = block.inner(rect);
        block.render(rect, buf);

        let [title_row, body] =
            Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(inner);
        let button_width = if self.show_button {
            BUTTON_WIDTH.min(title_row.width)
        } else {
            0
        };
        let [name_area, button_area] = Layout::horizontal([
            Constraint::Min(0),
            Constraint::Length(button_width),
        ])
        .areas(title_row);

        Paragraph::new(Span::styled(
            self.recipe.name,
            self.fg(theme.heading).add_modifier(Modifier::BOLD),
        ))
        .render(name_area, buf);

        if self.show_button {
            let style = Style::default()
                .fg(color(theme.fade(theme.on_accent, self.opacity)))
                .bg(color(theme.fade(theme.accent, self.opacity)));
            Paragraph::new(Span::styled(self.button_label(), style))
                .alignment(Alignment::Center)
                .style(style)
                .render(button_area, buf);
        }

        Paragraph::new(self.body_lines())
            .wrap(Wrap { trim: false })
            .render(body, buf);
    }
}

// ============================================================================
// Plain Page Rendering
// ============================================================================

/// Render the whole page as text.
///
/// With no recipe selected the page is empty.
pub fn render_page_string(recipe: Option<&'static Recipe>, width: usize, use_colors: bool) -> String {
    let Some(recipe) = recipe else {
        return String::new();
    };

    let theme = Theme::default();
    let card = RecipeCardWidget::new(recipe)
        .with_theme(theme)
        .with_button(false)
        .with_colors(use_colors);

    let mut output = HeaderWidget::new(theme).render_string(use_colors);
    output.push_str("\n\n");
    output.push_str(&card.render_string(width));
    output.push('\n');
    output.push_str(&paint(FOOTER, theme.subtle, use_colors));
    output.push('\n');
    output
}

/// Greedy word wrap by character count.
///
/// Words longer than `width` get a line of their own.
pub fn wrap_words(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if line_len > 0 && line_len + 1 + word_len > width {
            lines.push(std::mem::take(&mut line));
            line_len = 0;
        }
        if line_len > 0 {
            line.push(' ');
            line_len += 1;
        }
        line.push_str(word);
        line_len += word_len;
    }

    if !line.is_empty() {
        lines.push(line);
    }
    lines
}
