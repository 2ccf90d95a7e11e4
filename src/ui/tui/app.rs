//! TUI application state and management.
//!
//! [`App`] wraps a [`RecipeViewer`] with everything the terminal needs:
//! the fade/scale tween, frame pacing, input handling and drawing.

use std::io::{self, stdout, Stdout};
use std::time::{Duration, Instant};

use crossterm::{
    event::{
        DisableMouseCapture, EnableMouseCapture, Event, KeyEvent, MouseButton, MouseEvent,
        MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use rand::rngs::StdRng;
use rand::Rng;
use ratatui::{
    backend::CrosstermBackend,
    layout::Rect,
    style::Style,
    widgets::{Block, Widget},
    Frame, Terminal,
};
use tracing::debug;

use super::animation::{AnimationState, Tween};
use super::widgets::{
    render_page_string, FooterWidget, HeaderWidget, RecipeCardWidget, ScreenLayout,
    BUTTON_SPINNER, FOOTER,
};
use crate::config::ViewerConfig;
use crate::ui::colors::{color, Theme};
use crate::ui::keyboard::{Action, KeyBindings};
use crate::viewer::{RecipeViewer, Trigger, ViewPhase};

/// Scale of the card when fully faded out.
const MIN_SCALE: f64 = 0.95;

/// Application state for the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    /// Showing recipes
    Running,
    /// Exiting
    Exiting,
}

/// The main TUI application.
pub struct App<R = StdRng> {
    /// Current state
    state: AppState,
    /// The recipe viewer
    viewer: RecipeViewer<R>,
    /// Card opacity, 0.0 hidden to 1.0 visible
    opacity: Tween<f64>,
    /// Frame pacing
    animation: AnimationState,
    /// Key bindings
    bindings: KeyBindings,
    /// Colors
    theme: Theme,
    /// Instant of the last tick, used when drawing
    now: Instant,
    /// Terminal area from the last draw, used for mouse hit testing
    viewport: Rect,
}

impl App<StdRng> {
    /// Create a new application with an entropy-seeded viewer.
    pub fn new(config: &ViewerConfig) -> Self {
        Self::with_viewer(RecipeViewer::new(config), config)
    }
}

impl<R: Rng> App<R> {
    /// Create an application around an existing viewer.
    pub fn with_viewer(viewer: RecipeViewer<R>, config: &ViewerConfig) -> Self {
        let fade = if config.animations {
            viewer.transition_delay()
        } else {
            Duration::ZERO
        };
        let mut animation = AnimationState::new(config.frame_rate);
        animation.enabled = config.animations;

        Self {
            state: AppState::Running,
            viewer,
            opacity: Tween::resting(0.0, fade),
            animation,
            bindings: KeyBindings::default(),
            theme: Theme::default(),
            now: Instant::now(),
            viewport: Rect::default(),
        }
    }

    /// Set key bindings.
    pub fn with_bindings(mut self, bindings: KeyBindings) -> Self {
        self.bindings = bindings;
        self
    }

    /// Get current state.
    pub fn state(&self) -> AppState {
        self.state
    }

    /// Check if should continue running.
    pub fn is_running(&self) -> bool {
        !matches!(self.state, AppState::Exiting)
    }

    /// Access the viewer.
    pub fn viewer(&self) -> &RecipeViewer<R> {
        &self.viewer
    }

    /// Time between frames.
    pub fn frame_duration(&self) -> Duration {
        self.animation.frame_duration
    }

    /// Run the automatic first selection.
    pub fn mount(&mut self, now: Instant) {
        self.now = now;
        if let Some(trigger) = self.viewer.mount(now) {
            self.on_trigger(trigger, now);
        }
    }

    /// Advance time: commit due picks and step the animation.
    pub fn tick(&mut self, now: Instant) {
        self.now = now;
        self.animation.tick();
        let first = self.viewer.committed() == 0;
        if self.viewer.tick(now) > 0 && !self.viewer.is_transitioning() {
            // The first recipe appears at full opacity; later ones fade back in.
            if first {
                self.opacity.snap(1.0);
            } else {
                self.opacity.retarget_at(1.0, now);
            }
        }
    }

    /// Ask for a new recipe, as the button does.
    pub fn new_recipe(&mut self, now: Instant) {
        self.now = now;
        let trigger = self.viewer.select_random_recipe(now);
        self.on_trigger(trigger, now);
    }

    /// Stop the application, dropping any pending pick.
    pub fn quit(&mut self) {
        self.viewer.cancel_pending();
        self.state = AppState::Exiting;
    }

    /// Dispatch a terminal event.
    pub fn handle_event(&mut self, event: Event, now: Instant) {
        match event {
            Event::Key(key) => self.handle_key(key, now),
            Event::Mouse(mouse) => self.handle_mouse(mouse, now),
            Event::Resize(width, height) => {
                self.viewport = Rect::new(0, 0, width, height);
            }
            _ => {}
        }
    }

    /// Handle a key press.
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        match self.bindings.action_for(key) {
            Some(Action::NewRecipe) => self.new_recipe(now),
            Some(Action::Quit) => self.quit(),
            None => {}
        }
    }

    /// Handle a mouse event; a left click on the button asks for a new recipe.
    pub fn handle_mouse(&mut self, mouse: MouseEvent, now: Instant) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        if self.viewer.current_recipe().is_none() {
            return;
        }
        if ScreenLayout::new(self.viewport).hits_button(mouse.column, mouse.row, self.scale()) {
            debug!("new recipe button clicked");
            self.new_recipe(now);
        }
    }

    /// Record the terminal area about to be drawn.
    pub fn set_viewport(&mut self, area: Rect) {
        self.viewport = area;
    }

    /// Card opacity at the last tick.
    pub fn opacity(&self) -> f64 {
        self.opacity.value_at(self.now)
    }

    /// Card scale at the last tick.
    pub fn scale(&self) -> f64 {
        MIN_SCALE + (1.0 - MIN_SCALE) * self.opacity()
    }

    /// Render the current page to a string (for non-TUI output).
    pub fn render_to_string(&self, width: usize, use_colors: bool) -> String {
        render_page_string(self.viewer.current_recipe(), width, use_colors)
    }

    /// Render to a ratatui frame.
    ///
    /// Draws nothing until the first recipe has been selected.
    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let Some(recipe) = self.viewer.current_recipe() else {
            return;
        };

        let buf = frame.buffer_mut();
        Block::default()
            .style(Style::default().bg(color(self.theme.page)))
            .render(area, buf);

        let layout = ScreenLayout::new(area);
        HeaderWidget::new(self.theme).render(layout.header, buf);

        let spinner = match self.viewer.phase() {
            ViewPhase::Transitioning if self.animation.enabled => {
                Some(self.animation.spinner_char(BUTTON_SPINNER))
            }
            _ => None,
        };
        RecipeCardWidget::new(recipe)
            .with_theme(self.theme)
            .with_transition(self.opacity(), self.scale())
            .with_spinner(spinner)
            .render(layout.card, buf);

        FooterWidget::new(FOOTER, self.theme).render(layout.footer, buf);
        FooterWidget::new(self.bindings.render_hint(), self.theme).render(layout.hint, buf);
    }

    fn on_trigger(&mut self, trigger: Trigger, now: Instant) {
        match trigger {
            // The first pick fades in from nothing; later ones fade out first.
            Trigger::Scheduled | Trigger::Rescheduled if self.animation.enabled => {
                self.opacity.retarget_at(0.0, now);
            }
            Trigger::Scheduled | Trigger::Rescheduled => {}
            Trigger::Ignored => {}
        }
    }
}

/// Initialize terminal for TUI mode.
pub fn init_terminal() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    install_panic_hook();
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

/// Restore terminal from TUI mode.
pub fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()
}

/// Leave raw mode before a panic message is printed.
fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        previous(info);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEventKind, KeyEventState, KeyModifiers};
    use ratatui::backend::TestBackend;

    const MS: Duration = Duration::from_millis(1);

    fn app() -> App {
        App::with_viewer(
            RecipeViewer::seeded(&ViewerConfig::default(), 11),
            &ViewerConfig::default(),
        )
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn draw(app: &mut App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|frame| {
                app.set_viewport(frame.area());
                app.render(frame);
            })
            .unwrap();
        let buf = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..height {
            for x in 0..width {
                text.push_str(buf[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_app_new() {
        let app = app();
        assert_eq!(app.state(), AppState::Running);
        assert!(app.is_running());
        assert_eq!(app.viewer().phase(), ViewPhase::Uninitialized);
    }

    #[test]
    fn test_renders_nothing_before_first_pick() {
        let mut app = app();
        let t0 = Instant::now();
        app.mount(t0);
        app.tick(t0 + 100 * MS);

        assert!(draw(&mut app, 80, 30).trim().is_empty());
        assert_eq!(app.render_to_string(80, false), "");
    }

    #[test]
    fn test_first_pick_is_fully_visible_on_commit() {
        let mut app = app();
        let t0 = Instant::now();
        app.mount(t0);
        app.tick(t0 + 300 * MS);
        assert_eq!(app.viewer().phase(), ViewPhase::Stable);
        assert!(app.opacity() > 0.99, "opacity {}", app.opacity());
        assert!((app.scale() - 1.0).abs() < 1e-9);

        let recipe = app.viewer().current_recipe().unwrap();
        let screen = draw(&mut app, 100, 40);
        assert!(screen.contains(recipe.name));
        assert!(screen.contains("New Recipe"));
        assert!(screen.contains("Quick & Easy Recipes"));
        assert!(screen.contains("busy weeknights"));
    }

    #[test]
    fn test_new_recipe_key_fades_out_then_in() {
        let mut app = app();
        let t0 = Instant::now();
        app.mount(t0);
        app.tick(t0 + 300 * MS);
        app.tick(t0 + 600 * MS);

        let t1 = t0 + 1000 * MS;
        app.handle_key(key(KeyCode::Char('n')), t1);
        assert_eq!(app.viewer().phase(), ViewPhase::Transitioning);

        app.tick(t1 + 150 * MS);
        let mid = app.opacity();
        assert!(mid > 0.0 && mid < 1.0, "opacity {}", mid);
        assert!(app.scale() < 1.0 && app.scale() > MIN_SCALE);

        app.tick(t1 + 300 * MS);
        assert_eq!(app.viewer().phase(), ViewPhase::Stable);
        assert_eq!(app.viewer().committed(), 2);

        app.tick(t1 + 600 * MS);
        assert!((app.opacity() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_quit_key() {
        let mut app = app();
        let t0 = Instant::now();
        app.mount(t0);
        app.handle_key(key(KeyCode::Char('q')), t0);
        assert!(!app.is_running());
        assert_eq!(app.viewer().pending().count(), 0);
    }

    #[test]
    fn test_click_on_button() {
        let mut app = app();
        let t0 = Instant::now();
        app.mount(t0);
        app.tick(t0 + 300 * MS);
        draw(&mut app, 80, 30);

        let button = ScreenLayout::new(Rect::new(0, 0, 80, 30))
            .button_at(1.0)
            .unwrap();
        let click = |column, row| MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        };

        app.handle_mouse(click(0, 0), t0 + 400 * MS);
        assert!(!app.viewer().is_transitioning());

        app.handle_mouse(click(button.x + 1, button.y), t0 + 400 * MS);
        assert!(app.viewer().is_transitioning());
    }

    #[test]
    fn test_click_ignored_when_card_not_drawn() {
        let mut app = app();
        let t0 = Instant::now();
        app.mount(t0);
        app.tick(t0 + 300 * MS);
        draw(&mut app, 18, 30);

        for column in 0..18 {
            for row in 0..30 {
                let click = MouseEvent {
                    kind: MouseEventKind::Down(MouseButton::Left),
                    column,
                    row,
                    modifiers: KeyModifiers::NONE,
                };
                app.handle_mouse(click, t0 + 400 * MS);
            }
        }
        assert!(!app.viewer().is_transitioning());
    }

    #[test]
    fn test_animations_disabled_snaps() {
        let config = ViewerConfig::default().with_animations(false);
        let mut app = App::with_viewer(RecipeViewer::seeded(&config, 3), &config);
        let t0 = Instant::now();
        app.mount(t0);
        app.tick(t0 + 300 * MS);
        assert!((app.opacity() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_render_to_string_after_pick() {
        let mut app = app();
        let t0 = Instant::now();
        app.mount(t0);
        app.tick(t0 + 300 * MS);
        let recipe = app.viewer().current_recipe().unwrap();
        let output = app.render_to_string(80, false);
        assert!(output.contains(recipe.name));
        assert!(output.contains(recipe.prep_time));
    }

    #[test]
    fn test_custom_bindings() {
        let bindings = KeyBindings {
            new_recipe: KeyCode::Char('r'),
            quit: KeyCode::Char('x'),
        };
        let mut app = app().with_bindings(bindings);
        let t0 = Instant::now();
        app.mount(t0);
        app.tick(t0 + 300 * MS);

        app.handle_key(key(KeyCode::Char('n')), t0 + 400 * MS);
        assert!(!app.viewer().is_transitioning());
        app.handle_key(key(KeyCode::Char('r')), t0 + 500 * MS);
        assert!(app.viewer().is_transitioning());

        app.handle_key(key(KeyCode::Char('x')), t0 + 600 * MS);
        assert_eq!(app.state(), AppState::Exiting);
    }
}
