//! Event loop for the interactive view.
//!
//! One task, one loop: terminal events, frame ticks and pick deadlines are
//! awaited together with `tokio::select!`, and every state change happens
//! on this loop.

use std::io::{self, Stdout};
use std::time::Instant;

use crossterm::event::EventStream;
use futures::{Stream, StreamExt};
use rand::Rng;
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::time::{interval, sleep_until, Interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::config::ViewerConfig;
use crate::error::AppError;
use crate::ui::tui::{init_terminal, restore_terminal, App};

/// Run the interactive recipe view until the user quits.
///
/// The terminal is restored on every exit path, including errors from the
/// event stream.
pub async fn run_interactive(config: &ViewerConfig) -> Result<(), AppError> {
    info!(
        transition_ms = config.transition_ms,
        overlap = ?config.overlap,
        animations = config.animations,
        "starting interactive view"
    );

    let mut terminal = init_terminal()?;
    let result = event_loop(&mut terminal, App::new(config)).await;
    settle(result, restore_terminal(&mut terminal))
}

/// Combine the loop result with the terminal restore.
///
/// An error from the loop wins; a restore failure after it is only logged.
fn settle(result: Result<(), AppError>, restored: io::Result<()>) -> Result<(), AppError> {
    match (result, restored) {
        (Err(err), Err(restore_err)) => {
            warn!(error = %restore_err, "failed to restore terminal");
            Err(err)
        }
        (Err(err), Ok(())) => Err(err),
        (Ok(()), restored) => restored.map_err(AppError::from),
    }
}

/// What woke the event loop.
#[derive(Debug)]
enum Wake<E> {
    /// The frame interval elapsed
    Frame,
    /// A pending pick is due
    Deadline,
    /// A terminal event arrived, or the stream ended
    Input(Option<E>),
}

/// Wait for the next frame, pick deadline, or input event.
async fn next_wake<S>(
    frames: &mut Interval,
    deadline: Option<Instant>,
    events: &mut S,
) -> Wake<S::Item>
where
    S: Stream + Unpin,
{
    tokio::select! {
        _ = frames.tick() => Wake::Frame,
        _ = sleep_until_deadline(deadline) => Wake::Deadline,
        event = events.next() => Wake::Input(event),
    }
}

/// Resolve at `deadline`, or never when there is none.
async fn sleep_until_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline.into()).await,
        None => std::future::pending().await,
    }
}

async fn event_loop<R: Rng>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    mut app: App<R>,
) -> Result<(), AppError> {
    let mut events = EventStream::new();
    let mut frames = interval(app.frame_duration());
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

    app.mount(Instant::now());

    while app.is_running() {
        terminal.draw(|frame| {
            app.set_viewport(frame.area());
            app.render(frame);
        })?;

        let deadline = app.viewer().next_deadline();
        match next_wake(&mut frames, deadline, &mut events).await {
            Wake::Frame | Wake::Deadline => app.tick(Instant::now()),
            Wake::Input(Some(Ok(event))) => app.handle_event(event, Instant::now()),
            Wake::Input(Some(Err(err))) => {
                app.quit();
                return Err(err.into());
            }
            Wake::Input(None) => app.quit(),
        }
    }

    debug!(picks = app.viewer().committed(), "interactive view closed");
    Ok(())
}

/// Get terminal width, defaulting to 80.
pub fn terminal_width() -> usize {
    match crossterm::terminal::size() {
        Ok((cols, _)) if cols > 0 => cols as usize,
        _ => 80,
    }
}
