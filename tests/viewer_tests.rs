//! Integration tests for the viewer and the interactive app state, driven
//! with explicit instants instead of a terminal.

use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use quickrecipes::ui::tui::{App, AppState};
use quickrecipes::{catalog, OverlapPolicy, RecipeViewer, Trigger, ViewPhase, ViewerConfig};

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn key(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

#[test]
fn test_full_lifecycle() {
    let config = ViewerConfig::default();
    let mut viewer = RecipeViewer::seeded(&config, 11);
    let t0 = Instant::now();

    assert_eq!(viewer.phase(), ViewPhase::Uninitialized);
    assert_eq!(viewer.mount(t0), Some(Trigger::Scheduled));
    assert_eq!(viewer.mount(t0), None);

    // Nothing is shown until the first window elapses.
    viewer.tick(t0 + ms(299));
    assert!(viewer.current_recipe().is_none());
    assert_eq!(viewer.tick(t0 + ms(300)), 1);
    assert_eq!(viewer.phase(), ViewPhase::Stable);

    let shown = viewer.current_recipe().unwrap();
    assert!(catalog().iter().any(|r| std::ptr::eq(r, shown)));

    // During a transition the previous recipe stays current.
    viewer.select_random_recipe(t0 + ms(1000));
    assert_eq!(viewer.phase(), ViewPhase::Transitioning);
    assert!(std::ptr::eq(viewer.current_recipe().unwrap(), shown));
    viewer.tick(t0 + ms(1300));
    assert_eq!(viewer.committed(), 2);
    assert!(!viewer.is_transitioning());
}

#[test]
fn test_rapid_triggers_under_each_policy() {
    let t0 = Instant::now();
    let cases = [
        (OverlapPolicy::Race, 3, 3),
        (OverlapPolicy::Debounce, 1, 1),
        (OverlapPolicy::Ignore, 1, 1),
    ];

    for (policy, pending, commits) in cases {
        let config = ViewerConfig::default().with_overlap(policy);
        let mut viewer = RecipeViewer::seeded(&config, 5);
        viewer.select_random_recipe(t0);
        viewer.select_random_recipe(t0 + ms(100));
        viewer.select_random_recipe(t0 + ms(200));

        assert_eq!(viewer.pending().count(), pending, "{:?}", policy);
        viewer.tick(t0 + ms(10_000));
        assert_eq!(viewer.committed(), commits, "{:?}", policy);
        assert!(viewer.current_recipe().is_some());
    }
}

#[test]
fn test_debounce_deadline_follows_last_trigger() {
    let config = ViewerConfig::default().with_overlap(OverlapPolicy::Debounce);
    let mut viewer = RecipeViewer::seeded(&config, 1);
    let t0 = Instant::now();

    viewer.select_random_recipe(t0);
    assert_eq!(
        viewer.select_random_recipe(t0 + ms(250)),
        Trigger::Rescheduled
    );
    assert_eq!(viewer.next_deadline(), Some(t0 + ms(550)));
    assert_eq!(viewer.tick(t0 + ms(300)), 0);
    assert_eq!(viewer.tick(t0 + ms(550)), 1);
}

#[test]
fn test_app_keyboard_session() {
    let config = ViewerConfig::default();
    let mut app = App::with_viewer(RecipeViewer::seeded(&config, 9), &config);
    let t0 = Instant::now();

    app.mount(t0);
    app.tick(t0 + ms(300));
    assert!(app.viewer().current_recipe().is_some());
    assert!(app.render_to_string(80, false).contains("Ingredients"));

    app.handle_event(key(KeyCode::Char('n')), t0 + ms(1000));
    assert!(app.viewer().is_transitioning());
    app.tick(t0 + ms(1300));
    assert_eq!(app.viewer().committed(), 2);

    app.handle_event(key(KeyCode::Char('q')), t0 + ms(1400));
    assert_eq!(app.state(), AppState::Exiting);
    assert!(!app.is_running());
}

#[test]
fn test_app_quit_drops_pending_pick() {
    let config = ViewerConfig::default();
    let mut app = App::with_viewer(RecipeViewer::seeded(&config, 2), &config);
    let t0 = Instant::now();

    app.mount(t0);
    app.handle_event(key(KeyCode::Esc), t0 + ms(50));
    assert!(!app.viewer().is_transitioning());
    app.tick(t0 + ms(1000));
    assert!(app.viewer().current_recipe().is_none());
}
