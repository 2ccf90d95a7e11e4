//! Animation system with easing functions for smooth UI transitions.
//!
//! Provides:
//! - Ease-in-out easing
//! - Tween interpolation driven by explicit instants
//! - Frame pacing for the event loop

use std::time::{Duration, Instant};

/// Quadratic ease-in-out (slow start and end) of a progress value in 0.0..=1.0.
pub fn ease_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        -1.0 + (4.0 - 2.0 * t) * t
    }
}

/// Trait for values that can be tweened.
pub trait Tweenable: Clone {
    /// Interpolate between two values.
    fn lerp(&self, other: &Self, t: f64) -> Self;
}

impl Tweenable for f64 {
    fn lerp(&self, other: &Self, t: f64) -> Self {
        self + (other - self) * t
    }
}

impl Tweenable for u8 {
    fn lerp(&self, other: &Self, t: f64) -> Self {
        let from = *self as f64;
        let to = *other as f64;
        (from + (to - from) * t).round() as u8
    }
}

impl Tweenable for (u8, u8, u8) {
    fn lerp(&self, other: &Self, t: f64) -> Self {
        (
            self.0.lerp(&other.0, t),
            self.1.lerp(&other.1, t),
            self.2.lerp(&other.2, t),
        )
    }
}

/// An eased tween between two values over a fixed duration.
///
/// Unlike a wall-clock timer, a tween is sampled with an explicit instant,
/// which keeps rendering a pure function of `(state, now)`.
#[derive(Debug, Clone)]
pub struct Tween<T: Tweenable> {
    from: T,
    to: T,
    duration: Duration,
    started_at: Option<Instant>,
}

impl<T: Tweenable> Tween<T> {
    /// A tween resting at `value`; each retarget takes `duration`.
    pub fn resting(value: T, duration: Duration) -> Self {
        Self {
            from: value.clone(),
            to: value,
            duration,
            started_at: None,
        }
    }

    /// Jump to `value` and stop.
    pub fn snap(&mut self, value: T) {
        self.from = value.clone();
        self.to = value;
        self.started_at = None;
    }

    /// The value at `now`.
    pub fn value_at(&self, now: Instant) -> T {
        let Some(started_at) = self.started_at else {
            return self.from.clone();
        };

        let elapsed = now.saturating_duration_since(started_at);
        if elapsed >= self.duration || self.duration.is_zero() {
            return self.to.clone();
        }

        let progress = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        self.from.lerp(&self.to, ease_in_out(progress))
    }

    /// Head towards a new target from wherever the tween is at `now`.
    pub fn retarget_at(&mut self, new_to: T, now: Instant) {
        self.from = self.value_at(now);
        self.to = new_to;
        self.started_at = Some(now);
    }
}

/// Frame pacing state for the event loop.
#[derive(Debug, Clone)]
pub struct AnimationState {
    /// Current frame number
    pub frame: u64,
    /// Target FPS
    pub target_fps: u32,
    /// Frame duration
    pub frame_duration: Duration,
    /// Whether animations are enabled
    pub enabled: bool,
}

impl AnimationState {
    /// Create a new animation state with target FPS.
    pub fn new(target_fps: u32) -> Self {
        let fps = target_fps.max(1);
        Self {
            frame: 0,
            target_fps: fps,
            frame_duration: Duration::from_secs_f64(1.0 / fps as f64),
            enabled: true,
        }
    }

    /// Advance to the next frame.
    pub fn tick(&mut self) {
        if self.enabled {
            self.frame = self.frame.wrapping_add(1);
        }
    }

    /// Get a spinner character based on the current frame.
    pub fn spinner_char<'a>(&self, chars: &'a [&'a str]) -> &'a str {
        if chars.is_empty() {
            return "";
        }
        chars[(self.frame as usize / 3) % chars.len()]
    }
}
