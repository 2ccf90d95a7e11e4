//! Recipe viewer state.
//!
//! [`RecipeViewer`] owns the only mutable state in the program: which recipe
//! is on screen and which random picks are scheduled but not yet committed.
//! Time is passed in explicitly, so the transition window is driven by the
//! caller's event loop (or a test) rather than by background timers.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use clap::ValueEnum;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::catalog::{catalog, Recipe};
use crate::config::ViewerConfig;

/// What a trigger does while another pick is still pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OverlapPolicy {
    /// Every trigger schedules its own pick; the last one to commit wins
    #[default]
    Race,
    /// A new trigger pushes the single pending pick's deadline back
    Debounce,
    /// Triggers are dropped while a pick is pending
    Ignore,
}

/// Coarse view phase, for rendering and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewPhase {
    /// Nothing has been selected yet; render nothing
    Uninitialized,
    /// A pick is scheduled; the card is fading out or hidden
    Transitioning,
    /// A recipe is shown and nothing is pending
    Stable,
}

/// A scheduled, not yet committed random selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingPick {
    /// When the trigger happened
    pub scheduled_at: Instant,
    /// When the pick commits
    pub due: Instant,
}

/// Result of [`RecipeViewer::select_random_recipe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// A new pick was scheduled
    Scheduled,
    /// The pending pick's deadline was moved
    Rescheduled,
    /// The trigger was dropped
    Ignored,
}

/// The recipe viewer component.
#[derive(Debug)]
pub struct RecipeViewer<R = StdRng> {
    recipes: &'static [Recipe],
    current: Option<&'static Recipe>,
    pending: VecDeque<PendingPick>,
    delay: Duration,
    overlap: OverlapPolicy,
    mounted: bool,
    committed: u64,
    rng: R,
}

impl RecipeViewer<StdRng> {
    /// Create a viewer seeded from OS entropy.
    pub fn new(config: &ViewerConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create a viewer with a fixed seed, for reproducible picks.
    pub fn seeded(config: &ViewerConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RecipeViewer<R> {
    /// Create a viewer drawing randomness from `rng`.
    pub fn with_rng(config: &ViewerConfig, rng: R) -> Self {
        Self {
            recipes: catalog(),
            current: None,
            pending: VecDeque::new(),
            delay: config.transition_delay(),
            overlap: config.overlap,
            mounted: false,
            committed: 0,
            rng,
        }
    }

    /// Perform the automatic first selection.
    ///
    /// Only the first call has an effect.
    pub fn mount(&mut self, now: Instant) -> Option<Trigger> {
        if self.mounted {
            return None;
        }
        self.mounted = true;
        debug!("viewer mounted");
        Some(self.select_random_recipe(now))
    }

    /// Start a transition towards a new random recipe.
    ///
    /// The pick itself happens when [`tick`](Self::tick) reaches the
    /// deadline, one transition window after `now`.
    pub fn select_random_recipe(&mut self, now: Instant) -> Trigger {
        let pick = PendingPick {
            scheduled_at: now,
            due: now + self.delay,
        };

        let busy = !self.pending.is_empty();
        match self.overlap {
            OverlapPolicy::Ignore if busy => {
                trace!("pick already pending, ignoring trigger");
                Trigger::Ignored
            }
            OverlapPolicy::Debounce if busy => {
                // Debounce keeps at most one pick queued.
                self.pending.clear();
                self.pending.push_back(pick);
                debug!(delay_ms = self.delay.as_millis() as u64, "pick rescheduled");
                Trigger::Rescheduled
            }
            _ => {
                self.pending.push_back(pick);
                debug!(
                    delay_ms = self.delay.as_millis() as u64,
                    pending = self.pending.len(),
                    "pick scheduled"
                );
                Trigger::Scheduled
            }
        }
    }

    /// Commit every pending pick whose deadline is at or before `now`.
    ///
    /// Returns how many picks were committed.
    pub fn tick(&mut self, now: Instant) -> usize {
        let mut count = 0;
        while self.pending.front().is_some_and(|p| p.due <= now) {
            self.pending.pop_front();
            self.commit();
            count += 1;
        }
        count
    }

    /// Pick a recipe right away, skipping the transition window.
    ///
    /// Any pending picks are dropped. Used by non-interactive output.
    pub fn select_now(&mut self) -> &'static Recipe {
        self.pending.clear();
        self.mounted = true;
        self.commit()
    }

    /// Drop every pending pick without committing it.
    pub fn cancel_pending(&mut self) -> usize {
        let dropped = self.pending.len();
        self.pending.clear();
        if dropped > 0 {
            debug!(dropped, "pending picks cancelled");
        }
        dropped
    }

    /// The recipe on screen, if any has been selected.
    pub fn current_recipe(&self) -> Option<&'static Recipe> {
        self.current
    }

    /// Whether the view is inside a transition window.
    pub fn is_transitioning(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Current view phase.
    pub fn phase(&self) -> ViewPhase {
        match (self.current, self.is_transitioning()) {
            (None, _) => ViewPhase::Uninitialized,
            (Some(_), true) => ViewPhase::Transitioning,
            (Some(_), false) => ViewPhase::Stable,
        }
    }

    /// Earliest pending deadline.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.front().map(|p| p.due)
    }

    /// The picks scheduled but not yet committed, oldest first.
    pub fn pending(&self) -> impl Iterator<Item = &PendingPick> {
        self.pending.iter()
    }

    /// Number of picks committed so far.
    pub fn committed(&self) -> u64 {
        self.committed
    }

    /// Length of the transition window.
    pub fn transition_delay(&self) -> Duration {
        self.delay
    }

    /// The active overlap policy.
    pub fn overlap(&self) -> OverlapPolicy {
        self.overlap
    }

    fn commit(&mut self) -> &'static Recipe {
        let recipes = self.recipes;
        let index = self.rng.gen_range(0..recipes.len());
        let recipe = &recipes[index];
        debug_assert!(recipe.is_catalog_member());
        self.current = Some(recipe);
        self.committed += 1;
        debug!(index, recipe = recipe.name, "recipe selected");
        recipe
    }
}
