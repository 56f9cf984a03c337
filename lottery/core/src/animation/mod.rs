//! Scroll Animator
//!
//! Drives the tile strip through one decelerating run per draw. The animator
//! never runs on its own: the surface calls [`ScrollAnimator::tick`] on its
//! frame timer with the current time, and the animator answers with the
//! offset and, exactly once per run, the completion.
//!
//! ```text
//! start_scroll ──► Running ──tick(now >= start + T)──► Completion ──► Resting
//!                     ▲                                                  │
//!                     └──────────────── start_scroll ────────────────────┘
//! ```

mod strip;
mod trajectory;

pub use strip::{tile_covering, visible_tiles, Tile};
pub use trajectory::{StripGeometry, Trajectory};

use std::time::{Duration, Instant};

use crate::error::DrawError;

/// Outcome delivered once per [`ScrollAnimator::start_scroll`]
pub type ScrollCompletion = Result<i64, DrawError>;

/// A run in progress
#[derive(Clone, Debug)]
struct ScrollRun {
    trajectory: Trajectory,
    started_at: Instant,
    target_index: usize,
}

/// Animator for the repeating tile strip
#[derive(Clone, Debug)]
pub struct ScrollAnimator {
    geometry: StripGeometry,
    /// Display sequence (a snapshot of the working list at draw start)
    numbers: Vec<i64>,
    /// Current horizontal offset in surface pixels
    offset: f64,
    run: Option<ScrollRun>,
}

impl ScrollAnimator {
    /// Create an idle animator with an empty strip
    #[must_use]
    pub fn new(geometry: StripGeometry) -> Self {
        Self {
            geometry,
            numbers: Vec::new(),
            offset: 0.0,
            run: None,
        }
    }

    /// Replace the display sequence without animating
    ///
    /// Cancels any run in progress; no completion will be delivered for it.
    pub fn set_numbers(&mut self, numbers: Vec<i64>) {
        self.run = None;
        self.numbers = numbers;
        self.offset = 0.0;
    }

    /// Begin a run that lands `target_index` under the marker after `duration`
    ///
    /// Any previous run is discarded, not merged.
    pub fn start_scroll(
        &mut self,
        target_index: usize,
        numbers: Vec<i64>,
        duration: Duration,
        loops: u32,
        now: Instant,
    ) {
        let trajectory =
            Trajectory::plan(&self.geometry, target_index, numbers.len(), duration, loops);

        tracing::debug!(
            target_index,
            tiles = numbers.len(),
            start = trajectory.start_offset(),
            target = trajectory.target_offset(),
            "Scroll started"
        );

        self.numbers = numbers;
        self.offset = trajectory.start_offset();
        self.run = Some(ScrollRun {
            trajectory,
            started_at: now,
            target_index,
        });
    }

    /// Advance to `now`; returns the completion on the tick that finishes a run
    pub fn tick(&mut self, now: Instant) -> Option<ScrollCompletion> {
        let run = self.run.as_ref()?;
        let elapsed = now.saturating_duration_since(run.started_at);
        self.offset = run.trajectory.offset_at(elapsed);

        if !run.trajectory.is_complete(elapsed) {
            return None;
        }

        let target_index = run.target_index;
        self.run = None;

        Some(match self.numbers.get(target_index) {
            Some(&value) => Ok(value),
            None => Err(DrawError::InternalConsistency {
                index: target_index,
                len: self.numbers.len(),
            }),
        })
    }

    /// Drop the current run without a completion
    pub fn cancel(&mut self) {
        if self.run.take().is_some() {
            tracing::debug!(offset = self.offset, "Scroll cancelled");
        }
    }

    /// Whether a run is in progress
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.run.is_some()
    }

    /// Current offset in surface pixels
    #[must_use]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Display sequence
    #[must_use]
    pub fn numbers(&self) -> &[i64] {
        &self.numbers
    }

    /// Strip dimensions
    #[must_use]
    pub fn geometry(&self) -> &StripGeometry {
        &self.geometry
    }

    /// Tiles to draw for a viewport `width` pixels wide
    #[must_use]
    pub fn visible_tiles(&self, width: f64) -> Vec<Tile> {
        visible_tiles(self.offset, &self.numbers, &self.geometry, width)
    }

    /// Tile currently under the alignment marker
    #[must_use]
    pub fn tile_under_marker(&self) -> Option<Tile> {
        tile_covering(
            self.geometry.alignment_x,
            self.offset,
            &self.numbers,
            &self.geometry,
        )
    }
}

impl Default for ScrollAnimator {
    fn default() -> Self {
        Self::new(StripGeometry::default())
    }
}
