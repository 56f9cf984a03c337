//! Decelerating Scroll Trajectory
//!
//! Uniformly decelerated motion over a fixed duration `T` covering a signed
//! distance `S`:
//!
//! ```text
//! v0 = 2S / T
//! a  = 2S / T²
//! offset(t) = start + v0·t − ½·a·t²      for t in [0, T]
//! offset(t) = target                     for t >= T
//! ```
//!
//! The velocity `v0 − a·t` reaches zero exactly at `t = T`, so the strip
//! glides to a stop instead of halting abruptly.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Fixed dimensions of the tile strip, in surface pixels
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StripGeometry {
    /// Width of one tile
    pub tile_size: f64,
    /// Gap between tiles
    pub spacing: f64,
    /// X position the winning tile's center must stop under
    pub alignment_x: f64,
}

impl StripGeometry {
    /// Distance from one tile's left edge to the next
    #[must_use]
    pub fn step(&self) -> f64 {
        self.tile_size + self.spacing
    }

    /// Offset that centers tile `index` under the alignment marker
    #[must_use]
    pub fn resting_offset(&self, index: usize) -> f64 {
        self.alignment_x - index as f64 * self.step() - self.tile_size / 2.0
    }
}

impl Default for StripGeometry {
    fn default() -> Self {
        Self {
            tile_size: 60.0,
            spacing: 10.0,
            alignment_x: 50.0,
        }
    }
}

/// One animation run: where it starts, where it lands, and how fast
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Trajectory {
    start_offset: f64,
    target_offset: f64,
    initial_velocity: f64,
    deceleration: f64,
    duration: Duration,
}

impl Trajectory {
    /// Plan a run that lands tile `target_index` under the marker after
    /// `duration`, scrolling past the whole strip `loops` times first
    #[must_use]
    pub fn plan(
        geometry: &StripGeometry,
        target_index: usize,
        tile_count: usize,
        duration: Duration,
        loops: u32,
    ) -> Self {
        let target_offset = geometry.resting_offset(target_index);
        let cycle_width = tile_count as f64 * geometry.step();
        let start_offset = target_offset - f64::from(loops) * cycle_width;

        let distance = target_offset - start_offset;
        let t = duration.as_secs_f64();
        let (initial_velocity, deceleration) = if t > 0.0 {
            (2.0 * distance / t, 2.0 * distance / (t * t))
        } else {
            (0.0, 0.0)
        };

        Self {
            start_offset,
            target_offset,
            initial_velocity,
            deceleration,
            duration,
        }
    }

    /// Offset at `elapsed` since the run started
    #[must_use]
    pub fn offset_at(&self, elapsed: Duration) -> f64 {
        if self.is_complete(elapsed) {
            return self.target_offset;
        }
        let t = elapsed.as_secs_f64();
        self.start_offset + self.initial_velocity * t - 0.5 * self.deceleration * t * t
    }

    /// Instantaneous velocity (pixels per second) at `elapsed`
    #[must_use]
    pub fn velocity_at(&self, elapsed: Duration) -> f64 {
        if self.is_complete(elapsed) {
            return 0.0;
        }
        self.initial_velocity - self.deceleration * elapsed.as_secs_f64()
    }

    /// Whether the run has reached its resting position
    #[must_use]
    pub fn is_complete(&self, elapsed: Duration) -> bool {
        elapsed >= self.duration
    }

    /// Offset at `t = 0`
    #[must_use]
    pub fn start_offset(&self) -> f64 {
        self.start_offset
    }

    /// Offset at `t >= T`
    #[must_use]
    pub fn target_offset(&self) -> f64 {
        self.target_offset
    }

    /// Velocity at `t = 0`
    #[must_use]
    pub fn initial_velocity(&self) -> f64 {
        self.initial_velocity
    }

    /// Deceleration constant
    #[must_use]
    pub fn deceleration(&self) -> f64 {
        self.deceleration
    }

    /// Total run time
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry() -> StripGeometry {
        StripGeometry::default()
    }

    fn reference_run() -> Trajectory {
        Trajectory::plan(&geometry(), 2, 5, Duration::from_millis(10_000), 3)
    }

    #[test]
    fn test_reference_offsets() {
        let run = reference_run();

        // 50 - 2*70 - 30
        assert_eq!(run.target_offset(), -120.0);
        // target - 3 * (5 * 70)
        assert_eq!(run.start_offset(), -1170.0);
        assert_eq!(run.offset_at(Duration::ZERO), run.start_offset());
        assert_eq!(run.offset_at(Duration::from_millis(10_000)), run.target_offset());
        assert_eq!(run.offset_at(Duration::from_millis(25_000)), run.target_offset());
    }

    #[test]
    fn test_kinematic_constants() {
        let run = reference_run();
        // S = 1050 over T = 10s
        assert!((run.initial_velocity() - 210.0).abs() < 1e-9);
        assert!((run.deceleration() - 21.0).abs() < 1e-9);
    }

    #[test]
    fn test_monotonic_and_stops_smoothly() {
        let run = reference_run();
        let mut previous = run.offset_at(Duration::ZERO);
        for ms in (20..=10_000).step_by(20) {
            let offset = run.offset_at(Duration::from_millis(ms));
            assert!(offset >= previous, "moved backwards at {ms}ms");
            assert!(offset <= run.target_offset());
            previous = offset;
        }

        let just_before = run.velocity_at(Duration::from_millis(9_999));
        assert!(just_before > 0.0 && just_before < 0.05);
        assert_eq!(run.velocity_at(Duration::from_millis(10_000)), 0.0);
    }

    #[test]
    fn test_midpoint_covers_three_quarters() {
        let run = reference_run();
        let mid = run.offset_at(Duration::from_secs(5));
        let covered = (mid - run.start_offset()) / (run.target_offset() - run.start_offset());
        assert!((covered - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_zero_duration_snaps_to_target() {
        let run = Trajectory::plan(&geometry(), 1, 3, Duration::ZERO, 3);
        assert!(run.is_complete(Duration::ZERO));
        assert_eq!(run.offset_at(Duration::ZERO), run.target_offset());
        assert_eq!(run.initial_velocity(), 0.0);
    }

    #[test]
    fn test_zero_loops_is_stationary() {
        let run = Trajectory::plan(&geometry(), 0, 4, Duration::from_secs(2), 0);
        assert_eq!(run.start_offset(), run.target_offset());
        assert_eq!(run.offset_at(Duration::from_secs(1)), run.target_offset());
    }
}
