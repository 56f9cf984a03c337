//! Tick-driven volume fade
//!
//! Every `interval` the volume drops by `step`. On the first step that finds
//! the volume already at zero, playback is stopped and the handle released.

use std::time::{Duration, Instant};

use super::{AudioBackend, PlaybackId, Volume};

/// Result of advancing a fade
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FadeProgress {
    /// Still ramping down; carries the volume after this tick
    Fading(Volume),
    /// Playback stopped and the handle released
    Finished,
}

/// A fade-out in progress on one handle
#[derive(Clone, Debug)]
pub struct FadeOut {
    id: PlaybackId,
    step: u8,
    interval: Duration,
    next_step_at: Instant,
}

impl FadeOut {
    /// Begin fading `id`; the first step happens one `interval` after `now`
    #[must_use]
    pub fn start(id: PlaybackId, step: u8, interval: Duration, now: Instant) -> Self {
        let interval = interval.max(Duration::from_millis(1));
        Self {
            id,
            step: step.max(1),
            interval,
            next_step_at: now + interval,
        }
    }

    /// Apply every step that is due at `now`
    ///
    /// Steps missed by a late tick are applied together, so a fade always
    /// takes the same wall-clock time.
    pub fn tick<A: AudioBackend + ?Sized>(&mut self, audio: &mut A, now: Instant) -> FadeProgress {
        let mut progress = match audio.volume(self.id) {
            Some(volume) => FadeProgress::Fading(volume),
            None => return FadeProgress::Finished,
        };

        while now >= self.next_step_at {
            self.next_step_at += self.interval;
            progress = self.step_once(audio);
            if progress == FadeProgress::Finished {
                break;
            }
        }
        progress
    }

    /// Stop right away, skipping the remaining steps
    pub fn abort<A: AudioBackend + ?Sized>(self, audio: &mut A) {
        if let Err(e) = audio.stop(self.id) {
            tracing::debug!(id = %self.id, error = %e, "Fade abort on released handle");
        }
    }

    fn step_once<A: AudioBackend + ?Sized>(&self, audio: &mut A) -> FadeProgress {
        let Some(volume) = audio.volume(self.id) else {
            return FadeProgress::Finished;
        };

        if volume.is_mute() {
            if let Err(e) = audio.stop(self.id) {
                tracing::warn!(id = %self.id, error = %e, "Failed to stop faded sound");
            }
            tracing::debug!(id = %self.id, "Wheel sound completely stopped");
            return FadeProgress::Finished;
        }

        let lowered = volume.lowered_by(self.step);
        match audio.set_volume(self.id, lowered) {
            Ok(()) => {
                tracing::trace!(id = %self.id, volume = %lowered, "Fading");
                FadeProgress::Fading(lowered)
            }
            Err(e) => {
                tracing::warn!(id = %self.id, error = %e, "Fade step failed, stopping");
                if let Err(e) = audio.stop(self.id) {
                    tracing::debug!(id = %self.id, error = %e, "Stop after failed fade step");
                }
                FadeProgress::Finished
            }
        }
    }
}
