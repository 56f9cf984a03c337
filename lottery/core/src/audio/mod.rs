//! Audio Abstraction
//!
//! The core never decodes or plays sound itself. It talks to an
//! [`AudioBackend`] supplied by the surface and treats every failure as
//! best-effort: a missing file or a dead device is logged, never surfaced.
//!
//! Each sound gets its own [`PlaybackId`] from [`AudioBackend::load`], and the
//! handle is released by [`AudioBackend::stop`]. Nothing is shared between
//! draws.

mod fade;
mod library;

pub use fade::{FadeOut, FadeProgress};
pub use library::{SoundCategory, SoundLibrary};

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::AudioError;

/// Handle to one loaded sound
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlaybackId(pub u64);

impl fmt::Display for PlaybackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "playback#{}", self.0)
    }
}

/// Volume level in the discrete range 0..=100
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Volume(u8);

impl Volume {
    /// Silence
    pub const MUTE: Self = Self(0);
    /// Full volume
    pub const MAX: Self = Self(100);

    /// Create a volume, clamping to 0..=100
    #[must_use]
    pub fn new(level: u8) -> Self {
        Self(level.min(100))
    }

    /// Level in 0..=100
    #[must_use]
    pub fn level(self) -> u8 {
        self.0
    }

    /// Level as a linear gain in 0.0..=1.0
    #[must_use]
    pub fn gain(self) -> f32 {
        f32::from(self.0) / 100.0
    }

    /// Lower by `step`, stopping at zero
    #[must_use]
    pub fn lowered_by(self, step: u8) -> Self {
        Self(self.0.saturating_sub(step))
    }

    /// Whether the level is zero
    #[must_use]
    pub fn is_mute(self) -> bool {
        self.0 == 0
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::MAX
    }
}

impl fmt::Display for Volume {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Playback state reported by a backend
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    /// Sound is audible
    Playing,
    /// Sound finished or was stopped
    Stopped,
}

/// Notifications a backend queues for the sequencer
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AudioEvent {
    /// The resource finished loading
    Loaded {
        /// Handle that loaded
        id: PlaybackId,
    },
    /// Decoding or playback failed
    Error {
        /// Handle that failed
        id: PlaybackId,
        /// Backend-specific reason
        message: String,
    },
    /// Playback state changed
    StateChanged {
        /// Handle that changed
        id: PlaybackId,
        /// New state
        state: PlaybackState,
    },
}

/// Sound playback capability supplied by the surface
///
/// Implementations must not block: loading may start work in the background
/// and report through [`drain_events`](Self::drain_events).
pub trait AudioBackend {
    /// Load a sound resource and return a fresh handle for it
    ///
    /// # Errors
    ///
    /// Returns [`AudioError::Load`] if the resource cannot be opened.
    fn load(&mut self, path: &Path) -> Result<PlaybackId, AudioError>;

    /// Start playing, repeating until stopped
    ///
    /// # Errors
    ///
    /// Returns an error if the handle is unknown or the device failed.
    fn play_looped(&mut self, id: PlaybackId) -> Result<(), AudioError>;

    /// Start playing once
    ///
    /// # Errors
    ///
    /// Returns an error if the handle is unknown or the device failed.
    fn play_once(&mut self, id: PlaybackId) -> Result<(), AudioError>;

    /// Set the volume of a handle
    ///
    /// # Errors
    ///
    /// Returns [`AudioError::UnknownHandle`] for released handles.
    fn set_volume(&mut self, id: PlaybackId, volume: Volume) -> Result<(), AudioError>;

    /// Current volume of a handle, `None` once released
    fn volume(&self, id: PlaybackId) -> Option<Volume>;

    /// Stop playback and release the handle
    ///
    /// # Errors
    ///
    /// Returns [`AudioError::UnknownHandle`] for released handles.
    fn stop(&mut self, id: PlaybackId) -> Result<(), AudioError>;

    /// Take all notifications queued since the last call
    fn drain_events(&mut self) -> Vec<AudioEvent>;
}

impl<A: AudioBackend + ?Sized> AudioBackend for Box<A> {
    fn load(&mut self, path: &Path) -> Result<PlaybackId, AudioError> {
        (**self).load(path)
    }

    fn play_looped(&mut self, id: PlaybackId) -> Result<(), AudioError> {
        (**self).play_looped(id)
    }

    fn play_once(&mut self, id: PlaybackId) -> Result<(), AudioError> {
        (**self).play_once(id)
    }

    fn set_volume(&mut self, id: PlaybackId, volume: Volume) -> Result<(), AudioError> {
        (**self).set_volume(id, volume)
    }

    fn volume(&self, id: PlaybackId) -> Option<Volume> {
        (**self).volume(id)
    }

    fn stop(&mut self, id: PlaybackId) -> Result<(), AudioError> {
        (**self).stop(id)
    }

    fn drain_events(&mut self) -> Vec<AudioEvent> {
        (**self).drain_events()
    }
}

/// Backend that plays nothing
///
/// Used when audio is disabled or no output device is available. It still
/// tracks handles and volumes so fades behave the same way.
#[derive(Debug, Default)]
pub struct SilentAudio {
    next_id: u64,
    volumes: HashMap<PlaybackId, Volume>,
}

impl SilentAudio {
    /// Create a silent backend
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of handles not yet released
    #[must_use]
    pub fn live_handles(&self) -> usize {
        self.volumes.len()
    }
}

impl AudioBackend for SilentAudio {
    fn load(&mut self, _path: &Path) -> Result<PlaybackId, AudioError> {
        let id = PlaybackId(self.next_id);
        self.next_id += 1;
        self.volumes.insert(id, Volume::MAX);
        Ok(id)
    }

    fn play_looped(&mut self, id: PlaybackId) -> Result<(), AudioError> {
        self.volumes
            .contains_key(&id)
            .then_some(())
            .ok_or(AudioError::UnknownHandle)
    }

    fn play_once(&mut self, id: PlaybackId) -> Result<(), AudioError> {
        self.play_looped(id)
    }

    fn set_volume(&mut self, id: PlaybackId, volume: Volume) -> Result<(), AudioError> {
        let slot = self.volumes.get_mut(&id).ok_or(AudioError::UnknownHandle)?;
        *slot = volume;
        Ok(())
    }

    fn volume(&self, id: PlaybackId) -> Option<Volume> {
        self.volumes.get(&id).copied()
    }

    fn stop(&mut self, id: PlaybackId) -> Result<(), AudioError> {
        self.volumes
            .remove(&id)
            .map(|_| ())
            .ok_or(AudioError::UnknownHandle)
    }

    fn drain_events(&mut self) -> Vec<AudioEvent> {
        Vec::new()
    }
}
