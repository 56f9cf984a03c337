//! Error Types
//!
//! User-facing failures (`BlankInput`, `EmptyPool`, `RangeTooLarge`,
//! `PoolExhausted`) are recoverable: the sequencer turns them into `Notify`
//! messages and leaves its state alone. `InternalConsistency` aborts the current draw only.

use std::path::PathBuf;

use thiserror::Error;

use crate::messages::DrawState;

/// Errors raised by the pool manager and the draw sequencer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DrawError {
    /// Input text was empty or whitespace only
    #[error("Please enter a list of numbers or ranges.")]
    BlankInput,

    /// The parsed pool contained no numbers
    #[error("The list is invalid or empty.")]
    EmptyPool,

    /// A range expanded past the configured `max_range_len` cap
    #[error("The range {range} has more than {limit} numbers.")]
    RangeTooLarge {
        /// The range as typed
        range: String,
        /// The configured cap
        limit: u64,
    },

    /// A draw was requested but nothing is left to draw
    #[error("No numbers left to draw.")]
    PoolExhausted,

    /// The animator resolved an index outside its display sequence
    #[error("Winning index {index} is out of range for a strip of {len} tiles")]
    InternalConsistency {
        /// Index the animator was asked to land on
        index: usize,
        /// Length of the display sequence at completion time
        len: usize,
    },

    /// A draw was requested in a state that does not accept one
    #[error("Cannot draw while {state}")]
    NotArmed {
        /// State the sequencer was in
        state: DrawState,
    },
}

/// Errors raised by an [`AudioBackend`](crate::audio::AudioBackend)
///
/// These are never fatal. The sequencer logs them and carries on silently.
#[derive(Debug, Error)]
pub enum AudioError {
    /// The sound resource could not be opened or decoded
    #[error("Failed to load sound {path}: {message}")]
    Load {
        /// Resource that failed
        path: PathBuf,
        /// Backend-specific reason
        message: String,
    },

    /// The handle was already released or never issued
    #[error("Unknown playback handle")]
    UnknownHandle,

    /// Any other backend failure (device lost, stream error, ...)
    #[error("Audio backend error: {0}")]
    Backend(String),
}
