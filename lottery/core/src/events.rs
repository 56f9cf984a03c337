//! Surface Events
//!
//! Events sent from UI surfaces to the sequencer. Surfaces report what the
//! user did; the sequencer decides what it means.

use serde::{Deserialize, Serialize};

/// Events from a surface to the sequencer
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawEvent {
    /// User asked to load a pool from free text
    Initialize {
        /// Pool text, e.g. `"1-10,15-20"`
        text: String,
    },

    /// User toggled "replace after draw"
    SetReplace {
        /// New toggle value
        enabled: bool,
    },

    /// User pressed the draw trigger
    Draw,

    /// User asked to reshuffle the current pool and start over
    Reshuffle,
}

impl DrawEvent {
    /// Convenience constructor for [`DrawEvent::Initialize`]
    pub fn initialize(text: impl Into<String>) -> Self {
        Self::Initialize { text: text.into() }
    }
}
