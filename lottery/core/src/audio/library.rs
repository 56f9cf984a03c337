//! Sound pools
//!
//! The surface discovers sound files; the core only picks from the lists it
//! is handed.

use std::fmt;
use std::path::PathBuf;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Which cue a sound is used for
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundCategory {
    /// Looping sound while the strip scrolls
    Wheel,
    /// One-shot sound when the winner is revealed
    Winner,
}

impl SoundCategory {
    /// Subdirectory name under the sounds directory
    #[must_use]
    pub fn dir_name(self) -> &'static str {
        match self {
            Self::Wheel => "wheel",
            Self::Winner => "winner",
        }
    }
}

impl fmt::Display for SoundCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// Sound files available to the sequencer, by category
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SoundLibrary {
    wheel: Vec<PathBuf>,
    winner: Vec<PathBuf>,
}

impl SoundLibrary {
    /// Build from the two discovered lists
    #[must_use]
    pub fn new(wheel: Vec<PathBuf>, winner: Vec<PathBuf>) -> Self {
        Self { wheel, winner }
    }

    /// A library with no sounds (every cue is skipped)
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// All files in a category
    #[must_use]
    pub fn sounds(&self, category: SoundCategory) -> &[PathBuf] {
        match category {
            SoundCategory::Wheel => &self.wheel,
            SoundCategory::Winner => &self.winner,
        }
    }

    /// Pick one file uniformly at random; `None` if the category is empty
    pub fn choose<R: Rng + ?Sized>(&self, category: SoundCategory, rng: &mut R) -> Option<&PathBuf> {
        self.sounds(category).choose(rng)
    }
}
