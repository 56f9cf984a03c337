//! Draw Messages
//!
//! Messages sent from the sequencer to UI surfaces. Surfaces are renderers:
//! they show what they are told and gate the draw trigger on
//! [`DrawState::accepts_draw`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// Draw sequencer states
///
/// ```text
/// Idle ──initialize──► Armed ──draw──► Scrolling ──complete──► Resolving ─┐
///                        ▲                                                │
///                        └──────────────────── done ──────────────────────┤
///                                                                         ▼
///                                                      Exhausted (pool depleted)
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DrawState {
    /// No pool loaded yet
    #[default]
    Idle,
    /// Pool loaded, ready to draw
    Armed,
    /// Strip is scrolling toward the winner
    Scrolling,
    /// Animation done, committing the result
    Resolving,
    /// Nothing left to draw until re-initialization
    Exhausted,
}

impl DrawState {
    /// Whether the draw trigger should be enabled
    #[must_use]
    pub fn accepts_draw(self) -> bool {
        matches!(self, Self::Armed)
    }

    /// Whether a draw is in flight
    #[must_use]
    pub fn is_drawing(self) -> bool {
        matches!(self, Self::Scrolling | Self::Resolving)
    }

    /// Human-readable description for status lines
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::Idle => "waiting for a list",
            Self::Armed => "ready",
            Self::Scrolling => "drawing",
            Self::Resolving => "revealing the winner",
            Self::Exhausted => "all numbers drawn",
        }
    }
}

impl fmt::Display for DrawState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Severity of a user notification
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotifyLevel {
    /// Informational ("all numbers have been drawn")
    Info,
    /// Recoverable user error (bad input, empty pool)
    Warning,
    /// A draw failed
    Error,
}

/// Main result line shown to the user
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ResultText {
    /// Before any pool is loaded
    #[default]
    Idle,
    /// Pool loaded, nothing drawn yet
    Ready,
    /// Strip scrolling
    Drawing,
    /// Last winner
    Winner(i64),
    /// The draw aborted
    DrawError,
}

impl fmt::Display for ResultText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("The winning number will appear here."),
            Self::Ready => f.write_str("List initialized. Ready to draw!"),
            Self::Drawing => f.write_str("Drawing in progress..."),
            Self::Winner(value) => write!(f, "The winning number is: {value}"),
            Self::DrawError => f.write_str("Error in the draw."),
        }
    }
}

/// Prefix of the winners line
pub const WINNERS_LABEL: &str = "Winners:";

/// Format the winners line: `"Winners: 4, 9, 1"`
#[must_use]
pub fn history_text(history: &[i64]) -> String {
    if history.is_empty() {
        return WINNERS_LABEL.to_string();
    }
    let joined = history
        .iter()
        .map(i64::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    format!("{WINNERS_LABEL} {joined}")
}

/// Messages from the sequencer to a surface
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum DrawMessage {
    /// The sequencer entered a new state
    StateChanged {
        /// New state
        state: DrawState,
    },

    /// A pool was loaded (or reshuffled)
    PoolReady {
        /// Numbers in the pool
        size: usize,
        /// Input parts that were dropped
        skipped: usize,
        /// Display sequence for the idle strip
        numbers: Vec<i64>,
    },

    /// A draw began; the strip now shows `numbers`
    DrawStarted {
        /// Candidates for this draw (the animator's display sequence)
        numbers: Vec<i64>,
        /// Index the strip will land on
        target_index: usize,
    },

    /// A winner was committed
    Winner {
        /// Winning value
        value: i64,
        /// All winners this session, oldest first
        history: Vec<i64>,
    },

    /// Something the user should see
    Notify {
        /// Severity
        level: NotifyLevel,
        /// Message text
        text: String,
    },

    /// The draw in flight was abandoned without a winner
    DrawAborted {
        /// Why
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_text() {
        assert_eq!(ResultText::Winner(17).to_string(), "The winning number is: 17");
        assert_eq!(ResultText::Drawing.to_string(), "Drawing in progress...");
    }

    #[test]
    fn test_history_text() {
        assert_eq!(history_text(&[]), "Winners:");
        assert_eq!(history_text(&[4, 9, 1]), "Winners: 4, 9, 1");
    }

    #[test]
    fn test_only_armed_accepts_draw() {
        assert!(DrawState::Armed.accepts_draw());
        for state in [
            DrawState::Idle,
            DrawState::Scrolling,
            DrawState::Resolving,
            DrawState::Exhausted,
        ] {
            assert!(!state.accepts_draw(), "{state:?}");
        }
    }

    #[test]
    fn test_message_serialization() {
        let msg = DrawMessage::Winner {
            value: 3,
            history: vec![1, 3],
        };
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("Winner"));
        let back: DrawMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(back, msg);
    }
}
