//! Display State Types
//!
//! The TUI is a thin client: it renders what the sequencer tells it to.
//! [`DisplayState`] is the bridge between [`DrawMessage`]s and rendering.

use std::time::{Duration, Instant};

use lottery_core::{history_text, DrawMessage, DrawState, NotifyLevel, ResultText};

/// How long a notification banner stays on screen
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(4);

/// A notification to display
#[derive(Clone, Debug, PartialEq)]
pub struct DisplayNotification {
    /// Notification level
    pub level: NotifyLevel,
    /// Message content
    pub message: String,
    /// When it was received
    pub shown_at: Instant,
}

impl DisplayNotification {
    /// Whether the banner should be gone by `now`
    #[must_use]
    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) >= NOTIFICATION_TTL
    }
}

/// Everything the widgets need besides the animator
#[derive(Clone, Debug)]
pub struct DisplayState {
    /// Sequencer state
    pub draw_state: DrawState,
    /// Main result line
    pub result: ResultText,
    /// Winners this session, oldest first
    pub winners: Vec<i64>,
    /// Size of the loaded pool
    pub pool_size: usize,
    /// Input parts dropped by the last initialization
    pub skipped: usize,
    /// Pending notification (if any)
    pub notification: Option<DisplayNotification>,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self {
            draw_state: DrawState::Idle,
            result: ResultText::Idle,
            winners: Vec::new(),
            pool_size: 0,
            skipped: 0,
            notification: None,
        }
    }
}

impl DisplayState {
    /// Create a new display state
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a DrawMessage to update display state
    pub fn apply_message(&mut self, msg: DrawMessage, now: Instant) {
        match msg {
            DrawMessage::StateChanged { state } => {
                self.draw_state = state;
            }
            DrawMessage::PoolReady { size, skipped, .. } => {
                self.pool_size = size;
                self.skipped = skipped;
                self.winners.clear();
                self.result = ResultText::Ready;
            }
            DrawMessage::DrawStarted { .. } => {
                self.result = ResultText::Drawing;
            }
            DrawMessage::Winner { value, history } => {
                self.result = ResultText::Winner(value);
                self.winners = history;
            }
            DrawMessage::Notify { level, text } => {
                self.notification = Some(DisplayNotification {
                    level,
                    message: text,
                    shown_at: now,
                });
            }
            DrawMessage::DrawAborted { reason } => {
                tracing::debug!(%reason, "Draw aborted");
                self.result = ResultText::DrawError;
            }
        }
    }

    /// Expire the notification banner
    pub fn update(&mut self, now: Instant) {
        if self
            .notification
            .as_ref()
            .is_some_and(|n| n.is_expired(now))
        {
            self.notification = None;
        }
    }

    /// Winners line
    pub fn winners_text(&self) -> String {
        history_text(&self.winners)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_display_state_default() {
        let state = DisplayState::new();
        assert_eq!(state.draw_state, DrawState::Idle);
        assert_eq!(state.result, ResultText::Idle);
        assert_eq!(state.winners_text(), "Winners:");
        assert!(state.notification.is_none());
    }

    #[test]
    fn test_draw_cycle_updates_result() {
        let mut state = DisplayState::new();
        let now = Instant::now();

        state.apply_message(
            DrawMessage::PoolReady {
                size: 3,
                skipped: 1,
                numbers: vec![2, 1, 3],
            },
            now,
        );
        assert_eq!(state.result, ResultText::Ready);
        assert_eq!(state.pool_size, 3);

        state.apply_message(
            DrawMessage::DrawStarted {
                numbers: vec![2, 1, 3],
                target_index: 1,
            },
            now,
        );
        assert_eq!(state.result, ResultText::Drawing);

        state.apply_message(
            DrawMessage::Winner {
                value: 1,
                history: vec![1],
            },
            now,
        );
        assert_eq!(state.result.to_string(), "The winning number is: 1");
        assert_eq!(state.winners_text(), "Winners: 1");
    }

    #[test]
    fn test_reinitialize_after_abort_shows_ready() {
        let mut state = DisplayState::new();
        let now = Instant::now();
        state.winners = vec![4, 5];

        state.apply_message(
            DrawMessage::DrawAborted {
                reason: "re-initialized".to_string(),
            },
            now,
        );
        assert_eq!(state.result, ResultText::DrawError);

        state.apply_message(
            DrawMessage::PoolReady {
                size: 2,
                skipped: 0,
                numbers: vec![1, 2],
            },
            now,
        );
        assert_eq!(state.result, ResultText::Ready);
        assert!(state.winners.is_empty());
    }

    #[test]
    fn test_notification_expires() {
        let mut state = DisplayState::new();
        let now = Instant::now();
        state.apply_message(
            DrawMessage::Notify {
                level: NotifyLevel::Warning,
                text: "The list is invalid or empty.".to_string(),
            },
            now,
        );

        state.update(now + Duration::from_secs(3));
        assert!(state.notification.is_some());

        state.update(now + NOTIFICATION_TTL);
        assert!(state.notification.is_none());
    }
}
