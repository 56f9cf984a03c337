//! Draw Sequencer
//!
//! The state machine behind the draw button. It owns the pool, the animator,
//! the winner history and every playback handle, and it reports to the
//! surface through [`DrawMessage`]s.
//!
//! Nothing here runs on its own. The surface forwards user input through
//! [`DrawSequencer::handle_event`] and drives time through
//! [`DrawSequencer::tick`], passing the current [`Instant`] both times.
//!
//! # Ordering
//!
//! A winner is committed inside the tick that completes the animation,
//! before the sequencer returns to `Armed`. A draw is only accepted in
//! `Armed`, so the next `begin_draw` always sees the committed result.

use std::path::Path;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::mpsc;

use crate::animation::ScrollAnimator;
use crate::audio::{
    AudioBackend, AudioEvent, FadeOut, FadeProgress, PlaybackId, PlaybackState, SoundCategory,
    SoundLibrary,
};
use crate::config::LotteryConfig;
use crate::error::{AudioError, DrawError};
use crate::events::DrawEvent;
use crate::messages::{history_text, DrawMessage, DrawState, NotifyLevel, ResultText};
use crate::pool::{parse_with, CommitOutcome, DrawPool, ParseOutcome, SkipReason};

/// Notification shown when the last number leaves the pool
pub const ALL_DRAWN_TEXT: &str = "All numbers have been drawn.";

/// Draw state machine for one widget
pub struct DrawSequencer<A: AudioBackend> {
    config: LotteryConfig,
    pool: DrawPool,
    animator: ScrollAnimator,
    history: Vec<i64>,
    replace_enabled: bool,
    state: DrawState,
    result: ResultText,
    rng: StdRng,

    // Audio
    audio: A,
    sounds: SoundLibrary,
    wheel: Option<PlaybackId>,
    winner: Option<PlaybackId>,
    fades: Vec<FadeOut>,

    tx: mpsc::Sender<DrawMessage>,
}

impl<A: AudioBackend> DrawSequencer<A> {
    /// Create a sequencer seeded from system entropy
    pub fn new(
        config: LotteryConfig,
        audio: A,
        sounds: SoundLibrary,
        tx: mpsc::Sender<DrawMessage>,
    ) -> Self {
        Self::with_rng(config, audio, sounds, tx, StdRng::from_entropy())
    }

    /// Create a sequencer with an explicit random source
    pub fn with_rng(
        config: LotteryConfig,
        audio: A,
        sounds: SoundLibrary,
        tx: mpsc::Sender<DrawMessage>,
        rng: StdRng,
    ) -> Self {
        let animator = ScrollAnimator::new(config.geometry);
        let replace_enabled = config.replace_by_default;
        Self {
            config,
            pool: DrawPool::new(),
            animator,
            history: Vec::new(),
            replace_enabled,
            state: DrawState::Idle,
            result: ResultText::Idle,
            rng,
            audio,
            sounds,
            wheel: None,
            winner: None,
            fades: Vec::new(),
            tx,
        }
    }

    /// Dispatch one surface event
    ///
    /// # Errors
    ///
    /// Returns the [`DrawError`] of a rejected request. The surface has
    /// already been notified when this happens.
    pub fn handle_event(&mut self, event: DrawEvent, now: Instant) -> Result<(), DrawError> {
        match event {
            DrawEvent::Initialize { text } => self.initialize(&text, now).map(|_| ()),
            DrawEvent::SetReplace { enabled } => {
                self.set_replace(enabled);
                Ok(())
            }
            DrawEvent::Draw => self.draw(now).map(|_| ()),
            DrawEvent::Reshuffle => self.reshuffle(),
        }
    }

    /// Load a new pool from free text
    ///
    /// Permitted in every state. On success any draw in flight is abandoned
    /// without a commit, the history is cleared and the sequencer is `Armed`.
    /// Returns the pool size.
    ///
    /// # Errors
    ///
    /// [`DrawError::BlankInput`] or [`DrawError::EmptyPool`], or
    /// [`DrawError::RangeTooLarge`] when the only numbers came from a range
    /// past the cap. State, pool and any draw in flight are left exactly as
    /// they were.
    pub fn initialize(&mut self, text: &str, _now: Instant) -> Result<usize, DrawError> {
        if text.trim().is_empty() {
            return Err(self.reject(DrawError::BlankInput));
        }

        let outcome = parse_with(text, &self.config.parser);
        for skipped in &outcome.skipped {
            tracing::debug!(token = %skipped.token, reason = %skipped.reason, "Skipped pool text");
        }
        let oversized = self.oversized_range(&outcome);
        if outcome.is_empty() {
            return Err(self.reject(oversized.unwrap_or(DrawError::EmptyPool)));
        }

        self.abort_in_flight("The list was re-initialized");
        self.pool.initialize(outcome.numbers, &mut self.rng)?;
        self.start_session();

        let size = self.pool.pool().len();
        self.send(DrawMessage::PoolReady {
            size,
            skipped: outcome.skipped.len(),
            numbers: self.pool.working().to_vec(),
        });
        self.set_state(DrawState::Armed);

        if let Some(error) = oversized {
            tracing::warn!(error = %error, "Pool loaded without an oversized range");
            self.notify(NotifyLevel::Warning, error.to_string());
        }
        Ok(size)
    }

    /// Reshuffle the current pool and start a fresh session on it
    ///
    /// # Errors
    ///
    /// [`DrawError::NotArmed`] if no pool has been loaded yet.
    pub fn reshuffle(&mut self) -> Result<(), DrawError> {
        if !self.pool.is_initialized() {
            return Err(self.reject(DrawError::NotArmed { state: self.state }));
        }

        self.abort_in_flight("The list was reshuffled");
        self.pool.reset(&mut self.rng);
        self.start_session();

        self.send(DrawMessage::PoolReady {
            size: self.pool.pool().len(),
            skipped: 0,
            numbers: self.pool.working().to_vec(),
        });
        self.set_state(DrawState::Armed);
        Ok(())
    }

    /// Start a draw; returns the index the strip will land on
    ///
    /// # Errors
    ///
    /// [`DrawError::NotArmed`] outside `Armed`, or
    /// [`DrawError::PoolExhausted`] when the deferred removal empties the
    /// working list. The latter moves the sequencer to `Exhausted`.
    pub fn draw(&mut self, now: Instant) -> Result<usize, DrawError> {
        match self.state {
            DrawState::Armed => {}
            DrawState::Exhausted => return Err(self.reject(DrawError::PoolExhausted)),
            DrawState::Scrolling | DrawState::Resolving => {
                // Trigger should be disabled; ignore quietly
                tracing::debug!(state = %self.state, "Draw ignored while drawing");
                return Err(DrawError::NotArmed { state: self.state });
            }
            DrawState::Idle => return Err(self.reject(DrawError::NotArmed { state: self.state })),
        }

        let candidates = match self.pool.begin_draw() {
            Ok(candidates) => candidates.to_vec(),
            Err(e) => {
                self.set_state(DrawState::Exhausted);
                return Err(self.reject(e));
            }
        };
        let target_index = self.pool.pick_winner_index(&mut self.rng)?;

        tracing::debug!(target_index, candidates = candidates.len(), "Draw started");

        self.result = ResultText::Drawing;
        self.send(DrawMessage::DrawStarted {
            numbers: candidates.clone(),
            target_index,
        });
        self.set_state(DrawState::Scrolling);

        if let Some(old) = self.wheel.take() {
            self.release(old);
        }
        self.wheel = self.play_cue(SoundCategory::Wheel);

        self.animator.start_scroll(
            target_index,
            candidates,
            self.config.animation.duration,
            self.config.animation.loops,
            now,
        );
        Ok(target_index)
    }

    /// Advance audio, fades and the animation to `now`
    ///
    /// Returns the winner when this tick completed a draw.
    pub fn tick(&mut self, now: Instant) -> Option<i64> {
        self.pump_audio_events();
        self.advance_fades(now);

        match self.animator.tick(now)? {
            Ok(value) => Some(self.resolve(value, now)),
            Err(e) => {
                self.abort_draw(&e);
                None
            }
        }
    }

    /// Change the replace-after-draw policy for future commits
    pub fn set_replace(&mut self, enabled: bool) {
        if self.replace_enabled != enabled {
            tracing::debug!(enabled, "Replace mode changed");
        }
        self.replace_enabled = enabled;
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Current state
    #[must_use]
    pub fn state(&self) -> DrawState {
        self.state
    }

    /// Main result line
    #[must_use]
    pub fn result_text(&self) -> ResultText {
        self.result
    }

    /// Winners line, e.g. `"Winners: 4, 9"`
    #[must_use]
    pub fn history_text(&self) -> String {
        history_text(&self.history)
    }

    /// Winners this session, oldest first
    #[must_use]
    pub fn history(&self) -> &[i64] {
        &self.history
    }

    /// Whether the draw trigger should be enabled
    #[must_use]
    pub fn draw_enabled(&self) -> bool {
        self.state.accepts_draw()
    }

    /// Replace-after-draw toggle
    #[must_use]
    pub fn replace_enabled(&self) -> bool {
        self.replace_enabled
    }

    /// Strip animator, for rendering
    #[must_use]
    pub fn animator(&self) -> &ScrollAnimator {
        &self.animator
    }

    /// Pool manager
    #[must_use]
    pub fn pool(&self) -> &DrawPool {
        &self.pool
    }

    /// Audio backend
    #[must_use]
    pub fn audio(&self) -> &A {
        &self.audio
    }

    /// Fades still running
    #[must_use]
    pub fn active_fades(&self) -> usize {
        self.fades.len()
    }

    /// Effective configuration
    #[must_use]
    pub fn config(&self) -> &LotteryConfig {
        &self.config
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn start_session(&mut self) {
        self.history.clear();
        self.result = ResultText::Ready;
        self.animator.set_numbers(self.pool.working().to_vec());
    }

    fn resolve(&mut self, value: i64, now: Instant) -> i64 {
        self.set_state(DrawState::Resolving);

        if let Some(id) = self.wheel.take() {
            self.fades.push(FadeOut::start(
                id,
                self.config.audio.fade_step,
                self.config.audio.fade_interval,
                now,
            ));
        }
        if let Some(old) = self.winner.take() {
            self.release(old);
        }
        self.winner = self.play_cue(SoundCategory::Winner);

        self.history.push(value);
        self.result = ResultText::Winner(value);
        let outcome = self.pool.commit_winner(value, self.replace_enabled);
        tracing::info!(value, ?outcome, remaining = self.pool.working().len(), "Winner drawn");

        self.send(DrawMessage::Winner {
            value,
            history: self.history.clone(),
        });

        if outcome == CommitOutcome::Depleted {
            self.set_state(DrawState::Exhausted);
            self.notify(NotifyLevel::Info, ALL_DRAWN_TEXT);
        } else {
            self.set_state(DrawState::Armed);
        }
        value
    }

    /// The first range dropped by the `max_range_len` cap, as a user error
    fn oversized_range(&self, outcome: &ParseOutcome) -> Option<DrawError> {
        let limit = self.config.parser.max_range_len?;
        outcome
            .skipped
            .iter()
            .find(|s| s.reason == SkipReason::RangeTooLarge)
            .map(|s| DrawError::RangeTooLarge {
                range: s.token.clone(),
                limit,
            })
    }

    fn abort_draw(&mut self, error: &DrawError) {
        tracing::error!(error = %error, "Draw aborted on internal fault");

        if let Some(id) = self.wheel.take() {
            self.release(id);
        }
        self.result = ResultText::DrawError;
        self.send(DrawMessage::DrawAborted {
            reason: error.to_string(),
        });
        self.notify(NotifyLevel::Error, ResultText::DrawError.to_string());
        self.set_state(DrawState::Armed);
    }

    /// Stop the animation and every sound without committing anything
    fn abort_in_flight(&mut self, reason: &str) {
        let was_drawing = self.state.is_drawing() || self.animator.is_running();
        self.animator.cancel();

        for fade in std::mem::take(&mut self.fades) {
            fade.abort(&mut self.audio);
        }
        if let Some(id) = self.wheel.take() {
            self.release(id);
        }
        if let Some(id) = self.winner.take() {
            self.release(id);
        }

        if was_drawing {
            tracing::info!(reason, "Draw in flight abandoned");
            self.send(DrawMessage::DrawAborted {
                reason: reason.to_string(),
            });
        }
    }

    fn advance_fades(&mut self, now: Instant) {
        let audio = &mut self.audio;
        self.fades
            .retain_mut(|fade| fade.tick(audio, now) != FadeProgress::Finished);
    }

    fn pump_audio_events(&mut self) {
        for event in self.audio.drain_events() {
            match event {
                AudioEvent::Loaded { id } => tracing::trace!(%id, "Sound loaded"),
                AudioEvent::Error { id, message } => {
                    tracing::warn!(%id, %message, "Sound playback error");
                    if self.wheel == Some(id) {
                        self.wheel = None;
                    }
                    if self.winner == Some(id) {
                        self.winner = None;
                    }
                    self.release(id);
                }
                AudioEvent::StateChanged { id, state } => {
                    tracing::trace!(%id, ?state, "Sound state changed");
                    if state == PlaybackState::Stopped && self.winner == Some(id) {
                        self.winner = None;
                        self.release(id);
                    }
                }
            }
        }
    }

    /// Pick, load and start a sound for `category`; `None` if skipped
    fn play_cue(&mut self, category: SoundCategory) -> Option<PlaybackId> {
        let Some(path) = self.sounds.choose(category, &mut self.rng).cloned() else {
            tracing::warn!(%category, "AssetMissing: no sounds found, skipping cue");
            return None;
        };

        let id = match self.audio.load(&path) {
            Ok(id) => id,
            Err(e) => {
                tracing::warn!(%category, error = %e, "Failed to load sound");
                return None;
            }
        };

        match self.start_playback(id, category, &path) {
            Ok(()) => Some(id),
            Err(e) => {
                tracing::warn!(%category, %id, error = %e, "Failed to start sound");
                self.release(id);
                None
            }
        }
    }

    fn start_playback(
        &mut self,
        id: PlaybackId,
        category: SoundCategory,
        path: &Path,
    ) -> Result<(), AudioError> {
        self.audio.set_volume(id, self.config.audio.initial_volume)?;
        match category {
            SoundCategory::Wheel => self.audio.play_looped(id)?,
            SoundCategory::Winner => self.audio.play_once(id)?,
        }
        tracing::debug!(%category, %id, path = %path.display(), "Playing sound");
        Ok(())
    }

    fn release(&mut self, id: PlaybackId) {
        if let Err(e) = self.audio.stop(id) {
            tracing::debug!(%id, error = %e, "Handle already released");
        }
    }

    fn set_state(&mut self, state: DrawState) {
        if self.state != state {
            tracing::debug!(from = %self.state, to = %state, "State transition");
        }
        self.state = state;
        self.send(DrawMessage::StateChanged { state });
    }

    /// Notify the surface of a user-facing error and hand it back
    fn reject(&self, error: DrawError) -> DrawError {
        tracing::warn!(error = %error, state = %self.state, "Request rejected");
        let level = match error {
            DrawError::PoolExhausted => NotifyLevel::Info,
            _ => NotifyLevel::Warning,
        };
        self.notify(level, error.to_string());
        error
    }

    fn notify(&self, level: NotifyLevel, text: impl Into<String>) {
        self.send(DrawMessage::Notify {
            level,
            text: text.into(),
        });
    }

    fn send(&self, message: DrawMessage) {
        if let Err(e) = self.tx.try_send(message) {
            tracing::debug!(error = %e, "Surface not receiving draw messages");
        }
    }
}

impl<A: AudioBackend> std::fmt::Debug for DrawSequencer<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DrawSequencer")
            .field("state", &self.state)
            .field("result", &self.result)
            .field("history", &self.history)
            .field("replace_enabled", &self.replace_enabled)
            .field("working", &self.pool.working().len())
            .finish_non_exhaustive()
    }
}
