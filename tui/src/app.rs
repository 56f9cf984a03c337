//! Main Application
//!
//! The App struct manages the TUI lifecycle as a thin display client:
//! - Event loop (keyboard, resize) and the frame tick
//! - DrawSequencer for the draw logic
//! - DisplayState for rendering
//!
//! The App:
//! 1. Converts key presses to DrawEvents
//! 2. Ticks the sequencer with the current time on every frame
//! 3. Receives DrawMessages and updates DisplayState
//! 4. Renders based on DisplayState and the animator

use std::time::{Duration, Instant};

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::backend::Backend;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::{Frame, Terminal};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use unicode_width::UnicodeWidthStr;

use lottery_core::{
    AudioBackend, DrawEvent, DrawMessage, DrawSequencer, LotteryConfig, NotifyLevel,
    SoundLibrary,
};

use crate::display::DisplayState;
use crate::theme::{
    DIM_GRAY, ERROR_RED, INFO_BLUE, INPUT_GREEN, RESULT_GOLD, WARNING_AMBER,
};
use crate::widgets::TileStrip;

/// Instruction shown above the input line
pub const INSTRUCTION: &str =
    "Enter a list of numbers or ranges (e.g. '1-10,15-20' or '2,4,6,8'), then press Enter:";

/// Label of the replace toggle
pub const REPLACE_LABEL: &str = "Put numbers back in play after each draw";

/// Height of the tile strip in rows
pub const STRIP_HEIGHT: u16 = 3;

/// Capacity of the sequencer → app message channel
const MESSAGE_BUFFER: usize = 256;

/// The sequencer as the TUI runs it
pub type Sequencer = DrawSequencer<Box<dyn AudioBackend>>;

/// Main application state
pub struct App {
    // === Core State ===
    /// Is the app still running?
    running: bool,

    // === Draw Integration ===
    /// The draw state machine
    sequencer: Sequencer,
    /// Messages from the sequencer
    rx: mpsc::Receiver<DrawMessage>,
    /// Display state derived from DrawMessages
    display: DisplayState,

    // === Input State ===
    /// Pool text being edited
    input_buffer: String,

    // === Rendering ===
    /// Strip pixels per terminal column
    pixels_per_column: f64,
    /// Frame tick interval
    tick_interval: Duration,
}

impl App {
    /// Create a new App instance
    pub fn new(config: LotteryConfig, audio: Box<dyn AudioBackend>, sounds: SoundLibrary) -> Self {
        let (tx, rx) = mpsc::channel(MESSAGE_BUFFER);
        let sequencer = DrawSequencer::new(config, audio, sounds, tx);
        Self::with_sequencer(sequencer, rx)
    }

    /// Create an App around an existing sequencer and its message receiver
    pub fn with_sequencer(sequencer: Sequencer, rx: mpsc::Receiver<DrawMessage>) -> Self {
        let pixels_per_column = sequencer.config().pixels_per_column;
        let tick_interval = sequencer.config().animation.tick_interval;
        Self {
            running: true,
            sequencer,
            rx,
            display: DisplayState::new(),
            input_buffer: String::new(),
            pixels_per_column,
            tick_interval,
        }
    }

    /// Main event loop
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()> {
        // Create async event stream for non-blocking terminal events
        let mut event_stream = EventStream::new();

        let mut ticker = tokio::time::interval(self.tick_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        // Render initial frame immediately so user sees UI
        terminal.draw(|frame| self.render(frame))?;

        while self.running {
            tokio::select! {
                biased;

                // Check for terminal events - highest priority
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        // Only handle Press events (not Release or Repeat)
                        Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                            self.handle_key(key, Instant::now());
                        }
                        Some(Ok(_)) => {}
                        Some(Err(e)) => tracing::warn!(error = %e, "Terminal event error"),
                        None => self.running = false,
                    }
                }

                // Frame tick
                _ = ticker.tick() => {}
            }

            self.tick(Instant::now());
            terminal.draw(|frame| self.render(frame))?;
        }

        Ok(())
    }

    /// Advance the sequencer and pull its messages
    pub fn tick(&mut self, now: Instant) {
        self.sequencer.tick(now);
        self.process_messages(now);
        self.display.update(now);
    }

    /// Process all pending messages from the sequencer
    fn process_messages(&mut self, now: Instant) {
        while let Ok(msg) = self.rx.try_recv() {
            self.display.apply_message(msg, now);
        }
    }

    /// Handle keyboard input
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let event = match key.code {
            // Quit
            KeyCode::Esc => {
                self.running = false;
                None
            }
            KeyCode::Char('c') if ctrl => {
                self.running = false;
                None
            }

            // Draw (ignored while the trigger is disabled)
            KeyCode::F(5) => self.draw_event(),
            KeyCode::Char('d') if ctrl => self.draw_event(),

            KeyCode::Enter => Some(DrawEvent::initialize(self.input_buffer.clone())),
            KeyCode::F(2) => Some(DrawEvent::SetReplace {
                enabled: !self.sequencer.replace_enabled(),
            }),
            KeyCode::F(3) => Some(DrawEvent::Reshuffle),

            // Typing
            KeyCode::Char(c) if !ctrl => {
                self.input_buffer.push(c);
                None
            }
            KeyCode::Backspace => {
                self.input_buffer.pop();
                None
            }

            _ => None,
        };

        if let Some(event) = event {
            // Rejections already reached the display as notifications
            if let Err(e) = self.sequencer.handle_event(event, now) {
                tracing::debug!(error = %e, "Event rejected");
            }
            self.process_messages(now);
        }
    }

    fn draw_event(&self) -> Option<DrawEvent> {
        self.sequencer.draw_enabled().then_some(DrawEvent::Draw)
    }

    /// Render the UI
    pub fn render(&self, frame: &mut Frame) {
        let [instruction, input, toggle, result, winners, _, strip, notice, _, status] =
            Layout::vertical([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(2),
                Constraint::Length(1),
                Constraint::Length(STRIP_HEIGHT),
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .areas(frame.area());

        frame.render_widget(
            Paragraph::new(INSTRUCTION).style(Style::default().fg(DIM_GRAY)),
            instruction,
        );
        self.render_input(frame, input);
        self.render_toggle(frame, toggle);

        frame.render_widget(
            Paragraph::new(self.display.result.to_string()).style(
                Style::default()
                    .fg(RESULT_GOLD)
                    .add_modifier(Modifier::BOLD),
            ),
            result,
        );
        self.render_winners(frame, winners);

        frame.render_widget(
            TileStrip::new(self.sequencer.animator(), self.pixels_per_column),
            strip,
        );

        self.render_notification(frame, notice);
        self.render_status(frame, status);
    }

    fn render_input(&self, frame: &mut Frame, area: Rect) {
        let line = Line::from(vec![
            Span::styled("> ", Style::default().fg(DIM_GRAY)),
            Span::styled(self.input_buffer.as_str(), Style::default().fg(INPUT_GREEN)),
        ]);
        frame.render_widget(Paragraph::new(line), area);

        let text_width = u16::try_from(self.input_buffer.width()).unwrap_or(u16::MAX);
        let cursor_x = area.x.saturating_add(2).saturating_add(text_width);
        if cursor_x < area.x.saturating_add(area.width) {
            frame.set_cursor_position((cursor_x, area.y));
        }
    }

    fn render_toggle(&self, frame: &mut Frame, area: Rect) {
        let mark = if self.sequencer.replace_enabled() { "x" } else { " " };
        frame.render_widget(
            Paragraph::new(format!("[{mark}] {REPLACE_LABEL} (F2)")),
            area,
        );
    }

    /// Winners line, wrapped; older winners scroll off the top
    fn render_winners(&self, frame: &mut Frame, area: Rect) {
        let width = usize::from(area.width.max(1));
        let text = self.display.winners_text();
        let wrapped = textwrap::wrap(&text, width);
        let skip = wrapped.len().saturating_sub(usize::from(area.height));
        let lines: Vec<Line> = wrapped
            .iter()
            .skip(skip)
            .map(|l| Line::raw(l.to_string()))
            .collect();
        frame.render_widget(Paragraph::new(lines), area);
    }

    fn render_notification(&self, frame: &mut Frame, area: Rect) {
        let Some(ref notification) = self.display.notification else {
            return;
        };
        let color = match notification.level {
            NotifyLevel::Info => INFO_BLUE,
            NotifyLevel::Warning => WARNING_AMBER,
            NotifyLevel::Error => ERROR_RED,
        };
        frame.render_widget(
            Paragraph::new(notification.message.as_str()).style(Style::default().fg(color)),
            area,
        );
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let draw_hint = if self.sequencer.draw_enabled() {
            "F5 draw"
        } else {
            "F5 (disabled)"
        };
        let mut pool = String::new();
        if self.display.pool_size > 0 {
            pool = format!(" | {} numbers", self.display.pool_size);
        }
        if self.display.skipped > 0 {
            pool.push_str(&format!(" ({} skipped)", self.display.skipped));
        }
        let status = format!(
            " {}{} | Enter load | {} | F3 reshuffle | Esc quit",
            self.display.draw_state, pool, draw_hint
        );
        frame.render_widget(
            Paragraph::new(status).style(Style::default().fg(DIM_GRAY)),
            area,
        );
    }

    /// Whether the event loop should keep going
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Current input text
    pub fn input(&self) -> &str {
        &self.input_buffer
    }

    /// Display state
    pub fn display(&self) -> &DisplayState {
        &self.display
    }

    /// The draw sequencer
    pub fn sequencer(&self) -> &Sequencer {
        &self.sequencer
    }

    /// Summary printed after the TUI closes
    pub fn goodbye(&self) -> Option<String> {
        let history = self.sequencer.history();
        (!history.is_empty()).then(|| self.sequencer.history_text())
    }
}
