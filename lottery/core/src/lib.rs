//! Lottery Core - Headless Draw Engine for the Lottery Wheel
//!
//! This crate holds everything a lottery-wheel widget does except drawing
//! pixels and decoding audio. It can drive a terminal UI, a desktop window,
//! or run headless in tests.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         UI Surface                            │
//! │   text input · replace toggle · draw trigger · tile strip    │
//! │                              │                                │
//! │                     DrawEvent (up)                            │
//! │                   DrawMessage (down)                          │
//! └──────────────────────────────┼────────────────────────────────┘
//!                                │
//! ┌──────────────────────────────┼────────────────────────────────┐
//! │                        LOTTERY CORE                            │
//! │  ┌───────────────────────────┴─────────────────────────────┐  │
//! │  │                     DrawSequencer                        │  │
//! │  │  ┌──────────┐  ┌──────────┐  ┌──────────┐  ┌──────────┐ │  │
//! │  │  │  Parser  │  │ DrawPool │  │ Animator │  │  Audio   │ │  │
//! │  │  └──────────┘  └──────────┘  └──────────┘  └──────────┘ │  │
//! │  └──────────────────────────────────────────────────────────┘  │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Key Types
//!
//! - [`DrawSequencer`]: The state machine behind the draw button
//! - [`DrawPool`]: Pool, working list and deferred removal
//! - [`ScrollAnimator`]: Decelerating tile-strip animation
//! - [`AudioBackend`]: Sound playback capability supplied by the surface
//! - [`DrawEvent`] / [`DrawMessage`]: The surface protocol
//!
//! # Quick Start
//!
//! ```ignore
//! use std::time::Instant;
//! use lottery_core::{DrawEvent, DrawSequencer, LotteryConfig, SilentAudio, SoundLibrary};
//! use tokio::sync::mpsc;
//!
//! let (tx, mut rx) = mpsc::channel(64);
//! let mut sequencer =
//!     DrawSequencer::new(LotteryConfig::default(), SilentAudio::new(), SoundLibrary::empty(), tx);
//!
//! sequencer.handle_event(DrawEvent::initialize("1-10,15-20"), Instant::now())?;
//! sequencer.handle_event(DrawEvent::Draw, Instant::now())?;
//!
//! // Frame loop: tick, then render what the sequencer reports
//! loop {
//!     sequencer.tick(Instant::now());
//!     while let Ok(msg) = rx.try_recv() {
//!         // Render message to UI
//!     }
//! }
//! ```
//!
//! # Module Overview
//!
//! - [`pool`]: Pool text parsing and the draw pool
//! - [`animation`]: Scroll kinematics and strip layout
//! - [`audio`]: Playback abstraction, fades and sound pools
//! - [`sequencer`]: The draw state machine
//! - [`events`]: Events from UI surfaces to the sequencer
//! - [`messages`]: Messages from the sequencer to UI surfaces
//! - [`config`]: TOML and environment configuration
//! - [`error`]: Error types
//!
//! # No TUI Dependencies
//!
//! This crate has **zero** dependencies on ratatui, crossterm, or any other
//! UI framework.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod animation;
pub mod audio;
pub mod config;
pub mod error;
pub mod events;
pub mod messages;
pub mod pool;
pub mod sequencer;

// Re-exports for convenience
pub use animation::{
    tile_covering, visible_tiles, ScrollAnimator, ScrollCompletion, StripGeometry, Tile,
    Trajectory,
};
pub use audio::{
    AudioBackend, AudioEvent, FadeOut, FadeProgress, PlaybackId, PlaybackState, SilentAudio,
    SoundCategory, SoundLibrary, Volume,
};
pub use error::{AudioError, DrawError};
pub use events::DrawEvent;
pub use messages::{history_text, DrawMessage, DrawState, NotifyLevel, ResultText};
pub use pool::{
    parse, parse_with, CommitOutcome, DrawPool, ParseOutcome, ParserConfig, RangePolicy,
    SkipReason, SkippedToken,
};
pub use sequencer::{DrawSequencer, ALL_DRAWN_TEXT};

// Config exports
pub use config::{
    default_config_path, load_config, load_config_from_path, load_config_with_env,
    AnimationConfig, AudioConfig, ConfigError, ConfigSource, LotteryConfig, LotteryToml,
};
