//! Lottery TUI - Terminal interface for the lottery wheel
//!
//! This crate provides a full-screen terminal UI around the headless
//! `lottery-core` draw engine: a text input for the pool, a replace toggle,
//! the draw trigger and a scrolling tile strip.
//!
//! # Architecture
//!
//! - **App**: Event loop, key handling and layout
//! - **Display**: State derived from the sequencer's messages
//! - **Widgets**: The tile strip with its alignment marker
//! - **Sounds / Audio**: Sound discovery and the playback backend

pub mod app;
pub mod audio;
pub mod display;
pub mod sounds;
pub mod theme;
pub mod widgets;

pub use app::App;
