//! Custom widgets

pub mod tile_strip;

pub use tile_strip::TileStrip;
