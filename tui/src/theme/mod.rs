//! Theme and Colors
//!
//! Palette for the lottery wheel. Tiles alternate between two light shades so
//! neighbouring numbers stay distinct while the strip is moving.

use ratatui::style::Color;

// ============================================================================
// Tile Strip
// ============================================================================

/// Even tiles - light gray
pub const TILE_EVEN: Color = Color::Rgb(211, 211, 211);

/// Odd tiles - light blue
pub const TILE_ODD: Color = Color::Rgb(173, 216, 230);

/// Number printed on a tile
pub const TILE_TEXT: Color = Color::Rgb(20, 20, 20);

/// Gap between tiles
pub const STRIP_BACKGROUND: Color = Color::Rgb(40, 40, 40);

/// Alignment marker
pub const MARKER_RED: Color = Color::Rgb(230, 40, 40);

// ============================================================================
// UI Colors
// ============================================================================

/// Result line accent
pub const RESULT_GOLD: Color = Color::Rgb(255, 210, 90);

/// Input text
pub const INPUT_GREEN: Color = Color::Rgb(130, 220, 130);

/// System/dim text
pub const DIM_GRAY: Color = Color::Rgb(100, 100, 100);

/// Error red
pub const ERROR_RED: Color = Color::Rgb(255, 80, 80);

/// Warning amber
pub const WARNING_AMBER: Color = Color::Rgb(255, 190, 80);

/// Info blue
pub const INFO_BLUE: Color = Color::Rgb(120, 180, 255);
