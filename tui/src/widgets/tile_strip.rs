//! TileStrip Widget
//!
//! Renders the animator's tile layout into terminal cells. Strip geometry is
//! in pixels; `pixels_per_column` maps it onto the cell grid.

use lottery_core::{ScrollAnimator, StripGeometry, Tile};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;

use crate::theme::{MARKER_RED, STRIP_BACKGROUND, TILE_EVEN, TILE_ODD, TILE_TEXT};

/// Marker drawn in the top row
pub const MARKER_TOP: char = '▼';
/// Marker drawn in the bottom row
pub const MARKER_BOTTOM: char = '▲';

/// Columns `[start, end)` covered by a tile, relative to the strip's left edge
#[must_use]
pub fn cell_span(tile: &Tile, pixels_per_column: f64) -> (i64, i64) {
    let start = (tile.x / pixels_per_column).floor() as i64;
    let end = (tile.right() / pixels_per_column).ceil() as i64;
    (start, end)
}

/// Column of the alignment marker, relative to the strip's left edge
#[must_use]
pub fn marker_column(geometry: &StripGeometry, pixels_per_column: f64) -> i64 {
    (geometry.alignment_x / pixels_per_column).floor() as i64
}

/// The scrolling number strip with its alignment marker
pub struct TileStrip<'a> {
    animator: &'a ScrollAnimator,
    pixels_per_column: f64,
}

impl<'a> TileStrip<'a> {
    pub fn new(animator: &'a ScrollAnimator, pixels_per_column: f64) -> Self {
        Self {
            animator,
            pixels_per_column,
        }
    }
}

impl Widget for TileStrip<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        buf.set_style(area, Style::default().bg(STRIP_BACKGROUND));

        let width = i64::from(area.width);
        let mid = area.y + area.height / 2;
        let viewport_px = f64::from(area.width) * self.pixels_per_column;

        for tile in self.animator.visible_tiles(viewport_px) {
            let (start, end) = cell_span(&tile, self.pixels_per_column);
            let color = if tile.is_even() { TILE_EVEN } else { TILE_ODD };

            for col in start.max(0)..end.min(width) {
                let x = area.x + col as u16;
                for y in area.y..area.y + area.height {
                    if let Some(cell) = buf.cell_mut((x, y)) {
                        cell.set_char(' ').set_bg(color);
                    }
                }
            }

            // Label centered on the tile, clipped at the strip edges
            let label = tile.value.to_string();
            let label_len = label.chars().count() as i64;
            let label_start = start + (end - start - label_len).max(0) / 2;
            for (i, ch) in label.chars().enumerate() {
                let col = label_start + i as i64;
                if col < start.max(0) || col >= end.min(width) {
                    continue;
                }
                if let Some(cell) = buf.cell_mut((area.x + col as u16, mid)) {
                    cell.set_char(ch).set_fg(TILE_TEXT);
                }
            }
        }

        let marker = marker_column(self.animator.geometry(), self.pixels_per_column);
        if (0..width).contains(&marker) {
            let x = area.x + marker as u16;
            if let Some(cell) = buf.cell_mut((x, area.y)) {
                cell.set_char(MARKER_TOP).set_fg(MARKER_RED);
            }
            if area.height > 2 {
                if let Some(cell) = buf.cell_mut((x, area.y + area.height - 1)) {
                    cell.set_char(MARKER_BOTTOM).set_fg(MARKER_RED);
                }
            }
        }
    }
}
