//! Tile Strip Layout
//!
//! Pure mapping from a scroll offset to the tiles a surface should draw.
//! Screen column `i` shows `numbers[i mod len]` at `x = offset + i·step`, so
//! the strip repeats forever in both directions.

use super::trajectory::StripGeometry;

/// One tile to draw this frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tile {
    /// Unbounded column index (may be negative)
    pub column: i64,
    /// Index into the display sequence (`column mod len`)
    pub index: usize,
    /// Number printed on the tile
    pub value: i64,
    /// Left edge in surface pixels
    pub x: f64,
    /// Tile width in surface pixels
    pub width: f64,
}

impl Tile {
    /// Right edge in surface pixels
    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Whether the column is even (surfaces alternate tile colors on this)
    #[must_use]
    pub fn is_even(&self) -> bool {
        self.column.rem_euclid(2) == 0
    }
}

/// Tiles that intersect `[0, viewport_width]` at `offset`, left to right
#[must_use]
pub fn visible_tiles(
    offset: f64,
    numbers: &[i64],
    geometry: &StripGeometry,
    viewport_width: f64,
) -> Vec<Tile> {
    let step = geometry.step();
    if numbers.is_empty() || step <= 0.0 || viewport_width <= 0.0 {
        return Vec::new();
    }

    let first = (-offset / step).floor() as i64 - 1;
    let last = ((viewport_width - offset) / step).ceil() as i64 + 1;

    (first..=last)
        .filter_map(|column| {
            let tile = tile_at(column, offset, numbers, geometry);
            let visible = tile.right() >= 0.0 && tile.x <= viewport_width;
            visible.then_some(tile)
        })
        .collect()
}

/// The tile whose body covers surface position `x`, if any
///
/// Returns `None` when `x` falls in the spacing between two tiles.
#[must_use]
pub fn tile_covering(
    x: f64,
    offset: f64,
    numbers: &[i64],
    geometry: &StripGeometry,
) -> Option<Tile> {
    let step = geometry.step();
    if numbers.is_empty() || step <= 0.0 {
        return None;
    }

    let column = ((x - offset) / step).floor() as i64;
    let tile = tile_at(column, offset, numbers, geometry);
    (x >= tile.x && x <= tile.right()).then_some(tile)
}

fn tile_at(column: i64, offset: f64, numbers: &[i64], geometry: &StripGeometry) -> Tile {
    let len = numbers.len() as i64;
    // rem_euclid keeps negative columns wrapping the same way positive ones do
    let index = column.rem_euclid(len) as usize;
    Tile {
        column,
        index,
        value: numbers[index],
        x: offset + column as f64 * geometry.step(),
        width: geometry.tile_size,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn values(tiles: &[Tile]) -> Vec<i64> {
        tiles.iter().map(|t| t.value).collect()
    }

    #[test]
    fn test_visible_tiles_at_rest() {
        let geometry = StripGeometry::default();
        let tiles = visible_tiles(0.0, &[1, 2, 3], &geometry, 200.0);

        // Columns 0..=2 start at 0, 70, 140; column 3 starts at 210 (off-screen)
        assert_eq!(values(&tiles), vec![1, 2, 3]);
        assert_eq!(tiles[1].x, 70.0);
    }

    #[test]
    fn test_wraps_with_negative_offset() {
        let geometry = StripGeometry::default();
        let tiles = visible_tiles(-1170.0, &[10, 20, 30, 40, 50], &geometry, 140.0);

        // -1170 / 70 = -16.71..., so column 16 is the first partly visible tile
        assert_eq!(tiles[0].column, 16);
        assert_eq!(tiles[0].index, 1);
        assert!(tiles.iter().all(|t| t.right() >= 0.0 && t.x <= 140.0));
        assert_eq!(values(&tiles), vec![20, 30, 40]);
    }

    #[test]
    fn test_partial_tiles_on_both_edges() {
        let geometry = StripGeometry::default();
        let tiles = visible_tiles(-35.0, &[1, 2], &geometry, 100.0);
        assert_eq!(tiles.first().map(|t| t.x), Some(-35.0));
        assert_eq!(tiles.last().map(|t| t.x), Some(35.0));
    }

    #[test]
    fn test_negative_columns_wrap() {
        let geometry = StripGeometry::default();
        let tiles = visible_tiles(140.0, &[1, 2, 3], &geometry, 140.0);
        assert_eq!(tiles[0].column, -2);
        assert_eq!(tiles[0].value, 2);
    }

    #[test]
    fn test_empty_inputs() {
        let geometry = StripGeometry::default();
        assert!(visible_tiles(0.0, &[], &geometry, 100.0).is_empty());
        assert!(visible_tiles(0.0, &[1], &geometry, 0.0).is_empty());
    }

    #[test]
    fn test_marker_covers_target_at_rest() {
        let geometry = StripGeometry::default();
        let numbers = [5, 6, 7, 8];
        let offset = geometry.resting_offset(2);

        let tile = tile_covering(geometry.alignment_x, offset, &numbers, &geometry);
        assert_eq!(tile.map(|t| t.value), Some(7));
        let tile = tile.unwrap();
        assert_eq!(tile.x + tile.width / 2.0, geometry.alignment_x);
    }

    #[test]
    fn test_gap_covers_nothing() {
        let geometry = StripGeometry::default();
        assert_eq!(tile_covering(65.0, 0.0, &[1, 2], &geometry), None);
    }
}
