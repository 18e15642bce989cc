//! Conversion between panel coordinates and grid cells
//!
//! The grid itself only knows cells. Whoever draws it works in panel-local
//! units (origin at the panel's minimum corner) and goes through a
//! `TileLayout` to get footprints from rendered sizes, anchors from pointer
//! positions, and draw positions back from anchors.

use serde::{Deserialize, Serialize};

use crate::geometry::{Cell, Footprint, GridSize};

/// A position in panel-local units
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Point { x, y }
    }
}

/// Size of one grid cell in panel units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TileLayout {
    pub tile_width: f32,
    pub tile_height: f32,
}

impl Default for TileLayout {
    fn default() -> Self {
        TileLayout {
            tile_width: 32.0,
            tile_height: 32.0,
        }
    }
}

impl TileLayout {
    pub fn new(tile_width: f32, tile_height: f32) -> Self {
        TileLayout {
            tile_width,
            tile_height,
        }
    }

    /// Footprint covering a rendered size: partial tiles round up, and
    /// nothing is smaller than one cell
    pub fn footprint_for_size(&self, width: f32, height: f32) -> Footprint {
        let w = tiles_covering(width, self.tile_width);
        let h = tiles_covering(height, self.tile_height);
        Footprint::new(w, h).unwrap_or(Footprint::UNIT)
    }

    /// Offset from a rect's minimum corner to its pivot
    ///
    /// `pivot` is normalized: (0, 0) is the min corner, (0.5, 0.5) the center.
    pub fn pivot_offset(pivot: Point, size: Point) -> Point {
        Point::new(pivot.x * size.x, pivot.y * size.y)
    }

    /// Cell under a pivot position
    pub fn cell_at(&self, point: Point, pivot_offset: Point) -> Cell {
        Cell::new(
            ((point.x - pivot_offset.x) / self.tile_width).floor() as i32,
            ((point.y - pivot_offset.y) / self.tile_height).floor() as i32,
        )
    }

    /// Pivot position for an item anchored at `anchor`
    pub fn position_of(&self, anchor: Cell, pivot_offset: Point) -> Point {
        Point::new(
            anchor.x as f32 * self.tile_width + pivot_offset.x,
            anchor.y as f32 * self.tile_height + pivot_offset.y,
        )
    }

    /// Panel extent for a grid of `size`
    pub fn panel_size(&self, size: GridSize) -> Point {
        Point::new(
            size.width() as f32 * self.tile_width,
            size.height() as f32 * self.tile_height,
        )
    }

    /// True if `point` lies on the panel, edges included
    pub fn contains_point(&self, size: GridSize, point: Point) -> bool {
        let panel = self.panel_size(size);
        point.x >= 0.0 && point.x <= panel.x && point.y >= 0.0 && point.y <= panel.y
    }
}

fn tiles_covering(length: f32, tile: f32) -> u32 {
    let tiles = (length / tile).ceil();
    // NaN and negatives land here too
    if tiles >= 1.0 { tiles as u32 } else { 1 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_footprint_rounds_up() {
        let layout = TileLayout::new(50.0, 50.0);
        assert_eq!(layout.footprint_for_size(100.0, 150.0), Footprint::new(2, 3).unwrap());
        assert_eq!(layout.footprint_for_size(101.0, 49.0), Footprint::new(3, 1).unwrap());
        assert_eq!(layout.footprint_for_size(0.0, -10.0), Footprint::UNIT);
    }

    #[test]
    fn test_cell_at_floors() {
        let layout = TileLayout::new(50.0, 50.0);
        assert_eq!(layout.cell_at(Point::new(49.9, 50.0), Point::ZERO), Cell::new(0, 1));
        assert_eq!(layout.cell_at(Point::new(-0.5, 10.0), Point::ZERO), Cell::new(-1, 0));

        // Centered 2x2 item: pivot sits half the item in from the corner
        let offset = TileLayout::pivot_offset(Point::new(0.5, 0.5), Point::new(100.0, 100.0));
        assert_eq!(offset, Point::new(50.0, 50.0));
        assert_eq!(layout.cell_at(Point::new(150.0, 100.0), offset), Cell::new(2, 1));
    }

    #[test]
    fn test_position_round_trip() {
        let layout = TileLayout::new(32.0, 48.0);
        let offset = Point::new(16.0, 24.0);
        let anchor = Cell::new(3, 2);

        let pos = layout.position_of(anchor, offset);
        assert_eq!(pos, Point::new(112.0, 120.0));
        assert_eq!(layout.cell_at(pos, offset), anchor);
    }

    #[test]
    fn test_contains_point_edges() {
        let layout = TileLayout::new(50.0, 50.0);
        let size = GridSize::new(8, 4).unwrap();

        assert!(layout.contains_point(size, Point::ZERO));
        assert!(layout.contains_point(size, Point::new(400.0, 200.0)));
        assert!(!layout.contains_point(size, Point::new(400.1, 10.0)));
        assert!(!layout.contains_point(size, Point::new(10.0, -0.1)));
    }
}
