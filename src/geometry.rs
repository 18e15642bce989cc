//! Grid geometry: cells, footprints and grid dimensions
//!
//! Everything here is in whole grid cells. Pixel and world coordinates are
//! converted at the boundary (see `layout`) before they reach the grid.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::inventory::InventoryError;

/// A grid cell coordinate
///
/// Signed so that a candidate anchor computed from a pointer left of or above
/// the panel is still representable (and simply rejected as out of bounds).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const ORIGIN: Cell = Cell { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Cell { x, y }
    }

    /// Returns this cell shifted by (dx, dy)
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Cell {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Width x height extent of an item, in whole cells (both >= 1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawExtent", into = "RawExtent")]
pub struct Footprint {
    width: u32,
    height: u32,
}

impl Footprint {
    /// 1x1
    pub const UNIT: Footprint = Footprint { width: 1, height: 1 };

    /// Creates a footprint, rejecting zero-sized extents
    pub fn new(width: u32, height: u32) -> Result<Self, InventoryError> {
        if width == 0 || height == 0 {
            return Err(InventoryError::InvalidFootprint { width, height });
        }
        Ok(Footprint { width, height })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of cells covered
    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// Every cell covered when anchored at `anchor`, in row-major order
    ///
    /// Only meaningful once `GridSize::fits` has accepted the placement; a
    /// footprint wider than `i32::MAX` yields no cells.
    pub fn cells_at(self, anchor: Cell) -> impl Iterator<Item = Cell> {
        (0..self.height as i32)
            .flat_map(move |dy| (0..self.width as i32).map(move |dx| anchor.offset(dx, dy)))
    }
}

impl fmt::Display for Footprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Fixed dimensions of an inventory grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawExtent", into = "RawExtent")]
pub struct GridSize {
    width: u32,
    height: u32,
}

impl GridSize {
    /// Largest width or height; every in-bounds cell must fit in a `Cell`
    pub const MAX_DIMENSION: u32 = i32::MAX as u32;

    pub fn new(width: u32, height: u32) -> Result<Self, InventoryError> {
        if width == 0 || height == 0 || width > Self::MAX_DIMENSION || height > Self::MAX_DIMENSION {
            return Err(InventoryError::InvalidGridSize { width, height });
        }
        Ok(GridSize { width, height })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// True if `cell` lies within `[0, width) x [0, height)`
    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && (cell.x as u32) < self.width && (cell.y as u32) < self.height
    }

    /// True if the whole footprint anchored at `anchor` is inside the grid
    pub fn fits(&self, footprint: Footprint, anchor: Cell) -> bool {
        self.contains(anchor)
            && u64::from(anchor.x as u32) + u64::from(footprint.width()) <= u64::from(self.width)
            && u64::from(anchor.y as u32) + u64::from(footprint.height()) <= u64::from(self.height)
    }

    /// All cells in reading order: x fastest, then y ascending
    pub fn cells(self) -> impl Iterator<Item = Cell> {
        (0..self.height as i32).flat_map(move |y| (0..self.width as i32).map(move |x| Cell::new(x, y)))
    }
}

/// Shared serde shape for `Footprint` and `GridSize` so that deserialization
/// goes through the validating constructors.
#[derive(Serialize, Deserialize)]
struct RawExtent {
    width: u32,
    height: u32,
}

impl TryFrom<RawExtent> for Footprint {
    type Error = InventoryError;

    fn try_from(raw: RawExtent) -> Result<Self, Self::Error> {
        Footprint::new(raw.width, raw.height)
    }
}

impl From<Footprint> for RawExtent {
    fn from(footprint: Footprint) -> Self {
        RawExtent {
            width: footprint.width,
            height: footprint.height,
        }
    }
}

impl TryFrom<RawExtent> for GridSize {
    type Error = InventoryError;

    fn try_from(raw: RawExtent) -> Result<Self, Self::Error> {
        GridSize::new(raw.width, raw.height)
    }
}

impl From<GridSize> for RawExtent {
    fn from(size: GridSize) -> Self {
        RawExtent {
            width: size.width,
            height: size.height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_footprint_rejects_zero() {
        assert!(Footprint::new(0, 2).is_err());
        assert!(Footprint::new(2, 0).is_err());
        assert!(Footprint::new(1, 1).is_ok());
    }

    #[test]
    fn test_footprint_cells_row_major() {
        let fp = Footprint::new(2, 2).unwrap();
        let cells: Vec<Cell> = fp.cells_at(Cell::new(1, 3)).collect();

        assert_eq!(
            cells,
            vec![Cell::new(1, 3), Cell::new(2, 3), Cell::new(1, 4), Cell::new(2, 4)]
        );
    }

    #[test]
    fn test_grid_bounds() {
        let grid = GridSize::new(4, 3).unwrap();

        assert!(grid.contains(Cell::new(3, 2)));
        assert!(!grid.contains(Cell::new(4, 0)));
        assert!(!grid.contains(Cell::new(0, -1)));

        let tall = Footprint::new(1, 3).unwrap();
        assert!(grid.fits(tall, Cell::new(3, 0)));
        assert!(!grid.fits(tall, Cell::new(3, 1)));
        assert!(!grid.fits(tall, Cell::new(-1, 0)));
    }

    #[test]
    fn test_grid_cells_reading_order() {
        let grid = GridSize::new(2, 2).unwrap();
        let cells: Vec<Cell> = grid.cells().collect();

        assert_eq!(
            cells,
            vec![Cell::new(0, 0), Cell::new(1, 0), Cell::new(0, 1), Cell::new(1, 1)]
        );
    }

    #[test]
    fn test_huge_footprint_never_fits() {
        let grid = GridSize::new(4, 4).unwrap();
        let wide = Footprint::new(u32::MAX, 1).unwrap();
        let tall = Footprint::new(1, u32::MAX).unwrap();

        assert!(!grid.fits(wide, Cell::new(1, 0)));
        assert!(!grid.fits(tall, Cell::new(0, 3)));
        assert_eq!(wide.area(), u64::from(u32::MAX));
    }

    #[test]
    fn test_grid_dimension_limits() {
        assert!(GridSize::new(GridSize::MAX_DIMENSION, 1).is_ok());
        assert!(GridSize::new(GridSize::MAX_DIMENSION + 1, 1).is_err());

        let big = GridSize::new(70_000, 70_000).unwrap();
        assert_eq!(big.area(), 4_900_000_000);
    }

    #[test]
    fn test_footprint_deserialize_validates() {
        let ok: Footprint = serde_json::from_str(r#"{"width":2,"height":3}"#).unwrap();
        assert_eq!(ok, Footprint::new(2, 3).unwrap());

        let bad: Result<Footprint, _> = serde_json::from_str(r#"{"width":0,"height":3}"#);
        assert!(bad.is_err());
    }
}
