use crate::equipment::EquipmentSlot;
use crate::geometry::{Cell, Footprint};
use crate::item::ItemId;
use thiserror::Error;

/// Errors that can occur during inventory operations
///
/// The core grid reports plain booleans; these name the reason behind a
/// `false` for callers that want it (logging, UI hints).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    /// Footprint with a zero dimension
    #[error("invalid footprint {width}x{height}: both dimensions must be at least 1")]
    InvalidFootprint { width: u32, height: u32 },

    /// Grid with a zero dimension
    #[error("invalid grid size {width}x{height}: dimensions must be between 1 and {max}", max = crate::geometry::GridSize::MAX_DIMENSION)]
    InvalidGridSize { width: u32, height: u32 },

    /// Part of the footprint falls outside the grid
    #[error("footprint {footprint} at {anchor} extends beyond the grid")]
    OutOfBounds { anchor: Cell, footprint: Footprint },

    /// A cell under the footprint belongs to another item
    #[error("cell {cell} is already occupied by item {occupant}")]
    Occupied { cell: Cell, occupant: ItemId },

    /// Item is already placed with a different footprint (items never resize)
    #[error("item {item} is placed as {placed}, cannot re-place as {requested}")]
    FootprintMismatch {
        item: ItemId,
        placed: Footprint,
        requested: Footprint,
    },

    /// Item ID doesn't exist in the inventory or registry
    #[error("unknown item: {0}")]
    UnknownItem(String),

    /// Registry already has an item with this ID
    #[error("item '{0}' already registered")]
    DuplicateItem(String),

    /// Item can't go into the requested equipment slot
    #[error("item {item} can't be equipped in {slot:?}")]
    WrongSlot { item: ItemId, slot: EquipmentSlot },

    /// Every item id has been handed out
    #[error("no item ids left")]
    IdsExhausted,

    /// No anchor in the grid can take the footprint
    #[error("no free space for a {0} item")]
    NoSpace(Footprint),
}
