//! Headless drag and drop
//!
//! Mirrors what an inventory panel does with the pointer: pick an item up,
//! snap it to the cell under the pointer while it moves, and on release
//! either place it there or send it back to where it came from. The grid is
//! untouched until the drop.

use log::debug;

use crate::geometry::Cell;
use crate::inventory::{InventoryError, ItemLocation, PlayerInventory};
use crate::item::ItemId;
use crate::layout::{Point, TileLayout};

/// Where the dragged item would land if released now
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropPreview {
    pub cell: Cell,
    /// Draw position for the item at `cell`
    pub position: Point,
    /// Inside the panel and clear of other items
    pub valid: bool,
}

/// Result of releasing the item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// Placed at this anchor
    Placed(Cell),
    /// Rejected; the item is back at its previous anchor (`None` if it was
    /// parked)
    Reverted(Option<Cell>),
}

/// One item being dragged
#[derive(Debug, Clone)]
pub struct DragSession {
    item: ItemId,
    layout: TileLayout,
    pivot_offset: Point,
    previous: Option<Cell>,
}

impl DragSession {
    /// Picks up `item`, remembering where it was
    ///
    /// `item_size` and `pivot` describe the item's rendered rect, used to
    /// offset draw positions. Equipped items can't be dragged onto the grid.
    pub fn begin(
        inventory: &PlayerInventory,
        layout: TileLayout,
        item: ItemId,
        item_size: Point,
        pivot: Point,
    ) -> Result<Self, InventoryError> {
        let previous = match inventory.location(item) {
            Some(ItemLocation::Grid(anchor)) => Some(anchor),
            Some(ItemLocation::Parked) => None,
            Some(ItemLocation::Equipped(slot)) => {
                return Err(InventoryError::WrongSlot { item, slot });
            }
            None => return Err(InventoryError::UnknownItem(item.to_string())),
        };

        debug!("Drag started for item {} from {:?}", item, previous);
        Ok(DragSession {
            item,
            layout,
            pivot_offset: TileLayout::pivot_offset(pivot, item_size),
            previous,
        })
    }

    pub fn item(&self) -> ItemId {
        self.item
    }

    /// Anchor the item had when the drag started
    pub fn previous(&self) -> Option<Cell> {
        self.previous
    }

    /// Snaps `point` to a cell and reports whether a drop there would work
    pub fn hover(&self, inventory: &PlayerInventory, point: Point) -> DropPreview {
        let grid = inventory.grid();
        let cell = self.layout.cell_at(point, Point::ZERO);
        let valid = self.layout.contains_point(grid.size(), point)
            && inventory
                .item(self.item)
                .is_some_and(|i| grid.can_place(self.item, i.footprint, cell));

        DropPreview {
            cell,
            position: self.layout.position_of(cell, self.pivot_offset),
            valid,
        }
    }

    /// Releases the item at `point`
    pub fn drop(self, inventory: &mut PlayerInventory, point: Point) -> DropOutcome {
        let preview = self.hover(inventory, point);
        if preview.valid && inventory.move_item(self.item, preview.cell) {
            debug!("Item {} dropped at {}", self.item, preview.cell);
            return DropOutcome::Placed(preview.cell);
        }

        debug!("Item {} returned due to invalid placement", self.item);
        DropOutcome::Reverted(self.previous)
    }

    /// Abandons the drag; nothing moved
    pub fn cancel(self) -> Option<Cell> {
        self.previous
    }
}
