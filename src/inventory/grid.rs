//! Grid occupancy core
//!
//! `GridInventory` owns two maps that must always agree:
//! - the occupancy map (cell -> item), sparse, absent = free
//! - the placement index (item -> anchor + footprint)
//!
//! Every mutation validates first and writes second, so a rejected call never
//! leaves a partially written or partially vacated footprint behind.

use std::collections::HashMap;
use std::fmt;

use log::debug;

use super::error::InventoryError;
use super::event::{InventoryEvent, Listener};
use crate::geometry::{Cell, Footprint, GridSize};
use crate::item::ItemId;

/// Where an item sits on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Minimum-coordinate (top-left) cell
    pub anchor: Cell,
    pub footprint: Footprint,
}

impl Placement {
    /// Every cell this placement covers
    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        self.footprint.cells_at(self.anchor)
    }
}

/// Fixed-size grid of cells holding multi-cell items
pub struct GridInventory {
    size: GridSize,
    cells: HashMap<Cell, ItemId>,
    placements: HashMap<ItemId, Placement>,
    listeners: Vec<Listener>,
}

impl GridInventory {
    /// Creates an empty grid with the given dimensions
    pub fn new(size: GridSize) -> Self {
        GridInventory {
            size,
            cells: HashMap::new(),
            placements: HashMap::new(),
            listeners: Vec::new(),
        }
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    /// Registers a listener called after every successful mutation
    pub fn subscribe(&mut self, listener: impl FnMut(&InventoryEvent) + Send + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub(super) fn emit(&mut self, event: InventoryEvent) {
        for listener in self.listeners.iter_mut() {
            listener(&event);
        }
    }

    // ======================================================================
    // Queries
    // ======================================================================

    /// Number of items on the grid
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    pub fn contains(&self, item: ItemId) -> bool {
        self.placements.contains_key(&item)
    }

    pub fn anchor_of(&self, item: ItemId) -> Option<Cell> {
        self.placements.get(&item).map(|p| p.anchor)
    }

    pub fn footprint_of(&self, item: ItemId) -> Option<Footprint> {
        self.placements.get(&item).map(|p| p.footprint)
    }

    pub fn placement_of(&self, item: ItemId) -> Option<Placement> {
        self.placements.get(&item).copied()
    }

    /// Item covering `cell`, if any
    pub fn occupant_at(&self, cell: Cell) -> Option<ItemId> {
        self.cells.get(&cell).copied()
    }

    pub fn free_cell_count(&self) -> usize {
        self.size.area().saturating_sub(self.cells.len() as u64) as usize
    }

    /// Every placed item with its anchor, ordered by item id
    ///
    /// This is what a renderer needs after a mutation: draw each item at
    /// `anchor * tile_size + pivot_offset`.
    pub fn placements(&self) -> Vec<(ItemId, Cell)> {
        let mut out: Vec<(ItemId, Cell)> = self
            .placements
            .iter()
            .map(|(&item, p)| (item, p.anchor))
            .collect();
        out.sort_by_key(|&(item, _)| item);
        out
    }

    /// Raw occupancy map (cell -> item)
    pub fn occupancy(&self) -> &HashMap<Cell, ItemId> {
        &self.cells
    }

    /// Raw placement index (item -> placement)
    pub fn placement_index(&self) -> &HashMap<ItemId, Placement> {
        &self.placements
    }

    // ======================================================================
    // Placement
    // ======================================================================

    /// Explains why `item` can't go at `anchor`, or `Ok` if it can
    ///
    /// Cells already covered by `item` itself count as free, so checking an
    /// item against its own (or an overlapping) position succeeds.
    pub fn check_placement(
        &self,
        item: ItemId,
        footprint: Footprint,
        anchor: Cell,
    ) -> Result<(), InventoryError> {
        if let Some(existing) = self.placements.get(&item) {
            if existing.footprint != footprint {
                return Err(InventoryError::FootprintMismatch {
                    item,
                    placed: existing.footprint,
                    requested: footprint,
                });
            }
        }

        if !self.size.fits(footprint, anchor) {
            return Err(InventoryError::OutOfBounds { anchor, footprint });
        }

        for cell in footprint.cells_at(anchor) {
            if let Some(&occupant) = self.cells.get(&cell) {
                if occupant != item {
                    return Err(InventoryError::Occupied { cell, occupant });
                }
            }
        }

        Ok(())
    }

    /// True if `item` could be placed at `anchor` right now
    pub fn can_place(&self, item: ItemId, footprint: Footprint, anchor: Cell) -> bool {
        self.check_placement(item, footprint, anchor).is_ok()
    }

    /// Places (or moves) `item` so its top-left cell is `anchor`
    ///
    /// All or nothing: on error the grid is exactly as it was before the call,
    /// including the item's old position.
    pub fn try_place(
        &mut self,
        item: ItemId,
        footprint: Footprint,
        anchor: Cell,
    ) -> Result<(), InventoryError> {
        self.check_placement(item, footprint, anchor)?;

        let previous = self.placements.get(&item).copied();
        if previous.map(|p| p.anchor) == Some(anchor) {
            // Already there
            return Ok(());
        }

        if let Some(old) = previous {
            self.vacate(item, old);
        }

        for cell in footprint.cells_at(anchor) {
            self.cells.insert(cell, item);
        }
        self.placements.insert(item, Placement { anchor, footprint });

        debug!("Placed item {} ({}) at {}", item, footprint, anchor);
        self.emit(InventoryEvent::Placed {
            item,
            anchor,
            previous: previous.map(|p| p.anchor),
        });
        Ok(())
    }

    /// Boolean form of [`try_place`](Self::try_place)
    pub fn place(&mut self, item: ItemId, footprint: Footprint, anchor: Cell) -> bool {
        match self.try_place(item, footprint, anchor) {
            Ok(()) => true,
            Err(e) => {
                debug!("Placement rejected: {}", e);
                false
            }
        }
    }

    /// Takes `item` off the grid, returning where it was
    ///
    /// No-op (returns `None`) if the item isn't placed.
    pub fn remove(&mut self, item: ItemId) -> Option<Placement> {
        let placement = self.placements.remove(&item)?;
        self.vacate(item, placement);

        debug!("Removed item {} from {}", item, placement.anchor);
        self.emit(InventoryEvent::Removed {
            item,
            anchor: placement.anchor,
        });
        Some(placement)
    }

    /// Clears the cells of `placement` that still point at `item`
    fn vacate(&mut self, item: ItemId, placement: Placement) {
        for cell in placement.cells() {
            if self.cells.get(&cell) == Some(&item) {
                self.cells.remove(&cell);
            }
        }
    }

    /// Removes every item
    pub fn clear(&mut self) {
        if self.placements.is_empty() {
            return;
        }
        self.cells.clear();
        self.placements.clear();
        self.emit(InventoryEvent::Cleared);
    }

    // ======================================================================
    // Searching
    // ======================================================================

    /// True if every cell under the footprint is in bounds and unoccupied
    pub fn is_area_free(&self, footprint: Footprint, anchor: Cell) -> bool {
        self.size.fits(footprint, anchor)
            && footprint.cells_at(anchor).all(|cell| !self.cells.contains_key(&cell))
    }

    /// First anchor, in reading order, where a new item of this size fits
    ///
    /// Scans y from 0, x fastest within each row. Occupied cells block
    /// regardless of owner.
    pub fn find_first_fit(&self, footprint: Footprint) -> Option<Cell> {
        self.size
            .cells()
            .find(|&anchor| self.is_area_free(footprint, anchor))
    }

    /// Finds the first fitting anchor and places `item` there
    pub fn insert(&mut self, item: ItemId, footprint: Footprint) -> Option<Cell> {
        let anchor = self.find_first_fit(footprint)?;
        if self.place(item, footprint, anchor) {
            Some(anchor)
        } else {
            None
        }
    }

    /// Like [`insert`](Self::insert) but reports `NoSpace`
    pub fn try_insert(&mut self, item: ItemId, footprint: Footprint) -> Result<Cell, InventoryError> {
        let anchor = self
            .find_first_fit(footprint)
            .ok_or(InventoryError::NoSpace(footprint))?;
        self.try_place(item, footprint, anchor)?;
        Ok(anchor)
    }

    // ======================================================================
    // Internal - used by the sorter
    // ======================================================================

    /// Replaces the whole layout in one step
    pub(super) fn replace_layout(&mut self, layout: Vec<(ItemId, Placement)>) {
        self.cells.clear();
        self.placements.clear();
        for (item, placement) in layout {
            for cell in placement.cells() {
                self.cells.insert(cell, item);
            }
            self.placements.insert(item, placement);
        }
    }

    /// Verifies that the occupancy map and placement index agree
    ///
    /// Returns a description of the first inconsistency found.
    pub fn check_consistency(&self) -> Result<(), String> {
        let mut covered = 0usize;

        for (&item, placement) in &self.placements {
            if !self.size.fits(placement.footprint, placement.anchor) {
                return Err(format!("item {} is out of bounds at {}", item, placement.anchor));
            }
            for cell in placement.cells() {
                match self.cells.get(&cell) {
                    Some(&occupant) if occupant == item => covered += 1,
                    Some(&occupant) => {
                        return Err(format!(
                            "cell {} of item {} is claimed by item {}",
                            cell, item, occupant
                        ));
                    }
                    None => {
                        return Err(format!("cell {} of item {} is not registered", cell, item));
                    }
                }
            }
        }

        if covered != self.cells.len() {
            return Err(format!(
                "{} occupied cells but placements only cover {}",
                self.cells.len(),
                covered
            ));
        }

        Ok(())
    }
}

impl fmt::Debug for GridInventory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridInventory")
            .field("size", &self.size)
            .field("placements", &self.placements)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
