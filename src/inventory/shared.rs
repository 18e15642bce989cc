//! Thread-shareable grid handle
//!
//! The grid itself is single-threaded. Embedders that touch one grid from
//! several threads share it through this handle: one coarse lock per grid,
//! held for the duration of a single operation.

use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use super::grid::GridInventory;
use crate::geometry::{Cell, Footprint};
use crate::item::ItemId;

/// Cloneable handle to a grid behind a mutex
#[derive(Clone, Debug)]
pub struct SharedInventory {
    inner: Arc<Mutex<GridInventory>>,
}

impl SharedInventory {
    pub fn new(grid: GridInventory) -> Self {
        SharedInventory {
            inner: Arc::new(Mutex::new(grid)),
        }
    }

    /// Locks the grid for a sequence of operations
    pub fn lock(&self) -> MutexGuard<'_, GridInventory> {
        self.inner.lock()
    }

    pub fn can_place(&self, item: ItemId, footprint: Footprint, anchor: Cell) -> bool {
        self.inner.lock().can_place(item, footprint, anchor)
    }

    pub fn place(&self, item: ItemId, footprint: Footprint, anchor: Cell) -> bool {
        self.inner.lock().place(item, footprint, anchor)
    }

    pub fn remove(&self, item: ItemId) -> bool {
        self.inner.lock().remove(item).is_some()
    }

    pub fn find_first_fit(&self, footprint: Footprint) -> Option<Cell> {
        self.inner.lock().find_first_fit(footprint)
    }

    /// First-fit search and placement under one lock
    pub fn insert(&self, item: ItemId, footprint: Footprint) -> Option<Cell> {
        self.inner.lock().insert(item, footprint)
    }

    pub fn sort_all(&self, items: &[(ItemId, Footprint)]) -> bool {
        self.inner.lock().sort_all(items)
    }

    pub fn placements(&self) -> Vec<(ItemId, Cell)> {
        self.inner.lock().placements()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::GridSize;
    use std::thread;

    #[test]
    fn test_concurrent_inserts_never_overlap() {
        let shared = SharedInventory::new(GridInventory::new(GridSize::new(8, 8).unwrap()));

        let handles: Vec<_> = (0..4u64)
            .map(|t| {
                let inv = shared.clone();
                thread::spawn(move || {
                    for i in 0..4u64 {
                        let item = ItemId(t * 100 + i);
                        assert!(inv.insert(item, Footprint::new(2, 2).unwrap()).is_some());
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let grid = shared.lock();
        assert_eq!(grid.len(), 16);
        assert_eq!(grid.free_cell_count(), 0);
        assert!(grid.check_consistency().is_ok());
    }
}
