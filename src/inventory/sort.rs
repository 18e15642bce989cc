//! Bin-packing repack
//!
//! Clears the grid and re-inserts every held item greedily: each item, in a
//! fixed order, goes to the first anchor in reading order whose whole
//! footprint is still free. Two orders are tried:
//! 1. tallest first, then widest
//! 2. widest first, then tallest
//!
//! A pass stops at the first item that doesn't fit. The layout is computed
//! off to the side and only committed when a pass places everything, so a
//! failed sort leaves the grid untouched.

use std::collections::HashSet;

use log::{info, warn};

use super::event::InventoryEvent;
use super::grid::{GridInventory, Placement};
use crate::geometry::{Cell, Footprint, GridSize};
use crate::item::ItemId;

/// Placement order used by a sort pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Descending height, ties by descending width
    HeightFirst,
    /// Descending width, ties by descending height
    WidthFirst,
}

impl SortOrder {
    /// Orders tried by `sort_all`, in sequence
    pub const PASSES: [SortOrder; 2] = [SortOrder::HeightFirst, SortOrder::WidthFirst];

    /// Sorts `items` into this pass's placement order
    ///
    /// Stable, so items with identical footprints keep their input order.
    pub fn arrange(self, items: &mut [(ItemId, Footprint)]) {
        match self {
            SortOrder::HeightFirst => items.sort_by(|(_, a), (_, b)| {
                b.height().cmp(&a.height()).then(b.width().cmp(&a.width()))
            }),
            SortOrder::WidthFirst => items.sort_by(|(_, a), (_, b)| {
                b.width().cmp(&a.width()).then(b.height().cmp(&a.height()))
            }),
        }
    }
}

/// Free-cell bitmap used while packing
struct FreeCells {
    size: GridSize,
    free: Vec<bool>,
}

impl FreeCells {
    fn new(size: GridSize) -> Self {
        FreeCells {
            size,
            free: vec![true; size.area() as usize],
        }
    }

    fn index(&self, cell: Cell) -> usize {
        cell.y as usize * self.size.width() as usize + cell.x as usize
    }

    fn is_free(&self, cell: Cell) -> bool {
        self.size.contains(cell) && self.free[self.index(cell)]
    }

    fn area_free(&self, footprint: Footprint, anchor: Cell) -> bool {
        self.size.fits(footprint, anchor) && footprint.cells_at(anchor).all(|c| self.is_free(c))
    }

    fn take(&mut self, footprint: Footprint, anchor: Cell) {
        for cell in footprint.cells_at(anchor) {
            let i = self.index(cell);
            self.free[i] = false;
        }
    }

    /// First free anchor in reading order that can take the footprint
    fn first_fit(&self, footprint: Footprint) -> Option<Cell> {
        self.size
            .cells()
            .filter(|&anchor| self.is_free(anchor))
            .find(|&anchor| self.area_free(footprint, anchor))
    }
}

/// Packs `items` onto an empty grid of `size` in the given order
///
/// Returns the full layout, or `None` as soon as one item doesn't fit.
pub fn pack(
    size: GridSize,
    items: &[(ItemId, Footprint)],
    order: SortOrder,
) -> Option<Vec<(ItemId, Placement)>> {
    let mut ordered = items.to_vec();
    order.arrange(&mut ordered);

    let mut free = FreeCells::new(size);
    let mut layout = Vec::with_capacity(ordered.len());

    for (item, footprint) in ordered {
        let Some(anchor) = free.first_fit(footprint) else {
            warn!(
                "{:?} pass: could not place item {} ({})",
                order, item, footprint
            );
            return None;
        };
        free.take(footprint, anchor);
        layout.push((item, Placement { anchor, footprint }));
    }

    Some(layout)
}

impl GridInventory {
    /// Repacks the grid with exactly `items`
    ///
    /// `items` is the complete held set: anything on the grid that isn't
    /// listed is dropped from the grid on success. Duplicate ids, and items
    /// listed with a different footprint than they are placed with, are
    /// rejected.
    /// Returns false (grid unchanged) when neither order places every item.
    pub fn sort_all(&mut self, items: &[(ItemId, Footprint)]) -> bool {
        self.try_sort_all(items).is_some()
    }

    /// Like [`sort_all`](Self::sort_all) but reports which order succeeded
    pub fn try_sort_all(&mut self, items: &[(ItemId, Footprint)]) -> Option<SortOrder> {
        let mut seen = HashSet::with_capacity(items.len());
        for &(item, footprint) in items {
            if !seen.insert(item) {
                warn!("Sort rejected: item {} listed twice", item);
                return None;
            }
            // Items never resize, sorting included
            if let Some(placed) = self.footprint_of(item).filter(|&p| p != footprint) {
                warn!(
                    "Sort rejected: item {} is placed as {}, listed as {}",
                    item, placed, footprint
                );
                return None;
            }
        }

        info!("Sorting {} items", items.len());

        for order in SortOrder::PASSES {
            if let Some(layout) = pack(self.size(), items, order) {
                self.replace_layout(layout);
                let placements = self.placements();
                info!("Inventory sort completed ({:?})", order);
                self.emit(InventoryEvent::Sorted { order, placements });
                return Some(order);
            }
        }

        warn!("Inventory sort failed under every order; layout left unchanged");
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fp(w: u32, h: u32) -> Footprint {
        Footprint::new(w, h).unwrap()
    }

    fn grid(w: u32, h: u32) -> GridInventory {
        GridInventory::new(GridSize::new(w, h).unwrap())
    }

    fn assert_valid(inv: &GridInventory, items: &[(ItemId, Footprint)]) {
        inv.check_consistency().unwrap();
        assert_eq!(inv.len(), items.len());
        for (item, footprint) in items {
            assert_eq!(inv.footprint_of(*item), Some(*footprint));
        }
    }

    #[test]
    fn test_height_first_order() {
        let mut items = vec![
            (ItemId(1), fp(3, 1)),
            (ItemId(2), fp(1, 3)),
            (ItemId(3), fp(2, 3)),
            (ItemId(4), fp(2, 2)),
        ];
        SortOrder::HeightFirst.arrange(&mut items);
        let ids: Vec<u64> = items.iter().map(|(id, _)| id.0).collect();
        assert_eq!(ids, vec![3, 2, 4, 1]);

        SortOrder::WidthFirst.arrange(&mut items);
        let ids: Vec<u64> = items.iter().map(|(id, _)| id.0).collect();
        assert_eq!(ids, vec![1, 3, 4, 2]);
    }

    #[test]
    fn test_sort_repacks_fragmented_grid() {
        // Sword placed in the middle leaves no 2x2 hole for the shield
        let sword = ItemId(1);
        let shield = ItemId(2);
        let mut inv = grid(3, 3);
        assert!(inv.place(sword, fp(1, 3), Cell::new(1, 0)));
        assert_eq!(inv.find_first_fit(fp(2, 2)), None);

        let items = [(sword, fp(1, 3)), (shield, fp(2, 2))];
        assert_eq!(inv.try_sort_all(&items), Some(SortOrder::HeightFirst));

        assert_eq!(inv.anchor_of(sword), Some(Cell::new(0, 0)));
        assert_eq!(inv.anchor_of(shield), Some(Cell::new(1, 0)));
        assert_valid(&inv, &items);
    }

    #[test]
    fn test_sort_falls_back_to_width_first() {
        // Height first: pole (0,0), block (0,3), post (1,0), then the last
        // post has no two free cells stacked. Width first packs everything.
        let post_a = ItemId(1);
        let post_b = ItemId(2);
        let block = ItemId(3);
        let pole = ItemId(4);
        let items = [
            (post_a, fp(1, 2)),
            (post_b, fp(1, 2)),
            (block, fp(2, 2)),
            (pole, fp(1, 3)),
        ];
        let size = GridSize::new(2, 6).unwrap();
        assert!(pack(size, &items, SortOrder::HeightFirst).is_none());

        let mut inv = GridInventory::new(size);
        assert_eq!(inv.try_sort_all(&items), Some(SortOrder::WidthFirst));

        assert_eq!(inv.anchor_of(block), Some(Cell::new(0, 0)));
        assert_eq!(inv.anchor_of(pole), Some(Cell::new(0, 2)));
        assert_eq!(inv.anchor_of(post_a), Some(Cell::new(1, 2)));
        assert_eq!(inv.anchor_of(post_b), Some(Cell::new(1, 4)));
        assert_valid(&inv, &items);
    }

    #[test]
    fn test_sort_fails_when_no_order_fits() {
        // A 4x1 bar and a 1x2 post always cross on a 4x2 grid
        let mut inv = grid(4, 2);
        assert!(inv.place(ItemId(3), fp(2, 1), Cell::new(2, 1)));
        let before = inv.occupancy().clone();

        let items = [(ItemId(1), fp(1, 2)), (ItemId(2), fp(4, 1)), (ItemId(3), fp(2, 1))];
        assert!(!inv.sort_all(&items));
        assert_eq!(inv.occupancy(), &before);
        assert_eq!(inv.anchor_of(ItemId(3)), Some(Cell::new(2, 1)));
    }

    #[test]
    fn test_pack_each_order() {
        let size = GridSize::new(4, 3).unwrap();
        let items = [(ItemId(1), fp(1, 2)), (ItemId(2), fp(4, 1)), (ItemId(3), fp(3, 2))];

        let height = pack(size, &items, SortOrder::HeightFirst).unwrap();
        let anchors: Vec<(u64, Cell)> = height.iter().map(|(id, p)| (id.0, p.anchor)).collect();
        assert_eq!(
            anchors,
            vec![(3, Cell::new(0, 0)), (1, Cell::new(3, 0)), (2, Cell::new(0, 2))]
        );

        let width = pack(size, &items, SortOrder::WidthFirst).unwrap();
        let anchors: Vec<(u64, Cell)> = width.iter().map(|(id, p)| (id.0, p.anchor)).collect();
        assert_eq!(
            anchors,
            vec![(2, Cell::new(0, 0)), (3, Cell::new(0, 1)), (1, Cell::new(3, 1))]
        );
    }

    #[test]
    fn test_failed_sort_leaves_grid_untouched() {
        let mut inv = grid(2, 2);
        assert!(inv.place(ItemId(1), fp(1, 2), Cell::new(1, 0)));

        let cells_before = inv.occupancy().clone();
        let index_before = inv.placement_index().clone();

        // 1x2 and 2x1 always cross on a 2x2 grid
        let items = [(ItemId(1), fp(1, 2)), (ItemId(2), fp(2, 1))];
        assert!(!inv.sort_all(&items));

        assert_eq!(inv.occupancy(), &cells_before);
        assert_eq!(inv.placement_index(), &index_before);
    }

    #[test]
    fn test_sort_rejects_duplicates() {
        let mut inv = grid(4, 4);
        let items = [(ItemId(1), fp(1, 1)), (ItemId(1), fp(1, 1))];
        assert!(!inv.sort_all(&items));
        assert!(inv.is_empty());
    }

    #[test]
    fn test_sort_rejects_resized_item() {
        let mut inv = grid(4, 4);
        assert!(inv.place(ItemId(1), fp(1, 2), Cell::new(2, 1)));
        let before = inv.placement_index().clone();

        let items = [(ItemId(1), fp(2, 2))];
        assert!(!inv.sort_all(&items));
        assert_eq!(inv.placement_index(), &before);

        // Same footprint is fine
        assert!(inv.sort_all(&[(ItemId(1), fp(1, 2))]));
        assert_eq!(inv.anchor_of(ItemId(1)), Some(Cell::ORIGIN));
    }

    #[test]
    fn test_sort_with_oversized_item_fails() {
        let mut inv = grid(4, 4);
        let items = [(ItemId(1), fp(1, 1)), (ItemId(2), fp(u32::MAX, 1))];
        assert!(!inv.sort_all(&items));
        assert!(inv.is_empty());
    }

    #[test]
    fn test_sort_evicts_unlisted_items() {
        let mut inv = grid(3, 3);
        assert!(inv.place(ItemId(1), fp(1, 1), Cell::new(2, 2)));
        assert!(inv.place(ItemId(2), fp(1, 1), Cell::new(1, 1)));

        let items = [(ItemId(2), fp(1, 1))];
        assert!(inv.sort_all(&items));
        assert!(!inv.contains(ItemId(1)));
        assert_eq!(inv.anchor_of(ItemId(2)), Some(Cell::ORIGIN));
        assert_valid(&inv, &items);
    }

    #[test]
    fn test_sort_event_lists_layout() {
        use parking_lot::Mutex;
        use std::sync::Arc;

        let mut inv = grid(3, 3);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        inv.subscribe(move |event| sink.lock().push(event.clone()));

        let items = [(ItemId(1), fp(1, 3)), (ItemId(2), fp(2, 2))];
        assert!(inv.sort_all(&items));

        let events = seen.lock();
        assert_eq!(
            *events,
            vec![InventoryEvent::Sorted {
                order: SortOrder::HeightFirst,
                placements: vec![(ItemId(1), Cell::new(0, 0)), (ItemId(2), Cell::new(1, 0))],
            }]
        );
    }
}
