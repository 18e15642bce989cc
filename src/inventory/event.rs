use super::sort::SortOrder;
use crate::geometry::Cell;
use crate::item::ItemId;

/// Inventory events
///
/// Sent to listeners after a mutation has been applied. Rejected operations
/// never produce an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InventoryEvent {
    /// Item placed on the grid, or moved (`previous` is its old anchor)
    Placed {
        item: ItemId,
        anchor: Cell,
        previous: Option<Cell>,
    },
    /// Item taken off the grid
    Removed { item: ItemId, anchor: Cell },
    /// Full repack finished; every item with its new anchor
    Sorted {
        order: SortOrder,
        placements: Vec<(ItemId, Cell)>,
    },
    /// Every item removed
    Cleared,
}

pub(super) type Listener = Box<dyn FnMut(&InventoryEvent) + Send>;
