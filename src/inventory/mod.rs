// Inventory system module
//
// This module provides the grid inventory for the game, including:
// - The grid occupancy core (placement, removal, first-fit search)
// - The two-pass bin-packing sort
// - Change notification for UI refresh
// - The player's inventory (held items, equipment, parked items)
// - A lock-wrapped handle for sharing a grid between threads

pub mod error;
pub mod event;
pub mod grid;
pub mod player;
pub mod shared;
pub mod sort;

// Re-export main types
pub use error::InventoryError;
pub use event::InventoryEvent;
pub use grid::{GridInventory, Placement};
pub use player::{AddOutcome, ItemLocation, PlayerInventory};
pub use shared::SharedInventory;
pub use sort::SortOrder;
