//! Grid inventory
//!
//! A fixed-size 2D inventory where items take up rectangular footprints:
//! overlap-safe placement, first-fit insertion, a two-pass bin-packing sort,
//! plus the player-side pieces built on top of it (equipment, ground
//! pickups, drag and drop, saves).

pub mod config;
pub mod drag;
pub mod equipment;
pub mod geometry;
pub mod inventory;
pub mod item;
pub mod layout;
pub mod pickup;
pub mod save;

pub use config::{ConfigError, InventoryConfig};
pub use geometry::{Cell, Footprint, GridSize};
pub use inventory::{GridInventory, InventoryError, PlayerInventory};
pub use item::{ItemId, ItemRegistry};
