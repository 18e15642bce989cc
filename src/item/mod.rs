// Item system module
//
// This module provides the item side of the inventory:
// - Item definitions (name, grid footprint, where it can be equipped)
// - Item registry for centralized storage
// - Item instances: the opaque handles the grid stores

pub mod definition;
pub mod instance;
pub mod properties;
pub mod registry;

// Re-export main types for convenient access
pub use definition::ItemDefinition;
pub use instance::{ItemId, ItemInstance};
pub use properties::EquipmentKind;
pub use registry::ItemRegistry;
