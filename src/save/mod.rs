//! Save/Load system for the inventory
//!
//! This module provides:
//! - JSON-based save files (human-readable, debuggable)
//! - Multiple save slots (1-5)
//! - Timestamped autosaves with cleanup
//! - A trait-based design so other state can be saved the same way
//!
//! # Architecture
//!
//! - `types`: Save data structures and error types
//! - `manager`: SaveManager for file operations
//! - `saveable`: Saveable trait
//! - `inventory`: Saveable for PlayerInventory
//!
//! # Example Usage
//!
//! ```ignore
//! let mut save_manager = SaveManager::new(config.save_directory())?;
//! save_manager.save_inventory(&inventory, SaveType::Manual)?;
//!
//! let inventory = save_manager.load_inventory(1)?;
//! ```

mod inventory;
pub mod manager;
pub mod saveable;
pub mod types;

pub use manager::{SaveFileInfo, SaveManager};
pub use saveable::Saveable;
pub use types::*;
