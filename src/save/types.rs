//! Save data types
//!
//! Everything here goes to disk as JSON through Serde.

use serde::{Deserialize, Serialize};
use std::time::SystemTime;
use thiserror::Error;

use crate::equipment::EquipmentSlot;
use crate::geometry::{Cell, Footprint};
use crate::item::ItemId;

/// Current save file version
pub const CURRENT_SAVE_VERSION: u32 = 1;

/// Number of manual save slots
pub const SAVE_SLOTS: u8 = 5;

/// The root save file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventorySaveFile {
    pub version: u32,
    pub saved_at: SystemTime,
    pub metadata: SaveMetadata,
    #[serde(flatten)]
    pub inventory: InventorySaveData,
}

/// Metadata about the save
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveMetadata {
    pub game_version: String,
    pub player_name: Option<String>,
    pub save_type: SaveType,
    pub save_slot: u8,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum SaveType {
    Manual,
    Auto,
    QuickSave,
}

/// Grid dimensions plus every held item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventorySaveData {
    pub width: u32,
    pub height: u32,
    pub items: Vec<ItemRecord>,
}

/// One held item
///
/// At most one of `anchor` and `equipped` is set; neither means the item was
/// parked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub id: ItemId,
    pub def_id: String,
    pub footprint: Footprint,
    #[serde(default)]
    pub anchor: Option<Cell>,
    #[serde(default)]
    pub equipped: Option<EquipmentSlot>,
}

/// Error types for save/load operations
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid save version: {0}")]
    InvalidVersion(u32),

    #[error("Invalid save slot: {0} (expected 1-{max})", max = SAVE_SLOTS)]
    InvalidSlot(u8),

    #[error("Save file not found: {0}")]
    NotFound(String),

    #[error("Corrupted save data: {0}")]
    CorruptedData(String),
}

impl InventorySaveFile {
    pub fn new(metadata: SaveMetadata, inventory: InventorySaveData) -> Self {
        InventorySaveFile {
            version: CURRENT_SAVE_VERSION,
            saved_at: SystemTime::now(),
            metadata,
            inventory,
        }
    }
}

impl SaveMetadata {
    pub fn new(save_type: SaveType, save_slot: u8) -> Self {
        SaveMetadata {
            game_version: env!("CARGO_PKG_VERSION").to_string(),
            player_name: None,
            save_type,
            save_slot,
        }
    }
}
