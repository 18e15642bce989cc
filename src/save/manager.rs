//! Save manager for handling save/load operations
//!
//! This module provides the SaveManager struct which handles:
//! - Writing inventory saves to files
//! - Loading them back with a version check
//! - Autosave timing
//! - Save file management (listing, cleanup)

use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use super::saveable::Saveable;
use super::types::*;
use crate::inventory::PlayerInventory;

pub struct SaveManager {
    save_directory: PathBuf,
    current_save_slot: u8,
    autosave_interval: Duration,
    last_autosave: Option<SystemTime>,
}

impl SaveManager {
    /// Creates a new SaveManager with the given save directory
    ///
    /// The save directory will be created if it doesn't exist.
    pub fn new(save_directory: impl AsRef<Path>) -> Result<Self, SaveError> {
        let save_dir = save_directory.as_ref().to_path_buf();

        if !save_dir.exists() {
            fs::create_dir_all(&save_dir)?;
        }

        Ok(SaveManager {
            save_directory: save_dir,
            current_save_slot: 1,
            autosave_interval: Duration::from_secs(300),
            last_autosave: None,
        })
    }

    pub fn with_autosave_interval(mut self, interval: Duration) -> Self {
        self.autosave_interval = interval;
        self
    }

    pub fn save_directory(&self) -> &Path {
        &self.save_directory
    }

    /// Sets the current save slot (clamped to 1-5)
    pub fn set_save_slot(&mut self, slot: u8) {
        self.current_save_slot = slot.clamp(1, SAVE_SLOTS);
    }

    pub fn get_save_slot(&self) -> u8 {
        self.current_save_slot
    }

    /// Snapshot `inventory` into the current slot
    pub fn save_inventory(
        &mut self,
        inventory: &PlayerInventory,
        save_type: SaveType,
    ) -> Result<PathBuf, SaveError> {
        let metadata = SaveMetadata::new(save_type, self.current_save_slot);
        let save_file = InventorySaveFile::new(metadata, inventory.to_save_data()?);
        self.save_game(&save_file)
    }

    /// Save a prepared save file
    pub fn save_game(&mut self, save_file: &InventorySaveFile) -> Result<PathBuf, SaveError> {
        let slot = save_file.metadata.save_slot;
        if !(1..=SAVE_SLOTS).contains(&slot) {
            return Err(SaveError::InvalidSlot(slot));
        }

        let filename = self.generate_filename(save_file.metadata.save_type, slot);
        let filepath = self.save_directory.join(&filename);

        // Pretty format for readability/debugging
        let json = serde_json::to_string_pretty(save_file)?;
        fs::write(&filepath, json)?;

        if save_file.metadata.save_type == SaveType::Auto {
            self.last_autosave = Some(SystemTime::now());
        }

        info!("Inventory saved to: {}", filepath.display());
        Ok(filepath)
    }

    /// Load the manual save in a slot
    pub fn load_game(&self, slot: u8) -> Result<InventorySaveFile, SaveError> {
        if !(1..=SAVE_SLOTS).contains(&slot) {
            return Err(SaveError::InvalidSlot(slot));
        }
        self.load_game_by_filename(&slot_filename(slot))
    }

    /// Load a slot straight into a PlayerInventory
    pub fn load_inventory(&self, slot: u8) -> Result<PlayerInventory, SaveError> {
        let save_file = self.load_game(slot)?;
        PlayerInventory::from_save_data(&save_file.inventory)
    }

    /// Load a save file by filename
    pub fn load_game_by_filename(&self, filename: &str) -> Result<InventorySaveFile, SaveError> {
        let filepath = self.save_directory.join(filename);

        if !filepath.exists() {
            return Err(SaveError::NotFound(filename.to_string()));
        }

        let json = fs::read_to_string(&filepath)?;
        let save_file: InventorySaveFile = serde_json::from_str(&json)?;

        if save_file.version > CURRENT_SAVE_VERSION {
            return Err(SaveError::InvalidVersion(save_file.version));
        }

        debug!("Loaded save {}", filepath.display());
        Ok(save_file)
    }

    /// Check if autosave is needed
    pub fn should_autosave(&self) -> bool {
        match self.last_autosave {
            Some(last_save) => SystemTime::now()
                .duration_since(last_save)
                .map(|elapsed| elapsed >= self.autosave_interval)
                .unwrap_or(false),
            // Never autosaved yet
            None => true,
        }
    }

    /// List all readable save files, newest first
    pub fn list_saves(&self) -> Result<Vec<SaveFileInfo>, SaveError> {
        let mut saves = Vec::new();

        for entry in fs::read_dir(&self.save_directory)? {
            let path = entry?.path();

            if path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }
            let Some(filename) = path.file_name().and_then(|f| f.to_str()) else {
                continue;
            };
            match self.load_game_by_filename(filename) {
                Ok(save_file) => saves.push(SaveFileInfo {
                    filename: filename.to_string(),
                    timestamp: save_file.saved_at,
                    metadata: save_file.metadata,
                }),
                Err(e) => debug!("Skipping {}: {}", filename, e),
            }
        }

        saves.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        Ok(saves)
    }

    fn generate_filename(&self, save_type: SaveType, slot: u8) -> String {
        match save_type {
            SaveType::Manual | SaveType::QuickSave => slot_filename(slot),
            SaveType::Auto => {
                let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
                format!("autosave_slot{}_{}.json", slot, timestamp)
            }
        }
    }

    /// Delete old autosaves, keeping only the N most recent per slot
    pub fn cleanup_autosaves(&self, keep_count: usize) -> Result<usize, SaveError> {
        let mut removed = 0;

        for slot in 1..=SAVE_SLOTS {
            let prefix = format!("autosave_slot{}_", slot);

            let mut autosaves: Vec<_> = fs::read_dir(&self.save_directory)?
                .filter_map(|entry| entry.ok())
                .filter(|entry| {
                    entry
                        .file_name()
                        .to_str()
                        .is_some_and(|s| s.starts_with(&prefix))
                })
                .collect();

            // Newest first; the timestamped names break mtime ties
            autosaves.sort_by_key(|entry| {
                let modified = entry.metadata().and_then(|m| m.modified()).ok();
                std::cmp::Reverse((modified, entry.file_name()))
            });

            for entry in autosaves.iter().skip(keep_count) {
                fs::remove_file(entry.path())?;
                removed += 1;
            }
        }

        if removed > 0 {
            info!("Removed {} old autosaves", removed);
        }
        Ok(removed)
    }

    /// Check if a manual save exists for a given slot
    pub fn save_exists(&self, slot: u8) -> bool {
        self.save_directory.join(slot_filename(slot)).exists()
    }
}

fn slot_filename(slot: u8) -> String {
    format!("slot_{}.json", slot)
}

#[derive(Debug, Clone)]
pub struct SaveFileInfo {
    pub filename: String,
    pub timestamp: SystemTime,
    pub metadata: SaveMetadata,
}
