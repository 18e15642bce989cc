//! Inventory configuration
//!
//! Loaded from a JSON file; every field has a default, so an empty object
//! (or no file at all) gives a working setup.

use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::geometry::GridSize;
use crate::layout::TileLayout;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryConfig {
    pub grid_width: u32,
    pub grid_height: u32,
    pub tile_width: f32,
    pub tile_height: f32,
    /// World units between player and item for a pickup
    pub pickup_range: f32,
    pub autosave_interval_secs: u64,
    /// Defaults to ~/.grid_inventory/saves
    pub save_directory: Option<PathBuf>,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        InventoryConfig {
            grid_width: 8,
            grid_height: 8,
            tile_width: 32.0,
            tile_height: 32.0,
            pickup_range: 24.0,
            autosave_interval_secs: 300,
            save_directory: None,
        }
    }
}

impl InventoryConfig {
    /// Reads and validates a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: InventoryConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.grid_size()?;
        for (name, value) in [
            ("tile_width", self.tile_width),
            ("tile_height", self.tile_height),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid(format!("{name} must be positive, got {value}")));
            }
        }
        if !(self.pickup_range.is_finite() && self.pickup_range >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "pickup_range must not be negative, got {}",
                self.pickup_range
            )));
        }
        Ok(())
    }

    pub fn grid_size(&self) -> Result<GridSize, ConfigError> {
        GridSize::new(self.grid_width, self.grid_height)
            .map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    pub fn tile_layout(&self) -> TileLayout {
        TileLayout::new(self.tile_width, self.tile_height)
    }

    pub fn autosave_interval(&self) -> Duration {
        Duration::from_secs(self.autosave_interval_secs)
    }

    /// Configured save directory, else one under the home directory
    pub fn save_directory(&self) -> PathBuf {
        self.save_directory.clone().unwrap_or_else(|| {
            dirs::home_dir()
                .map(|p| p.join(".grid_inventory/saves"))
                .unwrap_or_else(|| PathBuf::from("./saves"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_object_uses_defaults() {
        let config = InventoryConfig::from_json("{}").unwrap();
        assert_eq!(config, InventoryConfig::default());
        assert_eq!(config.grid_size().unwrap(), GridSize::new(8, 8).unwrap());
        assert_eq!(config.autosave_interval(), Duration::from_secs(300));
    }

    #[test]
    fn test_partial_override() {
        let config =
            InventoryConfig::from_json(r#"{ "grid_width": 10, "save_directory": "/tmp/inv" }"#)
                .unwrap();
        assert_eq!(config.grid_width, 10);
        assert_eq!(config.grid_height, 8);
        assert_eq!(config.save_directory(), PathBuf::from("/tmp/inv"));
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            InventoryConfig::from_json(r#"{ "grid_height": 0 }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            InventoryConfig::from_json(r#"{ "tile_width": -4.0 }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            InventoryConfig::from_json("[1, 2]"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "pickup_range": 40.0 }}"#).unwrap();

        let config = InventoryConfig::load(file.path()).unwrap();
        assert_eq!(config.pickup_range, 40.0);

        assert!(matches!(
            InventoryConfig::load(file.path().with_extension("missing")),
            Err(ConfigError::Read { .. })
        ));
    }
}
