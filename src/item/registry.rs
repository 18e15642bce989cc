use std::collections::HashMap;

use log::warn;

use super::definition::ItemDefinition;
use super::properties::EquipmentKind;
use crate::geometry::Footprint;
use crate::inventory::InventoryError;

/// Central registry of all item definitions
///
/// This is the single source of truth for what items exist in the game.
/// All item references (in inventories, ground drops, saves) use IDs that
/// look up definitions in this registry.
#[derive(Debug, Clone)]
pub struct ItemRegistry {
    items: HashMap<String, ItemDefinition>,
}

impl ItemRegistry {
    /// Creates a new empty registry
    pub fn new() -> Self {
        ItemRegistry {
            items: HashMap::new(),
        }
    }

    /// Creates a registry with all game items pre-registered
    pub fn create_default() -> Self {
        let mut registry = Self::new();
        registry.register_base_items();
        registry
    }

    /// Registers a new item definition
    ///
    /// Returns error if an item with this ID already exists.
    pub fn register(&mut self, item: ItemDefinition) -> Result<(), InventoryError> {
        if self.items.contains_key(&item.id) {
            return Err(InventoryError::DuplicateItem(item.id));
        }

        self.items.insert(item.id.clone(), item);
        Ok(())
    }

    /// Gets an item definition by ID
    pub fn get(&self, id: &str) -> Option<&ItemDefinition> {
        self.items.get(id)
    }

    /// Like `get`, but an unknown ID is an error
    pub fn require(&self, id: &str) -> Result<&ItemDefinition, InventoryError> {
        self.items
            .get(id)
            .ok_or_else(|| InventoryError::UnknownItem(id.to_string()))
    }

    pub fn exists(&self, id: &str) -> bool {
        self.items.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns all item definitions, ordered by ID
    pub fn all_items(&self) -> Vec<&ItemDefinition> {
        let mut items: Vec<&ItemDefinition> = self.items.values().collect();
        items.sort_by(|a, b| a.id.cmp(&b.id));
        items
    }

    // ======================================================================
    // Item Registration - Base Game Items
    // ======================================================================

    /// Registers all base game items
    ///
    /// This is where all built-in items are defined. Add new items here.
    fn register_base_items(&mut self) {
        let base = [
            // Starting gear
            ("shield", "Shield", 2, 2, EquipmentKind::Shield),
            ("sword", "Sword", 1, 3, EquipmentKind::Weapon),
            // Drops
            ("helmet", "Iron Helmet", 2, 2, EquipmentKind::Helmet),
            ("boots", "Leather Boots", 2, 1, EquipmentKind::Boots),
            ("ring", "Ring", 1, 1, EquipmentKind::Trinket),
            ("health_potion", "Health Potion", 1, 1, EquipmentKind::None),
        ];

        for (id, name, w, h, kind) in base {
            let footprint = match Footprint::new(w, h) {
                Ok(fp) => fp,
                Err(e) => {
                    warn!("Skipping base item '{}': {}", id, e);
                    continue;
                }
            };
            if let Err(e) = self.register(ItemDefinition::new(id, name, footprint, kind)) {
                warn!("Skipping base item '{}': {}", id, e);
            }
        }
    }
}

impl Default for ItemRegistry {
    fn default() -> Self {
        Self::create_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_items() {
        let registry = ItemRegistry::create_default();

        let shield = registry.get("shield").unwrap();
        assert_eq!(shield.footprint, Footprint::new(2, 2).unwrap());
        assert_eq!(shield.equipment, EquipmentKind::Shield);

        let sword = registry.get("sword").unwrap();
        assert_eq!(sword.footprint, Footprint::new(1, 3).unwrap());
        assert!(sword.is_equippable());

        assert!(!registry.get("health_potion").unwrap().is_equippable());
    }

    #[test]
    fn test_duplicate_registration() {
        let mut registry = ItemRegistry::create_default();
        let dup = ItemDefinition::new("sword", "Other Sword", Footprint::UNIT, EquipmentKind::Weapon);

        assert_eq!(
            registry.register(dup),
            Err(InventoryError::DuplicateItem("sword".to_string()))
        );
        assert_eq!(registry.get("sword").unwrap().name, "Sword");
    }

    #[test]
    fn test_require_unknown() {
        let registry = ItemRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(
            registry.require("nope").err(),
            Some(InventoryError::UnknownItem("nope".to_string()))
        );
    }
}
