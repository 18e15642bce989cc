//! Saving and restoring the player's inventory

use std::collections::HashSet;

use log::debug;

use super::saveable::Saveable;
use super::types::{InventorySaveData, ItemRecord, SaveError};
use crate::geometry::GridSize;
use crate::inventory::{ItemLocation, PlayerInventory};
use crate::item::ItemInstance;

impl Saveable for PlayerInventory {
    type Data = InventorySaveData;

    fn to_save_data(&self) -> Result<InventorySaveData, SaveError> {
        let size = self.grid().size();
        let items = self
            .items()
            .map(|item| {
                let location = self.location(item.id);
                ItemRecord {
                    id: item.id,
                    def_id: item.def_id.clone(),
                    footprint: item.footprint,
                    anchor: match location {
                        Some(ItemLocation::Grid(anchor)) => Some(anchor),
                        _ => None,
                    },
                    equipped: match location {
                        Some(ItemLocation::Equipped(slot)) => Some(slot),
                        _ => None,
                    },
                }
            })
            .collect();

        Ok(InventorySaveData {
            width: size.width(),
            height: size.height(),
            items,
        })
    }

    fn from_save_data(data: &InventorySaveData) -> Result<Self, SaveError> {
        let size = GridSize::new(data.width, data.height)
            .map_err(|e| SaveError::CorruptedData(e.to_string()))?;
        let mut inventory = PlayerInventory::new(size);

        let mut seen = HashSet::with_capacity(data.items.len());
        for record in &data.items {
            if !seen.insert(record.id) {
                return Err(SaveError::CorruptedData(format!(
                    "item {} appears twice",
                    record.id
                )));
            }
            inventory
                .adopt(ItemInstance::new(record.id, &record.def_id, record.footprint))
                .map_err(|e| SaveError::CorruptedData(format!("item {}: {}", record.id, e)))?;

            match (record.anchor, record.equipped) {
                (Some(_), Some(slot)) => {
                    return Err(SaveError::CorruptedData(format!(
                        "item {} is both on the grid and in {:?}",
                        record.id, slot
                    )));
                }
                (Some(anchor), None) => {
                    // Same validation as a live move; overlaps and bounds are caught here
                    inventory.try_move_item(record.id, anchor).map_err(|e| {
                        SaveError::CorruptedData(format!("item {}: {}", record.id, e))
                    })?;
                }
                (None, Some(slot)) => {
                    if let Some(other) = inventory.equipment().get(slot) {
                        return Err(SaveError::CorruptedData(format!(
                            "items {} and {} both equipped in {:?}",
                            other, record.id, slot
                        )));
                    }
                    inventory.restore_equipped(record.id, slot);
                }
                (None, None) => {}
            }
        }

        debug!("Restored inventory with {} items", inventory.len());
        Ok(inventory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equipment::EquipmentSlot;
    use crate::geometry::{Cell, Footprint};
    use crate::item::{ItemId, ItemRegistry};

    fn record(id: u64, def_id: &str, w: u32, h: u32, anchor: Option<Cell>) -> ItemRecord {
        ItemRecord {
            id: ItemId(id),
            def_id: def_id.to_string(),
            footprint: Footprint::new(w, h).unwrap(),
            anchor,
            equipped: None,
        }
    }

    #[test]
    fn test_save_and_restore() {
        let registry = ItemRegistry::create_default();
        let mut inv = PlayerInventory::with_default_items(GridSize::new(3, 3).unwrap(), &registry)
            .unwrap();
        let (ring, _) = inv.add_item(&registry, "ring").unwrap();
        inv.equip(&registry, ring, EquipmentSlot::Accessory2).unwrap();
        let (parked, _) = inv.add_item(&registry, "helmet").unwrap();

        let data = inv.to_save_data().unwrap();
        assert_eq!(data.items.len(), 4);

        let restored = PlayerInventory::from_save_data(&data).unwrap();
        restored.check_consistency().unwrap();
        assert_eq!(restored.grid().placements(), inv.grid().placements());
        assert_eq!(restored.location(ring), Some(ItemLocation::Equipped(EquipmentSlot::Accessory2)));
        assert_eq!(restored.location(parked), Some(ItemLocation::Parked));
        assert_eq!(restored.to_save_data().unwrap(), data);
    }

    #[test]
    fn test_restored_ids_continue() {
        let registry = ItemRegistry::create_default();
        let data = InventorySaveData {
            width: 4,
            height: 4,
            items: vec![record(7, "ring", 1, 1, Some(Cell::ORIGIN))],
        };

        let mut inv = PlayerInventory::from_save_data(&data).unwrap();
        let (id, _) = inv.add_item(&registry, "ring").unwrap();
        assert_eq!(id, ItemId(8));
    }

    #[test]
    fn test_overlapping_records_rejected() {
        let data = InventorySaveData {
            width: 4,
            height: 4,
            items: vec![
                record(1, "shield", 2, 2, Some(Cell::ORIGIN)),
                record(2, "ring", 1, 1, Some(Cell::new(1, 1))),
            ],
        };

        assert!(matches!(
            PlayerInventory::from_save_data(&data),
            Err(SaveError::CorruptedData(_))
        ));
    }

    #[test]
    fn test_bad_records_rejected() {
        let out_of_bounds = InventorySaveData {
            width: 2,
            height: 2,
            items: vec![record(1, "sword", 1, 3, Some(Cell::ORIGIN))],
        };
        let duplicate = InventorySaveData {
            width: 4,
            height: 4,
            items: vec![record(1, "ring", 1, 1, None), record(1, "ring", 1, 1, None)],
        };
        let empty_grid = InventorySaveData {
            width: 0,
            height: 4,
            items: Vec::new(),
        };

        let last_id = InventorySaveData {
            width: 4,
            height: 4,
            items: vec![record(u64::MAX, "ring", 1, 1, Some(Cell::ORIGIN))],
        };
        let huge_footprint = InventorySaveData {
            width: 4,
            height: 4,
            items: vec![record(1, "ring", u32::MAX, 1, Some(Cell::new(1, 0)))],
        };

        for data in [out_of_bounds, duplicate, empty_grid, last_id, huge_footprint] {
            assert!(matches!(
                PlayerInventory::from_save_data(&data),
                Err(SaveError::CorruptedData(_))
            ));
        }
    }
}
