//! Equipment slots
//!
//! A plain slot table. Moving items between the grid and these slots is done
//! by `PlayerInventory::equip` / `unequip`, which treat the grid as just
//! another client would: `remove` on equip, first-fit + `place` on unequip.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::item::ItemId;

/// Equipment slots for items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EquipmentSlot {
    Head,
    Chest,
    Legs,
    Feet,
    MainHand,   // Weapon
    OffHand,    // Shield
    Accessory1,
    Accessory2,
}

impl EquipmentSlot {
    pub fn all() -> [EquipmentSlot; 8] {
        [
            Self::Head,
            Self::Chest,
            Self::Legs,
            Self::Feet,
            Self::MainHand,
            Self::OffHand,
            Self::Accessory1,
            Self::Accessory2,
        ]
    }
}

/// Which item, if any, sits in each slot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equipment {
    slots: BTreeMap<EquipmentSlot, ItemId>,
}

impl Equipment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: EquipmentSlot) -> Option<ItemId> {
        self.slots.get(&slot).copied()
    }

    /// Slot currently holding `item`
    pub fn slot_of(&self, item: ItemId) -> Option<EquipmentSlot> {
        self.slots
            .iter()
            .find(|&(_, &held)| held == item)
            .map(|(&slot, _)| slot)
    }

    pub fn is_equipped(&self, item: ItemId) -> bool {
        self.slot_of(item).is_some()
    }

    /// Puts `item` in `slot`, returning whatever was there
    pub fn set(&mut self, slot: EquipmentSlot, item: ItemId) -> Option<ItemId> {
        self.slots.insert(slot, item)
    }

    /// Empties `slot`
    pub fn take(&mut self, slot: EquipmentSlot) -> Option<ItemId> {
        self.slots.remove(&slot)
    }

    /// Every filled slot
    pub fn iter(&self) -> impl Iterator<Item = (EquipmentSlot, ItemId)> + '_ {
        self.slots.iter().map(|(&slot, &item)| (slot, item))
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
