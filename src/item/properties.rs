use serde::{Deserialize, Serialize};

use crate::equipment::EquipmentSlot;

/// Which equipment slots an item may go into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EquipmentKind {
    /// Inventory only (materials, keys)
    None,
    /// Fits any slot
    Any,
    Weapon,
    Shield,
    Helmet,
    Armor,
    Boots,
    Trinket,
}

impl EquipmentKind {
    /// True if an item of this kind can be equipped in `slot`
    pub fn accepts(self, slot: EquipmentSlot) -> bool {
        match self {
            EquipmentKind::None => false,
            EquipmentKind::Any => true,
            EquipmentKind::Weapon => slot == EquipmentSlot::MainHand,
            EquipmentKind::Shield => slot == EquipmentSlot::OffHand,
            EquipmentKind::Helmet => slot == EquipmentSlot::Head,
            EquipmentKind::Armor => matches!(slot, EquipmentSlot::Chest | EquipmentSlot::Legs),
            EquipmentKind::Boots => slot == EquipmentSlot::Feet,
            EquipmentKind::Trinket => {
                matches!(slot, EquipmentSlot::Accessory1 | EquipmentSlot::Accessory2)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_acceptance() {
        assert!(EquipmentKind::Weapon.accepts(EquipmentSlot::MainHand));
        assert!(!EquipmentKind::Weapon.accepts(EquipmentSlot::OffHand));
        assert!(EquipmentKind::Trinket.accepts(EquipmentSlot::Accessory2));
        assert!(EquipmentKind::Any.accepts(EquipmentSlot::Head));
        assert!(!EquipmentKind::None.accepts(EquipmentSlot::MainHand));
    }
}
