use serde::{Deserialize, Serialize};

use super::properties::EquipmentKind;
use crate::geometry::Footprint;

/// The blueprint for an item type
///
/// This defines the static properties of an item that are shared
/// across all instances. Think of it as the "class" and ItemInstance
/// as the "instance".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemDefinition {
    /// Unique identifier (used for lookups and saves)
    pub id: String,

    /// Display name shown in UI
    pub name: String,

    /// Cells the item covers in the inventory grid
    pub footprint: Footprint,

    /// Where the item can be equipped
    pub equipment: EquipmentKind,
}

impl ItemDefinition {
    /// Creates a new item definition
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        footprint: Footprint,
        equipment: EquipmentKind,
    ) -> Self {
        ItemDefinition {
            id: id.into(),
            name: name.into(),
            footprint,
            equipment,
        }
    }

    pub fn is_equippable(&self) -> bool {
        self.equipment != EquipmentKind::None
    }
}
