use serde::{Deserialize, Serialize};
use std::fmt;

use crate::geometry::Footprint;

/// Opaque handle for one held item
///
/// The grid only ever compares these; what they refer to is up to the owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A specific item the player holds
///
/// Definitions are shared ("sword"); instances are unique (this sword).
/// The footprint is copied from the definition when the instance is created
/// and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemInstance {
    pub id: ItemId,

    /// ID of the item definition in ItemRegistry
    pub def_id: String,

    pub footprint: Footprint,
}

impl ItemInstance {
    pub fn new(id: ItemId, def_id: impl Into<String>, footprint: Footprint) -> Self {
        ItemInstance {
            id,
            def_id: def_id.into(),
            footprint,
        }
    }
}
