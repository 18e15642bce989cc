//! Items lying in the world, waiting to be picked up
//!
//! Only the range check and the hand-off to the inventory live here.
//! Spawning, despawn timers and highlighting belong to the game.

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::inventory::{AddOutcome, InventoryError, PlayerInventory};
use crate::item::{ItemId, ItemRegistry};

/// An item on the ground
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundItem {
    pub def_id: String,
    pub x: i32,
    pub y: i32,
}

impl GroundItem {
    pub fn new(def_id: impl Into<String>, x: i32, y: i32) -> Self {
        GroundItem {
            def_id: def_id.into(),
            x,
            y,
        }
    }

    /// Straight-line distance to a world position
    pub fn distance_to(&self, x: i32, y: i32) -> f32 {
        let dx = (self.x - x) as f32;
        let dy = (self.y - y) as f32;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn in_range(&self, x: i32, y: i32, range: f32) -> bool {
        self.distance_to(x, y) <= range
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PickupError {
    #[error("item is {distance:.1} away, pickup range is {range}")]
    TooFar { distance: f32, range: f32 },

    #[error(transparent)]
    Inventory(#[from] InventoryError),
}

/// Moves a ground item into the inventory if the player is close enough
///
/// On success the caller despawns `item`. An item with no free room is still
/// picked up; it is parked until the next sort.
pub fn try_pickup(
    inventory: &mut PlayerInventory,
    registry: &ItemRegistry,
    player: (i32, i32),
    item: &GroundItem,
    range: f32,
) -> Result<(ItemId, AddOutcome), PickupError> {
    let (px, py) = player;
    if !item.in_range(px, py, range) {
        return Err(PickupError::TooFar {
            distance: item.distance_to(px, py),
            range,
        });
    }

    let added = inventory.add_item(registry, &item.def_id)?;
    debug!("Picked up {} at ({}, {})", item.def_id, item.x, item.y);
    Ok(added)
}
