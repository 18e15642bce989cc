use std::collections::{BTreeMap, BTreeSet};

use log::{debug, info, warn};

use super::error::InventoryError;
use super::event::InventoryEvent;
use super::grid::GridInventory;
use crate::equipment::{Equipment, EquipmentSlot};
use crate::geometry::{Cell, GridSize};
use crate::item::{ItemId, ItemInstance, ItemRegistry};

/// Result of handing an item to the inventory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// Item went onto the grid at this anchor
    Placed(Cell),
    /// No room: the item is held but off the grid until the next sort
    Parked,
}

/// Where a held item currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemLocation {
    Grid(Cell),
    Parked,
    Equipped(EquipmentSlot),
}

/// Player-specific inventory with equipment
///
/// This wraps the core GridInventory with the things a player has on top
/// of a bare grid: the table of held items, equipment slots, and items that
/// are held but didn't fit ("parked"). Every held item is in exactly one
/// place: on the grid, parked, or equipped.
#[derive(Debug)]
pub struct PlayerInventory {
    grid: GridInventory,
    items: BTreeMap<ItemId, ItemInstance>,
    parked: BTreeSet<ItemId>,
    equipment: Equipment,
    next_id: u64,
}

impl PlayerInventory {
    /// Creates an empty player inventory with a grid of the given size
    pub fn new(size: GridSize) -> Self {
        PlayerInventory {
            grid: GridInventory::new(size),
            items: BTreeMap::new(),
            parked: BTreeSet::new(),
            equipment: Equipment::new(),
            next_id: 1,
        }
    }

    /// Creates a player inventory holding the starting gear
    ///
    /// Adds a shield and a sword, then sorts so the starting layout is packed.
    pub fn with_default_items(
        size: GridSize,
        registry: &ItemRegistry,
    ) -> Result<Self, InventoryError> {
        let mut inventory = Self::new(size);
        inventory.add_item(registry, "shield")?;
        inventory.add_item(registry, "sword")?;
        if inventory.sort() {
            info!("Default items added to inventory");
        } else {
            warn!(
                "Default items don't all fit a {}x{} grid; {} parked",
                size.width(),
                size.height(),
                inventory.parked.len()
            );
        }
        Ok(inventory)
    }

    // ======================================================================
    // Queries
    // ======================================================================

    /// The underlying grid (read-only; mutate through this type)
    pub fn grid(&self) -> &GridInventory {
        &self.grid
    }

    pub fn equipment(&self) -> &Equipment {
        &self.equipment
    }

    /// Registers a grid change listener
    pub fn subscribe(&mut self, listener: impl FnMut(&InventoryEvent) + Send + 'static) {
        self.grid.subscribe(listener);
    }

    pub fn item(&self, id: ItemId) -> Option<&ItemInstance> {
        self.items.get(&id)
    }

    /// All held items, ordered by id
    pub fn items(&self) -> impl Iterator<Item = &ItemInstance> {
        self.items.values()
    }

    /// Number of held items (grid, parked and equipped)
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items held but not on the grid
    pub fn parked(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.parked.iter().copied()
    }

    pub fn location(&self, id: ItemId) -> Option<ItemLocation> {
        if !self.items.contains_key(&id) {
            return None;
        }
        if let Some(anchor) = self.grid.anchor_of(id) {
            return Some(ItemLocation::Grid(anchor));
        }
        if let Some(slot) = self.equipment.slot_of(id) {
            return Some(ItemLocation::Equipped(slot));
        }
        Some(ItemLocation::Parked)
    }

    /// Counts held instances of an item definition
    pub fn count_item(&self, def_id: &str) -> usize {
        self.items.values().filter(|i| i.def_id == def_id).count()
    }

    // ======================================================================
    // Adding and removing
    // ======================================================================

    /// Creates a new instance of `def_id` and puts it in the inventory
    ///
    /// Goes to the first free spot in reading order. If nothing fits the
    /// item is still held, parked until a sort makes room.
    pub fn add_item(
        &mut self,
        registry: &ItemRegistry,
        def_id: &str,
    ) -> Result<(ItemId, AddOutcome), InventoryError> {
        let def = registry.require(def_id)?;
        let id = ItemId(self.next_id);
        self.next_id = self
            .next_id
            .checked_add(1)
            .ok_or(InventoryError::IdsExhausted)?;

        let instance = ItemInstance::new(id, def_id, def.footprint);
        self.items.insert(id, instance);
        let outcome = self.stash(id);

        info!("Added {} as item {} ({:?})", def_id, id, outcome);
        Ok((id, outcome))
    }

    /// Restores a known instance, e.g. from a save file
    ///
    /// The item starts parked; callers position it afterwards. The largest
    /// id is refused since no id would be left after it.
    pub(crate) fn adopt(&mut self, instance: ItemInstance) -> Result<(), InventoryError> {
        let after = instance
            .id
            .0
            .checked_add(1)
            .ok_or(InventoryError::IdsExhausted)?;
        self.next_id = self.next_id.max(after);
        self.parked.insert(instance.id);
        self.items.insert(instance.id, instance);
        Ok(())
    }

    /// Drops an item entirely (off the grid, out of equipment)
    pub fn remove_item(&mut self, id: ItemId) -> Option<ItemInstance> {
        let instance = self.items.remove(&id)?;
        self.grid.remove(id);
        self.parked.remove(&id);
        if let Some(slot) = self.equipment.slot_of(id) {
            self.equipment.take(slot);
        }
        debug!("Dropped item {} ({})", id, instance.def_id);
        Some(instance)
    }

    /// Puts a held item on the grid: first fit, otherwise parked
    fn stash(&mut self, id: ItemId) -> AddOutcome {
        let Some(footprint) = self.items.get(&id).map(|i| i.footprint) else {
            return AddOutcome::Parked;
        };
        match self.grid.insert(id, footprint) {
            Some(anchor) => {
                self.parked.remove(&id);
                AddOutcome::Placed(anchor)
            }
            None => {
                warn!("No room for item {} ({}), parking it", id, footprint);
                self.parked.insert(id);
                AddOutcome::Parked
            }
        }
    }

    // ======================================================================
    // Moving and sorting
    // ======================================================================

    /// Moves a held item (on the grid or parked) to `anchor`
    ///
    /// On failure the item stays where it was.
    pub fn try_move_item(&mut self, id: ItemId, anchor: Cell) -> Result<(), InventoryError> {
        let footprint = self
            .items
            .get(&id)
            .map(|i| i.footprint)
            .ok_or_else(|| InventoryError::UnknownItem(id.to_string()))?;

        if let Some(slot) = self.equipment.slot_of(id) {
            // Equipped items leave their slot only through unequip
            return Err(InventoryError::WrongSlot { item: id, slot });
        }

        self.grid.try_place(id, footprint, anchor)?;
        self.parked.remove(&id);
        Ok(())
    }

    /// Boolean form of [`try_move_item`](Self::try_move_item)
    pub fn move_item(&mut self, id: ItemId, anchor: Cell) -> bool {
        match self.try_move_item(id, anchor) {
            Ok(()) => true,
            Err(e) => {
                debug!("Move of item {} rejected: {}", id, e);
                false
            }
        }
    }

    /// Repacks every held, unequipped item (parked ones included)
    ///
    /// Returns false, leaving everything where it was, if no sort order fits
    /// all of them.
    pub fn sort(&mut self) -> bool {
        let to_sort: Vec<_> = self
            .items
            .values()
            .filter(|i| !self.equipment.is_equipped(i.id))
            .map(|i| (i.id, i.footprint))
            .collect();

        if to_sort.is_empty() {
            debug!("No items to sort");
            return true;
        }

        if self.grid.sort_all(&to_sort) {
            self.parked.clear();
            true
        } else {
            false
        }
    }

    // ======================================================================
    // Equipment
    // ======================================================================

    /// Equips a held item into `slot`
    ///
    /// The item leaves the grid (or the parked set, or another slot). If the
    /// slot already held something, that item goes back into the inventory
    /// and its id is returned.
    pub fn equip(
        &mut self,
        registry: &ItemRegistry,
        id: ItemId,
        slot: EquipmentSlot,
    ) -> Result<Option<(ItemId, AddOutcome)>, InventoryError> {
        let instance = self
            .items
            .get(&id)
            .ok_or_else(|| InventoryError::UnknownItem(id.to_string()))?;
        let def = registry.require(&instance.def_id)?;
        if !def.equipment.accepts(slot) {
            return Err(InventoryError::WrongSlot { item: id, slot });
        }

        if self.equipment.get(slot) == Some(id) {
            return Ok(None);
        }

        // Coming from another slot, the grid, or the parked set
        if let Some(from) = self.equipment.slot_of(id) {
            self.equipment.take(from);
        }
        self.grid.remove(id);
        self.parked.remove(&id);

        let displaced = self.equipment.set(slot, id).map(|old| {
            let outcome = self.stash(old);
            debug!("Returned item {} from {:?} ({:?})", old, slot, outcome);
            (old, outcome)
        });

        info!("Equipped item {} in {:?}", id, slot);
        Ok(displaced)
    }

    /// Takes the item out of `slot` and puts it back in the inventory
    pub fn unequip(&mut self, slot: EquipmentSlot) -> Option<(ItemId, AddOutcome)> {
        let id = self.equipment.take(slot)?;
        let outcome = self.stash(id);
        info!("Unequipped item {} from {:?} ({:?})", id, slot, outcome);
        Some((id, outcome))
    }

    /// Puts an item straight into a slot, bypassing the grid (save loading)
    pub(crate) fn restore_equipped(&mut self, id: ItemId, slot: EquipmentSlot) {
        self.parked.remove(&id);
        self.equipment.set(slot, id);
    }

    /// Checks that every held item is in exactly one place
    pub fn check_consistency(&self) -> Result<(), String> {
        self.grid.check_consistency()?;

        for id in self.items.keys() {
            let places = [
                self.grid.contains(*id),
                self.parked.contains(id),
                self.equipment.is_equipped(*id),
            ]
            .iter()
            .filter(|&&b| b)
            .count();
            if places != 1 {
                return Err(format!("item {} is in {} places", id, places));
            }
        }

        if self.grid.len() + self.parked.len() + self.equipment.iter().count() != self.items.len() {
            return Err("grid, parked or equipment holds an unknown item".to_string());
        }

        Ok(())
    }
}
