//! The storage seam between a farm and the outside world.
//!
//! [`FarmInventory`] is everything the controller needs from its storage:
//! accepting produce, handing out fertilizer items, draining liquid supply
//! containers, and supplying germlings for planting. [`StorageBin`] is a
//! capacity-bounded implementation for hosts and tests.

use std::collections::BTreeMap;

use tillworks_types::{Cell, ProduceItem};
use tillworks_world::FarmWorld;

/// Storage attached to a farm.
pub trait FarmInventory {
    /// Store as much of `item` as fits. Returns the part that did not fit.
    fn add_produce(&mut self, item: ProduceItem) -> Option<ProduceItem>;

    /// Store a whole harvest. Returns everything that did not fit.
    fn stow_harvest(&mut self, harvest: Vec<ProduceItem>) -> Vec<ProduceItem> {
        harvest
            .into_iter()
            .filter_map(|item| self.add_produce(item))
            .filter(|item| !item.is_empty())
            .collect()
    }

    /// Consume one fertilizer item. Returns `false` when none are stocked.
    fn take_fertilizer(&mut self) -> bool;

    /// Drain up to `room` units of liquid from supply containers.
    fn drain_liquid_supply(&mut self, room: u32) -> u32;

    /// Plant one `germling` at `cell`, consuming it from storage.
    fn plant_germling(&mut self, world: &mut dyn FarmWorld, germling: &str, cell: Cell) -> bool;
}

/// A capacity-bounded inventory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StorageBin {
    capacity: u32,
    stored: BTreeMap<String, u32>,
    fertilizer_items: u32,
    liquid_supply: u32,
    germlings: BTreeMap<String, u32>,
}

impl StorageBin {
    /// Create an empty bin holding at most `capacity` produce items.
    pub const fn new(capacity: u32) -> Self {
        Self {
            capacity,
            stored: BTreeMap::new(),
            fertilizer_items: 0,
            liquid_supply: 0,
            germlings: BTreeMap::new(),
        }
    }

    /// Stock `count` fertilizer items.
    #[must_use]
    pub const fn with_fertilizer(mut self, count: u32) -> Self {
        self.fertilizer_items = self.fertilizer_items.saturating_add(count);
        self
    }

    /// Stock `volume` units of liquid in supply containers.
    #[must_use]
    pub const fn with_liquid_supply(mut self, volume: u32) -> Self {
        self.liquid_supply = self.liquid_supply.saturating_add(volume);
        self
    }

    /// Stock `count` germlings of `name`.
    #[must_use]
    pub fn with_germlings(mut self, name: &str, count: u32) -> Self {
        self.add_germlings(name, count);
        self
    }

    /// Add `count` germlings of `name`.
    pub fn add_germlings(&mut self, name: &str, count: u32) {
        let entry = self.germlings.entry(name.to_owned()).or_insert(0);
        *entry = entry.saturating_add(count);
    }

    /// Add `count` fertilizer items.
    pub const fn add_fertilizer(&mut self, count: u32) {
        self.fertilizer_items = self.fertilizer_items.saturating_add(count);
    }

    /// Remove up to `count` of `name` from produce storage. Returns the amount removed.
    pub fn withdraw(&mut self, name: &str, count: u32) -> u32 {
        let Some(held) = self.stored.get_mut(name) else {
            return 0;
        };
        let taken = (*held).min(count);
        *held = held.saturating_sub(taken);
        if *held == 0 {
            self.stored.remove(name);
        }
        taken
    }

    /// Stored count of `name`.
    pub fn stored(&self, name: &str) -> u32 {
        self.stored.get(name).copied().unwrap_or(0)
    }

    /// Total produce items stored.
    pub fn total_stored(&self) -> u32 {
        self.stored
            .values()
            .fold(0_u32, |acc, count| acc.saturating_add(*count))
    }

    /// Remaining produce room.
    pub fn free_space(&self) -> u32 {
        self.capacity.saturating_sub(self.total_stored())
    }

    /// Fertilizer items left.
    pub const fn fertilizer_items(&self) -> u32 {
        self.fertilizer_items
    }

    /// Liquid left in supply containers.
    pub const fn liquid_supply(&self) -> u32 {
        self.liquid_supply
    }

    /// Germlings of `name` left.
    pub fn germlings(&self, name: &str) -> u32 {
        self.germlings.get(name).copied().unwrap_or(0)
    }
}

impl FarmInventory for StorageBin {
    fn add_produce(&mut self, mut item: ProduceItem) -> Option<ProduceItem> {
        let accepted = item.count.min(self.free_space());
        if accepted > 0 {
            let entry = self.stored.entry(item.name.clone()).or_insert(0);
            *entry = entry.saturating_add(accepted);
        }
        item.count = item.count.saturating_sub(accepted);
        (!item.is_empty()).then_some(item)
    }

    fn take_fertilizer(&mut self) -> bool {
        if self.fertilizer_items == 0 {
            return false;
        }
        self.fertilizer_items = self.fertilizer_items.saturating_sub(1);
        true
    }

    fn drain_liquid_supply(&mut self, room: u32) -> u32 {
        let drained = self.liquid_supply.min(room);
        self.liquid_supply = self.liquid_supply.saturating_sub(drained);
        drained
    }

    fn plant_germling(&mut self, world: &mut dyn FarmWorld, germling: &str, cell: Cell) -> bool {
        if world.block_at(cell).is_some() {
            return false;
        }
        let Some(held) = self.germlings.get_mut(germling) else {
            return false;
        };
        if *held == 0 {
            return false;
        }
        *held = held.saturating_sub(1);
        world.set_block(cell, Some(germling.to_owned()));
        true
    }
}
