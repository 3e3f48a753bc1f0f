//! Fertilizer and liquid stocks.
//!
//! Fertilizer is bought in item-sized lumps: when the stock falls to the
//! buffer level, upkeep consumes one fertilizer item from storage and adds
//! its value. Liquid is poured into a bounded reservoir from supply
//! containers on a fixed interval. All arithmetic saturates at zero and at
//! capacity.

use tillworks_types::ResourceKind;
use tracing::{debug, trace};

use crate::config::ResourceConfig;
use crate::inventory::FarmInventory;

/// Fertilizer and liquid stocks of one farm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceGovernor {
    fertilizer: u32,
    fertilizer_per_item: u32,
    fertilizer_buffer: u32,
    fertilizer_capacity: u32,
    liquid: u32,
    liquid_capacity: u32,
}

impl ResourceGovernor {
    /// Create empty stocks sized from `config`.
    pub const fn new(config: &ResourceConfig) -> Self {
        Self {
            fertilizer: 0,
            fertilizer_per_item: config.fertilizer_per_item,
            fertilizer_buffer: config.fertilizer_buffer,
            fertilizer_capacity: config.fertilizer_capacity(),
            liquid: 0,
            liquid_capacity: config.reservoir_capacity,
        }
    }

    /// Current stock of `kind`.
    pub const fn stock(&self, kind: ResourceKind) -> u32 {
        match kind {
            ResourceKind::Fertilizer => self.fertilizer,
            ResourceKind::Liquid => self.liquid,
        }
    }

    /// Capacity of `kind`.
    pub const fn capacity(&self, kind: ResourceKind) -> u32 {
        match kind {
            ResourceKind::Fertilizer => self.fertilizer_capacity,
            ResourceKind::Liquid => self.liquid_capacity,
        }
    }

    /// Whether `amount` of `kind` is available. Zero is always affordable.
    pub const fn can_afford(&self, kind: ResourceKind, amount: u32) -> bool {
        amount == 0 || self.stock(kind) >= amount
    }

    /// Remove `amount` of `kind`, flooring at zero.
    pub const fn debit(&mut self, kind: ResourceKind, amount: u32) {
        match kind {
            ResourceKind::Fertilizer => self.fertilizer = self.fertilizer.saturating_sub(amount),
            ResourceKind::Liquid => self.liquid = self.liquid.saturating_sub(amount),
        }
    }

    /// `stock * scale / capacity`, or zero when the capacity is zero.
    pub fn scaled_reading(&self, kind: ResourceKind, scale: u32) -> u32 {
        let capacity = u64::from(self.capacity(kind));
        u64::from(self.stock(kind))
            .checked_mul(u64::from(scale))
            .and_then(|v| v.checked_div(capacity))
            .and_then(|v| u32::try_from(v).ok())
            .unwrap_or(0)
    }

    /// Top up fertilizer from `inventory` when at or below the buffer.
    ///
    /// Returns whether any fertilizer is in stock afterwards.
    pub fn maintain_fertilizer(&mut self, inventory: &mut dyn FarmInventory) -> bool {
        if self.fertilizer <= self.fertilizer_buffer && inventory.take_fertilizer() {
            self.fertilizer = self
                .fertilizer
                .saturating_add(self.fertilizer_per_item)
                .min(self.fertilizer_capacity);
            debug!(stock = self.fertilizer, "Consumed fertilizer item");
        }
        self.fertilizer > 0
    }

    /// Room left in the reservoir.
    pub const fn liquid_room(&self) -> u32 {
        self.liquid_capacity.saturating_sub(self.liquid)
    }

    /// Pour up to `amount` into the reservoir. Returns the volume accepted.
    pub fn fill_liquid(&mut self, amount: u32) -> u32 {
        let accepted = amount.min(self.liquid_room());
        self.liquid = self.liquid.saturating_add(accepted);
        if accepted > 0 {
            trace!(accepted, volume = self.liquid, "Filled reservoir");
        }
        accepted
    }

    /// Replace both stocks, clamped to capacity.
    pub fn restore(&mut self, fertilizer: u32, liquid: u32) {
        self.fertilizer = fertilizer.min(self.fertilizer_capacity);
        self.liquid = liquid.min(self.liquid_capacity);
    }
}
