//! Work found but not yet applied.
//!
//! Harvesting is split in two: a scan finds ripe crops and queues them, and
//! later work calls resolve them one at a time. Produce that storage could
//! not take waits in its own queue and blocks all other work until it is
//! delivered. Both queues are LIFO stacks.

use std::fmt;
use std::sync::Arc;

use tillworks_types::{CropDescriptor, Direction, ProduceItem};

use crate::inventory::FarmInventory;
use crate::strategy::{Crop, WorkStrategy};

/// The strategy whose harvest scan filled the crop queue.
#[derive(Clone)]
pub struct HarvestProvider {
    /// Side the strategy was working.
    pub direction: Direction,
    /// The strategy itself.
    pub strategy: Arc<dyn WorkStrategy>,
}

impl fmt::Debug for HarvestProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HarvestProvider")
            .field("direction", &self.direction)
            .field("strategy", &self.strategy.name())
            .finish()
    }
}

/// Pending crops and produce.
#[derive(Default)]
pub struct PendingQueues {
    crops: Vec<Box<dyn Crop>>,
    produce: Vec<ProduceItem>,
    provider: Option<HarvestProvider>,
}

impl PendingQueues {
    /// Create empty queues.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `crops` and pin `provider` as their harvest provider.
    pub fn push_crops(&mut self, crops: Vec<Box<dyn Crop>>, provider: HarvestProvider) {
        self.crops.extend(crops);
        self.provider = Some(provider);
    }

    /// The crop that will be resolved next.
    pub fn peek_crop(&self) -> Option<&dyn Crop> {
        self.crops.last().map(|crop| &**crop)
    }

    /// Remove the crop that would be resolved next.
    pub fn pop_crop(&mut self) -> Option<Box<dyn Crop>> {
        self.crops.pop()
    }

    /// Whether any crop is queued.
    pub fn has_crops(&self) -> bool {
        !self.crops.is_empty()
    }

    /// Number of queued crops.
    pub fn crop_count(&self) -> usize {
        self.crops.len()
    }

    /// Descriptors of queued crops, bottom of the stack first.
    pub fn crop_descriptors(&self) -> Vec<CropDescriptor> {
        self.crops.iter().map(|crop| crop.descriptor()).collect()
    }

    /// The pinned harvest provider.
    pub const fn provider(&self) -> Option<&HarvestProvider> {
        self.provider.as_ref()
    }

    /// Queue produce that storage could not take.
    pub fn push_produce(&mut self, item: ProduceItem) {
        if !item.is_empty() {
            self.produce.push(item);
        }
    }

    /// Whether any produce is waiting.
    pub fn has_produce(&self) -> bool {
        !self.produce.is_empty()
    }

    /// Waiting produce, bottom of the stack first.
    pub fn produce(&self) -> &[ProduceItem] {
        &self.produce
    }

    /// Offer every waiting item to `inventory`, top of the stack first.
    ///
    /// Whatever does not fit goes back on the stack in its original order.
    /// Returns whether the queue is now empty.
    pub fn drain_produce(&mut self, inventory: &mut dyn FarmInventory) -> bool {
        let mut kept = Vec::new();
        while let Some(item) = self.produce.pop() {
            if let Some(rest) = inventory.add_produce(item) {
                kept.push(rest);
            }
        }
        kept.reverse();
        self.produce = kept;
        self.produce.is_empty()
    }

    /// Replace the contents wholesale.
    pub fn restore(
        &mut self,
        crops: Vec<Box<dyn Crop>>,
        produce: Vec<ProduceItem>,
        provider: Option<HarvestProvider>,
    ) {
        self.crops = crops;
        self.produce = produce;
        self.provider = provider;
    }

    /// Drop everything, including the provider.
    pub fn clear(&mut self) {
        self.crops.clear();
        self.produce.clear();
        self.provider = None;
    }
}

impl fmt::Debug for PendingQueues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingQueues")
            .field("crops", &self.crops.len())
            .field("produce", &self.produce)
            .field("provider", &self.provider)
            .finish()
    }
}
