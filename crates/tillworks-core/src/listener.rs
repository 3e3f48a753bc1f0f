//! Observers of farm activity.
//!
//! Listeners are notified in attach order. Two hooks can veto: a listener
//! returning `true` from [`FarmListener::cancel_task`] skips a direction
//! for one work call, and `true` from [`FarmListener::before_crop_harvest`]
//! drops the crop from the queue unharvested.

use std::fmt;
use std::sync::Arc;

use tillworks_types::{Cell, ComponentId, CropDescriptor, Direction, ProduceItem};
use tracing::debug;

use crate::strategy::{Crop, WorkStrategy};

/// Hooks fired by the controller during work. Every hook defaults to a no-op.
pub trait FarmListener: Send + Sync {
    /// Veto all work on `direction` for this call.
    fn cancel_task(&self, _strategy: &dyn WorkStrategy, _direction: Direction) -> bool {
        false
    }

    /// A row was cultivated.
    fn has_cultivated(
        &self,
        _strategy: &dyn WorkStrategy,
        _cell: Cell,
        _direction: Direction,
        _extent: u32,
    ) {
    }

    /// Crops were found and queued for harvest.
    fn has_scheduled_harvest(
        &self,
        _crops: &[Box<dyn Crop>],
        _strategy: &dyn WorkStrategy,
        _cell: Cell,
        _direction: Direction,
        _extent: u32,
    ) {
    }

    /// Windfall was picked up.
    fn has_collected(&self, _items: &[ProduceItem], _strategy: &dyn WorkStrategy) {}

    /// Veto the harvest of `crop`. A vetoed crop is dropped from the queue.
    fn before_crop_harvest(&self, _crop: &dyn Crop) -> bool {
        false
    }

    /// A crop was harvested and yielded `items`.
    fn after_crop_harvest(&self, _items: &[ProduceItem], _crop: &CropDescriptor) {}
}

/// Attached listeners in attach order.
#[derive(Default)]
pub struct ListenerBus {
    listeners: Vec<(ComponentId, Arc<dyn FarmListener>)>,
}

impl ListenerBus {
    /// Create an empty bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `listener` under `id`. Re-attaching an id replaces it in place.
    pub fn attach(&mut self, id: ComponentId, listener: Arc<dyn FarmListener>) {
        if let Some(slot) = self.listeners.iter_mut().find(|(existing, _)| *existing == id) {
            slot.1 = listener;
        } else {
            self.listeners.push((id, listener));
        }
        debug!(%id, count = self.listeners.len(), "Listener attached");
    }

    /// Detach the listener under `id`. Returns whether one was attached.
    pub fn detach(&mut self, id: ComponentId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        before != self.listeners.len()
    }

    /// Number of attached listeners.
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Whether no listener is attached.
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Whether any listener vetoes `direction`.
    pub fn cancel_task(&self, strategy: &dyn WorkStrategy, direction: Direction) -> bool {
        self.each().any(|l| l.cancel_task(strategy, direction))
    }

    /// Broadcast a cultivation.
    pub fn has_cultivated(
        &self,
        strategy: &dyn WorkStrategy,
        cell: Cell,
        direction: Direction,
        extent: u32,
    ) {
        for listener in self.each() {
            listener.has_cultivated(strategy, cell, direction, extent);
        }
    }

    /// Broadcast a scheduled harvest.
    pub fn has_scheduled_harvest(
        &self,
        crops: &[Box<dyn Crop>],
        strategy: &dyn WorkStrategy,
        cell: Cell,
        direction: Direction,
        extent: u32,
    ) {
        for listener in self.each() {
            listener.has_scheduled_harvest(crops, strategy, cell, direction, extent);
        }
    }

    /// Broadcast a windfall pickup.
    pub fn has_collected(&self, items: &[ProduceItem], strategy: &dyn WorkStrategy) {
        for listener in self.each() {
            listener.has_collected(items, strategy);
        }
    }

    /// Whether any listener vetoes harvesting `crop`. Stops at the first veto.
    pub fn before_crop_harvest(&self, crop: &dyn Crop) -> bool {
        self.each().any(|l| l.before_crop_harvest(crop))
    }

    /// Broadcast a completed crop harvest.
    pub fn after_crop_harvest(&self, items: &[ProduceItem], crop: &CropDescriptor) {
        for listener in self.each() {
            listener.after_crop_harvest(items, crop);
        }
    }

    fn each(&self) -> impl Iterator<Item = &dyn FarmListener> {
        self.listeners.iter().map(|(_, listener)| listener.as_ref())
    }
}

impl fmt::Debug for ListenerBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.listeners.iter().map(|(id, _)| id))
            .finish()
    }
}
