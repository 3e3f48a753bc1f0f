//! Ticking parts attached to a farm.
//!
//! Gearboxes, pumps and similar parts tick alongside the controller. Each
//! part gets a random tick offset when it attaches, so parts of many farms
//! built in the same tick do not all fire their periodic work together.
//! Parts talk back to the controller only by reporting power and work
//! requests; the controller decides what to do with them.

use std::fmt;

use rand::Rng;
use tillworks_types::ComponentId;
use tracing::debug;

/// Exclusive upper bound of the per-part tick offset.
pub const TICK_OFFSET_RANGE: u64 = 256;

/// A part that ticks with the farm.
pub trait ActiveComponent: Send {
    /// Advance one tick. `tick` already includes the part's offset.
    fn update(&mut self, tick: u64);

    /// Whether the part currently has power to spend.
    fn has_power(&self) -> bool {
        false
    }

    /// Take one pending work request, if any. Polled once per tick.
    fn take_work_request(&mut self) -> bool {
        false
    }
}

struct Attached {
    id: ComponentId,
    offset: u64,
    component: Box<dyn ActiveComponent>,
}

/// What one round of component updates produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComponentPulse {
    /// Whether any part reported power.
    pub powered: bool,
    /// Work requests taken from all parts.
    pub work_requests: u32,
}

/// Attached active parts.
#[derive(Default)]
pub struct ActiveSet {
    attached: Vec<Attached>,
}

impl ActiveSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `component` under `id` with an offset drawn from `rng`.
    ///
    /// Returns the assigned offset.
    pub fn attach(
        &mut self,
        id: ComponentId,
        component: Box<dyn ActiveComponent>,
        rng: &mut impl Rng,
    ) -> u64 {
        let offset = rng.random_range(0..TICK_OFFSET_RANGE);
        self.attached.retain(|part| part.id != id);
        self.attached.push(Attached {
            id,
            offset,
            component,
        });
        debug!(%id, offset, "Active component attached");
        offset
    }

    /// Detach and return the part under `id`.
    pub fn detach(&mut self, id: ComponentId) -> Option<Box<dyn ActiveComponent>> {
        let index = self.attached.iter().position(|part| part.id == id)?;
        Some(self.attached.remove(index).component)
    }

    /// Number of attached parts.
    pub fn len(&self) -> usize {
        self.attached.len()
    }

    /// Whether no part is attached.
    pub fn is_empty(&self) -> bool {
        self.attached.is_empty()
    }

    /// Sample power, tick every part, then collect work requests.
    pub fn update_all(&mut self, tick: u64) -> ComponentPulse {
        let mut pulse = ComponentPulse::default();
        for part in &mut self.attached {
            pulse.powered |= part.component.has_power();
            part.component.update(tick.wrapping_add(part.offset));
            if part.component.take_work_request() {
                pulse.work_requests = pulse.work_requests.saturating_add(1);
            }
        }
        pulse
    }
}

impl fmt::Debug for ActiveSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.attached.iter().map(|part| (part.id, part.offset)))
            .finish()
    }
}
