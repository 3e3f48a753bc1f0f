//! Debounced power observation.
//!
//! Active components report whether any of them has power. A single
//! unpowered tick is normal while a buffer refills, so the fault is only
//! raised after more than `debounce` consecutive unpowered observations.
//! The counter saturates one past the threshold and any powered observation
//! resets it.

use tracing::debug;

/// Tracks consecutive unpowered observations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerGovernor {
    debounce: u32,
    unpowered: u32,
}

impl PowerGovernor {
    /// Create a governor tolerating `debounce` unpowered observations.
    pub const fn new(debounce: u32) -> Self {
        Self {
            debounce,
            unpowered: 0,
        }
    }

    /// Record one observation. Returns whether the power fault should be set.
    pub fn observe(&mut self, powered: bool) -> bool {
        if powered {
            if self.unpowered > 0 {
                debug!(after = self.unpowered, "Power restored");
            }
            self.unpowered = 0;
        } else {
            self.unpowered = self
                .unpowered
                .saturating_add(1)
                .min(self.debounce.saturating_add(1));
        }
        self.is_faulted()
    }

    /// Whether the current counter exceeds the debounce threshold.
    pub const fn is_faulted(&self) -> bool {
        self.unpowered > self.debounce
    }

    /// Consecutive unpowered observations, capped at `debounce + 1`.
    pub const fn unpowered_ticks(&self) -> u32 {
        self.unpowered
    }

    /// Restore the counter, clamped to the cap.
    pub fn restore(&mut self, unpowered: u32) {
        self.unpowered = unpowered.min(self.debounce.saturating_add(1));
    }
}
