//! Active fault conditions.
//!
//! A fault is raised or cleared through [`FaultLog::set_condition`], which
//! also reports whether the condition holds so callers can bail out in one
//! expression. Raising an already-active fault is a no-op.

use std::collections::BTreeSet;

use tillworks_types::FaultCode;
use tracing::{info, warn};

/// The set of currently active faults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FaultLog {
    active: BTreeSet<FaultCode>,
}

impl FaultLog {
    /// Create an empty fault log.
    pub const fn new() -> Self {
        Self {
            active: BTreeSet::new(),
        }
    }

    /// Raise `code` if `active`, clear it otherwise. Returns `active`.
    pub fn set_condition(&mut self, active: bool, code: FaultCode) -> bool {
        if active {
            if self.active.insert(code) {
                warn!(fault = ?code, description = code.description(), "Fault raised");
            }
        } else if self.active.remove(&code) {
            info!(fault = ?code, "Fault cleared");
        }
        active
    }

    /// Whether `code` is currently active.
    pub fn contains(&self, code: FaultCode) -> bool {
        self.active.contains(&code)
    }

    /// Whether no fault is active.
    pub fn is_clear(&self) -> bool {
        self.active.is_empty()
    }

    /// Active faults in declaration order.
    pub fn active(&self) -> impl Iterator<Item = FaultCode> + '_ {
        self.active.iter().copied()
    }

    /// Replace the active set wholesale.
    pub fn restore(&mut self, codes: impl IntoIterator<Item = FaultCode>) {
        self.active = codes.into_iter().collect();
    }
}
