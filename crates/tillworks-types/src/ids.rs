//! Identifiers for parts of a live farm assembly.
//!
//! Listeners and active components are keyed by [`ComponentId`] so that add
//! and remove notifications match without comparing trait objects. Ids are
//! UUID v7, so id order follows creation order.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Identifies a part attached to a farm assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(transparent)]
pub struct ComponentId(Uuid);

impl ComponentId {
    /// A fresh time-ordered id.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// The wrapped [`Uuid`].
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for ComponentId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for ComponentId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<Uuid> for ComponentId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}
