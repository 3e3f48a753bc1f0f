//! Farm controller, work scheduler, and resource governance for Tillworks.
//!
//! This crate holds the per-tick orchestration of one farm structure: the
//! lifecycle, the cultivate/harvest stage machine, resource-gated work,
//! the pending queues, power debounce and fault reporting.
//!
//! # Modules
//!
//! - [`components`] -- Ticking parts with random tick offsets
//! - [`config`] -- YAML configuration loading
//! - [`controller`] -- [`FarmController`]: lifecycle, update loop, sockets,
//!   environment queries
//! - [`faults`] -- The active fault set
//! - [`hydration`] -- Climate- and drought-driven liquid scaling
//! - [`inventory`] -- The storage seam and a bounded storage bin
//! - [`listener`] -- Observers of farm activity
//! - [`persist`] -- Snapshots and sync views
//! - [`power`] -- Debounced power observation
//! - [`queues`] -- Pending crops and produce
//! - [`resources`] -- Fertilizer and liquid stocks
//! - [`strategy`] -- Work strategies, crops and circuit boards
//!
//! The stage scheduler itself, [`FarmController::do_work`], lives in a
//! private `work` module.

pub mod components;
pub mod config;
pub mod controller;
pub mod faults;
pub mod hydration;
pub mod inventory;
pub mod listener;
pub mod persist;
pub mod power;
pub mod queues;
pub mod resources;
pub mod strategy;
mod work;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export primary types at crate root.
pub use components::{ActiveComponent, ActiveSet, ComponentPulse};
pub use config::{ConfigError, FarmConfig};
pub use controller::{FarmController, FarmError, UpdateOutcome};
pub use faults::FaultLog;
pub use hydration::{HydrationState, HydrationTracker};
pub use inventory::{FarmInventory, StorageBin};
pub use listener::{FarmListener, ListenerBus};
pub use persist::{FarmSnapshot, PersistError, SavedProvider};
pub use power::PowerGovernor;
pub use queues::{HarvestProvider, PendingQueues};
pub use resources::ResourceGovernor;
pub use strategy::{
    CircuitBoard, Crop, StrategyHost, StrategyRegistry, WorkContext, WorkStrategy,
    scaled_liquid_consumption,
};
