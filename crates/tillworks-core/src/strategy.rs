//! Pluggable per-direction work strategies and the circuit socket.
//!
//! A [`WorkStrategy`] knows how to cultivate and harvest one kind of crop
//! along a row of ground. The controller assigns one strategy per
//! direction; a [`CircuitBoard`] plugged into the socket may override the
//! assignment. Strategies never hold a reference back to the controller:
//! everything they may touch arrives through a [`WorkContext`].

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use tillworks_types::{Cell, CropDescriptor, Direction, HumidityClass, ProduceItem, TemperatureClass};
use tillworks_world::FarmWorld;

use crate::controller::FarmError;
use crate::inventory::FarmInventory;

/// What a strategy or crop may touch during one work call.
pub struct WorkContext<'a> {
    /// The grid world around the farm.
    pub world: &'a mut dyn FarmWorld,
    /// The farm's storage.
    pub inventory: &'a mut dyn FarmInventory,
    /// Temperature band at the farm.
    pub temperature: TemperatureClass,
    /// Humidity band at the farm.
    pub humidity: HumidityClass,
}

impl WorkContext<'_> {
    /// Plant one `germling` from storage at `cell`.
    pub fn plant_germling(&mut self, germling: &str, cell: Cell) -> bool {
        self.inventory.plant_germling(&mut *self.world, germling, cell)
    }
}

impl fmt::Debug for WorkContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkContext")
            .field("temperature", &self.temperature)
            .field("humidity", &self.humidity)
            .finish_non_exhaustive()
    }
}

/// A crop scheduled for harvest.
pub trait Crop: Send {
    /// Location and species, for listeners and persistence.
    fn descriptor(&self) -> CropDescriptor;

    /// Remove the crop from the world and return its yield.
    ///
    /// `None` means the crop vanished before it could be harvested.
    fn harvest(self: Box<Self>, ctx: &mut WorkContext<'_>) -> Option<Vec<ProduceItem>>;
}

/// Per-direction farming behaviour.
pub trait WorkStrategy: Send + Sync {
    /// Registry name.
    fn name(&self) -> &str;

    /// Fertilizer spent per successful cultivation or harvest.
    fn fertilizer_consumption(&self) -> u32;

    /// Liquid spent per successful cultivation or harvest under `hydration`.
    fn liquid_consumption(&self, hydration: Decimal) -> u32;

    /// Work the row starting at `cell` running `extent` cells in `direction`.
    fn cultivate(
        &self,
        ctx: &mut WorkContext<'_>,
        cell: Cell,
        direction: Direction,
        extent: u32,
    ) -> bool;

    /// Find ripe crops on the row starting at `cell`.
    fn harvest(
        &self,
        ctx: &mut WorkContext<'_>,
        cell: Cell,
        direction: Direction,
        extent: u32,
    ) -> Vec<Box<dyn Crop>>;

    /// Pick up produce lying around the farm.
    fn collect(&self, _ctx: &mut WorkContext<'_>) -> Vec<ProduceItem> {
        Vec::new()
    }

    /// Rebuild a crop handle from its saved descriptor.
    fn restore_crop(&self, _descriptor: &CropDescriptor) -> Option<Box<dyn Crop>> {
        None
    }
}

/// Base liquid consumption scaled by `hydration`, truncated.
pub fn scaled_liquid_consumption(base: u32, hydration: Decimal) -> u32 {
    Decimal::from(base)
        .checked_mul(hydration)
        .and_then(|v| v.trunc().to_u32())
        .unwrap_or(base)
}

// ---------------------------------------------------------------------------
// Sockets
// ---------------------------------------------------------------------------

/// The strategy-assignment surface a circuit board sees.
pub trait StrategyHost {
    /// Install `strategy` on `direction`.
    fn set_strategy(&mut self, direction: Direction, strategy: Arc<dyn WorkStrategy>);

    /// Install the default strategy on `direction`.
    fn reset_strategy(&mut self, direction: Direction);

    /// Install the registered strategy called `name` on `direction`.
    fn assign_strategy(&mut self, direction: Direction, name: &str) -> Result<(), FarmError>;
}

/// A socketed board that overrides strategy assignment.
pub trait CircuitBoard: Send + Sync {
    /// Registry name.
    fn name(&self) -> &str;

    /// Runs once when the board is plugged in, after strategies are refreshed.
    fn on_insertion(&self, _host: &mut dyn StrategyHost) {}

    /// Apply the board's assignments. Runs on every refresh.
    fn on_load(&self, host: &mut dyn StrategyHost);

    /// Runs once when the board is pulled, before strategies are refreshed.
    fn on_removal(&self, _host: &mut dyn StrategyHost) {}
}

/// Named strategies and circuit boards available to a farm.
#[derive(Default)]
pub struct StrategyRegistry {
    strategies: BTreeMap<String, Arc<dyn WorkStrategy>>,
    boards: BTreeMap<String, Arc<dyn CircuitBoard>>,
}

impl StrategyRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `strategy` under its own name, replacing any previous entry.
    pub fn register_strategy(&mut self, strategy: Arc<dyn WorkStrategy>) {
        self.strategies.insert(strategy.name().to_owned(), strategy);
    }

    /// Register `board` under its own name, replacing any previous entry.
    pub fn register_board(&mut self, board: Arc<dyn CircuitBoard>) {
        self.boards.insert(board.name().to_owned(), board);
    }

    /// Look up a strategy.
    pub fn strategy(&self, name: &str) -> Result<Arc<dyn WorkStrategy>, FarmError> {
        self.strategies
            .get(name)
            .cloned()
            .ok_or_else(|| FarmError::UnknownStrategy {
                name: name.to_owned(),
            })
    }

    /// Look up a circuit board.
    pub fn board(&self, name: &str) -> Result<Arc<dyn CircuitBoard>, FarmError> {
        self.boards
            .get(name)
            .cloned()
            .ok_or_else(|| FarmError::UnknownCircuit {
                name: name.to_owned(),
            })
    }

    /// Registered strategy names.
    pub fn strategy_names(&self) -> impl Iterator<Item = &str> {
        self.strategies.keys().map(String::as_str)
    }
}

impl fmt::Debug for StrategyRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StrategyRegistry")
            .field("strategies", &self.strategies.keys().collect::<Vec<_>>())
            .field("boards", &self.boards.keys().collect::<Vec<_>>())
            .finish()
    }
}
