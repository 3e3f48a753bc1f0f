//! The farm controller: lifecycle, per-tick update, sockets and environment.
//!
//! A [`FarmController`] owns everything a farm remembers between ticks:
//! its footprint and planned rows, the stage, the pending queues, resource
//! stocks, power and hydration counters, the fault log, its strategies and
//! attached parts. The world and the inventory are borrowed per call.
//!
//! The host drives it in two ways:
//!
//! 1. [`FarmController::update`] once per simulation tick. This advances
//!    hydration, refills the reservoir, ticks attached parts, samples power
//!    and runs a work call for every work request the parts raised.
//! 2. [`FarmController::do_work`] directly, for hosts without parts of their
//!    own (see `work.rs`).

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use rust_decimal::Decimal;
use tillworks_types::{
    Cell, ClimateReading, ComponentId, Direction, FaultCode, Footprint, HumidityClass, Stage,
    TemperatureClass, Territory,
};
use tillworks_world::{FarmWorld, PlannerSettings, TargetSet, classify_humidity, classify_temperature};
use tracing::{debug, info, warn};

use crate::components::{ActiveComponent, ActiveSet};
use crate::config::FarmConfig;
use crate::faults::FaultLog;
use crate::hydration::HydrationTracker;
use crate::inventory::FarmInventory;
use crate::listener::{FarmListener, ListenerBus};
use crate::persist::PersistError;
use crate::power::PowerGovernor;
use crate::queues::PendingQueues;
use crate::resources::ResourceGovernor;
use crate::strategy::{CircuitBoard, StrategyHost, StrategyRegistry, WorkStrategy};

/// Smallest footprint side along x and z.
pub const MIN_SIDE: u32 = 3;

/// Largest footprint side along x and z.
pub const MAX_SIDE: u32 = 5;

/// Required footprint height.
pub const HEIGHT: u32 = 4;

/// Territory height.
const TERRITORY_HEIGHT: u32 = 13;

/// Territory base width before the extent is added on both sides.
const TERRITORY_BASE: u32 = 7;

/// Errors surfaced by controller operations.
#[derive(Debug, thiserror::Error)]
pub enum FarmError {
    /// No strategy is registered under the name.
    #[error("unknown strategy: {name}")]
    UnknownStrategy {
        /// The requested name.
        name: String,
    },

    /// No circuit board is registered under the name.
    #[error("unknown circuit board: {name}")]
    UnknownCircuit {
        /// The requested name.
        name: String,
    },

    /// The assembled structure breaks the size or part rules.
    #[error("invalid structure: {reason}")]
    InvalidStructure {
        /// What is wrong with the structure.
        reason: String,
    },

    /// A snapshot could not be encoded or decoded.
    #[error("persistence error: {source}")]
    Persist {
        /// The underlying persistence error.
        #[from]
        source: PersistError,
    },
}

/// What one [`FarmController::update`] call did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateOutcome {
    /// Tick counter after the update.
    pub tick: u64,
    /// Whether any attached part reported power.
    pub powered: bool,
    /// Whether the power fault is active.
    pub power_fault: bool,
    /// Work calls run this tick.
    pub work_calls: u32,
    /// Whether any of those calls did work.
    pub did_work: bool,
}

/// Automation controller of one farm structure.
pub struct FarmController {
    pub(crate) config: FarmConfig,
    pub(crate) registry: Arc<StrategyRegistry>,
    pub(crate) footprint: Option<Footprint>,
    pub(crate) targets: TargetSet,
    pub(crate) allowed_extent: u32,
    pub(crate) stage: Stage,
    pub(crate) queues: PendingQueues,
    pub(crate) strategies: BTreeMap<Direction, Arc<dyn WorkStrategy>>,
    pub(crate) default_strategy: Arc<dyn WorkStrategy>,
    pub(crate) socket: Option<Arc<dyn CircuitBoard>>,
    pub(crate) listeners: ListenerBus,
    pub(crate) components: ActiveSet,
    pub(crate) resources: ResourceGovernor,
    pub(crate) power: PowerGovernor,
    pub(crate) hydration: HydrationTracker,
    pub(crate) faults: FaultLog,
    pub(crate) cached_climate: Option<ClimateReading>,
    pub(crate) tick_count: u64,
    pub(crate) planned_at: u64,
}

impl FarmController {
    /// Create an unassembled controller with the default strategy on every side.
    ///
    /// # Errors
    ///
    /// Returns [`FarmError::UnknownStrategy`] if the configured default
    /// strategy is not registered.
    pub fn new(config: FarmConfig, registry: Arc<StrategyRegistry>) -> Result<Self, FarmError> {
        let default_strategy = registry.strategy(&config.farm.default_strategy)?;
        let strategies = Direction::ALL
            .into_iter()
            .map(|direction| (direction, Arc::clone(&default_strategy)))
            .collect();
        Ok(Self {
            resources: ResourceGovernor::new(&config.resources),
            power: PowerGovernor::new(config.power.debounce_ticks),
            config,
            registry,
            footprint: None,
            targets: TargetSet::new(),
            allowed_extent: 0,
            stage: Stage::default(),
            queues: PendingQueues::new(),
            strategies,
            default_strategy,
            socket: None,
            listeners: ListenerBus::new(),
            components: ActiveSet::new(),
            hydration: HydrationTracker::default(),
            faults: FaultLog::new(),
            cached_climate: None,
            tick_count: 0,
            planned_at: 0,
        })
    }

    // -----------------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------------

    /// The structure finished assembling with `footprint`.
    ///
    /// Validates the size and part rules, then plans the rows.
    ///
    /// # Errors
    ///
    /// Returns [`FarmError::InvalidStructure`] if the footprint is not
    /// 3 to 5 cells wide on both horizontal axes and exactly 4 tall, or if
    /// the structure has no power part.
    pub fn on_assembled(
        &mut self,
        world: &dyn FarmWorld,
        footprint: Footprint,
        has_power_part: bool,
    ) -> Result<(), FarmError> {
        validate_structure(&footprint, has_power_part)?;

        self.footprint = Some(footprint);
        self.cached_climate = None;
        self.plan_targets(world);
        info!(
            min = %footprint.min,
            max = %footprint.max,
            sides = self.targets.len(),
            allowed_extent = self.allowed_extent,
            "Farm assembled"
        );
        Ok(())
    }

    /// The structure broke apart. Stocks, hydration and the socket survive.
    pub fn on_disassembled(&mut self) {
        self.footprint = None;
        self.targets.clear();
        self.allowed_extent = 0;
        self.queues.clear();
        self.cached_climate = None;
        info!("Farm disassembled");
    }

    /// Whether the structure is assembled.
    pub const fn is_assembled(&self) -> bool {
        self.footprint.is_some()
    }

    /// The assembled footprint.
    pub const fn footprint(&self) -> Option<Footprint> {
        self.footprint
    }

    /// Re-run the geometry planner. Keeps the old rows if planning fails.
    pub(crate) fn plan_targets(&mut self, world: &dyn FarmWorld) {
        let Some(footprint) = self.footprint else {
            return;
        };
        self.planned_at = self.tick_count;
        let settings = PlannerSettings {
            size_multiplier: self.config.farm.size_multiplier,
            square: self.config.farm.square_farms,
        };
        match tillworks_world::plan(world, &footprint, settings) {
            Ok(layout) => {
                self.targets = layout.targets;
                self.allowed_extent = layout.allowed_extent;
                debug!(
                    sides = self.targets.len(),
                    rows = self.targets.values().map(Vec::len).sum::<usize>(),
                    allowed_extent = self.allowed_extent,
                    "Planned farm rows"
                );
            }
            Err(e) => warn!(error = %e, "Farm planning failed, keeping previous rows"),
        }
    }

    /// Whether the rows must be re-planned before the next work call: none
    /// are planned, or a full re-plan interval has passed since the last plan.
    pub(crate) fn replan_due(&self) -> bool {
        let interval = self.config.farm.replan_interval_ticks;
        self.targets.is_empty()
            || (interval > 0 && self.tick_count.saturating_sub(self.planned_at) >= interval)
    }

    // -----------------------------------------------------------------------
    // Update loop
    // -----------------------------------------------------------------------

    /// Advance one simulation tick. Does nothing while unassembled.
    pub fn update(
        &mut self,
        world: &mut dyn FarmWorld,
        inventory: &mut dyn FarmInventory,
    ) -> UpdateOutcome {
        let Some(footprint) = self.footprint else {
            return UpdateOutcome::default();
        };
        self.tick_count = self.tick_count.saturating_add(1);

        self.hydration.update(world.is_raining_at(footprint.min));

        if is_interval(self.tick_count, self.config.resources.liquid_drain_interval_ticks) {
            let drained = inventory.drain_liquid_supply(self.resources.liquid_room());
            self.resources.fill_liquid(drained);
        }

        let pulse = self.components.update_all(self.tick_count);
        let power_fault = self.power.observe(pulse.powered);
        self.faults.set_condition(power_fault, FaultCode::NoPower);

        let mut did_work = false;
        for _ in 0..pulse.work_requests {
            did_work |= self.do_work(world, inventory);
        }

        UpdateOutcome {
            tick: self.tick_count,
            powered: pulse.powered,
            power_fault,
            work_calls: pulse.work_requests,
            did_work,
        }
    }

    /// Attach a ticking part. Returns its random tick offset.
    pub fn attach_component(&mut self, id: ComponentId, component: Box<dyn ActiveComponent>) -> u64 {
        self.components.attach(id, component, &mut rand::rng())
    }

    /// Detach a ticking part.
    pub fn detach_component(&mut self, id: ComponentId) -> Option<Box<dyn ActiveComponent>> {
        self.components.detach(id)
    }

    /// Attach a listener.
    pub fn attach_listener(&mut self, id: ComponentId, listener: Arc<dyn FarmListener>) {
        self.listeners.attach(id, listener);
    }

    /// Detach a listener. Returns whether one was attached.
    pub fn detach_listener(&mut self, id: ComponentId) -> bool {
        self.listeners.detach(id)
    }

    // -----------------------------------------------------------------------
    // Strategies and the circuit socket
    // -----------------------------------------------------------------------

    /// Plug `board` into the socket, or empty it with `None`.
    pub fn set_socket(&mut self, board: Option<Arc<dyn CircuitBoard>>) {
        if let Some(old) = self.socket.take() {
            info!(board = old.name(), "Circuit board removed");
            old.on_removal(self);
        }
        self.socket.clone_from(&board);
        self.refresh_strategies();
        if let Some(new) = board {
            info!(board = new.name(), "Circuit board inserted");
            new.on_insertion(self);
        }
    }

    /// Plug the registered board called `name` into the socket.
    ///
    /// # Errors
    ///
    /// Returns [`FarmError::UnknownCircuit`] if no such board is registered.
    pub fn insert_board(&mut self, name: &str) -> Result<(), FarmError> {
        let board = self.registry.board(name)?;
        self.set_socket(Some(board));
        Ok(())
    }

    /// Name of the board in the socket.
    pub fn socket_name(&self) -> Option<&str> {
        self.socket.as_deref().map(CircuitBoard::name)
    }

    /// Reset every side to the default strategy, then let the socketed
    /// board apply its assignments.
    pub fn refresh_strategies(&mut self) {
        for direction in Direction::ALL {
            self.reset_strategy(direction);
        }
        if let Some(board) = self.socket.clone() {
            board.on_load(self);
        }
    }

    /// The strategy working `direction`.
    pub fn strategy(&self, direction: Direction) -> Option<&Arc<dyn WorkStrategy>> {
        self.strategies.get(&direction)
    }

    // -----------------------------------------------------------------------
    // Environment
    // -----------------------------------------------------------------------

    /// Raw climate at the farm, cached until the next assembly.
    pub fn climate(&mut self, world: &dyn FarmWorld) -> ClimateReading {
        if let Some(cached) = self.cached_climate {
            return cached;
        }
        let reading = world.climate_at(self.reference_cell());
        if self.footprint.is_some() {
            self.cached_climate = Some(reading);
        }
        reading
    }

    /// Temperature band at the farm.
    pub fn temperature(&mut self, world: &dyn FarmWorld) -> TemperatureClass {
        classify_temperature(self.climate(world).temperature)
    }

    /// Humidity band at the farm.
    pub fn humidity(&mut self, world: &dyn FarmWorld) -> HumidityClass {
        classify_humidity(self.climate(world).humidity)
    }

    /// Raw temperature factor at the farm.
    pub fn exact_temperature(&mut self, world: &dyn FarmWorld) -> Decimal {
        self.climate(world).temperature
    }

    /// Raw humidity factor at the farm.
    pub fn exact_humidity(&mut self, world: &dyn FarmWorld) -> Decimal {
        self.climate(world).humidity
    }

    /// Current liquid consumption multiplier.
    pub fn hydration_modifier(&mut self, world: &dyn FarmWorld) -> Decimal {
        let climate = self.climate(world);
        self.hydration.modifier(&climate)
    }

    /// The box of world the farm may touch. `None` while unassembled.
    pub fn territory(&self) -> Option<Territory> {
        let footprint = self.footprint?;
        let width = self
            .allowed_extent
            .saturating_mul(2)
            .saturating_add(TERRITORY_BASE);
        let half = |side: u32| 0_i32.saturating_sub(i32::try_from(side / 2).unwrap_or(i32::MAX));
        Some(Territory {
            center: footprint.center(),
            offset: Cell::new(half(width), -2, half(width)),
            area_x: width,
            area_y: TERRITORY_HEIGHT,
            area_z: width,
        })
    }

    /// Plant one `germling` from `inventory` at `cell`.
    pub fn plant_germling(
        &self,
        world: &mut dyn FarmWorld,
        inventory: &mut dyn FarmInventory,
        germling: &str,
        cell: Cell,
    ) -> bool {
        inventory.plant_germling(world, germling, cell)
    }

    fn reference_cell(&self) -> Cell {
        self.footprint.map(|f| f.min).unwrap_or_default()
    }

    // -----------------------------------------------------------------------
    // Read-outs
    // -----------------------------------------------------------------------

    /// Loaded configuration.
    pub const fn config(&self) -> &FarmConfig {
        &self.config
    }

    /// Stage the next work call will run.
    pub const fn stage(&self) -> Stage {
        self.stage
    }

    /// Planned rows per side.
    pub const fn targets(&self) -> &TargetSet {
        &self.targets
    }

    /// Maximum rows per side.
    pub const fn allowed_extent(&self) -> u32 {
        self.allowed_extent
    }

    /// Active faults.
    pub const fn faults(&self) -> &FaultLog {
        &self.faults
    }

    /// Resource stocks.
    pub const fn resources(&self) -> &ResourceGovernor {
        &self.resources
    }

    /// Mutable resource stocks, for hosts that supply resources directly.
    pub const fn resources_mut(&mut self) -> &mut ResourceGovernor {
        &mut self.resources
    }

    /// Power debounce state.
    pub const fn power(&self) -> &PowerGovernor {
        &self.power
    }

    /// Hydration counters.
    pub const fn hydration(&self) -> &HydrationTracker {
        &self.hydration
    }

    /// Pending crops and produce.
    pub const fn queues(&self) -> &PendingQueues {
        &self.queues
    }

    /// Ticks run since creation.
    pub const fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Attached listeners.
    pub const fn listeners(&self) -> &ListenerBus {
        &self.listeners
    }
}

impl StrategyHost for FarmController {
    fn set_strategy(&mut self, direction: Direction, strategy: Arc<dyn WorkStrategy>) {
        debug!(%direction, strategy = strategy.name(), "Strategy assigned");
        self.strategies.insert(direction, strategy);
    }

    fn reset_strategy(&mut self, direction: Direction) {
        self.strategies
            .insert(direction, Arc::clone(&self.default_strategy));
    }

    fn assign_strategy(&mut self, direction: Direction, name: &str) -> Result<(), FarmError> {
        let strategy = self.registry.strategy(name)?;
        self.set_strategy(direction, strategy);
        Ok(())
    }
}

impl fmt::Debug for FarmController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FarmController")
            .field("footprint", &self.footprint)
            .field("stage", &self.stage)
            .field("allowed_extent", &self.allowed_extent)
            .field("queues", &self.queues)
            .field("resources", &self.resources)
            .field("faults", &self.faults)
            .field("socket", &self.socket_name())
            .field("tick_count", &self.tick_count)
            .finish_non_exhaustive()
    }
}

/// Whether `tick` falls on a multiple of `interval`. Zero disables it.
pub(crate) const fn is_interval(tick: u64, interval: u64) -> bool {
    match tick.checked_rem(interval) {
        Some(rem) => rem == 0,
        None => false,
    }
}

fn validate_structure(footprint: &Footprint, has_power_part: bool) -> Result<(), FarmError> {
    let (x, y, z) = (
        footprint.size_east_west(),
        footprint.height(),
        footprint.size_north_south(),
    );
    let sides = MIN_SIDE..=MAX_SIDE;
    if !sides.contains(&x) || !sides.contains(&z) || y != HEIGHT {
        return Err(FarmError::InvalidStructure {
            reason: format!(
                "footprint is {x}x{y}x{z}, expected {MIN_SIDE}..={MAX_SIDE} wide and {HEIGHT} tall"
            ),
        });
    }
    if !has_power_part {
        return Err(FarmError::InvalidStructure {
            reason: "no power part".to_owned(),
        });
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;
    use tillworks_types::{Cell, FaultCode};

    use super::*;
    use crate::inventory::StorageBin;
    use crate::test_support::{
        BoardSwapper, ScriptedStrategy, Switch, assembled, footprint, registry_with, temperate_world,
    };

    #[test]
    fn new_requires_registered_default() {
        let registry = Arc::new(StrategyRegistry::new());
        let result = FarmController::new(FarmConfig::default(), registry);
        assert!(matches!(result, Err(FarmError::UnknownStrategy { name }) if name == "arboreal"));
    }

    #[test]
    fn structure_rules() {
        let world = temperate_world();
        let mut farm =
            FarmController::new(FarmConfig::default(), registry_with(ScriptedStrategy::new("arboreal"))).unwrap();

        let squat = Footprint::new(Cell::new(0, 64, 0), Cell::new(2, 66, 2));
        assert!(matches!(
            farm.on_assembled(&world, squat, true),
            Err(FarmError::InvalidStructure { .. })
        ));
        let wide = Footprint::new(Cell::new(0, 64, 0), Cell::new(5, 67, 2));
        assert!(farm.on_assembled(&world, wide, true).is_err());
        assert!(farm.on_assembled(&world, footprint(), false).is_err());
        assert!(!farm.is_assembled());

        let largest = Footprint::new(Cell::new(0, 64, 0), Cell::new(4, 67, 4));
        assert!(farm.on_assembled(&world, largest, true).is_ok());
        assert!(farm.is_assembled());
    }

    #[test]
    fn assembly_plans_rows() {
        let (farm, _world) = assembled(ScriptedStrategy::new("arboreal"));
        assert_eq!(farm.allowed_extent(), 7);
        assert_eq!(farm.targets().len(), 4);
    }

    #[test]
    fn disassembly_keeps_stocks() {
        let (mut farm, _world) = assembled(ScriptedStrategy::new("arboreal"));
        farm.resources_mut().restore(500, 700);
        farm.on_disassembled();

        assert!(farm.targets().is_empty());
        assert!(farm.territory().is_none());
        assert_eq!(farm.resources().stock(tillworks_types::ResourceKind::Fertilizer), 500);
        assert_eq!(farm.resources().stock(tillworks_types::ResourceKind::Liquid), 700);
    }

    #[test]
    fn update_is_inert_while_unassembled() {
        let mut world = temperate_world();
        let mut farm =
            FarmController::new(FarmConfig::default(), registry_with(ScriptedStrategy::new("arboreal"))).unwrap();
        let mut bin = StorageBin::new(10);
        assert_eq!(farm.update(&mut world, &mut bin), UpdateOutcome::default());
        assert_eq!(farm.tick_count(), 0);
    }

    #[test]
    fn power_fault_follows_components() {
        let (mut farm, mut world) = assembled(ScriptedStrategy::new("arboreal"));
        let mut bin = StorageBin::new(10);
        let switch = Switch::default();
        farm.attach_component(ComponentId::new(), Box::new(switch.clone()));

        for _ in 0..4 {
            assert!(!farm.update(&mut world, &mut bin).power_fault);
        }
        assert!(farm.update(&mut world, &mut bin).power_fault);
        assert!(farm.faults().contains(FaultCode::NoPower));

        switch.set_powered(true);
        let outcome = farm.update(&mut world, &mut bin);
        assert!(outcome.powered);
        assert!(!farm.faults().contains(FaultCode::NoPower));
    }

    #[test]
    fn work_requests_drive_work_calls() {
        let (mut farm, mut world) = assembled(ScriptedStrategy::new("arboreal"));
        let mut bin = StorageBin::new(10);
        let switch = Switch::default();
        farm.attach_component(ComponentId::new(), Box::new(switch.clone()));

        switch.request_work();
        let outcome = farm.update(&mut world, &mut bin);
        assert_eq!(outcome.work_calls, 1);
        assert_eq!(farm.stage(), Stage::Harvest);

        let outcome = farm.update(&mut world, &mut bin);
        assert_eq!(outcome.work_calls, 0);
        assert_eq!(farm.stage(), Stage::Harvest);
    }

    #[test]
    fn reservoir_refills_on_interval() {
        let (mut farm, mut world) = assembled(ScriptedStrategy::new("arboreal"));
        let mut bin = StorageBin::new(0).with_liquid_supply(15_000);
        for _ in 0..19 {
            farm.update(&mut world, &mut bin);
        }
        assert_eq!(farm.resources().stock(tillworks_types::ResourceKind::Liquid), 0);
        farm.update(&mut world, &mut bin);
        assert_eq!(farm.resources().stock(tillworks_types::ResourceKind::Liquid), 10_000);
        assert_eq!(bin.liquid_supply(), 5000);
    }

    #[test]
    fn socket_overrides_and_reset() {
        let (mut farm, _world) = assembled(ScriptedStrategy::new("arboreal"));
        let board = Arc::new(BoardSwapper::new("orchard-board", Direction::East, "orchard"));
        farm.set_socket(Some(board.clone()));

        assert_eq!(farm.socket_name(), Some("orchard-board"));
        assert_eq!(farm.strategy(Direction::East).map(|s| s.name().to_owned()), Some("orchard".to_owned()));
        assert_eq!(farm.strategy(Direction::West).map(|s| s.name().to_owned()), Some("arboreal".to_owned()));
        assert_eq!(board.insertions(), 1);

        farm.set_socket(None);
        assert_eq!(board.removals(), 1);
        assert_eq!(farm.strategy(Direction::East).map(|s| s.name().to_owned()), Some("arboreal".to_owned()));
    }

    #[test]
    fn unknown_names_are_rejected() {
        let (mut farm, _world) = assembled(ScriptedStrategy::new("arboreal"));
        assert!(matches!(
            farm.assign_strategy(Direction::North, "cocoa"),
            Err(FarmError::UnknownStrategy { .. })
        ));
        assert!(matches!(farm.insert_board("nope"), Err(FarmError::UnknownCircuit { .. })));
        assert!(farm.assign_strategy(Direction::North, "orchard").is_ok());
        assert_eq!(farm.strategy(Direction::North).map(|s| s.name().to_owned()), Some("orchard".to_owned()));
    }

    #[test]
    fn territory_box() {
        let (farm, _world) = assembled(ScriptedStrategy::new("arboreal"));
        let territory = farm.territory();
        assert_eq!(
            territory,
            Some(Territory {
                center: Cell::new(1, 65, 1),
                offset: Cell::new(-10, -2, -10),
                area_x: 21,
                area_y: 13,
                area_z: 21,
            })
        );
    }

    #[test]
    fn climate_is_cached_until_reassembly() {
        let (mut farm, mut world) = assembled(ScriptedStrategy::new("arboreal"));
        assert_eq!(farm.temperature(&world), TemperatureClass::Normal);
        assert_eq!(farm.humidity(&world), HumidityClass::Normal);

        world.set_climate(ClimateReading {
            temperature: dec!(1.5),
            humidity: dec!(0.9),
        });
        assert_eq!(farm.temperature(&world), TemperatureClass::Normal);

        assert!(farm.on_assembled(&world, footprint(), true).is_ok());
        assert_eq!(farm.temperature(&world), TemperatureClass::Hot);
        assert_eq!(farm.humidity(&world), HumidityClass::Damp);
        assert_eq!(farm.exact_humidity(&world), dec!(0.9));
    }

    #[test]
    fn plant_germling_delegates_to_inventory() {
        let (farm, mut world) = assembled(ScriptedStrategy::new("arboreal"));
        let mut bin = StorageBin::new(0).with_germlings("sapling", 1);
        let cell = Cell::new(-3, 64, -3);
        assert!(farm.plant_germling(&mut world, &mut bin, "sapling", cell));
        assert_eq!(world.block_at(cell), Some("sapling"));
    }

    #[test]
    fn interval_helper() {
        assert!(is_interval(400, 400));
        assert!(!is_interval(401, 400));
        assert!(!is_interval(5, 0));
    }
}
