//! Scripted strategies, crops, listeners and parts for unit tests.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tillworks_types::{Cell, ClimateReading, CropDescriptor, Direction, Footprint, ProduceItem};
use tillworks_world::GridWorld;

use crate::components::ActiveComponent;
use crate::config::FarmConfig;
use crate::controller::FarmController;
use crate::listener::FarmListener;
use crate::strategy::{CircuitBoard, Crop, StrategyHost, StrategyRegistry, WorkContext, WorkStrategy};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Platform at y = 63 from -20 to 22 on both axes.
pub fn temperate_world() -> GridWorld {
    let mut world = GridWorld::new(ClimateReading {
        temperature: dec!(0.8),
        humidity: dec!(0.4),
    });
    world.fill_layer(Cell::new(-20, 0, -20), Cell::new(22, 0, 22), 63, "bricks");
    world
}

/// A 3x4x3 structure standing on the platform.
pub const fn footprint() -> Footprint {
    Footprint::new(Cell::new(0, 64, 0), Cell::new(2, 67, 2))
}

/// Registry holding `strategy` plus a plain "orchard" strategy.
pub fn registry_with(strategy: impl Into<Arc<ScriptedStrategy>>) -> Arc<StrategyRegistry> {
    let mut registry = StrategyRegistry::new();
    registry.register_strategy(Arc::new(ScriptedStrategy::new("orchard")));
    let strategy: Arc<ScriptedStrategy> = strategy.into();
    registry.register_strategy(strategy);
    Arc::new(registry)
}

/// A controller assembled on [`temperate_world`] with `strategy` on every side.
#[allow(clippy::unwrap_used)]
pub fn assembled(strategy: impl Into<Arc<ScriptedStrategy>>) -> (FarmController, GridWorld) {
    let world = temperate_world();
    let mut farm = FarmController::new(FarmConfig::default(), registry_with(strategy)).unwrap();
    farm.on_assembled(&world, footprint(), true).unwrap();
    (farm, world)
}

/// A strategy whose outcomes are set up by the test.
#[derive(Debug, Default)]
pub struct ScriptedStrategy {
    name: String,
    fertilizer: u32,
    liquid: u32,
    refuses: bool,
    windfall: Option<ProduceItem>,
    ripe: Mutex<BTreeSet<Cell>>,
    cultivated: Mutex<Vec<(Cell, Direction)>>,
}

impl ScriptedStrategy {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            ..Self::default()
        }
    }

    /// Fixed consumption, independent of hydration.
    pub fn with_consumption(mut self, fertilizer: u32, liquid: u32) -> Self {
        self.fertilizer = fertilizer;
        self.liquid = liquid;
        self
    }

    /// Every cultivation attempt fails.
    pub fn refusing(mut self) -> Self {
        self.refuses = true;
        self
    }

    /// Every collect call finds `item`.
    pub fn with_windfall(mut self, item: ProduceItem) -> Self {
        self.windfall = Some(item);
        self
    }

    pub fn ripen(&self, cell: Cell) {
        lock(&self.ripe).insert(cell);
    }

    pub fn cultivations(&self) -> usize {
        lock(&self.cultivated).len()
    }

    /// Row directions of every successful cultivation.
    pub fn cultivated_directions(&self) -> Vec<Direction> {
        lock(&self.cultivated).iter().map(|(_, d)| *d).collect()
    }
}

impl WorkStrategy for ScriptedStrategy {
    fn name(&self) -> &str {
        &self.name
    }

    fn fertilizer_consumption(&self) -> u32 {
        self.fertilizer
    }

    fn liquid_consumption(&self, _hydration: Decimal) -> u32 {
        self.liquid
    }

    fn cultivate(
        &self,
        _ctx: &mut WorkContext<'_>,
        cell: Cell,
        direction: Direction,
        _extent: u32,
    ) -> bool {
        if self.refuses {
            return false;
        }
        lock(&self.cultivated).push((cell, direction));
        true
    }

    fn harvest(
        &self,
        _ctx: &mut WorkContext<'_>,
        cell: Cell,
        direction: Direction,
        extent: u32,
    ) -> Vec<Box<dyn Crop>> {
        let mut ripe = lock(&self.ripe);
        let mut crops: Vec<Box<dyn Crop>> = Vec::new();
        let mut cursor = cell;
        for _ in 0..extent {
            if ripe.remove(&cursor) {
                crops.push(Box::new(TestCrop::ripe(cursor, "log", 2)));
            }
            cursor = cursor.step(direction);
        }
        crops
    }

    fn collect(&self, _ctx: &mut WorkContext<'_>) -> Vec<ProduceItem> {
        self.windfall.iter().cloned().collect()
    }

    fn restore_crop(&self, descriptor: &CropDescriptor) -> Option<Box<dyn Crop>> {
        Some(Box::new(TestCrop::ripe(descriptor.cell, &descriptor.species, 2)))
    }
}

/// A crop with a fixed yield.
#[derive(Debug)]
pub struct TestCrop {
    cell: Cell,
    species: String,
    yield_count: Option<u32>,
}

impl TestCrop {
    pub fn ripe(cell: Cell, species: &str, count: u32) -> Self {
        Self {
            cell,
            species: species.to_owned(),
            yield_count: Some(count),
        }
    }

    /// A crop that is gone by the time it is harvested.
    pub fn vanished(cell: Cell) -> Self {
        Self {
            cell,
            species: "log".to_owned(),
            yield_count: None,
        }
    }
}

impl Crop for TestCrop {
    fn descriptor(&self) -> CropDescriptor {
        CropDescriptor {
            cell: self.cell,
            species: self.species.clone(),
        }
    }

    fn harvest(self: Box<Self>, ctx: &mut WorkContext<'_>) -> Option<Vec<ProduceItem>> {
        let count = self.yield_count?;
        ctx.world.set_block(self.cell, None);
        Some(vec![ProduceItem::new(&self.species, count)])
    }
}

/// Counts notifications; optionally vetoes.
#[derive(Debug, Default)]
pub struct RecordingListener {
    cancel: Option<Direction>,
    veto_crops: bool,
    cultivated: AtomicUsize,
    scheduled: AtomicUsize,
    collected: AtomicUsize,
    after_harvests: AtomicUsize,
}

impl RecordingListener {
    pub fn cancelling(direction: Direction) -> Self {
        Self {
            cancel: Some(direction),
            ..Self::default()
        }
    }

    pub fn vetoing_crops() -> Self {
        Self {
            veto_crops: true,
            ..Self::default()
        }
    }

    pub fn cultivated(&self) -> usize {
        self.cultivated.load(Ordering::Relaxed)
    }

    pub fn scheduled(&self) -> usize {
        self.scheduled.load(Ordering::Relaxed)
    }

    pub fn collected(&self) -> usize {
        self.collected.load(Ordering::Relaxed)
    }

    pub fn after_harvests(&self) -> usize {
        self.after_harvests.load(Ordering::Relaxed)
    }
}

impl FarmListener for RecordingListener {
    fn cancel_task(&self, _strategy: &dyn WorkStrategy, direction: Direction) -> bool {
        self.cancel == Some(direction)
    }

    fn has_cultivated(&self, _strategy: &dyn WorkStrategy, _cell: Cell, _direction: Direction, _extent: u32) {
        self.cultivated.fetch_add(1, Ordering::Relaxed);
    }

    fn has_scheduled_harvest(
        &self,
        _crops: &[Box<dyn Crop>],
        _strategy: &dyn WorkStrategy,
        _cell: Cell,
        _direction: Direction,
        _extent: u32,
    ) {
        self.scheduled.fetch_add(1, Ordering::Relaxed);
    }

    fn has_collected(&self, _items: &[ProduceItem], _strategy: &dyn WorkStrategy) {
        self.collected.fetch_add(1, Ordering::Relaxed);
    }

    fn before_crop_harvest(&self, _crop: &dyn Crop) -> bool {
        self.veto_crops
    }

    fn after_crop_harvest(&self, _items: &[ProduceItem], _crop: &CropDescriptor) {
        self.after_harvests.fetch_add(1, Ordering::Relaxed);
    }
}

/// A part whose power and work requests are flipped from the test.
#[derive(Debug, Clone, Default)]
pub struct Switch {
    powered: Arc<AtomicBool>,
    requests: Arc<AtomicU32>,
}

impl Switch {
    pub fn set_powered(&self, powered: bool) {
        self.powered.store(powered, Ordering::Relaxed);
    }

    pub fn request_work(&self) {
        self.requests.fetch_add(1, Ordering::Relaxed);
    }
}

impl ActiveComponent for Switch {
    fn update(&mut self, _tick: u64) {}

    fn has_power(&self) -> bool {
        self.powered.load(Ordering::Relaxed)
    }

    fn take_work_request(&mut self) -> bool {
        self.requests
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| n.checked_sub(1))
            .is_ok()
    }
}

/// Assigns one named strategy to one side and counts hook calls.
#[derive(Debug)]
pub struct BoardSwapper {
    name: String,
    direction: Direction,
    strategy: String,
    insertions: AtomicUsize,
    removals: AtomicUsize,
}

impl BoardSwapper {
    pub fn new(name: &str, direction: Direction, strategy: &str) -> Self {
        Self {
            name: name.to_owned(),
            direction,
            strategy: strategy.to_owned(),
            insertions: AtomicUsize::new(0),
            removals: AtomicUsize::new(0),
        }
    }

    pub fn insertions(&self) -> usize {
        self.insertions.load(Ordering::Relaxed)
    }

    pub fn removals(&self) -> usize {
        self.removals.load(Ordering::Relaxed)
    }
}

impl CircuitBoard for BoardSwapper {
    fn name(&self) -> &str {
        &self.name
    }

    fn on_insertion(&self, _host: &mut dyn StrategyHost) {
        self.insertions.fetch_add(1, Ordering::Relaxed);
    }

    fn on_load(&self, host: &mut dyn StrategyHost) {
        let _ = host.assign_strategy(self.direction, &self.strategy);
    }

    fn on_removal(&self, _host: &mut dyn StrategyHost) {
        self.removals.fetch_add(1, Ordering::Relaxed);
    }
}
