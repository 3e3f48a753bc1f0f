//! End-to-end farm cycle through the public API: power up, plant, ripen,
//! harvest, save mid-harvest, restore and finish.

#![allow(clippy::unwrap_used, missing_docs)]

use std::sync::Arc;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tillworks_core::{
    ActiveComponent, Crop, FarmConfig, FarmController, StorageBin, StrategyRegistry, WorkContext,
    WorkStrategy, scaled_liquid_consumption,
};
use tillworks_types::{
    Cell, ClimateReading, ComponentId, CropDescriptor, Direction, FaultCode, Footprint,
    ProduceItem, ResourceKind, Stage,
};
use tillworks_world::{FarmWorld, GridWorld};

const SEED: &str = "wheat_seed";
const RIPE: &str = "wheat_ripe";

struct WheatStrategy;

impl WorkStrategy for WheatStrategy {
    fn name(&self) -> &str {
        "wheat"
    }

    fn fertilizer_consumption(&self) -> u32 {
        10
    }

    fn liquid_consumption(&self, hydration: Decimal) -> u32 {
        scaled_liquid_consumption(5, hydration)
    }

    fn cultivate(
        &self,
        ctx: &mut WorkContext<'_>,
        cell: Cell,
        direction: Direction,
        extent: u32,
    ) -> bool {
        let mut planted = false;
        let mut cursor = cell;
        for _ in 0..extent {
            if ctx.world.block_at(cursor).is_none() {
                planted |= ctx.plant_germling(SEED, cursor);
            }
            cursor = cursor.step(direction);
        }
        planted
    }

    fn harvest(
        &self,
        ctx: &mut WorkContext<'_>,
        cell: Cell,
        direction: Direction,
        extent: u32,
    ) -> Vec<Box<dyn Crop>> {
        let mut crops: Vec<Box<dyn Crop>> = Vec::new();
        let mut cursor = cell;
        for _ in 0..extent {
            if ctx.world.block_at(cursor) == Some(RIPE) {
                crops.push(Box::new(Wheat { cell: cursor }));
            }
            cursor = cursor.step(direction);
        }
        crops
    }

    fn restore_crop(&self, descriptor: &CropDescriptor) -> Option<Box<dyn Crop>> {
        Some(Box::new(Wheat {
            cell: descriptor.cell,
        }))
    }
}

struct Wheat {
    cell: Cell,
}

impl Crop for Wheat {
    fn descriptor(&self) -> CropDescriptor {
        CropDescriptor {
            cell: self.cell,
            species: "wheat".to_owned(),
        }
    }

    fn harvest(self: Box<Self>, ctx: &mut WorkContext<'_>) -> Option<Vec<ProduceItem>> {
        if ctx.world.block_at(self.cell) != Some(RIPE) {
            return None;
        }
        ctx.world.set_block(self.cell, None);
        Some(vec![ProduceItem::new("wheat", 1), ProduceItem::new(SEED, 1)])
    }
}

/// Always powered; asks for one work call per tick.
#[derive(Default)]
struct Gearbox {
    pending: bool,
}

impl ActiveComponent for Gearbox {
    fn update(&mut self, _tick: u64) {
        self.pending = true;
    }

    fn has_power(&self) -> bool {
        true
    }

    fn take_work_request(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }
}

fn registry() -> Arc<StrategyRegistry> {
    let mut registry = StrategyRegistry::new();
    registry.register_strategy(Arc::new(WheatStrategy));
    Arc::new(registry)
}

fn config() -> FarmConfig {
    FarmConfig::parse("farm:\n  default_strategy: wheat\n").unwrap()
}

fn world() -> GridWorld {
    let mut world = GridWorld::new(ClimateReading {
        temperature: dec!(0.8),
        humidity: dec!(0.4),
    });
    world.fill_layer(Cell::new(-20, 0, -20), Cell::new(22, 0, 22), 63, "bricks");
    world
}

fn ripen(world: &mut GridWorld) {
    let seeded: Vec<Cell> = world
        .blocks()
        .filter(|(_, block)| block.as_str() == SEED)
        .map(|(cell, _)| *cell)
        .collect();
    for cell in seeded {
        world.set_block(cell, Some(RIPE.to_owned()));
    }
}

#[test]
fn full_farm_cycle_survives_save_and_restore() {
    let mut world = world();
    let mut bin = StorageBin::new(1000)
        .with_fertilizer(4)
        .with_liquid_supply(20_000)
        .with_germlings(SEED, 200);

    let mut farm = FarmController::new(config(), registry()).unwrap();
    let footprint = Footprint::new(Cell::new(0, 64, 0), Cell::new(2, 67, 2));
    farm.on_assembled(&world, footprint, true).unwrap();
    assert_eq!(farm.targets().len(), 4);

    // No parts yet: the power fault trips, and the reservoir fills on tick 20.
    for _ in 0..20 {
        farm.update(&mut world, &mut bin);
    }
    assert!(farm.faults().contains(FaultCode::NoPower));
    assert_eq!(farm.resources().stock(ResourceKind::Liquid), 10_000);

    farm.attach_component(ComponentId::new(), Box::<Gearbox>::default());

    // Tick 21: cultivate the north side (7 rows, 42 cells).
    let outcome = farm.update(&mut world, &mut bin);
    assert!(outcome.did_work);
    assert!(!farm.faults().contains(FaultCode::NoPower));
    assert_eq!(bin.germlings(SEED), 158);
    assert_eq!(bin.fertilizer_items(), 3);
    assert_eq!(farm.resources().stock(ResourceKind::Fertilizer), 1930);
    // Liquid: 7 rows at 5 * 1.6 each.
    assert_eq!(farm.resources().stock(ResourceKind::Liquid), 9944);

    // Tick 22: nothing is ripe yet.
    assert!(!farm.update(&mut world, &mut bin).did_work);
    assert_eq!(farm.stage(), Stage::Cultivate);

    ripen(&mut world);

    // Tick 23: north is full, so the east side gets planted.
    assert!(farm.update(&mut world, &mut bin).did_work);
    assert_eq!(bin.germlings(SEED), 116);

    // Tick 24: the first north row is scheduled for harvest.
    assert!(farm.update(&mut world, &mut bin).did_work);
    assert_eq!(farm.queues().crop_count(), 9);
    assert_eq!(
        farm.queues().provider().map(|p| p.direction),
        Some(Direction::North)
    );

    let saved = farm.save_json().unwrap();
    drop(farm);

    let mut farm = FarmController::new(config(), registry()).unwrap();
    farm.load_json(&saved).unwrap();
    farm.attach_component(ComponentId::new(), Box::<Gearbox>::default());
    assert_eq!(farm.queues().crop_count(), 9);
    assert_eq!(farm.tick_count(), 24);

    for _ in 0..9 {
        assert!(farm.update(&mut world, &mut bin).did_work);
    }
    assert!(!farm.queues().has_crops());
    assert_eq!(bin.stored("wheat"), 9);
    assert_eq!(bin.stored(SEED), 9);
    assert_eq!(farm.resources().stock(ResourceKind::Fertilizer), 1930 - 70 - 90);
    assert!(farm.faults().is_clear());

    // The harvested row is bare again.
    let first_row = farm
        .targets()
        .get(&Direction::North)
        .and_then(|rows| rows.first())
        .copied()
        .unwrap();
    assert_eq!(world.block_at(first_row.work_cell()), None);
}
