//! The demo farm the engine drives.
//!
//! One [`Arboreal`] strategy plants saplings along every row and fells
//! grown trees. A [`Gearbox`] powers the structure and asks for a work
//! cycle every few ticks, and [`HarvestLog`] reports each felled tree.
//! [`grow`] stands in for the world's own random growth.

use rand::Rng;
use rust_decimal::Decimal;
use tillworks_core::{
    ActiveComponent, Crop, FarmListener, StorageBin, WorkContext, WorkStrategy,
    scaled_liquid_consumption,
};
use tillworks_types::{
    Cell, ClimateReading, CropDescriptor, Direction, Footprint, ProduceItem, TemperatureClass,
};
use tillworks_world::{FarmWorld, GridWorld};
use tracing::{debug, info};

/// Germling planted by [`Arboreal`].
pub const SAPLING: &str = "sapling";

/// Block a sapling turns into once grown.
pub const TRUNK: &str = "log";

const TIMBER: &str = "timber";
const LOGS_PER_TREE: u32 = 4;

/// Platform height under the demo structure.
const PLATFORM_Y: i32 = 63;

/// Tree farming: a sapling on every other cell of a row.
#[derive(Debug, Default)]
pub struct Arboreal;

impl WorkStrategy for Arboreal {
    fn name(&self) -> &str {
        "arboreal"
    }

    fn fertilizer_consumption(&self) -> u32 {
        20
    }

    fn liquid_consumption(&self, hydration: Decimal) -> u32 {
        scaled_liquid_consumption(40, hydration)
    }

    fn cultivate(
        &self,
        ctx: &mut WorkContext<'_>,
        cell: Cell,
        direction: Direction,
        extent: u32,
    ) -> bool {
        if matches!(
            ctx.temperature,
            TemperatureClass::Icy | TemperatureClass::Hellish
        ) {
            return false;
        }

        let mut planted = false;
        let mut cursor = cell;
        for step in 0..extent {
            if step.checked_rem(2) == Some(0) && ctx.world.block_at(cursor).is_none() {
                planted |= ctx.plant_germling(SAPLING, cursor);
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
        let mut trees: Vec<Box<dyn Crop>> = Vec::new();
        let mut cursor = cell;
        for _ in 0..extent {
            if ctx.world.block_at(cursor) == Some(TRUNK) {
                trees.push(Box::new(Tree { cell: cursor }));
            }
            cursor = cursor.step(direction);
        }
        trees
    }

    fn restore_crop(&self, descriptor: &CropDescriptor) -> Option<Box<dyn Crop>> {
        (descriptor.species == TIMBER).then(|| {
            Box::new(Tree {
                cell: descriptor.cell,
            }) as Box<dyn Crop>
        })
    }
}

/// A grown tree waiting to be felled.
#[derive(Debug)]
struct Tree {
    cell: Cell,
}

impl Crop for Tree {
    fn descriptor(&self) -> CropDescriptor {
        CropDescriptor {
            cell: self.cell,
            species: TIMBER.to_owned(),
        }
    }

    fn harvest(self: Box<Self>, ctx: &mut WorkContext<'_>) -> Option<Vec<ProduceItem>> {
        if ctx.world.block_at(self.cell) != Some(TRUNK) {
            return None;
        }
        ctx.world.set_block(self.cell, None);
        Some(vec![
            ProduceItem::new(TRUNK, LOGS_PER_TREE),
            ProduceItem::new(SAPLING, 1),
        ])
    }
}

/// Turn each sapling into a trunk with a `1 / chance` probability.
pub fn grow(world: &mut GridWorld, rng: &mut impl Rng, chance: u32) -> usize {
    if chance == 0 {
        return 0;
    }
    let saplings: Vec<Cell> = world
        .blocks()
        .filter(|(_, block)| block.as_str() == SAPLING)
        .map(|(cell, _)| *cell)
        .collect();

    let mut grown = 0_usize;
    for cell in saplings {
        if rng.random_ratio(1, chance) {
            world.set_block(cell, Some(TRUNK.to_owned()));
            grown = grown.saturating_add(1);
        }
    }
    grown
}

/// Always powered; requests one work cycle every `interval` ticks.
#[derive(Debug)]
pub struct Gearbox {
    interval: u64,
    pending: bool,
}

impl Gearbox {
    /// A gearbox that cycles every `interval` ticks (0 = never).
    pub const fn new(interval: u64) -> Self {
        Self {
            interval,
            pending: false,
        }
    }
}

impl ActiveComponent for Gearbox {
    fn update(&mut self, tick: u64) {
        if tick.checked_rem(self.interval) == Some(0) {
            self.pending = true;
        }
    }

    fn has_power(&self) -> bool {
        true
    }

    fn take_work_request(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }
}

/// Logs harvests and windfall.
#[derive(Debug, Default)]
pub struct HarvestLog;

impl FarmListener for HarvestLog {
    fn has_collected(&self, items: &[ProduceItem], strategy: &dyn WorkStrategy) {
        debug!(strategy = strategy.name(), stacks = items.len(), "Windfall collected");
    }

    fn after_crop_harvest(&self, items: &[ProduceItem], crop: &CropDescriptor) {
        let total: u32 = items.iter().fold(0, |acc, item| acc.saturating_add(item.count));
        info!(
            species = %crop.species,
            x = crop.cell.x,
            y = crop.cell.y,
            z = crop.cell.z,
            items = total,
            "Crop harvested"
        );
    }
}

/// A temperate brick platform large enough for a multiplier-2 farm.
pub fn demo_world() -> GridWorld {
    let mut world = GridWorld::new(ClimateReading {
        temperature: Decimal::new(8, 1),
        humidity: Decimal::new(4, 1),
    });
    world.fill_layer(Cell::new(-24, 0, -24), Cell::new(26, 0, 26), PLATFORM_Y, "bricks");
    world
}

/// The 3x4x3 structure standing on [`demo_world`].
pub const fn demo_footprint() -> Footprint {
    Footprint::new(Cell::new(0, 64, 0), Cell::new(2, 67, 2))
}

/// Storage stocked for a long demo run.
pub fn demo_storage() -> StorageBin {
    StorageBin::new(4096)
        .with_fertilizer(32)
        .with_liquid_supply(500_000)
        .with_germlings(SAPLING, 512)
}
