//! The grid-world seam the farm controller and its strategies work against.
//!
//! [`FarmWorld`] is the narrow view of the host simulation the controller
//! needs: block lookups, platform detection, climate and rain. [`GridWorld`]
//! is a sparse in-memory implementation used by hosts without a world of
//! their own and by tests.

use std::collections::{BTreeMap, BTreeSet};

use tillworks_types::{Cell, ClimateReading};

/// Block names that count as farm platform by default.
pub const DEFAULT_PLATFORM_BLOCKS: [&str; 4] = ["bricks", "stone_bricks", "sandstone", "mossy_bricks"];

/// Read and write access to the grid world around a farm.
pub trait FarmWorld {
    /// The block at `cell`, or `None` for air.
    fn block_at(&self, cell: Cell) -> Option<&str>;

    /// Replace the block at `cell`. `None` clears it to air.
    fn set_block(&mut self, cell: Cell, block: Option<String>);

    /// Whether the block at `cell` is valid farm platform material.
    fn is_platform(&self, cell: Cell) -> bool;

    /// Raw climate values at `cell`.
    fn climate_at(&self, cell: Cell) -> ClimateReading;

    /// Whether rain is falling on `cell`.
    fn is_raining_at(&self, cell: Cell) -> bool;
}

/// Sparse in-memory grid world.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridWorld {
    /// Non-air blocks by cell.
    blocks: BTreeMap<Cell, String>,
    /// Block names accepted as platform.
    platform_blocks: BTreeSet<String>,
    /// Uniform climate of the whole world.
    climate: ClimateReading,
    /// Whether it is raining everywhere.
    raining: bool,
}

impl GridWorld {
    /// Create an empty world with a uniform climate.
    pub fn new(climate: ClimateReading) -> Self {
        Self {
            blocks: BTreeMap::new(),
            platform_blocks: DEFAULT_PLATFORM_BLOCKS
                .iter()
                .map(|name| (*name).to_owned())
                .collect(),
            climate,
            raining: false,
        }
    }

    /// Lay a horizontal rectangle of `block` at height `y`, corners inclusive.
    pub fn fill_layer(&mut self, from: Cell, to: Cell, y: i32, block: &str) {
        let (x0, x1) = (from.x.min(to.x), from.x.max(to.x));
        let (z0, z1) = (from.z.min(to.z), from.z.max(to.z));
        for x in x0..=x1 {
            for z in z0..=z1 {
                self.blocks.insert(Cell::new(x, y, z), block.to_owned());
            }
        }
    }

    /// Start or stop rain.
    pub const fn set_raining(&mut self, raining: bool) {
        self.raining = raining;
    }

    /// Replace the world's climate.
    pub const fn set_climate(&mut self, climate: ClimateReading) {
        self.climate = climate;
    }

    /// Accept an extra block name as platform material.
    pub fn add_platform_block(&mut self, name: &str) {
        self.platform_blocks.insert(name.to_owned());
    }

    /// Iterate over every non-air block.
    pub fn blocks(&self) -> impl Iterator<Item = (&Cell, &String)> {
        self.blocks.iter()
    }

    /// Number of non-air blocks.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }
}

impl FarmWorld for GridWorld {
    fn block_at(&self, cell: Cell) -> Option<&str> {
        self.blocks.get(&cell).map(String::as_str)
    }

    fn set_block(&mut self, cell: Cell, block: Option<String>) {
        match block {
            Some(name) => {
                self.blocks.insert(cell, name);
            }
            None => {
                self.blocks.remove(&cell);
            }
        }
    }

    fn is_platform(&self, cell: Cell) -> bool {
        self.blocks
            .get(&cell)
            .is_some_and(|name| self.platform_blocks.contains(name))
    }

    fn climate_at(&self, _cell: Cell) -> ClimateReading {
        self.climate
    }

    fn is_raining_at(&self, _cell: Cell) -> bool {
        self.raining
    }
}
