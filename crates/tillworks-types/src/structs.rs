//! Core value structs shared across the Tillworks workspace.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{Direction, FaultCode};

// ---------------------------------------------------------------------------
// Grid geometry
// ---------------------------------------------------------------------------

/// An integer cell in the grid world.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export, export_to = "bindings/")]
pub struct Cell {
    /// East-west coordinate (east is positive).
    pub x: i32,
    /// Vertical coordinate (up is positive).
    pub y: i32,
    /// North-south coordinate (south is positive).
    pub z: i32,
}

impl Cell {
    /// Create a cell from its coordinates.
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// The cell `distance` steps away in `direction`. Saturates at the
    /// coordinate bounds.
    pub const fn offset(self, direction: Direction, distance: i32) -> Self {
        let (dx, dz) = direction.step();
        Self {
            x: self.x.saturating_add(dx.saturating_mul(distance)),
            y: self.y,
            z: self.z.saturating_add(dz.saturating_mul(distance)),
        }
    }

    /// The neighbouring cell in `direction`.
    pub const fn step(self, direction: Direction) -> Self {
        self.offset(direction, 1)
    }

    /// The cell shifted vertically by `dy`.
    pub const fn up(self, dy: i32) -> Self {
        Self {
            x: self.x,
            y: self.y.saturating_add(dy),
            z: self.z,
        }
    }

    /// The same column at height `y`.
    pub const fn at_height(self, y: i32) -> Self {
        Self {
            x: self.x,
            y,
            z: self.z,
        }
    }
}

impl core::fmt::Display for Cell {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Inclusive bounding box of an assembled farm structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Footprint {
    /// Corner with the smallest coordinates.
    pub min: Cell,
    /// Corner with the largest coordinates.
    pub max: Cell,
}

impl Footprint {
    /// Build a footprint from any two opposite corners.
    pub const fn new(a: Cell, b: Cell) -> Self {
        Self {
            min: Cell::new(min_i32(a.x, b.x), min_i32(a.y, b.y), min_i32(a.z, b.z)),
            max: Cell::new(max_i32(a.x, b.x), max_i32(a.y, b.y), max_i32(a.z, b.z)),
        }
    }

    /// Number of cells along the z axis.
    pub const fn size_north_south(&self) -> u32 {
        self.max.z.abs_diff(self.min.z).saturating_add(1)
    }

    /// Number of cells along the x axis.
    pub const fn size_east_west(&self) -> u32 {
        self.max.x.abs_diff(self.min.x).saturating_add(1)
    }

    /// Number of cells along the y axis.
    pub const fn height(&self) -> u32 {
        self.max.y.abs_diff(self.min.y).saturating_add(1)
    }

    /// The center cell, rounded towards the minimum corner.
    pub fn center(&self) -> Cell {
        Cell::new(
            midpoint(self.min.x, self.max.x),
            midpoint(self.min.y, self.max.y),
            midpoint(self.min.z, self.max.z),
        )
    }

    /// Whether `cell` lies inside the footprint.
    pub const fn contains(&self, cell: Cell) -> bool {
        cell.x >= self.min.x
            && cell.x <= self.max.x
            && cell.y >= self.min.y
            && cell.y <= self.max.y
            && cell.z >= self.min.z
            && cell.z <= self.max.z
    }
}

const fn min_i32(a: i32, b: i32) -> i32 {
    if a < b { a } else { b }
}

const fn max_i32(a: i32, b: i32) -> i32 {
    if a > b { a } else { b }
}

fn midpoint(low: i32, high: i32) -> i32 {
    let half = high.saturating_sub(low).checked_div(2).unwrap_or(0);
    low.saturating_add(half)
}

// ---------------------------------------------------------------------------
// Farm targets
// ---------------------------------------------------------------------------

/// One linear row of work cells extending from a farm side.
///
/// Created by the geometry planner with a `limit`, then refined once
/// against the ground profile, which fills in `extent` and `y_offset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct FarmTarget {
    /// First cell of the row at the structure's reference height.
    pub start: Cell,
    /// Direction the row runs in.
    pub direction: Direction,
    /// Maximum row length allowed by the layout.
    pub limit: u32,
    /// Number of workable cells along the row.
    pub extent: u32,
    /// Vertical offset from `start` to the working surface.
    pub y_offset: i32,
}

impl FarmTarget {
    /// A fresh, unrefined target.
    pub const fn new(start: Cell, direction: Direction, limit: u32) -> Self {
        Self {
            start,
            direction,
            limit,
            extent: 0,
            y_offset: 0,
        }
    }

    /// First cell of the working surface.
    pub const fn work_cell(&self) -> Cell {
        self.start.up(self.y_offset)
    }
}

// ---------------------------------------------------------------------------
// Produce and crops
// ---------------------------------------------------------------------------

/// A stack of produced items.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ProduceItem {
    /// Item name, e.g. `"wheat"`.
    pub name: String,
    /// Number of items in the stack.
    pub count: u32,
}

impl ProduceItem {
    /// Create a stack of `count` items named `name`.
    pub fn new(name: &str, count: u32) -> Self {
        Self {
            name: name.to_owned(),
            count,
        }
    }

    /// Whether the stack holds nothing.
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Serializable description of a crop waiting to be harvested.
///
/// Used to persist the pending crop queue. The strategy that scheduled the
/// crop turns the descriptor back into a live crop on restore.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct CropDescriptor {
    /// Where the crop stands.
    pub cell: Cell,
    /// Species or block name understood by the owning strategy.
    pub species: String,
}

// ---------------------------------------------------------------------------
// Environment
// ---------------------------------------------------------------------------

/// Raw climate values at a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ClimateReading {
    /// Temperature factor; 0.8 is temperate.
    #[ts(as = "String")]
    pub temperature: Decimal,
    /// Rainfall factor in `0..=1`.
    #[ts(as = "String")]
    pub humidity: Decimal,
}

/// The box of world a farm considers its own, relative to its center.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Territory {
    /// Center cell of the structure.
    pub center: Cell,
    /// Offset from the center to the box's minimum corner.
    pub offset: Cell,
    /// Size of the box along x.
    pub area_x: u32,
    /// Size of the box along y.
    pub area_y: u32,
    /// Size of the box along z.
    pub area_z: u32,
}

// ---------------------------------------------------------------------------
// Remote observer view
// ---------------------------------------------------------------------------

/// Snapshot of a farm sent to remote observers.
///
/// Carries geometry and resource read-outs only. Work in progress (pending
/// queues, stage) stays on the authoritative side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct FarmSyncView {
    /// Planned rows per side.
    pub targets: BTreeMap<Direction, Vec<FarmTarget>>,
    /// Current maximum scan distance.
    pub allowed_extent: u32,
    /// Fertilizer stock in units.
    pub fertilizer_stock: u32,
    /// Fertilizer stock scaled to `0..=100`.
    pub fertilizer_percent: u32,
    /// Liquid volume in the reservoir.
    pub liquid_volume: u32,
    /// Reservoir capacity.
    pub liquid_capacity: u32,
    /// Hydration modifier in whole percent.
    pub hydration_percent: u32,
    /// Active fault conditions.
    pub faults: Vec<FaultCode>,
    /// When the view was captured.
    pub captured_at: DateTime<Utc>,
}
