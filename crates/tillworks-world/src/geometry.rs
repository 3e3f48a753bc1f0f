//! Target geometry: the pinwheel of work rows around a farm structure.
//!
//! Each side of the structure gets a list of [`FarmTarget`] rows, nearest
//! first. A side's rows run along its *layout direction*, which is the side
//! rotated a quarter turn, so each side starts where the previous side's
//! rows end:
//!
//! ```text
//!        W <-------- N
//!        |  +-----+  ^
//!        |  |farm |  |
//!        v  +-----+  |
//!        S --------> E
//! ```
//!
//! Planning walks outward one row at a time and stops at the first row with
//! no platform beneath it, so rows are always contiguous from the structure
//! outward. A second pass measures each row's extent against the actual
//! platform and records the offset to the working surface.

use std::collections::BTreeMap;

use tillworks_types::{Cell, Direction, FarmTarget, Footprint};
use tracing::debug;

use crate::error::WorldError;
use crate::terrain::FarmWorld;

/// Planned rows per side, nearest row first.
pub type TargetSet = BTreeMap<Direction, Vec<FarmTarget>>;

/// How far above the reference height the ground probe starts.
const GROUND_SEARCH_UP: i32 = 2;

/// How far below the reference height the ground probe reaches.
const GROUND_SEARCH_DOWN: i32 = 3;

/// Tunables for a planning pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannerSettings {
    /// Multiplier applied to the structure's larger side length.
    pub size_multiplier: u32,
    /// Keep every row at full length instead of shortening rows diagonally.
    pub square: bool,
}

/// Output of a planning pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlannedLayout {
    /// Rows per side.
    pub targets: TargetSet,
    /// Maximum number of rows per side.
    pub allowed_extent: u32,
}

/// The direction a side's rows run in.
pub const fn layout_direction(side: Direction) -> Direction {
    match side {
        Direction::North => Direction::West,
        Direction::West => Direction::South,
        Direction::South => Direction::East,
        Direction::East => Direction::North,
    }
}

/// Maximum scan distance: `max(ns, ew) * size_multiplier + 1`.
///
/// # Errors
///
/// Returns [`WorldError::ArithmeticOverflow`] if the product overflows.
pub fn allowed_extent(footprint: &Footprint, size_multiplier: u32) -> Result<u32, WorldError> {
    footprint
        .size_north_south()
        .max(footprint.size_east_west())
        .checked_mul(size_multiplier)
        .and_then(|v| v.checked_add(1))
        .ok_or(WorldError::ArithmeticOverflow)
}

/// Plan the rows around `footprint`.
///
/// Sides whose first row has no platform within the probe window get no
/// entry at all.
///
/// # Errors
///
/// Returns [`WorldError::ArithmeticOverflow`] if the extent computation
/// overflows.
pub fn plan(
    world: &dyn FarmWorld,
    footprint: &Footprint,
    settings: PlannerSettings,
) -> Result<PlannedLayout, WorldError> {
    let extent = allowed_extent(footprint, settings.size_multiplier)?;
    let origin = footprint.center();

    let mut targets = TargetSet::new();
    for side in Direction::ALL {
        let width = if side.is_north_south() {
            footprint.size_east_west()
        } else {
            footprint.size_north_south()
        };
        // Rows extend sideways past the structure, so they reach further.
        let max_limit = extent
            .checked_add(width)
            .ok_or(WorldError::ArithmeticOverflow)?;

        let layout = layout_direction(side);
        let corner = corner(footprint, origin, side, layout);

        let Some(ground) = ground_position(world, corner.step(side)) else {
            debug!(%side, %corner, "No platform next to farm side");
            continue;
        };

        let mut rows = Vec::new();
        let mut location = corner;
        for i in 0..extent {
            location = location.step(side);
            if !world.is_platform(location.at_height(ground.y)) {
                break;
            }

            let limit = if settings.square {
                max_limit
            } else {
                max_limit.saturating_sub(i).saturating_sub(1)
            };
            rows.push(FarmTarget::new(location, layout, limit));
        }

        targets.insert(side, rows);
    }

    refine(world, &mut targets);

    Ok(PlannedLayout {
        targets,
        allowed_extent: extent,
    })
}

/// Find the platform cell in the column of `cell`, scanning from two cells
/// above down to three cells below.
pub fn ground_position(world: &dyn FarmWorld, cell: Cell) -> Option<Cell> {
    (-GROUND_SEARCH_DOWN..=GROUND_SEARCH_UP)
        .rev()
        .map(|dy| cell.up(dy))
        .find(|candidate| world.is_platform(*candidate))
}

/// Outermost structure cell towards `side`, then towards the opposite of
/// `layout`.
const fn corner(footprint: &Footprint, origin: Cell, side: Direction, layout: Direction) -> Cell {
    edge(footprint, edge(footprint, origin, side), layout.opposite())
}

const fn edge(footprint: &Footprint, cell: Cell, direction: Direction) -> Cell {
    match direction {
        Direction::North => Cell::new(cell.x, cell.y, footprint.min.z),
        Direction::South => Cell::new(cell.x, cell.y, footprint.max.z),
        Direction::East => Cell::new(footprint.max.x, cell.y, cell.z),
        Direction::West => Cell::new(footprint.min.x, cell.y, cell.z),
    }
}

/// Measure extents and working-surface offsets against the platform found
/// under each side's first row.
fn refine(world: &dyn FarmWorld, targets: &mut TargetSet) {
    for rows in targets.values_mut() {
        let Some(first) = rows.first() else {
            continue;
        };
        let platform = ground_position(world, first.start);
        for target in rows.iter_mut() {
            set_extent_and_offset(world, target, platform);
        }
    }
}

fn set_extent_and_offset(world: &dyn FarmWorld, target: &mut FarmTarget, platform: Option<Cell>) {
    let Some(platform) = platform else {
        target.extent = 0;
        return;
    };

    let mut cursor = target.start.at_height(platform.y);
    let mut extent: u32 = 0;
    while extent < target.limit && world.is_platform(cursor) {
        extent = extent.saturating_add(1);
        cursor = cursor.step(target.direction);
    }

    target.extent = extent;
    target.y_offset = platform
        .y
        .saturating_add(1)
        .saturating_sub(target.start.y);
}
