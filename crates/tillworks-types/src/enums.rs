//! Enumeration types for the Tillworks farm controller.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// One of the four cardinal sides of a farm structure.
///
/// The declaration order is the fixed enumeration order the work scheduler
/// iterates in. Coordinates follow the grid convention: north is `-z`,
/// south is `+z`, east is `+x`, west is `-x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Direction {
    /// Towards negative z.
    North,
    /// Towards positive x.
    East,
    /// Towards positive z.
    South,
    /// Towards negative x.
    West,
}

impl Direction {
    /// All directions in scheduler order.
    pub const ALL: [Self; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// Unit step along the horizontal plane as `(dx, dz)`.
    pub const fn step(self) -> (i32, i32) {
        match self {
            Self::North => (0, -1),
            Self::East => (1, 0),
            Self::South => (0, 1),
            Self::West => (-1, 0),
        }
    }

    /// The direction pointing the other way.
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
        }
    }

    /// Whether this direction runs along the z axis.
    pub const fn is_north_south(self) -> bool {
        matches!(self, Self::North | Self::South)
    }
}

impl core::fmt::Display for Direction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let label = match self {
            Self::North => "north",
            Self::East => "east",
            Self::South => "south",
            Self::West => "west",
        };
        f.write_str(label)
    }
}

// ---------------------------------------------------------------------------
// Stage
// ---------------------------------------------------------------------------

/// The two-valued work cycle of a farm.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export, export_to = "bindings/")]
pub enum Stage {
    /// Prepare ground and plant.
    #[default]
    Cultivate,
    /// Scan rows for mature crops.
    Harvest,
}

impl Stage {
    /// The stage that follows this one.
    pub const fn next(self) -> Self {
        match self {
            Self::Cultivate => Self::Harvest,
            Self::Harvest => Self::Cultivate,
        }
    }
}

// ---------------------------------------------------------------------------
// Faults
// ---------------------------------------------------------------------------

/// A sticky, independently settable fault condition.
///
/// Faults are never fatal. Each one is raised when its check fails during
/// a tick and cleared as soon as the check passes again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum FaultCode {
    /// No attached component has reported power for longer than the
    /// debounce threshold.
    NoPower,
    /// The fertilizer stock cannot cover the next work action.
    NoFertilizer,
    /// The liquid reservoir cannot cover the next work action.
    NoLiquid,
    /// No row around the structure has workable ground.
    NoFarmland,
    /// Storage refused produce that is waiting to be stowed.
    NoSpace,
}

impl FaultCode {
    /// Every fault code, in display order.
    pub const ALL: [Self; 5] = [
        Self::NoPower,
        Self::NoFertilizer,
        Self::NoLiquid,
        Self::NoFarmland,
        Self::NoSpace,
    ];

    /// Short human-readable description.
    pub const fn description(self) -> &'static str {
        match self {
            Self::NoPower => "not enough power",
            Self::NoFertilizer => "out of fertilizer",
            Self::NoLiquid => "out of liquid",
            Self::NoFarmland => "no farmland in range",
            Self::NoSpace => "no space for produce",
        }
    }
}

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

/// The two consumables a farm spends on work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum ResourceKind {
    /// Granular fertilizer, tracked in discrete units.
    Fertilizer,
    /// Liquid held in the reservoir, tracked by volume.
    Liquid,
}

// ---------------------------------------------------------------------------
// Climate
// ---------------------------------------------------------------------------

/// Coarse temperature band of the farm's reference location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum TemperatureClass {
    /// Frozen ground.
    Icy,
    /// Below comfortable growth.
    Cold,
    /// Temperate.
    Normal,
    /// Above temperate.
    Warm,
    /// Desert or jungle heat.
    Hot,
    /// Beyond anything natural.
    Hellish,
}

/// Coarse humidity band of the farm's reference location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum HumidityClass {
    /// Dry air.
    Arid,
    /// Average rainfall.
    Normal,
    /// Wet air.
    Damp,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_alternates() {
        assert_eq!(Stage::Cultivate.next(), Stage::Harvest);
        assert_eq!(Stage::Harvest.next(), Stage::Cultivate);
        assert_eq!(Stage::default(), Stage::Cultivate);
    }

    #[test]
    fn opposite_is_involution() {
        for direction in Direction::ALL {
            assert_eq!(direction.opposite().opposite(), direction);
            let (dx, dz) = direction.step();
            let (ox, oz) = direction.opposite().step();
            assert_eq!(dx.saturating_add(ox), 0);
            assert_eq!(dz.saturating_add(oz), 0);
        }
    }

    #[test]
    fn direction_serializes_as_variant_name() {
        let json = serde_json::to_string(&Direction::West).ok();
        assert_eq!(json.as_deref(), Some("\"West\""));
    }
}
