//! Grid world, target geometry, and climate for the Tillworks farm controller.
//!
//! This crate models the physical side of a farm: the world it stands in,
//! the rows of ground it works, and the climate of its location.
//!
//! # Modules
//!
//! - [`climate`] -- Classification of raw climate readings into coarse bands.
//! - [`error`] -- Error types for world operations.
//! - [`geometry`] -- The geometry planner that lays out work rows in a
//!   pinwheel around the structure.
//! - [`terrain`] -- The [`FarmWorld`] seam and the in-memory [`GridWorld`].
//!
//! [`FarmWorld`]: terrain::FarmWorld
//! [`GridWorld`]: terrain::GridWorld

pub mod climate;
pub mod error;
pub mod geometry;
pub mod terrain;

// Re-export primary types at crate root.
pub use climate::{classify_humidity, classify_temperature};
pub use error::WorldError;
pub use geometry::{PlannedLayout, PlannerSettings, TargetSet, layout_direction, plan};
pub use terrain::{FarmWorld, GridWorld};
