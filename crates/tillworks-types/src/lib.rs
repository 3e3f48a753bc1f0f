//! Shared type definitions for the Tillworks farm controller.
//!
//! This crate is the single source of truth for the value types used across
//! the Tillworks workspace. Observer-facing types flow downstream to
//! `TypeScript` via `ts-rs`.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for attached parts
//! - [`enums`] -- Directions, work stages, fault codes, resource and climate kinds
//! - [`structs`] -- Cells, footprints, farm targets, produce, climate and sync views

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{Direction, FaultCode, HumidityClass, ResourceKind, Stage, TemperatureClass};
pub use ids::ComponentId;
pub use structs::{
    Cell, ClimateReading, CropDescriptor, FarmSyncView, FarmTarget, Footprint, ProduceItem,
    Territory,
};

#[cfg(test)]
mod tests {
    //! `TypeScript` binding generation for observer-facing types.

    #[test]
    fn export_bindings() {
        // ts-rs writes the files to `bindings/` relative to the crate root.
        use ts_rs::TS;

        let _ = crate::ids::ComponentId::export_all();

        let _ = crate::enums::Direction::export_all();
        let _ = crate::enums::Stage::export_all();
        let _ = crate::enums::FaultCode::export_all();
        let _ = crate::enums::ResourceKind::export_all();
        let _ = crate::enums::TemperatureClass::export_all();
        let _ = crate::enums::HumidityClass::export_all();

        let _ = crate::structs::Cell::export_all();
        let _ = crate::structs::Footprint::export_all();
        let _ = crate::structs::FarmTarget::export_all();
        let _ = crate::structs::ProduceItem::export_all();
        let _ = crate::structs::CropDescriptor::export_all();
        let _ = crate::structs::ClimateReading::export_all();
        let _ = crate::structs::Territory::export_all();
        let _ = crate::structs::FarmSyncView::export_all();
    }
}
