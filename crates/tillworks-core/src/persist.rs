//! Saving, restoring and mirroring farm state.
//!
//! A [`FarmSnapshot`] carries everything a controller needs to resume
//! exactly where it stopped: geometry, stage, stocks, counters, faults, the
//! socketed board and both pending queues. Crops are saved as descriptors
//! together with the side and registry name of the strategy that found
//! them, and rebuilt through that same strategy on restore, whatever the
//! socket assigns to the side by then.
//!
//! A [`FarmSyncView`] is the much smaller read-out remote observers need:
//! geometry and resource levels, no work in progress.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tillworks_types::{
    CropDescriptor, Direction, FarmSyncView, FaultCode, Footprint, ProduceItem, ResourceKind,
    Stage,
};
use tillworks_world::TargetSet;
use tracing::{info, warn};

use crate::controller::{FarmController, FarmError};
use crate::hydration::HydrationState;
use crate::queues::HarvestProvider;
use crate::strategy::Crop;

/// Errors from encoding or decoding snapshots.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    /// JSON encoding or decoding failed.
    #[error("snapshot JSON error: {source}")]
    Json {
        /// The underlying serde error.
        #[from]
        source: serde_json::Error,
    },
}

/// The pinned harvest provider as saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedProvider {
    /// Side the strategy was working.
    pub direction: Direction,
    /// Registry name of the strategy.
    pub strategy: String,
}

/// Complete persistent state of one controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FarmSnapshot {
    /// Assembled footprint, if any.
    pub footprint: Option<Footprint>,
    /// Planned rows per side.
    pub targets: TargetSet,
    /// Maximum rows per side.
    pub allowed_extent: u32,
    /// Stage of the next work call.
    pub stage: Stage,
    /// Fertilizer stock.
    pub fertilizer: u32,
    /// Reservoir volume.
    pub liquid: u32,
    /// Hydration counters.
    pub hydration: HydrationState,
    /// Consecutive unpowered observations.
    pub unpowered_ticks: u32,
    /// Ticks run.
    pub tick_count: u64,
    /// Name of the socketed circuit board.
    pub socket: Option<String>,
    /// Active faults.
    pub faults: Vec<FaultCode>,
    /// Produce waiting for storage, bottom of the stack first.
    pub pending_produce: Vec<ProduceItem>,
    /// Crops waiting for harvest, bottom of the stack first.
    pub pending_crops: Vec<CropDescriptor>,
    /// Strategy that found the pending crops.
    pub harvest_provider: Option<SavedProvider>,
}

impl FarmSnapshot {
    /// Encode as JSON.
    pub fn to_json(&self) -> Result<String, PersistError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode from JSON.
    pub fn from_json(json: &str) -> Result<Self, PersistError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl FarmController {
    /// Capture the persistent state.
    pub fn snapshot(&self) -> FarmSnapshot {
        FarmSnapshot {
            footprint: self.footprint,
            targets: self.targets.clone(),
            allowed_extent: self.allowed_extent,
            stage: self.stage,
            fertilizer: self.resources.stock(ResourceKind::Fertilizer),
            liquid: self.resources.stock(ResourceKind::Liquid),
            hydration: self.hydration.state(),
            unpowered_ticks: self.power.unpowered_ticks(),
            tick_count: self.tick_count,
            socket: self.socket_name().map(str::to_owned),
            faults: self.faults.active().collect(),
            pending_produce: self.queues.produce().to_vec(),
            pending_crops: self.queues.crop_descriptors(),
            harvest_provider: self.queues.provider().map(|p| SavedProvider {
                direction: p.direction,
                strategy: p.strategy.name().to_owned(),
            }),
        }
    }

    /// Replace the persistent state with `snapshot`.
    ///
    /// Strategies are refreshed from the restored socket. Crops that the
    /// provider's strategy cannot rebuild are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`FarmError::UnknownCircuit`] if the saved board is not
    /// registered, or [`FarmError::UnknownStrategy`] if the harvest
    /// provider's strategy is not. The controller is left untouched in
    /// either case.
    pub fn restore(&mut self, snapshot: FarmSnapshot) -> Result<(), FarmError> {
        let socket = snapshot
            .socket
            .as_deref()
            .map(|name| self.registry.board(name))
            .transpose()?;
        let provider = snapshot
            .harvest_provider
            .as_ref()
            .map(|saved| {
                self.registry
                    .strategy(&saved.strategy)
                    .map(|strategy| HarvestProvider {
                        direction: saved.direction,
                        strategy,
                    })
            })
            .transpose()?;

        self.footprint = snapshot.footprint;
        self.targets = snapshot.targets;
        self.allowed_extent = snapshot.allowed_extent;
        self.stage = snapshot.stage;
        self.resources.restore(snapshot.fertilizer, snapshot.liquid);
        self.hydration.restore(snapshot.hydration);
        self.power.restore(snapshot.unpowered_ticks);
        self.tick_count = snapshot.tick_count;
        self.planned_at = snapshot.tick_count;
        self.faults.restore(snapshot.faults);
        self.cached_climate = None;

        self.socket = socket;
        self.refresh_strategies();

        let crops: Vec<Box<dyn Crop>> = match &provider {
            Some(provider) => snapshot
                .pending_crops
                .iter()
                .filter_map(|descriptor| {
                    let crop = provider.strategy.restore_crop(descriptor);
                    if crop.is_none() {
                        warn!(cell = %descriptor.cell, species = %descriptor.species, "Dropped unrestorable crop");
                    }
                    crop
                })
                .collect(),
            None => {
                if !snapshot.pending_crops.is_empty() {
                    warn!(count = snapshot.pending_crops.len(), "Dropped crops without a harvest provider");
                }
                Vec::new()
            }
        };
        let crop_count = crops.len();
        self.queues
            .restore(crops, snapshot.pending_produce, provider);

        info!(
            stage = ?self.stage,
            crops = crop_count,
            produce = self.queues.produce().len(),
            "Farm state restored"
        );
        Ok(())
    }

    /// Encode the persistent state as JSON.
    pub fn save_json(&self) -> Result<String, FarmError> {
        Ok(self.snapshot().to_json()?)
    }

    /// Restore from JSON produced by [`FarmController::save_json`].
    pub fn load_json(&mut self, json: &str) -> Result<(), FarmError> {
        let snapshot = FarmSnapshot::from_json(json)?;
        self.restore(snapshot)
    }

    /// Read-out for remote observers.
    pub fn sync_view(&self) -> FarmSyncView {
        FarmSyncView {
            targets: self.targets.clone(),
            allowed_extent: self.allowed_extent,
            fertilizer_stock: self.resources.stock(ResourceKind::Fertilizer),
            fertilizer_percent: self.resources.scaled_reading(ResourceKind::Fertilizer, 100),
            liquid_volume: self.resources.stock(ResourceKind::Liquid),
            liquid_capacity: self.resources.capacity(ResourceKind::Liquid),
            hydration_percent: self
                .cached_climate
                .map_or(100, |climate| self.hydration.percent(&climate)),
            faults: self.faults.active().collect(),
            captured_at: Utc::now(),
        }
    }

    /// Mirror a read-out received from the authoritative controller.
    pub fn apply_sync_view(&mut self, view: &FarmSyncView) {
        self.targets.clone_from(&view.targets);
        self.allowed_extent = view.allowed_extent;
        self.planned_at = self.tick_count;
        self.resources
            .restore(view.fertilizer_stock, view.liquid_volume);
        self.faults.restore(view.faults.iter().copied());
    }
}
