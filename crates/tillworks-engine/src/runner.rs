//! Farm host loop.
//!
//! [`run_farm`] advances a [`FarmSession`] one tick at a time until the
//! tick limit is reached or a stop is requested, sleeping for the
//! configured interval between ticks.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use tillworks_core::config::EngineConfig;
use tillworks_core::{
    FarmConfig, FarmController, FarmError, StorageBin, StrategyRegistry, UpdateOutcome,
};
use tillworks_types::{ComponentId, FaultCode, ResourceKind};
use tillworks_world::GridWorld;
use tracing::{debug, info, warn};

use crate::demo::{self, Arboreal, Gearbox, HarvestLog};

/// One in this many saplings grows each tick.
const GROWTH_CHANCE: u32 = 16;

/// Ticks between status lines.
const STATUS_INTERVAL: u64 = 100;

/// Why the loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// `engine.max_ticks` ticks ran.
    MaxTicksReached,
    /// A stop was requested (Ctrl-C).
    Stopped,
}

/// Result of a farm run.
#[derive(Debug)]
pub struct RunResult {
    /// Why the loop ended.
    pub end_reason: EndReason,
    /// Outcome of the last tick, if any ran.
    pub final_outcome: Option<UpdateOutcome>,
    /// Ticks executed.
    pub total_ticks: u64,
    /// Ticks on which the farm did work.
    pub work_ticks: u64,
}

/// A controller together with the world and storage it works on.
#[derive(Debug)]
pub struct FarmSession {
    /// The farm's controller.
    pub farm: FarmController,
    /// The world around the farm.
    pub world: GridWorld,
    /// The farm's storage.
    pub storage: StorageBin,
    rng: SmallRng,
}

impl FarmSession {
    /// Assemble the demo farm on the demo platform.
    ///
    /// # Errors
    ///
    /// Returns [`FarmError`] if the configured default strategy is not
    /// registered or the structure is rejected.
    pub fn demo(config: FarmConfig) -> Result<Self, FarmError> {
        let mut registry = StrategyRegistry::new();
        registry.register_strategy(Arc::new(Arboreal));

        let work_interval = config.engine.work_interval_ticks;
        let seed = config.engine.seed;
        let world = demo::demo_world();

        let mut farm = FarmController::new(config, Arc::new(registry))?;
        farm.on_assembled(&world, demo::demo_footprint(), true)?;
        farm.attach_component(ComponentId::new(), Box::new(Gearbox::new(work_interval)));
        farm.attach_listener(ComponentId::new(), Arc::new(HarvestLog));

        info!(
            rows = farm.targets().values().map(Vec::len).sum::<usize>(),
            allowed_extent = farm.allowed_extent(),
            seed,
            "Demo farm assembled"
        );

        Ok(Self {
            farm,
            world,
            storage: demo::demo_storage(),
            rng: SmallRng::seed_from_u64(seed),
        })
    }

    /// Grow the world, then advance the farm one tick.
    pub fn step(&mut self) -> UpdateOutcome {
        let grown = demo::grow(&mut self.world, &mut self.rng, GROWTH_CHANCE);
        if grown > 0 {
            debug!(grown, "Saplings grew");
        }
        self.farm.update(&mut self.world, &mut self.storage)
    }
}

/// Run the farm until the tick limit or a stop request.
///
/// `engine.max_ticks` of 0 runs until `stop` is set. The stop flag is
/// checked before every tick.
pub async fn run_farm(session: &mut FarmSession, engine: &EngineConfig, stop: &AtomicBool) -> RunResult {
    let mut last_outcome: Option<UpdateOutcome> = None;
    let mut total_ticks: u64 = 0;
    let mut work_ticks: u64 = 0;

    info!(
        max_ticks = engine.max_ticks,
        tick_interval_ms = engine.tick_interval_ms,
        work_interval_ticks = engine.work_interval_ticks,
        "Farm loop starting"
    );

    loop {
        if stop.load(Ordering::Relaxed) {
            info!(total_ticks, "Stop requested");
            return RunResult {
                end_reason: EndReason::Stopped,
                final_outcome: last_outcome,
                total_ticks,
                work_ticks,
            };
        }

        let outcome = session.step();
        total_ticks = total_ticks.saturating_add(1);
        if outcome.did_work {
            work_ticks = work_ticks.saturating_add(1);
        }

        if outcome.tick.checked_rem(STATUS_INTERVAL) == Some(0) {
            log_status(&session.farm);
        }

        if engine.max_ticks > 0 && total_ticks >= engine.max_ticks {
            info!(tick = outcome.tick, max_ticks = engine.max_ticks, "Tick limit reached");
            return RunResult {
                end_reason: EndReason::MaxTicksReached,
                final_outcome: Some(outcome),
                total_ticks,
                work_ticks,
            };
        }

        last_outcome = Some(outcome);

        if engine.tick_interval_ms > 0 {
            tokio::time::sleep(Duration::from_millis(engine.tick_interval_ms)).await;
        } else {
            tokio::task::yield_now().await;
        }
    }
}

fn log_status(farm: &FarmController) {
    let faults: Vec<FaultCode> = farm.faults().active().collect();
    info!(
        tick = farm.tick_count(),
        stage = ?farm.stage(),
        fertilizer = farm.resources().stock(ResourceKind::Fertilizer),
        liquid = farm.resources().stock(ResourceKind::Liquid),
        pending_crops = farm.queues().crop_count(),
        faults = ?faults,
        "Farm status"
    );
}

/// Log the end of a run.
pub fn log_run_end(result: &RunResult, session: &FarmSession) {
    info!(
        reason = ?result.end_reason,
        total_ticks = result.total_ticks,
        work_ticks = result.work_ticks,
        final_tick = result.final_outcome.map(|o| o.tick),
        "Farm loop ended"
    );

    if result.total_ticks == 0 {
        warn!("Farm loop ended with no ticks executed");
        return;
    }

    info!(
        logs = session.storage.stored(demo::TRUNK),
        saplings_stored = session.storage.stored(demo::SAPLING),
        saplings_left = session.storage.germlings(demo::SAPLING),
        "Final storage"
    );
}
