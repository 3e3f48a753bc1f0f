//! Host binary for Tillworks.
//!
//! Wires a demo tree farm to the farm controller and drives it on a fixed
//! tick interval.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `tillworks-config.yaml`
//! 2. Initialize structured logging (tracing) at the configured level
//! 3. Assemble the demo farm: platform, arboreal strategy, gearbox, storage
//! 4. Install the Ctrl-C stop handler
//! 5. Run the tick loop
//! 6. Log the result and the final sync view

mod demo;
mod error;
mod runner;

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tillworks_core::FarmConfig;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;
use crate::runner::FarmSession;

const CONFIG_PATH: &str = "tillworks-config.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration, farm assembly, or the final report
/// fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration. Logging is not up yet, so remember the source.
    let loaded = load_config(Path::new(CONFIG_PATH))?;
    let from_file = loaded.is_some();
    let config = loaded.unwrap_or_default();

    // 2. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .init();

    info!("tillworks-engine starting");
    if !from_file {
        info!(path = CONFIG_PATH, "Config file not found, using defaults");
    }
    info!(
        default_strategy = %config.farm.default_strategy,
        size_multiplier = config.farm.size_multiplier,
        square_farms = config.farm.square_farms,
        seed = config.engine.seed,
        "Configuration loaded"
    );

    // 3. Assemble the demo farm.
    let engine = config.engine.clone();
    let mut session = FarmSession::demo(config).map_err(EngineError::from)?;

    // 4. Ctrl-C requests a clean stop after the current tick.
    let stop = Arc::new(AtomicBool::new(false));
    {
        let stop = Arc::clone(&stop);
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    info!("Ctrl-C received, stopping after the current tick");
                    stop.store(true, Ordering::Relaxed);
                }
                Err(e) => warn!(error = %e, "failed to listen for Ctrl-C"),
            }
        });
    }

    // 5. Run.
    let result = runner::run_farm(&mut session, &engine, &stop).await;

    // 6. Report.
    runner::log_run_end(&result, &session);
    let view = serde_json::to_string(&session.farm.sync_view()).map_err(EngineError::from)?;
    info!(sync_view = %view, "Final sync view");

    info!(total_ticks = result.total_ticks, "tillworks-engine shutdown complete");
    Ok(())
}

/// Load the farm configuration from `path`, or `None` if it does not exist.
fn load_config(path: &Path) -> Result<Option<FarmConfig>, EngineError> {
    if path.exists() {
        Ok(Some(FarmConfig::from_file(path)?))
    } else {
        Ok(None)
    }
}
