//! Server binary for the `OnLife` simulation.
//!
//! Loads configuration, builds the starting grid, and serves observers
//! until `Ctrl-C`. Generations only advance when an observer asks for a
//! tick; this process never ticks on its own.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `onlife-config.yaml` (or `$ONLIFE_CONFIG`)
//! 2. Initialize structured logging (tracing)
//! 3. Build the starting grid (scenario file, demo layout, or random)
//! 4. Create the simulation controller and shared observer state
//! 5. Serve HTTP and `WebSocket` until `Ctrl-C`
//! 6. Optionally save the final grid as a scenario document

mod error;

use std::path::PathBuf;
use std::sync::Arc;

use onlife_core::{LogFormat, LoggingConfig, OnlifeConfig, Simulation, WorldConfig};
use onlife_observer::{AppState, ServerConfig};
use onlife_world::ScenarioError;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration, the starting grid, the server, or
/// the exit snapshot fails.
#[tokio::main]
async fn main() -> Result<(), EngineError> {
    // 1. Load configuration.
    let config = OnlifeConfig::load()?;

    // 2. Initialize structured logging.
    init_tracing(&config.logging);
    info!(
        world_name = config.world.name,
        host = config.server.host,
        port = config.server.port,
        "onlife-engine starting"
    );

    // 3. Build the starting grid.
    let grid = onlife_core::initial_grid(&config.world)?;
    debug!("Starting grid:\n{grid}");

    // 4. Create the simulation and shared state.
    let simulation = Arc::new(Simulation::new(grid));
    let state = Arc::new(AppState::new(
        Arc::clone(&simulation),
        config.world.name.clone(),
    ));

    // 5. Serve until Ctrl-C.
    let server_config = ServerConfig::from(&config.server);
    onlife_observer::start_server(&server_config, state, shutdown_signal()).await?;

    // 6. Save the final grid.
    if let Some(path) = save_snapshot(&simulation, &config.world).await? {
        info!(path = %path.display(), "Final grid saved");
    }

    info!(
        generation = simulation.generation().await,
        "onlife-engine shutdown complete"
    );
    Ok(())
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured level when set.
fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);
    match logging.format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

/// Resolve once `Ctrl-C` is received.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl-C, shutting down");
        return;
    }
    info!("Shutdown signal received");
}

/// Write the current grid to `world.save_on_exit`, if configured.
///
/// Returns the path written, or `None` when saving is disabled.
async fn save_snapshot(
    simulation: &Simulation,
    world: &WorldConfig,
) -> Result<Option<PathBuf>, ScenarioError> {
    let Some(path) = &world.save_on_exit else {
        return Ok(None);
    };
    let snapshot = simulation.snapshot().await;
    snapshot.to_scenario(&world.name).save(path)?;
    Ok(Some(path.clone()))
}
