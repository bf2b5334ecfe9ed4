//! Engine binary for the Life simulation.
//!
//! Wires together the simulation engine, the shared run control, the
//! Observer API, and Ctrl-C handling, then runs the loop until shutdown or
//! the generation limit.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `life-config.yaml` (defaults when absent)
//! 2. Initialize structured logging (tracing)
//! 3. Build the engine, optionally seeding the grid randomly
//! 4. Create the shared run control
//! 5. Start the Observer API server
//! 6. Install the Ctrl-C handler and honor `autostart`
//! 7. Run the simulation loop
//! 8. Log the result

mod error;
mod observer_callback;

use std::path::Path;
use std::sync::Arc;

use life_core::config::{LifeConfig, LoggingConfig};
use life_core::control::SimulationControl;
use life_core::engine::SimulationEngine;
use life_core::runner;
use life_observer::ServerConfig;
use life_observer::startup::spawn_observer;
use life_observer::state::AppState;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::AppError;
use crate::observer_callback::ObserverCallback;

const CONFIG_PATH: &str = "life-config.yaml";

/// Application entry point for the engine.
///
/// # Errors
///
/// Returns an error if any initialization step or the run loop fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration. Logging depends on it, so report afterwards.
    let (config, from_file) = load_config()?;

    // 2. Initialize structured logging.
    init_tracing(&config.logging);
    info!("life-engine starting");
    if !from_file {
        info!(path = CONFIG_PATH, "Config file not found, using defaults");
    }
    info!(
        rows = config.grid.rows,
        cols = config.grid.cols,
        density = config.grid.density,
        seed = ?config.grid.seed,
        tick_interval_ms = config.simulation.tick_interval_ms,
        max_generations = config.simulation.max_generations,
        "Configuration loaded"
    );

    // 3. Build the engine.
    let mut engine = SimulationEngine::new(&config.grid).map_err(AppError::from)?;
    if config.simulation.randomize_on_start {
        let summary = engine.randomize();
        info!(population = summary.population, "Grid seeded randomly");
    }

    // 4. Create the shared run control.
    let control = Arc::new(SimulationControl::new(
        config.simulation.tick_interval_ms,
        config.simulation.max_generations,
        engine.rows(),
        engine.cols(),
    ));

    // 5. Start the Observer API server.
    let app_state = Arc::new(AppState::with_control(Arc::clone(&control)));
    let observer_handle = if config.observer.enabled {
        let server_config = ServerConfig {
            host: config.observer.host.clone(),
            port: config.observer.port,
        };
        let handle = spawn_observer(&server_config, Arc::clone(&app_state))
            .await
            .map_err(AppError::from)?;
        info!(port = config.observer.port, "Observer API server started");
        Some(handle)
    } else {
        info!("Observer API disabled");
        None
    };

    // 6. Ctrl-C requests a shutdown; the loop finishes any step in flight.
    let signal_control = Arc::clone(&control);
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Ctrl-C received, shutting down");
                signal_control.request_shutdown();
            }
            Err(e) => warn!(error = %e, "Failed to listen for Ctrl-C"),
        }
    });

    if config.simulation.autostart {
        control.start();
        info!("Autostart enabled");
    }

    // 7. Run the simulation.
    let mut callback = ObserverCallback::new(app_state);
    let result = runner::run_simulation(&mut engine, &control, &mut callback)
        .await
        .map_err(AppError::from)?;

    // 8. Log results.
    runner::log_simulation_end(&result);
    if let Some(handle) = observer_handle {
        handle.abort();
    }

    info!(
        end_reason = ?result.end_reason,
        final_generation = result.final_generation,
        "life-engine shutdown complete"
    );

    Ok(())
}

/// Initialize the global subscriber.
///
/// `RUST_LOG` takes precedence over `logging.level`.
fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    if logging.format.eq_ignore_ascii_case("json") {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Load `life-config.yaml` from the working directory.
///
/// Returns the configuration and whether it came from the file.
fn load_config() -> Result<(LifeConfig, bool), AppError> {
    let path = Path::new(CONFIG_PATH);
    if path.exists() {
        Ok((LifeConfig::from_file(path)?, true))
    } else {
        // Parsing an empty document still applies env overrides.
        Ok((LifeConfig::parse("")?, false))
    }
}
