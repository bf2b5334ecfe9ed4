//! Continuous run loop with cooperative stop.
//!
//! This module provides [`run_simulation`], the top-level async function
//! that owns the engine for the lifetime of a run and drives it with:
//!
//! - **Immediate first step**: a start computes one generation at once and
//!   schedules the next after the tick interval
//! - **Cooperative stop**: the loop rereads the live run flag before every
//!   step; a stop suppresses the next tick but never interrupts a step
//! - **Published run flag**: when the flag changes without a grid change the
//!   loop republishes the current grid with [`UpdateCause::RunState`]
//! - **Serialized edits**: randomize, clear, and toggle intents are queued on
//!   the [`SimulationControl`] and applied here, between steps
//! - **Bounded runs**: exit after `max_generations` or on shutdown
//!
//! Every grid change is handed to an [`UpdateCallback`] so external
//! collaborators can render the new snapshot.

use std::sync::Arc;

use tokio::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::control::{SimulationControl, SimulationEndReason};
use crate::engine::{EngineError, SimulationEngine, UpdateCause, UpdateSummary};

/// Errors that can occur during the simulation run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// A step failed.
    #[error("engine error: {source}")]
    Engine {
        /// The underlying engine error.
        #[from]
        source: EngineError,
    },
}

/// Result of the simulation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationResult {
    /// The reason the loop ended.
    pub end_reason: SimulationEndReason,
    /// Number of generations computed by this run.
    pub generations_computed: u64,
    /// Generation on the grid when the loop ended.
    pub final_generation: u64,
    /// Live cells when the loop ended.
    pub final_population: usize,
}

/// Callback invoked after every grid change.
///
/// Implementations publish the new grid to external consumers (observer
/// snapshot, `WebSocket` broadcast, logs).
pub trait UpdateCallback: Send {
    /// Called after the grid changed. `running` is the run flag at the time
    /// of publication.
    fn on_update(&mut self, summary: &UpdateSummary, engine: &SimulationEngine, running: bool);
}

/// A no-op callback for headless runs and tests.
pub struct NoOpCallback;

impl UpdateCallback for NoOpCallback {
    fn on_update(&mut self, _summary: &UpdateSummary, _engine: &SimulationEngine, _running: bool) {}
}

/// Run the simulation loop until shutdown or the generation limit.
///
/// The loop publishes the current grid once on entry, then repeatedly:
/// applies queued edits, checks shutdown, steps if the run flag is set and a
/// step is due, republishes the run flag if it changed since the last
/// publication, and sleeps until the next tick or the next intent.
///
/// # Errors
///
/// Returns [`RunnerError`] if a step fails unrecoverably.
pub async fn run_simulation(
    engine: &mut SimulationEngine,
    control: &Arc<SimulationControl>,
    callback: &mut dyn UpdateCallback,
) -> Result<SimulationResult, RunnerError> {
    let mut generations_computed: u64 = 0;
    let mut next_tick: Option<Instant> = None;
    let mut published_running = control.is_running();

    info!(
        rows = engine.rows(),
        cols = engine.cols(),
        tick_interval_ms = control.tick_interval_ms(),
        max_generations = control.max_generations(),
        "Simulation loop starting"
    );

    callback.on_update(
        &engine.current_summary(UpdateCause::Initial),
        engine,
        published_running,
    );

    loop {
        // --- Apply queued edits ---
        for intent in control.drain_intents().await {
            match engine.apply(intent) {
                Ok(summary) => {
                    debug!(?intent, population = summary.population, "Grid edit applied");
                    published_running = control.is_running();
                    callback.on_update(&summary, engine, published_running);
                }
                Err(e) => warn!(?intent, error = %e, "Grid edit skipped"),
            }
        }

        // --- Check shutdown ---
        if control.is_shutdown_requested() {
            info!("Shutdown requested");
            return Ok(finish(
                control,
                engine,
                SimulationEndReason::OperatorShutdown,
                generations_computed,
            )
            .await);
        }

        // --- Step if running and due ---
        if control.is_running() {
            let now = Instant::now();
            let due = control.take_step_now() || next_tick.is_none_or(|deadline| now >= deadline);
            if due {
                let summary = engine.step()?;
                generations_computed = generations_computed.saturating_add(1);
                published_running = control.is_running();
                callback.on_update(&summary, engine, published_running);

                if control.generation_limit_reached(summary.generation) {
                    info!(
                        generation = summary.generation,
                        max_generations = control.max_generations(),
                        "Generation limit reached"
                    );
                    control.stop();
                    return Ok(finish(
                        control,
                        engine,
                        SimulationEndReason::MaxGenerationsReached,
                        generations_computed,
                    )
                    .await);
                }

                let interval = Duration::from_millis(control.tick_interval_ms());
                next_tick = Some(Instant::now().checked_add(interval).unwrap_or(now));
            }
        } else if next_tick.take().is_some() {
            debug!(generation = engine.generation(), "Tick skipped, simulation stopped");
        }

        // --- Republish a changed run flag ---
        let running = control.is_running();
        if running != published_running {
            published_running = running;
            debug!(running, generation = engine.generation(), "Run state published");
            callback.on_update(&engine.current_summary(UpdateCause::RunState), engine, running);
        }

        // --- Wait for the next tick or intent ---
        match next_tick {
            Some(deadline) => {
                tokio::select! {
                    () = tokio::time::sleep_until(deadline) => {}
                    () = control.notified() => {}
                }
            }
            None => control.notified().await,
        }
    }
}

async fn finish(
    control: &SimulationControl,
    engine: &SimulationEngine,
    reason: SimulationEndReason,
    generations_computed: u64,
) -> SimulationResult {
    control.set_end_reason(reason).await;
    SimulationResult {
        end_reason: reason,
        generations_computed,
        final_generation: engine.generation(),
        final_population: engine.grid().population(),
    }
}

/// Log the end of a run.
pub fn log_simulation_end(result: &SimulationResult) {
    info!(
        reason = ?result.end_reason,
        generations_computed = result.generations_computed,
        final_generation = result.final_generation,
        final_population = result.final_population,
        "Simulation ended"
    );
    if result.generations_computed == 0 {
        warn!("Simulation ended with no generations computed");
    }
}
