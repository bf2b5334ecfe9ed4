//! Control REST handlers for the run loop.
//!
//! These endpoints issue intents on the shared [`SimulationControl`]. Start,
//! stop, speed, and shutdown take effect through atomics; grid edits are
//! queued and applied by the run loop between steps, so the response only
//! confirms that the edit was accepted.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `POST` | `/api/control/start` | Set the run flag |
//! | `POST` | `/api/control/stop` | Clear the run flag |
//! | `POST` | `/api/control/randomize` | Queue a randomize |
//! | `POST` | `/api/control/clear` | Queue a clear |
//! | `POST` | `/api/control/toggle` | Queue a toggle of one cell |
//! | `POST` | `/api/control/speed` | Set tick interval (ms) |
//! | `GET` | `/api/control/status` | Current run status |
//! | `POST` | `/api/control/shutdown` | End the run loop |

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use life_core::control::{MIN_TICK_INTERVAL_MS, SimulationControl, SimulationStatus};
use tracing::info;

use crate::error::ObserverError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /api/control/toggle`.
#[derive(Debug, serde::Deserialize)]
pub struct ToggleRequest {
    /// Row of the cell to flip.
    pub row: usize,
    /// Column of the cell to flip.
    pub col: usize,
}

/// Request body for `POST /api/control/speed`.
#[derive(Debug, serde::Deserialize)]
pub struct SetSpeedRequest {
    /// New tick interval in milliseconds.
    pub tick_interval_ms: u64,
}

/// Generic success response.
#[derive(Debug, serde::Serialize)]
struct ControlResponse {
    ok: bool,
    message: String,
}

impl ControlResponse {
    fn ok(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            ok: true,
            message: message.into(),
        })
    }
}

fn control(state: &AppState) -> Result<&Arc<SimulationControl>, ObserverError> {
    state.control.as_ref().ok_or(ObserverError::ControlUnavailable)
}

// ---------------------------------------------------------------------------
// POST /api/control/start, /api/control/stop
// ---------------------------------------------------------------------------

/// Start stepping. Responds 409 if the simulation is already running.
pub async fn start(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ObserverError> {
    if !control(&state)?.start() {
        return Err(ObserverError::Conflict("simulation already running".to_owned()));
    }
    info!("Simulation started");
    Ok(ControlResponse::ok("Simulation started"))
}

/// Stop stepping after any step in flight. Responds 409 if already stopped.
pub async fn stop(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ObserverError> {
    if !control(&state)?.stop() {
        return Err(ObserverError::Conflict("simulation already stopped".to_owned()));
    }
    info!("Simulation stopped");
    Ok(ControlResponse::ok("Simulation stopped"))
}

// ---------------------------------------------------------------------------
// Grid edits
// ---------------------------------------------------------------------------

/// Queue a randomize of the whole grid.
pub async fn randomize(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ObserverError> {
    control(&state)?.randomize().await;
    Ok(ControlResponse::ok("Randomize queued"))
}

/// Queue a clear of the whole grid.
pub async fn clear(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ObserverError> {
    control(&state)?.clear().await;
    Ok(ControlResponse::ok("Clear queued"))
}

/// Queue a toggle of one cell. Responds 400 when out of bounds.
pub async fn toggle(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ToggleRequest>,
) -> Result<impl IntoResponse, ObserverError> {
    control(&state)?.toggle_cell(body.row, body.col).await?;
    Ok(ControlResponse::ok(format!(
        "Toggle of ({}, {}) queued",
        body.row, body.col
    )))
}

// ---------------------------------------------------------------------------
// POST /api/control/speed
// ---------------------------------------------------------------------------

/// Change the tick interval at runtime.
///
/// The new interval applies from the next scheduled tick.
pub async fn set_speed(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SetSpeedRequest>,
) -> Result<impl IntoResponse, ObserverError> {
    let prev = control(&state)?
        .set_tick_interval_ms(body.tick_interval_ms)
        .ok_or_else(|| {
            ObserverError::InvalidRequest(format!(
                "tick_interval_ms must be at least {MIN_TICK_INTERVAL_MS}"
            ))
        })?;

    info!(
        previous_interval_ms = prev,
        new_interval_ms = body.tick_interval_ms,
        "Tick interval changed"
    );

    Ok(Json(serde_json::json!({
        "ok": true,
        "previous_interval_ms": prev,
        "new_interval_ms": body.tick_interval_ms,
    })))
}

// ---------------------------------------------------------------------------
// GET /api/control/status
// ---------------------------------------------------------------------------

/// Return the current run status.
pub async fn status(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ObserverError> {
    let control = control(&state)?;
    let (generation, population) = {
        let snapshot = state.snapshot.borrow();
        (snapshot.generation, snapshot.population)
    };
    let (rows, cols) = control.dimensions();

    Ok(Json(SimulationStatus {
        generation,
        running: control.is_running(),
        shutdown_requested: control.is_shutdown_requested(),
        tick_interval_ms: control.tick_interval_ms(),
        elapsed_seconds: control.elapsed_seconds(),
        max_generations: control.max_generations(),
        rows,
        cols,
        population,
        end_reason: control.end_reason().await,
        started_at: control.started_at().to_rfc3339(),
    }))
}

// ---------------------------------------------------------------------------
// POST /api/control/shutdown
// ---------------------------------------------------------------------------

/// End the run loop. The HTTP server keeps serving the last snapshot.
pub async fn shutdown(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ObserverError> {
    control(&state)?.request_shutdown();
    info!("Shutdown requested via control API");
    Ok(ControlResponse::ok("Shutdown requested"))
}
