//! Axum router construction for the Observer API.
//!
//! Assembles all routes (REST + `WebSocket`) into a single [`Router`]
//! with CORS middleware enabled for cross-origin dashboard access.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::control;
use crate::handlers;
use crate::state::AppState;
use crate::ws;

/// Build the complete Axum router for the Observer server.
///
/// The router includes:
/// - `GET /` -- minimal HTML status page
/// - `GET /ws/grid` -- `WebSocket` grid update stream
/// - `GET /api/grid` -- current grid snapshot
/// - `GET /api/grid/cells/{row}/{col}` -- single cell
/// - `/api/control/*` -- run control (see [`control`])
///
/// CORS allows any origin.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Status page
        .route("/", get(handlers::index))
        // WebSocket
        .route("/ws/grid", get(ws::ws_grid))
        // Grid reads
        .route("/api/grid", get(handlers::get_grid))
        .route("/api/grid/cells/{row}/{col}", get(handlers::get_cell))
        // Run control
        .route("/api/control/start", post(control::start))
        .route("/api/control/stop", post(control::stop))
        .route("/api/control/randomize", post(control::randomize))
        .route("/api/control/clear", post(control::clear))
        .route("/api/control/toggle", post(control::toggle))
        .route("/api/control/speed", post(control::set_speed))
        .route("/api/control/status", get(control::status))
        .route("/api/control/shutdown", post(control::shutdown))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
