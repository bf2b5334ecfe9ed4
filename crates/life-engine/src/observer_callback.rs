//! Update callback that feeds the Observer API state.
//!
//! After every grid change, this callback replaces the served
//! [`GridSnapshot`](life_core::engine::GridSnapshot) and broadcasts a
//! [`GridBroadcast`] to all connected `WebSocket` clients.

use std::sync::Arc;

use life_core::engine::{SimulationEngine, UpdateSummary};
use life_core::runner::UpdateCallback;
use life_observer::state::{AppState, GridBroadcast};
use tracing::debug;

/// Callback that bridges the run loop to the Observer API.
pub struct ObserverCallback {
    state: Arc<AppState>,
}

impl ObserverCallback {
    /// Create a new observer callback backed by the given app state.
    pub const fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }
}

impl UpdateCallback for ObserverCallback {
    fn on_update(&mut self, summary: &UpdateSummary, engine: &SimulationEngine, running: bool) {
        let update = GridBroadcast::new(summary, engine.snapshot(running));
        let receivers = self.state.publish(update);
        debug!(
            cause = ?summary.cause,
            generation = summary.generation,
            population = summary.population,
            receivers,
            "Grid update published"
        );
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use life_core::config::GridConfig;
    use life_core::engine::UpdateCause;

    use super::*;

    #[tokio::test]
    async fn publishes_snapshot_and_broadcast() {
        let state = Arc::new(AppState::new(4, 4));
        let mut rx = state.subscribe();
        let mut engine = SimulationEngine::new(&GridConfig {
            rows: 4,
            cols: 4,
            density: 0.5,
            seed: Some(11),
        })
        .unwrap();
        let summary = engine.toggle_cell(1, 1).unwrap();

        let mut callback = ObserverCallback::new(Arc::clone(&state));
        callback.on_update(&summary, &engine, true);

        let snap = state.current_snapshot();
        assert_eq!(snap.population, 1);
        assert!(snap.running);
        assert_eq!(snap.cells.get(1).and_then(|row| row.get(1)), Some(&1));

        let update = rx.recv().await.unwrap();
        assert_eq!(update.cause, UpdateCause::Toggle);
        assert_eq!(update.births, 1);
    }
}
