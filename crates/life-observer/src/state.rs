//! Shared application state for the Observer API server.
//!
//! [`AppState`] holds the broadcast channel for grid updates, the latest
//! published [`GridSnapshot`], and the optional run control that the control
//! endpoints act on.

use std::sync::Arc;

use life_core::control::SimulationControl;
use life_core::engine::{GridSnapshot, UpdateCause, UpdateSummary};
use tokio::sync::{broadcast, watch};

/// Capacity of the broadcast channel for grid updates.
///
/// If a subscriber falls behind by more than this many messages it will
/// receive a [`broadcast::error::RecvError::Lagged`] and skip to the
/// newest message.
const BROADCAST_CAPACITY: usize = 64;

/// JSON-serializable grid update pushed over the `WebSocket`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GridBroadcast {
    /// What caused the update.
    pub cause: UpdateCause,
    /// Cells that went from dead to alive.
    pub births: usize,
    /// Cells that went from alive to dead.
    pub deaths: usize,
    /// The grid after the update.
    #[serde(flatten)]
    pub snapshot: GridSnapshot,
}

impl GridBroadcast {
    /// Pair a summary with the snapshot it produced.
    pub const fn new(summary: &UpdateSummary, snapshot: GridSnapshot) -> Self {
        Self {
            cause: summary.cause,
            births: summary.births,
            deaths: summary.deaths,
            snapshot,
        }
    }

    /// Describe an existing snapshot as an initial frame.
    pub const fn initial(snapshot: GridSnapshot) -> Self {
        Self {
            cause: UpdateCause::Initial,
            births: 0,
            deaths: 0,
            snapshot,
        }
    }
}

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`] and injected via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// Broadcast sender for grid updates.
    pub tx: broadcast::Sender<GridBroadcast>,
    /// The most recently published snapshot.
    pub snapshot: watch::Sender<GridSnapshot>,
    /// Shared run control (present when a run loop is attached).
    pub control: Option<Arc<SimulationControl>>,
}

impl AppState {
    /// Create state for a `rows x cols` grid with no run control attached.
    pub fn new(rows: usize, cols: usize) -> Self {
        let (tx, _) = broadcast::channel(BROADCAST_CAPACITY);
        let (snapshot, _) = watch::channel(GridSnapshot::empty(rows, cols));
        Self {
            tx,
            snapshot,
            control: None,
        }
    }

    /// Create state with run control attached.
    pub fn with_control(control: Arc<SimulationControl>) -> Self {
        let (rows, cols) = control.dimensions();
        Self {
            control: Some(control),
            ..Self::new(rows, cols)
        }
    }

    /// Clone the latest published snapshot.
    pub fn current_snapshot(&self) -> GridSnapshot {
        self.snapshot.borrow().clone()
    }

    /// Subscribe to the grid update channel.
    pub fn subscribe(&self) -> broadcast::Receiver<GridBroadcast> {
        self.tx.subscribe()
    }

    /// Replace the served snapshot and broadcast the update.
    ///
    /// Returns the number of `WebSocket` receivers reached, 0 when no client
    /// is connected. Never blocks, so it is safe to call from the run loop.
    pub fn publish(&self, update: GridBroadcast) -> usize {
        self.snapshot.send_replace(update.snapshot.clone());
        self.tx.send(update).unwrap_or(0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn make_update(generation: u64) -> GridBroadcast {
        let snapshot = GridSnapshot {
            generation,
            ..GridSnapshot::empty(3, 3)
        };
        GridBroadcast::initial(snapshot)
    }

    #[test]
    fn new_state_serves_empty_grid() {
        let state = AppState::new(4, 6);
        let snap = state.current_snapshot();
        assert_eq!((snap.rows, snap.cols), (4, 6));
        assert_eq!(snap.population, 0);
        assert!(state.control.is_none());
    }

    #[test]
    fn with_control_uses_control_dimensions() {
        let control = Arc::new(SimulationControl::new(300, 0, 7, 9));
        let state = AppState::with_control(control);
        let snap = state.current_snapshot();
        assert_eq!((snap.rows, snap.cols), (7, 9));
        assert!(state.control.is_some());
    }

    #[test]
    fn publish_replaces_snapshot_without_subscribers() {
        let state = AppState::new(3, 3);
        assert_eq!(state.publish(make_update(12)), 0);
        assert_eq!(state.current_snapshot().generation, 12);
    }

    #[tokio::test]
    async fn publish_reaches_subscribers() {
        let state = AppState::new(3, 3);
        let mut rx = state.subscribe();
        assert_eq!(state.publish(make_update(3)), 1);
        assert_eq!(rx.recv().await.unwrap().snapshot.generation, 3);
    }

    #[test]
    fn broadcast_flattens_snapshot() {
        let json = serde_json::to_value(make_update(5)).unwrap();
        assert_eq!(json["cause"], "initial");
        assert_eq!(json["generation"], 5);
        assert_eq!(json["rows"], 3);
    }
}
