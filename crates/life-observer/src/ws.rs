//! `WebSocket` handler for real-time grid streaming.
//!
//! Clients connect to `GET /ws/grid`. They first receive the current
//! snapshot as an `initial` frame, then a JSON-encoded [`GridBroadcast`]
//! for every update the run loop publishes.
//!
//! If a client falls behind, lagged messages are skipped and the client
//! resumes from the most recent update. Every frame carries the full grid,
//! so a skipped frame never leaves the client inconsistent.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, warn};

use crate::state::{AppState, GridBroadcast};

/// Upgrade an HTTP request to a `WebSocket` connection and begin
/// streaming grid updates.
///
/// # Route
///
/// `GET /ws/grid`
pub async fn ws_grid(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_ws(socket, state))
}

/// Serialize one update into a text frame.
fn to_frame(update: &GridBroadcast) -> Option<Message> {
    match serde_json::to_string(update) {
        Ok(json) => Some(Message::Text(json.into())),
        Err(e) => {
            warn!("Failed to serialize grid broadcast: {e}");
            None
        }
    }
}

async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
    debug!("WebSocket client connected");

    // Subscribe before reading the snapshot so no update falls in between.
    let mut rx = state.subscribe();
    let initial = GridBroadcast::initial(state.current_snapshot());
    let sent = match to_frame(&initial) {
        Some(frame) => socket.send(frame).await.is_ok(),
        None => true,
    };
    if !sent {
        debug!("WebSocket client disconnected (initial send failed)");
        return;
    }

    loop {
        tokio::select! {
            result = rx.recv() => {
                match result {
                    Ok(update) => {
                        let Some(frame) = to_frame(&update) else { continue };
                        if socket.send(frame).await.is_err() {
                            debug!("WebSocket client disconnected (send failed)");
                            return;
                        }
                    }
                    Err(RecvError::Lagged(n)) => {
                        debug!(skipped = n, "WebSocket client lagged, skipping ahead");
                    }
                    Err(RecvError::Closed) => {
                        debug!("Broadcast channel closed, shutting down WebSocket");
                        return;
                    }
                }
            }
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Close(_))) | None => {
                        debug!("WebSocket client disconnected");
                        return;
                    }
                    Some(Ok(Message::Ping(data))) => {
                        if socket.send(Message::Pong(data)).await.is_err() {
                            debug!("WebSocket client disconnected (pong failed)");
                            return;
                        }
                    }
                    Some(Err(e)) => {
                        debug!("WebSocket error: {e}");
                        return;
                    }
                    // Client text and binary frames are ignored.
                    _ => {}
                }
            }
        }
    }
}
