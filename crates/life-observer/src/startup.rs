//! Observer server startup helper for embedding in the engine binary.
//!
//! [`spawn_observer`] binds the listening socket eagerly, then serves the
//! Observer API on a background Tokio task so it runs alongside the
//! simulation loop.

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::server::{self, ServerConfig, ServerError};
use crate::state::AppState;

/// Spawn the Observer HTTP server on a background Tokio task.
///
/// Returns a [`JoinHandle`] the caller can abort during shutdown.
///
/// # Errors
///
/// Returns [`ServerError::Bind`] if the address cannot be bound. Binding
/// happens before the task is spawned, so a busy port is reported here
/// rather than logged from the background task.
pub async fn spawn_observer(
    config: &ServerConfig,
    state: Arc<AppState>,
) -> Result<JoinHandle<()>, ServerError> {
    let listener = server::bind(config).await?;

    let handle = tokio::spawn(async move {
        if let Err(e) = server::serve(listener, state).await {
            tracing::error!(error = %e, "Observer server exited with error");
        }
    });

    tracing::info!(host = %config.host, port = config.port, "Observer server spawned on background task");

    Ok(handle)
}
