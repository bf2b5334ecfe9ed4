//! Error types for the engine binary.
//!
//! [`AppError`] wraps every failure mode during startup and the run so
//! `main` can propagate with `?`.

use life_core::config::ConfigError;
use life_core::engine::EngineError;
use life_core::runner::RunnerError;
use life_observer::ServerError;

/// Top-level error for the engine binary.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: ConfigError,
    },

    /// The engine could not be built from the configuration.
    #[error("engine error: {source}")]
    Engine {
        /// The underlying engine error.
        #[from]
        source: EngineError,
    },

    /// The run loop failed.
    #[error("runner error: {source}")]
    Runner {
        /// The underlying runner error.
        #[from]
        source: RunnerError,
    },

    /// The Observer API server failed to start.
    #[error("observer error: {source}")]
    Observer {
        /// The underlying server error.
        #[from]
        source: ServerError,
    },
}
