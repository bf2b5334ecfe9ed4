//! Observer API server for the Life engine.
//!
//! This crate provides an Axum HTTP server that exposes:
//!
//! - **`WebSocket` endpoint** (`/ws/grid`) streaming every published grid
//!   update via [`tokio::sync::broadcast`]
//! - **REST endpoints** for reading the current grid and single cells
//! - **Control REST endpoints** for start, stop, randomize, clear, toggle,
//!   speed, status, and shutdown
//! - **Minimal HTML page** (`GET /`) rendering the current generation
//!
//! # Architecture
//!
//! The observer reads from the latest [`GridSnapshot`] held in a
//! [`tokio::sync::watch`] channel that the run loop replaces after every
//! mutation. Reads never block the loop. Control endpoints only touch the
//! shared [`SimulationControl`]; the run loop applies the resulting intents.
//!
//! [`GridSnapshot`]: life_core::engine::GridSnapshot
//! [`SimulationControl`]: life_core::control::SimulationControl

pub mod control;
pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod startup;
pub mod state;
pub mod ws;

// Re-export primary types for convenience.
pub use router::build_router;
pub use server::{ServerConfig, ServerError, start_server};
pub use state::{AppState, GridBroadcast};
