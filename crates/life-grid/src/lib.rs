//! Bounded cell grid for the Life engine.
//!
//! This crate owns the cell matrix and nothing else: it knows how to build,
//! read, seed, clear, and toggle a grid, and how to count a cell's live
//! neighbors. It has no notion of generations or time; the transition rule
//! and the run loop live in `life-core`.
//!
//! # Modules
//!
//! - [`cell`] -- [`CellState`], the binary value stored at each coordinate.
//! - [`error`] -- Error types for grid access and construction.
//! - [`grid`] -- [`Grid`], a fixed-size row-major cell buffer.
//! - [`neighborhood`] -- The Moore neighborhood offsets and bounded lookup.
//! - [`pattern`] -- Plain-text pattern parsing and rendering.

pub mod cell;
pub mod error;
pub mod grid;
pub mod neighborhood;
pub mod pattern;

// Re-export primary types at crate root.
pub use cell::CellState;
pub use error::GridError;
pub use grid::Grid;
pub use neighborhood::NEIGHBOR_OFFSETS;
