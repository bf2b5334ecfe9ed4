//! Transition rule, generation clock, and run loop for the Life engine.
//!
//! This crate owns everything that turns a static [`Grid`] into a running
//! simulation: the Conway rule, the engine object that holds the canonical
//! grid, the shared run control that external collaborators poke, and the
//! cooperative loop that steps while the run flag is set.
//!
//! # Modules
//!
//! - [`clock`] -- Generation counter with checked advancement.
//! - [`config`] -- Configuration loading from `life-config.yaml` into
//!   strongly-typed structs.
//! - [`control`] -- [`SimulationControl`], the shared run flag and intent
//!   queue.
//! - [`engine`] -- [`SimulationEngine`], owner of the canonical grid.
//! - [`rules`] -- The survival/birth/death rule and full-grid step.
//! - [`runner`] -- The continuous run loop.
//!
//! [`Grid`]: life_grid::Grid
//! [`SimulationControl`]: control::SimulationControl
//! [`SimulationEngine`]: engine::SimulationEngine

pub mod clock;
pub mod config;
pub mod control;
pub mod engine;
pub mod rules;
pub mod runner;
