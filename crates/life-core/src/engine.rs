//! The simulation engine: owner of the canonical grid.
//!
//! [`SimulationEngine`] holds the current [`Grid`], the generation clock, and
//! the seeded random generator used for randomize intents. Every mutation
//! replaces the grid wholesale with a newly computed value and returns an
//! [`UpdateSummary`] describing what changed, so the caller can publish it.
//!
//! The engine is synchronous and has no notion of time. Cadence and the
//! run/stop flag belong to [`crate::runner`] and [`crate::control`].

use life_grid::{CellState, Grid, GridError};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::clock::{ClockError, GenerationClock};
use crate::config::GridConfig;
use crate::rules::{self, Transition};

/// Errors that can occur during engine operations.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A grid operation failed.
    #[error("grid error: {source}")]
    Grid {
        /// The underlying grid error.
        #[from]
        source: GridError,
    },

    /// The generation clock failed to advance.
    #[error("clock error: {source}")]
    Clock {
        /// The underlying clock error.
        #[from]
        source: ClockError,
    },

    /// The engine was built from unusable parameters.
    #[error("invalid engine configuration: {reason}")]
    InvalidConfig {
        /// Explanation of what is wrong.
        reason: String,
    },
}

/// A grid edit requested by an external collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum GridIntent {
    /// Replace the grid with a random one.
    Randomize,
    /// Replace the grid with an empty one.
    Clear,
    /// Flip one cell.
    Toggle {
        /// Row of the cell.
        row: usize,
        /// Column of the cell.
        col: usize,
    },
}

/// What triggered a published update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateCause {
    /// The grid as it stood when the run loop started.
    Initial,
    /// A computed generation.
    Step,
    /// A randomize intent.
    Randomize,
    /// A clear intent.
    Clear,
    /// A toggle intent.
    Toggle,
    /// The run flag changed while the grid did not.
    RunState,
}

/// Summary of one grid mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateSummary {
    /// What caused the update.
    pub cause: UpdateCause,
    /// Generation after the update.
    pub generation: u64,
    /// Live cells after the update.
    pub population: usize,
    /// Cells that went from dead to alive.
    pub births: usize,
    /// Cells that went from alive to dead.
    pub deaths: usize,
}

/// Read-only view of the grid handed to external consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSnapshot {
    /// Generation the cells belong to.
    pub generation: u64,
    /// Number of rows.
    pub rows: usize,
    /// Number of columns.
    pub cols: usize,
    /// Whether the run flag was set when the snapshot was taken.
    pub running: bool,
    /// Live cells.
    pub population: usize,
    /// Cell values as rows of `0` (dead) and `1` (alive).
    pub cells: Vec<Vec<u8>>,
}

impl GridSnapshot {
    /// Snapshot of an all-dead grid at generation 0.
    pub fn empty(rows: usize, cols: usize) -> Self {
        Self {
            generation: 0,
            rows,
            cols,
            running: false,
            population: 0,
            cells: Grid::empty(rows, cols).to_rows(),
        }
    }
}

/// Owner of the canonical grid and the transition lifecycle.
#[derive(Debug)]
pub struct SimulationEngine {
    /// The current generation's cells.
    grid: Grid,
    /// Generations since the last reseed.
    clock: GenerationClock,
    /// Live probability used by randomize.
    density: f64,
    /// Generator used by randomize.
    rng: StdRng,
}

impl SimulationEngine {
    /// Create an engine with an empty grid from configuration.
    ///
    /// The random generator is seeded from `config.seed` when present and
    /// from OS entropy otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfig`] if the density lies outside
    /// `[0, 1]`.
    pub fn new(config: &GridConfig) -> Result<Self, EngineError> {
        let rng = config
            .seed
            .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
        Self::with_rng(config, rng)
    }

    /// Create an engine with an explicit random generator.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfig`] if the density lies outside
    /// `[0, 1]`.
    pub fn with_rng(config: &GridConfig, rng: StdRng) -> Result<Self, EngineError> {
        if !(0.0..=1.0).contains(&config.density) {
            return Err(EngineError::InvalidConfig {
                reason: format!("density must be in [0, 1], got {}", config.density),
            });
        }
        Ok(Self {
            grid: Grid::empty(config.rows, config.cols),
            clock: GenerationClock::new(),
            density: config.density,
            rng,
        })
    }

    /// Replace the current grid, resetting the generation to 0.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Grid`] if `grid` has different dimensions from
    /// the current one.
    pub fn load(&mut self, grid: Grid) -> Result<UpdateSummary, EngineError> {
        if grid.rows() != self.grid.rows() || grid.cols() != self.grid.cols() {
            return Err(GridError::InvalidDimensions {
                reason: format!(
                    "cannot load {}x{} grid into {}x{} engine",
                    grid.rows(),
                    grid.cols(),
                    self.grid.rows(),
                    self.grid.cols()
                ),
            }
            .into());
        }
        self.clock.reset();
        Ok(self.replace(grid, UpdateCause::Initial))
    }

    /// The current grid.
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The current generation.
    pub const fn generation(&self) -> u64 {
        self.clock.generation()
    }

    /// Number of rows (constant for the engine's lifetime).
    pub const fn rows(&self) -> usize {
        self.grid.rows()
    }

    /// Number of columns (constant for the engine's lifetime).
    pub const fn cols(&self) -> usize {
        self.grid.cols()
    }

    /// Compute and install the next generation.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Grid`] if the grid is malformed, or
    /// [`EngineError::Clock`] if the generation counter overflows. The
    /// current grid is unchanged on error.
    pub fn step(&mut self) -> Result<UpdateSummary, EngineError> {
        let next = rules::step(&self.grid)?;
        self.clock.advance()?;
        let summary = self.replace(next, UpdateCause::Step);
        debug!(
            generation = summary.generation,
            population = summary.population,
            births = summary.births,
            deaths = summary.deaths,
            "Generation computed"
        );
        Ok(summary)
    }

    /// Replace the grid with a random one and reset the generation.
    pub fn randomize(&mut self) -> UpdateSummary {
        let next = Grid::random(self.rows(), self.cols(), self.density, &mut self.rng);
        self.clock.reset();
        self.replace(next, UpdateCause::Randomize)
    }

    /// Replace the grid with an empty one and reset the generation.
    pub fn clear(&mut self) -> UpdateSummary {
        let next = Grid::clear(self.rows(), self.cols());
        self.clock.reset();
        self.replace(next, UpdateCause::Clear)
    }

    /// Flip the cell at `(row, col)`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Grid`] wrapping [`GridError::OutOfBounds`] for
    /// a coordinate outside the grid; the grid is unchanged.
    pub fn toggle_cell(&mut self, row: usize, col: usize) -> Result<UpdateSummary, EngineError> {
        let next = self.grid.toggled(row, col)?;
        Ok(self.replace(next, UpdateCause::Toggle))
    }

    /// Read the cell at `(row, col)`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] for a coordinate outside the grid.
    pub fn cell(&self, row: usize, col: usize) -> Result<CellState, GridError> {
        self.grid.get(row, col)
    }

    /// Apply a queued intent.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Grid`] for an out-of-bounds toggle.
    pub fn apply(&mut self, intent: GridIntent) -> Result<UpdateSummary, EngineError> {
        match intent {
            GridIntent::Randomize => Ok(self.randomize()),
            GridIntent::Clear => Ok(self.clear()),
            GridIntent::Toggle { row, col } => self.toggle_cell(row, col),
        }
    }

    /// Summary of the current grid without changing it.
    pub fn current_summary(&self, cause: UpdateCause) -> UpdateSummary {
        UpdateSummary {
            cause,
            generation: self.generation(),
            population: self.grid.population(),
            births: 0,
            deaths: 0,
        }
    }

    /// Build a read-only snapshot for external consumers.
    pub fn snapshot(&self, running: bool) -> GridSnapshot {
        GridSnapshot {
            generation: self.generation(),
            rows: self.rows(),
            cols: self.cols(),
            running,
            population: self.grid.population(),
            cells: self.grid.to_rows(),
        }
    }

    /// Swap in `next` and describe the change.
    fn replace(&mut self, next: Grid, cause: UpdateCause) -> UpdateSummary {
        let transition = Transition::between(&self.grid, &next);
        self.grid = next;
        UpdateSummary {
            cause,
            generation: self.generation(),
            population: self.grid.population(),
            births: transition.births,
            deaths: transition.deaths,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn seeded_config(rows: usize, cols: usize) -> GridConfig {
        GridConfig {
            rows,
            cols,
            density: 0.3,
            seed: Some(42),
        }
    }

    fn make_engine(rows: usize, cols: usize) -> SimulationEngine {
        SimulationEngine::new(&seeded_config(rows, cols)).unwrap()
    }

    #[test]
    fn starts_empty_at_generation_zero() {
        let engine = make_engine(50, 50);
        assert_eq!(engine.generation(), 0);
        assert_eq!(engine.grid(), &Grid::empty(50, 50));
    }

    #[test]
    fn rejects_bad_density() {
        let config = GridConfig {
            density: -0.1,
            ..seeded_config(5, 5)
        };
        assert!(matches!(
            SimulationEngine::new(&config),
            Err(EngineError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn step_advances_generation() {
        let mut engine = make_engine(8, 8);
        let blinker = Grid::parse(
            "
            ........
            ..###...
            ........
            ........
            ........
            ........
            ........
            ........
            ",
        )
        .unwrap();
        engine.load(blinker).unwrap();

        let summary = engine.step().unwrap();
        assert_eq!(summary.cause, UpdateCause::Step);
        assert_eq!(summary.generation, 1);
        assert_eq!(summary.population, 3);
        assert_eq!(summary.births, 2);
        assert_eq!(summary.deaths, 2);
        assert_eq!(engine.generation(), 1);
    }

    #[test]
    fn randomize_is_reproducible_with_seed() {
        let mut a = make_engine(20, 20);
        let mut b = make_engine(20, 20);
        a.randomize();
        b.randomize();
        assert_eq!(a.grid(), b.grid());
        assert!(a.grid().population() > 0);
    }

    #[test]
    fn randomize_and_clear_reset_generation() {
        let mut engine = make_engine(10, 10);
        engine.randomize();
        engine.step().unwrap();
        engine.step().unwrap();
        assert_eq!(engine.generation(), 2);

        let summary = engine.clear();
        assert_eq!(summary.generation, 0);
        assert_eq!(summary.population, 0);
        assert_eq!(engine.grid(), &Grid::empty(10, 10));

        engine.step().unwrap();
        let summary = engine.randomize();
        assert_eq!(summary.generation, 0);
    }

    #[test]
    fn toggle_keeps_generation() {
        let mut engine = make_engine(10, 10);
        engine.step().unwrap();
        let summary = engine.toggle_cell(3, 4).unwrap();
        assert_eq!(summary.generation, 1);
        assert_eq!(summary.births, 1);
        assert_eq!(engine.cell(3, 4).unwrap(), CellState::Alive);
    }

    #[test]
    fn toggle_out_of_bounds_leaves_grid_unchanged() {
        let mut engine = make_engine(50, 50);
        engine.randomize();
        let before = engine.grid().clone();

        let result = engine.toggle_cell(50, 0);
        assert!(matches!(
            result,
            Err(EngineError::Grid {
                source: GridError::OutOfBounds { .. }
            })
        ));
        assert_eq!(engine.grid(), &before);
    }

    #[test]
    fn apply_dispatches_intents() {
        let mut engine = make_engine(5, 5);
        let s = engine.apply(GridIntent::Toggle { row: 0, col: 0 }).unwrap();
        assert_eq!(s.cause, UpdateCause::Toggle);
        let s = engine.apply(GridIntent::Clear).unwrap();
        assert_eq!(s.cause, UpdateCause::Clear);
        assert_eq!(s.deaths, 1);
    }

    #[test]
    fn load_rejects_other_dimensions() {
        let mut engine = make_engine(5, 5);
        assert!(engine.load(Grid::empty(4, 5)).is_err());
    }

    #[test]
    fn snapshot_reflects_grid() {
        let mut engine = make_engine(3, 4);
        engine.toggle_cell(1, 2).unwrap();
        let snap = engine.snapshot(true);
        assert_eq!(snap.rows, 3);
        assert_eq!(snap.cols, 4);
        assert!(snap.running);
        assert_eq!(snap.population, 1);
        assert_eq!(snap.cells.get(1).and_then(|r| r.get(2)), Some(&1));
    }

    #[test]
    fn intent_serializes_with_tag() {
        let json = serde_json::to_value(GridIntent::Toggle { row: 1, col: 2 }).unwrap();
        assert_eq!(json["intent"], "toggle");
        assert_eq!(json["row"], 1);
    }
}
