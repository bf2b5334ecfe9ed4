//! Conway's survival/birth/death rule on a bounded grid.
//!
//! [`step`] reads only from its input and writes a freshly allocated grid.
//! Updating in place in row-major order would corrupt the neighbor counts
//! of cells not yet visited.

use life_grid::{CellState, Grid, GridError};

/// Next state of a cell given its current state and live neighbor count.
///
/// - fewer than 2 or more than 3 neighbors: dead
/// - dead with exactly 3 neighbors: alive
/// - otherwise unchanged (alive with 2 or 3 survives, dead with 2 stays dead)
pub const fn next_state(current: CellState, live_neighbors: u8) -> CellState {
    if live_neighbors < 2 || live_neighbors > 3 {
        CellState::Dead
    } else if matches!(current, CellState::Dead) && live_neighbors == 3 {
        CellState::Alive
    } else {
        current
    }
}

/// Compute the next generation of `grid`.
///
/// The result has the same dimensions as the input.
///
/// # Errors
///
/// Returns [`GridError::InvalidDimensions`] if the grid buffer is not
/// rectangular.
pub fn step(grid: &Grid) -> Result<Grid, GridError> {
    grid.validate()?;
    let cells = grid
        .iter()
        .map(|((row, col), state)| next_state(state, grid.live_neighbors(row, col)))
        .collect();
    Grid::from_cells(grid.rows(), grid.cols(), cells)
}

/// Cells that changed between two grids of the same shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Transition {
    /// Cells that went from dead to alive.
    pub births: usize,
    /// Cells that went from alive to dead.
    pub deaths: usize,
}

impl Transition {
    /// Compare `before` and `after` cell by cell.
    ///
    /// Grids of different shapes are compared over their common prefix.
    pub fn between(before: &Grid, after: &Grid) -> Self {
        before
            .cells()
            .iter()
            .zip(after.cells())
            .fold(Self::default(), |acc, (old, new)| match (old, new) {
                (CellState::Dead, CellState::Alive) => Self {
                    births: acc.births.saturating_add(1),
                    ..acc
                },
                (CellState::Alive, CellState::Dead) => Self {
                    deaths: acc.deaths.saturating_add(1),
                    ..acc
                },
                _ => acc,
            })
    }
}
