//! The fixed-size cell matrix.
//!
//! A [`Grid`] is an owned, contiguous, row-major buffer of [`CellState`]
//! values. Operations that change the grid as a whole (seeding, clearing,
//! toggling) return a fresh value and leave the receiver untouched; the
//! owner decides when to swap its canonical reference.
//!
//! # Invariants
//!
//! - `cells.len() == rows * cols` for every grid built through this module.
//! - Dimensions never change after construction.
//! - Every coordinate access is bounds-checked; nothing wraps.

use rand::Rng;

use crate::cell::CellState;
use crate::error::GridError;
use crate::neighborhood;

/// A bounded `rows x cols` matrix of cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    /// Number of rows.
    rows: usize,
    /// Number of columns.
    cols: usize,
    /// Row-major cell buffer.
    cells: Vec<CellState>,
}

impl Grid {
    /// Create an all-dead grid with the given dimensions.
    ///
    /// Zero-sized dimensions are allowed and yield a grid with no cells.
    pub fn empty(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![CellState::Dead; rows.saturating_mul(cols)],
        }
    }

    /// Create the grid produced by a clear intent.
    ///
    /// Identical to [`Grid::empty`]; kept as a separate name so callers can
    /// express intent.
    pub fn clear(rows: usize, cols: usize) -> Self {
        Self::empty(rows, cols)
    }

    /// Create a grid where each cell is independently alive with
    /// probability `density`.
    ///
    /// A density at or below 0 yields an empty grid, at or above 1 a full
    /// one. The generator is injected so callers can seed it.
    pub fn random<R: Rng + ?Sized>(rows: usize, cols: usize, density: f64, rng: &mut R) -> Self {
        let len = rows.saturating_mul(cols);
        let cells = (0..len)
            .map(|_| CellState::from(rng.random::<f64>() < density))
            .collect();
        Self { rows, cols, cells }
    }

    /// Build a grid from a row-major buffer.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidDimensions`] if `cells.len()` is not
    /// `rows * cols`.
    pub fn from_cells(rows: usize, cols: usize, cells: Vec<CellState>) -> Result<Self, GridError> {
        let expected = rows
            .checked_mul(cols)
            .ok_or_else(|| GridError::InvalidDimensions {
                reason: format!("{rows}x{cols} overflows usize"),
            })?;
        if cells.len() != expected {
            return Err(GridError::InvalidDimensions {
                reason: format!(
                    "expected {expected} cells for {rows}x{cols}, got {}",
                    cells.len()
                ),
            });
        }
        Ok(Self { rows, cols, cells })
    }

    /// Build a grid from nested rows of `0`/`1` values.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidDimensions`] if the rows differ in
    /// length, or [`GridError::InvalidCellValue`] for a value other than
    /// 0 or 1.
    pub fn from_rows(rows: &[Vec<u8>]) -> Result<Self, GridError> {
        let cols = rows.first().map_or(0, Vec::len);
        let mut cells = Vec::with_capacity(rows.len().saturating_mul(cols));
        for (row, values) in rows.iter().enumerate() {
            if values.len() != cols {
                return Err(GridError::InvalidDimensions {
                    reason: format!(
                        "row {row} has {} cells, expected {cols}",
                        values.len()
                    ),
                });
            }
            for (col, &value) in values.iter().enumerate() {
                let state = CellState::from_u8(value)
                    .ok_or(GridError::InvalidCellValue { row, col, value })?;
                cells.push(state);
            }
        }
        Self::from_cells(rows.len(), cols, cells)
    }

    /// Number of rows.
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Check that the buffer still matches the declared dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidDimensions`] on mismatch.
    pub fn validate(&self) -> Result<(), GridError> {
        let expected = self.rows.checked_mul(self.cols);
        if expected == Some(self.cells.len()) {
            Ok(())
        } else {
            Err(GridError::InvalidDimensions {
                reason: format!(
                    "buffer holds {} cells but grid is {}x{}",
                    self.cells.len(),
                    self.rows,
                    self.cols
                ),
            })
        }
    }

    /// Whether `(row, col)` lies inside the grid.
    pub const fn contains(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    /// Check a coordinate against the grid bounds.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] for a coordinate outside the grid.
    pub const fn check_bounds(&self, row: usize, col: usize) -> Result<(), GridError> {
        if self.contains(row, col) {
            Ok(())
        } else {
            Err(GridError::OutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    fn index(&self, row: usize, col: usize) -> Result<usize, GridError> {
        self.check_bounds(row, col)?;
        row.checked_mul(self.cols)
            .and_then(|base| base.checked_add(col))
            .ok_or_else(|| GridError::InvalidDimensions {
                reason: format!("index of ({row}, {col}) overflows usize"),
            })
    }

    /// Return the state at `(row, col)`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] for a coordinate outside the grid.
    pub fn get(&self, row: usize, col: usize) -> Result<CellState, GridError> {
        let idx = self.index(row, col)?;
        self.cells
            .get(idx)
            .copied()
            .ok_or_else(|| GridError::InvalidDimensions {
                reason: format!("buffer too short for ({row}, {col})"),
            })
    }

    /// Whether `(row, col)` is alive. Coordinates outside the grid read as
    /// dead.
    pub fn is_alive(&self, row: usize, col: usize) -> bool {
        self.get(row, col).is_ok_and(CellState::is_alive)
    }

    /// Set the state at `(row, col)` in place.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] for a coordinate outside the grid.
    pub fn set(&mut self, row: usize, col: usize, state: CellState) -> Result<(), GridError> {
        let idx = self.index(row, col)?;
        let cell = self
            .cells
            .get_mut(idx)
            .ok_or_else(|| GridError::InvalidDimensions {
                reason: format!("buffer too short for ({row}, {col})"),
            })?;
        *cell = state;
        Ok(())
    }

    /// Return a copy of this grid with `(row, col)` flipped.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] for a coordinate outside the grid;
    /// `self` is never modified.
    pub fn toggled(&self, row: usize, col: usize) -> Result<Self, GridError> {
        let current = self.get(row, col)?;
        let mut next = self.clone();
        next.set(row, col, current.flipped())?;
        Ok(next)
    }

    /// Count live cells among the in-bounds Moore neighbors of `(row, col)`.
    pub fn live_neighbors(&self, row: usize, col: usize) -> u8 {
        let count = neighborhood::neighbors(row, col, self.rows, self.cols)
            .filter(|&(n_row, n_col)| self.is_alive(n_row, n_col))
            .count();
        // At most eight neighbors exist.
        u8::try_from(count).unwrap_or(u8::MAX)
    }

    /// Number of live cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|c| c.is_alive()).count()
    }

    /// Iterate over cells in row-major order with their coordinates.
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), CellState)> + '_ {
        let cols = self.cols.max(1);
        self.cells.iter().enumerate().map(move |(idx, &state)| {
            let row = idx.checked_div(cols).unwrap_or(0);
            let col = idx.checked_rem(cols).unwrap_or(0);
            ((row, col), state)
        })
    }

    /// Iterate over the coordinates of live cells in row-major order.
    pub fn live_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.iter()
            .filter(|(_, state)| state.is_alive())
            .map(|(pos, _)| pos)
    }

    /// Export the grid as nested rows of `0`/`1` values.
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        if self.cols == 0 {
            return vec![Vec::new(); self.rows];
        }
        self.cells
            .chunks(self.cols)
            .map(|row| row.iter().map(|c| c.as_u8()).collect())
            .collect()
    }

    /// Borrow the row-major cell buffer.
    pub fn cells(&self) -> &[CellState] {
        &self.cells
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn empty_grid_is_all_dead() {
        let grid = Grid::empty(4, 7);
        assert_eq!(grid.rows(), 4);
        assert_eq!(grid.cols(), 7);
        assert_eq!(grid.population(), 0);
        assert!(grid.cells().iter().all(|c| *c == CellState::Dead));
    }

    #[test]
    fn clear_matches_empty() {
        assert_eq!(Grid::clear(3, 5), Grid::empty(3, 5));
    }

    #[test]
    fn zero_sized_grid_is_allowed() {
        let grid = Grid::empty(0, 0);
        assert_eq!(grid.population(), 0);
        assert!(grid.validate().is_ok());
        assert!(grid.to_rows().is_empty());
    }

    #[test]
    fn get_out_of_bounds_fails() {
        let grid = Grid::empty(3, 3);
        let err = grid.get(3, 0).unwrap_err();
        assert_eq!(
            err,
            GridError::OutOfBounds {
                row: 3,
                col: 0,
                rows: 3,
                cols: 3
            }
        );
        assert!(grid.get(0, 3).is_err());
    }

    #[test]
    fn toggle_flips_only_target_cell() {
        let grid = Grid::empty(3, 3);
        let toggled = grid.toggled(1, 2).unwrap();
        assert_eq!(toggled.get(1, 2).unwrap(), CellState::Alive);
        assert_eq!(toggled.population(), 1);
        // Input untouched.
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn toggle_twice_restores_grid() {
        let mut rng = StdRng::seed_from_u64(7);
        let grid = Grid::random(6, 6, 0.5, &mut rng);
        let restored = grid.toggled(4, 1).unwrap().toggled(4, 1).unwrap();
        assert_eq!(restored, grid);
    }

    #[test]
    fn toggle_out_of_bounds_fails_and_leaves_grid() {
        let grid = Grid::empty(50, 50).toggled(0, 0).unwrap();
        let before = grid.clone();
        let result = grid.toggled(50, 0);
        assert!(matches!(result, Err(GridError::OutOfBounds { row: 50, .. })));
        assert_eq!(grid, before);
    }

    #[test]
    fn random_is_deterministic_for_a_seed() {
        let a = Grid::random(10, 10, 0.3, &mut StdRng::seed_from_u64(42));
        let b = Grid::random(10, 10, 0.3, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn random_density_extremes() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(Grid::random(8, 8, 0.0, &mut rng).population(), 0);
        assert_eq!(Grid::random(8, 8, 1.0, &mut rng).population(), 64);
    }

    #[test]
    fn random_density_is_roughly_respected() {
        let mut rng = StdRng::seed_from_u64(99);
        let grid = Grid::random(100, 100, 0.3, &mut rng);
        let population = grid.population();
        assert!((2_500..3_500).contains(&population), "population {population}");
    }

    #[test]
    fn from_rows_rejects_ragged_input() {
        let result = Grid::from_rows(&[vec![0, 1], vec![1]]);
        assert!(matches!(result, Err(GridError::InvalidDimensions { .. })));
    }

    #[test]
    fn from_rows_rejects_bad_values() {
        let result = Grid::from_rows(&[vec![0, 2]]);
        assert_eq!(
            result.unwrap_err(),
            GridError::InvalidCellValue {
                row: 0,
                col: 1,
                value: 2
            }
        );
    }

    #[test]
    fn rows_round_trip() {
        let rows = vec![vec![0, 1, 0], vec![1, 1, 0]];
        let grid = Grid::from_rows(&rows).unwrap();
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.cols(), 3);
        assert_eq!(grid.to_rows(), rows);
    }

    #[test]
    fn from_cells_rejects_wrong_length() {
        let result = Grid::from_cells(2, 2, vec![CellState::Dead; 3]);
        assert!(matches!(result, Err(GridError::InvalidDimensions { .. })));
    }

    #[test]
    fn corner_counts_at_most_three_neighbors() {
        let full = Grid::random(4, 4, 1.0, &mut StdRng::seed_from_u64(0));
        assert_eq!(full.live_neighbors(0, 0), 3);
        assert_eq!(full.live_neighbors(0, 1), 5);
        assert_eq!(full.live_neighbors(1, 1), 8);
    }

    #[test]
    fn live_cells_lists_coordinates() {
        let grid = Grid::from_rows(&[vec![1, 0], vec![0, 1]]).unwrap();
        let live: Vec<_> = grid.live_cells().collect();
        assert_eq!(live, vec![(0, 0), (1, 1)]);
    }
}
