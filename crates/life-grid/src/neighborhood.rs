//! Moore neighborhood lookup on a bounded grid.
//!
//! The grid does not wrap. A neighbor coordinate that lands outside
//! `[0, rows) x [0, cols)` is treated as a dead cell, so a corner cell has at
//! most three neighbors and an edge cell at most five.

/// Relative `(row, col)` deltas of the eight Moore neighbors, excluding
/// `(0, 0)`.
pub const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (0, 1),
    (0, -1),
    (1, -1),
    (-1, 1),
    (1, 1),
    (-1, -1),
    (1, 0),
    (-1, 0),
];

/// Apply an offset to a coordinate, returning `None` when the result leaves
/// the `rows x cols` rectangle.
pub fn offset(
    row: usize,
    col: usize,
    (d_row, d_col): (isize, isize),
    rows: usize,
    cols: usize,
) -> Option<(usize, usize)> {
    let n_row = row.checked_add_signed(d_row)?;
    let n_col = col.checked_add_signed(d_col)?;
    (n_row < rows && n_col < cols).then_some((n_row, n_col))
}

/// Iterate over the in-bounds neighbor coordinates of `(row, col)`.
pub fn neighbors(
    row: usize,
    col: usize,
    rows: usize,
    cols: usize,
) -> impl Iterator<Item = (usize, usize)> {
    NEIGHBOR_OFFSETS
        .into_iter()
        .filter_map(move |delta| offset(row, col, delta, rows, cols))
}
