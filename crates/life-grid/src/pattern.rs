//! Plain-text patterns.
//!
//! One line per row, `#` or `O` for a live cell and `.` for a dead one.
//! Blank lines and surrounding whitespace are ignored, which keeps patterns
//! readable inside raw string literals.

use std::fmt;

use crate::cell::CellState;
use crate::error::GridError;
use crate::grid::Grid;

const ALIVE: char = '#';
const DEAD: char = '.';

impl Grid {
    /// Parse a text pattern into a grid sized to the pattern.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidDimensions`] if lines differ in length,
    /// or [`GridError::InvalidPatternChar`] for an unknown character.
    pub fn parse(text: &str) -> Result<Self, GridError> {
        let rows = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .enumerate()
            .map(|(line_no, line)| {
                line.chars()
                    .enumerate()
                    .map(|(col, ch)| match ch {
                        ALIVE | 'O' => Ok(CellState::Alive.as_u8()),
                        DEAD => Ok(CellState::Dead.as_u8()),
                        found => Err(GridError::InvalidPatternChar {
                            line: line_no,
                            col,
                            found,
                        }),
                    })
                    .collect::<Result<Vec<u8>, GridError>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_rows(&rows)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.to_rows() {
            let line: String = row
                .iter()
                .map(|&v| if v == 1 { ALIVE } else { DEAD })
                .collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parses_glider() {
        let grid = Grid::parse(
            r"
            .#...
            ..#..
            ###..
            ",
        )
        .unwrap();
        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.cols(), 5);
        assert_eq!(grid.population(), 5);
        assert_eq!(grid.get(0, 1).unwrap(), CellState::Alive);
    }

    #[test]
    fn accepts_o_for_alive() {
        let grid = Grid::parse("O.\n.O").unwrap();
        assert_eq!(grid.population(), 2);
    }

    #[test]
    fn display_matches_parse_input() {
        let text = ".#.\n###\n...\n";
        let grid = Grid::parse(text).unwrap();
        assert_eq!(grid.to_string(), text);
    }

    #[test]
    fn parses_own_rendering() {
        let grid = Grid::from_rows(&[vec![1, 0, 0, 1], vec![0, 1, 1, 0]]).unwrap();
        let rendered = grid.to_string();
        assert!(rendered.starts_with(ALIVE));
        assert_eq!(Grid::parse(&rendered).unwrap(), grid);
    }

    #[test]
    fn rejects_unknown_character() {
        let err = Grid::parse("..\n.x").unwrap_err();
        assert_eq!(
            err,
            GridError::InvalidPatternChar {
                line: 1,
                col: 1,
                found: 'x'
            }
        );
    }

    #[test]
    fn rejects_ragged_lines() {
        assert!(matches!(
            Grid::parse("...\n.."),
            Err(GridError::InvalidDimensions { .. })
        ));
    }
}
