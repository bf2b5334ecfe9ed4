//! The value stored at a single grid coordinate.

/// State of one cell.
///
/// The numeric representation (`0` dead, `1` alive) is what snapshots
/// expose to external consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellState {
    /// An empty cell.
    #[default]
    Dead,
    /// A live cell.
    Alive,
}

impl CellState {
    /// Return `true` for [`CellState::Alive`].
    pub const fn is_alive(self) -> bool {
        matches!(self, Self::Alive)
    }

    /// Return the opposite state.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Dead => Self::Alive,
            Self::Alive => Self::Dead,
        }
    }

    /// Numeric form: `0` for dead, `1` for alive.
    pub const fn as_u8(self) -> u8 {
        match self {
            Self::Dead => 0,
            Self::Alive => 1,
        }
    }

    /// Parse the numeric form. Returns `None` for anything but `0` or `1`.
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Dead),
            1 => Some(Self::Alive),
            _ => None,
        }
    }
}

impl From<bool> for CellState {
    fn from(alive: bool) -> Self {
        if alive { Self::Alive } else { Self::Dead }
    }
}
