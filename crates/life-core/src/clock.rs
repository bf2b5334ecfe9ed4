//! Generation counter for the Life engine.
//!
//! The clock counts steps computed since the grid was last seeded. It is
//! the single source of truth for "which generation is on screen": the
//! engine advances it once per step and resets it whenever the grid is
//! replaced by a randomize or clear.

/// Errors that can occur during clock operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClockError {
    /// Generation counter would overflow.
    #[error("generation counter overflow: cannot advance beyond u64::MAX")]
    GenerationOverflow,
}

/// Counts generations since the last reseed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationClock {
    /// Current generation (0 for a freshly seeded grid).
    generation: u64,
}

impl GenerationClock {
    /// Create a clock at generation 0.
    pub const fn new() -> Self {
        Self { generation: 0 }
    }

    /// Create a clock at an explicit generation (useful for testing).
    pub const fn from_generation(generation: u64) -> Self {
        Self { generation }
    }

    /// Advance by one generation. Returns the new generation.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::GenerationOverflow`] if the counter would
    /// exceed `u64::MAX`.
    pub fn advance(&mut self) -> Result<u64, ClockError> {
        self.generation = self
            .generation
            .checked_add(1)
            .ok_or(ClockError::GenerationOverflow)?;
        Ok(self.generation)
    }

    /// Reset to generation 0.
    pub const fn reset(&mut self) {
        self.generation = 0;
    }

    /// Return the current generation.
    pub const fn generation(&self) -> u64 {
        self.generation
    }
}
