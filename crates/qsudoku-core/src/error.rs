//! Error types for the engine.

use thiserror::Error;

/// Unified error type for puzzle construction, solving, and analysis.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SudokuError {
    /// The input grid violates a row/column/box constraint among its givens,
    /// or is not a well-formed 9x9 table of digits 0-9. Raised at
    /// construction, before any solving is attempted.
    #[error("malformed puzzle: {0}")]
    MalformedPuzzle(String),

    /// Every branch of the search was exhausted without finding a complete
    /// valid assignment.
    #[error("puzzle has no solution")]
    Unsolvable,

    /// The solver hit its configured step budget before reaching a terminal
    /// state. Distinct from `Unsolvable`: the puzzle may still have a
    /// solution.
    #[error("search budget exceeded after {steps} steps")]
    BudgetExceeded { steps: u64 },

    /// A caller passed an argument outside the documented domain (e.g. a
    /// solution count of zero to the Grover iteration formula).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An internal consistency check failed. This indicates a bug in the
    /// engine, not a property of the input.
    #[error("internal invariant violated: {0}")]
    InternalInvariant(&'static str),
}

impl SudokuError {
    /// Creates a malformed-puzzle error.
    pub fn malformed(message: impl Into<String>) -> Self {
        SudokuError::MalformedPuzzle(message.into())
    }

    /// Creates an invalid-argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        SudokuError::InvalidArgument(message.into())
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SudokuError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = SudokuError::malformed("duplicate 5 in row 1");
        assert_eq!(err.to_string(), "malformed puzzle: duplicate 5 in row 1");

        let err = SudokuError::BudgetExceeded { steps: 42 };
        assert_eq!(err.to_string(), "search budget exceeded after 42 steps");
    }

    #[test]
    fn test_budget_distinct_from_unsolvable() {
        assert_ne!(
            SudokuError::BudgetExceeded { steps: 1 },
            SudokuError::Unsolvable
        );
    }
}
