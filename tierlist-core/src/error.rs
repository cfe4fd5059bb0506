//! Error types for tier derivation

use tierlist_solver::SolverError;

/// Result type for tier derivation
pub type Result<T> = std::result::Result<T, TierError>;

/// Error types for tier derivation
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TierError {
    #[error("roster is empty")]
    EmptyRoster,

    #[error("roster has {roster} strategies but the matrix has {matrix} rows")]
    LengthMismatch { roster: usize, matrix: usize },

    #[error("matrix row {row} has {len} entries, expected {expected}")]
    NotSquare { row: usize, len: usize, expected: usize },

    #[error("matrix entry ({row}, {col}) is not finite")]
    NonFinite { row: usize, col: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("dominance graph has a cycle through strategy {index}")]
    DominanceCycle { index: usize },

    #[error("solver returned an empty support for tier {tier}")]
    EmptySupport { tier: usize },

    #[error("solver failed: {0}")]
    Solver(#[from] SolverError),
}

impl TierError {
    /// Whether the error was raised before any game was solved
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            TierError::EmptyRoster
                | TierError::LengthMismatch { .. }
                | TierError::NotSquare { .. }
                | TierError::NonFinite { .. }
                | TierError::InvalidConfig(_)
        )
    }
}
