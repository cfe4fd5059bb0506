//! Tierlist Solver - Two-person zero-sum matrix games
//!
//! This crate solves finite zero-sum games given by a payoff matrix:
//! - `Game`: a scoped solver handle (construct, solve, query, drop)
//! - `PivotSolver`: pivot-method settings, usable through `MatrixGameSolver`
//! - `Equilibrium`: optimal mixed strategies and value for both players
//!
//! `M[i][j]` is always the payoff to the row player when row strategy `i`
//! meets column strategy `j`.

mod game;
mod pivot;

pub use game::{Equilibrium, Game, Player};
pub use pivot::{PivotSolver, DEFAULT_MAX_PIVOTS, DEFAULT_TOLERANCE};

/// Result type for solver operations
pub type Result<T> = std::result::Result<T, SolverError>;

/// Error types for solver operations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SolverError {
    #[error("payoff matrix is empty")]
    EmptyMatrix,

    #[error("row {row} has {len} entries, expected {expected}")]
    RaggedRow { row: usize, len: usize, expected: usize },

    #[error("payoff matrix is {rows}x{cols}, expected a square matrix")]
    NotSquare { rows: usize, cols: usize },

    #[error("payoff at ({row}, {col}) is not finite")]
    NonFinite { row: usize, col: usize },

    #[error("game has not been solved yet")]
    NotSolved,

    #[error("no pivot row for column {column}; tableau is unbounded")]
    Unbounded { column: usize },

    #[error("pivot limit of {0} reached without an optimal tableau")]
    PivotLimit(usize),

    #[error("degenerate solution: {0}")]
    Degenerate(String),
}

/// Anything that can solve a square zero-sum matrix game.
///
/// The tier builders only talk to the solver through this trait, so
/// alternative numerical methods (or test doubles) can be plugged in.
pub trait MatrixGameSolver: Send + Sync {
    /// Solve the game with payoff matrix `matrix` (row player's payoffs).
    fn solve(&self, matrix: &[Vec<f64>]) -> Result<Equilibrium>;
}
