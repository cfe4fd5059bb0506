//! Game handle - the construct / solve / query lifecycle

use serde::Serialize;

use crate::pivot::PivotSolver;
use crate::{MatrixGameSolver, Result, SolverError};

/// One of the two players of a matrix game
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Player {
    /// Chooses a row, receives `M[i][j]`
    Row,
    /// Chooses a column, receives `-M[i][j]`
    Column,
}

/// Optimal mixed strategies and value of a solved game
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Equilibrium {
    /// Row player's optimal mixed strategy (one weight per row)
    pub row_strategy: Vec<f64>,
    /// Column player's optimal mixed strategy (one weight per column)
    pub column_strategy: Vec<f64>,
    /// Value of the game to the row player
    pub value: f64,
    /// Value of the game after all payoffs were shifted positive for pivoting
    pub shifted_value: f64,
    /// Number of pivots performed
    pub pivots: usize,
}

impl Equilibrium {
    /// Optimal mixed strategy for `player`
    pub fn strategy(&self, player: Player) -> &[f64] {
        match player {
            Player::Row => &self.row_strategy,
            Player::Column => &self.column_strategy,
        }
    }

    /// Value of the game to `player`
    pub fn value(&self, player: Player) -> f64 {
        match player {
            Player::Row => self.value,
            Player::Column => -self.value,
        }
    }

    /// Indices of the strategies played with weight above `threshold`
    pub fn support(&self, player: Player, threshold: f64) -> Vec<usize> {
        self.strategy(player)
            .iter()
            .enumerate()
            .filter(|(_, &w)| w > threshold)
            .map(|(i, _)| i)
            .collect()
    }
}

/// Solver state for one square payoff matrix.
///
/// The handle owns its matrix and solution; everything is released when it
/// goes out of scope, including on early returns through `?`.
#[derive(Clone, Debug)]
pub struct Game {
    matrix: Vec<Vec<f64>>,
    settings: PivotSolver,
    solution: Option<Equilibrium>,
}

impl Game {
    /// Create a game from a square payoff matrix with default pivot settings
    pub fn new(matrix: Vec<Vec<f64>>) -> Result<Self> {
        Self::with_settings(matrix, PivotSolver::default())
    }

    /// Create a game with explicit pivot settings
    pub fn with_settings(matrix: Vec<Vec<f64>>, settings: PivotSolver) -> Result<Self> {
        validate_matrix(&matrix)?;
        Ok(Self {
            matrix,
            settings,
            solution: None,
        })
    }

    pub fn is_solved(&self) -> bool {
        self.solution.is_some()
    }

    /// Compute both players' optimal strategies. Calling again is a no-op.
    pub fn solve(&mut self) -> Result<()> {
        if self.solution.is_none() {
            let equilibrium = self.settings.run(&self.matrix)?;
            tracing::trace!(
                size = self.matrix.len(),
                pivots = equilibrium.pivots,
                value = equilibrium.value,
                "game solved"
            );
            self.solution = Some(equilibrium);
        }
        Ok(())
    }

    /// Optimal mixed strategy for `player`
    pub fn strategy(&self, player: Player) -> Result<&[f64]> {
        self.solution
            .as_ref()
            .map(|s| s.strategy(player))
            .ok_or(SolverError::NotSolved)
    }

    /// Value of the game to `player`
    pub fn value(&self, player: Player) -> Result<f64> {
        self.solution
            .as_ref()
            .map(|s| s.value(player))
            .ok_or(SolverError::NotSolved)
    }

    /// Consume the handle, keeping only the solution
    pub fn into_equilibrium(self) -> Result<Equilibrium> {
        self.solution.ok_or(SolverError::NotSolved)
    }
}

impl MatrixGameSolver for PivotSolver {
    fn solve(&self, matrix: &[Vec<f64>]) -> Result<Equilibrium> {
        let mut game = Game::with_settings(matrix.to_vec(), self.clone())?;
        game.solve()?;
        game.into_equilibrium()
    }
}

/// Check that `matrix` is non-empty, rectangular, square and finite
fn validate_matrix(matrix: &[Vec<f64>]) -> Result<()> {
    let rows = matrix.len();
    let cols = matrix.first().map_or(0, Vec::len);
    if rows == 0 || cols == 0 {
        return Err(SolverError::EmptyMatrix);
    }

    for (i, row) in matrix.iter().enumerate() {
        if row.len() != cols {
            return Err(SolverError::RaggedRow {
                row: i,
                len: row.len(),
                expected: cols,
            });
        }
        if let Some(j) = row.iter().position(|v| !v.is_finite()) {
            return Err(SolverError::NonFinite { row: i, col: j });
        }
    }

    if rows != cols {
        return Err(SolverError::NotSquare { rows, cols });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn unequal_rps() -> Vec<Vec<f64>> {
        vec![
            vec![0.0, -2.0, 1.0],
            vec![2.0, 0.0, -1.0],
            vec![-1.0, 1.0, 0.0],
        ]
    }

    fn assert_close(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < EPS, "{:?} != {:?}", actual, expected);
        }
    }

    #[test]
    fn test_unequal_rps_fully_supported() {
        let mut game = Game::new(unequal_rps()).unwrap();
        game.solve().unwrap();

        let row = game.strategy(Player::Row).unwrap();
        let col = game.strategy(Player::Column).unwrap();
        assert!(row.iter().all(|&w| w > 0.0));
        assert!(col.iter().all(|&w| w > 0.0));
        assert_close(row, &[0.25, 0.25, 0.5]);
        assert_close(col, &[0.25, 0.25, 0.5]);

        // Antisymmetric game: value is zero, pivoting happens on a positive shift
        assert!(game.value(Player::Row).unwrap().abs() < EPS);
        let eq = game.into_equilibrium().unwrap();
        assert!(eq.shifted_value > 0.0);
    }

    #[test]
    fn test_saddle_point() {
        // Row 0 dominates row 1, column player then prefers column 0
        let mut game = Game::new(vec![vec![1.0, 2.0], vec![0.0, -1.0]]).unwrap();
        game.solve().unwrap();

        assert_close(game.strategy(Player::Row).unwrap(), &[1.0, 0.0]);
        assert_close(game.strategy(Player::Column).unwrap(), &[1.0, 0.0]);
        assert!((game.value(Player::Row).unwrap() - 1.0).abs() < EPS);
        assert!((game.value(Player::Column).unwrap() + 1.0).abs() < EPS);
    }

    #[test]
    fn test_matching_pennies() {
        let mut game = Game::new(vec![vec![1.0, -1.0], vec![-1.0, 1.0]]).unwrap();
        game.solve().unwrap();

        assert_close(game.strategy(Player::Row).unwrap(), &[0.5, 0.5]);
        assert!(game.value(Player::Row).unwrap().abs() < EPS);
    }

    #[test]
    fn test_positive_game_value() {
        let mut game = Game::new(vec![vec![3.0, 1.0], vec![2.0, 4.0]]).unwrap();
        game.solve().unwrap();

        // x = (1/2, 1/2), y = (3/4, 1/4), v = 5/2
        assert_close(game.strategy(Player::Row).unwrap(), &[0.5, 0.5]);
        assert_close(game.strategy(Player::Column).unwrap(), &[0.75, 0.25]);
        assert!((game.value(Player::Row).unwrap() - 2.5).abs() < EPS);
    }

    #[test]
    fn test_single_strategy() {
        let mut game = Game::new(vec![vec![0.0]]).unwrap();
        game.solve().unwrap();
        assert_close(game.strategy(Player::Row).unwrap(), &[1.0]);
    }

    #[test]
    fn test_queries_before_solve() {
        let game = Game::new(unequal_rps()).unwrap();
        assert!(!game.is_solved());
        assert_eq!(game.strategy(Player::Row), Err(SolverError::NotSolved));
        assert_eq!(game.value(Player::Column), Err(SolverError::NotSolved));
    }

    #[test]
    fn test_solve_twice_is_noop() {
        let mut game = Game::new(unequal_rps()).unwrap();
        game.solve().unwrap();
        let first = game.strategy(Player::Row).unwrap().to_vec();
        game.solve().unwrap();
        assert_eq!(game.strategy(Player::Row).unwrap(), first.as_slice());
    }

    #[test]
    fn test_rejects_malformed_matrices() {
        assert_eq!(Game::new(vec![]).unwrap_err(), SolverError::EmptyMatrix);
        assert_eq!(Game::new(vec![vec![]]).unwrap_err(), SolverError::EmptyMatrix);
        assert_eq!(
            Game::new(vec![vec![0.0, 1.0], vec![1.0]]).unwrap_err(),
            SolverError::RaggedRow { row: 1, len: 1, expected: 2 }
        );
        assert_eq!(
            Game::new(vec![vec![0.0, 1.0, 2.0], vec![1.0, 0.0, 2.0]]).unwrap_err(),
            SolverError::NotSquare { rows: 2, cols: 3 }
        );
        assert_eq!(
            Game::new(vec![vec![0.0, f64::NAN], vec![1.0, 0.0]]).unwrap_err(),
            SolverError::NonFinite { row: 0, col: 1 }
        );
    }

    #[test]
    fn test_equilibrium_support() {
        let eq = Equilibrium {
            row_strategy: vec![0.5, 0.0, 0.5],
            column_strategy: vec![1.0, 0.0, 0.0],
            value: 0.0,
            shifted_value: 1.0,
            pivots: 2,
        };
        assert_eq!(eq.support(Player::Row, 0.0), vec![0, 2]);
        assert_eq!(eq.support(Player::Column, 0.0), vec![0]);
    }

    #[test]
    fn test_trait_object_solve() {
        let solver: &dyn MatrixGameSolver = &PivotSolver::default();
        let eq = solver.solve(&unequal_rps()).unwrap();
        assert_close(&eq.row_strategy, &[0.25, 0.25, 0.5]);
    }
}
