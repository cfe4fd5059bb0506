//! Payoff matrix checks and symmetrization

use crate::error::{Result, TierError};

/// Check that `matrix` is a finite `roster_len x roster_len` matrix.
///
/// Runs before any game is solved so malformed input fails fast.
pub fn validate_shape(roster_len: usize, matrix: &[Vec<f64>]) -> Result<()> {
    if roster_len == 0 {
        return Err(TierError::EmptyRoster);
    }
    if matrix.len() != roster_len {
        return Err(TierError::LengthMismatch {
            roster: roster_len,
            matrix: matrix.len(),
        });
    }

    for (i, row) in matrix.iter().enumerate() {
        if row.len() != roster_len {
            return Err(TierError::NotSquare {
                row: i,
                len: row.len(),
                expected: roster_len,
            });
        }
        if let Some(j) = row.iter().position(|v| !v.is_finite()) {
            return Err(TierError::NonFinite { row: i, col: j });
        }
    }
    Ok(())
}

/// Turn raw head-to-head scores into a zero-sum payoff matrix, in place.
///
/// For every pair `i < j`: `M[i][j] = (raw[i][j] - raw[j][i]) / 2` and
/// `M[j][i] = -M[i][j]`. The diagonal is left as is. Expects a square matrix.
pub fn symmetrize(matrix: &mut [Vec<f64>]) {
    let n = matrix.len();
    for i in 0..n {
        for j in (i + 1)..n {
            let upper = (matrix[i][j] - matrix[j][i]) / 2.0;
            matrix[i][j] = upper;
            matrix[j][i] = -upper;
        }
    }
}

/// Whether `M[i][j] == -M[j][i]` (within `tolerance`) for every `i != j`
pub fn is_antisymmetric(matrix: &[Vec<f64>], tolerance: f64) -> bool {
    let n = matrix.len();
    (0..n).all(|i| ((i + 1)..n).all(|j| (matrix[i][j] + matrix[j][i]).abs() <= tolerance))
}
