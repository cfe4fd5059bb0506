//! Pivot method (simplex on a game tableau)
//!
//! The payoff matrix is shifted so every entry is positive, which makes the
//! game value positive. The tableau is bordered with a right edge of ones, a
//! bottom edge of minus ones and a zero corner. Pivoting continues until the
//! bottom edge has no negative entry. Then:
//! - the value of the shifted game is `1 / corner`
//! - a row variable that ended on top gets `bottom / corner`
//! - a column variable that ended on the left gets `right / corner`
//!
//! Entering columns and tied leaving rows are chosen by Bland's rule, so the
//! method cannot cycle on degenerate tableaus.

use crate::game::Equilibrium;
use crate::{Result, SolverError};

/// Weights (and pivot entries) below this are treated as zero
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

/// Safety net on the number of pivots for one game
pub const DEFAULT_MAX_PIVOTS: usize = 10_000;

/// Pivot-method solver settings
#[derive(Clone, Debug, PartialEq)]
pub struct PivotSolver {
    /// Numerical tolerance for sign tests and weight snapping
    pub tolerance: f64,
    /// Maximum number of pivots before giving up
    pub max_pivots: usize,
}

impl Default for PivotSolver {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_pivots: DEFAULT_MAX_PIVOTS,
        }
    }
}

impl PivotSolver {
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_max_pivots(mut self, max_pivots: usize) -> Self {
        self.max_pivots = max_pivots;
        self
    }

    /// Solve a validated matrix
    pub(crate) fn run(&self, matrix: &[Vec<f64>]) -> Result<Equilibrium> {
        let mut tableau = Tableau::new(matrix);
        let mut pivots = 0;

        while let Some(q) = tableau.entering_column(self.tolerance) {
            if pivots >= self.max_pivots {
                return Err(SolverError::PivotLimit(self.max_pivots));
            }
            let p = tableau
                .leaving_row(q, self.tolerance)
                .ok_or(SolverError::Unbounded { column: q })?;
            tableau.pivot(p, q);
            pivots += 1;
        }

        tableau.equilibrium(self.tolerance, pivots)
    }
}

/// Variable attached to a tableau border
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Label {
    Row(usize),
    Column(usize),
}

struct Tableau {
    /// `(rows + 1) x (cols + 1)` cells including the borders
    cells: Vec<Vec<f64>>,
    row_labels: Vec<Label>,
    col_labels: Vec<Label>,
    rows: usize,
    cols: usize,
    shift: f64,
}

impl Tableau {
    fn new(matrix: &[Vec<f64>]) -> Self {
        let rows = matrix.len();
        let cols = matrix.first().map_or(0, Vec::len);

        let min = matrix
            .iter()
            .flatten()
            .copied()
            .fold(f64::INFINITY, f64::min);
        let shift = if min > 0.0 { 0.0 } else { 1.0 - min };

        let mut cells: Vec<Vec<f64>> = matrix
            .iter()
            .map(|row| {
                let mut line: Vec<f64> = row.iter().map(|&a| a + shift).collect();
                line.push(1.0);
                line
            })
            .collect();
        let mut bottom = vec![-1.0; cols];
        bottom.push(0.0);
        cells.push(bottom);

        Self {
            cells,
            row_labels: (0..rows).map(Label::Row).collect(),
            col_labels: (0..cols).map(Label::Column).collect(),
            rows,
            cols,
            shift,
        }
    }

    /// Bland ordering over all variables
    fn key(&self, label: Label) -> usize {
        match label {
            Label::Row(i) => i,
            Label::Column(j) => self.rows + j,
        }
    }

    fn entering_column(&self, tolerance: f64) -> Option<usize> {
        let bottom = &self.cells[self.rows];
        (0..self.cols)
            .filter(|&j| bottom[j] < -tolerance)
            .min_by_key(|&j| self.key(self.col_labels[j]))
    }

    /// Minimum-ratio test on column `q`
    fn leaving_row(&self, q: usize, tolerance: f64) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;

        for i in 0..self.rows {
            let entry = self.cells[i][q];
            if entry <= tolerance {
                continue;
            }
            let ratio = self.cells[i][self.cols] / entry;
            best = match best {
                None => Some((i, ratio)),
                Some((b, r)) => {
                    let better = ratio < r - tolerance
                        || ((ratio - r).abs() <= tolerance
                            && self.key(self.row_labels[i]) < self.key(self.row_labels[b]));
                    if better {
                        Some((i, ratio))
                    } else {
                        Some((b, r))
                    }
                }
            };
        }

        best.map(|(i, _)| i)
    }

    fn pivot(&mut self, p: usize, q: usize) {
        let pivot = self.cells[p][q];
        let pivot_row = self.cells[p].clone();
        let width = self.cols + 1;

        for (i, line) in self.cells.iter_mut().enumerate() {
            if i == p {
                continue;
            }
            let factor = line[q];
            for j in 0..width {
                if j != q {
                    line[j] -= pivot_row[j] * factor / pivot;
                }
            }
            line[q] = -factor / pivot;
        }

        for j in 0..width {
            if j != q {
                self.cells[p][j] /= pivot;
            }
        }
        self.cells[p][q] = 1.0 / pivot;

        std::mem::swap(&mut self.row_labels[p], &mut self.col_labels[q]);
    }

    fn equilibrium(&self, tolerance: f64, pivots: usize) -> Result<Equilibrium> {
        let corner = self.cells[self.rows][self.cols];
        if !corner.is_finite() || corner <= tolerance {
            return Err(SolverError::Degenerate(format!(
                "final tableau corner is {}",
                corner
            )));
        }

        let mut row_strategy = vec![0.0; self.rows];
        for (j, label) in self.col_labels.iter().enumerate() {
            if let Label::Row(i) = *label {
                row_strategy[i] = self.cells[self.rows][j] / corner;
            }
        }

        let mut column_strategy = vec![0.0; self.cols];
        for (i, label) in self.row_labels.iter().enumerate() {
            if let Label::Column(j) = *label {
                column_strategy[j] = self.cells[i][self.cols] / corner;
            }
        }

        let shifted_value = 1.0 / corner;
        Ok(Equilibrium {
            row_strategy: snap_and_normalize(row_strategy, tolerance)?,
            column_strategy: snap_and_normalize(column_strategy, tolerance)?,
            value: shifted_value - self.shift,
            shifted_value,
            pivots,
        })
    }
}

/// Zero out numerical noise and rescale so the weights sum to one
fn snap_and_normalize(mut weights: Vec<f64>, tolerance: f64) -> Result<Vec<f64>> {
    for w in weights.iter_mut() {
        if *w < tolerance {
            *w = 0.0;
        }
    }

    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return Err(SolverError::Degenerate(
            "optimal strategy has no positive weight".to_string(),
        ));
    }
    for w in weights.iter_mut() {
        *w /= total;
    }
    Ok(weights)
}
