//! Dense linear solver.

use log::debug;

use crate::error::{ensure_dimension, Error, Result};
use crate::matrix::SquareMatrix;

/// Solves `A·x = b` by Gaussian elimination with partial pivoting.
///
/// Fails with [`Error::SingularSystem`] as soon as the largest remaining pivot
/// candidate is smaller than `pivot_tolerance` relative to the largest
/// absolute entry of `A`, or is zero.
pub fn solve(a: &SquareMatrix<f64>, b: &[f64], pivot_tolerance: f64) -> Result<Vec<f64>> {
    let n = a.size();
    ensure_dimension(n, b.len())?;
    let threshold = pivot_tolerance * max_abs_entry(a);

    // Augmented matrix [A | b], one row per equation.
    let mut m: Vec<Vec<f64>> = (0..n)
        .map(|i| {
            let mut row = a.row(i).to_vec();
            row.push(b[i]);
            row
        })
        .collect();

    for col in 0..n {
        let mut pivot_row = col;
        for row in col + 1..n {
            if m[row][col].abs() > m[pivot_row][col].abs() {
                pivot_row = row;
            }
        }
        let pivot = m[pivot_row][col];
        // Negated comparison rejects a NaN pivot too.
        if !(pivot.abs() >= threshold && pivot != 0.0) {
            debug!("pivot {} in column {} below tolerance {}", pivot, col, threshold);
            return Err(Error::SingularSystem);
        }
        m.swap(col, pivot_row);

        for row in col + 1..n {
            let factor = m[row][col] / pivot;
            if factor == 0.0 {
                continue;
            }
            for k in col..=n {
                m[row][k] -= factor * m[col][k];
            }
        }
    }

    // Back substitution
    let mut x = vec![0.0; n];
    for i in (0..n).rev() {
        let s: f64 = (i + 1..n).map(|j| m[i][j] * x[j]).sum();
        x[i] = (m[i][n] - s) / m[i][i];
    }
    Ok(x)
}

fn max_abs_entry(a: &SquareMatrix<f64>) -> f64 {
    a.rows().flatten().fold(0.0, |acc, x| acc.max(x.abs()))
}

/// Finds the row vector `π` with `π·M = 0` and `Σπ = 1`.
///
/// `M` is either `P − I` for a DTMC or the generator `Q` for a CTMC. The
/// balance equation of the last state is replaced by the normalization
/// equation. Fails with [`Error::NoUniqueSteadyState`] when the resulting
/// system is singular.
pub(crate) fn stationary_distribution(m: &SquareMatrix<f64>, pivot_tolerance: f64) -> Result<Vec<f64>> {
    let n = m.size();
    if n == 0 {
        return Err(Error::NoUniqueSteadyState);
    }
    // The balance equations are homogeneous: rescale them to the unit
    // magnitude of the normalization row.
    let scale = match max_abs_entry(m) {
        s if s > 0.0 => s,
        _ => 1.0,
    };
    // Transpose: column j of M gives the balance equation of state j.
    let a = SquareMatrix::from_fn(n, |i, j| if i == n - 1 { 1.0 } else { m[(j, i)] / scale });
    let mut b = vec![0.0; n];
    b[n - 1] = 1.0;
    solve(&a, &b, pivot_tolerance).map_err(|e| match e {
        Error::SingularSystem => Error::NoUniqueSteadyState,
        e => e,
    })
}
