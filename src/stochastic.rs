//! Validation and derivation for probability and rate matrices.
//!
//! Numeric constraints on matrix entries are *reported*, not raised: each
//! `validate_*` function returns a [`ValidationReport`] listing every
//! violation found. Algorithms accept invalid matrices (after logging a
//! warning); callers should check the report before trusting the results.

use std::fmt;

use crate::error::{ensure_dimension, Error, Result};
use crate::matrix::SquareMatrix;

/// A single numeric violation inside a matrix.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Violation {
    /// Probability outside `[0, 1]` (or NaN).
    EntryOutOfRange { row: usize, col: usize, value: f64 },
    /// Row of a stochastic matrix not summing to 1.
    RowSum { row: usize, sum: f64 },
    /// Negative off-diagonal rate.
    NegativeRate { row: usize, col: usize, value: f64 },
    /// Infinite or NaN off-diagonal rate.
    NonFiniteRate { row: usize, col: usize, value: f64 },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::EntryOutOfRange { row, col, value } => {
                write!(f, "entry ({}, {}) = {} is not a probability", row, col, value)
            }
            Violation::RowSum { row, sum } => write!(f, "row {} sums to {}", row, sum),
            Violation::NegativeRate { row, col, value } => {
                write!(f, "rate ({}, {}) = {} is negative", row, col, value)
            }
            Violation::NonFiniteRate { row, col, value } => {
                write!(f, "rate ({}, {}) = {} is not finite", row, col, value)
            }
        }
    }
}

/// Outcome of a matrix validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            return write!(f, "valid");
        }
        let items: Vec<String> = self.violations.iter().map(|v| v.to_string()).collect();
        write!(f, "{} violation(s): {}", items.len(), items.join("; "))
    }
}

/// Checks that every entry is in `[0, 1]` and every row sums to `1 ± tolerance`.
pub fn validate_stochastic(p: &SquareMatrix<f64>, tolerance: f64) -> ValidationReport {
    let mut violations = Vec::new();
    for (i, row) in p.rows().enumerate() {
        for (j, &value) in row.iter().enumerate() {
            if !(0.0..=1.0).contains(&value) {
                violations.push(Violation::EntryOutOfRange { row: i, col: j, value });
            }
        }
        let sum: f64 = row.iter().sum();
        // Negated comparison also catches a NaN sum.
        if !((sum - 1.0).abs() <= tolerance) {
            violations.push(Violation::RowSum { row: i, sum });
        }
    }
    ValidationReport { violations }
}

/// Checks that every off-diagonal rate is finite and non-negative.
/// The diagonal is ignored.
pub fn validate_rate(r: &SquareMatrix<f64>) -> ValidationReport {
    let mut violations = Vec::new();
    for i in 0..r.size() {
        for (j, &value) in r.row(i).iter().enumerate() {
            if i == j {
                continue;
            }
            if !value.is_finite() {
                violations.push(Violation::NonFiniteRate { row: i, col: j, value });
            } else if value < 0.0 {
                violations.push(Violation::NegativeRate { row: i, col: j, value });
            }
        }
    }
    ValidationReport { violations }
}

/// Any square boolean matrix is a valid transition matrix; squareness is
/// already enforced by [`SquareMatrix::from_rows`].
pub fn validate_adjacency(_t: &SquareMatrix<bool>) -> ValidationReport {
    ValidationReport::default()
}

/// Checks that `pi` is a probability distribution over `n` states.
///
/// Unlike matrix validation this fails: an initial distribution is a scalar
/// argument of an analysis, not model data.
pub fn check_distribution(pi: &[f64], n: usize, tolerance: f64) -> Result<()> {
    ensure_dimension(n, pi.len())?;
    if let Some(&value) = pi.iter().find(|x| !(0.0..=1.0).contains(*x)) {
        return Err(Error::InvalidArgument {
            name: "distribution",
            value,
            reason: "entries must be probabilities",
        });
    }
    let sum: f64 = pi.iter().sum();
    if !((sum - 1.0).abs() <= tolerance) {
        return Err(Error::InvalidArgument {
            name: "distribution",
            value: sum,
            reason: "entries must sum to 1",
        });
    }
    Ok(())
}

/// Exit rate of every state: `E[i] = Σ_{j≠i} R[i][j]`.
pub fn exit_rate_vector(r: &SquareMatrix<f64>) -> Vec<f64> {
    (0..r.size())
        .map(|i| {
            r.row(i)
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .map(|(_, &x)| x)
                .sum()
        })
        .collect()
}

/// Infinitesimal generator `Q = R − diag(E)`, with the diagonal of `R` ignored.
pub fn derive_generator(r: &SquareMatrix<f64>) -> SquareMatrix<f64> {
    let exit_rates = exit_rate_vector(r);
    SquareMatrix::from_fn(r.size(), |i, j| if i == j { -exit_rates[i] } else { r[(i, j)] })
}
