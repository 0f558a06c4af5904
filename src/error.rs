//! Error taxonomy for model construction and analysis.
//!
//! Errors fall into four classes (see [`ErrorKind`]):
//!
//! - **Shape** errors are raised at construction time when a matrix or a vector
//!   does not match the cardinality of the set it is indexed by.
//! - **Lookup** errors are raised when converting between labels and positions.
//! - **Numeric-domain** errors are raised for invalid scalar arguments
//!   (precision, time, threshold, initial distribution). Numeric violations
//!   *inside* a matrix are not errors: they are reported by
//!   [`ValidationReport`][crate::stochastic::ValidationReport].
//! - **Algorithmic** errors mean the mathematical precondition of an algorithm
//!   is unmet. The caller may retry with other parameters (e.g. a looser ε)
//!   instead of fixing the input data.

use thiserror::Error;

/// Classification of an [`Error`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ErrorKind {
    Shape,
    Lookup,
    NumericDomain,
    Algorithmic,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("Incompatible dimension: expected {expected}, found {found}")]
    IncompatibleDimension { expected: usize, found: usize },

    #[error("Matrix is not square: row {row} has {len} entries, expected {expected}")]
    NotSquare { row: usize, len: usize, expected: usize },

    #[error("Label not found: {0:?}")]
    LabelNotFound(String),

    #[error("Index {index} out of range for a set of {len} elements")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Invalid argument `{name}` = {value}: {reason}")]
    InvalidArgument {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("Unknown comparison operator {0:?}")]
    UnknownComparison(String),

    #[error("The chain has no unique steady-state distribution")]
    NoUniqueSteadyState,

    #[error("The linear system is singular")]
    SingularSystem,

    #[error("Degenerate chain: all exit rates are zero")]
    DegenerateChain,

    #[error("Precision ε = {epsilon} unattainable within {iterations} Poisson terms")]
    PrecisionUnattainable { epsilon: f64, iterations: usize },

    #[error("Iteration limit {limit} exceeded")]
    IterationLimitExceeded { limit: usize },

    #[error("Embedded DTMC undefined for absorbing states {states:?}")]
    UndefinedEmbedding { states: Vec<String> },
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::IncompatibleDimension { .. } | Error::NotSquare { .. } => ErrorKind::Shape,
            Error::LabelNotFound(_) | Error::IndexOutOfRange { .. } => ErrorKind::Lookup,
            Error::InvalidArgument { .. } | Error::UnknownComparison(_) => ErrorKind::NumericDomain,
            Error::NoUniqueSteadyState
            | Error::SingularSystem
            | Error::DegenerateChain
            | Error::PrecisionUnattainable { .. }
            | Error::IterationLimitExceeded { .. }
            | Error::UndefinedEmbedding { .. } => ErrorKind::Algorithmic,
        }
    }

    /// Returns true if the error means an algorithm precondition is unmet,
    /// as opposed to malformed input.
    pub fn is_algorithmic(&self) -> bool {
        self.kind() == ErrorKind::Algorithmic
    }

    pub(crate) fn dimension(expected: usize, found: usize) -> Self {
        Error::IncompatibleDimension { expected, found }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Fails with [`Error::IncompatibleDimension`] unless `found == expected`.
pub(crate) fn ensure_dimension(expected: usize, found: usize) -> Result<()> {
    if expected == found {
        Ok(())
    } else {
        Err(Error::dimension(expected, found))
    }
}
