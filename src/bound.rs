//! Probability bounds `⋈ p` of probabilistic state formulas.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::incidence::IncidenceVector;

/// Comparison operator `⋈`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Comparison {
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
}

impl Comparison {
    /// Evaluates `lhs ⋈ rhs`, exactly as written: `<` and `>` are strict.
    pub fn holds(self, lhs: f64, rhs: f64) -> bool {
        match self {
            Comparison::Less => lhs < rhs,
            Comparison::LessOrEqual => lhs <= rhs,
            Comparison::Greater => lhs > rhs,
            Comparison::GreaterOrEqual => lhs >= rhs,
        }
    }
}

impl FromStr for Comparison {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "<" => Ok(Comparison::Less),
            "<=" | "≤" => Ok(Comparison::LessOrEqual),
            ">" => Ok(Comparison::Greater),
            ">=" | "≥" => Ok(Comparison::GreaterOrEqual),
            _ => Err(Error::UnknownComparison(s.to_string())),
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Comparison::Less => "<",
            Comparison::LessOrEqual => "≤",
            Comparison::Greater => ">",
            Comparison::GreaterOrEqual => "≥",
        };
        write!(f, "{}", s)
    }
}

/// A bound `⋈ p` with `p ∈ [0, 1]`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ProbabilityBound {
    comparison: Comparison,
    threshold: f64,
}

impl ProbabilityBound {
    pub fn new(comparison: Comparison, threshold: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(Error::InvalidArgument {
                name: "threshold",
                value: threshold,
                reason: "must be a probability in [0, 1]",
            });
        }
        Ok(Self { comparison, threshold })
    }

    pub fn comparison(&self) -> Comparison {
        self.comparison
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn satisfied_by(&self, probability: f64) -> bool {
        self.comparison.holds(probability, self.threshold)
    }

    /// Incidence vector of the positions whose probability satisfies the bound.
    pub fn filter(&self, probabilities: &[f64]) -> IncidenceVector {
        IncidenceVector::from_bools(probabilities.iter().map(|&p| self.satisfied_by(p)))
    }
}

impl fmt::Display for ProbabilityBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.comparison, self.threshold)
    }
}
