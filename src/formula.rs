//! State formulas over atomic propositions.

use std::fmt;

/// State formula abstract syntax tree.
///
/// Only the boolean fragment is represented: the probabilistic operators are
/// answered by [`Dtmc`][crate::dtmc::Dtmc] on satisfaction sets.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StateFormula {
    /// True
    True,
    /// Atomic proposition
    Atom(String),
    /// Negation
    Not(Box<StateFormula>),
    /// Disjunction
    Or(Box<StateFormula>, Box<StateFormula>),
    /// Conjunction
    And(Box<StateFormula>, Box<StateFormula>),
}

impl StateFormula {
    pub fn tt() -> Self {
        StateFormula::True
    }

    /// `¬tt`
    pub fn ff() -> Self {
        StateFormula::True.not()
    }

    pub fn atom(s: impl Into<String>) -> Self {
        StateFormula::Atom(s.into())
    }

    pub fn not(self) -> Self {
        StateFormula::Not(Box::new(self))
    }

    pub fn or(self, other: Self) -> Self {
        StateFormula::Or(Box::new(self), Box::new(other))
    }

    pub fn and(self, other: Self) -> Self {
        StateFormula::And(Box::new(self), Box::new(other))
    }

    /// `¬self ∨ other`
    pub fn implies(self, other: Self) -> Self {
        self.not().or(other)
    }

    /// Atomic propositions occurring in the formula, in order of appearance.
    pub fn atoms(&self) -> Vec<&str> {
        let mut atoms = Vec::new();
        let mut stack = vec![self];
        while let Some(f) = stack.pop() {
            match f {
                StateFormula::True => {}
                StateFormula::Atom(a) => {
                    if !atoms.contains(&a.as_str()) {
                        atoms.push(a.as_str());
                    }
                }
                StateFormula::Not(phi) => stack.push(phi),
                StateFormula::Or(phi, psi) | StateFormula::And(phi, psi) => {
                    stack.push(psi);
                    stack.push(phi);
                }
            }
        }
        atoms
    }
}

impl fmt::Display for StateFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateFormula::True => write!(f, "tt"),
            StateFormula::Atom(a) => write!(f, "{}", a),
            StateFormula::Not(phi) => write!(f, "¬{}", phi),
            StateFormula::Or(phi, psi) => write!(f, "({} ∨ {})", phi, psi),
            StateFormula::And(phi, psi) => write!(f, "({} ∧ {})", phi, psi),
        }
    }
}
