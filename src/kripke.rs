//! Kripke structures and satisfaction sets of state formulas.
//!
//! A [`KripkeStructure`] `M = (S, I, T, AP, L)` has a state set `S`, initial
//! states `I ⊆ S`, a boolean transition matrix `T` and a [`LabelingMatrix`]
//! `L` of shape `|AP| × |S|`.
//!
//! Satisfaction sets are incidence vectors over the *full* state set `S`.
//! Every primitive takes an optional scope `S' ⊆ S` and intersects its result
//! with it; `None` means all of `S`, not the empty set.
//!
//! ```
//! use markov_rs::formula::StateFormula;
//! use markov_rs::incidence::IncidenceVector;
//! use markov_rs::kripke::{KripkeStructure, LabelingMatrix};
//! use markov_rs::matrix::SquareMatrix;
//! use markov_rs::set::FiniteOrderedSet;
//!
//! let states = FiniteOrderedSet::new(["s0", "s1"]);
//! let atoms = FiniteOrderedSet::new(["p"]);
//! let t = SquareMatrix::from_rows(vec![vec![false, true], vec![true, false]]).unwrap();
//! let l = LabelingMatrix::from_bits(2, [[1, 0]]).unwrap();
//! let m = KripkeStructure::new(states, IncidenceVector::from_bits([1, 0]), t, atoms, l).unwrap();
//!
//! let sat = m.sat(&StateFormula::atom("p").not(), None).unwrap();
//! assert_eq!(sat, IncidenceVector::from_bits([0, 1]));
//! ```

use log::debug;

use crate::error::{ensure_dimension, Error, Result};
use crate::formula::StateFormula;
use crate::graph::TransitionGraph;
use crate::incidence::IncidenceVector;
use crate::matrix::SquareMatrix;
use crate::set::{FiniteOrderedSet, StateRef};

/// Labeling function `L: S → 2^AP`, stored as one incidence vector over `S`
/// per atomic proposition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelingMatrix {
    rows: Vec<IncidenceVector>,
    num_states: usize,
}

impl LabelingMatrix {
    /// Creates a labeling from its rows, one per atomic proposition.
    pub fn new(num_states: usize, rows: Vec<IncidenceVector>) -> Result<Self> {
        for row in &rows {
            ensure_dimension(num_states, row.len())?;
        }
        Ok(Self { rows, num_states })
    }

    /// Creates a labeling from rows of 0/1 entries.
    pub fn from_bits<R>(num_states: usize, rows: impl IntoIterator<Item = R>) -> Result<Self>
    where
        R: IntoIterator<Item = u8>,
    {
        Self::new(num_states, rows.into_iter().map(IncidenceVector::from_bits).collect())
    }

    pub fn num_atoms(&self) -> usize {
        self.rows.len()
    }

    pub fn num_states(&self) -> usize {
        self.num_states
    }

    /// States labeled with the `atom`-th proposition.
    pub fn row(&self, atom: usize) -> Result<&IncidenceVector> {
        self.rows.get(atom).ok_or(Error::IndexOutOfRange {
            index: atom,
            len: self.rows.len(),
        })
    }

    /// Propositions labeling the `state`-th state.
    pub fn column(&self, state: usize) -> Result<IncidenceVector> {
        if state >= self.num_states {
            return Err(Error::IndexOutOfRange {
                index: state,
                len: self.num_states,
            });
        }
        Ok(IncidenceVector::from_bools(self.rows.iter().map(|row| row.get(state))))
    }
}

#[derive(Debug, Clone)]
pub struct KripkeStructure {
    states: FiniteOrderedSet,
    initial: IncidenceVector,
    transitions: SquareMatrix<bool>,
    graph: TransitionGraph,
    atoms: FiniteOrderedSet,
    labeling: LabelingMatrix,
}

impl KripkeStructure {
    pub fn new(
        states: FiniteOrderedSet,
        initial: IncidenceVector,
        transitions: SquareMatrix<bool>,
        atoms: FiniteOrderedSet,
        labeling: LabelingMatrix,
    ) -> Result<Self> {
        let n = states.len();
        ensure_dimension(n, initial.len())?;
        ensure_dimension(n, transitions.size())?;
        ensure_dimension(atoms.len(), labeling.num_atoms())?;
        ensure_dimension(n, labeling.num_states())?;
        let graph = TransitionGraph::from_adjacency(&transitions);
        Ok(Self {
            states,
            initial,
            transitions,
            graph,
            atoms,
            labeling,
        })
    }

    pub fn states(&self) -> &FiniteOrderedSet {
        &self.states
    }

    pub fn initial(&self) -> &IncidenceVector {
        &self.initial
    }

    pub fn transitions(&self) -> &SquareMatrix<bool> {
        &self.transitions
    }

    pub fn atoms(&self) -> &FiniteOrderedSet {
        &self.atoms
    }

    pub fn labeling(&self) -> &LabelingMatrix {
        &self.labeling
    }

    fn scope(&self, scope: Option<&StateRef>) -> Result<IncidenceVector> {
        match scope {
            None => Ok(IncidenceVector::ones(self.states.len())),
            Some(s) => self.states.resolve(s),
        }
    }

    /// `Sat(tt) = S'`
    pub fn sat_tt(&self, scope: Option<&StateRef>) -> Result<IncidenceVector> {
        self.scope(scope)
    }

    /// `Sat(a) = {s ∈ S' | a ∈ L(s)}`
    pub fn sat_atom(&self, atom: &str, scope: Option<&StateRef>) -> Result<IncidenceVector> {
        let labeled = self.states_with_label(atom)?;
        labeled.and(&self.scope(scope)?)
    }

    /// `Sat(¬Φ) = S' ∖ Sat(Φ)`
    pub fn sat_not(&self, sat_phi: &IncidenceVector, scope: Option<&StateRef>) -> Result<IncidenceVector> {
        self.scope(scope)?.difference(sat_phi)
    }

    /// `Sat(Φ ∨ Ψ) = S' ∩ (Sat(Φ) ∪ Sat(Ψ))`
    pub fn sat_or(
        &self,
        sat_phi: &IncidenceVector,
        sat_psi: &IncidenceVector,
        scope: Option<&StateRef>,
    ) -> Result<IncidenceVector> {
        sat_phi.or(sat_psi)?.and(&self.scope(scope)?)
    }

    /// `Sat(Φ ∧ Ψ) = S' ∩ Sat(Φ) ∩ Sat(Ψ)`
    pub fn sat_and(
        &self,
        sat_phi: &IncidenceVector,
        sat_psi: &IncidenceVector,
        scope: Option<&StateRef>,
    ) -> Result<IncidenceVector> {
        sat_phi.and(sat_psi)?.and(&self.scope(scope)?)
    }

    /// Satisfaction set of an arbitrary state formula, evaluated bottom-up.
    pub fn sat(&self, formula: &StateFormula, scope: Option<&StateRef>) -> Result<IncidenceVector> {
        let result = match formula {
            StateFormula::True => self.sat_tt(scope)?,
            StateFormula::Atom(a) => self.sat_atom(a, scope)?,
            StateFormula::Not(phi) => {
                let sat_phi = self.sat(phi, scope)?;
                self.sat_not(&sat_phi, scope)?
            }
            StateFormula::Or(phi, psi) => {
                let sat_phi = self.sat(phi, scope)?;
                let sat_psi = self.sat(psi, scope)?;
                self.sat_or(&sat_phi, &sat_psi, scope)?
            }
            StateFormula::And(phi, psi) => {
                let sat_phi = self.sat(phi, scope)?;
                let sat_psi = self.sat(psi, scope)?;
                self.sat_and(&sat_phi, &sat_psi, scope)?
            }
        };
        debug!("Sat({}) = {}", formula, result);
        Ok(result)
    }

    /// Labels `L(s)` of a single state, as an incidence vector over `AP`.
    pub fn labels_of(&self, state: &StateRef) -> Result<IncidenceVector> {
        let index = self.states.resolve_single(state)?;
        self.labeling.column(index)
    }

    /// States labeled with `atom`.
    pub fn states_with_label(&self, atom: &str) -> Result<IncidenceVector> {
        let index = self.atoms.index_of(atom)?;
        Ok(self.labeling.row(index)?.clone())
    }

    /// Immediate successors of a single state.
    pub fn successors(&self, state: &StateRef) -> Result<IncidenceVector> {
        let index = self.states.resolve_single(state)?;
        IncidenceVector::from_indices(self.states.len(), self.graph.successors(index)?.iter().copied())
    }

    /// `Path(s)`: the state itself and every state reachable from it.
    pub fn path_set(&self, state: &StateRef) -> Result<IncidenceVector> {
        let index = self.states.resolve_single(state)?;
        self.graph.path_set(index)
    }

    /// True iff every given state satisfies `formula`.
    pub fn holds(&self, formula: &StateFormula, states: &StateRef) -> Result<bool> {
        let states = self.states.resolve(states)?;
        self.sat(formula, None)?.masks(&states)
    }

    /// True iff every initial state satisfies `formula`.
    pub fn holds_initially(&self, formula: &StateFormula) -> Result<bool> {
        self.sat(formula, None)?.masks(&self.initial)
    }
}
