//! Discrete-time Markov chains.
//!
//! A [`Dtmc`] is a state set `S` with a one-step probability matrix `P`,
//! optionally with a set of atomic propositions. Besides the steady-state and
//! step distributions, it answers the probabilistic until operators of PCTL:
//!
//! - bounded until `P⋈p(Φ U≤k Ψ)` by exponentiating a modified matrix,
//! - unbounded until `P⋈p(Φ U Ψ)` by graph-based precomputation of the
//!   probability-0 and probability-1 states followed by a linear solve.
//!
//! `Φ` and `Ψ` are given as incidence vectors over `S` (e.g. computed by a
//! [`KripkeStructure`][crate::kripke::KripkeStructure]).

use log::{debug, info, warn};

use crate::bound::ProbabilityBound;
use crate::config::AnalysisConfig;
use crate::error::{ensure_dimension, Error, Result};
use crate::graph::TransitionGraph;
use crate::incidence::IncidenceVector;
use crate::linalg;
use crate::matrix::SquareMatrix;
use crate::set::FiniteOrderedSet;
use crate::stochastic::{check_distribution, validate_stochastic, ValidationReport};

#[derive(Debug, Clone)]
pub struct Dtmc {
    states: FiniteOrderedSet,
    p: SquareMatrix<f64>,
    atoms: Option<FiniteOrderedSet>,
}

impl Dtmc {
    /// Creates a chain over `states` with transition matrix `p`.
    ///
    /// Fails if the matrix size differs from the number of states. Numeric
    /// validity of `p` is not checked here, see [`Dtmc::validate`].
    pub fn new(states: FiniteOrderedSet, p: SquareMatrix<f64>) -> Result<Self> {
        ensure_dimension(states.len(), p.size())?;
        Ok(Self { states, p, atoms: None })
    }

    pub fn with_atoms(mut self, atoms: FiniteOrderedSet) -> Self {
        self.atoms = Some(atoms);
        self
    }

    pub fn states(&self) -> &FiniteOrderedSet {
        &self.states
    }

    pub fn transition_matrix(&self) -> &SquareMatrix<f64> {
        &self.p
    }

    pub fn atoms(&self) -> Option<&FiniteOrderedSet> {
        self.atoms.as_ref()
    }

    pub fn validate(&self) -> ValidationReport {
        self.validate_with_config(&AnalysisConfig::default())
    }

    pub fn validate_with_config(&self, config: &AnalysisConfig) -> ValidationReport {
        validate_stochastic(&self.p, config.tolerance)
    }

    fn warn_if_invalid(&self, config: &AnalysisConfig) {
        let report = self.validate_with_config(config);
        if !report.is_valid() {
            warn!("DTMC transition matrix is not stochastic: {}", report);
        }
    }

    fn check_indicator(&self, v: &IncidenceVector) -> Result<()> {
        ensure_dimension(self.states.len(), v.len())
    }

    /// Steady-state distribution `π` with `π·P = π` and `Σπ = 1`.
    pub fn steady_state(&self) -> Result<Vec<f64>> {
        self.steady_state_with_config(&AnalysisConfig::default())
    }

    pub fn steady_state_with_config(&self, config: &AnalysisConfig) -> Result<Vec<f64>> {
        self.warn_if_invalid(config);
        let n = self.states.len();
        let m = SquareMatrix::from_fn(n, |i, j| self.p[(i, j)] - if i == j { 1.0 } else { 0.0 });
        let pi = linalg::stationary_distribution(&m, config.pivot_tolerance)?;
        info!("DTMC steady state over {} states: {:?}", n, pi);
        Ok(pi)
    }

    /// Distribution after `steps` steps from `initial`: `π0·P^steps`.
    pub fn step_distribution(&self, initial: &[f64], steps: usize) -> Result<Vec<f64>> {
        self.step_distribution_with_config(initial, steps, &AnalysisConfig::default())
    }

    pub fn step_distribution_with_config(
        &self,
        initial: &[f64],
        steps: usize,
        config: &AnalysisConfig,
    ) -> Result<Vec<f64>> {
        check_distribution(initial, self.states.len(), config.tolerance)?;
        if steps > config.max_iterations {
            return Err(Error::IterationLimitExceeded {
                limit: config.max_iterations,
            });
        }
        let mut pi = initial.to_vec();
        for _ in 0..steps {
            pi = self.p.vec_mul(&pi)?;
        }
        Ok(pi)
    }

    /// Probability of `Φ U≤k Ψ` from every state.
    pub fn bounded_until_probabilities(
        &self,
        phi: &IncidenceVector,
        psi: &IncidenceVector,
        k: usize,
    ) -> Result<Vec<f64>> {
        self.bounded_until_probabilities_with_config(phi, psi, k, &AnalysisConfig::default())
    }

    pub fn bounded_until_probabilities_with_config(
        &self,
        phi: &IncidenceVector,
        psi: &IncidenceVector,
        k: usize,
        config: &AnalysisConfig,
    ) -> Result<Vec<f64>> {
        self.check_indicator(phi)?;
        self.check_indicator(psi)?;
        if k > config.max_iterations {
            return Err(Error::IterationLimitExceeded {
                limit: config.max_iterations,
            });
        }
        self.warn_if_invalid(config);

        // Ψ-states and ¬(Φ ∨ Ψ)-states become absorbing.
        let n = self.states.len();
        let p_absorbing = SquareMatrix::from_fn(n, |i, j| {
            if psi.get(i) || !phi.get(i) {
                if i == j {
                    1.0
                } else {
                    0.0
                }
            } else {
                self.p[(i, j)]
            }
        });
        let p_k = p_absorbing.pow(k as u64);

        let probabilities: Vec<f64> = (0..n).map(|i| psi.iter_ones().map(|j| p_k[(i, j)]).sum()).collect();
        debug!("bounded until (k = {}): {:?}", k, probabilities);
        Ok(probabilities)
    }

    /// `Sat(P⋈p(Φ U≤k Ψ))`.
    pub fn bounded_until(
        &self,
        phi: &IncidenceVector,
        psi: &IncidenceVector,
        k: usize,
        bound: ProbabilityBound,
    ) -> Result<IncidenceVector> {
        self.bounded_until_with_config(phi, psi, k, bound, &AnalysisConfig::default())
    }

    pub fn bounded_until_with_config(
        &self,
        phi: &IncidenceVector,
        psi: &IncidenceVector,
        k: usize,
        bound: ProbabilityBound,
        config: &AnalysisConfig,
    ) -> Result<IncidenceVector> {
        let probabilities = self.bounded_until_probabilities_with_config(phi, psi, k, config)?;
        Ok(bound.filter(&probabilities))
    }

    /// Probability-0 and probability-1 states of `Φ U Ψ`.
    ///
    /// - `S^no = S ∖ Pre*_Φ(Ψ)`
    /// - `S^yes = S ∖ Pre*_{Φ∖Ψ}(S^no)`
    ///
    /// Both closures are taken over the support graph of `P`.
    pub fn until_precomputation(
        &self,
        phi: &IncidenceVector,
        psi: &IncidenceVector,
    ) -> Result<(IncidenceVector, IncidenceVector)> {
        self.check_indicator(phi)?;
        self.check_indicator(psi)?;
        let graph = TransitionGraph::from_support(&self.p);
        let s_no = graph.backward_closure(psi, phi)?.not();
        let s_yes = graph.backward_closure(&s_no, &phi.difference(psi)?)?.not();
        Ok((s_no, s_yes))
    }

    /// Probability of `Φ U Ψ` from every state.
    pub fn unbounded_until_probabilities(&self, phi: &IncidenceVector, psi: &IncidenceVector) -> Result<Vec<f64>> {
        self.unbounded_until_probabilities_with_config(phi, psi, &AnalysisConfig::default())
    }

    pub fn unbounded_until_probabilities_with_config(
        &self,
        phi: &IncidenceVector,
        psi: &IncidenceVector,
        config: &AnalysisConfig,
    ) -> Result<Vec<f64>> {
        self.warn_if_invalid(config);
        let (s_no, s_yes) = self.until_precomputation(phi, psi)?;
        let maybe: Vec<usize> = s_no.or(&s_yes)?.not().iter_ones().collect();
        debug!(
            "unbounded until: |S^no| = {}, |S^yes| = {}, |S^?| = {}",
            s_no.count_ones(),
            s_yes.count_ones(),
            maybe.len()
        );

        let mut probabilities: Vec<f64> = (0..self.states.len())
            .map(|i| if s_yes.get(i) { 1.0 } else { 0.0 })
            .collect();
        if maybe.is_empty() {
            return Ok(probabilities);
        }

        // x_s − Σ_{s' ∈ S^?} P(s, s')·x_s' = Σ_{s' ∈ S^yes} P(s, s')
        let a = SquareMatrix::from_fn(maybe.len(), |i, j| {
            let delta = if i == j { 1.0 } else { 0.0 };
            delta - self.p[(maybe[i], maybe[j])]
        });
        let b: Vec<f64> = maybe
            .iter()
            .map(|&s| s_yes.iter_ones().map(|t| self.p[(s, t)]).sum())
            .collect();
        let x = linalg::solve(&a, &b, config.pivot_tolerance)?;
        for (&s, value) in maybe.iter().zip(x) {
            probabilities[s] = value;
        }
        debug!("unbounded until: {:?}", probabilities);
        Ok(probabilities)
    }

    /// `Sat(P⋈p(Φ U Ψ))`.
    pub fn unbounded_until(
        &self,
        phi: &IncidenceVector,
        psi: &IncidenceVector,
        bound: ProbabilityBound,
    ) -> Result<IncidenceVector> {
        self.unbounded_until_with_config(phi, psi, bound, &AnalysisConfig::default())
    }

    pub fn unbounded_until_with_config(
        &self,
        phi: &IncidenceVector,
        psi: &IncidenceVector,
        bound: ProbabilityBound,
        config: &AnalysisConfig,
    ) -> Result<IncidenceVector> {
        let probabilities = self.unbounded_until_probabilities_with_config(phi, psi, config)?;
        Ok(bound.filter(&probabilities))
    }
}
