//! Continuous-time Markov chains.
//!
//! A [`Ctmc`] is a state set `S` with a rate matrix `R` (the diagonal of `R`
//! is ignored). Derived artifacts, each computed on demand:
//!
//! 1. the generator `Q = R − diag(E)` and the exit rates `E`,
//! 2. the uniformization rate `λ = max(E)` and matrix `P_uniform = I + Q/λ`,
//! 3. the transient distribution at time `t`, by uniformization,
//! 4. the embedded DTMC `N(s, s') = R(s, s') / E(s)`,
//! 5. the steady-state distribution, solving `π·Q = 0`, `Σπ = 1`.

use log::{debug, info, warn};

use crate::config::AnalysisConfig;
use crate::dtmc::Dtmc;
use crate::error::{ensure_dimension, Error, Result};
use crate::incidence::IncidenceVector;
use crate::kripke::LabelingMatrix;
use crate::linalg;
use crate::matrix::SquareMatrix;
use crate::poisson;
use crate::set::FiniteOrderedSet;
use crate::stochastic::{check_distribution, derive_generator, exit_rate_vector, validate_rate, ValidationReport};

#[derive(Debug, Clone)]
pub struct Ctmc {
    states: FiniteOrderedSet,
    r: SquareMatrix<f64>,
    atoms: Option<FiniteOrderedSet>,
    labeling: Option<LabelingMatrix>,
}

impl Ctmc {
    /// Creates a chain over `states` with rate matrix `r`.
    pub fn new(states: FiniteOrderedSet, r: SquareMatrix<f64>) -> Result<Self> {
        ensure_dimension(states.len(), r.size())?;
        Ok(Self {
            states,
            r,
            atoms: None,
            labeling: None,
        })
    }

    /// Attaches atomic propositions and their labeling `|AP| × |S|`.
    pub fn with_labeling(mut self, atoms: FiniteOrderedSet, labeling: LabelingMatrix) -> Result<Self> {
        ensure_dimension(atoms.len(), labeling.num_atoms())?;
        ensure_dimension(self.states.len(), labeling.num_states())?;
        self.atoms = Some(atoms);
        self.labeling = Some(labeling);
        Ok(self)
    }

    pub fn states(&self) -> &FiniteOrderedSet {
        &self.states
    }

    pub fn rate_matrix(&self) -> &SquareMatrix<f64> {
        &self.r
    }

    pub fn atoms(&self) -> Option<&FiniteOrderedSet> {
        self.atoms.as_ref()
    }

    pub fn labeling(&self) -> Option<&LabelingMatrix> {
        self.labeling.as_ref()
    }

    /// States labeled with `atom`. Fails with [`Error::LabelNotFound`] if the
    /// chain has no labeling or `atom` is not one of its propositions.
    pub fn states_with_label(&self, atom: &str) -> Result<IncidenceVector> {
        match (&self.atoms, &self.labeling) {
            (Some(atoms), Some(labeling)) => Ok(labeling.row(atoms.index_of(atom)?)?.clone()),
            _ => Err(Error::LabelNotFound(atom.to_string())),
        }
    }

    pub fn validate(&self) -> ValidationReport {
        validate_rate(&self.r)
    }

    fn warn_if_invalid(&self) {
        let report = self.validate();
        if !report.is_valid() {
            warn!("CTMC rate matrix is invalid: {}", report);
        }
    }

    /// Infinitesimal generator `Q`.
    pub fn generator(&self) -> SquareMatrix<f64> {
        derive_generator(&self.r)
    }

    /// Exit rates `E(s) = Σ_{s'≠s} R(s, s')`.
    pub fn exit_rates(&self) -> Vec<f64> {
        exit_rate_vector(&self.r)
    }

    /// Uniformization rate `λ = max(E)`.
    ///
    /// Fails with [`Error::DegenerateChain`] if every exit rate is zero.
    pub fn uniformization_rate(&self) -> Result<f64> {
        let lambda = self.exit_rates().into_iter().fold(0.0, f64::max);
        if lambda > 0.0 {
            Ok(lambda)
        } else {
            Err(Error::DegenerateChain)
        }
    }

    /// One-step matrix of the uniformized chain, `I + Q/λ`.
    pub fn uniformized_matrix(&self) -> Result<SquareMatrix<f64>> {
        let lambda = self.uniformization_rate()?;
        let q = self.generator();
        Ok(SquareMatrix::from_fn(self.states.len(), |i, j| {
            let delta = if i == j { 1.0 } else { 0.0 };
            delta + q[(i, j)] / lambda
        }))
    }

    /// Transient distribution at time `t` from `initial`, truncated at
    /// precision `epsilon`.
    pub fn transient_distribution(&self, initial: &[f64], t: f64, epsilon: f64) -> Result<Vec<f64>> {
        self.transient_distribution_with_config(initial, t, epsilon, &AnalysisConfig::default())
    }

    /// `π(t) = Σ_{n=0}^{kε} ψ(λ, t, n)·π0·P_uniform^n`
    pub fn transient_distribution_with_config(
        &self,
        initial: &[f64],
        t: f64,
        epsilon: f64,
        config: &AnalysisConfig,
    ) -> Result<Vec<f64>> {
        check_distribution(initial, self.states.len(), config.tolerance)?;
        self.warn_if_invalid();
        let lambda = self.uniformization_rate()?;
        let k = poisson::truncation_point(lambda, t, epsilon, config.max_iterations)?;
        let weights = poisson::weights(lambda, t, k)?;
        debug!("uniformization: λ = {}, kε = {}", lambda, k);

        let p = self.uniformized_matrix()?;
        let mut term = initial.to_vec();
        let mut result: Vec<f64> = term.iter().map(|x| weights[0] * x).collect();
        for &w in &weights[1..] {
            term = p.vec_mul(&term)?;
            for (r, x) in result.iter_mut().zip(&term) {
                *r += w * x;
            }
        }
        Ok(result)
    }

    /// Embedded DTMC `N(s, s') = R(s, s') / E(s)` (zero diagonal), over the
    /// same states and propositions.
    ///
    /// Fails with [`Error::UndefinedEmbedding`] listing every state whose exit
    /// rate is zero.
    pub fn embedded_dtmc(&self) -> Result<Dtmc> {
        let exit_rates = self.exit_rates();
        let absorbing: Vec<String> = exit_rates
            .iter()
            .enumerate()
            .filter(|&(_, &e)| e == 0.0)
            .map(|(i, _)| self.states[i].to_string())
            .collect();
        if !absorbing.is_empty() {
            return Err(Error::UndefinedEmbedding { states: absorbing });
        }

        let n = SquareMatrix::from_fn(self.states.len(), |i, j| {
            if i == j {
                0.0
            } else {
                self.r[(i, j)] / exit_rates[i]
            }
        });
        let dtmc = Dtmc::new(self.states.clone(), n)?;
        Ok(match &self.atoms {
            Some(atoms) => dtmc.with_atoms(atoms.clone()),
            None => dtmc,
        })
    }

    /// Steady-state distribution `π` with `π·Q = 0` and `Σπ = 1`.
    pub fn steady_state(&self) -> Result<Vec<f64>> {
        self.steady_state_with_config(&AnalysisConfig::default())
    }

    pub fn steady_state_with_config(&self, config: &AnalysisConfig) -> Result<Vec<f64>> {
        self.warn_if_invalid();
        let pi = linalg::stationary_distribution(&self.generator(), config.pivot_tolerance)?;
        info!("CTMC steady state over {} states: {:?}", self.states.len(), pi);
        Ok(pi)
    }

    /// Probability of leaving each state within time `t`: `1 − e^{−E(s)·t}`.
    pub fn leave_probabilities(&self, t: f64) -> Result<Vec<f64>> {
        if !(t.is_finite() && t >= 0.0) {
            return Err(Error::InvalidArgument {
                name: "t",
                value: t,
                reason: "time must be finite and non-negative",
            });
        }
        Ok(self.exit_rates().iter().map(|e| 1.0 - (-e * t).exp()).collect())
    }
}
