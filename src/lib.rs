//! # markov-rs: Probabilistic Model Checking in Rust
//!
//! **`markov-rs`** is a small, dependency-light library for analysing **finite Markov chains** and **Kripke structures**.
//! It computes steady-state and transient distributions, derives embedded chains, and answers the
//! probabilistic *until* operators of PCTL on explicit (dense) models.
//!
//! ## What is in the box?
//!
//! - **Discrete-time Markov chains** ([`Dtmc`][crate::dtmc::Dtmc]): steady state, `n`-step distributions,
//!   bounded until `P⋈p(Φ U≤k Ψ)` and unbounded until `P⋈p(Φ U Ψ)`.
//! - **Continuous-time Markov chains** ([`Ctmc`][crate::ctmc::Ctmc]): generator and exit rates,
//!   uniformization, transient distribution, embedded DTMC, steady state.
//! - **Kripke structures** ([`KripkeStructure`][crate::kripke::KripkeStructure]): satisfaction sets of
//!   boolean state formulas, label queries, reachable path sets.
//!
//! ## Key Ideas
//!
//! - **Sets are incidence vectors**: every subset of states (or atomic propositions) is an
//!   [`IncidenceVector`][crate::incidence::IncidenceVector] relative to a canonical, sorted
//!   [`FiniteOrderedSet`][crate::set::FiniteOrderedSet]. Set algebra is word-parallel bit algebra.
//! - **Shape is checked, numbers are reported**: constructors fail fast on size mismatches, while numeric
//!   problems inside a matrix (a row not summing to 1, a negative rate) are collected in a
//!   [`ValidationReport`][crate::stochastic::ValidationReport].
//! - **Every loop is bounded**: matrix powers, reachability closures and the Poisson truncation search all
//!   have a checked iteration cap (see [`AnalysisConfig`][crate::config::AnalysisConfig]), so an
//!   unattainable precision is an error, never a hang.
//!
//! ## Basic Usage
//!
//! ```rust
//! use markov_rs::bound::{Comparison, ProbabilityBound};
//! use markov_rs::dtmc::Dtmc;
//! use markov_rs::incidence::IncidenceVector;
//! use markov_rs::matrix::SquareMatrix;
//! use markov_rs::set::FiniteOrderedSet;
//!
//! // 1. Build the chain
//! let states = FiniteOrderedSet::new(["s1", "s2", "s3", "s4"]);
//! let p = SquareMatrix::from_rows(vec![
//!     vec![0.0, 2.0 / 3.0, 1.0 / 3.0, 0.0],
//!     vec![0.5, 0.0, 0.25, 0.25],
//!     vec![0.0, 0.0, 1.0, 0.0],
//!     vec![0.0, 0.0, 0.0, 1.0],
//! ])?;
//! let dtmc = Dtmc::new(states, p)?;
//! assert!(dtmc.validate().is_valid());
//!
//! // 2. Satisfaction sets of Φ and Ψ
//! let phi = IncidenceVector::from_bits([1, 1, 0, 0]);
//! let psi = IncidenceVector::from_bits([0, 0, 1, 1]);
//!
//! // 3. Sat(P≥0.8(Φ U≤3 Ψ))
//! let bound = ProbabilityBound::new(Comparison::GreaterOrEqual, 0.8)?;
//! let sat = dtmc.bounded_until(&phi, &psi, 3, bound)?;
//! assert_eq!(sat, IncidenceVector::from_bits([0, 1, 1, 1]));
//! # Ok::<(), markov_rs::error::Error>(())
//! ```
//!
//! ## Core Components
//!
//! - **[`dtmc`]**, **[`ctmc`]**, **[`kripke`]**: the analysis engines.
//! - **[`incidence`]**, **[`set`]**, **[`matrix`]**: the data model.
//! - **[`stochastic`]**, **[`linalg`]**, **[`graph`]**, **[`poisson`]**: numeric and graph building blocks.
//! - **[`error`]**, **[`config`]**: error taxonomy and analysis settings.
//!
//! The library logs through the [`log`](https://docs.rs/log) facade and never installs a logger itself.

pub mod bound;
pub mod config;
pub mod ctmc;
pub mod dtmc;
pub mod error;
pub mod formula;
pub mod graph;
pub mod incidence;
pub mod kripke;
pub mod linalg;
pub mod matrix;
pub mod poisson;
pub mod set;
pub mod stochastic;
