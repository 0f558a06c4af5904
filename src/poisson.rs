//! Poisson probabilities for uniformization.
//!
//! `ψ(λ, t, n) = e^{−λt}·(λt)^n / n!` is the probability of exactly `n` jumps
//! of a Poisson process of rate `λ` within time `t`. Weights are computed in
//! log-space with `ln ψ(n) = ln ψ(n−1) + ln(λt) − ln n`, so neither `(λt)^n`
//! nor `n!` is ever formed.

use crate::error::{Error, Result};

fn check_rate(lambda: f64) -> Result<()> {
    if lambda.is_finite() && lambda >= 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidArgument {
            name: "lambda",
            value: lambda,
            reason: "rate must be finite and non-negative",
        })
    }
}

fn check_time(t: f64) -> Result<()> {
    if t.is_finite() && t >= 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidArgument {
            name: "t",
            value: t,
            reason: "time must be finite and non-negative",
        })
    }
}

fn check_epsilon(epsilon: f64) -> Result<()> {
    if epsilon > 0.0 && epsilon < 1.0 {
        Ok(())
    } else {
        Err(Error::InvalidArgument {
            name: "epsilon",
            value: epsilon,
            reason: "precision must lie in (0, 1)",
        })
    }
}

/// Iterator over `ψ(λ, t, 0), ψ(λ, t, 1), ...`.
struct Weights {
    ln_rate: f64,
    ln_weight: f64,
    n: usize,
}

impl Weights {
    fn new(lambda: f64, t: f64) -> Self {
        let rate = lambda * t;
        Self {
            ln_rate: rate.ln(),
            ln_weight: -rate,
            n: 0,
        }
    }
}

impl Iterator for Weights {
    type Item = f64;

    fn next(&mut self) -> Option<Self::Item> {
        if self.n > 0 {
            // With λt = 0 the log-rate is −∞ and every weight past n = 0 is 0.
            self.ln_weight += self.ln_rate - (self.n as f64).ln();
        }
        self.n += 1;
        Some(self.ln_weight.exp())
    }
}

/// Poisson weight `ψ(λ, t, n)`.
pub fn weight(lambda: f64, t: f64, n: usize) -> Result<f64> {
    check_rate(lambda)?;
    check_time(t)?;
    Ok(Weights::new(lambda, t).nth(n).unwrap_or(0.0))
}

/// Weights `ψ(λ, t, 0..=count)`.
pub fn weights(lambda: f64, t: f64, count: usize) -> Result<Vec<f64>> {
    check_rate(lambda)?;
    check_time(t)?;
    Ok(Weights::new(lambda, t).take(count + 1).collect())
}

/// Truncation point `kε`: the smallest `n` with `1 − Σ_{i≤n} ψ(λ, t, i) ≤ ε`.
///
/// Fails with [`Error::PrecisionUnattainable`] if no such `n` is found within
/// `max_iterations` terms, which happens when `ε` is below what the floating
/// point sum can resolve.
///
/// ```
/// use markov_rs::poisson::truncation_point;
///
/// assert_eq!(truncation_point(3.0, 1.0, 1e-4, 1000).unwrap(), 11);
/// assert_eq!(truncation_point(3.0, 0.0, 1e-4, 1000).unwrap(), 0);
/// ```
pub fn truncation_point(lambda: f64, t: f64, epsilon: f64, max_iterations: usize) -> Result<usize> {
    check_rate(lambda)?;
    check_time(t)?;
    check_epsilon(epsilon)?;

    let mut sum = 0.0;
    for (n, w) in Weights::new(lambda, t).enumerate().take(max_iterations + 1) {
        sum += w;
        if 1.0 - sum <= epsilon {
            return Ok(n);
        }
    }
    Err(Error::PrecisionUnattainable {
        epsilon,
        iterations: max_iterations,
    })
}
