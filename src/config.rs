//! Analysis configuration.

/// Numeric settings shared by all engines.
///
/// Use `AnalysisConfig::default()` for standard settings, and the `with_*`
/// methods to adjust a single field.
///
/// # Examples
///
/// ```
/// use markov_rs::config::AnalysisConfig;
///
/// let config = AnalysisConfig::default().with_max_iterations(500);
/// assert_eq!(config.max_iterations, 500);
/// assert_eq!(config.tolerance, 1e-9);
/// ```
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AnalysisConfig {
    /// Tolerance for row sums and distribution sums (default: 1e-9)
    pub tolerance: f64,
    /// Smallest admissible pivot magnitude in linear solves, relative to the
    /// largest matrix entry (default: 1e-12)
    pub pivot_tolerance: f64,
    /// Upper bound on iterative algorithms: matrix-power exponent and
    /// Poisson truncation search (default: 100 000)
    pub max_iterations: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-9,
            pivot_tolerance: 1e-12,
            max_iterations: 100_000,
        }
    }
}

impl AnalysisConfig {
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_pivot_tolerance(mut self, pivot_tolerance: f64) -> Self {
        self.pivot_tolerance = pivot_tolerance;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}
