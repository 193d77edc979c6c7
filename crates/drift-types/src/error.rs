// ─────────────────────────────────────────────────────────────────────
// Phase Drift Explorer — Error Hierarchy
// ─────────────────────────────────────────────────────────────────────

use thiserror::Error;

/// Root error type for all engine failures.
///
/// Every failure is raised where it is detected and propagated to the
/// run driver unchanged. Nothing is retried.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DriftError {
    /// A memory vector disagrees with the run's fixed dimension.
    #[error("dimension mismatch: expected memory of length {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// A force or gradient vector has the wrong length (must be 1 + D).
    #[error("force shape error: expected length {expected}, got {actual}")]
    ForceShape { expected: usize, actual: usize },

    /// Collapse threshold must be strictly positive.
    #[error("invalid threshold: theta must be > 0, got {0}")]
    InvalidThreshold(f64),

    /// NaN/Inf produced by stabilisation, gradient, or deformation.
    #[error("non-finite result in {0}")]
    NonFiniteResult(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// A previous step failed; the run no longer advances.
    #[error("run halted after failure at step {step}")]
    Halted { step: usize },
}

pub type DriftResult<T> = Result<T, DriftError>;

/// Fail with `NonFiniteResult` unless every value is finite.
pub fn ensure_finite(values: &[f64], stage: &str) -> DriftResult<()> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(i) => Err(DriftError::NonFiniteResult(format!(
            "{stage} (component {i} = {})",
            values[i]
        ))),
        None => Ok(()),
    }
}
