// ─────────────────────────────────────────────────────────────────────
// Phase Drift Explorer — Collapse Detection
// ─────────────────────────────────────────────────────────────────────
//! A particle collapses when the Euclidean norm of its full force
//! vector strictly exceeds θ. A step collapses when any particle does.

use serde::{Deserialize, Serialize};

use drift_types::{euclidean_norm, DriftError, DriftResult};

use crate::phase_space::PhaseSpace;

/// ||f||₂ over all 1 + D components.
#[inline]
pub fn force_norm(force: &[f64]) -> f64 {
    euclidean_norm(force)
}

/// Per-step collapse outcome.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollapseReport {
    /// Force norm of each particle, in particle order.
    pub norms: Vec<f64>,
    /// Collapse flag of each particle.
    pub per_state: Vec<bool>,
    /// OR over `per_state`; false when there are no particles.
    pub collapsed: bool,
}

impl CollapseReport {
    /// Largest force norm, 0 for an empty step.
    pub fn max_norm(&self) -> f64 {
        self.norms.iter().copied().fold(0.0, f64::max)
    }

    pub fn collapsed_count(&self) -> usize {
        self.per_state.iter().filter(|&&c| c).count()
    }
}

/// Stateless threshold test over force vectors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollapseDetector {
    theta: f64,
}

impl CollapseDetector {
    pub fn new(theta: f64) -> DriftResult<Self> {
        if !theta.is_finite() || theta <= 0.0 {
            return Err(DriftError::InvalidThreshold(theta));
        }
        Ok(Self { theta })
    }

    /// Detector sharing the phase space's threshold.
    pub fn for_phase_space(space: &PhaseSpace) -> Self {
        Self {
            theta: space.theta(),
        }
    }

    pub fn theta(&self) -> f64 {
        self.theta
    }

    /// Strict comparison: a norm equal to θ does not collapse.
    #[inline]
    pub fn is_collapsed(&self, force: &[f64]) -> bool {
        force_norm(force) > self.theta
    }

    pub fn detect(&self, forces: &[Vec<f64>]) -> CollapseReport {
        let norms: Vec<f64> = forces.iter().map(|f| force_norm(f)).collect();
        let per_state: Vec<bool> = norms.iter().map(|&n| n > self.theta).collect();
        let collapsed = per_state.iter().any(|&c| c);
        CollapseReport {
            norms,
            per_state,
            collapsed,
        }
    }
}
