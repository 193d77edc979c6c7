// ─────────────────────────────────────────────────────────────────────
// Phase Drift Explorer — Observer
// ─────────────────────────────────────────────────────────────────────
//! Scalar boundary deformation δ(state, t).
//!
//!   strength = rms(memory)
//!   δ        = −strength · f(t) · tanh(x)
//!
//! Callers build the observer vector by duplicating one scalar strength
//! across D components, so the RMS recovers that scalar. `tanh` keeps δ
//! bounded by the strength for any identity.

use serde::{Deserialize, Serialize};

use drift_types::{DriftConfig, DriftError, DriftResult, Signal, SymbolicState};

/// Trait for observers that perturb the identity force component.
pub trait BoundaryObserver: Send + Sync {
    fn boundary_deformation(&self, state: &SymbolicState, t: f64) -> DriftResult<f64>;

    /// Memory dimension this observer was built for, if it has one.
    fn dimension(&self) -> Option<usize> {
        None
    }
}

/// Observer with a time signal and an influence vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observer {
    identity_function: Signal,
    memory: Vec<f64>,
}

impl Observer {
    pub fn new(identity_function: Signal, memory: Vec<f64>) -> Self {
        Self {
            identity_function,
            memory,
        }
    }

    /// Observer whose influence vector is `strength` in each of `dimension` components.
    pub fn with_strength(identity_function: Signal, strength: f64, dimension: usize) -> Self {
        Self::new(identity_function, vec![strength; dimension])
    }

    pub fn from_config(config: &DriftConfig) -> Self {
        Self::new(config.observer_signal, config.observer_vector())
    }

    pub fn identity_function(&self) -> Signal {
        self.identity_function
    }

    pub fn memory(&self) -> &[f64] {
        &self.memory
    }

    /// RMS of the influence vector; 0 when it is empty.
    pub fn strength(&self) -> f64 {
        if self.memory.is_empty() {
            return 0.0;
        }
        let sum_sq: f64 = self.memory.iter().map(|v| v * v).sum();
        (sum_sq / self.memory.len() as f64).sqrt()
    }
}

impl BoundaryObserver for Observer {
    fn boundary_deformation(&self, state: &SymbolicState, t: f64) -> DriftResult<f64> {
        let delta = -self.strength() * self.identity_function.sample(t) * state.identity().tanh();
        if !delta.is_finite() {
            return Err(DriftError::NonFiniteResult(format!(
                "deformation (t = {t}, identity = {})",
                state.identity()
            )));
        }
        Ok(delta)
    }

    fn dimension(&self) -> Option<usize> {
        Some(self.memory.len())
    }
}
