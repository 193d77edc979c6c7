// ─────────────────────────────────────────────────────────────────────
// Phase Drift Explorer — Constraint Field
// ─────────────────────────────────────────────────────────────────────
//! Coupling force on a particle from its relationship to the others.
//!
//! `KarmicField` is the default law. For state (x, m) at time t with
//! neighbours N:
//!
//!   g[0]   = -λ x   + γ r(t) + κ · mean_{j∈N} (x_j − x)
//!   g[1+i] = -λ m_i          + κ · mean_{j∈N} (m_{j,i} − m_i)
//!
//! An entry of N equal to the state adds zero coupling. The run driver
//! passes the states as they stood before stabilisation, so a
//! particle's own earlier position does pull on it. With no neighbours
//! only the self-term (decay + resonance) remains.

use serde::{Deserialize, Serialize};

use drift_types::error::ensure_finite;
use drift_types::{DriftConfig, DriftError, DriftResult, SymbolicState};

/// Trait for coupling laws.
///
/// Implementations must be deterministic, continuous in the state, and
/// must not depend on anything but their arguments and fixed
/// hyperparameters.
pub trait ConstraintField: Send + Sync {
    /// Force vector of length 1 + D on `state` at time `t`.
    fn gradient(
        &self,
        state: &SymbolicState,
        t: f64,
        neighbor_states: &[SymbolicState],
    ) -> DriftResult<Vec<f64>>;
}

/// Mean-field spring coupling with self-decay and resonance drive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KarmicField {
    /// κ: pull toward the neighbour mean.
    pub coupling: f64,
    /// λ: linear decay toward the origin.
    pub self_decay: f64,
    /// γ: weight of the state's resonance signal on identity.
    pub resonance_gain: f64,
}

impl Default for KarmicField {
    fn default() -> Self {
        Self::default_params()
    }
}

impl KarmicField {
    pub fn new(coupling: f64, self_decay: f64, resonance_gain: f64) -> Self {
        Self {
            coupling,
            self_decay,
            resonance_gain,
        }
    }

    /// Default: κ = 0.5, λ = 0.05, γ = 0.1.
    pub fn default_params() -> Self {
        Self::new(0.5, 0.05, 0.1)
    }

    pub fn from_config(config: &DriftConfig) -> Self {
        Self::new(config.coupling, config.self_decay, config.resonance_gain)
    }

    /// The pure self-term, without neighbour coupling.
    pub fn self_term(&self, state: &SymbolicState, t: f64) -> Vec<f64> {
        let mut g = Vec::with_capacity(1 + state.dimension());
        g.push(-self.self_decay * state.identity() + self.resonance_gain * state.resonance_at(t));
        g.extend(state.memory().iter().map(|m| -self.self_decay * m));
        g
    }
}

impl ConstraintField for KarmicField {
    fn gradient(
        &self,
        state: &SymbolicState,
        t: f64,
        neighbor_states: &[SymbolicState],
    ) -> DriftResult<Vec<f64>> {
        let d = state.dimension();
        let mut g = self.self_term(state, t);

        if !neighbor_states.is_empty() {
            let mut pull = vec![0.0; 1 + d];
            for other in neighbor_states {
                if other.dimension() != d {
                    return Err(DriftError::DimensionMismatch {
                        expected: d,
                        actual: other.dimension(),
                    });
                }
                pull[0] += other.identity() - state.identity();
                for (p, (mj, mi)) in pull[1..]
                    .iter_mut()
                    .zip(other.memory().iter().zip(state.memory()))
                {
                    *p += mj - mi;
                }
            }
            let scale = self.coupling / neighbor_states.len() as f64;
            for (gi, pi) in g.iter_mut().zip(&pull) {
                *gi += scale * pi;
            }
        }

        ensure_finite(&g, "gradient")?;
        Ok(g)
    }
}
