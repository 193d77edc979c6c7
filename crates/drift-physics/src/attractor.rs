// ─────────────────────────────────────────────────────────────────────
// Phase Drift Explorer — Attractor Stabilisation
// ─────────────────────────────────────────────────────────────────────
//! Relaxation of each particle toward a fixed target before forces are
//! evaluated.
//!
//!   gain = clamp(pull · (1 + f(t)), 0, 1)
//!   x'   = x + gain · (center − x)
//!   m'   = m + gain · (pattern − m)
//!
//! The clamp keeps the update a convex combination of the state and the
//! target, so finite inputs give finite outputs and a state sitting on
//! the target is a fixed point for every t.

use serde::{Deserialize, Serialize};

use drift_types::error::ensure_finite;
use drift_types::{DriftConfig, DriftError, DriftResult, Signal, SymbolicState};

/// Fixed attractor for identity and memory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attractor {
    center: f64,
    memory_pattern: Vec<f64>,
    identity_function: Signal,
    pull: f64,
}

impl Attractor {
    /// Default pull fraction per step.
    pub const DEFAULT_PULL: f64 = 0.1;

    pub fn new(center: f64, memory_pattern: Vec<f64>, identity_function: Signal) -> Self {
        Self::with_pull(center, memory_pattern, identity_function, Self::DEFAULT_PULL)
    }

    pub fn with_pull(
        center: f64,
        memory_pattern: Vec<f64>,
        identity_function: Signal,
        pull: f64,
    ) -> Self {
        Self {
            center,
            memory_pattern,
            identity_function,
            pull,
        }
    }

    pub fn from_config(config: &DriftConfig) -> Self {
        Self::with_pull(
            config.attractor_center,
            config.memory_pattern.clone(),
            config.attractor_signal,
            config.attractor_pull,
        )
    }

    pub fn center(&self) -> f64 {
        self.center
    }

    pub fn memory_pattern(&self) -> &[f64] {
        &self.memory_pattern
    }

    pub fn identity_function(&self) -> Signal {
        self.identity_function
    }

    /// Fraction of the remaining distance closed at time `t`, in [0, 1].
    pub fn gain(&self, t: f64) -> f64 {
        (self.pull * (1.0 + self.identity_function.sample(t))).clamp(0.0, 1.0)
    }

    /// Pull `state` toward the target.
    ///
    /// Returns `(identity', memory', resonance')`; the resonance signal
    /// is passed through unchanged.
    pub fn stabilize(
        &self,
        state: &SymbolicState,
        t: f64,
    ) -> DriftResult<(f64, Vec<f64>, Signal)> {
        if state.dimension() != self.memory_pattern.len() {
            return Err(DriftError::DimensionMismatch {
                expected: self.memory_pattern.len(),
                actual: state.dimension(),
            });
        }
        let gain = self.gain(t);
        let identity = state.identity() + gain * (self.center - state.identity());
        let memory: Vec<f64> = state
            .memory()
            .iter()
            .zip(&self.memory_pattern)
            .map(|(m, p)| m + gain * (p - m))
            .collect();

        ensure_finite(&[identity], "stabilize")?;
        ensure_finite(&memory, "stabilize")?;
        Ok((identity, memory, state.resonance()))
    }

    /// `stabilize` packaged as the successor state.
    pub fn stabilize_state(&self, state: &SymbolicState, t: f64) -> DriftResult<SymbolicState> {
        let (identity, memory, resonance) = self.stabilize(state, t)?;
        Ok(SymbolicState::new(identity, memory, resonance))
    }
}
