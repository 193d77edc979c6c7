// ─────────────────────────────────────────────────────────────────────
// Phase Drift Explorer — Symbolic State
// ─────────────────────────────────────────────────────────────────────
//! The particle value type evolved by the engine.
//!
//! States are never mutated in place: every stage of a step builds a
//! new `SymbolicState`, so a reference held from an earlier step always
//! observes the same values.

use serde::{Deserialize, Serialize};

use crate::error::{DriftError, DriftResult};
use crate::signal::Signal;

/// Euclidean norm ||v||₂.
#[inline]
pub fn euclidean_norm(v: &[f64]) -> f64 {
    v.iter().map(|x| x * x).sum::<f64>().sqrt()
}

/// One symbolic particle: identity x, memory m, resonance r(t).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolicState {
    identity: f64,
    memory: Vec<f64>,
    resonance: Signal,
}

impl SymbolicState {
    pub fn new(identity: f64, memory: Vec<f64>, resonance: Signal) -> Self {
        Self {
            identity,
            memory,
            resonance,
        }
    }

    /// Construct a state whose memory must have length `dimension`.
    pub fn with_dimension(
        identity: f64,
        memory: Vec<f64>,
        resonance: Signal,
        dimension: usize,
    ) -> DriftResult<Self> {
        if memory.len() != dimension {
            return Err(DriftError::DimensionMismatch {
                expected: dimension,
                actual: memory.len(),
            });
        }
        Ok(Self::new(identity, memory, resonance))
    }

    #[inline]
    pub fn identity(&self) -> f64 {
        self.identity
    }

    #[inline]
    pub fn memory(&self) -> &[f64] {
        &self.memory
    }

    #[inline]
    pub fn resonance(&self) -> Signal {
        self.resonance
    }

    /// Memory dimension D.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.memory.len()
    }

    /// Sample the resonance signal at time `t`.
    #[inline]
    pub fn resonance_at(&self, t: f64) -> f64 {
        self.resonance.sample(t)
    }

    /// ||m||₂.
    pub fn memory_norm(&self) -> f64 {
        euclidean_norm(&self.memory)
    }

    /// True when identity and every memory component are finite.
    pub fn is_finite(&self) -> bool {
        self.identity.is_finite() && self.memory.iter().all(|v| v.is_finite())
    }
}
