// ─────────────────────────────────────────────────────────────────────
// Phase Drift Explorer — Phase Space Physics
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Phase space integration, constraint-field coupling, attractor
//! stabilisation, and collapse detection for symbolic particles.
//!
//! Per step the driver stabilises every state, evaluates one force
//! vector of length 1 + D per state, flags collapse on the force norms,
//! and integrates with a unit time step:
//!
//!   x' = x + f[0]
//!   m' = m + f[1..]

pub mod attractor;
pub mod collapse;
pub mod constraint;
pub mod phase_space;

pub use attractor::Attractor;
pub use collapse::{force_norm, CollapseDetector, CollapseReport};
pub use constraint::{ConstraintField, KarmicField};
pub use phase_space::{integrate_state, FnForce, ForceFn, PhaseSpace};
