// ─────────────────────────────────────────────────────────────────────
// Phase Drift Explorer — Boundary Observers
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Observer-induced boundary deformation: an external "measurement"
//! pressure added to the identity component of each particle's force.

pub mod observer;

pub use observer::{BoundaryObserver, Observer};
