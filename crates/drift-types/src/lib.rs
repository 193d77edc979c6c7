// ─────────────────────────────────────────────────────────────────────
// Phase Drift Explorer — Engine Types
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Type definitions, configuration, and error hierarchy for the
//! phase drift engine.

pub mod config;
pub mod error;
pub mod signal;
pub mod snapshot;
pub mod state;

pub use config::{ControlRange, DriftConfig};
pub use error::{DriftError, DriftResult};
pub use signal::Signal;
pub use snapshot::{Snapshot, SnapshotPoint};
pub use state::{euclidean_norm, SymbolicState};
