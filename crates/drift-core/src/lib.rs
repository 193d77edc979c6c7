// ─────────────────────────────────────────────────────────────────────
// Phase Drift Explorer — Run Driver
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Per-run driver loop, force composition, and history recording.
//!
//! # Step Invariants
//!
//! 1. **Fixed stage order**: stabilise every state, evaluate one force
//!    per state, detect collapse on those forces, integrate with the
//!    same forces, record one snapshot.
//!
//! 2. **Atomic steps**: a step that fails at any stage leaves states,
//!    history, and collapse flags exactly as they were. The engine then
//!    refuses to advance; the partial history stays inspectable.
//!
//! 3. **History length equals completed steps**: one snapshot and one
//!    collapse flag are appended per successful step, never removed.
//!
//! 4. **Non-finite values never reach history**: every stage checks its
//!    output and surfaces `NonFiniteResult` instead.

pub mod engine;
pub mod force;
pub mod history;
pub mod record;

pub use engine::{simulate, DriftEngine, DriftStepLog};
pub use force::StepForce;
pub use history::HistoryRecorder;
pub use record::RunRecord;
