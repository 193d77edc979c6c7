// ─────────────────────────────────────────────────────────────────────
// Phase Drift Explorer — History Recorder
// ─────────────────────────────────────────────────────────────────────
//! Append-only sink of per-step (identity, ||memory||₂) snapshots.
//!
//! The recorder is a plain owned value; callers serialise it to carry
//! history across invocations.

use serde::{Deserialize, Serialize};

use drift_types::{DriftError, DriftResult, Snapshot, SnapshotPoint, SymbolicState};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryRecorder {
    history: Vec<Snapshot>,
}

impl HistoryRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a snapshot of `states`, computed now.
    ///
    /// Nothing is appended if any value is non-finite.
    pub fn record(&mut self, states: &[SymbolicState]) -> DriftResult<()> {
        let snapshot: Snapshot = states.iter().map(SnapshotPoint::capture).collect();
        if let Some(i) = snapshot.iter().position(|p| !p.is_finite()) {
            return Err(DriftError::NonFiniteResult(format!(
                "record (particle {i} at step {})",
                self.history.len()
            )));
        }
        self.history.push(snapshot);
        Ok(())
    }

    pub fn history(&self) -> &[Snapshot] {
        &self.history
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn snapshot(&self, step: usize) -> Option<&Snapshot> {
        self.history.get(step)
    }

    pub fn last(&self) -> Option<&Snapshot> {
        self.history.last()
    }

    /// Snapshot at index `len / 2`.
    pub fn midpoint(&self) -> Option<&Snapshot> {
        self.history.get(self.history.len() / 2)
    }

    pub fn into_history(self) -> Vec<Snapshot> {
        self.history
    }

    pub fn to_json(&self) -> DriftResult<String> {
        serde_json::to_string(self)
            .map_err(|e| DriftError::Config(format!("history encode error: {e}")))
    }

    pub fn from_json(json: &str) -> DriftResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| DriftError::Config(format!("history parse error: {e}")))
    }
}
