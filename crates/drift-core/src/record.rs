// ─────────────────────────────────────────────────────────────────────
// Phase Drift Explorer — Run Record
// ─────────────────────────────────────────────────────────────────────
//! Everything a rendering or export layer consumes from one run.

use serde::{Deserialize, Serialize};

use drift_types::{DriftError, DriftResult, Snapshot};

/// Output of a run: per-step snapshots and per-step collapse flags.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    /// Collapse threshold the run was evaluated against.
    pub theta: f64,
    /// One snapshot per completed step.
    pub history: Vec<Snapshot>,
    /// One flag per completed step.
    pub collapse_flags: Vec<bool>,
}

impl RunRecord {
    /// Completed steps.
    pub fn steps(&self) -> usize {
        self.history.len()
    }

    pub fn final_snapshot(&self) -> Option<&Snapshot> {
        self.history.last()
    }

    /// Whether the last completed step collapsed.
    pub fn final_collapsed(&self) -> bool {
        self.collapse_flags.last().copied().unwrap_or(false)
    }

    /// Snapshot at index `steps / 2`.
    pub fn midpoint_snapshot(&self) -> Option<&Snapshot> {
        self.history.get(self.history.len() / 2)
    }

    pub fn collapse_count(&self) -> usize {
        self.collapse_flags.iter().filter(|&&c| c).count()
    }

    /// Index of the first collapsed step.
    pub fn first_collapse(&self) -> Option<usize> {
        self.collapse_flags.iter().position(|&c| c)
    }

    pub fn to_json(&self) -> DriftResult<String> {
        serde_json::to_string(self)
            .map_err(|e| DriftError::Config(format!("record encode error: {e}")))
    }

    pub fn from_json(json: &str) -> DriftResult<Self> {
        let record: Self = serde_json::from_str(json)
            .map_err(|e| DriftError::Config(format!("record parse error: {e}")))?;
        if record.history.len() != record.collapse_flags.len() {
            return Err(DriftError::Config(format!(
                "record has {} snapshots but {} collapse flags",
                record.history.len(),
                record.collapse_flags.len()
            )));
        }
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drift_types::SnapshotPoint;

    fn point(x: f64) -> SnapshotPoint {
        SnapshotPoint {
            identity: x,
            memory_norm: x.abs(),
        }
    }

    fn record() -> RunRecord {
        RunRecord {
            theta: 0.75,
            history: vec![vec![point(1.0)], vec![point(2.0)], vec![point(3.0)]],
            collapse_flags: vec![false, true, true],
        }
    }

    #[test]
    fn test_summary_accessors() {
        let r = record();
        assert_eq!(r.steps(), 3);
        assert_eq!(r.final_snapshot().unwrap()[0].identity, 3.0);
        assert_eq!(r.midpoint_snapshot().unwrap()[0].identity, 2.0);
        assert!(r.final_collapsed());
        assert_eq!(r.collapse_count(), 2);
        assert_eq!(r.first_collapse(), Some(1));
    }

    #[test]
    fn test_empty_record() {
        let r = RunRecord::default();
        assert!(r.final_snapshot().is_none());
        assert!(!r.final_collapsed());
        assert_eq!(r.first_collapse(), None);
    }

    #[test]
    fn test_json_roundtrip() {
        let r = record();
        assert_eq!(RunRecord::from_json(&r.to_json().unwrap()).unwrap(), r);
    }

    #[test]
    fn test_from_json_rejects_ragged_record() {
        let json = r#"{"theta":0.75,"history":[[]],"collapse_flags":[]}"#;
        assert!(matches!(
            RunRecord::from_json(json),
            Err(DriftError::Config(_))
        ));
    }
}
