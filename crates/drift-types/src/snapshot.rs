// ─────────────────────────────────────────────────────────────────────
// Phase Drift Explorer — History Snapshot Types
// ─────────────────────────────────────────────────────────────────────

use serde::{Deserialize, Serialize};

use crate::state::SymbolicState;

/// One particle as handed to the rendering layer: (x, ||m||₂).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnapshotPoint {
    pub identity: f64,
    pub memory_norm: f64,
}

impl SnapshotPoint {
    /// Capture a state's plotted coordinates now.
    pub fn capture(state: &SymbolicState) -> Self {
        Self {
            identity: state.identity(),
            memory_norm: state.memory_norm(),
        }
    }

    pub fn is_finite(&self) -> bool {
        self.identity.is_finite() && self.memory_norm.is_finite()
    }
}

/// All live particles after one step, in particle order.
pub type Snapshot = Vec<SnapshotPoint>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::Signal;

    #[test]
    fn test_capture() {
        let s = SymbolicState::new(-0.5, vec![0.6, 0.8], Signal::Zero);
        let p = SnapshotPoint::capture(&s);
        assert_eq!(p.identity, -0.5);
        assert!((p.memory_norm - 1.0).abs() < 1e-12);
        assert!(p.is_finite());
    }
}
