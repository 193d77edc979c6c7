// ─────────────────────────────────────────────────────────────────────
// Phase Drift Explorer — Combined Step Force
// ─────────────────────────────────────────────────────────────────────
//! The per-timestep force object: constraint gradient plus observer
//! deformation on the identity component.
//!
//! Built fresh for every step with its context (time, neighbour view)
//! held as named fields.

use drift_observers::BoundaryObserver;
use drift_physics::{ConstraintField, ForceFn};
use drift_types::{DriftError, DriftResult, SymbolicState};

/// Combined force for one timestep.
pub struct StepForce<'a> {
    pub field: &'a dyn ConstraintField,
    pub observer: &'a dyn BoundaryObserver,
    /// Simulation time of the step.
    pub t: f64,
    /// States the constraint field couples against.
    pub neighbors: &'a [SymbolicState],
}

impl ForceFn for StepForce<'_> {
    fn force(&self, state: &SymbolicState) -> DriftResult<Vec<f64>> {
        let delta = self.observer.boundary_deformation(state, self.t)?;
        let mut g = self.field.gradient(state, self.t, self.neighbors)?;
        let expected = 1 + state.dimension();
        if g.len() != expected {
            return Err(DriftError::ForceShape {
                expected,
                actual: g.len(),
            });
        }
        g[0] += delta;
        Ok(g)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drift_observers::Observer;
    use drift_physics::KarmicField;
    use drift_types::Signal;

    struct ShortField;

    impl ConstraintField for ShortField {
        fn gradient(&self, _: &SymbolicState, _: f64, _: &[SymbolicState]) -> DriftResult<Vec<f64>> {
            Ok(vec![0.0])
        }
    }

    #[test]
    fn test_deformation_added_to_identity_only() {
        let field = KarmicField::new(0.0, 0.0, 0.0);
        let observer = Observer::with_strength(Signal::Constant(1.0), 0.5, 2);
        let s = SymbolicState::new(1.0, vec![0.5, -0.5], Signal::Zero);
        let force = StepForce {
            field: &field,
            observer: &observer,
            t: 0.0,
            neighbors: &[],
        };
        let f = force.force(&s).unwrap();
        assert!((f[0] + 0.5 * 1.0f64.tanh()).abs() < 1e-12);
        assert_eq!(&f[1..], &[0.0, 0.0]);
    }

    #[test]
    fn test_matches_components() {
        let field = KarmicField::default_params();
        let observer = Observer::with_strength(Signal::cosine(), 0.1, 2);
        let s = SymbolicState::new(1.0, vec![0.5, -0.5], Signal::sine());
        let neighbors = vec![s.clone(), SymbolicState::new(0.0, vec![0.0, 0.0], Signal::Zero)];
        let force = StepForce {
            field: &field,
            observer: &observer,
            t: 2.0,
            neighbors: &neighbors,
        };
        let f = force.force(&s).unwrap();
        let g = field.gradient(&s, 2.0, &neighbors).unwrap();
        let d = observer.boundary_deformation(&s, 2.0).unwrap();
        assert!((f[0] - (g[0] + d)).abs() < 1e-15);
        assert_eq!(&f[1..], &g[1..]);
    }

    #[test]
    fn test_short_gradient_rejected() {
        let observer = Observer::with_strength(Signal::Zero, 0.0, 2);
        let s = SymbolicState::new(1.0, vec![0.5, -0.5], Signal::Zero);
        let force = StepForce {
            field: &ShortField,
            observer: &observer,
            t: 0.0,
            neighbors: &[],
        };
        assert_eq!(
            force.force(&s).unwrap_err(),
            DriftError::ForceShape {
                expected: 3,
                actual: 1
            }
        );
    }
}
