// ─────────────────────────────────────────────────────────────────────
// Phase Drift Explorer — Phase Space
// ─────────────────────────────────────────────────────────────────────
//! Ordered particle collection and the unit-step integrator.
//!
//! Particle order is particle identity across steps. `step` is atomic:
//! every successor is computed before `states` is replaced, so a failed
//! force evaluation leaves the phase space untouched.

use drift_types::error::ensure_finite;
use drift_types::{DriftError, DriftResult, SymbolicState};

/// A force law evaluated once per state.
///
/// Implementors hold whatever per-step context they need as named
/// fields; they are built fresh each timestep and passed to `step`.
pub trait ForceFn {
    /// Force vector of length 1 + D for `state`.
    fn force(&self, state: &SymbolicState) -> DriftResult<Vec<f64>>;
}

/// Adapter for plain functions and closures.
pub struct FnForce<F>(pub F);

impl<F> ForceFn for FnForce<F>
where
    F: Fn(&SymbolicState) -> Vec<f64>,
{
    fn force(&self, state: &SymbolicState) -> DriftResult<Vec<f64>> {
        Ok((self.0)(state))
    }
}

/// Successor of `state` under `force` with unit time step.
///
/// The resonance signal is carried over unchanged.
pub fn integrate_state(state: &SymbolicState, force: &[f64]) -> DriftResult<SymbolicState> {
    let expected = 1 + state.dimension();
    if force.len() != expected {
        return Err(DriftError::ForceShape {
            expected,
            actual: force.len(),
        });
    }
    let identity = state.identity() + force[0];
    let memory: Vec<f64> = state
        .memory()
        .iter()
        .zip(&force[1..])
        .map(|(m, f)| m + f)
        .collect();

    ensure_finite(&[identity], "integration")?;
    ensure_finite(&memory, "integration")?;
    Ok(SymbolicState::new(identity, memory, state.resonance()))
}

/// The particle collection of one run plus its collapse threshold θ.
#[derive(Debug, Clone)]
pub struct PhaseSpace {
    theta: f64,
    states: Vec<SymbolicState>,
    dimension: Option<usize>,
}

impl PhaseSpace {
    /// Empty phase space. Fails unless `theta > 0`.
    pub fn new(theta: f64) -> DriftResult<Self> {
        if !theta.is_finite() || theta <= 0.0 {
            return Err(DriftError::InvalidThreshold(theta));
        }
        Ok(Self {
            theta,
            states: Vec::new(),
            dimension: None,
        })
    }

    /// Phase space pre-populated with `states` (all of one dimension).
    pub fn with_states(theta: f64, states: Vec<SymbolicState>) -> DriftResult<Self> {
        let mut space = Self::new(theta)?;
        for state in states {
            space.add_state(state)?;
        }
        Ok(space)
    }

    #[inline]
    pub fn theta(&self) -> f64 {
        self.theta
    }

    #[inline]
    pub fn states(&self) -> &[SymbolicState] {
        &self.states
    }

    /// Memory dimension D, fixed by the first state added.
    #[inline]
    pub fn dimension(&self) -> Option<usize> {
        self.dimension
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    fn check_dimension(&self, state: &SymbolicState) -> DriftResult<()> {
        let actual = state.dimension();
        match self.dimension {
            Some(expected) if expected != actual => {
                Err(DriftError::DimensionMismatch { expected, actual })
            }
            None if actual == 0 => Err(DriftError::DimensionMismatch {
                expected: 1,
                actual,
            }),
            _ => Ok(()),
        }
    }

    /// Append a state. On dimension mismatch `states` is left unchanged.
    pub fn add_state(&mut self, state: SymbolicState) -> DriftResult<()> {
        self.check_dimension(&state)?;
        if self.dimension.is_none() {
            log::debug!("phase space dimension fixed at D = {}", state.dimension());
            self.dimension = Some(state.dimension());
        }
        self.states.push(state);
        Ok(())
    }

    /// Replace every state at once, preserving the run's dimension.
    ///
    /// Used by the driver to install stabilised states before force
    /// evaluation.
    pub fn replace_states(&mut self, states: Vec<SymbolicState>) -> DriftResult<()> {
        let dimension = self.dimension.or_else(|| states.first().map(|s| s.dimension()));
        let mut staged = Self {
            theta: self.theta,
            states: Vec::new(),
            dimension,
        };
        for state in &states {
            staged.check_dimension(state)?;
        }
        self.dimension = dimension;
        self.states = states;
        Ok(())
    }

    /// Evaluate `force_fn` on every state, in order.
    ///
    /// Each vector must have length 1 + D and be finite.
    pub fn evaluate<F>(&self, force_fn: &F) -> DriftResult<Vec<Vec<f64>>>
    where
        F: ForceFn + ?Sized,
    {
        let mut forces = Vec::with_capacity(self.states.len());
        for state in &self.states {
            let force = force_fn.force(state)?;
            let expected = 1 + state.dimension();
            if force.len() != expected {
                return Err(DriftError::ForceShape {
                    expected,
                    actual: force.len(),
                });
            }
            ensure_finite(&force, "force")?;
            forces.push(force);
        }
        Ok(forces)
    }

    /// Integrate every state by its precomputed force.
    ///
    /// `forces[i]` drives `states[i]`.
    pub fn integrate(&mut self, forces: &[Vec<f64>]) -> DriftResult<()> {
        if forces.len() != self.states.len() {
            return Err(DriftError::ForceShape {
                expected: self.states.len(),
                actual: forces.len(),
            });
        }
        let next = self
            .states
            .iter()
            .zip(forces)
            .map(|(state, force)| integrate_state(state, force))
            .collect::<DriftResult<Vec<_>>>()?;
        self.states = next;
        Ok(())
    }

    /// Advance every state one unit step under `force_fn`.
    ///
    /// An empty phase space is a no-op.
    pub fn step<F>(&mut self, force_fn: &F) -> DriftResult<()>
    where
        F: ForceFn + ?Sized,
    {
        let forces = self.evaluate(force_fn)?;
        self.integrate(&forces)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drift_types::Signal;

    fn state(x: f64, m: &[f64]) -> SymbolicState {
        SymbolicState::new(x, m.to_vec(), Signal::sine())
    }

    fn two_state_space() -> PhaseSpace {
        PhaseSpace::with_states(0.75, vec![state(1.0, &[0.5, -0.5]), state(-2.0, &[0.0, 1.0])])
            .unwrap()
    }

    #[test]
    fn test_invalid_threshold() {
        assert_eq!(
            PhaseSpace::new(0.0).unwrap_err(),
            DriftError::InvalidThreshold(0.0)
        );
        assert!(PhaseSpace::new(-1.0).is_err());
        assert!(PhaseSpace::new(f64::NAN).is_err());
        assert!(PhaseSpace::new(1e-9).is_ok());
    }

    #[test]
    fn test_add_state_fixes_dimension() {
        let mut ps = PhaseSpace::new(1.0).unwrap();
        assert_eq!(ps.dimension(), None);
        ps.add_state(state(0.0, &[1.0, 2.0])).unwrap();
        assert_eq!(ps.dimension(), Some(2));
        assert_eq!(ps.len(), 1);
    }

    #[test]
    fn test_dimension_mismatch_is_atomic() {
        let mut ps = two_state_space();
        let before = ps.states().to_vec();
        let err = ps.add_state(state(0.0, &[1.0, 2.0, 3.0])).unwrap_err();
        assert_eq!(
            err,
            DriftError::DimensionMismatch {
                expected: 2,
                actual: 3
            }
        );
        assert_eq!(ps.states(), before.as_slice());
    }

    #[test]
    fn test_empty_memory_rejected() {
        let mut ps = PhaseSpace::new(1.0).unwrap();
        assert!(matches!(
            ps.add_state(state(0.0, &[])),
            Err(DriftError::DimensionMismatch { actual: 0, .. })
        ));
        assert!(ps.is_empty());
    }

    #[test]
    fn test_step_unit_integration() {
        let mut ps = two_state_space();
        let f = FnForce(|_: &SymbolicState| vec![0.25, -0.5, 1.0]);
        ps.step(&f).unwrap();
        let s = &ps.states()[0];
        assert!((s.identity() - 1.25).abs() < 1e-12);
        assert!((s.memory()[0] - 0.0).abs() < 1e-12);
        assert!((s.memory()[1] - 0.5).abs() < 1e-12);
        assert_eq!(s.resonance(), Signal::sine());
        let s = &ps.states()[1];
        assert!((s.identity() + 1.75).abs() < 1e-12);
    }

    #[test]
    fn test_step_preserves_order() {
        let mut ps = two_state_space();
        let f = FnForce(|s: &SymbolicState| vec![s.identity(), 0.0, 0.0]);
        ps.step(&f).unwrap();
        assert!((ps.states()[0].identity() - 2.0).abs() < 1e-12);
        assert!((ps.states()[1].identity() + 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_step_is_deterministic() {
        let f = FnForce(|s: &SymbolicState| {
            vec![-0.3 * s.identity(), s.memory()[1].sin(), 0.1 * s.memory()[0]]
        });
        let mut a = two_state_space();
        let mut b = two_state_space();
        a.step(&f).unwrap();
        b.step(&f).unwrap();
        assert_eq!(a.states(), b.states());
    }

    #[test]
    fn test_wrong_force_length_rejected_atomically() {
        let mut ps = two_state_space();
        let before = ps.states().to_vec();
        let f = FnForce(|_: &SymbolicState| vec![1.0, 2.0]);
        assert_eq!(
            ps.step(&f).unwrap_err(),
            DriftError::ForceShape {
                expected: 3,
                actual: 2
            }
        );
        assert_eq!(ps.states(), before.as_slice());
    }

    #[test]
    fn test_non_finite_force_rejected() {
        let mut ps = two_state_space();
        let f = FnForce(|_: &SymbolicState| vec![f64::NAN, 0.0, 0.0]);
        assert!(matches!(
            ps.step(&f),
            Err(DriftError::NonFiniteResult(_))
        ));
    }

    #[test]
    fn test_integration_overflow_detected() {
        let s = state(f64::MAX, &[0.0]);
        assert!(matches!(
            integrate_state(&s, &[f64::MAX, 0.0]),
            Err(DriftError::NonFiniteResult(_))
        ));
    }

    #[test]
    fn test_empty_step_is_noop() {
        let mut ps = PhaseSpace::new(0.5).unwrap();
        let f = FnForce(|_: &SymbolicState| vec![1.0]);
        ps.step(&f).unwrap();
        assert!(ps.is_empty());
    }

    #[test]
    fn test_integrate_count_mismatch() {
        let mut ps = two_state_space();
        assert!(matches!(
            ps.integrate(&[vec![0.0; 3]]),
            Err(DriftError::ForceShape { .. })
        ));
    }

    #[test]
    fn test_replace_states_rejects_mixed_batch() {
        let mut ps = PhaseSpace::new(1.0).unwrap();
        assert!(ps
            .replace_states(vec![state(0.0, &[1.0]), state(0.0, &[1.0, 2.0])])
            .is_err());
        assert_eq!(ps.dimension(), None);
        assert!(ps.is_empty());
    }

    #[test]
    fn test_replace_states_checks_dimension() {
        let mut ps = two_state_space();
        assert!(ps.replace_states(vec![state(0.0, &[1.0])]).is_err());
        assert_eq!(ps.len(), 2);
        ps.replace_states(vec![state(3.0, &[1.0, 1.0])]).unwrap();
        assert_eq!(ps.len(), 1);
    }

    #[test]
    fn test_prior_states_unchanged_after_step() {
        let mut ps = two_state_space();
        let prior = ps.states().to_vec();
        ps.step(&FnForce(|_: &SymbolicState| vec![1.0, 1.0, 1.0]))
            .unwrap();
        assert!((prior[0].identity() - 1.0).abs() < 1e-12);
        assert_ne!(prior[0], ps.states()[0]);
    }
}
