// ─────────────────────────────────────────────────────────────────────
// Phase Drift Explorer — Drift Engine (Run Driver)
// ─────────────────────────────────────────────────────────────────────
//! Five-stage step:
//!   1. Stabilise every state toward the attractor
//!   2. Build the step force (constraint gradient + observer deformation)
//!   3. Evaluate one force per stabilised state; flag collapse
//!   4. Integrate the stabilised states with those same forces
//!   5. Record the snapshot and the collapse flag
//!
//! Time t is the 0-based step index. The constraint field couples
//! against the states as they stood at the start of the step.

use serde::{Deserialize, Serialize};

use drift_observers::{BoundaryObserver, Observer};
use drift_physics::{Attractor, CollapseDetector, ConstraintField, KarmicField, PhaseSpace};
use drift_types::{DriftConfig, DriftError, DriftResult, SymbolicState};

use crate::force::StepForce;
use crate::history::HistoryRecorder;
use crate::record::RunRecord;

/// Log entry for one completed step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DriftStepLog {
    pub step: usize,
    pub t: f64,
    pub n_states: usize,
    pub collapsed: bool,
    pub collapsed_count: usize,
    pub max_force_norm: f64,
    pub mean_identity: f64,
    pub mean_memory_norm: f64,
}

/// Owns one run: phase space, force components, history, and flags.
pub struct DriftEngine {
    space: PhaseSpace,
    attractor: Attractor,
    field: Box<dyn ConstraintField>,
    observer: Box<dyn BoundaryObserver>,
    detector: CollapseDetector,
    history: HistoryRecorder,
    collapse_flags: Vec<bool>,
    step_count: usize,
    failed_at: Option<usize>,
    pub log: Vec<DriftStepLog>,
}

impl DriftEngine {
    /// Build an engine for `config` with a single initial particle.
    pub fn new(config: &DriftConfig) -> DriftResult<Self> {
        config.validate()?;
        let initial = SymbolicState::new(
            config.initial_identity,
            config.initial_memory.clone(),
            config.resonance,
        );
        let space = PhaseSpace::with_states(config.theta, vec![initial])?;
        Self::from_parts(
            space,
            Attractor::from_config(config),
            Box::new(KarmicField::from_config(config)),
            Box::new(Observer::from_config(config)),
        )
    }

    /// Build an engine from explicit components.
    ///
    /// The attractor pattern and any observer vector must match the
    /// phase-space dimension (the pattern fixes it for an empty space).
    pub fn from_parts(
        space: PhaseSpace,
        attractor: Attractor,
        field: Box<dyn ConstraintField>,
        observer: Box<dyn BoundaryObserver>,
    ) -> DriftResult<Self> {
        let pattern_len = attractor.memory_pattern().len();
        let expected = space.dimension().unwrap_or(pattern_len);
        if pattern_len != expected {
            return Err(DriftError::DimensionMismatch {
                expected,
                actual: pattern_len,
            });
        }
        if let Some(actual) = observer.dimension() {
            if actual != expected {
                return Err(DriftError::DimensionMismatch { expected, actual });
            }
        }
        let detector = CollapseDetector::for_phase_space(&space);
        Ok(Self {
            space,
            attractor,
            field,
            observer,
            detector,
            history: HistoryRecorder::new(),
            collapse_flags: Vec::new(),
            step_count: 0,
            failed_at: None,
            log: Vec::new(),
        })
    }

    /// Execute one step.
    ///
    /// On failure nothing is committed and every later call returns
    /// `DriftError::Halted`.
    pub fn step(&mut self) -> DriftResult<DriftStepLog> {
        if let Some(step) = self.failed_at {
            return Err(DriftError::Halted { step });
        }
        match self.advance() {
            Ok(entry) => Ok(entry),
            Err(e) => {
                log::error!("step {} failed, run halted: {e}", self.step_count);
                self.failed_at = Some(self.step_count);
                Err(e)
            }
        }
    }

    fn advance(&mut self) -> DriftResult<DriftStepLog> {
        let step = self.step_count;
        let t = step as f64;

        // 1. Stabilise
        let neighbors = self.space.states().to_vec();
        let stabilized = neighbors
            .iter()
            .map(|s| self.attractor.stabilize_state(s, t))
            .collect::<DriftResult<Vec<_>>>()?;
        let mut next = self.space.clone();
        next.replace_states(stabilized)?;

        // 2-3. Force evaluation + collapse
        let force = StepForce {
            field: self.field.as_ref(),
            observer: self.observer.as_ref(),
            t,
            neighbors: &neighbors,
        };
        let forces = next.evaluate(&force)?;
        let report = self.detector.detect(&forces);

        // 4. Integrate
        next.integrate(&forces)?;

        // 5. Record
        self.history.record(next.states())?;
        self.space = next;
        self.collapse_flags.push(report.collapsed);
        self.step_count += 1;

        let n = self.space.len();
        let (sum_x, sum_m) = self
            .space
            .states()
            .iter()
            .fold((0.0, 0.0), |(x, m), s| (x + s.identity(), m + s.memory_norm()));
        let denom = n.max(1) as f64;
        let entry = DriftStepLog {
            step,
            t,
            n_states: n,
            collapsed: report.collapsed,
            collapsed_count: report.collapsed_count(),
            max_force_norm: report.max_norm(),
            mean_identity: sum_x / denom,
            mean_memory_norm: sum_m / denom,
        };

        if report.collapsed {
            log::warn!(
                "collapse at step {step}: {} of {n} states, max |f| = {:.4} > θ = {}",
                entry.collapsed_count,
                entry.max_force_norm,
                self.detector.theta()
            );
        }
        log::debug!(
            "step {step} done: mean x = {:.4}, mean |m| = {:.4}",
            entry.mean_identity,
            entry.mean_memory_norm
        );

        self.log.push(entry.clone());
        Ok(entry)
    }

    /// Run `timesteps` steps, stopping at the first failure.
    pub fn run(&mut self, timesteps: usize) -> DriftResult<Vec<DriftStepLog>> {
        log::info!(
            "running {timesteps} steps over {} states (θ = {})",
            self.space.len(),
            self.space.theta()
        );
        let mut logs = Vec::with_capacity(timesteps);
        for _ in 0..timesteps {
            logs.push(self.step()?);
        }
        log::info!(
            "run finished: {} steps, {} collapsed",
            self.step_count,
            self.collapse_flags.iter().filter(|&&c| c).count()
        );
        Ok(logs)
    }

    pub fn states(&self) -> &[SymbolicState] {
        self.space.states()
    }

    pub fn phase_space(&self) -> &PhaseSpace {
        &self.space
    }

    pub fn history(&self) -> &HistoryRecorder {
        &self.history
    }

    pub fn collapse_flags(&self) -> &[bool] {
        &self.collapse_flags
    }

    pub fn step_count(&self) -> usize {
        self.step_count
    }

    /// True once a step has failed.
    pub fn is_halted(&self) -> bool {
        self.failed_at.is_some()
    }

    /// Snapshot of everything handed to the rendering layer.
    pub fn record(&self) -> RunRecord {
        RunRecord {
            theta: self.space.theta(),
            history: self.history.history().to_vec(),
            collapse_flags: self.collapse_flags.clone(),
        }
    }

    pub fn into_record(self) -> RunRecord {
        RunRecord {
            theta: self.space.theta(),
            history: self.history.into_history(),
            collapse_flags: self.collapse_flags,
        }
    }
}

/// Run `config.timesteps` steps from the configured initial condition.
///
/// Use `DriftEngine` directly to inspect partial history after a failure.
pub fn simulate(config: &DriftConfig) -> DriftResult<RunRecord> {
    let mut engine = DriftEngine::new(config)?;
    engine.run(config.timesteps)?;
    Ok(engine.into_record())
}
