// ─────────────────────────────────────────────────────────────────────
// Phase Drift Explorer — PyO3 FFI Bindings
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
// Note: #[deny(unsafe_code)] not applied — PyO3 proc macros generate
// unsafe blocks internally. All hand-written code in this crate is safe.
//! Python-callable wrappers around the phase drift engine.
//!
//! The interactive explorer (sliders, plots, GIF export) stays in
//! Python; it drives the engine through these bindings and consumes the
//! history and collapse flags.
//!
//! Install: `pip install -e crates/drift-ffi` (requires maturin).
//!
//! Usage from Python:
//! ```python
//! from phase_drift import PhaseDriftConfig, PhaseDriftEngine, run_simulation
//!
//! cfg = PhaseDriftConfig(theta=0.75, timesteps=30, observer_strength=0.1)
//! out = run_simulation(cfg)
//! out["history"][-1], out["collapse_flags"][-1]
//! ```

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;

use drift_core::{simulate, DriftEngine, DriftStepLog, RunRecord};
use drift_types::{DriftConfig, DriftError, Signal, Snapshot};

fn to_py_err(e: DriftError) -> PyErr {
    PyValueError::new_err(e.to_string())
}

fn parse_signal(name: &str) -> PyResult<Signal> {
    name.parse::<Signal>().map_err(to_py_err)
}

fn snapshots_to_py(history: &[Snapshot]) -> Vec<Vec<(f64, f64)>> {
    history
        .iter()
        .map(|snap| snap.iter().map(|p| (p.identity, p.memory_norm)).collect())
        .collect()
}

fn step_log_to_dict<'py>(py: Python<'py>, entry: &DriftStepLog) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new(py);
    dict.set_item("step", entry.step)?;
    dict.set_item("t", entry.t)?;
    dict.set_item("n_states", entry.n_states)?;
    dict.set_item("collapsed", entry.collapsed)?;
    dict.set_item("collapsed_count", entry.collapsed_count)?;
    dict.set_item("max_force_norm", entry.max_force_norm)?;
    dict.set_item("mean_identity", entry.mean_identity)?;
    dict.set_item("mean_memory_norm", entry.mean_memory_norm)?;
    Ok(dict)
}

fn record_to_dict<'py>(py: Python<'py>, record: &RunRecord) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new(py);
    dict.set_item("theta", record.theta)?;
    dict.set_item("history", snapshots_to_py(&record.history))?;
    dict.set_item("collapse_flags", record.collapse_flags.clone())?;
    Ok(dict)
}

// ─── PhaseDriftConfig ───────────────────────────────────────────────

/// Python-visible run configuration.
#[pyclass(name = "PhaseDriftConfig")]
#[derive(Clone)]
struct PyDriftConfig {
    inner: DriftConfig,
}

#[pymethods]
impl PyDriftConfig {
    #[new]
    #[pyo3(signature = (
        theta = 0.75,
        timesteps = 30,
        attractor_center = 0.0,
        observer_strength = 0.1,
        initial_identity = 1.0,
        initial_memory = None,
        resonance = "sine",
        observer_signal = "cosine",
        attractor_signal = "zero",
    ))]
    #[allow(clippy::too_many_arguments)]
    fn new(
        theta: f64,
        timesteps: usize,
        attractor_center: f64,
        observer_strength: f64,
        initial_identity: f64,
        initial_memory: Option<Vec<f64>>,
        resonance: &str,
        observer_signal: &str,
        attractor_signal: &str,
    ) -> PyResult<Self> {
        let defaults = DriftConfig::default();
        let initial_memory = initial_memory.unwrap_or(defaults.initial_memory);
        let inner = DriftConfig {
            theta,
            timesteps,
            attractor_center,
            observer_strength,
            initial_identity,
            memory_pattern: vec![0.0; initial_memory.len()],
            initial_memory,
            resonance: parse_signal(resonance)?,
            observer_signal: parse_signal(observer_signal)?,
            attractor_signal: parse_signal(attractor_signal)?,
            ..defaults
        };
        inner.validate().map_err(to_py_err)?;
        Ok(Self { inner })
    }

    #[staticmethod]
    fn from_json(json: &str) -> PyResult<Self> {
        let inner = DriftConfig::from_json(json).map_err(to_py_err)?;
        inner.validate().map_err(to_py_err)?;
        Ok(Self { inner })
    }

    fn to_json(&self) -> PyResult<String> {
        self.inner.to_json().map_err(to_py_err)
    }

    #[getter]
    fn theta(&self) -> f64 {
        self.inner.theta
    }

    #[getter]
    fn timesteps(&self) -> usize {
        self.inner.timesteps
    }

    #[getter]
    fn attractor_center(&self) -> f64 {
        self.inner.attractor_center
    }

    #[getter]
    fn observer_strength(&self) -> f64 {
        self.inner.observer_strength
    }

    fn __repr__(&self) -> String {
        format!(
            "PhaseDriftConfig(theta={}, timesteps={}, attractor_center={}, observer_strength={})",
            self.inner.theta,
            self.inner.timesteps,
            self.inner.attractor_center,
            self.inner.observer_strength
        )
    }
}

// ─── PhaseDriftEngine ───────────────────────────────────────────────

/// Step-by-step engine; keeps partial history after a failure.
#[pyclass(name = "PhaseDriftEngine")]
struct PyDriftEngine {
    inner: DriftEngine,
}

#[pymethods]
impl PyDriftEngine {
    #[new]
    #[pyo3(signature = (config = None))]
    fn new(config: Option<PyRef<'_, PyDriftConfig>>) -> PyResult<Self> {
        let cfg = config.map(|c| c.inner.clone()).unwrap_or_default();
        let inner = DriftEngine::new(&cfg).map_err(to_py_err)?;
        Ok(Self { inner })
    }

    /// Advance one step. Returns the step log as a dict.
    fn step<'py>(&mut self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        let entry = self.inner.step().map_err(to_py_err)?;
        step_log_to_dict(py, &entry)
    }

    /// Advance `n_steps`. Returns one dict per step.
    fn run<'py>(&mut self, py: Python<'py>, n_steps: usize) -> PyResult<Vec<Bound<'py, PyDict>>> {
        let logs = self.inner.run(n_steps).map_err(to_py_err)?;
        logs.iter().map(|entry| step_log_to_dict(py, entry)).collect()
    }

    /// Per-step lists of (identity, memory_norm) tuples.
    fn history(&self) -> Vec<Vec<(f64, f64)>> {
        snapshots_to_py(self.inner.history().history())
    }

    fn collapse_flags(&self) -> Vec<bool> {
        self.inner.collapse_flags().to_vec()
    }

    fn step_count(&self) -> usize {
        self.inner.step_count()
    }

    fn is_halted(&self) -> bool {
        self.inner.is_halted()
    }

    /// Serialised run record, for persisting across sessions.
    fn record_json(&self) -> PyResult<String> {
        self.inner.record().to_json().map_err(to_py_err)
    }
}

// ─── Free functions ─────────────────────────────────────────────────

/// Run a full simulation and return history plus collapse flags.
#[pyfunction]
#[pyo3(signature = (config = None))]
fn run_simulation<'py>(
    py: Python<'py>,
    config: Option<PyRef<'_, PyDriftConfig>>,
) -> PyResult<Bound<'py, PyDict>> {
    let cfg = config.map(|c| c.inner.clone()).unwrap_or_default();
    let record = simulate(&cfg).map_err(to_py_err)?;
    record_to_dict(py, &record)
}

/// Parse a serialised run record back into a dict.
#[pyfunction]
fn load_record<'py>(py: Python<'py>, json: &str) -> PyResult<Bound<'py, PyDict>> {
    let record = RunRecord::from_json(json).map_err(to_py_err)?;
    record_to_dict(py, &record)
}

// ─── Module Registration ────────────────────────────────────────────

/// Phase Drift Explorer — Rust simulation engine.
///
/// - `PhaseDriftConfig` — run configuration
/// - `PhaseDriftEngine` — step-by-step driver
/// - `run_simulation` — one-shot run
/// - `load_record` — reload a persisted run
#[pymodule]
fn phase_drift(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyDriftConfig>()?;
    m.add_class::<PyDriftEngine>()?;
    m.add_function(wrap_pyfunction!(run_simulation, m)?)?;
    m.add_function(wrap_pyfunction!(load_record, m)?)?;
    Ok(())
}
