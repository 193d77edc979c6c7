// ─────────────────────────────────────────────────────────────────────
// Phase Drift Explorer — Run Configuration
// ─────────────────────────────────────────────────────────────────────

use serde::{Deserialize, Serialize};

use crate::error::{DriftError, DriftResult};
use crate::signal::Signal;

/// Inclusive range and step of one control-panel parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ControlRange {
    pub name: &'static str,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub default: f64,
}

/// Configuration for one simulation run.
///
/// Holds the caller-facing parameters (threshold, step count, attractor
/// centre, observer strength), the initial condition, and the engine
/// hyperparameters of the force laws.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriftConfig {
    /// Collapse threshold θ: a step collapses when any force norm > θ.
    /// Default: 0.75.
    pub theta: f64,

    /// Number of timesteps to run. Default: 30.
    pub timesteps: usize,

    /// Attractor target for identity. Default: 0.0.
    pub attractor_center: f64,

    /// Observer influence; duplicated across the D memory components of
    /// the observer vector. Default: 0.1.
    pub observer_strength: f64,

    /// Identity of the initial particle. Default: 1.0.
    pub initial_identity: f64,

    /// Memory of the initial particle; fixes D. Default: [0.5, -0.5].
    pub initial_memory: Vec<f64>,

    /// Resonance signal attached to the initial particle. Default: sine.
    pub resonance: Signal,

    /// Attractor target for memory. Default: [0.0, 0.0].
    pub memory_pattern: Vec<f64>,

    /// Time modulation of the attractor pull. Default: zero.
    pub attractor_signal: Signal,

    /// Observer deformation shape. Default: cosine.
    pub observer_signal: Signal,

    /// Base fraction of the distance to the attractor closed per step.
    /// Default: 0.1.
    pub attractor_pull: f64,

    /// Neighbour coupling strength κ of the constraint field. Default: 0.5.
    pub coupling: f64,

    /// Self-decay λ of the constraint field. Default: 0.05.
    pub self_decay: f64,

    /// Weight γ of the resonance signal on the identity force.
    /// Default: 0.1.
    pub resonance_gain: f64,
}

impl Default for DriftConfig {
    fn default() -> Self {
        Self {
            theta: 0.75,
            timesteps: 30,
            attractor_center: 0.0,
            observer_strength: 0.1,
            initial_identity: 1.0,
            initial_memory: vec![0.5, -0.5],
            resonance: Signal::sine(),
            memory_pattern: vec![0.0, 0.0],
            attractor_signal: Signal::Zero,
            observer_signal: Signal::cosine(),
            attractor_pull: 0.1,
            coupling: 0.5,
            self_decay: 0.05,
            resonance_gain: 0.1,
        }
    }
}

impl DriftConfig {
    /// Memory dimension D of the run.
    pub fn dimension(&self) -> usize {
        self.initial_memory.len()
    }

    /// Observer influence vector: `observer_strength` in every component.
    pub fn observer_vector(&self) -> Vec<f64> {
        vec![self.observer_strength; self.dimension()]
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> DriftResult<()> {
        if !self.theta.is_finite() || self.theta <= 0.0 {
            return Err(DriftError::InvalidThreshold(self.theta));
        }
        if self.timesteps == 0 {
            return Err(DriftError::Config("timesteps must be >= 1".to_string()));
        }
        if self.initial_memory.is_empty() {
            return Err(DriftError::Config(
                "initial_memory must have at least one component".to_string(),
            ));
        }
        if self.memory_pattern.len() != self.initial_memory.len() {
            return Err(DriftError::Config(format!(
                "memory_pattern length {} must equal initial_memory length {}",
                self.memory_pattern.len(),
                self.initial_memory.len()
            )));
        }
        if self.observer_strength.is_nan() || self.observer_strength < 0.0 {
            return Err(DriftError::Config(format!(
                "observer_strength must be >= 0, got {}",
                self.observer_strength
            )));
        }
        if !(0.0..=1.0).contains(&self.attractor_pull) {
            return Err(DriftError::Config(format!(
                "attractor_pull must be in [0, 1], got {}",
                self.attractor_pull
            )));
        }
        let scalars = [
            ("attractor_center", self.attractor_center),
            ("observer_strength", self.observer_strength),
            ("initial_identity", self.initial_identity),
            ("coupling", self.coupling),
            ("self_decay", self.self_decay),
            ("resonance_gain", self.resonance_gain),
        ];
        for (name, value) in scalars {
            if !value.is_finite() {
                return Err(DriftError::Config(format!("{name} must be finite, got {value}")));
            }
        }
        if self
            .initial_memory
            .iter()
            .chain(self.memory_pattern.iter())
            .any(|v| !v.is_finite())
        {
            return Err(DriftError::Config(
                "memory vectors must be finite".to_string(),
            ));
        }
        for (name, signal) in [
            ("resonance", self.resonance),
            ("attractor_signal", self.attractor_signal),
            ("observer_signal", self.observer_signal),
        ] {
            if !signal.is_finite() {
                return Err(DriftError::Config(format!(
                    "{name} has non-finite parameters"
                )));
            }
        }
        Ok(())
    }

    /// Ranges offered by the interactive control panel. Informational;
    /// `validate` only enforces what the engine itself needs.
    pub fn control_ranges() -> [ControlRange; 4] {
        [
            ControlRange {
                name: "theta",
                min: 0.1,
                max: 2.0,
                step: 0.05,
                default: 0.75,
            },
            ControlRange {
                name: "timesteps",
                min: 10.0,
                max: 100.0,
                step: 1.0,
                default: 30.0,
            },
            ControlRange {
                name: "attractor_center",
                min: -2.0,
                max: 2.0,
                step: 0.1,
                default: 0.0,
            },
            ControlRange {
                name: "observer_strength",
                min: 0.0,
                max: 1.0,
                step: 0.05,
                default: 0.1,
            },
        ]
    }

    /// Load from JSON string. Missing fields take their defaults.
    pub fn from_json(json: &str) -> DriftResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| DriftError::Config(format!("JSON parse error: {e}")))
    }

    pub fn to_json(&self) -> DriftResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| DriftError::Config(format!("JSON encode error: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let cfg = DriftConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.dimension(), 2);
        assert_eq!(cfg.observer_vector(), vec![0.1, 0.1]);
    }

    #[test]
    fn test_zero_theta_rejected() {
        let cfg = DriftConfig {
            theta: 0.0,
            ..DriftConfig::default()
        };
        assert_eq!(cfg.validate(), Err(DriftError::InvalidThreshold(0.0)));
    }

    #[test]
    fn test_nan_theta_rejected() {
        let cfg = DriftConfig {
            theta: f64::NAN,
            ..DriftConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(DriftError::InvalidThreshold(_))
        ));
    }

    #[test]
    fn test_zero_timesteps_rejected() {
        let cfg = DriftConfig {
            timesteps: 0,
            ..DriftConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(DriftError::Config(_))));
    }

    #[test]
    fn test_pattern_length_mismatch_rejected() {
        let cfg = DriftConfig {
            memory_pattern: vec![0.0; 3],
            ..DriftConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(DriftError::Config(_))));
    }

    #[test]
    fn test_empty_memory_rejected() {
        let cfg = DriftConfig {
            initial_memory: vec![],
            memory_pattern: vec![],
            ..DriftConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_negative_strength_rejected() {
        let cfg = DriftConfig {
            observer_strength: -0.1,
            ..DriftConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_pull_out_of_range_rejected() {
        let cfg = DriftConfig {
            attractor_pull: 1.5,
            ..DriftConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_non_finite_signal_rejected() {
        let cfg = DriftConfig {
            observer_signal: Signal::Constant(f64::NAN),
            ..DriftConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_from_json_partial_uses_defaults() {
        let cfg = DriftConfig::from_json(r#"{"theta": 1.25, "observer_signal": "sine"}"#).unwrap();
        assert!((cfg.theta - 1.25).abs() < 1e-12);
        assert_eq!(cfg.observer_signal, Signal::sine());
        assert_eq!(cfg.timesteps, 30);
        assert_eq!(cfg.initial_memory, vec![0.5, -0.5]);
    }

    #[test]
    fn test_from_json_signal_names() {
        let cfg =
            DriftConfig::from_json(r#"{"resonance": "sine", "observer_signal": "cos"}"#).unwrap();
        assert_eq!(cfg.resonance, Signal::sine());
        assert_eq!(cfg.observer_signal, Signal::cosine());
        let back = DriftConfig::from_json(&cfg.to_json().unwrap()).unwrap();
        assert_eq!(back, cfg);
    }

    #[test]
    fn test_json_roundtrip() {
        let cfg = DriftConfig {
            resonance: Signal::Constant(0.3),
            ..DriftConfig::default()
        };
        let back = DriftConfig::from_json(&cfg.to_json().unwrap()).unwrap();
        assert_eq!(back, cfg);
    }

    #[test]
    fn test_from_json_garbage() {
        assert!(matches!(
            DriftConfig::from_json("{not json"),
            Err(DriftError::Config(_))
        ));
    }

    #[test]
    fn test_control_range_defaults_match_config() {
        let cfg = DriftConfig::default();
        let ranges = DriftConfig::control_ranges();
        assert_eq!(ranges[0].default, cfg.theta);
        assert_eq!(ranges[3].default, cfg.observer_strength);
        assert!(ranges.iter().all(|r| r.min <= r.default && r.default <= r.max));
    }
}
