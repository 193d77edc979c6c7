// ─────────────────────────────────────────────────────────────────────
// Phase Drift Explorer — Time Signals
// ─────────────────────────────────────────────────────────────────────
//! Named functions of time used as resonance and identity signals.
//!
//! States carry a `Signal` tag instead of a closure so that they stay
//! serialisable for history export.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DriftError;

/// A deterministic, continuous function of time.
///
/// Deserialises from either a name (`"sine"`, `"cos"`, `"constant:0.5"`)
/// or the tagged form it serialises to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "SignalRepr")]
pub enum Signal {
    /// s(t) = 0.
    #[default]
    Zero,
    /// s(t) = c.
    Constant(f64),
    /// s(t) = A sin(ωt).
    Sine { amplitude: f64, frequency: f64 },
    /// s(t) = A cos(ωt).
    Cosine { amplitude: f64, frequency: f64 },
}

/// Input forms accepted for a `Signal`.
#[derive(Deserialize)]
#[serde(untagged)]
enum SignalRepr {
    Name(String),
    Tagged(TaggedSignal),
}

#[derive(Deserialize)]
#[serde(rename_all = "snake_case")]
enum TaggedSignal {
    Zero,
    Constant(f64),
    Sine { amplitude: f64, frequency: f64 },
    Cosine { amplitude: f64, frequency: f64 },
}

impl TryFrom<SignalRepr> for Signal {
    type Error = DriftError;

    fn try_from(repr: SignalRepr) -> Result<Self, Self::Error> {
        match repr {
            SignalRepr::Name(name) => name.parse(),
            SignalRepr::Tagged(TaggedSignal::Zero) => Ok(Signal::Zero),
            SignalRepr::Tagged(TaggedSignal::Constant(c)) => Ok(Signal::Constant(c)),
            SignalRepr::Tagged(TaggedSignal::Sine {
                amplitude,
                frequency,
            }) => Ok(Signal::Sine {
                amplitude,
                frequency,
            }),
            SignalRepr::Tagged(TaggedSignal::Cosine {
                amplitude,
                frequency,
            }) => Ok(Signal::Cosine {
                amplitude,
                frequency,
            }),
        }
    }
}

impl Signal {
    /// Unit sine, sin(t).
    pub fn sine() -> Self {
        Signal::Sine {
            amplitude: 1.0,
            frequency: 1.0,
        }
    }

    /// Unit cosine, cos(t).
    pub fn cosine() -> Self {
        Signal::Cosine {
            amplitude: 1.0,
            frequency: 1.0,
        }
    }

    /// Evaluate the signal at time `t`.
    #[inline]
    pub fn sample(&self, t: f64) -> f64 {
        match *self {
            Signal::Zero => 0.0,
            Signal::Constant(c) => c,
            Signal::Sine {
                amplitude,
                frequency,
            } => amplitude * (frequency * t).sin(),
            Signal::Cosine {
                amplitude,
                frequency,
            } => amplitude * (frequency * t).cos(),
        }
    }

    /// Side-table name of the signal shape.
    pub fn name(&self) -> &'static str {
        match self {
            Signal::Zero => "zero",
            Signal::Constant(_) => "constant",
            Signal::Sine { .. } => "sine",
            Signal::Cosine { .. } => "cosine",
        }
    }

    /// True when every parameter is finite.
    pub fn is_finite(&self) -> bool {
        match *self {
            Signal::Zero => true,
            Signal::Constant(c) => c.is_finite(),
            Signal::Sine {
                amplitude,
                frequency,
            }
            | Signal::Cosine {
                amplitude,
                frequency,
            } => amplitude.is_finite() && frequency.is_finite(),
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signal::Constant(c) => write!(f, "constant:{c}"),
            other => f.write_str(other.name()),
        }
    }
}

/// Parses `zero`, `sine`, `cosine`, or `constant:<value>`.
impl FromStr for Signal {
    type Err = DriftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.to_ascii_lowercase().as_str() {
            "zero" => return Ok(Signal::Zero),
            "sine" | "sin" => return Ok(Signal::sine()),
            "cosine" | "cos" => return Ok(Signal::cosine()),
            _ => {}
        }
        if let Some(value) = s.strip_prefix("constant:") {
            let c: f64 = value
                .trim()
                .parse()
                .map_err(|e| DriftError::Config(format!("bad constant signal {s:?}: {e}")))?;
            return Ok(Signal::Constant(c));
        }
        Err(DriftError::Config(format!("unknown signal {s:?}")))
    }
}
