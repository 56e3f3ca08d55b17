// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Update scheduling, update rules and convergence reports

use core::fmt;
use core::str::FromStr;

use super::error::{EngineError, Result};

/// Order in which neurons are visited during one iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum UpdateMode {
    /// All neurons computed from the same prior state, then replaced at once
    Synchronous,
    /// Neurons visited in a random permutation, each updated in place
    Asynchronous,
}

impl UpdateMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            UpdateMode::Synchronous => "sync",
            UpdateMode::Asynchronous => "async",
        }
    }
}

impl fmt::Display for UpdateMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UpdateMode {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sync" | "synchronous" => Ok(UpdateMode::Synchronous),
            "async" | "asynchronous" => Ok(UpdateMode::Asynchronous),
            _ => Err(EngineError::UnknownUpdateMode(s.to_string())),
        }
    }
}

/// Rule used to compute a neuron's next value from its local field
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "rule", rename_all = "snake_case"))]
pub enum Dynamics {
    /// Deterministic sign rule; a zero field resolves to +1
    ZeroTemperature,
    /// Glauber rule: `P(+1) = 1 / (1 + exp(-2 beta h))`
    FiniteTemperature { beta: f64 },
}

impl Dynamics {
    /// Build a thermal rule; beta must be finite and non-negative
    ///
    /// `beta == 0` is the infinite-temperature limit where every neuron
    /// becomes a fair coin flip.
    pub fn thermal(beta: f64) -> Result<Self> {
        if beta.is_finite() && beta >= 0.0 {
            Ok(Dynamics::FiniteTemperature { beta })
        } else {
            Err(EngineError::InvalidTemperature(beta))
        }
    }

}

impl Default for Dynamics {
    fn default() -> Self {
        Dynamics::ZeroTemperature
    }
}

/// How a bounded relaxation ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "outcome", rename_all = "snake_case"))]
pub enum Convergence {
    /// A full step left the state unchanged
    FixedPoint { steps: u64 },
    /// Synchronous state repeated with period 2
    Oscillation { steps: u64 },
    /// Sweep ceiling reached without either of the above
    Exhausted { steps: u64 },
}

impl Convergence {
    /// Number of state-changing steps taken before stopping
    pub fn steps(&self) -> u64 {
        match *self {
            Convergence::FixedPoint { steps }
            | Convergence::Oscillation { steps }
            | Convergence::Exhausted { steps } => steps,
        }
    }

    pub fn is_fixed_point(&self) -> bool {
        matches!(self, Convergence::FixedPoint { .. })
    }
}
