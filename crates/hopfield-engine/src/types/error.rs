// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Error types for network engine operations

use thiserror::Error;

/// Errors raised by the network engine
///
/// Every variant is raised before any mutation happens, so a failed call
/// leaves weights, patterns, state and time exactly as they were.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// A state or pattern vector has the wrong length
    #[error("Dimension mismatch: expected length {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// A matrix input has the wrong shape
    #[error("Shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    /// A vector entry is neither -1 nor +1
    #[error("Value {value} at index {index} is not bipolar (expected -1 or +1)")]
    NotBipolar { index: usize, value: i64 },

    /// Removal requested for a pattern that is not stored
    #[error("There is no pattern to remove: index {index}, stored patterns {count}")]
    PatternIndexOutOfRange { index: usize, count: usize },

    /// Mode string did not name a known schedule
    #[error("Unknown update mode: {0}")]
    UnknownUpdateMode(String),

    /// Inverse temperature must be finite and non-negative
    #[error("Invalid inverse temperature (beta): {0}")]
    InvalidTemperature(f64),

    /// Restored weight matrix violates a structural invariant
    #[error("Invalid weight matrix: {0}")]
    InvalidWeights(String),

    /// Corruption or load fraction outside `[0, 1]`
    #[error("Fraction {0} is outside [0, 1]")]
    InvalidFraction(f64),

    /// A network must have at least one neuron
    #[error("Neuron count must be positive")]
    EmptyNetwork,
}

pub type Result<T> = std::result::Result<T, EngineError>;
pub type Error = EngineError;
