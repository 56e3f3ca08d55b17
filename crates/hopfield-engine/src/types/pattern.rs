// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Bipolar vectors and stored patterns

use ndarray::{Array1, ArrayView1};

use super::error::{EngineError, Result};

/// Neuron value for an active (excited) neuron
pub const ACTIVE: i8 = 1;

/// Neuron value for an inhibited neuron
pub const INHIBITED: i8 = -1;

/// Check that every entry of `values` is -1 or +1
pub fn validate_bipolar(values: ArrayView1<'_, i8>) -> Result<()> {
    match values
        .iter()
        .position(|&v| v != ACTIVE && v != INHIBITED)
    {
        Some(index) => Err(EngineError::NotBipolar {
            index,
            value: i64::from(values[index]),
        }),
        None => Ok(()),
    }
}

/// Check length and bipolarity in one pass over the error cases
pub fn validate_state(values: ArrayView1<'_, i8>, expected_len: usize) -> Result<()> {
    if values.len() != expected_len {
        return Err(EngineError::DimensionMismatch {
            expected: expected_len,
            actual: values.len(),
        });
    }
    validate_bipolar(values)
}

/// An immutable bipolar vector stored in a network
///
/// The inner vector is only reachable through a read-only view, so a stored
/// pattern can never drift away from the Hebbian contribution it made.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pattern(Array1<i8>);

impl Pattern {
    /// Validate and wrap a bipolar vector
    pub fn new(values: Array1<i8>) -> Result<Self> {
        validate_bipolar(values.view())?;
        Ok(Self(values))
    }

    /// Copy a bipolar vector out of a view
    pub fn from_view(values: ArrayView1<'_, i8>) -> Result<Self> {
        validate_bipolar(values)?;
        Ok(Self(values.to_owned()))
    }

    /// Wrap a vector already known to be bipolar
    pub(crate) fn from_trusted(values: Array1<i8>) -> Self {
        debug_assert!(validate_bipolar(values.view()).is_ok());
        Self(values)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn view(&self) -> ArrayView1<'_, i8> {
        self.0.view()
    }

    pub fn as_slice(&self) -> &[i8] {
        // Owned 1-D arrays built by this crate are always contiguous
        self.0.as_slice().unwrap_or(&[])
    }

    /// The globally inverted pattern (-ξ), an equivalent attractor
    pub fn inverted(&self) -> Self {
        Self(self.0.mapv(|v| -v))
    }

    pub fn into_inner(self) -> Array1<i8> {
        self.0
    }
}

impl TryFrom<Vec<i8>> for Pattern {
    type Error = EngineError;

    fn try_from(values: Vec<i8>) -> Result<Self> {
        Self::new(Array1::from(values))
    }
}

impl TryFrom<&[i8]> for Pattern {
    type Error = EngineError;

    fn try_from(values: &[i8]) -> Result<Self> {
        Self::new(Array1::from(values.to_vec()))
    }
}

impl AsRef<[i8]> for Pattern {
    fn as_ref(&self) -> &[i8] {
        self.as_slice()
    }
}
