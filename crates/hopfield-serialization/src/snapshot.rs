// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use hopfield_engine::HopfieldNetwork;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// Persistent part of a network: weights and the stored pattern set
///
/// Field order is the on-disk payload order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSnapshot {
    /// N×N Hebbian weight matrix
    pub weights: Array2<f64>,
    /// N×p stored patterns, one per column
    pub patterns: Array2<i8>,
}

impl NetworkSnapshot {
    pub fn capture(network: &HopfieldNetwork) -> Self {
        Self {
            weights: network.weights().to_owned(),
            patterns: network.pattern_matrix(),
        }
    }

    /// Rebuild a network; validation happens in `HopfieldNetwork::from_parts`
    pub fn restore(self) -> hopfield_engine::Result<HopfieldNetwork> {
        HopfieldNetwork::from_parts(self.weights, self.patterns.view())
    }

    pub fn neuron_count(&self) -> usize {
        self.weights.nrows()
    }

    pub fn pattern_count(&self) -> usize {
        self.patterns.ncols()
    }
}
