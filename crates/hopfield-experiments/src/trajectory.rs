// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Step-by-step recording of a network's development

use hopfield_engine::patterns::hamming_distance;
use hopfield_engine::{EngineError, HopfieldNetwork, UpdateMode};
use ndarray::ArrayView1;
use rand::Rng;
use serde::Serialize;
use tracing::debug;

use crate::Result;

/// Frames reserved up front; longer recordings grow on demand
const PREALLOCATED_FRAMES: u64 = 1024;

fn frame_capacity(steps: u64) -> usize {
    steps.min(PREALLOCATED_FRAMES) as usize
}

/// Snapshot taken before each update
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrajectoryFrame {
    /// Steps since recording started
    pub step: u64,
    pub state: Vec<i8>,
    /// Plain Hamming distance to the reference pattern
    pub hamming_distance: usize,
    pub energy: f64,
}

/// Record `steps` frames, advancing the network one zero-temperature step
/// after each
///
/// The network is left `steps` updates further along.
pub fn record_trajectory<R: Rng + ?Sized>(
    network: &mut HopfieldNetwork,
    steps: u64,
    mode: UpdateMode,
    reference: ArrayView1<'_, i8>,
    rng: &mut R,
) -> Result<Vec<TrajectoryFrame>> {
    if reference.len() != network.neuron_count() {
        return Err(EngineError::DimensionMismatch {
            expected: network.neuron_count(),
            actual: reference.len(),
        }
        .into());
    }

    let mut frames = Vec::with_capacity(frame_capacity(steps));
    for step in 0..steps {
        let frame = TrajectoryFrame {
            step,
            state: network.state().to_vec(),
            hamming_distance: hamming_distance(reference, network.state()),
            energy: network.current_energy(),
        };
        debug!(step, distance = frame.hamming_distance, energy = frame.energy, "Trajectory frame");
        frames.push(frame);
        network.update(1, mode, false, rng);
    }
    Ok(frames)
}
