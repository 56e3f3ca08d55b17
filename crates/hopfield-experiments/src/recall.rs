// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Recall error rate of stored patterns as a function of load p/N
//!
//! For each load ratio and trial a fresh network is trained on random
//! patterns. Each stored pattern is used as the initial state and the
//! fraction of wrong bits is measured after one step and after relaxation,
//! for both schedules.

use hopfield_config::HopfieldConfig;
use hopfield_engine::patterns::{hamming_distance, random_patterns};
use hopfield_engine::{Convergence, HopfieldNetwork, UpdateMode};
use rand::Rng;
use serde::Serialize;
use tracing::{debug, info};

use crate::load::{ratios, LoadPoint};
use crate::{require_positive, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct RecallExperiment {
    pub neuron_count: usize,
    pub load_ratios: Vec<f64>,
    pub trials: usize,
    /// Ceiling passed to `HopfieldNetwork::relax`
    pub max_relaxation_sweeps: u64,
}

impl RecallExperiment {
    pub fn from_config(config: &HopfieldConfig) -> Self {
        Self {
            neuron_count: config.network.neuron_count,
            load_ratios: ratios(&config.experiments.recall_load),
            trials: config.experiments.trials,
            max_relaxation_sweeps: config.dynamics.max_relaxation_sweeps,
        }
    }
}

/// Error rates for one load ratio, averaged over trials and patterns
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecallRow {
    pub load_ratio: f64,
    pub pattern_count: usize,
    pub async_one_step_error: f64,
    pub async_relaxed_error: f64,
    pub sync_one_step_error: f64,
    pub sync_relaxed_error: f64,
    /// Mean `time` at the end of relaxation (includes the first step)
    pub async_relaxation_time: f64,
    pub sync_relaxation_time: f64,
    /// Relaxations that hit the sweep ceiling
    pub unsettled_relaxations: usize,
}

#[derive(Default)]
struct Tally {
    wrong_bits: [usize; 4],
    time: [u64; 2],
    unsettled: usize,
}

/// Run the sweep; one row per load ratio, in input order
pub fn recall_error_rates<R: Rng + ?Sized>(
    experiment: &RecallExperiment,
    rng: &mut R,
) -> Result<Vec<RecallRow>> {
    require_positive("trials", experiment.trials)?;
    require_positive("max_relaxation_sweeps", experiment.max_relaxation_sweeps as usize)?;
    let n = experiment.neuron_count;
    let points = LoadPoint::sweep(&experiment.load_ratios, n)?;
    info!(
        neuron_count = n,
        points = points.len(),
        trials = experiment.trials,
        "Starting recall error-rate sweep"
    );

    let mut rows = Vec::with_capacity(points.len());
    for point in points {
        let p = point.pattern_count;
        let mut tally = Tally::default();

        for _ in 0..experiment.trials {
            let mut network = HopfieldNetwork::new(n)?;
            network.train_batch(random_patterns(n, p, rng).view())?;

            let stored = network.patterns().to_vec();
            for xi in &stored {
                let schedules = [
                    (UpdateMode::Asynchronous, 0usize),
                    (UpdateMode::Synchronous, 1usize),
                ];
                for (mode, slot) in schedules {
                    network.set_state(xi.view())?;
                    network.update(1, mode, false, rng);
                    tally.wrong_bits[2 * slot] += hamming_distance(network.state(), xi.view());

                    let outcome = network.relax(mode, experiment.max_relaxation_sweeps, rng);
                    if let Convergence::Exhausted { .. } = outcome {
                        tally.unsettled += 1;
                    }
                    tally.wrong_bits[2 * slot + 1] +=
                        hamming_distance(network.state(), xi.view());
                    tally.time[slot] += network.time();
                }
            }
        }

        let samples = (p * experiment.trials) as f64;
        let bits = samples * n as f64;
        let row = RecallRow {
            load_ratio: point.load_ratio,
            pattern_count: p,
            async_one_step_error: tally.wrong_bits[0] as f64 / bits,
            async_relaxed_error: tally.wrong_bits[1] as f64 / bits,
            sync_one_step_error: tally.wrong_bits[2] as f64 / bits,
            sync_relaxed_error: tally.wrong_bits[3] as f64 / bits,
            async_relaxation_time: tally.time[0] as f64 / samples,
            sync_relaxation_time: tally.time[1] as f64 / samples,
            unsettled_relaxations: tally.unsettled,
        };
        debug!(?row, "Recall load point done");
        rows.push(row);
    }
    Ok(rows)
}
