// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Spurious-state probability as a function of load p/N
//!
//! A state is spurious when its normalised inversion distance to every
//! stored pattern exceeds the threshold.

use hopfield_config::HopfieldConfig;
use hopfield_engine::patterns::{nearest_pattern, random_pattern, random_patterns};
use hopfield_engine::{Dynamics, HopfieldNetwork, UpdateMode};
use rand::Rng;
use serde::Serialize;
use tracing::{debug, info};

use crate::load::{ratios, LoadPoint};
use crate::{require_positive, ExperimentError, Result};

/// Whether the current state is farther than `threshold · N` from every
/// stored pattern and its inversion
pub fn is_spurious(network: &HopfieldNetwork, threshold: f64) -> bool {
    let n = network.neuron_count() as f64;
    match nearest_pattern(network.state(), network.pattern_matrix().view()) {
        Some((_, distance)) => distance as f64 / n > threshold,
        None => true,
    }
}

fn check_threshold(threshold: f64) -> Result<()> {
    if !(0.0..=0.5).contains(&threshold) {
        return Err(ExperimentError::InvalidParameter {
            name: "spurious_threshold",
            reason: format!("{} is outside [0, 0.5]", threshold),
        });
    }
    Ok(())
}

fn trained_network<R: Rng + ?Sized>(n: usize, p: usize, rng: &mut R) -> Result<HopfieldNetwork> {
    let mut network = HopfieldNetwork::new(n)?;
    network.train_batch(random_patterns(n, p, rng).view())?;
    Ok(network)
}

/// Zero-temperature asynchronous relaxation from random states
#[derive(Debug, Clone, PartialEq)]
pub struct SpuriousExperiment {
    pub neuron_count: usize,
    pub load_ratios: Vec<f64>,
    /// Fresh networks per load ratio
    pub trials: usize,
    /// Random initial states per network
    pub probes: usize,
    pub threshold: f64,
    pub max_relaxation_sweeps: u64,
}

impl SpuriousExperiment {
    pub fn from_config(config: &HopfieldConfig) -> Self {
        Self {
            neuron_count: config.network.neuron_count,
            load_ratios: ratios(&config.experiments.spurious_load),
            trials: config.experiments.trials,
            probes: config.experiments.probes,
            threshold: config.experiments.spurious_threshold,
            max_relaxation_sweeps: config.dynamics.max_relaxation_sweeps,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpuriousRow {
    pub load_ratio: f64,
    pub pattern_count: usize,
    pub spurious_probability: f64,
}

pub fn spurious_state_rates<R: Rng + ?Sized>(
    experiment: &SpuriousExperiment,
    rng: &mut R,
) -> Result<Vec<SpuriousRow>> {
    require_positive("trials", experiment.trials)?;
    require_positive("probes", experiment.probes)?;
    check_threshold(experiment.threshold)?;
    let n = experiment.neuron_count;
    let points = LoadPoint::sweep(&experiment.load_ratios, n)?;
    info!(
        neuron_count = n,
        points = points.len(),
        trials = experiment.trials,
        probes = experiment.probes,
        "Starting spurious-state sweep"
    );

    let mut rows = Vec::with_capacity(points.len());
    for point in points {
        let mut spurious = 0usize;
        for _ in 0..experiment.trials {
            let mut network = trained_network(n, point.pattern_count, rng)?;
            for _ in 0..experiment.probes {
                network.set_state(random_pattern(n, rng).view())?;
                network.relax(
                    UpdateMode::Asynchronous,
                    experiment.max_relaxation_sweeps,
                    rng,
                );
                if is_spurious(&network, experiment.threshold) {
                    spurious += 1;
                }
            }
        }
        let row = SpuriousRow {
            load_ratio: point.load_ratio,
            pattern_count: point.pattern_count,
            spurious_probability: spurious as f64
                / (experiment.trials * experiment.probes) as f64,
        };
        debug!(?row, "Spurious load point done");
        rows.push(row);
    }
    Ok(rows)
}

/// Fixed-length asynchronous runs at zero and at each finite temperature,
/// all from the same initial state per network
#[derive(Debug, Clone, PartialEq)]
pub struct FiniteTemperatureExperiment {
    pub neuron_count: usize,
    pub load_ratios: Vec<f64>,
    pub trials: usize,
    pub probes: usize,
    /// Steps per run
    pub iterations: u64,
    pub betas: Vec<f64>,
    pub threshold: f64,
}

impl FiniteTemperatureExperiment {
    pub fn from_config(config: &HopfieldConfig) -> Self {
        Self {
            neuron_count: config.network.neuron_count,
            load_ratios: ratios(&config.experiments.spurious_load),
            trials: config.experiments.trials,
            probes: config.experiments.probes,
            iterations: config.experiments.iterations,
            betas: config.experiments.betas.clone(),
            threshold: config.experiments.spurious_threshold,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BetaRate {
    pub beta: f64,
    pub spurious_probability: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FiniteTemperatureRow {
    pub load_ratio: f64,
    pub pattern_count: usize,
    pub zero_temperature: f64,
    /// Same order as the experiment's betas
    pub thermal: Vec<BetaRate>,
}

pub fn finite_temperature_spurious_rates<R: Rng + ?Sized>(
    experiment: &FiniteTemperatureExperiment,
    rng: &mut R,
) -> Result<Vec<FiniteTemperatureRow>> {
    require_positive("trials", experiment.trials)?;
    require_positive("probes", experiment.probes)?;
    check_threshold(experiment.threshold)?;
    let thermal: Vec<Dynamics> = experiment
        .betas
        .iter()
        .map(|&beta| Dynamics::thermal(beta))
        .collect::<hopfield_engine::Result<_>>()?;

    let n = experiment.neuron_count;
    let points = LoadPoint::sweep(&experiment.load_ratios, n)?;
    info!(
        neuron_count = n,
        points = points.len(),
        betas = experiment.betas.len(),
        iterations = experiment.iterations,
        "Starting finite-temperature spurious-state sweep"
    );

    let mode = UpdateMode::Asynchronous;
    let mut rows = Vec::with_capacity(points.len());
    for point in points {
        let mut zero_count = 0usize;
        let mut thermal_counts = vec![0usize; thermal.len()];

        for _ in 0..experiment.trials {
            let mut network = trained_network(n, point.pattern_count, rng)?;
            let initial = random_pattern(n, rng);
            for _ in 0..experiment.probes {
                network.set_state(initial.view())?;
                network.advance(experiment.iterations, mode, Dynamics::ZeroTemperature, rng);
                if is_spurious(&network, experiment.threshold) {
                    zero_count += 1;
                }

                for (count, &dynamics) in thermal_counts.iter_mut().zip(&thermal) {
                    network.set_state(initial.view())?;
                    network.advance(experiment.iterations, mode, dynamics, rng);
                    if is_spurious(&network, experiment.threshold) {
                        *count += 1;
                    }
                }
            }
        }

        let samples = (experiment.trials * experiment.probes) as f64;
        let row = FiniteTemperatureRow {
            load_ratio: point.load_ratio,
            pattern_count: point.pattern_count,
            zero_temperature: zero_count as f64 / samples,
            thermal: experiment
                .betas
                .iter()
                .zip(&thermal_counts)
                .map(|(&beta, &count)| BetaRate {
                    beta,
                    spurious_probability: count as f64 / samples,
                })
                .collect(),
        };
        debug!(load_ratio = row.load_ratio, zero = row.zero_temperature, "Finite-temperature load point done");
        rows.push(row);
    }
    Ok(rows)
}
