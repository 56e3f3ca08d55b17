// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Load ratio sweeps

use hopfield_config::LoadRange;
use serde::Serialize;

use crate::{ExperimentError, Result};

/// `points` evenly spaced values from `start` to `end`, both inclusive
pub fn linspace(start: f64, end: f64, points: usize) -> Vec<f64> {
    match points {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (points - 1) as f64;
            (0..points)
                .map(|i| {
                    if i == points - 1 {
                        end
                    } else {
                        start + step * i as f64
                    }
                })
                .collect()
        }
    }
}

/// Number of stored patterns for a load ratio: `ceil(ratio · N)`
pub fn pattern_count(load_ratio: f64, neuron_count: usize) -> usize {
    (load_ratio * neuron_count as f64).ceil() as usize
}

/// One load ratio with its pattern count
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LoadPoint {
    pub load_ratio: f64,
    pub pattern_count: usize,
}

impl LoadPoint {
    pub fn sweep(ratios: &[f64], neuron_count: usize) -> Result<Vec<LoadPoint>> {
        ratios
            .iter()
            .map(|&load_ratio| {
                if !load_ratio.is_finite() || load_ratio <= 0.0 {
                    return Err(ExperimentError::InvalidParameter {
                        name: "load_ratio",
                        reason: format!("{} is not a positive finite ratio", load_ratio),
                    });
                }
                Ok(LoadPoint {
                    load_ratio,
                    pattern_count: pattern_count(load_ratio, neuron_count),
                })
            })
            .collect()
    }
}

/// Expand a configured range into its ratios
pub fn ratios(range: &LoadRange) -> Vec<f64> {
    linspace(range.start, range.end, range.points)
}
