// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration type definitions
//!
//! Each struct maps to a section of `hopfield_configuration.toml`. Every
//! section is `#[serde(default)]`, so a partial file only overrides the keys
//! it names.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct HopfieldConfig {
    pub network: NetworkConfig,
    pub dynamics: DynamicsConfig,
    pub random: RandomConfig,
    pub experiments: ExperimentsConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

/// Network shape
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub neuron_count: usize,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self { neuron_count: 25 }
    }
}

/// Update schedule and temperature
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DynamicsConfig {
    /// "sync" or "async"
    pub mode: String,
    /// Inverse temperature for thermal updates
    pub beta: f64,
    /// Upper bound on sweeps when relaxing to a fixed point
    pub max_relaxation_sweeps: u64,
}

impl Default for DynamicsConfig {
    fn default() -> Self {
        Self {
            mode: "async".to_string(),
            beta: 10000.0,
            max_relaxation_sweeps: 1000,
        }
    }
}

/// Random source; `None` seeds from OS entropy
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RandomConfig {
    pub seed: Option<u64>,
}

/// Inclusive, evenly spaced range of load ratios p/N
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LoadRange {
    pub start: f64,
    pub end: f64,
    pub points: usize,
}

/// Statistical experiment parameters
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ExperimentsConfig {
    /// Fresh networks trained per load ratio
    pub trials: usize,
    /// Random probes per trained network
    pub probes: usize,
    /// Fixed step count for finite-temperature runs
    pub iterations: u64,
    /// Fraction of bits flipped in recall probes
    pub corruption: f64,
    /// Normalised inversion distance above which a state counts as spurious
    pub spurious_threshold: f64,
    pub betas: Vec<f64>,
    pub recall_load: LoadRange,
    pub spurious_load: LoadRange,
}

impl Default for ExperimentsConfig {
    fn default() -> Self {
        Self {
            trials: 1,
            probes: 1,
            iterations: 20,
            corruption: 0.25,
            spurious_threshold: 0.05,
            betas: vec![2.0, 3.0, 5.0, 10.0, 20.0, 50.0, 100.0],
            recall_load: LoadRange {
                start: 0.1,
                end: 1.0,
                points: 46,
            },
            spurious_load: LoadRange {
                start: 0.01,
                end: 0.3,
                points: 30,
            },
        }
    }
}

/// Network file storage
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
    /// LZ4-compress saved networks
    pub compression: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            compression: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// "text" or "json"
    pub format: String,
    /// Base directory for per-run log files; no file output when unset
    pub log_dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
            log_dir: None,
        }
    }
}
