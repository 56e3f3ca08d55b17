// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Hopfield Experiments
//!
//! Statistical measurements over freshly trained random networks:
//! - [`trajectory`]: per-step state, Hamming distance and energy
//! - [`recall`]: bit error rate of stored patterns vs. load p/N
//! - [`spurious`]: probability of settling in a spurious state, at zero and
//!   finite temperature
//!
//! All randomness flows through the caller's RNG; every result row is
//! `serde::Serialize` for JSON export.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod load;
pub mod recall;
pub mod spurious;
pub mod trajectory;

pub use load::{linspace, pattern_count, LoadPoint};
pub use recall::{recall_error_rates, RecallExperiment, RecallRow};
pub use spurious::{
    finite_temperature_spurious_rates, is_spurious, spurious_state_rates, BetaRate,
    FiniteTemperatureExperiment, FiniteTemperatureRow, SpuriousExperiment, SpuriousRow,
};
pub use trajectory::{record_trajectory, TrajectoryFrame};

use hopfield_engine::EngineError;
use thiserror::Error;

/// Experiment errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExperimentError {
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("Invalid experiment parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, ExperimentError>;

pub(crate) fn require_positive(name: &'static str, value: usize) -> Result<()> {
    if value == 0 {
        return Err(ExperimentError::InvalidParameter {
            name,
            reason: "must be positive".to_string(),
        });
    }
    Ok(())
}
