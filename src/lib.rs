// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Hopfield Network
//!
//! Discrete-time Hopfield associative memory: bipolar patterns are stored in
//! a symmetric Hebbian weight matrix and recalled by sign or thermal
//! (Glauber) dynamics that descend the network energy.
//!
//! ## Feature Flags
//! - **`serialization`** (default): network file format
//! - **`experiments`** (default): error-rate and spurious-state sweeps
//! - **`file-logging`**: rolling log file next to console output
//!
//! ## Usage
//!
//! ```rust
//! use hopfield_network::prelude::*;
//!
//! let mut rng = seeded_rng(Some(1));
//! let mut network = HopfieldNetwork::new(64)?;
//! network.train_batch(random_patterns(64, 3, &mut rng).view())?;
//!
//! let target = network.pattern(0).unwrap().clone();
//! network.set_state(mask_first_half(target.view()).view())?;
//! let outcome = network.relax(UpdateMode::Asynchronous, 100, &mut rng);
//!
//! assert!(outcome.is_fixed_point());
//! assert!(network.is_current_state_stable());
//! # Ok::<(), EngineError>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Foundation: hopfield-config, hopfield-observability    │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  Core: hopfield-engine                                  │
//! │  (Hebbian storage, dynamics, energy)                    │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  hopfield-serialization      hopfield-experiments       │
//! │  (network files)             (statistical sweeps)       │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## License
//!
//! Apache-2.0

pub use hopfield_config as config;
pub use hopfield_engine as engine;
pub use hopfield_observability as observability;

#[cfg(feature = "serialization")]
pub use hopfield_serialization as serialization;

#[cfg(feature = "experiments")]
pub use hopfield_experiments as experiments;

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude - commonly used types and functions
pub mod prelude {
    pub use crate::engine::patterns::{
        corrupt, hamming_distance, inversion_distance, mask_first_half, nearest_pattern,
        random_pattern, random_patterns,
    };
    pub use crate::engine::rng::seeded_rng;
    pub use crate::engine::{
        Convergence, Dynamics, EngineError, HopfieldNetwork, Pattern, UpdateMode,
    };

    pub use crate::config::{load_config, validate_config, HopfieldConfig};

    #[cfg(feature = "serialization")]
    pub use crate::serialization::{load_network, save_network, NetworkSnapshot};

    #[cfg(feature = "experiments")]
    pub use crate::experiments::{
        finite_temperature_spurious_rates, recall_error_rates, record_trajectory,
        spurious_state_rates,
    };
}
