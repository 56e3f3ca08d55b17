// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Hopfield Network Engine
//!
//! Discrete-time Hopfield associative memory:
//! - **Types**: bipolar [`Pattern`], [`UpdateMode`], [`Dynamics`], [`Convergence`], errors
//! - **Hebbian**: outer-product weight construction
//! - **Dynamics**: sign rule, thermal (Glauber) rule, synchronous and asynchronous schedules
//! - **Network**: [`HopfieldNetwork`], owning weights, patterns, state and time
//! - **Patterns**: random generation, corruption, Hamming distances
//!
//! ## Example
//! ```
//! use hopfield_engine::{patterns, rng::seeded_rng, HopfieldNetwork, UpdateMode};
//!
//! let mut rng = seeded_rng(Some(7));
//! let mut network = HopfieldNetwork::new(100)?;
//! let xi = patterns::random_pattern(100, &mut rng);
//! network.train(&xi)?;
//!
//! let probe = patterns::corrupt(xi.view(), 0.1, &mut rng)?;
//! network.set_state(probe.view())?;
//! network.update(0, UpdateMode::Asynchronous, true, &mut rng);
//!
//! assert_eq!(patterns::inversion_distance(network.state(), xi.view()), 0);
//! # Ok::<(), hopfield_engine::EngineError>(())
//! ```

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod types;

pub mod dynamics;
pub mod hebbian;
pub mod network;
pub mod patterns;
pub mod rng;

pub use dynamics::{activation_probability, sign_0, SIGN_TOLERANCE};
pub use hebbian::{hebbian_matrix, hebbian_outer};
pub use network::HopfieldNetwork;
pub use types::{
    Convergence, Dynamics, EngineError, Error, Pattern, Result, UpdateMode, ACTIVE, INHIBITED,
};
