// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Engine Types
//!
//! Core type definitions shared by the network engine and its collaborators.

pub mod error;
pub mod mode;
pub mod pattern;

pub use error::{EngineError, Error, Result};
pub use mode::{Convergence, Dynamics, UpdateMode};
pub use pattern::{validate_bipolar, validate_state, Pattern, ACTIVE, INHIBITED};
