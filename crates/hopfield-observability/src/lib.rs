// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # hopfield-observability
//!
//! Logging setup shared by the Hopfield crates and the `hopfield` binary,
//! with per-crate debug flag support.
//!
//! ## Features
//! - `file-logging`: daily-rolling JSON log file under a timestamped run folder

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod config;
pub mod init;

pub use cli::*;
pub use config::*;
pub use init::*;

/// Workspace crate names accepted by `--debug-{crate}`
pub const KNOWN_CRATES: &[&str] = &[
    "hopfield-engine",
    "hopfield-serialization",
    "hopfield-config",
    "hopfield-experiments",
    "hopfield-network",
    "hopfield",
];
