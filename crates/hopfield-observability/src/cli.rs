// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! CLI argument parsing for per-crate debug flags
//!
//! Supports flags like `--debug-hopfield-engine` or `--debug-all`.

use std::collections::BTreeSet;
use std::env;

use crate::KNOWN_CRATES;

/// Crates with debug logging switched on
///
/// # Example
/// ```rust
/// use hopfield_observability::CrateDebugFlags;
///
/// let flags = CrateDebugFlags::from_args(vec!["--debug-hopfield-engine".to_string()]);
/// assert!(flags.is_enabled("hopfield-engine"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrateDebugFlags {
    enabled_crates: BTreeSet<String>,
}

impl CrateDebugFlags {
    /// Parse `--debug-{crate-name}` and `--debug-all` arguments; others are ignored
    pub fn from_args<I>(args: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut flags = CrateDebugFlags::default();
        for arg in args {
            if arg == "--debug-all" {
                flags.enable_all();
            } else if let Some(crate_name) = arg.strip_prefix("--debug-") {
                flags.enable(crate_name);
            }
        }
        flags
    }

    /// Parse the `HOPFIELD_DEBUG` format: `all` or comma-separated crate names
    pub fn from_env_value(value: &str) -> Self {
        let mut flags = CrateDebugFlags::default();
        if value.trim() == "all" {
            flags.enable_all();
            return flags;
        }
        for crate_name in value.split(',') {
            let crate_name = crate_name.trim();
            if !crate_name.is_empty() {
                flags.enable(crate_name);
            }
        }
        flags
    }

    pub fn enable(&mut self, crate_name: &str) {
        self.enabled_crates.insert(crate_name.to_string());
    }

    pub fn enable_all(&mut self) {
        for crate_name in KNOWN_CRATES {
            self.enable(crate_name);
        }
    }

    /// Union of two flag sets
    pub fn merge(&mut self, other: CrateDebugFlags) {
        self.enabled_crates.extend(other.enabled_crates);
    }

    pub fn is_enabled(&self, crate_name: &str) -> bool {
        self.enabled_crates.contains(crate_name)
    }

    pub fn enabled_crates(&self) -> impl Iterator<Item = &str> {
        self.enabled_crates.iter().map(String::as_str)
    }

    pub fn any_enabled(&self) -> bool {
        !self.enabled_crates.is_empty()
    }

    /// `DEBUG` for enabled crates, `INFO` otherwise
    pub fn log_level(&self, crate_name: &str) -> tracing::Level {
        if self.is_enabled(crate_name) {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }

    /// `EnvFilter` directives, e.g. `hopfield_engine=debug,info`
    ///
    /// Crate names are mapped to tracing targets (hyphens become underscores).
    pub fn to_filter_string(&self) -> String {
        self.filter_with_default("info")
    }

    /// Same as [`Self::to_filter_string`] with a custom default level
    pub fn filter_with_default(&self, default_level: &str) -> String {
        let mut filters: Vec<String> = self
            .enabled_crates
            .iter()
            .map(|crate_name| format!("{}=debug", crate_name.replace('-', "_")))
            .collect();
        filters.push(default_level.to_string());
        filters.join(",")
    }
}

/// Debug flags from `--debug-*` arguments merged with `HOPFIELD_DEBUG`
pub fn parse_debug_flags<I>(args: I) -> CrateDebugFlags
where
    I: IntoIterator<Item = String>,
{
    let mut flags = CrateDebugFlags::from_args(args);
    if let Ok(env_var) = env::var("HOPFIELD_DEBUG") {
        flags.merge(CrateDebugFlags::from_env_value(&env_var));
    }
    flags
}

/// Generate help text for debug flags
pub fn debug_flags_help() -> String {
    format!(
        r#"Debug Flags:
  --debug-all                    Enable debug logging for all crates
  --debug-{{crate-name}}          Enable debug logging for specific crate

Available crates:
  {}

Environment Variable:
  HOPFIELD_DEBUG={{crate-name}}[,{{crate-name}}]  Enable debug for crates (comma-separated)
  HOPFIELD_DEBUG=all                               Enable debug for all crates
"#,
        KNOWN_CRATES.join(", ")
    )
}
