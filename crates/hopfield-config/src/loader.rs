// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration file loading with override support
//!
//! Three tiers, later ones winning:
//! 1. TOML file (base defaults)
//! 2. Environment variables (runtime overrides)
//! 3. CLI arguments (explicit user overrides)

use crate::{ConfigError, ConfigResult, HopfieldConfig};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "hopfield_configuration.toml";

/// Find the configuration file
///
/// Search order:
/// 1. `HOPFIELD_CONFIG_PATH` environment variable
/// 2. Current working directory
/// 3. Up to 5 parent directories
///
/// # Errors
///
/// Returns `ConfigError::FileNotFound` if no config file is found in any location
pub fn find_config_file() -> ConfigResult<PathBuf> {
    if let Ok(env_path) = env::var("HOPFIELD_CONFIG_PATH") {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return Ok(path);
        }
        return Err(ConfigError::FileNotFound(format!(
            "Config file specified by HOPFIELD_CONFIG_PATH not found: {}",
            path.display()
        )));
    }

    let mut search_paths = Vec::new();
    if let Ok(cwd) = env::current_dir() {
        search_paths.push(cwd.join(CONFIG_FILE_NAME));
        let mut current = cwd.as_path();
        for _ in 0..5 {
            match current.parent() {
                Some(parent) => {
                    search_paths.push(parent.join(CONFIG_FILE_NAME));
                    current = parent;
                }
                None => break,
            }
        }
    }

    if let Some(found) = search_paths.iter().find(|path| path.exists()) {
        return Ok(found.clone());
    }

    let search_list = search_paths
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::FileNotFound(format!(
        "'{}' not found in any of these locations:\n{}\n\nSet HOPFIELD_CONFIG_PATH environment variable to specify custom location.",
        CONFIG_FILE_NAME, search_list
    )))
}

/// Load configuration from TOML file
///
/// # Arguments
///
/// * `config_path` - Optional path to config file. If `None`, will search for config file.
/// * `cli_args` - Optional CLI argument overrides
///
/// # Errors
///
/// Returns error if config file is not found or contains invalid TOML.
/// Value checks are left to [`crate::validate_config`].
pub fn load_config(
    config_path: Option<&Path>,
    cli_args: Option<&HashMap<String, String>>,
) -> ConfigResult<HopfieldConfig> {
    let config_file = match config_path {
        Some(path) => path.to_path_buf(),
        None => find_config_file()?,
    };

    let content = fs::read_to_string(&config_file)?;
    let mut config: HopfieldConfig = toml::from_str(&content)?;

    apply_environment_overrides(&mut config);
    if let Some(cli) = cli_args {
        apply_cli_overrides(&mut config, cli);
    }

    Ok(config)
}

/// Apply environment variable overrides to configuration
///
/// Supported environment variables:
/// - `HOPFIELD_NEURON_COUNT` -> `network.neuron_count`
/// - `HOPFIELD_MODE` -> `dynamics.mode`
/// - `HOPFIELD_BETA` -> `dynamics.beta`
/// - `HOPFIELD_SEED` -> `random.seed`
/// - `HOPFIELD_LOG_LEVEL` -> `logging.level`
/// - `HOPFIELD_DATA_DIR` -> `storage.data_dir`
/// - `HOPFIELD_LOG_DIR` -> `logging.log_dir`
///
/// Unparseable numeric values are ignored.
pub fn apply_environment_overrides(config: &mut HopfieldConfig) {
    if let Ok(value) = env::var("HOPFIELD_NEURON_COUNT") {
        if let Ok(n) = value.parse::<usize>() {
            config.network.neuron_count = n;
        }
    }
    if let Ok(value) = env::var("HOPFIELD_MODE") {
        config.dynamics.mode = value;
    }
    if let Ok(value) = env::var("HOPFIELD_BETA") {
        if let Ok(beta) = value.parse::<f64>() {
            config.dynamics.beta = beta;
        }
    }
    if let Ok(value) = env::var("HOPFIELD_SEED") {
        if let Ok(seed) = value.parse::<u64>() {
            config.random.seed = Some(seed);
        }
    }
    if let Ok(value) = env::var("HOPFIELD_LOG_LEVEL") {
        config.logging.level = value;
    }
    if let Ok(value) = env::var("HOPFIELD_DATA_DIR") {
        config.storage.data_dir = PathBuf::from(value);
    }
    if let Ok(value) = env::var("HOPFIELD_LOG_DIR") {
        config.logging.log_dir = Some(PathBuf::from(value));
    }
}

/// Apply CLI argument overrides to configuration
///
/// Keys: `neuron_count`, `mode`, `beta`, `seed`, `log_level`, `log_format`,
/// `log_dir`, `data_dir`, `trials`, `probes`, `compression`.
pub fn apply_cli_overrides(config: &mut HopfieldConfig, cli_args: &HashMap<String, String>) {
    if let Some(value) = cli_args.get("neuron_count") {
        if let Ok(n) = value.parse::<usize>() {
            config.network.neuron_count = n;
        }
    }
    if let Some(value) = cli_args.get("mode") {
        config.dynamics.mode = value.clone();
    }
    if let Some(value) = cli_args.get("beta") {
        if let Ok(beta) = value.parse::<f64>() {
            config.dynamics.beta = beta;
        }
    }
    if let Some(value) = cli_args.get("seed") {
        if let Ok(seed) = value.parse::<u64>() {
            config.random.seed = Some(seed);
        }
    }
    if let Some(value) = cli_args.get("log_level") {
        config.logging.level = value.clone();
    }
    if let Some(value) = cli_args.get("log_format") {
        config.logging.format = value.clone();
    }
    if let Some(value) = cli_args.get("log_dir") {
        config.logging.log_dir = Some(PathBuf::from(value));
    }
    if let Some(value) = cli_args.get("data_dir") {
        config.storage.data_dir = PathBuf::from(value);
    }
    if let Some(value) = cli_args.get("trials") {
        if let Ok(trials) = value.parse::<usize>() {
            config.experiments.trials = trials;
        }
    }
    if let Some(value) = cli_args.get("probes") {
        if let Ok(probes) = value.parse::<usize>() {
            config.experiments.probes = probes;
        }
    }
    if let Some(value) = cli_args.get("compression") {
        config.storage.compression = value.to_lowercase() == "true" || value == "1";
    }
}
