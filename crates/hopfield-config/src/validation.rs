// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration validation
//!
//! All problems are collected and reported together in a single
//! `ConfigError::ValidationError`.

use crate::{ConfigError, ConfigResult, HopfieldConfig, LoadRange};

const KNOWN_MODES: [&str; 4] = ["sync", "synchronous", "async", "asynchronous"];
const KNOWN_FORMATS: [&str; 2] = ["text", "json"];
const KNOWN_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validation errors that can occur during config validation
#[derive(Debug, Clone)]
pub enum ConfigValidationError {
    MissingRequired { field: String },
    InvalidValue { field: String, reason: String },
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingRequired { field } => {
                write!(f, "Missing required configuration: {}", field)
            }
            Self::InvalidValue { field, reason } => {
                write!(f, "Invalid configuration value for {}: {}", field, reason)
            }
        }
    }
}

fn invalid(errors: &mut Vec<ConfigValidationError>, field: &str, reason: &str) {
    errors.push(ConfigValidationError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    });
}

/// Validate the complete configuration
///
/// # Errors
///
/// Returns `ConfigError::ValidationError` listing every failed check
pub fn validate_config(config: &HopfieldConfig) -> ConfigResult<()> {
    let mut errors = Vec::new();

    validate_network(config, &mut errors);
    validate_dynamics(config, &mut errors);
    validate_experiments(config, &mut errors);
    validate_logging(config, &mut errors);

    if !errors.is_empty() {
        let error_messages = errors
            .iter()
            .map(|e| format!("  - {}", e))
            .collect::<Vec<_>>()
            .join("\n");

        return Err(ConfigError::ValidationError(format!(
            "Configuration validation failed:\n{}",
            error_messages
        )));
    }

    Ok(())
}

fn validate_network(config: &HopfieldConfig, errors: &mut Vec<ConfigValidationError>) {
    if config.network.neuron_count == 0 {
        invalid(errors, "network.neuron_count", "must be positive");
    }
}

fn validate_dynamics(config: &HopfieldConfig, errors: &mut Vec<ConfigValidationError>) {
    let mode = config.dynamics.mode.to_ascii_lowercase();
    if mode.is_empty() {
        errors.push(ConfigValidationError::MissingRequired {
            field: "dynamics.mode".to_string(),
        });
    } else if !KNOWN_MODES.contains(&mode.as_str()) {
        invalid(errors, "dynamics.mode", "must be 'sync' or 'async'");
    }

    let beta = config.dynamics.beta;
    if !beta.is_finite() || beta < 0.0 {
        invalid(errors, "dynamics.beta", "must be finite and non-negative");
    }
    if config.dynamics.max_relaxation_sweeps == 0 {
        invalid(errors, "dynamics.max_relaxation_sweeps", "must be positive");
    }
}

fn validate_load_range(
    field: &str,
    range: &LoadRange,
    errors: &mut Vec<ConfigValidationError>,
) {
    if range.points == 0 {
        invalid(errors, field, "points must be positive");
    }
    if !(range.start > 0.0 && range.start <= range.end) || !range.end.is_finite() {
        invalid(errors, field, "requires 0 < start <= end");
    }
}

fn validate_experiments(config: &HopfieldConfig, errors: &mut Vec<ConfigValidationError>) {
    let experiments = &config.experiments;

    if experiments.trials == 0 {
        invalid(errors, "experiments.trials", "must be positive");
    }
    if experiments.probes == 0 {
        invalid(errors, "experiments.probes", "must be positive");
    }
    if !(0.0..=1.0).contains(&experiments.corruption) {
        invalid(errors, "experiments.corruption", "must be between 0.0 and 1.0");
    }
    if !(0.0..=0.5).contains(&experiments.spurious_threshold) {
        invalid(
            errors,
            "experiments.spurious_threshold",
            "must be between 0.0 and 0.5",
        );
    }
    if experiments
        .betas
        .iter()
        .any(|beta| !beta.is_finite() || *beta < 0.0)
    {
        invalid(errors, "experiments.betas", "every beta must be finite and non-negative");
    }

    validate_load_range("experiments.recall_load", &experiments.recall_load, errors);
    validate_load_range(
        "experiments.spurious_load",
        &experiments.spurious_load,
        errors,
    );
}

fn validate_logging(config: &HopfieldConfig, errors: &mut Vec<ConfigValidationError>) {
    let level = config.logging.level.to_ascii_lowercase();
    if !KNOWN_LEVELS.contains(&level.as_str()) {
        invalid(
            errors,
            "logging.level",
            "must be one of trace, debug, info, warn, error",
        );
    }
    let format = config.logging.format.to_ascii_lowercase();
    if !KNOWN_FORMATS.contains(&format.as_str()) {
        invalid(errors, "logging.format", "must be 'text' or 'json'");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = HopfieldConfig::default();
        let result = validate_config(&config);
        if let Err(e) = &result {
            eprintln!("Validation error: {}", e);
        }
        assert!(result.is_ok());
    }

    #[test]
    fn test_invalid_mode() {
        let mut config = HopfieldConfig::default();
        config.dynamics.mode = "parallel".to_string();

        let result = validate_config(&config);
        assert!(result.is_err());
        if let Err(ConfigError::ValidationError(msg)) = result {
            assert!(msg.contains("dynamics.mode"));
        }
    }

    #[test]
    fn test_mode_is_case_insensitive() {
        let mut config = HopfieldConfig::default();
        config.dynamics.mode = "SYNC".to_string();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_errors_are_collected() {
        let mut config = HopfieldConfig::default();
        config.network.neuron_count = 0;
        config.dynamics.beta = -1.0;
        config.experiments.corruption = 1.5;

        let result = validate_config(&config);
        if let Err(ConfigError::ValidationError(msg)) = result {
            assert!(msg.contains("network.neuron_count"));
            assert!(msg.contains("dynamics.beta"));
            assert!(msg.contains("experiments.corruption"));
        } else {
            panic!("expected validation error");
        }
    }

    #[test]
    fn test_invalid_load_range() {
        let mut config = HopfieldConfig::default();
        config.experiments.spurious_load = LoadRange {
            start: 0.3,
            end: 0.1,
            points: 0,
        };

        let result = validate_config(&config);
        if let Err(ConfigError::ValidationError(msg)) = result {
            assert!(msg.contains("experiments.spurious_load"));
            assert!(msg.contains("points must be positive"));
        } else {
            panic!("expected validation error");
        }
    }

    #[test]
    fn test_zero_beta_is_valid() {
        let mut config = HopfieldConfig::default();
        config.dynamics.beta = 0.0;
        config.experiments.betas = vec![0.0, 2.0];
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_invalid_log_format() {
        let mut config = HopfieldConfig::default();
        config.logging.format = "xml".to_string();
        assert!(validate_config(&config).is_err());
    }
}
