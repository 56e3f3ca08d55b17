// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! `hopfield` command-line tool
//!
//! Train and inspect network files, run recall demonstrations and the
//! statistical sweeps. Experiment results are printed to stdout as JSON;
//! logs go to stderr.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{info, warn};

use hopfield_network::config::{
    apply_cli_overrides, apply_environment_overrides, load_config, validate_config, ConfigError,
    HopfieldConfig,
};
use hopfield_network::engine::patterns::{
    corrupt, hamming_distance, inversion_distance, mask_first_half, nearest_pattern,
    random_patterns,
};
use hopfield_network::engine::rng::seeded_rng;
use hopfield_network::engine::{Convergence, HopfieldNetwork, Pattern, UpdateMode};
use hopfield_network::experiments::{
    finite_temperature_spurious_rates, recall_error_rates, record_trajectory,
    spurious_state_rates, FiniteTemperatureExperiment, RecallExperiment, SpuriousExperiment,
};
use hopfield_network::observability::{
    debug_flags_help, init_logging, parse_debug_flags, LogFormat, LoggingSettings,
};
use hopfield_network::serialization::{load_network, save_network};

/// Hopfield associative memory - training, recall and capacity experiments
#[derive(Parser, Debug)]
#[command(name = "hopfield", version, author, long_about = None, after_help = debug_flags_help())]
struct Args {
    /// Path to hopfield_configuration.toml (searched for when omitted)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Random seed (overrides [random].seed)
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Log level (overrides [logging].level)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Train a network on random patterns and save it
    Train {
        /// Number of random patterns to store
        #[arg(short, long)]
        patterns: usize,

        /// Neuron count (overrides [network].neuron_count)
        #[arg(short, long)]
        neurons: Option<usize>,

        /// Output file (relative paths resolve against [storage].data_dir)
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Print shape, pattern energies and stability of a network file
    Inspect {
        file: PathBuf,
    },

    /// Probe a stored pattern and relax the network
    Recall {
        file: PathBuf,

        /// Stored pattern to probe
        #[arg(short, long, default_value_t = 0)]
        pattern: usize,

        /// Fraction of bits to flip (defaults to [experiments].corruption)
        #[arg(long, conflicts_with = "mask")]
        corruption: Option<f64>,

        /// Inhibit the first half of the neurons instead of flipping bits
        #[arg(long, default_value_t = false)]
        mask: bool,

        /// Update schedule (overrides [dynamics].mode)
        #[arg(long)]
        mode: Option<UpdateMode>,

        /// Run [experiments].iterations thermal steps at [dynamics].beta
        /// instead of relaxing to a fixed point
        #[arg(long, default_value_t = false)]
        finite_temperature: bool,
    },

    /// Period-2 oscillation of synchronous dynamics on a 4-neuron network
    Oscillation {
        #[arg(long, default_value_t = 6)]
        steps: u64,
    },

    /// Recall error rate vs. load p/N (JSON)
    ErrorRates {
        /// Fresh networks per load ratio (overrides [experiments].trials)
        #[arg(long)]
        trials: Option<usize>,
    },

    /// Spurious-state probability vs. load p/N (JSON)
    Spurious {
        /// Fresh networks per load ratio (overrides [experiments].trials)
        #[arg(long)]
        trials: Option<usize>,

        /// Random initial states per network (overrides [experiments].probes)
        #[arg(long)]
        probes: Option<usize>,

        /// Fixed-length runs at zero and each configured beta
        #[arg(long, default_value_t = false)]
        finite_temperature: bool,
    },
}

#[derive(Serialize)]
struct PatternReport {
    index: usize,
    energy: f64,
    stable: bool,
}

#[derive(Serialize)]
struct RecallReport {
    pattern: usize,
    mode: UpdateMode,
    initial_distance: usize,
    final_distance: usize,
    final_inversion_distance: usize,
    nearest_pattern: Option<usize>,
    /// Set for finite-temperature runs
    #[serde(skip_serializing_if = "Option::is_none")]
    beta: Option<f64>,
    /// Set for zero-temperature relaxation
    #[serde(skip_serializing_if = "Option::is_none")]
    outcome: Option<Convergence>,
    time: u64,
    energy: f64,
}

fn main() -> Result<()> {
    // `--debug-{crate}` flags are consumed here so clap never sees them
    let (debug_args, cli_args): (Vec<String>, Vec<String>) =
        std::env::args().partition(|arg| arg.starts_with("--debug-"));
    let debug_flags = parse_debug_flags(debug_args);

    let args = Args::parse_from(cli_args);
    let config = resolve_config(&args)?;

    let format: LogFormat = config.logging.format.parse()?;
    let settings = LoggingSettings::new(&config.logging.level, format)
        .with_log_dir(config.logging.log_dir.clone());
    let _logging = init_logging(&settings, &debug_flags)?;

    let mut rng = seeded_rng(config.random.seed);
    info!(seed = ?config.random.seed, command = ?args.command, "Starting");

    match args.command {
        Command::Train {
            patterns,
            neurons,
            output,
        } => {
            let n = neurons.unwrap_or(config.network.neuron_count);
            let mut network = HopfieldNetwork::new(n)?;
            network.train_batch(random_patterns(n, patterns, &mut rng).view())?;

            let path = resolve_output(&config, &output)?;
            save_network(&network, &path, config.storage.compression)?;
            println!(
                "Saved network: {} neurons, {} patterns -> {}",
                n,
                patterns,
                path.display()
            );
        }

        Command::Inspect { file } => {
            let network = load_network(&file)
                .with_context(|| format!("Failed to load network {}", file.display()))?;
            println!("Neurons:  {}", network.neuron_count());
            println!("Patterns: {}", network.pattern_count());
            println!(
                "Load p/N: {:.4}",
                network.pattern_count() as f64 / network.neuron_count() as f64
            );

            let reports = network
                .patterns()
                .iter()
                .enumerate()
                .map(|(index, pattern)| -> Result<PatternReport> {
                    Ok(PatternReport {
                        index,
                        energy: network.energy(pattern.view())?,
                        stable: network.is_stable(pattern.view())?,
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            println!("{}", serde_json::to_string_pretty(&reports)?);
        }

        Command::Recall {
            file,
            pattern,
            corruption,
            mask,
            mode,
            finite_temperature,
        } => {
            let mut network = load_network(&file)
                .with_context(|| format!("Failed to load network {}", file.display()))?;
            let Some(target) = network.pattern(pattern).cloned() else {
                bail!(
                    "Pattern {} not stored (network holds {})",
                    pattern,
                    network.pattern_count()
                );
            };

            let probe = if mask {
                mask_first_half(target.view())
            } else {
                let fraction = corruption.unwrap_or(config.experiments.corruption);
                corrupt(target.view(), fraction, &mut rng)?
            };
            let mode = match mode {
                Some(mode) => mode,
                None => config.dynamics.mode.parse()?,
            };

            network.set_state(probe.view())?;
            let (beta, outcome) = if finite_temperature {
                let beta = config.dynamics.beta;
                network.update_with_temperature(
                    config.experiments.iterations,
                    mode,
                    beta,
                    &mut rng,
                )?;
                (Some(beta), None)
            } else {
                let outcome = network.relax(mode, config.dynamics.max_relaxation_sweeps, &mut rng);
                (None, Some(outcome))
            };
            let report = RecallReport {
                pattern,
                mode,
                initial_distance: hamming_distance(probe.view(), target.view()),
                final_distance: hamming_distance(network.state(), target.view()),
                final_inversion_distance: inversion_distance(network.state(), target.view()),
                nearest_pattern: nearest_pattern(network.state(), network.pattern_matrix().view())
                    .map(|(index, _)| index),
                beta,
                outcome,
                time: network.time(),
                energy: network.current_energy(),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }

        Command::Oscillation { steps } => {
            let first = Pattern::try_from(vec![1, 1, -1, -1])?;
            let mut network = HopfieldNetwork::new(4)?;
            network.train(&first)?;
            network.train(&Pattern::try_from(vec![1, -1, 1, -1])?)?;
            network.set_state_from_slice(&[1, -1, -1, -1])?;

            let frames = record_trajectory(
                &mut network,
                steps,
                UpdateMode::Synchronous,
                first.view(),
                &mut rng,
            )?;
            println!("{}", serde_json::to_string_pretty(&frames)?);
        }

        Command::ErrorRates { trials } => {
            let mut experiment = RecallExperiment::from_config(&config);
            if let Some(trials) = trials {
                experiment.trials = trials;
            }
            let rows = recall_error_rates(&experiment, &mut rng)?;
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }

        Command::Spurious {
            trials,
            probes,
            finite_temperature,
        } => {
            if finite_temperature {
                let mut experiment = FiniteTemperatureExperiment::from_config(&config);
                experiment.trials = trials.unwrap_or(experiment.trials);
                experiment.probes = probes.unwrap_or(experiment.probes);
                let rows = finite_temperature_spurious_rates(&experiment, &mut rng)?;
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                let mut experiment = SpuriousExperiment::from_config(&config);
                experiment.trials = trials.unwrap_or(experiment.trials);
                experiment.probes = probes.unwrap_or(experiment.probes);
                let rows = spurious_state_rates(&experiment, &mut rng)?;
                println!("{}", serde_json::to_string_pretty(&rows)?);
            }
        }
    }

    Ok(())
}

/// File, environment and CLI tiers; built-in defaults when no file exists
fn resolve_config(args: &Args) -> Result<HopfieldConfig> {
    let mut overrides = HashMap::new();
    if let Some(seed) = args.seed {
        overrides.insert("seed".to_string(), seed.to_string());
    }
    if let Some(level) = &args.log_level {
        overrides.insert("log_level".to_string(), level.clone());
    }

    let config = match load_config(args.config.as_deref(), Some(&overrides)) {
        Ok(config) => config,
        Err(ConfigError::FileNotFound(_)) if args.config.is_none() => {
            // Logging is not up yet
            eprintln!("No hopfield_configuration.toml found; using built-in defaults");
            let mut config = HopfieldConfig::default();
            apply_environment_overrides(&mut config);
            apply_cli_overrides(&mut config, &overrides);
            config
        }
        Err(e) => return Err(e).context("Failed to load configuration"),
    };

    validate_config(&config)?;
    Ok(config)
}

fn resolve_output(config: &HopfieldConfig, output: &Path) -> Result<PathBuf> {
    if output.is_absolute() || output.parent().is_some_and(|p| !p.as_os_str().is_empty()) {
        return Ok(output.to_path_buf());
    }
    let dir = &config.storage.data_dir;
    if !dir.exists() {
        warn!(dir = %dir.display(), "Creating data directory");
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create data directory {}", dir.display()))?;
    }
    Ok(dir.join(output))
}
