// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Experiment sweep integration tests.

These tests validate:
- Experiments built from the default configuration cover the configured load ranges
- Rows serialize to JSON with stable field names
- The same seed reproduces the same statistics
*/

use hopfield_config::HopfieldConfig;
use hopfield_engine::rng::seeded_rng;
use hopfield_experiments::{
    finite_temperature_spurious_rates, recall_error_rates, spurious_state_rates,
    FiniteTemperatureExperiment, RecallExperiment, SpuriousExperiment,
};

fn small_config() -> HopfieldConfig {
    let mut config = HopfieldConfig::default();
    config.network.neuron_count = 20;
    config.experiments.recall_load.points = 3;
    config.experiments.spurious_load.points = 3;
    config.experiments.betas = vec![5.0, 100.0];
    config
}

#[test]
fn test_experiments_from_default_config() {
    let config = HopfieldConfig::default();

    let recall = RecallExperiment::from_config(&config);
    assert_eq!(recall.load_ratios.len(), 46);
    assert_eq!(recall.neuron_count, 25);

    let spurious = SpuriousExperiment::from_config(&config);
    assert_eq!(spurious.load_ratios.len(), 30);
    assert_eq!(spurious.threshold, 0.05);

    let thermal = FiniteTemperatureExperiment::from_config(&config);
    assert_eq!(thermal.iterations, 20);
    assert_eq!(thermal.betas.len(), 7);
}

#[test]
fn test_recall_rows_serialize() {
    let config = small_config();
    let mut rng = seeded_rng(Some(1));
    let rows = recall_error_rates(&RecallExperiment::from_config(&config), &mut rng).unwrap();
    assert_eq!(rows.len(), 3);

    let json = serde_json::to_value(&rows).unwrap();
    assert!(json[0]["async_relaxed_error"].is_number());
    assert!(json[2]["sync_relaxation_time"].is_number());
    for row in &rows {
        assert!((0.0..=1.0).contains(&row.async_one_step_error));
        assert!(row.async_relaxation_time >= 1.0);
    }
}

#[test]
fn test_same_seed_same_statistics() {
    let config = small_config();
    let experiment = SpuriousExperiment::from_config(&config);
    let run = |seed| spurious_state_rates(&experiment, &mut seeded_rng(Some(seed))).unwrap();
    assert_eq!(run(5), run(5));

    let thermal = FiniteTemperatureExperiment::from_config(&config);
    let run_thermal =
        |seed| finite_temperature_spurious_rates(&thermal, &mut seeded_rng(Some(seed))).unwrap();
    assert_eq!(run_thermal(6), run_thermal(6));
}
