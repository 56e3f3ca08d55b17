// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Hopfield Network
//!
//! Owns the symmetric weight matrix, the stored pattern sequence, the neuron
//! state and the step counter.
//!
//! ## Invariants
//! - `weights` is N×N, symmetric, with a zero diagonal
//! - every stored pattern and the state are bipolar vectors of length N
//! - `weights` always equals the sum of the Hebbian contributions of the
//!   stored patterns (kept by additive / subtractive updates only)
//! - `time` is reset to 0 whenever the state is set from outside
//!
//! ## Non-termination
//! [`HopfieldNetwork::update`] with `run_to_fixed_point = true` loops until
//! the dynamics settle. Synchronous dynamics only detect period-1 and
//! period-2 cycles; a longer cycle never terminates. Callers that must
//! terminate use [`HopfieldNetwork::relax`] with a sweep ceiling.

use ndarray::{concatenate, Array1, Array2, ArrayView1, ArrayView2, Axis};
use rand::Rng;
use tracing::{debug, trace, warn};

use crate::dynamics::{self, asynchronous_sweep, sign_step, synchronous_step};
use crate::hebbian::{hebbian_matrix, hebbian_outer};
use crate::types::{
    validate_bipolar, validate_state, Convergence, Dynamics, EngineError, Pattern, Result,
    UpdateMode, INHIBITED,
};

/// Largest asymmetry tolerated when restoring persisted weights
pub const SYMMETRY_TOLERANCE: f64 = 1e-9;

/// Discrete-time Hopfield network with Hebbian storage
#[derive(Debug, Clone)]
pub struct HopfieldNetwork {
    neuron_count: usize,
    weights: Array2<f64>,
    patterns: Vec<Pattern>,
    state: Array1<i8>,
    time: u64,
    /// Scratch buffer for asynchronous visiting order
    order: Vec<usize>,
}

impl HopfieldNetwork {
    /// Create an empty network: zero weights, no patterns, all neurons inhibited
    pub fn new(neuron_count: usize) -> Result<Self> {
        if neuron_count == 0 {
            return Err(EngineError::EmptyNetwork);
        }
        Ok(Self {
            neuron_count,
            weights: Array2::zeros((neuron_count, neuron_count)),
            patterns: Vec::new(),
            state: Array1::from_elem(neuron_count, INHIBITED),
            time: 0,
            order: Vec::with_capacity(neuron_count),
        })
    }

    /// Restore a network from a persisted weight matrix and N×p pattern set
    ///
    /// N is taken from the weight matrix, p from the pattern columns. The
    /// state is reset to all -1 and time to 0.
    pub fn from_parts(weights: Array2<f64>, patterns: ArrayView2<'_, i8>) -> Result<Self> {
        let (rows, cols) = weights.dim();
        if rows != cols {
            return Err(EngineError::ShapeMismatch {
                expected: (rows, rows),
                actual: (rows, cols),
            });
        }
        if rows == 0 {
            return Err(EngineError::EmptyNetwork);
        }
        if patterns.nrows() != rows {
            return Err(EngineError::ShapeMismatch {
                expected: (rows, patterns.ncols()),
                actual: patterns.dim(),
            });
        }
        validate_weights(weights.view())?;

        let mut stored = Vec::with_capacity(patterns.ncols());
        for column in patterns.columns() {
            stored.push(Pattern::from_view(column)?);
        }

        debug!(
            neuron_count = rows,
            pattern_count = stored.len(),
            "Restored Hopfield network"
        );

        Ok(Self {
            neuron_count: rows,
            weights,
            patterns: stored,
            state: Array1::from_elem(rows, INHIBITED),
            time: 0,
            order: Vec::with_capacity(rows),
        })
    }

    pub fn neuron_count(&self) -> usize {
        self.neuron_count
    }

    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    pub fn weights(&self) -> ArrayView2<'_, f64> {
        self.weights.view()
    }

    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    pub fn pattern(&self, index: usize) -> Option<&Pattern> {
        self.patterns.get(index)
    }

    /// Stored patterns as an N×p column stack
    pub fn pattern_matrix(&self) -> Array2<i8> {
        let columns: Vec<ArrayView2<'_, i8>> = self
            .patterns
            .iter()
            .map(|p| p.view().insert_axis(Axis(1)))
            .collect();
        if columns.is_empty() {
            return Array2::zeros((self.neuron_count, 0));
        }
        concatenate(Axis(1), &columns).unwrap_or_else(|_| Array2::zeros((self.neuron_count, 0)))
    }

    pub fn state(&self) -> ArrayView1<'_, i8> {
        self.state.view()
    }

    pub fn time(&self) -> u64 {
        self.time
    }

    /// Store one pattern: `W += (1/N) ξ ξᵀ` with zero diagonal
    pub fn train(&mut self, pattern: &Pattern) -> Result<()> {
        self.check_len(pattern.len())?;
        self.weights += &hebbian_outer(pattern.view());
        self.patterns.push(pattern.clone());
        debug!(pattern_count = self.patterns.len(), "Trained pattern");
        Ok(())
    }

    /// Store a column-stacked N×p batch in one Hebbian update
    ///
    /// The whole batch is validated before the weights change.
    pub fn train_batch(&mut self, patterns: ArrayView2<'_, i8>) -> Result<()> {
        if patterns.nrows() != self.neuron_count {
            return Err(EngineError::DimensionMismatch {
                expected: self.neuron_count,
                actual: patterns.nrows(),
            });
        }
        validate_bipolar_matrix(patterns)?;

        self.weights += &hebbian_matrix(patterns);
        self.patterns.extend(
            patterns
                .columns()
                .into_iter()
                .map(|column| Pattern::from_trusted(column.to_owned())),
        );
        debug!(
            added = patterns.ncols(),
            pattern_count = self.patterns.len(),
            "Trained pattern batch"
        );
        Ok(())
    }

    /// Remove the pattern at `index`, subtracting its Hebbian contribution
    ///
    /// An out-of-range index is reported (warning + error value) and leaves
    /// the network untouched.
    pub fn remove(&mut self, index: usize) -> Result<Pattern> {
        if index >= self.patterns.len() {
            warn!(
                index,
                pattern_count = self.patterns.len(),
                "There is no pattern to remove"
            );
            return Err(EngineError::PatternIndexOutOfRange {
                index,
                count: self.patterns.len(),
            });
        }
        let pattern = self.patterns.remove(index);
        self.weights -= &hebbian_outer(pattern.view());
        debug!(index, pattern_count = self.patterns.len(), "Removed pattern");
        Ok(pattern)
    }

    /// Copy `state` in as the new initial condition and reset time to 0
    pub fn set_state(&mut self, state: ArrayView1<'_, i8>) -> Result<()> {
        validate_state(state, self.neuron_count)?;
        self.state.assign(&state);
        self.time = 0;
        trace!("Initial neuron state set");
        Ok(())
    }

    /// Convenience wrapper for slice input
    pub fn set_state_from_slice(&mut self, state: &[i8]) -> Result<()> {
        self.set_state(ArrayView1::from(state))
    }

    /// Zero-temperature update for `iterations` steps
    ///
    /// `time` grows by `iterations` up front. With `run_to_fixed_point`, the
    /// network keeps stepping (each state-changing step adds 1 to `time`)
    /// until a sweep leaves the state unchanged, or, for synchronous mode,
    /// until a period-2 oscillation appears. This loop is unbounded; see the
    /// module docs.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        iterations: u64,
        mode: UpdateMode,
        run_to_fixed_point: bool,
        rng: &mut R,
    ) {
        self.advance(iterations, mode, Dynamics::ZeroTemperature, rng);
        if run_to_fixed_point {
            let outcome = self.run_until_stable(mode, None, rng);
            debug!(?outcome, time = self.time, %mode, "Reached stopping condition");
        }
    }

    /// Finite-temperature update for exactly `iterations` steps
    pub fn update_with_temperature<R: Rng + ?Sized>(
        &mut self,
        iterations: u64,
        mode: UpdateMode,
        beta: f64,
        rng: &mut R,
    ) -> Result<()> {
        let dynamics = Dynamics::thermal(beta)?;
        self.advance(iterations, mode, dynamics, rng);
        Ok(())
    }

    /// Run `iterations` steps of `dynamics` under `mode`
    pub fn advance<R: Rng + ?Sized>(
        &mut self,
        iterations: u64,
        mode: UpdateMode,
        dynamics: Dynamics,
        rng: &mut R,
    ) {
        self.time += iterations;
        for _ in 0..iterations {
            self.step(mode, dynamics, rng);
        }
        trace!(iterations, %mode, ?dynamics, time = self.time, "Advanced network");
    }

    /// Zero-temperature relaxation with a ceiling on extra sweeps
    ///
    /// Same stopping rules as `update(0, mode, true, ..)`, but gives up after
    /// `max_sweeps` state-changing steps and reports how it ended.
    pub fn relax<R: Rng + ?Sized>(
        &mut self,
        mode: UpdateMode,
        max_sweeps: u64,
        rng: &mut R,
    ) -> Convergence {
        let outcome = self.run_until_stable(mode, Some(max_sweeps), rng);
        if let Convergence::Exhausted { steps } = outcome {
            warn!(steps, %mode, "Relaxation hit the sweep ceiling without settling");
        }
        outcome
    }

    /// Energy `-0.5 · sᵀ W s` of an arbitrary state
    pub fn energy(&self, state: ArrayView1<'_, i8>) -> Result<f64> {
        validate_state(state, self.neuron_count)?;
        Ok(dynamics::energy(self.weights.view(), state))
    }

    /// Energy of the current state
    pub fn current_energy(&self) -> f64 {
        dynamics::energy(self.weights.view(), self.state.view())
    }

    /// Whether one synchronous sign step reproduces `state` exactly
    pub fn is_stable(&self, state: ArrayView1<'_, i8>) -> Result<bool> {
        validate_state(state, self.neuron_count)?;
        Ok(sign_step(self.weights.view(), state) == state)
    }

    /// Whether the current state is a fixed point
    pub fn is_current_state_stable(&self) -> bool {
        sign_step(self.weights.view(), self.state.view()) == self.state
    }

    fn step<R: Rng + ?Sized>(&mut self, mode: UpdateMode, dynamics: Dynamics, rng: &mut R) -> bool {
        match mode {
            UpdateMode::Synchronous => {
                let next = synchronous_step(self.weights.view(), self.state.view(), dynamics, rng);
                let changed = next != self.state;
                self.state = next;
                changed
            }
            UpdateMode::Asynchronous => asynchronous_sweep(
                self.weights.view(),
                self.state.view_mut(),
                dynamics,
                &mut self.order,
                rng,
            ),
        }
    }

    fn run_until_stable<R: Rng + ?Sized>(
        &mut self,
        mode: UpdateMode,
        max_sweeps: Option<u64>,
        rng: &mut R,
    ) -> Convergence {
        let dynamics = Dynamics::ZeroTemperature;
        let within_limit = |steps: u64| max_sweeps.map_or(true, |max| steps < max);
        let mut steps = 0u64;

        match mode {
            UpdateMode::Asynchronous => loop {
                if !within_limit(steps) {
                    return Convergence::Exhausted { steps };
                }
                if !self.step(mode, dynamics, rng) {
                    return Convergence::FixedPoint { steps };
                }
                self.time += 1;
                steps += 1;
            },
            UpdateMode::Synchronous => loop {
                let second_last = self.state.clone();
                for _ in 0..2 {
                    if !within_limit(steps) {
                        return Convergence::Exhausted { steps };
                    }
                    if !self.step(mode, dynamics, rng) {
                        return Convergence::FixedPoint { steps };
                    }
                    self.time += 1;
                    steps += 1;
                }
                if second_last == self.state {
                    return Convergence::Oscillation { steps };
                }
            },
        }
    }

    fn check_len(&self, actual: usize) -> Result<()> {
        if actual != self.neuron_count {
            return Err(EngineError::DimensionMismatch {
                expected: self.neuron_count,
                actual,
            });
        }
        Ok(())
    }
}

fn validate_bipolar_matrix(patterns: ArrayView2<'_, i8>) -> Result<()> {
    for column in patterns.columns() {
        validate_bipolar(column)?;
    }
    Ok(())
}

fn validate_weights(weights: ArrayView2<'_, f64>) -> Result<()> {
    let n = weights.nrows();
    for i in 0..n {
        if weights[[i, i]] != 0.0 {
            return Err(EngineError::InvalidWeights(format!(
                "diagonal element {} is {} (must be 0)",
                i,
                weights[[i, i]]
            )));
        }
        for j in (i + 1)..n {
            let (a, b) = (weights[[i, j]], weights[[j, i]]);
            if !a.is_finite() || !b.is_finite() {
                return Err(EngineError::InvalidWeights(format!(
                    "non-finite weight at ({}, {})",
                    i, j
                )));
            }
            if (a - b).abs() > SYMMETRY_TOLERANCE {
                return Err(EngineError::InvalidWeights(format!(
                    "asymmetric at ({}, {}): {} != {}",
                    i, j, a, b
                )));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn pattern(values: &[i8]) -> Pattern {
        Pattern::try_from(values).unwrap()
    }

    #[test]
    fn test_new_network_is_empty() {
        let network = HopfieldNetwork::new(9).unwrap();
        assert_eq!(network.neuron_count(), 9);
        assert_eq!(network.pattern_count(), 0);
        assert_eq!(network.time(), 0);
        assert!(network.state().iter().all(|&s| s == -1));
        assert!(network.weights().iter().all(|&w| w == 0.0));
        assert_eq!(network.pattern_matrix().dim(), (9, 0));
    }

    #[test]
    fn test_zero_neurons_rejected() {
        assert_eq!(HopfieldNetwork::new(0).unwrap_err(), EngineError::EmptyNetwork);
    }

    #[test]
    fn test_train_wrong_length_leaves_network_untouched() {
        let mut network = HopfieldNetwork::new(4).unwrap();
        let err = network.train(&pattern(&[1, -1, 1])).unwrap_err();
        assert_eq!(
            err,
            EngineError::DimensionMismatch {
                expected: 4,
                actual: 3
            }
        );
        assert_eq!(network.pattern_count(), 0);
        assert!(network.weights().iter().all(|&w| w == 0.0));
    }

    #[test]
    fn test_train_batch_rejects_non_bipolar_without_mutation() {
        let mut network = HopfieldNetwork::new(2).unwrap();
        let batch = array![[1i8, 1], [-1, 0]];
        assert!(matches!(
            network.train_batch(batch.view()),
            Err(EngineError::NotBipolar { .. })
        ));
        assert_eq!(network.pattern_count(), 0);
    }

    #[test]
    fn test_repeated_training_is_additive() {
        let xi = pattern(&[1, -1, 1, -1]);
        let mut once = HopfieldNetwork::new(4).unwrap();
        once.train(&xi).unwrap();
        let mut twice = HopfieldNetwork::new(4).unwrap();
        twice.train(&xi).unwrap();
        twice.train(&xi).unwrap();

        assert_eq!(twice.pattern_count(), 2);
        assert_eq!(twice.weights().to_owned(), &once.weights() * 2.0);
    }

    #[test]
    fn test_remove_shifts_indices_and_subtracts() {
        let a = pattern(&[1, 1, -1, -1]);
        let b = pattern(&[1, -1, 1, -1]);
        let mut network = HopfieldNetwork::new(4).unwrap();
        network.train(&a).unwrap();
        let after_a = network.weights().to_owned();
        network.train(&b).unwrap();

        let removed = network.remove(1).unwrap();
        assert_eq!(removed, b);
        assert_eq!(network.patterns(), &[a.clone()]);
        assert_eq!(network.weights(), after_a);

        network.train(&b).unwrap();
        network.remove(0).unwrap();
        assert_eq!(network.pattern(0), Some(&b));
    }

    #[test]
    fn test_remove_out_of_range_is_reported() {
        let mut network = HopfieldNetwork::new(4).unwrap();
        network.train(&pattern(&[1, 1, -1, -1])).unwrap();
        let before = network.weights().to_owned();

        let err = network.remove(3).unwrap_err();
        assert_eq!(err, EngineError::PatternIndexOutOfRange { index: 3, count: 1 });
        assert_eq!(network.pattern_count(), 1);
        assert_eq!(network.weights(), before);
    }

    #[test]
    fn test_set_state_copies_and_resets_time() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut network = HopfieldNetwork::new(4).unwrap();
        network.train(&pattern(&[1, 1, -1, -1])).unwrap();
        network.update(3, UpdateMode::Synchronous, false, &mut rng);
        assert_eq!(network.time(), 3);

        let mut probe = array![1i8, -1, -1, -1];
        network.set_state(probe.view()).unwrap();
        assert_eq!(network.time(), 0);

        probe[0] = -1;
        assert_eq!(network.state()[0], 1);
    }

    #[test]
    fn test_set_state_wrong_length() {
        let mut network = HopfieldNetwork::new(4).unwrap();
        let err = network.set_state_from_slice(&[1, -1]).unwrap_err();
        assert_eq!(
            err,
            EngineError::DimensionMismatch {
                expected: 4,
                actual: 2
            }
        );
    }

    #[test]
    fn test_update_adds_iterations_to_time() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut network = HopfieldNetwork::new(4).unwrap();
        network.update(5, UpdateMode::Asynchronous, false, &mut rng);
        assert_eq!(network.time(), 5);
        network
            .update_with_temperature(4, UpdateMode::Synchronous, 2.0, &mut rng)
            .unwrap();
        assert_eq!(network.time(), 9);
    }

    #[test]
    fn test_invalid_beta_rejected_before_time_moves() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut network = HopfieldNetwork::new(4).unwrap();
        assert!(network
            .update_with_temperature(4, UpdateMode::Asynchronous, -1.0, &mut rng)
            .is_err());
        assert_eq!(network.time(), 0);
    }

    #[test]
    fn test_stored_pattern_is_stable() {
        let xi = pattern(&[1, -1, -1, 1, 1, -1, 1, -1, 1]);
        let mut network = HopfieldNetwork::new(9).unwrap();
        network.train(&xi).unwrap();
        assert!(network.is_stable(xi.view()).unwrap());
        assert!(network.is_stable(xi.inverted().view()).unwrap());
    }

    #[test]
    fn test_energy_wrong_length() {
        let network = HopfieldNetwork::new(4).unwrap();
        assert!(network.energy(array![1i8, 1].view()).is_err());
        assert!(network.is_stable(array![1i8].view()).is_err());
    }

    #[test]
    fn test_energy_and_stability_reject_non_bipolar() {
        let network = HopfieldNetwork::new(4).unwrap();
        assert_eq!(
            network.energy(array![0i8, 5, 1, -1].view()).unwrap_err(),
            EngineError::NotBipolar { index: 0, value: 0 }
        );
        assert!(matches!(
            network.is_stable(array![1i8, 1, 2, 1].view()),
            Err(EngineError::NotBipolar { index: 2, .. })
        ));
    }

    #[test]
    fn test_zero_beta_is_a_coin_flip() {
        let mut rng = StdRng::seed_from_u64(6);
        let xi = pattern(&[1, -1, -1, 1, 1, -1, 1, -1]);
        let mut network = HopfieldNetwork::new(8).unwrap();
        network.train(&xi).unwrap();
        network.set_state(xi.view()).unwrap();

        network
            .update_with_temperature(3, UpdateMode::Synchronous, 0.0, &mut rng)
            .unwrap();
        assert_eq!(network.time(), 3);
        assert!(network.state().iter().all(|&s| s == 1 || s == -1));
    }

    #[test]
    fn test_relax_reports_fixed_point() {
        let mut rng = StdRng::seed_from_u64(4);
        let xi = pattern(&[1, -1, -1, 1, 1, -1, 1, -1, 1]);
        let mut network = HopfieldNetwork::new(9).unwrap();
        network.train(&xi).unwrap();
        network.set_state(xi.view()).unwrap();

        let outcome = network.relax(UpdateMode::Asynchronous, 10, &mut rng);
        assert_eq!(outcome, Convergence::FixedPoint { steps: 0 });
        assert_eq!(network.time(), 0);
    }

    #[test]
    fn test_relax_reports_oscillation() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut network = HopfieldNetwork::new(4).unwrap();
        network.train(&pattern(&[1, 1, -1, -1])).unwrap();
        network.train(&pattern(&[1, -1, 1, -1])).unwrap();
        network.set_state_from_slice(&[1, -1, -1, -1]).unwrap();

        let outcome = network.relax(UpdateMode::Synchronous, 100, &mut rng);
        assert!(matches!(outcome, Convergence::Oscillation { .. }));
    }

    #[test]
    fn test_relax_ceiling() {
        let mut rng = StdRng::seed_from_u64(6);
        let mut network = HopfieldNetwork::new(4).unwrap();
        network.train(&pattern(&[1, 1, -1, -1])).unwrap();
        network.train(&pattern(&[1, -1, 1, -1])).unwrap();
        network.set_state_from_slice(&[1, -1, -1, -1]).unwrap();

        let outcome = network.relax(UpdateMode::Synchronous, 1, &mut rng);
        assert_eq!(outcome, Convergence::Exhausted { steps: 1 });
        assert_eq!(network.time(), 1);
    }

    #[test]
    fn test_from_parts_roundtrip() {
        let mut network = HopfieldNetwork::new(4).unwrap();
        network.train(&pattern(&[1, 1, -1, -1])).unwrap();
        network.train(&pattern(&[1, -1, 1, -1])).unwrap();

        let restored = HopfieldNetwork::from_parts(
            network.weights().to_owned(),
            network.pattern_matrix().view(),
        )
        .unwrap();

        assert_eq!(restored.weights(), network.weights());
        assert_eq!(restored.patterns(), network.patterns());
        assert_eq!(restored.time(), 0);
        assert!(restored.state().iter().all(|&s| s == -1));
    }

    #[test]
    fn test_from_parts_rejects_bad_weights() {
        let patterns = Array2::<i8>::zeros((2, 0));
        let diagonal = array![[1.0, 0.0], [0.0, 0.0]];
        assert!(matches!(
            HopfieldNetwork::from_parts(diagonal, patterns.view()),
            Err(EngineError::InvalidWeights(_))
        ));

        let asymmetric = array![[0.0, 0.5], [0.25, 0.0]];
        assert!(matches!(
            HopfieldNetwork::from_parts(asymmetric, patterns.view()),
            Err(EngineError::InvalidWeights(_))
        ));

        let not_square = Array2::<f64>::zeros((2, 3));
        assert!(matches!(
            HopfieldNetwork::from_parts(not_square, patterns.view()),
            Err(EngineError::ShapeMismatch { .. })
        ));
    }
}
