// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Neuron Update Dynamics
//!
//! Pure update functions over a weight matrix and a bipolar state.
//!
//! ```text
//! Local field:
//!     h_i = Σ_j W_ij s_j
//!
//! Zero temperature (sign rule):
//!     s_i ← +1 if h_i ≥ -ε else -1          (ε = 1e-15, zero field → +1)
//!
//! Finite temperature (Glauber rule):
//!     P(s_i = +1) = 1 / (1 + exp(-2 β h_i))
//!     s_i ← +1 if P(s_i = +1) ≥ u else -1   (u ~ U[0, 1) per neuron per update)
//! ```
//!
//! Synchronous steps compute every field from the same prior state;
//! asynchronous sweeps visit neurons in a random permutation and let later
//! neurons see the values already written in the same sweep.

use ndarray::{Array1, ArrayView1, ArrayView2, ArrayViewMut1};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::types::{Dynamics, ACTIVE, INHIBITED};

/// Tolerance that lets a numerically zero field resolve to +1
pub const SIGN_TOLERANCE: f64 = 1e-15;

/// Sign rule with the zero-field convention `sign_0(0) = +1`
#[inline]
pub fn sign_0(field: f64) -> i8 {
    if field >= -SIGN_TOLERANCE {
        ACTIVE
    } else {
        INHIBITED
    }
}

/// Probability that a neuron with local field `field` becomes active
#[inline]
pub fn activation_probability(field: f64, beta: f64) -> f64 {
    1.0 / (1.0 + (-2.0 * beta * field).exp())
}

/// Thermal rule realized against a uniform threshold in `[0, 1)`
#[inline]
pub fn thermal_sign(field: f64, beta: f64, threshold: f64) -> i8 {
    if activation_probability(field, beta) >= threshold {
        ACTIVE
    } else {
        INHIBITED
    }
}

/// Local field of neuron `i`: `dot(weights[i, :], state)`
#[inline]
pub fn local_field(weights: ArrayView2<'_, f64>, state: ArrayView1<'_, i8>, i: usize) -> f64 {
    weights
        .row(i)
        .iter()
        .zip(state.iter())
        .map(|(&w, &s)| w * f64::from(s))
        .sum()
}

/// Local fields of all neurons: `weights · state`
pub fn local_fields(weights: ArrayView2<'_, f64>, state: ArrayView1<'_, i8>) -> Array1<f64> {
    weights.dot(&state.mapv(f64::from))
}

#[inline]
fn next_value<R: Rng + ?Sized>(field: f64, dynamics: Dynamics, rng: &mut R) -> i8 {
    match dynamics {
        Dynamics::ZeroTemperature => sign_0(field),
        Dynamics::FiniteTemperature { beta } => thermal_sign(field, beta, rng.gen::<f64>()),
    }
}

/// One synchronous step, returning the next state without touching `state`
pub fn synchronous_step<R: Rng + ?Sized>(
    weights: ArrayView2<'_, f64>,
    state: ArrayView1<'_, i8>,
    dynamics: Dynamics,
    rng: &mut R,
) -> Array1<i8> {
    local_fields(weights, state).mapv(|h| next_value(h, dynamics, rng))
}

/// One zero-temperature synchronous step (no randomness involved)
pub fn sign_step(weights: ArrayView2<'_, f64>, state: ArrayView1<'_, i8>) -> Array1<i8> {
    local_fields(weights, state).mapv(sign_0)
}

/// One asynchronous sweep over all neurons in a fresh random order
///
/// `order` is scratch space reused across sweeps; it is refilled with
/// `0..N` and shuffled every call. Returns whether any neuron changed.
pub fn asynchronous_sweep<R: Rng + ?Sized>(
    weights: ArrayView2<'_, f64>,
    mut state: ArrayViewMut1<'_, i8>,
    dynamics: Dynamics,
    order: &mut Vec<usize>,
    rng: &mut R,
) -> bool {
    let n = state.len();
    order.clear();
    order.extend(0..n);
    order.shuffle(rng);

    let mut changed = false;
    for &i in order.iter() {
        let field = local_field(weights, state.view(), i);
        let value = next_value(field, dynamics, rng);
        if state[i] != value {
            state[i] = value;
            changed = true;
        }
    }
    changed
}

/// Energy `-0.5 · sᵀ W s`
pub fn energy(weights: ArrayView2<'_, f64>, state: ArrayView1<'_, i8>) -> f64 {
    let s = state.mapv(f64::from);
    -0.5 * s.dot(&weights.dot(&s))
}
