// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Pattern generation, corruption and comparison helpers

use ndarray::{s, Array1, Array2, ArrayView1, ArrayView2};
use rand::seq::index;
use rand::Rng;

use crate::types::{EngineError, Pattern, Result, ACTIVE, INHIBITED};

#[inline]
fn random_bit<R: Rng + ?Sized>(rng: &mut R) -> i8 {
    if rng.gen::<bool>() {
        ACTIVE
    } else {
        INHIBITED
    }
}

/// Uniformly random bipolar pattern of length `n`
pub fn random_pattern<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Pattern {
    Pattern::from_trusted(Array1::from_shape_fn(n, |_| random_bit(rng)))
}

/// Uniformly random column-stacked N×p pattern batch
pub fn random_patterns<R: Rng + ?Sized>(n: usize, p: usize, rng: &mut R) -> Array2<i8> {
    Array2::from_shape_fn((n, p), |_| random_bit(rng))
}

/// Flip `floor(fraction * N)` distinct, randomly chosen bits
pub fn corrupt<R: Rng + ?Sized>(
    pattern: ArrayView1<'_, i8>,
    fraction: f64,
    rng: &mut R,
) -> Result<Array1<i8>> {
    if !(0.0..=1.0).contains(&fraction) {
        return Err(EngineError::InvalidFraction(fraction));
    }
    let n = pattern.len();
    let flips = (fraction * n as f64).floor() as usize;
    let mut corrupted = pattern.to_owned();
    for i in index::sample(rng, n, flips.min(n)) {
        corrupted[i] = -corrupted[i];
    }
    Ok(corrupted)
}

/// Inhibit the first half of the neurons (partial probe)
pub fn mask_first_half(pattern: ArrayView1<'_, i8>) -> Array1<i8> {
    let mut masked = pattern.to_owned();
    let half = pattern.len() / 2;
    masked.slice_mut(s![..half]).fill(INHIBITED);
    masked
}

/// Number of positions where `a` and `b` differ
pub fn hamming_distance(a: ArrayView1<'_, i8>, b: ArrayView1<'_, i8>) -> usize {
    a.iter().zip(b.iter()).filter(|(x, y)| x != y).count()
}

/// Hamming distance up to global inversion: `min(d, N - d)`
pub fn inversion_distance(a: ArrayView1<'_, i8>, b: ArrayView1<'_, i8>) -> usize {
    let d = hamming_distance(a, b);
    d.min(a.len() - d)
}

/// Smallest inversion distance from `state` to any column of `patterns`
///
/// Returns `None` when no patterns are stored.
pub fn nearest_pattern(
    state: ArrayView1<'_, i8>,
    patterns: ArrayView2<'_, i8>,
) -> Option<(usize, usize)> {
    patterns
        .columns()
        .into_iter()
        .enumerate()
        .map(|(k, column)| (k, inversion_distance(state, column)))
        .min_by_key(|&(_, d)| d)
}
