// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Hebbian weight construction
//!
//! ```text
//! ΔW = (1/N) Σ_k ξ_k ξ_kᵀ,   ΔW_ii = 0
//! ```
//!
//! Patterns are stacked as columns of an N×p matrix, so the sum of outer
//! products is a single `X · Xᵀ`.

use ndarray::{Array2, ArrayView1, ArrayView2, Axis};

/// Hebbian contribution of a column-stacked N×p pattern batch
///
/// No normalization beyond `1/N` is applied; the result is symmetric with a
/// zero diagonal.
pub fn hebbian_matrix(patterns: ArrayView2<'_, i8>) -> Array2<f64> {
    let n = patterns.nrows();
    let x = patterns.mapv(f64::from);
    let mut w = x.dot(&x.t());
    if n > 0 {
        w /= n as f64;
    }
    w.diag_mut().fill(0.0);
    w
}

/// Hebbian contribution of a single pattern
pub fn hebbian_outer(pattern: ArrayView1<'_, i8>) -> Array2<f64> {
    hebbian_matrix(pattern.insert_axis(Axis(1)))
}
