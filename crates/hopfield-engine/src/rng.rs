// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Random source construction for the engine.

The engine never reaches for a process-wide generator: every operation that
consumes randomness (asynchronous visiting order, thermal thresholds,
pattern generation) takes an explicit `&mut impl Rng`. These helpers build
that generator:
- Fixed seed: `StdRng::seed_from_u64` (reproducible trajectories)
- No seed: `StdRng::from_entropy` (OS entropy)
*/

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Build the engine RNG, reproducible when `seed` is given
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
