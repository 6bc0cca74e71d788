// Copyright 2025 the Quilt Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared inputs for the Quilt benchmarks.

use quilt_atlas::SpriteDesc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A reproducible mix of sprite sizes between 1 and `max_side` pixels per side.
pub fn sprite_set(count: usize, max_side: u32, seed: u64) -> Vec<SpriteDesc> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| SpriteDesc::new(rng.gen_range(1..=max_side), rng.gen_range(1..=max_side)))
        .collect()
}
