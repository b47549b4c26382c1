//! Reproducible per-draw random streams.
//!
//! Each Monte-Carlo draw owns an RNG derived from the configured base seed
//! and its draw index, so the shock sequence a draw sees depends only on
//! `(seed, draw_index)`, never on which Rayon worker ran it or in what
//! order draws completed.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// SplitMix64 finaliser; decorrelates consecutive draw indices into
/// well-spread 64-bit seeds.
#[inline]
fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9e37_79b9_7f4a_7c15);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

/// RNG for one draw, derived from the base seed and the draw index.
#[inline]
pub(crate) fn draw_rng(base_seed: u64, draw_index: u64) -> StdRng {
    StdRng::seed_from_u64(splitmix64(base_seed ^ splitmix64(draw_index)))
}
