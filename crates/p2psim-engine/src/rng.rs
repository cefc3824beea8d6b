//! # p2psim-engine::rng
//!
//! The simulation's single deterministic RNG. Every sampler draw, for both
//! the broadcast and p2p latency distributions, comes from this one
//! generator so that a fixed seed plus a fixed sequence of scheduling calls
//! reproduces bit-identical event orderings across runs.

use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha20Rng;

pub fn seeded_rng(seed: u64) -> ChaCha20Rng {
    ChaCha20Rng::seed_from_u64(seed)
}
