// ─────────────────────────────────────────────────────────────────────
// Fission Chain — Random Draw Sources
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Uniform draws for the per-neutron Bernoulli trials.
//!
//! A generation's neutrons are split into fixed-size chunks and every
//! `(generation, chunk)` pair owns an independent stream. The stream a
//! chunk sees does not depend on which thread evaluates it, so sequential
//! and parallel runs consume identical draws.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A stream of uniform samples in `[0, 1)`.
pub trait DrawStream {
    fn next_draw(&mut self) -> f64;
}

/// Hands out one stream per `(generation, chunk)`.
///
/// Implementations must return the same sequence for the same indices.
pub trait DrawSource: Send + Sync {
    type Stream: DrawStream;

    fn stream(&self, generation: u64, chunk: u64) -> Self::Stream;

    /// Seed that reproduces every stream, if the source has one.
    fn replay_seed(&self) -> Option<u64> {
        None
    }
}

/// `StdRng` streams derived from a single run seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeededSource {
    seed: u64,
}

impl SeededSource {
    pub fn new(seed: u64) -> Self {
        SeededSource { seed }
    }

    /// Fresh seed from OS entropy. The seed is logged so the run can be replayed.
    pub fn from_entropy() -> Self {
        let seed: u64 = rand::random();
        log::info!("random seed: {seed}");
        SeededSource { seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl DrawSource for SeededSource {
    type Stream = SeededStream;

    fn stream(&self, generation: u64, chunk: u64) -> SeededStream {
        SeededStream {
            rng: StdRng::seed_from_u64(stream_seed(self.seed, generation, chunk)),
        }
    }

    fn replay_seed(&self) -> Option<u64> {
        Some(self.seed)
    }
}

pub struct SeededStream {
    rng: StdRng,
}

impl DrawStream for SeededStream {
    fn next_draw(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// SplitMix64 finalizer.
fn splitmix64(x: u64) -> u64 {
    let mut z = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

fn stream_seed(seed: u64, generation: u64, chunk: u64) -> u64 {
    splitmix64(splitmix64(splitmix64(seed) ^ generation) ^ chunk)
}
