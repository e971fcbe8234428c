// ─────────────────────────────────────────────────────────────────────
// Fission Chain — Generation Step Strategies
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Evaluation of one generation's free neutrons.
//!
//! Both strategies return the number of fissions in the generation, capped at
//! the atoms still available. The sequential pass is the reference: neutrons
//! left to right, each checked against the running fission count. The
//! parallel pass sums per-chunk hit tallies on the rayon pool and applies the
//! cap once, which gives the same count because every hit fissions until the
//! cap is reached.

use crate::rng::{DrawSource, DrawStream};
use fission_types::config::ExecutionMode;
use fission_types::error::{FissionError, FissionResult};
use rayon::prelude::*;
use std::iter::Sum;
use std::ops::Add;

/// What a step needs to know about the current generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationInput {
    /// 1-based generation index, selects the random streams.
    pub generation: u64,
    pub free_neutrons: u64,
    /// Atoms still available for fission.
    pub remaining: u64,
    pub fission_probability: f64,
    pub chunk_size: u64,
}

impl GenerationInput {
    pub fn chunk_count(&self) -> u64 {
        self.free_neutrons.div_ceil(self.chunk_size)
    }

    /// Neutrons in chunk `k`; only the last chunk can be short.
    pub fn chunk_len(&self, chunk: u64) -> u64 {
        let start = chunk * self.chunk_size;
        self.chunk_size.min(self.free_neutrons - start)
    }
}

/// Thread-local accumulator of one chunk's successful draws.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChunkTally {
    pub hits: u64,
}

impl Add for ChunkTally {
    type Output = ChunkTally;

    fn add(self, rhs: ChunkTally) -> ChunkTally {
        ChunkTally {
            hits: self.hits + rhs.hits,
        }
    }
}

impl Sum for ChunkTally {
    fn sum<I: Iterator<Item = ChunkTally>>(iter: I) -> ChunkTally {
        iter.fold(ChunkTally::default(), Add::add)
    }
}

/// One generation's neutron pass.
pub trait GenerationStep {
    /// Fissions caused by `input.free_neutrons`, never more than `input.remaining`.
    fn fissions<S: DrawSource>(&self, source: &S, input: &GenerationInput) -> u64;
}

/// Single-threaded left-to-right pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialStep;

impl GenerationStep for SequentialStep {
    fn fissions<S: DrawSource>(&self, source: &S, input: &GenerationInput) -> u64 {
        let p = input.fission_probability;
        let mut fissions = 0u64;

        'chunks: for chunk in 0..input.chunk_count() {
            let mut stream = source.stream(input.generation, chunk);
            for _ in 0..input.chunk_len(chunk) {
                // Sample exhausted mid-generation: remaining neutrons find no fuel.
                if fissions >= input.remaining {
                    break 'chunks;
                }
                if stream.next_draw() < p {
                    fissions += 1;
                }
            }
        }
        fissions
    }
}

/// Rayon work-stealing pass over chunk indices.
pub struct ParallelStep {
    pool: Option<rayon::ThreadPool>,
}

impl ParallelStep {
    /// `threads: None` runs on the global rayon pool.
    pub fn new(threads: Option<usize>) -> FissionResult<Self> {
        let pool = match threads {
            None => None,
            Some(0) => {
                return Err(FissionError::ConfigError(
                    "parallel thread count must be > 0".to_string(),
                ))
            }
            Some(n) => Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .thread_name(|i| format!("fission-worker-{i}"))
                    .build()
                    .map_err(|e| FissionError::ConfigError(e.to_string()))?,
            ),
        };
        Ok(ParallelStep { pool })
    }

    pub fn threads(&self) -> usize {
        match &self.pool {
            Some(pool) => pool.current_num_threads(),
            None => rayon::current_num_threads(),
        }
    }
}

/// Hits in one chunk. Stops drawing once the chunk alone could fill the cap.
fn chunk_tally<S: DrawSource>(source: &S, input: &GenerationInput, chunk: u64) -> ChunkTally {
    let p = input.fission_probability;
    let mut stream = source.stream(input.generation, chunk);
    let mut hits = 0u64;
    for _ in 0..input.chunk_len(chunk) {
        if hits >= input.remaining {
            break;
        }
        if stream.next_draw() < p {
            hits += 1;
        }
    }
    ChunkTally { hits }
}

impl GenerationStep for ParallelStep {
    fn fissions<S: DrawSource>(&self, source: &S, input: &GenerationInput) -> u64 {
        let reduce = || -> ChunkTally {
            (0..input.chunk_count())
                .into_par_iter()
                .map(|chunk| chunk_tally(source, input, chunk))
                .sum()
        };
        // Barrier: the reduction finishes before the next generation starts.
        let tally = match &self.pool {
            Some(pool) => pool.install(reduce),
            None => reduce(),
        };
        tally.hits.min(input.remaining)
    }
}

/// Execution strategy selected when the simulator is built.
pub enum ExecutionStrategy {
    Sequential(SequentialStep),
    Parallel(ParallelStep),
}

impl ExecutionStrategy {
    pub fn from_mode(mode: ExecutionMode) -> FissionResult<Self> {
        match mode {
            ExecutionMode::Sequential => Ok(ExecutionStrategy::Sequential(SequentialStep)),
            ExecutionMode::Parallel { threads } => {
                let step = ParallelStep::new(threads)?;
                log::info!("parallel generation step on {} threads", step.threads());
                Ok(ExecutionStrategy::Parallel(step))
            }
        }
    }

    pub fn mode(&self) -> ExecutionMode {
        match self {
            ExecutionStrategy::Sequential(_) => ExecutionMode::Sequential,
            ExecutionStrategy::Parallel(step) => ExecutionMode::Parallel {
                threads: step.pool.as_ref().map(|p| p.current_num_threads()),
            },
        }
    }
}

impl GenerationStep for ExecutionStrategy {
    fn fissions<S: DrawSource>(&self, source: &S, input: &GenerationInput) -> u64 {
        match self {
            ExecutionStrategy::Sequential(step) => step.fissions(source, input),
            ExecutionStrategy::Parallel(step) => step.fissions(source, input),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SeededSource;

    fn input(free_neutrons: u64, remaining: u64, p: f64, chunk_size: u64) -> GenerationInput {
        GenerationInput {
            generation: 1,
            free_neutrons,
            remaining,
            fission_probability: p,
            chunk_size,
        }
    }

    #[test]
    fn test_chunk_partition_covers_generation() {
        let inp = input(10_001, u64::MAX, 0.5, 4096);
        assert_eq!(inp.chunk_count(), 3);
        let total: u64 = (0..inp.chunk_count()).map(|k| inp.chunk_len(k)).sum();
        assert_eq!(total, 10_001);
        assert_eq!(inp.chunk_len(2), 10_001 - 2 * 4096);
    }

    #[test]
    fn test_tally_sum_is_associative() {
        let a = ChunkTally { hits: 3 };
        let b = ChunkTally { hits: 5 };
        let c = ChunkTally { hits: 11 };
        assert_eq!((a + b) + c, a + (b + c));
        assert_eq!(vec![a, b, c].into_iter().sum::<ChunkTally>().hits, 19);
    }

    #[test]
    fn test_probability_extremes() {
        let src = SeededSource::new(1);
        let seq = SequentialStep;
        assert_eq!(seq.fissions(&src, &input(5_000, u64::MAX, 0.0, 64)), 0);
        assert_eq!(seq.fissions(&src, &input(5_000, u64::MAX, 1.0, 64)), 5_000);
    }

    #[test]
    fn test_cap_limits_generation() {
        let src = SeededSource::new(1);
        let inp = input(10_000, 17, 1.0, 128);
        assert_eq!(SequentialStep.fissions(&src, &inp), 17);
        let par = ParallelStep::new(Some(2)).unwrap();
        assert_eq!(par.fissions(&src, &inp), 17);
    }

    #[test]
    fn test_sequential_matches_parallel() {
        let src = SeededSource::new(99);
        let par = ParallelStep::new(Some(4)).unwrap();
        for &(free, remaining, chunk) in &[
            (1u64, u64::MAX, 4096u64),
            (100_000, u64::MAX, 4096),
            (100_000, 50_000, 1000),
            (100_000, 69_000, 333),
            (7, 3, 2),
        ] {
            let inp = input(free, remaining, 0.7, chunk);
            assert_eq!(
                SequentialStep.fissions(&src, &inp),
                par.fissions(&src, &inp),
                "mismatch for free={free} remaining={remaining} chunk={chunk}"
            );
        }
    }

    #[test]
    fn test_global_pool_matches_dedicated_pool() {
        let src = SeededSource::new(5);
        let inp = input(50_000, u64::MAX, 0.3, 512);
        let global = ParallelStep::new(None).unwrap();
        let dedicated = ParallelStep::new(Some(3)).unwrap();
        assert_eq!(global.fissions(&src, &inp), dedicated.fissions(&src, &inp));
        assert_eq!(dedicated.threads(), 3);
    }

    #[test]
    fn test_zero_threads_rejected() {
        assert!(ParallelStep::new(Some(0)).is_err());
    }

    #[test]
    fn test_strategy_reports_mode() {
        let seq = ExecutionStrategy::from_mode(ExecutionMode::Sequential).unwrap();
        assert_eq!(seq.mode(), ExecutionMode::Sequential);
        let par = ExecutionStrategy::from_mode(ExecutionMode::Parallel { threads: Some(2) }).unwrap();
        assert_eq!(par.mode(), ExecutionMode::Parallel { threads: Some(2) });
    }
}
