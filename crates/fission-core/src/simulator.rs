// ─────────────────────────────────────────────────────────────────────
// Fission Chain — Chain Reaction Simulator
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Generational chain-reaction loop.
//!
//! Each generation: evaluate the free neutrons (sequential or parallel step),
//! apply the fissions to the sample, spawn `neutrons_per_fission` per fission,
//! and derive the next generation from the carry policy.
//!
//! The loop stops as:
//! - `Exhausted` when every fissionable atom is consumed,
//! - `Quenched` when no free neutrons remain,
//! - `Saturated` when the next generation would exceed the population ceiling.

use crate::physics::{atom_count, ReactionEnergetics};
use crate::rng::DrawSource;
use crate::strategy::{ExecutionStrategy, GenerationInput, GenerationStep};
use fission_types::config::{
    ExecutionMode, NeutronCarryPolicy, ReactionParameters, RunConfig, SimulationLimits,
};
use fission_types::error::{FissionError, FissionResult};
use fission_types::state::{GenerationRecord, SampleState, SimulationReport, Termination};

/// Free neutrons of the next generation.
///
/// Under `SubtractCurrentGeneration` a spawn smaller than the consumed
/// generation yields zero, which quenches the run.
pub fn next_free_neutrons(policy: NeutronCarryPolicy, spawned: u64, current: u64) -> u64 {
    match policy {
        NeutronCarryPolicy::CarryForwardAll => spawned,
        NeutronCarryPolicy::SubtractCurrentGeneration => spawned.saturating_sub(current),
    }
}

/// Chain reaction in a single fuel sample.
pub struct ChainReactionSimulator<S: DrawSource> {
    params: ReactionParameters,
    limits: SimulationLimits,
    policy: NeutronCarryPolicy,
    strategy: ExecutionStrategy,
    energetics: ReactionEnergetics,
    source: S,
}

impl<S: DrawSource> ChainReactionSimulator<S> {
    /// Validates parameters and limits before anything else is built.
    pub fn new(
        params: ReactionParameters,
        limits: SimulationLimits,
        mode: ExecutionMode,
        policy: NeutronCarryPolicy,
        source: S,
    ) -> FissionResult<Self> {
        params.validate()?;
        limits.validate()?;
        let strategy = ExecutionStrategy::from_mode(mode)?;
        let energetics = ReactionEnergetics::from_parameters(&params);
        Ok(ChainReactionSimulator {
            params,
            limits,
            policy,
            strategy,
            energetics,
            source,
        })
    }

    pub fn from_config(config: &RunConfig, source: S) -> FissionResult<Self> {
        config.validate()?;
        Self::new(
            config.reaction.clone(),
            config.limits,
            config.mode,
            config.policy,
            source,
        )
    }

    pub fn params(&self) -> &ReactionParameters {
        &self.params
    }

    pub fn limits(&self) -> &SimulationLimits {
        &self.limits
    }

    pub fn policy(&self) -> NeutronCarryPolicy {
        self.policy
    }

    pub fn mode(&self) -> ExecutionMode {
        self.strategy.mode()
    }

    pub fn energetics(&self) -> &ReactionEnergetics {
        &self.energetics
    }

    /// Fresh sample for `mass_g` grams of fuel.
    pub fn sample_for_mass(&self, mass_g: f64) -> FissionResult<SampleState> {
        if !mass_g.is_finite() || mass_g < 0.0 {
            return Err(FissionError::InvalidInput(format!(
                "sample mass must be a finite number of grams >= 0, got {mass_g}"
            )));
        }
        SampleState::new(atom_count(mass_g, self.params.fuel_molar_mass))
    }

    /// Apply one generation of `free_neutrons` to the sample.
    pub fn step(
        &self,
        sample: &mut SampleState,
        generation: u64,
        free_neutrons: u64,
    ) -> GenerationRecord {
        let input = GenerationInput {
            generation,
            free_neutrons,
            remaining: sample.remaining(),
            fission_probability: self.params.fission_probability,
            chunk_size: self.limits.chunk_size,
        };
        let fissions = self.strategy.fissions(&self.source, &input);
        let applied = sample.record_fissions(fissions);
        let spawned_neutrons = applied.saturating_mul(u64::from(self.params.neutrons_per_fission));

        log::debug!(
            "generation {generation}: free={free_neutrons} fissions={applied} spawned={spawned_neutrons} total={}",
            sample.fissioned_atoms()
        );

        GenerationRecord {
            index: generation,
            free_neutrons,
            fissions: applied,
            spawned_neutrons,
            fissioned_total: sample.fissioned_atoms(),
        }
    }

    /// Run generations until the sample is exhausted, the neutrons die out,
    /// or the population ceiling is hit.
    pub fn run(&self, sample: &mut SampleState) -> SimulationReport {
        let mut free_neutrons = self.limits.initial_neutrons;
        let mut generation = 0u64;
        let mut peak_free_neutrons = 0u64;
        let mut history = Vec::new();

        let termination = loop {
            if sample.is_exhausted() {
                break Termination::Exhausted;
            }
            if free_neutrons == 0 {
                break Termination::Quenched;
            }
            if free_neutrons > self.limits.max_free_neutrons {
                break Termination::Saturated;
            }

            generation += 1;
            peak_free_neutrons = peak_free_neutrons.max(free_neutrons);
            let record = self.step(sample, generation, free_neutrons);
            history.push(record);
            free_neutrons = next_free_neutrons(self.policy, record.spawned_neutrons, free_neutrons);
        };

        let energy_per_fission = self.energetics.energy_per_fission_j;
        let report = SimulationReport {
            total_atoms: sample.total_atoms(),
            fissioned_atoms: sample.fissioned_atoms(),
            energy_per_fission,
            energy_total: sample.energy_released(energy_per_fission),
            generations: generation,
            peak_free_neutrons,
            termination,
            mode: self.mode(),
            policy: self.policy,
            seed: self.source.replay_seed(),
            history,
        };

        log::info!(
            "chain reaction {:?} after {} generations: {} of {:.3e} atoms fissioned",
            report.termination,
            report.generations,
            report.fissioned_atoms,
            report.total_atoms
        );
        report
    }

    /// Convenience: build the sample from a mass and run it.
    pub fn run_mass(&self, mass_g: f64) -> FissionResult<SimulationReport> {
        let mut sample = self.sample_for_mass(mass_g)?;
        Ok(self.run(&mut sample))
    }
}
