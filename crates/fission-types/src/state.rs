// ─────────────────────────────────────────────────────────────────────
// Fission Chain — State
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use crate::config::{ExecutionMode, NeutronCarryPolicy};
use crate::error::{FissionError, FissionResult};
use serde::{Deserialize, Serialize};

/// Fuel sample being consumed by the chain reaction.
///
/// `total_atoms` is fixed at construction. Only whole atoms can fission, so the
/// loop consumes at most `fissionable_atoms = floor(total_atoms)`.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleState {
    total_atoms: f64,
    fissionable_atoms: u64,
    fissioned_atoms: u64,
}

impl SampleState {
    pub fn new(total_atoms: f64) -> FissionResult<Self> {
        if !total_atoms.is_finite() || total_atoms < 0.0 {
            return Err(FissionError::InvalidInput(format!(
                "atom count must be finite and >= 0, got {total_atoms}"
            )));
        }
        // `as` saturates at u64::MAX for gram-scale samples (~1e21 atoms).
        let fissionable_atoms = total_atoms.floor() as u64;
        Ok(SampleState {
            total_atoms,
            fissionable_atoms,
            fissioned_atoms: 0,
        })
    }

    pub fn total_atoms(&self) -> f64 {
        self.total_atoms
    }

    pub fn fissionable_atoms(&self) -> u64 {
        self.fissionable_atoms
    }

    pub fn fissioned_atoms(&self) -> u64 {
        self.fissioned_atoms
    }

    /// Atoms still available for fission.
    pub fn remaining(&self) -> u64 {
        self.fissionable_atoms - self.fissioned_atoms
    }

    pub fn is_exhausted(&self) -> bool {
        self.fissioned_atoms >= self.fissionable_atoms
    }

    /// Apply one generation's fissions. Never exceeds the fissionable capacity.
    /// Returns the number actually applied.
    pub fn record_fissions(&mut self, fissions: u64) -> u64 {
        let applied = fissions.min(self.remaining());
        self.fissioned_atoms += applied;
        applied
    }

    /// Energy released so far [J].
    pub fn energy_released(&self, energy_per_fission: f64) -> f64 {
        self.fissioned_atoms as f64 * energy_per_fission
    }
}

/// How a run ended. All three are normal outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Termination {
    /// Every fissionable atom was consumed.
    Exhausted,
    /// Free neutrons died out first.
    Quenched,
    /// Next generation would exceed the population ceiling.
    Saturated,
}

/// One generation of the branching process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRecord {
    /// 1-based generation index.
    pub index: u64,
    /// Free neutrons entering the generation.
    pub free_neutrons: u64,
    /// Fissions applied in this generation.
    pub fissions: u64,
    /// Neutrons spawned by those fissions.
    pub spawned_neutrons: u64,
    /// Cumulative fissioned atoms after this generation.
    pub fissioned_total: u64,
}

/// Structured result of a simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub total_atoms: f64,
    pub fissioned_atoms: u64,
    /// Energy per fission [J]
    pub energy_per_fission: f64,
    /// Total energy released [J]
    pub energy_total: f64,
    pub generations: u64,
    pub peak_free_neutrons: u64,
    pub termination: Termination,
    pub mode: ExecutionMode,
    pub policy: NeutronCarryPolicy,
    /// Seed of the draw source; replays the run when passed back as `--seed`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub history: Vec<GenerationRecord>,
}
