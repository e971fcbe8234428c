// ─────────────────────────────────────────────────────────────────────
// Fission Chain — Config
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use crate::constants::{
    BA144_MASS, DEFAULT_FISSION_PROBABILITY, DEFAULT_NEUTRONS_PER_FISSION, KR89_MASS,
    NEUTRON_MASS, U235_MOLAR_MASS,
};
use crate::error::{FissionError, FissionResult};
use serde::{Deserialize, Serialize};

/// Top-level run configuration.
/// Every section is optional in JSON; absent sections take the U-235 reference values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(default)]
    pub reaction: ReactionParameters,
    #[serde(default)]
    pub limits: SimulationLimits,
    #[serde(default)]
    pub policy: NeutronCarryPolicy,
    #[serde(default)]
    pub mode: ExecutionMode,
}

/// Reaction constants, immutable for a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReactionParameters {
    /// Fuel molar mass [g/mol]
    #[serde(default = "default_fuel_molar_mass")]
    pub fuel_molar_mass: f64,
    /// Neutron mass [u]
    #[serde(default = "default_neutron_mass")]
    pub neutron_mass: f64,
    /// Heavy fission fragment mass [u] (Ba-144 by default)
    #[serde(default = "default_heavy_fragment_mass")]
    pub heavy_fragment_mass: f64,
    /// Light fission fragment mass [u] (Kr-89 by default)
    #[serde(default = "default_light_fragment_mass")]
    pub light_fragment_mass: f64,
    /// Probability that one free neutron triggers a fission, in [0, 1].
    #[serde(default = "default_fission_probability")]
    pub fission_probability: f64,
    /// Free neutrons spawned by each fission.
    #[serde(default = "default_neutrons_per_fission")]
    pub neutrons_per_fission: u32,
}

fn default_fuel_molar_mass() -> f64 {
    U235_MOLAR_MASS
}
fn default_neutron_mass() -> f64 {
    NEUTRON_MASS
}
fn default_heavy_fragment_mass() -> f64 {
    BA144_MASS
}
fn default_light_fragment_mass() -> f64 {
    KR89_MASS
}
fn default_fission_probability() -> f64 {
    DEFAULT_FISSION_PROBABILITY
}
fn default_neutrons_per_fission() -> u32 {
    DEFAULT_NEUTRONS_PER_FISSION
}

impl Default for ReactionParameters {
    fn default() -> Self {
        ReactionParameters {
            fuel_molar_mass: default_fuel_molar_mass(),
            neutron_mass: default_neutron_mass(),
            heavy_fragment_mass: default_heavy_fragment_mass(),
            light_fragment_mass: default_light_fragment_mass(),
            fission_probability: default_fission_probability(),
            neutrons_per_fission: default_neutrons_per_fission(),
        }
    }
}

impl ReactionParameters {
    pub fn validate(&self) -> FissionResult<()> {
        let masses = [
            ("fuel_molar_mass", self.fuel_molar_mass),
            ("neutron_mass", self.neutron_mass),
            ("heavy_fragment_mass", self.heavy_fragment_mass),
            ("light_fragment_mass", self.light_fragment_mass),
        ];
        for (name, value) in masses {
            if !value.is_finite() || value <= 0.0 {
                return Err(FissionError::ConfigError(format!(
                    "{name} must be finite and > 0, got {value}"
                )));
            }
        }
        let p = self.fission_probability;
        if !p.is_finite() || !(0.0..=1.0).contains(&p) {
            return Err(FissionError::ConfigError(format!(
                "fission_probability must lie in [0, 1], got {p}"
            )));
        }
        if self.neutrons_per_fission == 0 {
            return Err(FissionError::ConfigError(
                "neutrons_per_fission must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Loop limits and work partitioning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationLimits {
    /// Free neutrons in the first generation (default: 1)
    #[serde(default = "default_initial_neutrons")]
    pub initial_neutrons: u64,
    /// Population ceiling. A run whose next generation would exceed it stops
    /// as saturated (default: i32::MAX, the width of a 32-bit neutron counter).
    #[serde(default = "default_max_free_neutrons")]
    pub max_free_neutrons: u64,
    /// Neutrons evaluated per random stream (default: 4096)
    #[serde(default = "default_chunk_size")]
    pub chunk_size: u64,
}

fn default_initial_neutrons() -> u64 {
    1
}
fn default_max_free_neutrons() -> u64 {
    i32::MAX as u64
}
fn default_chunk_size() -> u64 {
    4096
}

impl Default for SimulationLimits {
    fn default() -> Self {
        SimulationLimits {
            initial_neutrons: default_initial_neutrons(),
            max_free_neutrons: default_max_free_neutrons(),
            chunk_size: default_chunk_size(),
        }
    }
}

impl SimulationLimits {
    pub fn validate(&self) -> FissionResult<()> {
        if self.initial_neutrons == 0 {
            return Err(FissionError::ConfigError(
                "initial_neutrons must be > 0".to_string(),
            ));
        }
        if self.chunk_size == 0 {
            return Err(FissionError::ConfigError(
                "chunk_size must be > 0".to_string(),
            ));
        }
        if self.max_free_neutrons < self.initial_neutrons {
            return Err(FissionError::ConfigError(format!(
                "max_free_neutrons ({}) must be >= initial_neutrons ({})",
                self.max_free_neutrons, self.initial_neutrons
            )));
        }
        Ok(())
    }
}

/// How the next generation's free-neutron count follows from the current one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NeutronCarryPolicy {
    /// Every spawned neutron becomes a free neutron of the next generation.
    #[default]
    CarryForwardAll,
    /// Spawned neutrons minus the generation just consumed; negative means zero.
    SubtractCurrentGeneration,
}

/// Execution mode of the per-generation neutron pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ExecutionMode {
    Sequential,
    /// Rayon pass; `threads: None` uses the global pool.
    Parallel {
        #[serde(default)]
        threads: Option<usize>,
    },
}

impl Default for ExecutionMode {
    fn default() -> Self {
        ExecutionMode::Parallel { threads: None }
    }
}

impl RunConfig {
    /// Load from a JSON file. Missing fields fall back to defaults.
    pub fn from_file(path: &str) -> FissionResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> FissionResult<()> {
        self.reaction.validate()?;
        self.limits.validate()?;
        if let ExecutionMode::Parallel { threads: Some(0) } = self.mode {
            return Err(FissionError::ConfigError(
                "parallel thread count must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}
