// ─────────────────────────────────────────────────────────────────────
// Fission Chain — Command Line
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use clap::{Parser, ValueEnum};
use fission_types::config::{ExecutionMode, NeutronCarryPolicy, RunConfig};
use fission_types::error::{FissionError, FissionResult};

/// U-235 fission chain-reaction simulator.
#[derive(Debug, Parser)]
#[command(name = "fission", version, about)]
pub struct Cli {
    /// Mass of Uranium-235 in grams; prompts on stdin when omitted
    #[arg(long, allow_hyphen_values = true)]
    pub mass: Option<String>,

    /// Generation step: single-threaded or rayon-parallel
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Worker threads for the parallel step (implies --mode parallel)
    #[arg(long)]
    pub threads: Option<usize>,

    /// Seed for the per-chunk random streams; random when omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// How spawned neutrons carry into the next generation
    #[arg(long, value_enum)]
    pub policy: Option<PolicyArg>,

    /// JSON run configuration; flags override its values
    #[arg(long)]
    pub config: Option<String>,

    /// Emit the report as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Sequential,
    Parallel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PolicyArg {
    CarryForwardAll,
    SubtractCurrentGeneration,
}

impl From<PolicyArg> for NeutronCarryPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::CarryForwardAll => NeutronCarryPolicy::CarryForwardAll,
            PolicyArg::SubtractCurrentGeneration => NeutronCarryPolicy::SubtractCurrentGeneration,
        }
    }
}

impl Cli {
    /// Config file (or defaults) with flag overrides applied, validated.
    pub fn run_config(&self) -> FissionResult<RunConfig> {
        let mut config = match &self.config {
            Some(path) => RunConfig::from_file(path)?,
            None => RunConfig::default(),
        };

        config.mode = match (self.mode, self.threads) {
            (Some(ModeArg::Sequential), Some(_)) => {
                return Err(FissionError::ConfigError(
                    "--threads applies only to --mode parallel".to_string(),
                ))
            }
            (Some(ModeArg::Sequential), None) => ExecutionMode::Sequential,
            (Some(ModeArg::Parallel), threads) | (None, threads @ Some(_)) => {
                ExecutionMode::Parallel { threads }
            }
            (None, None) => config.mode,
        };
        if let Some(policy) = self.policy {
            config.policy = policy.into();
        }

        config.validate()?;
        Ok(config)
    }
}
