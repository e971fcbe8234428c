// ─────────────────────────────────────────────────────────────────────
// Fission Chain — Main Entry Point
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! `fission`: read a U-235 mass, run the chain reaction, print totals.

mod cli;
mod input;

use clap::Parser;
use cli::Cli;
use fission_core::report;
use fission_core::rng::SeededSource;
use fission_core::ChainReactionSimulator;
use fission_types::error::FissionResult;
use std::io::{self, Write};
use std::process::ExitCode;
use std::time::Instant;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> FissionResult<()> {
    let config = cli.run_config()?;
    log::debug!("run config: {config:?}");

    let mass = match &cli.mass {
        Some(raw) => input::parse_mass(raw)?,
        None => {
            let stdin = io::stdin();
            let mut lines = stdin.lock();
            // With --json, stdout carries only the JSON document.
            if cli.json {
                input::prompt_mass(&mut lines, &mut io::stderr())?
            } else {
                input::prompt_mass(&mut lines, &mut io::stdout())?
            }
        }
    };

    // Timed from just after the input is read.
    let start = Instant::now();
    let source = match cli.seed {
        Some(seed) => SeededSource::new(seed),
        None => SeededSource::from_entropy(),
    };
    let simulator = ChainReactionSimulator::from_config(&config, source)?;
    let result = simulator.run_mass(mass)?;
    let elapsed = start.elapsed();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if cli.json {
        report::write_json(&mut out, &result, elapsed)?;
    } else {
        report::write_text(&mut out, &result, elapsed)?;
    }
    out.flush()?;
    Ok(())
}
