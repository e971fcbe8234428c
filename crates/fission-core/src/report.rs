// ─────────────────────────────────────────────────────────────────────
// Fission Chain — Report
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Text and JSON presentation of a finished run.
//!
//! Exhausted, quenched and saturated runs print identically.

use fission_types::error::{FissionError, FissionResult};
use fission_types::state::SimulationReport;
use serde::Serialize;
use std::fmt;
use std::io::{self, Write};
use std::time::Duration;

/// A report paired with the wall-clock time of the computation.
#[derive(Debug, Clone, Serialize)]
pub struct TimedReport<'a> {
    #[serde(flatten)]
    pub report: &'a SimulationReport,
    pub elapsed_seconds: f64,
}

impl<'a> TimedReport<'a> {
    pub fn new(report: &'a SimulationReport, elapsed: Duration) -> Self {
        TimedReport {
            report,
            elapsed_seconds: elapsed.as_secs_f64(),
        }
    }
}

impl fmt::Display for TimedReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Uranium-235 atoms: {:.2e}", self.report.total_atoms)?;
        writeln!(
            f,
            "Uranium-235 atoms fissioned: {:.2e}",
            self.report.fissioned_atoms as f64
        )?;
        writeln!(f, "Total energy released: {:.2e} J", self.report.energy_total)?;
        writeln!(f, "Execution time: {:.2} s", self.elapsed_seconds)
    }
}

pub fn write_text<W: Write>(out: &mut W, report: &SimulationReport, elapsed: Duration) -> io::Result<()> {
    write!(out, "{}", TimedReport::new(report, elapsed))
}

/// Pretty JSON. A failing writer surfaces as `Io`, not as a JSON error.
pub fn write_json<W: Write>(
    out: &mut W,
    report: &SimulationReport,
    elapsed: Duration,
) -> FissionResult<()> {
    serde_json::to_writer_pretty(&mut *out, &TimedReport::new(report, elapsed)).map_err(|e| {
        if e.is_io() {
            FissionError::Io(e.into())
        } else {
            FissionError::Json(e)
        }
    })?;
    writeln!(out)?;
    Ok(())
}
