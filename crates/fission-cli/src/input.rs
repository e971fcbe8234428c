// ─────────────────────────────────────────────────────────────────────
// Fission Chain — Input
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Sample mass at the process boundary. Nothing invalid gets past here.

use fission_types::error::{FissionError, FissionResult};
use std::io::{BufRead, Write};

pub const PROMPT: &str = "Enter the mass of Uranium-235 in grams: ";

/// Parse a mass in grams. Rejects non-numeric, non-finite and negative values.
pub fn parse_mass(raw: &str) -> FissionResult<f64> {
    let trimmed = raw.trim();
    let mass: f64 = trimmed.parse().map_err(|_| {
        FissionError::InvalidInput(format!("'{trimmed}' is not a mass in grams"))
    })?;
    if !mass.is_finite() {
        return Err(FissionError::InvalidInput(format!(
            "mass must be finite, got {trimmed}"
        )));
    }
    if mass < 0.0 {
        return Err(FissionError::InvalidInput(format!(
            "mass must be >= 0 g, got {mass}"
        )));
    }
    Ok(mass)
}

/// Print the prompt and read one line.
pub fn prompt_mass<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> FissionResult<f64> {
    write!(out, "{PROMPT}")?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(FissionError::InvalidInput(
            "no mass given on standard input".to_string(),
        ));
    }
    parse_mass(&line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_accepts_plain_and_padded_numbers() {
        assert_eq!(parse_mass("12.5").unwrap(), 12.5);
        assert_eq!(parse_mass("  12.5\n").unwrap(), 12.5);
        assert_eq!(parse_mass("1e-3").unwrap(), 1e-3);
        assert_eq!(parse_mass("0").unwrap(), 0.0);
    }

    #[test]
    fn test_rejects_invalid_values() {
        for raw in ["abc", "", "-1", "-0.001", "NaN", "inf", "-inf", "1.0.0"] {
            match parse_mass(raw) {
                Err(FissionError::InvalidInput(_)) => {}
                other => panic!("expected InvalidInput for {raw:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_prompt_reads_one_line() {
        let mut input = Cursor::new("3.25\nignored\n");
        let mut out = Vec::new();
        let mass = prompt_mass(&mut input, &mut out).unwrap();
        assert_eq!(mass, 3.25);
        assert_eq!(String::from_utf8(out).unwrap(), PROMPT);
    }

    #[test]
    fn test_prompt_on_empty_stdin() {
        let mut input = Cursor::new("");
        let mut out = Vec::new();
        assert!(matches!(
            prompt_mass(&mut input, &mut out),
            Err(FissionError::InvalidInput(_))
        ));
    }
}
