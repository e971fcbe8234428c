// ─────────────────────────────────────────────────────────────────────
// Fission Chain — Constants
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
/// Speed of light (m/s).
/// NOTE: three significant digits, not the exact SI 299_792_458.
pub const SPEED_OF_LIGHT: f64 = 2.998e8;

/// Avogadro's number (1/mol) - exact SI value.
pub const AVOGADRO: f64 = 6.02214076e23;

/// Atomic mass units per kilogram (Avogadro scaled by 1000, rounded).
pub const AMU_PER_KG: f64 = 6.022e26;

/// U-235 molar mass (g/mol)
pub const U235_MOLAR_MASS: f64 = 235.0439299;

/// Neutron mass (u)
pub const NEUTRON_MASS: f64 = 1.00866491588;

/// Ba-144 mass (u)
pub const BA144_MASS: f64 = 143.922953;

/// Kr-89 mass (u)
pub const KR89_MASS: f64 = 88.91763;

/// Prompt neutrons in U-235 + n → Ba-144 + Kr-89 + 3n.
pub const PROMPT_NEUTRONS: f64 = 3.0;

/// Probability that a free neutron causes a fission.
pub const DEFAULT_FISSION_PROBABILITY: f64 = 0.7;

/// Neutrons released per fission.
pub const DEFAULT_NEUTRONS_PER_FISSION: u32 = 3;
