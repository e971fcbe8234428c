// ─────────────────────────────────────────────────────────────────────
// Fission Chain — Physics
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Closed-form energetics of U-235 + n → Ba-144 + Kr-89 + 3n.
//!
//! Mass defect in atomic mass units, conversion to kilograms,
//! E = Δm·c², and the atom count of a sample.

use fission_types::config::ReactionParameters;
use fission_types::constants::{AMU_PER_KG, AVOGADRO, PROMPT_NEUTRONS, SPEED_OF_LIGHT};
use serde::Serialize;

/// Mass defect Δm [u] of one fission.
///
///   Δm = (m_fuel + m_n) − (m_1 + m_2 + 3·m_n)
pub fn mass_defect(
    molar_mass_fuel: f64,
    neutron_mass: f64,
    product_mass_1: f64,
    product_mass_2: f64,
) -> f64 {
    let reactants = molar_mass_fuel + neutron_mass;
    let products = product_mass_1 + product_mass_2 + PROMPT_NEUTRONS * neutron_mass;
    reactants - products
}

/// Atomic mass units → kilograms.
pub fn mass_defect_to_kg(delta_m: f64) -> f64 {
    delta_m / AMU_PER_KG
}

/// Energy released by one fission [J]: E = Δm·c².
pub fn energy_per_fission(delta_m_kg: f64) -> f64 {
    delta_m_kg * SPEED_OF_LIGHT.powi(2)
}

/// Number of atoms in a sample: (m / M)·N_A.
///
/// No validation here; negative or non-finite mass is rejected at the input boundary.
pub fn atom_count(sample_mass_g: f64, molar_mass_g_per_mol: f64) -> f64 {
    let moles = sample_mass_g / molar_mass_g_per_mol;
    moles * AVOGADRO
}

/// Per-run energetics, computed once before the chain loop starts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReactionEnergetics {
    /// Mass defect [u]
    pub mass_defect_u: f64,
    /// Mass defect [kg]
    pub mass_defect_kg: f64,
    /// Energy per fission [J]
    pub energy_per_fission_j: f64,
}

impl ReactionEnergetics {
    pub fn from_parameters(params: &ReactionParameters) -> Self {
        let mass_defect_u = mass_defect(
            params.fuel_molar_mass,
            params.neutron_mass,
            params.heavy_fragment_mass,
            params.light_fragment_mass,
        );
        let mass_defect_kg = mass_defect_to_kg(mass_defect_u);
        let energy_per_fission_j = energy_per_fission(mass_defect_kg);
        if energy_per_fission_j <= 0.0 {
            log::warn!(
                "non-positive energy per fission ({energy_per_fission_j:e} J): products outweigh reactants"
            );
        }
        ReactionEnergetics {
            mass_defect_u,
            mass_defect_kg,
            energy_per_fission_j,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fission_types::constants::{BA144_MASS, KR89_MASS, NEUTRON_MASS, U235_MOLAR_MASS};

    #[test]
    fn test_reference_mass_defect() {
        let dm = mass_defect(U235_MOLAR_MASS, NEUTRON_MASS, BA144_MASS, KR89_MASS);
        // 236.05259481588 − 235.86657774764
        assert!((dm - 0.18601706824).abs() < 1e-9, "Δm = {dm}");
    }

    #[test]
    fn test_mass_defect_counts_three_prompt_neutrons() {
        // Reactants carry one neutron, products three: net −2·m_n
        let dm = mass_defect(10.0, 1.0, 4.0, 3.0);
        assert!((dm - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_mass_to_kg() {
        assert!((mass_defect_to_kg(6.022e26) - 1.0).abs() < 1e-12);
        let kg = mass_defect_to_kg(0.18601706824);
        assert!((kg - 3.0889582902e-28).abs() / 3.0889582902e-28 < 1e-9);
    }

    #[test]
    fn test_energy_per_fission_emc2() {
        let e = energy_per_fission(1.0);
        assert!((e - 2.998e8 * 2.998e8).abs() / e < 1e-15);
        let reference = energy_per_fission(mass_defect_to_kg(0.18601706824));
        // ~174 MeV
        assert!((reference - 2.7763569e-11).abs() / 2.7763569e-11 < 1e-6);
    }

    #[test]
    fn test_one_mole_is_avogadro() {
        let n = atom_count(U235_MOLAR_MASS, U235_MOLAR_MASS);
        assert!((n - 6.02214076e23).abs() / 6.02214076e23 < 1e-9);
    }

    #[test]
    fn test_one_gram_atom_count() {
        let n = atom_count(1.0, U235_MOLAR_MASS);
        assert!((n - 2.562134135e21).abs() / 2.562134135e21 < 1e-9);
    }

    #[test]
    fn test_zero_mass_has_no_atoms() {
        assert_eq!(atom_count(0.0, U235_MOLAR_MASS), 0.0);
    }

    #[test]
    fn test_energetics_from_default_parameters() {
        let en = ReactionEnergetics::from_parameters(&ReactionParameters::default());
        assert!((en.mass_defect_u - 0.18601706824).abs() < 1e-9);
        assert_eq!(en.mass_defect_kg, mass_defect_to_kg(en.mass_defect_u));
        assert_eq!(en.energy_per_fission_j, energy_per_fission(en.mass_defect_kg));
        assert!(en.energy_per_fission_j > 0.0);
    }
}
