// ─────────────────────────────────────────────────────────────────────
// Fission Chain — Fission Core
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! U-235 fission chain reaction as a generational branching process.
//!
//! Closed-form energetics, per-chunk random streams, sequential and
//! rayon-parallel generation steps, the chain-reaction loop, and report text.

pub mod physics;
pub mod report;
pub mod rng;
pub mod simulator;
pub mod strategy;

pub use simulator::ChainReactionSimulator;
