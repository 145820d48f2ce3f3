//! Effect-to-crater ratio cross-checks
//!
//! Informational only: compares how far each effect reaches against the
//! crater radius. A ratio above 1 means the effect extends beyond the rim.

use super::{BlastEffects, CraterResult, OverpressureLevel, ThermalCategory, ThermalEffects};
use crate::core_types::Meters;
use serde::{Deserialize, Serialize};

/// Annotation attached to every report
pub const RATIO_NOTE: &str = "Ratios > 1 indicate the effect is more extensive than the crater";

/// Effect radius / crater radius ratios
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct VerificationReport {
    /// Fireball radius / crater radius
    pub fireball_vs_crater: f64,
    /// 1 psi blast radius / crater radius
    pub blast_1psi_vs_crater: f64,
    /// Lethal thermal radius / crater radius
    pub thermal_lethal_vs_crater: f64,
}

impl VerificationReport {
    /// True when the fireball reaches beyond the crater rim
    pub fn fireball_exceeds_crater(&self) -> bool {
        self.fireball_vs_crater > 1.0
    }

    /// True when the 1 psi ring reaches beyond the crater rim
    pub fn blast_exceeds_crater(&self) -> bool {
        self.blast_1psi_vs_crater > 1.0
    }

    /// True when lethal thermal exposure reaches beyond the crater rim
    pub fn thermal_exceeds_crater(&self) -> bool {
        self.thermal_lethal_vs_crater > 1.0
    }
}

/// Computes the ratio cross-checks
#[derive(Debug, Clone, Copy, Default)]
pub struct RelationshipVerifier;

impl RelationshipVerifier {
    /// Ratios of fireball, 1 psi and lethal thermal radii to crater radius.
    ///
    /// A zero-size crater yields zero ratios rather than infinities.
    pub fn verify(
        &self,
        crater: &CraterResult,
        fireball_radius: Meters,
        thermal: &ThermalEffects,
        blast: &BlastEffects,
    ) -> VerificationReport {
        let crater_radius = *crater.radius();
        let ratio = |radius: Meters| {
            if crater_radius > 0.0 {
                *radius / crater_radius
            } else {
                0.0
            }
        };

        VerificationReport {
            fireball_vs_crater: ratio(fireball_radius),
            blast_1psi_vs_crater: ratio(blast.radius(OverpressureLevel::Psi1)),
            thermal_lethal_vs_crater: ratio(thermal.radius(ThermalCategory::Lethal)),
        }
    }
}
