//! Crater Scaling Model (Schmidt & Holsapple π-scaling)
//!
//! Estimates final crater diameter and depth from impact energy, projectile
//! density, impact angle and target material, in the strength regime.
//!
//! # Scientific References
//!
//! - Schmidt, R.M., Housen, K.R. (1987). "Some recent advances in the scaling
//!   of impact and explosion cratering" Int. J. Impact Eng. 5, 543-560
//! - Holsapple, K.A. (1993). "The scaling of impact processes in planetary
//!   sciences" Annu. Rev. Earth Planet. Sci. 21, 333-373
//! - Melosh (1989), Chapter 7: transient-to-final crater collapse
//!
//! # Model Overview
//!
//! 1. Transient diameter from a π-scaling law with target density/strength
//! 2. Angle correction √sin(θ) for oblique impacts
//! 3. Collapse to a simple final crater (×1.3) with depth/diameter 0.22
//! 4. Physical floor: no crater smaller than 8 projectile diameters

use super::{EffectModel, ImpactContext};
use crate::core_types::{Megatons, Meters, TargetType};
use serde::{Deserialize, Deserializer, Serialize};

/// Final/transient diameter ratio for simple craters (Melosh 1989)
pub const SIMPLE_CRATER_COLLAPSE_FACTOR: f64 = 1.3;

/// Depth to diameter ratio of a fresh simple crater
pub const DEPTH_TO_DIAMETER_RATIO: f64 = 0.22;

/// Smallest possible crater, in projectile diameters
pub const MIN_DIAMETER_RATIO: f64 = 8.0;

/// Depth of the degenerate (zero-energy) crater, in projectile diameters
pub const DEGENERATE_DEPTH_RATIO: f64 = 1.6;

/// Material properties of the surface struck
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetMaterial {
    /// Bulk density (kg/m³)
    pub density_kg_m3: f64,
    /// Effective strength (Pa)
    pub strength_pa: f64,
    /// π-scaling coefficient K1
    pub k1: f64,
}

impl TargetMaterial {
    /// Competent crustal rock: ρ = 2500 kg/m³, Y = 10 MPa, K1 = 1.2
    pub const fn rock() -> Self {
        Self {
            density_kg_m3: 2500.0,
            strength_pa: 1e7,
            k1: 1.2,
        }
    }

    /// Water column treated as a weak target: ρ = 1000 kg/m³, Y = 0.1 MPa, K1 = 1.5
    pub const fn water() -> Self {
        Self {
            density_kg_m3: 1000.0,
            strength_pa: 0.1e6,
            k1: 1.5,
        }
    }
}

/// Material as written in a config file; absent fields keep the preset
#[derive(Debug, Deserialize)]
struct MaterialOverrides {
    density_kg_m3: Option<f64>,
    strength_pa: Option<f64>,
    k1: Option<f64>,
}

impl MaterialOverrides {
    fn apply(self, preset: TargetMaterial) -> TargetMaterial {
        TargetMaterial {
            density_kg_m3: self.density_kg_m3.unwrap_or(preset.density_kg_m3),
            strength_pa: self.strength_pa.unwrap_or(preset.strength_pa),
            k1: self.k1.unwrap_or(preset.k1),
        }
    }
}

fn rock_with_overrides<'de, D>(deserializer: D) -> Result<TargetMaterial, D::Error>
where
    D: Deserializer<'de>,
{
    MaterialOverrides::deserialize(deserializer).map(|o| o.apply(TargetMaterial::rock()))
}

fn water_with_overrides<'de, D>(deserializer: D) -> Result<TargetMaterial, D::Error>
where
    D: Deserializer<'de>,
{
    MaterialOverrides::deserialize(deserializer).map(|o| o.apply(TargetMaterial::water()))
}

/// Crater scaling constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CraterConfig {
    /// Properties used for land targets
    #[serde(deserialize_with = "rock_with_overrides")]
    pub land: TargetMaterial,
    /// Properties used for water targets
    #[serde(deserialize_with = "water_with_overrides")]
    pub water: TargetMaterial,
    /// Final/transient diameter ratio
    pub collapse_factor: f64,
    /// Final depth/diameter ratio
    pub depth_ratio: f64,
}

impl Default for CraterConfig {
    fn default() -> Self {
        Self {
            land: TargetMaterial::rock(),
            water: TargetMaterial::water(),
            collapse_factor: SIMPLE_CRATER_COLLAPSE_FACTOR,
            depth_ratio: DEPTH_TO_DIAMETER_RATIO,
        }
    }
}

impl CraterConfig {
    /// Material for the given target type
    pub fn material(&self, target: TargetType) -> TargetMaterial {
        match target {
            TargetType::Land => self.land,
            TargetType::Water => self.water,
        }
    }
}

/// Final crater geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CraterResult {
    /// Rim-to-rim diameter
    pub diameter: Meters,
    /// Floor depth below the pre-impact surface
    pub depth: Meters,
}

impl CraterResult {
    /// Crater radius (half the diameter)
    pub fn radius(&self) -> Meters {
        self.diameter / 2.0
    }
}

/// π-scaling crater model
#[derive(Debug, Clone, Copy, Default)]
pub struct CraterModel {
    config: CraterConfig,
}

impl CraterModel {
    /// Create a model with custom constants
    pub fn new(config: CraterConfig) -> Self {
        Self { config }
    }

    /// Crater dimensions for one impact.
    ///
    /// # Arguments
    /// * `projectile_diameter` - Impactor diameter
    /// * `energy` - Impact energy (MT)
    /// * `angle_deg` - Impact angle from horizontal (90 = vertical)
    /// * `projectile_density_kg_m3` - Impactor bulk density
    /// * `target` - Surface struck
    ///
    /// The depth is taken from the scaled diameter before the floor is
    /// applied, so a floored crater keeps the shallower scaled depth.
    pub fn crater_metrics(
        &self,
        projectile_diameter: Meters,
        energy: Megatons,
        angle_deg: f64,
        projectile_density_kg_m3: f64,
        target: TargetType,
    ) -> CraterResult {
        let min_diameter = projectile_diameter * MIN_DIAMETER_RATIO;

        if energy.is_degenerate() {
            return CraterResult {
                diameter: min_diameter,
                depth: projectile_diameter * DEGENERATE_DEPTH_RATIO,
            };
        }

        let material = self.config.material(target);
        let energy_joules = *energy.to_joules();

        // √sin(θ): grazing impacts excavate less, vertical ones are unchanged
        let angle_factor = angle_deg.to_radians().sin().max(0.0).sqrt();

        let transient = material.k1
            * (projectile_density_kg_m3 / material.density_kg_m3).cbrt()
            * (energy_joules / material.strength_pa).cbrt()
            * angle_factor;

        let final_diameter = transient * self.config.collapse_factor;
        let depth = final_diameter * self.config.depth_ratio;

        if final_diameter < *min_diameter {
            tracing::debug!(
                "Crater floor applied: scaled {:.1} m < {:.1} m",
                final_diameter,
                *min_diameter
            );
        }

        CraterResult {
            diameter: Meters::new(final_diameter.max(*min_diameter)),
            depth: Meters::new(depth),
        }
    }
}

impl EffectModel for CraterModel {
    type Output = CraterResult;

    fn evaluate(&self, energy: Megatons, ctx: &ImpactContext) -> CraterResult {
        self.crater_metrics(
            ctx.projectile_diameter,
            energy,
            ctx.angle_deg,
            ctx.projectile_density_kg_m3,
            ctx.target,
        )
    }
}
