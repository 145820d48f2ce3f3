//! Impact-effect physics models
//!
//! Each model is a stateless struct parameterized by a config of named
//! constants. Given one energy result every downstream model is an
//! independent pure function, so the pipeline may evaluate them in any
//! order and tests can exercise or replace them one at a time.
//!
//! # Scientific References
//!
//! - Collins, G.S., Melosh, H.J., Marcus, R.A. (2005). "Earth Impact Effects
//!   Program" Meteoritics & Planetary Science 40(6), 817-840
//! - Melosh, H.J. (1989). "Impact Cratering: A Geologic Process"
//! - Glasstone, S., Dolan, P.J. (1977). "The Effects of Nuclear Weapons"
//! - Atkinson, G.M., Boore, D.M. (2006). "Earthquake ground-motion prediction
//!   equations for eastern North America" BSSA 96(6), 2181-2205

pub mod blast;
pub mod crater;
pub mod energy;
pub mod fireball;
pub mod seismic;
pub mod thermal;
pub mod tsunami;
pub mod verification;

pub use blast::{BlastConfig, BlastEffects, BlastLevelEffect, BlastModel, OverpressureLevel};
pub use crater::{CraterConfig, CraterModel, CraterResult, TargetMaterial};
pub use energy::{EnergyCalculator, EnergyResult};
pub use fireball::{FireballConfig, FireballModel};
pub use seismic::{IntensitySample, MmiCategory, SeismicConfig, SeismicEffects, SeismicModel};
pub use thermal::{ThermalCategory, ThermalConfig, ThermalEffects, ThermalModel};
pub use tsunami::{TsunamiClass, TsunamiConfig, TsunamiEffects, TsunamiModel};
pub use verification::{RelationshipVerifier, VerificationReport};

use crate::core_types::{
    ImpactorParameters, Joules, Kilometers, Megatons, Meters, SoilType, TargetType,
};

/// Everything a downstream model may need besides the energy in megatons.
///
/// Built once per pipeline run from the validated parameters and the
/// energy result; models read only the fields they care about.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpactContext {
    /// Kinetic energy in joules (seismic model works in SI)
    pub energy_joules: Joules,
    /// Projectile diameter
    pub projectile_diameter: Meters,
    /// Projectile bulk density (kg/m³)
    pub projectile_density_kg_m3: f64,
    /// Impact angle from horizontal (degrees)
    pub angle_deg: f64,
    /// Surface struck
    pub target: TargetType,
    /// Burst altitude above ground
    pub burst_altitude: Kilometers,
    /// Depth of the energy release below the surface (0 for surface impacts)
    pub impact_depth: Kilometers,
    /// Ocean depth (m), meaningful for water targets only
    pub water_depth_m: f64,
    /// Site geology for seismic amplification
    pub soil: SoilType,
}

impl ImpactContext {
    /// Assemble the context for one impact.
    pub fn new(params: &ImpactorParameters, energy: &EnergyResult) -> Self {
        Self {
            energy_joules: energy.energy,
            projectile_diameter: Meters::new(params.diameter_m),
            projectile_density_kg_m3: params.density_kg_m3,
            angle_deg: params.angle_deg,
            target: params.target_type,
            burst_altitude: Kilometers::new(params.burst_altitude_km),
            impact_depth: Kilometers::ZERO,
            water_depth_m: params.effective_water_depth_m(),
            soil: params.soil_type,
        }
    }
}

/// A single impact-effect model: energy plus context in, one result out.
///
/// Implementations must be pure; the pipeline shares them across threads.
pub trait EffectModel: Send + Sync {
    /// Result produced by this model
    type Output;

    /// Evaluate the model for one impact.
    fn evaluate(&self, energy: Megatons, ctx: &ImpactContext) -> Self::Output;
}
