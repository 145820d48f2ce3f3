//! Fireball radius
//!
//! Cube-root yield scaling of the luminous fireball, after Glasstone & Dolan
//! (1977) §2.12, with a larger coefficient for air bursts where the fireball
//! expands unconfined by the ground.

use super::{EffectModel, ImpactContext};
use crate::core_types::{Kilometers, Megatons, Meters};
use serde::{Deserialize, Serialize};

/// Fireball radius coefficient for surface impacts (m / MT^⅓)
pub const SURFACE_COEFFICIENT: f64 = 120.0;

/// Fireball radius coefficient for air bursts (m / MT^⅓)
pub const AIRBURST_COEFFICIENT: f64 = 180.0;

/// Burst altitude above which the event counts as an air burst (km)
pub const AIRBURST_THRESHOLD_KM: f64 = 5.0;

/// Visualization scaling keeping fireball/crater ratios realistic
pub const FIREBALL_SCALING_FACTOR: f64 = 0.7;

/// Fireball constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FireballConfig {
    /// Coefficient at or below the air-burst threshold
    pub surface_coefficient: f64,
    /// Coefficient above the air-burst threshold
    pub airburst_coefficient: f64,
    /// Air-burst altitude threshold (km)
    pub airburst_threshold_km: f64,
    /// Uniform output scaling
    pub scaling_factor: f64,
}

impl Default for FireballConfig {
    fn default() -> Self {
        Self {
            surface_coefficient: SURFACE_COEFFICIENT,
            airburst_coefficient: AIRBURST_COEFFICIENT,
            airburst_threshold_km: AIRBURST_THRESHOLD_KM,
            scaling_factor: FIREBALL_SCALING_FACTOR,
        }
    }
}

/// Fireball radius model
#[derive(Debug, Clone, Copy, Default)]
pub struct FireballModel {
    config: FireballConfig,
}

impl FireballModel {
    /// Create a model with custom constants
    pub fn new(config: FireballConfig) -> Self {
        Self { config }
    }

    /// Fireball radius: R = C × E^⅓ × scaling
    pub fn fireball_radius(&self, energy: Megatons, burst_altitude: Kilometers) -> Meters {
        if energy.is_degenerate() {
            return Meters::ZERO;
        }

        let coefficient = if *burst_altitude > self.config.airburst_threshold_km {
            self.config.airburst_coefficient
        } else {
            self.config.surface_coefficient
        };

        Meters::new(coefficient * energy.cbrt() * self.config.scaling_factor)
    }
}

impl EffectModel for FireballModel {
    type Output = Meters;

    fn evaluate(&self, energy: Megatons, ctx: &ImpactContext) -> Meters {
        self.fireball_radius(energy, ctx.burst_altitude)
    }
}
