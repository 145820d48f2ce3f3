//! Impactor kinetic energy
//!
//! Converts diameter, density and velocity into mass and kinetic energy.
//! A spherical projectile is assumed. Above 30 km/s the relativistic form
//! is used; at meteoroid speeds the two agree to about one part in 10⁸, so
//! the switch is continuous for all practical purposes.

use crate::core_types::{Joules, Megatons};
use serde::{Deserialize, Serialize};

/// Speed of light in vacuum (m/s, exact SI definition)
pub const SPEED_OF_LIGHT_M_S: f64 = 299_792_458.0;

/// Velocity above which the relativistic energy form is used (m/s)
pub const RELATIVISTIC_THRESHOLD_M_S: f64 = 30_000.0;

/// Velocities at or below this are taken to be in km/s (m/s)
///
/// No natural impactor moves slower than ~11 km/s (Earth escape velocity),
/// so a value this small can only be a km/s figure.
pub const VELOCITY_UNIT_GUARD_M_S: f64 = 1000.0;

/// Mass, energy and normalized velocity of the impactor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnergyResult {
    /// Projectile mass (kg)
    pub mass_kg: f64,
    /// Kinetic energy
    pub energy: Joules,
    /// Impact velocity after unit normalization (m/s)
    pub velocity_ms: f64,
}

impl EnergyResult {
    /// Kinetic energy in megatons of TNT
    pub fn megatons(&self) -> Megatons {
        self.energy.to_megatons()
    }
}

/// Computes impactor mass and kinetic energy
#[derive(Debug, Clone, Copy, Default)]
pub struct EnergyCalculator;

impl EnergyCalculator {
    /// Calculate mass and kinetic energy for a spherical impactor.
    ///
    /// # Arguments
    /// * `diameter_m` - Projectile diameter (m)
    /// * `density_kg_m3` - Bulk density (kg/m³)
    /// * `velocity` - Impact velocity (m/s, or km/s when ≤ 1000)
    pub fn calculate(&self, diameter_m: f64, density_kg_m3: f64, velocity: f64) -> EnergyResult {
        let velocity_ms = normalize_velocity(velocity);
        let mass_kg = sphere_mass(diameter_m, density_kg_m3);

        EnergyResult {
            mass_kg,
            energy: kinetic_energy(mass_kg, velocity_ms),
            velocity_ms,
        }
    }
}

/// Resolve the velocity unit: large values are m/s, small ones km/s.
pub fn normalize_velocity(velocity: f64) -> f64 {
    if velocity > VELOCITY_UNIT_GUARD_M_S {
        velocity
    } else {
        velocity * 1000.0
    }
}

/// Mass of a uniform sphere: m = ρ × (4/3)πr³
pub fn sphere_mass(diameter_m: f64, density_kg_m3: f64) -> f64 {
    let radius = diameter_m / 2.0;
    let volume = (4.0 / 3.0) * std::f64::consts::PI * radius.powi(3);
    density_kg_m3 * volume
}

/// Kinetic energy, relativistic above 30 km/s.
///
/// Classical: E = ½mv²
/// Relativistic: E = (γ − 1)mc², γ = 1/√(1 − β²)
///
/// γ − 1 is evaluated as β²/(√(1−β²)(1 + √(1−β²))), which is the same
/// quantity without the cancellation of subtracting 1 from a number that
/// differs from it only in the ninth digit.
pub fn kinetic_energy(mass_kg: f64, velocity_ms: f64) -> Joules {
    if velocity_ms <= RELATIVISTIC_THRESHOLD_M_S {
        return Joules::new(0.5 * mass_kg * velocity_ms * velocity_ms);
    }

    let beta_sq = (velocity_ms / SPEED_OF_LIGHT_M_S).powi(2);
    let root = (1.0 - beta_sq).sqrt();
    let gamma_minus_one = beta_sq / (root * (1.0 + root));

    Joules::new(gamma_minus_one * mass_kg * SPEED_OF_LIGHT_M_S * SPEED_OF_LIGHT_M_S)
}
