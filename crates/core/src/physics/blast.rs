//! Blast Overpressure and Wind Model
//!
//! Two separate empirical curves share this module:
//!
//! 1. **Overpressure radii**: cube-root yield scaling of a 1 psi base radius,
//!    with each higher overpressure level at a fixed fraction of it.
//! 2. **Peak wind speed**: a per-level base velocity table modulated by an
//!    energy factor. It is keyed by the nominal psi level and never reads the
//!    computed radius; the two curves must stay independent.
//!
//! # References
//! Glasstone & Dolan (1977), Chapter III, §3.55-3.60 and Figure 3.74a
//! (peak overpressure and peak wind velocity vs. distance)

use super::{EffectModel, ImpactContext};
use crate::core_types::{Kilometers, Megatons, Meters};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// 1 psi radius coefficient (m / MT^⅓)
pub const BLAST_BASE_COEFFICIENT: f64 = 2500.0;

/// Altitude at or below which the burst couples to the ground fully (km)
pub const GROUND_COUPLING_ALTITUDE_KM: f64 = 2.0;

/// Altitude factor offset above the ground-coupling altitude
pub const ALTITUDE_FACTOR_OFFSET: f64 = 1.1;

/// Altitude factor increase per km above the ground-coupling altitude
pub const ALTITUDE_FACTOR_SLOPE_PER_KM: f64 = 0.05;

/// Visualization scaling keeping blast/crater ratios realistic
pub const BLAST_SCALING_FACTOR: f64 = 0.8;

/// Wind speed for psi levels missing from the base table (km/h)
pub const DEFAULT_BASE_WIND_KMH: f64 = 100.0;

/// Below this yield winds are weakened linearly (MT)
pub const LOW_ENERGY_WIND_THRESHOLD_MT: f64 = 0.1;

/// Wind factor at vanishing yield
pub const LOW_ENERGY_WIND_FLOOR: f64 = 0.3;

/// Above this yield winds are strengthened (MT)
pub const HIGH_ENERGY_WIND_THRESHOLD_MT: f64 = 100.0;

/// Yield range over which the high-energy boost ramps in (MT)
pub const HIGH_ENERGY_WIND_RAMP_MT: f64 = 1000.0;

/// Largest high-energy boost (fraction of base)
pub const HIGH_ENERGY_WIND_MAX_BOOST: f64 = 0.5;

/// Discrete overpressure damage level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum OverpressureLevel {
    /// Total destruction of reinforced structures
    #[serde(rename = "50_psi")]
    Psi50,
    /// Collapse of most buildings
    #[serde(rename = "10_psi")]
    Psi10,
    /// Severe damage to residential structures
    #[serde(rename = "5_psi")]
    Psi5,
    /// Window breakage
    #[serde(rename = "1_psi")]
    Psi1,
}

impl OverpressureLevel {
    /// Every level, highest pressure first
    pub const ALL: [OverpressureLevel; 4] = [
        OverpressureLevel::Psi50,
        OverpressureLevel::Psi10,
        OverpressureLevel::Psi5,
        OverpressureLevel::Psi1,
    ];

    /// Nominal peak overpressure (psi)
    pub fn nominal_psi(self) -> f64 {
        match self {
            OverpressureLevel::Psi50 => 50.0,
            OverpressureLevel::Psi10 => 10.0,
            OverpressureLevel::Psi5 => 5.0,
            OverpressureLevel::Psi1 => 1.0,
        }
    }

    /// Fraction of the 1 psi base radius at which this level is reached
    pub fn radius_fraction(self) -> f64 {
        match self {
            OverpressureLevel::Psi50 => 0.12,
            OverpressureLevel::Psi10 => 0.30,
            OverpressureLevel::Psi5 => 0.50,
            OverpressureLevel::Psi1 => 1.0,
        }
    }

    /// Canonical label
    pub fn label(self) -> &'static str {
        match self {
            OverpressureLevel::Psi50 => "50_psi",
            OverpressureLevel::Psi10 => "10_psi",
            OverpressureLevel::Psi5 => "5_psi",
            OverpressureLevel::Psi1 => "1_psi",
        }
    }
}

impl fmt::Display for OverpressureLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Theoretical peak wind behind a shock of the given overpressure (km/h)
///
/// Keyed by nominal psi; anything off-table gets 100 km/h.
pub fn base_wind_speed_kmh(psi: f64) -> f64 {
    const TABLE: [(f64, f64); 4] = [(50.0, 2100.0), (10.0, 800.0), (5.0, 400.0), (1.0, 160.0)];

    TABLE
        .iter()
        .find(|(level, _)| *level == psi)
        .map_or(DEFAULT_BASE_WIND_KMH, |(_, speed)| *speed)
}

/// Energy modulation of the base wind speed
///
/// Rises linearly from 0.3 to 1.0 over 0..0.1 MT, flat at 1.0 up to
/// 100 MT, then ramps to 1.5 by 1100 MT and stays there.
pub fn wind_energy_factor(energy: Megatons) -> f64 {
    let e = *energy;
    if e < LOW_ENERGY_WIND_THRESHOLD_MT {
        LOW_ENERGY_WIND_FLOOR + (e / LOW_ENERGY_WIND_THRESHOLD_MT) * (1.0 - LOW_ENERGY_WIND_FLOOR)
    } else if e > HIGH_ENERGY_WIND_THRESHOLD_MT {
        1.0 + ((e - HIGH_ENERGY_WIND_THRESHOLD_MT) / HIGH_ENERGY_WIND_RAMP_MT)
            .min(HIGH_ENERGY_WIND_MAX_BOOST)
    } else {
        1.0
    }
}

/// Blast constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlastConfig {
    /// 1 psi radius coefficient
    pub base_coefficient: f64,
    /// Altitude at or below which no altitude factor applies (km)
    pub ground_coupling_altitude_km: f64,
    /// Altitude factor offset
    pub altitude_offset: f64,
    /// Altitude factor slope (per km)
    pub altitude_slope_per_km: f64,
    /// Uniform radius scaling
    pub scaling_factor: f64,
}

impl Default for BlastConfig {
    fn default() -> Self {
        Self {
            base_coefficient: BLAST_BASE_COEFFICIENT,
            ground_coupling_altitude_km: GROUND_COUPLING_ALTITUDE_KM,
            altitude_offset: ALTITUDE_FACTOR_OFFSET,
            altitude_slope_per_km: ALTITUDE_FACTOR_SLOPE_PER_KM,
            scaling_factor: BLAST_SCALING_FACTOR,
        }
    }
}

/// Radius and wind for one overpressure level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlastLevelEffect {
    /// Distance at which the level is reached
    pub radius: Meters,
    /// Peak wind speed at that level (km/h)
    pub wind_speed_kmh: f64,
}

/// Blast effects for every overpressure level
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BlastEffects {
    /// Per-level radius and wind
    pub levels: BTreeMap<OverpressureLevel, BlastLevelEffect>,
}

impl BlastEffects {
    /// Radius for one level (zero if absent)
    pub fn radius(&self, level: OverpressureLevel) -> Meters {
        self.levels.get(&level).map_or(Meters::ZERO, |e| e.radius)
    }

    /// Wind speed for one level (zero if absent)
    pub fn wind_speed_kmh(&self, level: OverpressureLevel) -> f64 {
        self.levels.get(&level).map_or(0.0, |e| e.wind_speed_kmh)
    }
}

/// Blast overpressure and wind model
#[derive(Debug, Clone, Copy, Default)]
pub struct BlastModel {
    config: BlastConfig,
}

impl BlastModel {
    /// Create a model with custom constants
    pub fn new(config: BlastConfig) -> Self {
        Self { config }
    }

    /// Altitude factor: 1.0 near the ground, 1.1 + 0.05·h above it
    ///
    /// Empirical knob carried as-is; it boosts rather than attenuates
    /// radii for higher bursts.
    pub fn altitude_factor(&self, burst_altitude: Kilometers) -> f64 {
        if *burst_altitude > self.config.ground_coupling_altitude_km {
            self.config.altitude_offset + *burst_altitude * self.config.altitude_slope_per_km
        } else {
            1.0
        }
    }

    /// Radius of the 1 psi ring (all other levels are fractions of it)
    pub fn base_radius(&self, energy: Megatons, burst_altitude: Kilometers) -> Meters {
        if energy.is_degenerate() {
            return Meters::ZERO;
        }
        Meters::new(
            self.config.base_coefficient
                * energy.cbrt()
                * self.altitude_factor(burst_altitude)
                * self.config.scaling_factor,
        )
    }

    /// Radius at which one overpressure level is reached
    pub fn overpressure_radius(
        &self,
        energy: Megatons,
        burst_altitude: Kilometers,
        level: OverpressureLevel,
    ) -> Meters {
        self.base_radius(energy, burst_altitude) * level.radius_fraction()
    }

    /// Peak wind speed for a nominal psi level (km/h)
    ///
    /// Takes the level, not a radius: wind does not follow the radius curve.
    pub fn wind_speed_kmh(&self, level: OverpressureLevel, energy: Megatons) -> f64 {
        if energy.is_degenerate() {
            return 0.0;
        }
        base_wind_speed_kmh(level.nominal_psi()) * wind_energy_factor(energy)
    }

    /// Radius and wind for every level
    pub fn blast_effects(&self, energy: Megatons, burst_altitude: Kilometers) -> BlastEffects {
        let base = self.base_radius(energy, burst_altitude);

        BlastEffects {
            levels: OverpressureLevel::ALL
                .into_iter()
                .map(|level| {
                    let effect = BlastLevelEffect {
                        radius: base * level.radius_fraction(),
                        wind_speed_kmh: self.wind_speed_kmh(level, energy),
                    };
                    (level, effect)
                })
                .collect(),
        }
    }
}

impl EffectModel for BlastModel {
    type Output = BlastEffects;

    fn evaluate(&self, energy: Megatons, ctx: &ImpactContext) -> BlastEffects {
        self.blast_effects(energy, ctx.burst_altitude)
    }
}
