//! Thermal Radiation Model
//!
//! Distance at which the radiant exposure from the fireball drops to the
//! threshold of each injury category. Radius scales with √E (fluence falls
//! off as 1/R² for a fixed fraction of yield radiated), referenced to the
//! lethal fluence of 25 cal/cm².
//!
//! # References
//! Glasstone & Dolan (1977), Chapter VII, Table 7.41 (critical radiant
//! exposures for skin burns and ignition of common materials)

use super::{EffectModel, ImpactContext};
use crate::core_types::{Megatons, Meters};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Radius coefficient at the reference fluence (m / MT^½)
pub const THERMAL_BASE_COEFFICIENT: f64 = 450.0;

/// Reference fluence the coefficient is calibrated to (cal/cm²)
pub const REFERENCE_FLUENCE_CAL_CM2: f64 = 25.0;

/// Visualization scaling keeping thermal/crater ratios realistic
pub const THERMAL_SCALING_FACTOR: f64 = 0.6;

/// Injury or damage category for radiant exposure
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ThermalCategory {
    /// Fatal burns to exposed people
    #[serde(rename = "lethal")]
    Lethal,
    /// Third-degree burns
    #[serde(rename = "burns_3rd")]
    Burns3rd,
    /// Second-degree burns
    #[serde(rename = "burns_2nd")]
    Burns2nd,
    /// First-degree burns
    #[serde(rename = "burns_1st")]
    Burns1st,
    /// Ignition of clothing, dry grass and paper
    #[serde(rename = "ignition")]
    Ignition,
}

impl ThermalCategory {
    /// Every category, most severe first
    pub const ALL: [ThermalCategory; 5] = [
        ThermalCategory::Lethal,
        ThermalCategory::Burns3rd,
        ThermalCategory::Burns2nd,
        ThermalCategory::Burns1st,
        ThermalCategory::Ignition,
    ];

    /// Radiant exposure that produces this effect (cal/cm²)
    pub fn fluence_threshold_cal_cm2(self) -> f64 {
        match self {
            ThermalCategory::Lethal => 25.0,
            ThermalCategory::Burns3rd => 15.0,
            ThermalCategory::Burns2nd => 8.0,
            ThermalCategory::Burns1st => 5.0,
            ThermalCategory::Ignition => 10.0,
        }
    }

    /// Canonical label
    pub fn label(self) -> &'static str {
        match self {
            ThermalCategory::Lethal => "lethal",
            ThermalCategory::Burns3rd => "burns_3rd",
            ThermalCategory::Burns2nd => "burns_2nd",
            ThermalCategory::Burns1st => "burns_1st",
            ThermalCategory::Ignition => "ignition",
        }
    }

    /// Parse a label; unknown labels fall back to the lethal threshold.
    pub fn from_label(label: &str) -> ThermalCategory {
        Self::ALL
            .into_iter()
            .find(|c| c.label() == label)
            .unwrap_or(ThermalCategory::Lethal)
    }
}

impl fmt::Display for ThermalCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Thermal constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThermalConfig {
    /// Radius coefficient at the reference fluence
    pub base_coefficient: f64,
    /// Fluence the coefficient refers to (cal/cm²)
    pub reference_fluence_cal_cm2: f64,
    /// Uniform output scaling
    pub scaling_factor: f64,
}

impl Default for ThermalConfig {
    fn default() -> Self {
        Self {
            base_coefficient: THERMAL_BASE_COEFFICIENT,
            reference_fluence_cal_cm2: REFERENCE_FLUENCE_CAL_CM2,
            scaling_factor: THERMAL_SCALING_FACTOR,
        }
    }
}

/// Radius per thermal category
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ThermalEffects {
    /// Radius at which each category's threshold is reached
    pub radii: BTreeMap<ThermalCategory, Meters>,
}

impl ThermalEffects {
    /// Radius for one category (zero if absent)
    pub fn radius(&self, category: ThermalCategory) -> Meters {
        self.radii.get(&category).copied().unwrap_or(Meters::ZERO)
    }
}

/// Thermal radiation model
#[derive(Debug, Clone, Copy, Default)]
pub struct ThermalModel {
    config: ThermalConfig,
}

impl ThermalModel {
    /// Create a model with custom constants
    pub fn new(config: ThermalConfig) -> Self {
        Self { config }
    }

    /// Radius for one category: R = C × √E × √(F_ref / F) × scaling
    pub fn thermal_radius(&self, energy: Megatons, category: ThermalCategory) -> Meters {
        if energy.is_degenerate() {
            return Meters::ZERO;
        }

        let threshold = category.fluence_threshold_cal_cm2();
        let radius = self.config.base_coefficient
            * energy.sqrt()
            * (self.config.reference_fluence_cal_cm2 / threshold).sqrt();

        Meters::new(radius * self.config.scaling_factor)
    }

    /// Radii for every category
    pub fn thermal_effects(&self, energy: Megatons) -> ThermalEffects {
        ThermalEffects {
            radii: ThermalCategory::ALL
                .into_iter()
                .map(|c| (c, self.thermal_radius(energy, c)))
                .collect(),
        }
    }
}

impl EffectModel for ThermalModel {
    type Output = ThermalEffects;

    fn evaluate(&self, energy: Megatons, _ctx: &ImpactContext) -> ThermalEffects {
        self.thermal_effects(energy)
    }
}
