//! Tsunami Model
//!
//! Rough impact-tsunami estimate for ocean strikes: initial wave amplitude
//! grows with √E, deep water couples energy into the wave more efficiently,
//! and shoaling amplifies the wave at the coast by a fixed run-up factor.
//!
//! # References
//! - Ward, S.N., Asphaug, E. (2000). "Asteroid impact tsunami: a
//!   probabilistic hazard assessment" Icarus 145, 64-78
//! - Collins et al. (2005), §8 (impacts into water)

use super::{EffectModel, ImpactContext};
use crate::core_types::{Megatons, Meters, TargetType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Energy at or below which no significant tsunami forms (MT)
pub const TSUNAMI_ENERGY_THRESHOLD_MT: f64 = 1.0;

/// Depth from which water counts as deep (m)
pub const DEEP_WATER_DEPTH_M: f64 = 1000.0;

/// Initial amplitude coefficient in deep water (m / MT^½)
pub const DEEP_WATER_COEFFICIENT: f64 = 0.02;

/// Initial amplitude coefficient in shallow water (m / MT^½)
pub const SHALLOW_WATER_COEFFICIENT: f64 = 0.01;

/// Coastal amplification of the open-water wave height
pub const RUN_UP_FACTOR: f64 = 2.0;

/// Regional severity of the tsunami
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TsunamiClass {
    /// Below the formation threshold
    Minor,
    /// Affects nearby coasts only (1-10 MT)
    Local,
    /// Basin-scale coastal damage (10-100 MT)
    SignificantRegional,
    /// Widespread coastal devastation (> 100 MT)
    DevastatingRegional,
}

impl TsunamiClass {
    /// Classify by impact energy
    pub fn from_energy(energy: Megatons) -> TsunamiClass {
        let e = *energy;
        if e > 100.0 {
            TsunamiClass::DevastatingRegional
        } else if e > 10.0 {
            TsunamiClass::SignificantRegional
        } else if e > TSUNAMI_ENERGY_THRESHOLD_MT {
            TsunamiClass::Local
        } else {
            TsunamiClass::Minor
        }
    }

    /// Human-readable label
    pub fn label(self) -> &'static str {
        match self {
            TsunamiClass::Minor => "Minor waves",
            TsunamiClass::Local => "Local tsunami",
            TsunamiClass::SignificantRegional => "Significant regional tsunami",
            TsunamiClass::DevastatingRegional => "Devastating regional tsunami",
        }
    }
}

impl fmt::Display for TsunamiClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Tsunami estimate for a water impact
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TsunamiEffects {
    /// Whether a significant tsunami is expected
    pub likely: bool,
    /// Open-water wave height near the source
    pub initial_wave_height: Meters,
    /// Expected maximum height at the coast (run-up)
    pub max_wave_height: Meters,
    /// Severity class
    pub classification: TsunamiClass,
}

impl TsunamiEffects {
    /// No tsunami
    pub const NONE: TsunamiEffects = TsunamiEffects {
        likely: false,
        initial_wave_height: Meters::ZERO,
        max_wave_height: Meters::ZERO,
        classification: TsunamiClass::Minor,
    };

    /// Human-readable summary
    pub fn notes(&self) -> String {
        if self.likely {
            format!(
                "Estimated maximum height on the coast: {:.1} m",
                *self.max_wave_height
            )
        } else {
            "Insufficient energy for significant tsunami".to_string()
        }
    }
}

/// Tsunami constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TsunamiConfig {
    /// Depth from which water counts as deep (m)
    pub deep_water_depth_m: f64,
    /// Deep-water amplitude coefficient
    pub deep_water_coefficient: f64,
    /// Shallow-water amplitude coefficient
    pub shallow_water_coefficient: f64,
    /// Coastal run-up factor
    pub run_up_factor: f64,
}

impl Default for TsunamiConfig {
    fn default() -> Self {
        Self {
            deep_water_depth_m: DEEP_WATER_DEPTH_M,
            deep_water_coefficient: DEEP_WATER_COEFFICIENT,
            shallow_water_coefficient: SHALLOW_WATER_COEFFICIENT,
            run_up_factor: RUN_UP_FACTOR,
        }
    }
}

/// Impact tsunami model
#[derive(Debug, Clone, Copy, Default)]
pub struct TsunamiModel {
    config: TsunamiConfig,
}

impl TsunamiModel {
    /// Create a model with custom constants
    pub fn new(config: TsunamiConfig) -> Self {
        Self { config }
    }

    /// Tsunami estimate for an ocean impact of the given depth (m)
    pub fn tsunami_effects(&self, energy: Megatons, water_depth_m: f64) -> TsunamiEffects {
        if *energy <= TSUNAMI_ENERGY_THRESHOLD_MT {
            return TsunamiEffects::NONE;
        }

        // Inclusive: exactly 1000 m counts as deep water
        let coefficient = if water_depth_m >= self.config.deep_water_depth_m {
            self.config.deep_water_coefficient
        } else {
            self.config.shallow_water_coefficient
        };

        let initial = coefficient * energy.sqrt();

        TsunamiEffects {
            likely: true,
            initial_wave_height: Meters::new(initial),
            max_wave_height: Meters::new(initial * self.config.run_up_factor),
            classification: TsunamiClass::from_energy(energy),
        }
    }
}

impl EffectModel for TsunamiModel {
    type Output = Option<TsunamiEffects>;

    /// Only water targets produce a tsunami estimate.
    fn evaluate(&self, energy: Megatons, ctx: &ImpactContext) -> Option<TsunamiEffects> {
        match ctx.target {
            TargetType::Water => Some(self.tsunami_effects(energy, ctx.water_depth_m)),
            TargetType::Land => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_threshold() {
        let model = TsunamiModel::default();
        assert!(!model.tsunami_effects(Megatons::new(1.0), 4000.0).likely);
        assert!(model.tsunami_effects(Megatons::new(1.0001), 4000.0).likely);
        assert_eq!(model.tsunami_effects(Megatons::new(0.5), 4000.0), TsunamiEffects::NONE);
    }

    #[test]
    fn test_deep_and_shallow_water() {
        let model = TsunamiModel::default();
        let deep = model.tsunami_effects(Megatons::new(100.0), 1000.0);
        let shallow = model.tsunami_effects(Megatons::new(100.0), 999.0);

        assert_relative_eq!(*deep.initial_wave_height, 0.2, epsilon = 1e-12);
        assert_relative_eq!(*deep.max_wave_height, 0.4, epsilon = 1e-12);
        assert_relative_eq!(*shallow.max_wave_height, 0.2, epsilon = 1e-12);
    }

    #[test]
    fn test_classification() {
        assert_eq!(TsunamiClass::from_energy(Megatons::new(0.5)), TsunamiClass::Minor);
        assert_eq!(TsunamiClass::from_energy(Megatons::new(5.0)), TsunamiClass::Local);
        assert_eq!(
            TsunamiClass::from_energy(Megatons::new(54.2)),
            TsunamiClass::SignificantRegional
        );
        assert_eq!(
            TsunamiClass::from_energy(Megatons::new(100.5)),
            TsunamiClass::DevastatingRegional
        );
        assert_eq!(TsunamiClass::SignificantRegional.label(), "Significant regional tsunami");
    }

    #[test]
    fn test_notes() {
        let effects = TsunamiModel::default().tsunami_effects(Megatons::new(400.0), 4000.0);
        assert_eq!(effects.notes(), "Estimated maximum height on the coast: 0.8 m");
        assert_eq!(
            TsunamiEffects::NONE.notes(),
            "Insufficient energy for significant tsunami"
        );
    }
}
