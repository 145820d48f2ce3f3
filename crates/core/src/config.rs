//! Pipeline configuration
//!
//! Groups the per-model constant sets. Every field defaults to the
//! documented constants, and deserialization fills anything missing, so a
//! config file only needs to name the knobs it changes:
//!
//! ```
//! use impact_effects_core::PipelineConfig;
//!
//! let config = PipelineConfig::from_json_str(r#"{ "blast": { "scaling_factor": 1.0 } }"#).unwrap();
//! assert_eq!(config.blast.scaling_factor, 1.0);
//! assert_eq!(config.fireball.scaling_factor, 0.7);
//! ```

use crate::error::{ImpactError, Result};
use crate::physics::{
    BlastConfig, CraterConfig, FireballConfig, SeismicConfig, ThermalConfig, TsunamiConfig,
};
use serde::{Deserialize, Serialize};

/// Constants for every model in the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Crater scaling
    pub crater: CraterConfig,
    /// Fireball radius
    pub fireball: FireballConfig,
    /// Thermal radiation
    pub thermal: ThermalConfig,
    /// Blast overpressure and wind
    pub blast: BlastConfig,
    /// Seismic magnitude and intensity
    pub seismic: SeismicConfig,
    /// Tsunami
    pub tsunami: TsunamiConfig,
}

/// Visualization scaling factors applied to effect radii
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScalingFactors {
    /// Thermal radius scaling
    pub thermal_scaling: f64,
    /// Blast radius scaling
    pub blast_scaling: f64,
    /// Fireball radius scaling
    pub fireball_scaling: f64,
}

impl PipelineConfig {
    /// Parse a (possibly partial) JSON config.
    ///
    /// # Errors
    /// Returns `ImpactError::InvalidParameter` if the document is not valid
    /// JSON for this structure or sets an out-of-range constant.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: PipelineConfig = serde_json::from_str(json)
            .map_err(|e| ImpactError::invalid("config", e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject constants that would make any result negative, NaN or infinite.
    ///
    /// Coefficients, factors, material properties, efficiencies, the
    /// reference fluence and the focal depth must be positive. Thresholds
    /// and the altitude slope may be zero.
    ///
    /// # Errors
    /// Returns `ImpactError::InvalidParameter` naming the first bad constant.
    pub fn validate(&self) -> Result<()> {
        let crater = &self.crater;
        let positive = [
            ("crater.land.density_kg_m3", crater.land.density_kg_m3),
            ("crater.land.strength_pa", crater.land.strength_pa),
            ("crater.land.k1", crater.land.k1),
            ("crater.water.density_kg_m3", crater.water.density_kg_m3),
            ("crater.water.strength_pa", crater.water.strength_pa),
            ("crater.water.k1", crater.water.k1),
            ("crater.collapse_factor", crater.collapse_factor),
            ("crater.depth_ratio", crater.depth_ratio),
            ("fireball.surface_coefficient", self.fireball.surface_coefficient),
            ("fireball.airburst_coefficient", self.fireball.airburst_coefficient),
            ("fireball.scaling_factor", self.fireball.scaling_factor),
            ("thermal.base_coefficient", self.thermal.base_coefficient),
            ("thermal.reference_fluence_cal_cm2", self.thermal.reference_fluence_cal_cm2),
            ("thermal.scaling_factor", self.thermal.scaling_factor),
            ("blast.base_coefficient", self.blast.base_coefficient),
            ("blast.altitude_offset", self.blast.altitude_offset),
            ("blast.scaling_factor", self.blast.scaling_factor),
            ("seismic.surface_efficiency", self.seismic.surface_efficiency),
            ("seismic.buried_efficiency", self.seismic.buried_efficiency),
            ("seismic.focal_depth_km", self.seismic.focal_depth_km),
            ("tsunami.deep_water_coefficient", self.tsunami.deep_water_coefficient),
            ("tsunami.shallow_water_coefficient", self.tsunami.shallow_water_coefficient),
            ("tsunami.run_up_factor", self.tsunami.run_up_factor),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ImpactError::invalid(
                    name,
                    format!("must be positive, got {value}"),
                ));
            }
        }

        let non_negative = [
            ("fireball.airburst_threshold_km", self.fireball.airburst_threshold_km),
            ("blast.ground_coupling_altitude_km", self.blast.ground_coupling_altitude_km),
            ("blast.altitude_slope_per_km", self.blast.altitude_slope_per_km),
            ("seismic.buried_depth_threshold_km", self.seismic.buried_depth_threshold_km),
            ("tsunami.deep_water_depth_m", self.tsunami.deep_water_depth_m),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ImpactError::invalid(
                    name,
                    format!("must be non-negative, got {value}"),
                ));
            }
        }
        Ok(())
    }

    /// Scaling factors applied to the effect radii
    pub fn scaling_factors(&self) -> ScalingFactors {
        ScalingFactors {
            thermal_scaling: self.thermal.scaling_factor,
            blast_scaling: self.blast.scaling_factor,
            fireball_scaling: self.fireball.scaling_factor,
        }
    }
}
