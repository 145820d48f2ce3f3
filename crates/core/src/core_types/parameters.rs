//! Impactor input parameters
//!
//! `ImpactorParameters` is the immutable input value consumed by the
//! pipeline. Parameter sources (raw numeric input, catalog lookups) build it;
//! `validate()` enforces the input domain before any model runs.

use crate::error::{ImpactError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Water depth assumed for ocean impacts when none is supplied (m)
pub const DEFAULT_WATER_DEPTH_M: f64 = 1000.0;

/// Impact angle used when a source carries no trajectory data (degrees)
pub const DEFAULT_IMPACT_ANGLE_DEG: f64 = 45.0;

/// Bulk density assumed for catalog objects (kg/m³, stony asteroid)
pub const DEFAULT_DENSITY_KG_M3: f64 = 3000.0;

/// Diameter of the default impactor (m)
pub const DEFAULT_DIAMETER_M: f64 = 100.0;

/// Velocity of the default impactor (m/s)
pub const DEFAULT_VELOCITY_M_S: f64 = 17_000.0;

/// Surface struck by the impactor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetType {
    /// Crystalline/sedimentary rock surface
    #[default]
    Land,
    /// Open ocean; enables the tsunami model
    Water,
}

impl TargetType {
    /// Canonical lowercase label
    pub fn label(self) -> &'static str {
        match self {
            TargetType::Land => "land",
            TargetType::Water => "water",
        }
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TargetType {
    type Err = ImpactError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "land" => Ok(TargetType::Land),
            "water" => Ok(TargetType::Water),
            other => Err(ImpactError::invalid(
                "target_type",
                format!("expected 'land' or 'water', got '{other}'"),
            )),
        }
    }
}

/// Near-surface geology at the observation sites, for seismic amplification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoilType {
    /// Bedrock (reference site, no amplification)
    #[default]
    Rock,
    /// Stiff soil / dense gravel
    HardSoil,
    /// Soft clay and loose sand
    SoftSoil,
    /// Deep unconsolidated sediment basin
    Sediment,
}

impl SoilType {
    /// Canonical snake-case label
    pub fn label(self) -> &'static str {
        match self {
            SoilType::Rock => "rock",
            SoilType::HardSoil => "hard_soil",
            SoilType::SoftSoil => "soft_soil",
            SoilType::Sediment => "sediment",
        }
    }

    /// Parse a soil label, falling back to rock for anything unrecognized.
    pub fn from_label(label: &str) -> SoilType {
        match label.trim().to_lowercase().replace('-', "_").as_str() {
            "hard_soil" => SoilType::HardSoil,
            "soft_soil" => SoilType::SoftSoil,
            "sediment" => SoilType::Sediment,
            _ => SoilType::Rock,
        }
    }
}

impl fmt::Display for SoilType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Optional geographic location of the impact, carried through to the report
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ImpactSite {
    /// Latitude in degrees
    pub lat: Option<f64>,
    /// Longitude in degrees
    pub lon: Option<f64>,
}

/// Physical description of one impact scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactorParameters {
    /// Projectile diameter (m)
    pub diameter_m: f64,
    /// Projectile bulk density (kg/m³)
    pub density_kg_m3: f64,
    /// Impact velocity (m/s; values ≤ 1000 are read as km/s)
    pub velocity_m_s: f64,
    /// Impact angle from horizontal (degrees, 90 = vertical)
    pub angle_deg: f64,
    /// Surface struck
    pub target_type: TargetType,
    /// Burst altitude above ground (km, 0 = surface impact)
    pub burst_altitude_km: f64,
    /// Ocean depth at the impact point (m); only meaningful for water targets
    pub water_depth_m: Option<f64>,
    /// Geology used for seismic site amplification
    #[serde(default)]
    pub soil_type: SoilType,
    /// Where the impact happens, if known
    #[serde(default)]
    pub site: ImpactSite,
}

impl Default for ImpactorParameters {
    /// 100 m stony body at 17 km/s
    fn default() -> Self {
        Self::new(DEFAULT_DIAMETER_M, DEFAULT_DENSITY_KG_M3, DEFAULT_VELOCITY_M_S)
    }
}

impl ImpactorParameters {
    /// Land impact with the given body, at 45°, surface burst, rock site.
    pub fn new(diameter_m: f64, density_kg_m3: f64, velocity_m_s: f64) -> Self {
        Self {
            diameter_m,
            density_kg_m3,
            velocity_m_s,
            angle_deg: DEFAULT_IMPACT_ANGLE_DEG,
            target_type: TargetType::Land,
            burst_altitude_km: 0.0,
            water_depth_m: None,
            soil_type: SoilType::Rock,
            site: ImpactSite::default(),
        }
    }

    /// Set the impact angle (degrees)
    pub fn with_angle(mut self, angle_deg: f64) -> Self {
        self.angle_deg = angle_deg;
        self
    }

    /// Retarget to land, clearing any water depth
    pub fn on_land(mut self) -> Self {
        self.target_type = TargetType::Land;
        self.water_depth_m = None;
        self
    }

    /// Retarget to open water of the given depth (m)
    pub fn on_water(mut self, water_depth_m: f64) -> Self {
        self.target_type = TargetType::Water;
        self.water_depth_m = Some(water_depth_m);
        self
    }

    /// Set the burst altitude (km)
    pub fn with_burst_altitude(mut self, burst_altitude_km: f64) -> Self {
        self.burst_altitude_km = burst_altitude_km;
        self
    }

    /// Set the site geology
    pub fn with_soil(mut self, soil_type: SoilType) -> Self {
        self.soil_type = soil_type;
        self
    }

    /// Set the impact location
    pub fn with_site(mut self, lat: Option<f64>, lon: Option<f64>) -> Self {
        self.site = ImpactSite { lat, lon };
        self
    }

    /// Water depth to use for the tsunami model, defaulting when unset.
    pub fn effective_water_depth_m(&self) -> f64 {
        self.water_depth_m.unwrap_or(DEFAULT_WATER_DEPTH_M)
    }

    /// Check every input against its physical domain.
    ///
    /// # Errors
    /// Returns `ImpactError::InvalidParameter` naming the first offending
    /// field: non-finite numbers, non-positive diameter/density/velocity,
    /// angle outside 0..=90, negative altitude or water depth, or a water
    /// depth supplied for a land target.
    pub fn validate(&self) -> Result<()> {
        require_positive("diameter_m", self.diameter_m)?;
        require_positive("density_kg_m3", self.density_kg_m3)?;
        require_positive("velocity_m_s", self.velocity_m_s)?;

        require_finite("angle_deg", self.angle_deg)?;
        if !(0.0..=90.0).contains(&self.angle_deg) {
            return Err(ImpactError::invalid(
                "angle_deg",
                format!("must be within 0..=90, got {}", self.angle_deg),
            ));
        }

        require_non_negative("burst_altitude_km", self.burst_altitude_km)?;

        match (self.target_type, self.water_depth_m) {
            (TargetType::Water, Some(depth)) => {
                require_non_negative("water_depth_m", depth)?;
            }
            (TargetType::Land, Some(_)) => {
                return Err(ImpactError::invalid(
                    "water_depth_m",
                    "only applies to water targets",
                ));
            }
            (_, None) => {}
        }

        Ok(())
    }
}

fn require_finite(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ImpactError::invalid(name, format!("must be finite, got {value}")))
    }
}

fn require_positive(name: &'static str, value: f64) -> Result<()> {
    require_finite(name, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ImpactError::invalid(name, format!("must be positive, got {value}")))
    }
}

fn require_non_negative(name: &'static str, value: f64) -> Result<()> {
    require_finite(name, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ImpactError::invalid(name, format!("must be non-negative, got {value}")))
    }
}
