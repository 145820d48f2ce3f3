//! Seismic Effects Model
//!
//! Converts a fraction of the impact energy into radiated seismic energy,
//! expresses it as a moment magnitude, and estimates regional shaking with a
//! ground-motion prediction equation.
//!
//! # Scientific References
//!
//! - Schultz, P.H., Gault, D.E. (1975). "Seismic effects from major basin
//!   formations on the Moon and Mercury" (seismic efficiency ~1e-4)
//! - Kanamori, H. (1977). "The energy release in great earthquakes"
//!   J. Geophys. Res. 82(20), 2981-2987 (energy-magnitude relation)
//! - Atkinson, G.M., Boore, D.M. (2006). BSSA 96(6), 2181-2205
//! - Wald, D.J. et al. (1999). "Relationships between peak ground
//!   acceleration, peak ground velocity, and Modified Mercalli Intensity in
//!   California" Earthquake Spectra 15(3), 557-564
//!
//! # Model Overview
//!
//! 1. E_s = η × E, with η = 1e-4 at the surface and 5e-4 for buried bursts
//! 2. Mw = (log10 E_s − 4.8) / 1.5, floored at 0
//! 3. Six sample distances chosen by magnitude bucket
//! 4. log10 PGA = 0.5 + 0.4·Mw − log10 R − 0.002·R, R = √(d² + h²)
//! 5. Site amplification by soil type, then PGA → MMI step function

use super::{EffectModel, ImpactContext};
use crate::core_types::{Joules, Kilometers, Megatons, SoilType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fraction of impact energy radiated seismically for surface impacts
pub const SURFACE_SEISMIC_EFFICIENCY: f64 = 1e-4;

/// Fraction of impact energy radiated seismically for buried bursts
pub const BURIED_SEISMIC_EFFICIENCY: f64 = 5e-4;

/// Depth beyond which the energy release counts as buried (km)
pub const BURIED_DEPTH_THRESHOLD_KM: f64 = 1.0;

/// Pseudo focal depth used in the hypocentral distance (km)
pub const REFERENCE_FOCAL_DEPTH_KM: f64 = 10.0;

/// Smallest sample distance that must appear in the intensity map (km)
pub const MIN_DISPLAY_DISTANCE_KM: f64 = 5.0;

/// Sample distances (km) by lower magnitude bound, largest bucket first
const DISTANCE_BUCKETS: [(f64, [f64; 6]); 6] = [
    (8.0, [50.0, 200.0, 500.0, 1000.0, 2000.0, 5000.0]),
    (7.0, [30.0, 100.0, 300.0, 600.0, 1000.0, 2000.0]),
    (6.0, [20.0, 50.0, 150.0, 300.0, 600.0, 1000.0]),
    (5.0, [10.0, 30.0, 80.0, 150.0, 300.0, 500.0]),
    (4.0, [5.0, 15.0, 40.0, 80.0, 150.0, 250.0]),
    (f64::NEG_INFINITY, [2.0, 5.0, 10.0, 20.0, 40.0, 80.0]),
];

/// Modified Mercalli Intensity category
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MmiCategory {
    /// Not felt
    I,
    /// Weak
    II,
    /// Weak, felt indoors
    III,
    /// Light
    IV,
    /// Moderate
    V,
    /// Strong
    VI,
    /// Very strong
    VII,
    /// Severe
    VIII,
    /// Violent to extreme
    #[serde(rename = "IX-X")]
    IXToX,
}

impl MmiCategory {
    /// PGA thresholds (g) for each category, highest first
    const PGA_THRESHOLDS: [(f64, MmiCategory); 8] = [
        (1.0, MmiCategory::IXToX),
        (0.5, MmiCategory::VIII),
        (0.3, MmiCategory::VII),
        (0.15, MmiCategory::VI),
        (0.08, MmiCategory::V),
        (0.04, MmiCategory::IV),
        (0.02, MmiCategory::III),
        (0.01, MmiCategory::II),
    ];

    /// Step-function mapping from peak ground acceleration (g)
    pub fn from_pga(pga_g: f64) -> MmiCategory {
        Self::PGA_THRESHOLDS
            .iter()
            .find(|(threshold, _)| pga_g >= *threshold)
            .map_or(MmiCategory::I, |(_, mmi)| *mmi)
    }

    /// Roman-numeral label
    pub fn label(self) -> &'static str {
        match self {
            MmiCategory::I => "I",
            MmiCategory::II => "II",
            MmiCategory::III => "III",
            MmiCategory::IV => "IV",
            MmiCategory::V => "V",
            MmiCategory::VI => "VI",
            MmiCategory::VII => "VII",
            MmiCategory::VIII => "VIII",
            MmiCategory::IXToX => "IX-X",
        }
    }

    /// Canonical felt-effects description (IX-X reads as its lower bound)
    pub fn description(self) -> &'static str {
        match self {
            MmiCategory::I => "It doesn't feel",
            MmiCategory::II => "Felt by a few people at rest",
            MmiCategory::III => "Noticeably felt indoors",
            MmiCategory::IV => "Hanging objects sway, vibration like a passing truck",
            MmiCategory::V => "Felt by almost everyone, unstable objects fall",
            MmiCategory::VI => "Felt by all, minor damage to weak structures",
            MmiCategory::VII => "Minor damage to ordinary buildings",
            MmiCategory::VIII => "Considerable damage to ordinary structures",
            MmiCategory::IXToX => "General panic, significant damage to resistant structures",
        }
    }
}

impl fmt::Display for MmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Site amplification of PGA relative to rock
pub fn soil_amplification(soil: SoilType) -> f64 {
    match soil {
        SoilType::Rock => 1.0,
        SoilType::HardSoil => 1.3,
        SoilType::SoftSoil => 1.8,
        SoilType::Sediment => 2.2,
    }
}

/// Shaking estimate at one epicentral distance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntensitySample {
    /// Epicentral distance
    pub distance: Kilometers,
    /// Peak ground acceleration including site amplification (g)
    pub pga_g: f64,
    /// Intensity category
    pub mmi: MmiCategory,
}

impl IntensitySample {
    /// Felt-effects description for this sample
    pub fn description(&self) -> &'static str {
        self.mmi.description()
    }
}

/// Magnitude and regional intensity map
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SeismicEffects {
    /// Moment magnitude (never negative)
    pub moment_magnitude: f64,
    /// Samples in increasing distance order
    pub intensities: Vec<IntensitySample>,
}

/// Seismic constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeismicConfig {
    /// Seismic efficiency for surface impacts
    pub surface_efficiency: f64,
    /// Seismic efficiency for buried bursts
    pub buried_efficiency: f64,
    /// Buried depth threshold (km)
    pub buried_depth_threshold_km: f64,
    /// Pseudo focal depth in the attenuation relation (km)
    pub focal_depth_km: f64,
}

impl Default for SeismicConfig {
    fn default() -> Self {
        Self {
            surface_efficiency: SURFACE_SEISMIC_EFFICIENCY,
            buried_efficiency: BURIED_SEISMIC_EFFICIENCY,
            buried_depth_threshold_km: BURIED_DEPTH_THRESHOLD_KM,
            focal_depth_km: REFERENCE_FOCAL_DEPTH_KM,
        }
    }
}

/// Seismic magnitude and intensity model
#[derive(Debug, Clone, Copy, Default)]
pub struct SeismicModel {
    config: SeismicConfig,
}

impl SeismicModel {
    /// Create a model with custom constants
    pub fn new(config: SeismicConfig) -> Self {
        Self { config }
    }

    /// Moment magnitude of the seismic wave train
    ///
    /// # Arguments
    /// * `energy` - Total impact energy
    /// * `depth` - Depth of energy release (0 for surface impacts)
    pub fn moment_magnitude(&self, energy: Joules, depth: Kilometers) -> f64 {
        if *energy <= 0.0 {
            return 0.0;
        }

        let efficiency = if *depth > self.config.buried_depth_threshold_km {
            self.config.buried_efficiency
        } else {
            self.config.surface_efficiency
        };

        let seismic_energy = efficiency * *energy;
        let magnitude = ((seismic_energy.log10() - 4.8) / 1.5).max(0.0);

        // Reported to 0.01; bucket choice and PGA use the reported value
        (magnitude * 100.0).round() / 100.0
    }

    /// Peak ground acceleration on rock at an epicentral distance (g)
    pub fn peak_ground_acceleration(&self, magnitude: f64, distance: Kilometers) -> f64 {
        let r = distance.hypot(self.config.focal_depth_km);
        let log10_pga = 0.5 + 0.4 * magnitude - r.log10() - 0.002 * r;
        10f64.powf(log10_pga)
    }

    /// Shaking at each bucketed sample distance for a magnitude
    pub fn regional_intensities(&self, magnitude: f64, soil: SoilType) -> Vec<IntensitySample> {
        let amplification = soil_amplification(soil);

        sample_distances(magnitude)
            .into_iter()
            .map(|distance| {
                let pga_g = self.peak_ground_acceleration(magnitude, distance) * amplification;
                IntensitySample {
                    distance,
                    pga_g,
                    mmi: MmiCategory::from_pga(pga_g),
                }
            })
            .collect()
    }

    /// Magnitude plus regional intensity map
    pub fn seismic_effects(&self, energy: Joules, depth: Kilometers, soil: SoilType) -> SeismicEffects {
        let moment_magnitude = self.moment_magnitude(energy, depth);
        SeismicEffects {
            moment_magnitude,
            intensities: self.regional_intensities(moment_magnitude, soil),
        }
    }
}

/// Sample distances for a magnitude, always including one ≥ 5 km
pub fn sample_distances(magnitude: f64) -> Vec<Kilometers> {
    let bucket = DISTANCE_BUCKETS
        .iter()
        .find(|(min_mw, _)| magnitude >= *min_mw)
        .map_or(&DISTANCE_BUCKETS[DISTANCE_BUCKETS.len() - 1].1, |(_, d)| d);

    let mut distances: Vec<Kilometers> = bucket
        .iter()
        .filter(|d| **d >= 1.0)
        .map(|d| Kilometers::new(*d))
        .collect();

    if distances.iter().all(|d| **d < MIN_DISPLAY_DISTANCE_KM) {
        distances.push(Kilometers::new(MIN_DISPLAY_DISTANCE_KM));
    }
    distances
}

impl EffectModel for SeismicModel {
    type Output = SeismicEffects;

    fn evaluate(&self, _energy: Megatons, ctx: &ImpactContext) -> SeismicEffects {
        self.seismic_effects(ctx.energy_joules, ctx.impact_depth, ctx.soil)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_reference_magnitude() {
        // 2.27e17 J × 1e-4 = 2.27e13 J → Mw = (13.356 − 4.8) / 1.5 ≈ 5.70
        let mw = SeismicModel::default().moment_magnitude(Joules::new(2.27e17), Kilometers::ZERO);
        assert_relative_eq!(mw, 5.704, epsilon = 0.005);
    }

    #[test]
    fn test_buried_burst_is_more_efficient() {
        let model = SeismicModel::default();
        let surface = model.moment_magnitude(Joules::new(1e18), Kilometers::ZERO);
        let buried = model.moment_magnitude(Joules::new(1e18), Kilometers::new(2.0));
        // log10(5) / 1.5 ≈ 0.466, each side rounded to 0.01
        assert_relative_eq!(buried - surface, 5f64.log10() / 1.5, epsilon = 0.01);
    }

    #[test]
    fn test_rounded_magnitude_selects_bucket() {
        // Unrounded Mw ≈ 3.996, reported as 4.00
        let model = SeismicModel::default();
        let effects = model.seismic_effects(
            Joules::new(10f64.powf(14.794)),
            Kilometers::ZERO,
            SoilType::Rock,
        );
        assert_eq!(effects.moment_magnitude, 4.0);
        assert_eq!(*effects.intensities[0].distance, 5.0);
        assert_eq!(
            effects.intensities[0].pga_g,
            model.peak_ground_acceleration(4.0, Kilometers::new(5.0))
        );
    }

    #[test]
    fn test_magnitude_never_negative() {
        let model = SeismicModel::default();
        assert_eq!(model.moment_magnitude(Joules::new(1.0), Kilometers::ZERO), 0.0);
        assert_eq!(model.moment_magnitude(Joules::ZERO, Kilometers::ZERO), 0.0);
        assert_eq!(model.moment_magnitude(Joules::new(-5.0), Kilometers::ZERO), 0.0);
    }

    #[test]
    fn test_mmi_thresholds() {
        assert_eq!(MmiCategory::from_pga(1.0), MmiCategory::IXToX);
        assert_eq!(MmiCategory::from_pga(0.99), MmiCategory::VIII);
        assert_eq!(MmiCategory::from_pga(0.5), MmiCategory::VIII);
        assert_eq!(MmiCategory::from_pga(0.3), MmiCategory::VII);
        assert_eq!(MmiCategory::from_pga(0.15), MmiCategory::VI);
        assert_eq!(MmiCategory::from_pga(0.08), MmiCategory::V);
        assert_eq!(MmiCategory::from_pga(0.04), MmiCategory::IV);
        assert_eq!(MmiCategory::from_pga(0.02), MmiCategory::III);
        assert_eq!(MmiCategory::from_pga(0.01), MmiCategory::II);
        assert_eq!(MmiCategory::from_pga(0.0099), MmiCategory::I);
        assert_eq!(MmiCategory::IXToX.label(), "IX-X");
        assert_eq!(
            MmiCategory::IXToX.description(),
            "General panic, significant damage to resistant structures"
        );
    }

    #[test]
    fn test_distance_buckets() {
        let small: Vec<f64> = sample_distances(2.0).iter().map(|d| **d).collect();
        assert_eq!(small, vec![2.0, 5.0, 10.0, 20.0, 40.0, 80.0]);

        let large: Vec<f64> = sample_distances(8.5).iter().map(|d| **d).collect();
        assert_eq!(large, vec![50.0, 200.0, 500.0, 1000.0, 2000.0, 5000.0]);

        let boundary: Vec<f64> = sample_distances(5.0).iter().map(|d| **d).collect();
        assert_eq!(boundary[0], 10.0);

        for mw in [0.0, 3.9, 4.0, 6.5, 7.2, 9.9] {
            let d = sample_distances(mw);
            assert_eq!(d.len(), 6);
            assert!(d.iter().any(|d| **d >= MIN_DISPLAY_DISTANCE_KM));
        }
    }

    #[test]
    fn test_pga_attenuates_and_soil_amplifies() {
        let model = SeismicModel::default();
        let rock = model.regional_intensities(6.0, SoilType::Rock);
        let sediment = model.regional_intensities(6.0, SoilType::Sediment);

        for pair in rock.windows(2) {
            assert!(pair[0].pga_g > pair[1].pga_g);
        }
        for (r, s) in rock.iter().zip(&sediment) {
            assert_relative_eq!(s.pga_g / r.pga_g, 2.2, max_relative = 1e-12);
            assert!(s.mmi >= r.mmi);
        }
    }

    #[test]
    fn test_pga_formula() {
        // Mw 6 at 20 km: R = √500 = 22.36, log10 PGA = 0.5 + 2.4 − 1.3495 − 0.0447
        let pga = SeismicModel::default().peak_ground_acceleration(6.0, Kilometers::new(20.0));
        assert_relative_eq!(pga, 10f64.powf(1.50580), max_relative = 1e-3);
    }
}
