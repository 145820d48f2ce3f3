//! Presentation view of an impact report
//!
//! Flattens an `ImpactReport` into the serialized output contract: labelled
//! maps, rounded figures and the annotations a reader of the raw numbers
//! needs. Radii, depths, wind speeds and Mw are rounded to one decimal,
//! energy in megatons to two, PGA to three.

use crate::config::ScalingFactors;
use crate::core_types::{ImpactSite, TargetType};
use crate::physics::verification::RATIO_NOTE;
use crate::physics::{OverpressureLevel, ThermalCategory};
use crate::pipeline::ImpactReport;
use serde::{Serialize, Serializer};
use std::borrow::Borrow;

/// Literature the models are drawn from
pub const SCIENTIFIC_REFERENCES: [&str; 4] = [
    "Collins et al. (2005) - Earth Impact Effects Program",
    "Melosh (1989) - Impact Cratering: A Geologic Process",
    "Glasstone & Dolan (1977) - The Effects of Nuclear Weapons",
    "Atkinson & Boore (2006) - Ground-motion prediction equations",
];

/// Annotation for the scaling-factor section
pub const SCALING_NOTE: &str = "Factors tuned for realistic effect-to-crater relationships";

/// Round to a fixed number of decimal places
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

fn round1(value: f64) -> f64 {
    round_to(value, 1)
}

/// Keyed entries that serialize as a map in insertion order
///
/// Keeps severity order (`50_psi` before `1_psi`) and distance order
/// (`50_km` before `200_km`) in the JSON output.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelledMap<K, V>(Vec<(K, V)>);

impl<K, V> LabelledMap<K, V> {
    /// Value stored under `key`
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        self.0
            .iter()
            .find(|(k, _)| <K as Borrow<Q>>::borrow(k) == key)
            .map(|(_, v)| v)
    }

    /// Keys in output order
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.0.iter().map(|(k, _)| k)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for LabelledMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<K: Serialize, V: Serialize> Serialize for LabelledMap<K, V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(k, v)| (k, v)))
    }
}

/// Inputs echoed back to the caller
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputView {
    pub projectile_diameter_m: f64,
    pub impact_velocity_m_s: f64,
    pub impact_angle_deg: f64,
    pub density_kg_m3: f64,
    pub target_type: TargetType,
    pub burst_altitude_km: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub water_depth_m: Option<f64>,
    pub soil_type: String,
}

/// Energy figures
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnergyView {
    pub mass_kg: f64,
    pub energy_joules: f64,
    pub energy_megatons_tnt: f64,
    pub hiroshima_equivalents: f64,
}

/// Wind at one overpressure level
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WindView {
    pub wind_speed_kmh: f64,
}

/// Crater, fireball, thermal and blast figures
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EffectsView {
    pub crater_diameter_m: f64,
    pub crater_depth_m: f64,
    pub fireball_radius_m: f64,
    pub thermal_effects_m: LabelledMap<&'static str, f64>,
    pub blast_overpressure_radii_m: LabelledMap<&'static str, f64>,
    pub blast_wind_effects: LabelledMap<&'static str, WindView>,
}

/// Shaking at one distance
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntensityView {
    pub pga_g: f64,
    pub mmi: &'static str,
    pub description: &'static str,
}

/// Seismic figures
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeismicView {
    pub moment_magnitude_mw: f64,
    pub regional_intensities: LabelledMap<String, IntensityView>,
}

/// Tsunami figures; only `likely` is present when nothing is expected
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TsunamiView {
    pub likely: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_wave_height_m: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_wave_height_m: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classification: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Where the impact happens
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationView {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub target: TargetType,
}

/// Applied scaling factors
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScalingView {
    #[serde(flatten)]
    pub factors: ScalingFactors,
    pub note: &'static str,
}

/// Effect-to-crater ratios
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerificationView {
    pub fireball_vs_crater_ratio: f64,
    pub blast_1psi_vs_crater_ratio: f64,
    pub thermal_vs_crater_ratio: f64,
    pub note: &'static str,
}

/// Serializable output contract for one impact
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportView {
    pub name: String,
    pub input_parameters: InputView,
    pub energy: EnergyView,
    pub impact_effects: EffectsView,
    pub seismic_effects: SeismicView,
    pub tsunami_effects: TsunamiView,
    pub location: LocationView,
    pub applied_scaling_factors: ScalingView,
    pub relationship_verification: VerificationView,
    pub scientific_references: Vec<&'static str>,
}

impl From<&ImpactReport> for ReportView {
    fn from(report: &ImpactReport) -> Self {
        let params = &report.parameters;
        let megatons = report.energy_megatons();
        let ImpactSite { lat, lon } = params.site;

        let tsunami_effects = match &report.tsunami {
            Some(t) if t.likely => TsunamiView {
                likely: true,
                max_wave_height_m: Some(round1(*t.max_wave_height)),
                initial_wave_height_m: Some(round_to(*t.initial_wave_height, 2)),
                classification: Some(t.classification.label()),
                notes: Some(t.notes()),
            },
            Some(t) => TsunamiView {
                likely: false,
                max_wave_height_m: Some(0.0),
                initial_wave_height_m: None,
                classification: None,
                notes: Some(t.notes()),
            },
            None => TsunamiView {
                likely: false,
                max_wave_height_m: None,
                initial_wave_height_m: None,
                classification: None,
                notes: None,
            },
        };

        ReportView {
            name: report.name.clone(),
            input_parameters: InputView {
                projectile_diameter_m: params.diameter_m,
                impact_velocity_m_s: report.energy.velocity_ms,
                impact_angle_deg: params.angle_deg,
                density_kg_m3: params.density_kg_m3,
                target_type: params.target_type,
                burst_altitude_km: params.burst_altitude_km,
                water_depth_m: match params.target_type {
                    TargetType::Water => Some(params.effective_water_depth_m()),
                    TargetType::Land => None,
                },
                soil_type: params.soil_type.label().to_string(),
            },
            energy: EnergyView {
                mass_kg: report.energy.mass_kg,
                energy_joules: *report.energy.energy,
                energy_megatons_tnt: round_to(*megatons, 2),
                hiroshima_equivalents: round1(megatons.hiroshima_equivalents()),
            },
            impact_effects: EffectsView {
                crater_diameter_m: round1(*report.crater.diameter),
                crater_depth_m: round1(*report.crater.depth),
                fireball_radius_m: round1(*report.fireball_radius),
                thermal_effects_m: ThermalCategory::ALL
                    .into_iter()
                    .map(|c| (c.label(), round1(*report.thermal.radius(c))))
                    .collect(),
                blast_overpressure_radii_m: OverpressureLevel::ALL
                    .into_iter()
                    .map(|l| (l.label(), round1(*report.blast.radius(l))))
                    .collect(),
                blast_wind_effects: OverpressureLevel::ALL
                    .into_iter()
                    .map(|l| {
                        let wind = WindView {
                            wind_speed_kmh: round1(report.blast.wind_speed_kmh(l)),
                        };
                        (l.label(), wind)
                    })
                    .collect(),
            },
            seismic_effects: SeismicView {
                moment_magnitude_mw: round1(report.seismic.moment_magnitude),
                regional_intensities: report
                    .seismic
                    .intensities
                    .iter()
                    .map(|s| {
                        let view = IntensityView {
                            pga_g: round_to(s.pga_g, 3),
                            mmi: s.mmi.label(),
                            description: s.description(),
                        };
                        (format!("{}_km", *s.distance), view)
                    })
                    .collect(),
            },
            tsunami_effects,
            location: LocationView {
                lat,
                lon,
                target: params.target_type,
            },
            applied_scaling_factors: ScalingView {
                factors: report.scaling,
                note: SCALING_NOTE,
            },
            relationship_verification: VerificationView {
                fireball_vs_crater_ratio: round1(report.verification.fireball_vs_crater),
                blast_1psi_vs_crater_ratio: round1(report.verification.blast_1psi_vs_crater),
                thermal_vs_crater_ratio: round1(report.verification.thermal_lethal_vs_crater),
                note: RATIO_NOTE,
            },
            scientific_references: SCIENTIFIC_REFERENCES.to_vec(),
        }
    }
}

impl ReportView {
    /// Pretty-printed JSON
    ///
    /// # Errors
    /// Only fails if serialization itself fails, which the view's plain
    /// data cannot trigger short of non-string map keys.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::ImpactorParameters;
    use crate::pipeline::ImpactEffectsPipeline;

    #[test]
    fn test_rounding() {
        assert_eq!(round_to(3947.8765, 1), 3947.9);
        assert_eq!(round_to(54.2549, 2), 54.25);
        assert_eq!(round_to(0.12345, 3), 0.123);
    }

    #[test]
    fn test_land_view_has_minimal_tsunami_section() {
        let params = ImpactorParameters::new(100.0, 3000.0, 17_000.0).with_site(Some(19.4), Some(-99.1));
        let report = ImpactEffectsPipeline::default().evaluate("Custom input", &params);
        let view = ReportView::from(&report);

        let json: serde_json::Value = serde_json::from_str(&view.to_json_pretty().unwrap()).unwrap();
        assert_eq!(json["tsunami_effects"], serde_json::json!({ "likely": false }));
        assert_eq!(json["location"]["lat"], 19.4);
        assert_eq!(json["impact_effects"]["thermal_effects_m"].as_object().unwrap().len(), 5);
        assert_eq!(json["applied_scaling_factors"]["blast_scaling"], 0.8);
        assert!(json["seismic_effects"]["regional_intensities"]["10_km"].is_object());
    }

    #[test]
    fn test_one_decimal_presentation() {
        let params = ImpactorParameters::new(100.0, 3000.0, 17_000.0);
        let report = ImpactEffectsPipeline::default().evaluate("Custom input", &params);
        let view = ReportView::from(&report);

        let d = view.impact_effects.crater_diameter_m;
        assert_eq!(d, round1(d));
        assert_eq!(view.energy.energy_megatons_tnt, 54.25);
        assert_eq!(view.energy.hiroshima_equivalents, round1(*report.energy_megatons() / 0.015));
        assert_eq!(view.seismic_effects.moment_magnitude_mw, 5.7);
    }

    #[test]
    fn test_maps_keep_severity_and_distance_order() {
        let params = ImpactorParameters::new(2000.0, 3000.0, 20_000.0);
        let report = ImpactEffectsPipeline::default().evaluate("Custom input", &params);
        let view = ReportView::from(&report);

        let psi: Vec<&str> = view.impact_effects.blast_overpressure_radii_m.keys().copied().collect();
        assert_eq!(psi, vec!["50_psi", "10_psi", "5_psi", "1_psi"]);
        let thermal: Vec<&str> = view.impact_effects.thermal_effects_m.keys().copied().collect();
        assert_eq!(thermal, vec!["lethal", "burns_3rd", "burns_2nd", "burns_1st", "ignition"]);

        // Mw ≥ 8 selects the widest distance bucket
        let km: Vec<&str> = view
            .seismic_effects
            .regional_intensities
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(km, vec!["50_km", "200_km", "500_km", "1000_km", "2000_km", "5000_km"]);

        let json = view.to_json_pretty().unwrap();
        let pos = |key: &str| json.find(&format!("\"{key}\"")).unwrap();
        assert!(pos("50_psi") < pos("10_psi") && pos("5_psi") < pos("1_psi"));
        assert!(pos("50_km") < pos("200_km") && pos("2000_km") < pos("5000_km"));
        assert_eq!(
            view.impact_effects.thermal_effects_m.get("lethal").copied(),
            Some(round1(*report.thermal.radius(ThermalCategory::Lethal)))
        );
    }
}
