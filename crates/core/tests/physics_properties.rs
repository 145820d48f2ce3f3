//! Physical property checks across the input space
//!
//! # Test Categories
//! 1. Degenerate energy: zero/neutral results from every model
//! 2. Crater floor invariant
//! 3. Classical/relativistic energy continuity at 30 km/s
//! 4. Blast wind monotonicity in psi level and energy
//! 5. Tsunami likelihood threshold
//! 6. Seismic magnitude sign and MMI step function
//!
//! Run tests with: `cargo test --test physics_properties`

use approx::assert_relative_eq;
use impact_effects_core::physics::energy::{kinetic_energy, RELATIVISTIC_THRESHOLD_M_S};
use impact_effects_core::physics::{
    BlastModel, CraterModel, FireballModel, MmiCategory, OverpressureLevel, SeismicModel,
    ThermalCategory, ThermalModel, TsunamiModel,
};
use impact_effects_core::{Joules, Kilometers, Megatons, Meters, SoilType, TargetType};

/// Energies from 1 kt to 100 Gt
fn energy_sweep() -> impl Iterator<Item = Megatons> {
    (-3..=5).flat_map(|exp| {
        [1.0, 2.5, 5.0].into_iter().map(move |m| Megatons::new(m * 10f64.powi(exp)))
    })
}

// ═══════════════════════════════════════════════════════════════════════════════
// SECTION 1: DEGENERATE ENERGY
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_non_positive_energy_is_neutral() {
    let crater = CraterModel::default();
    let fireball = FireballModel::default();
    let thermal = ThermalModel::default();
    let blast = BlastModel::default();

    for energy in [Megatons::ZERO, Megatons::new(-10.0)] {
        for diameter in [1.0, 25.0, 1000.0] {
            for target in [TargetType::Land, TargetType::Water] {
                let c = crater.crater_metrics(Meters::new(diameter), energy, 45.0, 3000.0, target);
                assert_eq!(*c.diameter, 8.0 * diameter);
                assert_relative_eq!(*c.depth, 1.6 * diameter, max_relative = 1e-12);
            }
        }

        for altitude in [0.0, 3.0, 12.0] {
            let altitude = Kilometers::new(altitude);
            assert_eq!(fireball.fireball_radius(energy, altitude), Meters::ZERO);
            let b = blast.blast_effects(energy, altitude);
            for level in OverpressureLevel::ALL {
                assert_eq!(b.radius(level), Meters::ZERO);
            }
        }

        let t = thermal.thermal_effects(energy);
        for category in ThermalCategory::ALL {
            assert_eq!(t.radius(category), Meters::ZERO);
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// SECTION 2: CRATER FLOOR
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_crater_never_below_eight_projectile_diameters() {
    let model = CraterModel::default();
    for energy in energy_sweep() {
        for diameter in [1.0, 10.0, 100.0, 1000.0, 10_000.0] {
            for angle in [0.0, 5.0, 30.0, 45.0, 90.0] {
                for target in [TargetType::Land, TargetType::Water] {
                    let crater =
                        model.crater_metrics(Meters::new(diameter), energy, angle, 2000.0, target);
                    assert!(
                        *crater.diameter >= 8.0 * diameter,
                        "{} MT, d={diameter}, θ={angle}: {}",
                        *energy,
                        crater.diameter
                    );
                }
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// SECTION 3: ENERGY CONTINUITY
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_energy_branches_meet_at_threshold() {
    let mass = 1.5708e9;
    for delta in [1e-3, 1e-1, 1.0] {
        let below = kinetic_energy(mass, RELATIVISTIC_THRESHOLD_M_S - delta);
        let above = kinetic_energy(mass, RELATIVISTIC_THRESHOLD_M_S + delta);
        assert_relative_eq!(*below, *above, max_relative = 1e-4);
    }

    let at = kinetic_energy(mass, RELATIVISTIC_THRESHOLD_M_S);
    let just_above = kinetic_energy(mass, RELATIVISTIC_THRESHOLD_M_S * (1.0 + f64::EPSILON));
    assert_relative_eq!(*at, *just_above, max_relative = 1e-7);
}

#[test]
fn test_energy_increases_with_velocity() {
    let mut last = Joules::ZERO;
    for v in (11..=72).map(|kms| f64::from(kms) * 1000.0) {
        let e = kinetic_energy(1.0e6, v);
        assert!(e > last, "energy must rise with velocity at {v} m/s");
        last = e;
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// SECTION 4: BLAST WIND
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_wind_non_decreasing_in_psi_level() {
    let model = BlastModel::default();
    for energy in energy_sweep() {
        let winds: Vec<f64> = [
            OverpressureLevel::Psi1,
            OverpressureLevel::Psi5,
            OverpressureLevel::Psi10,
            OverpressureLevel::Psi50,
        ]
        .into_iter()
        .map(|level| model.wind_speed_kmh(level, energy))
        .collect();

        for pair in winds.windows(2) {
            assert!(pair[0] <= pair[1], "{} MT: {:?}", *energy, winds);
        }
    }
}

#[test]
fn test_wind_non_decreasing_in_energy() {
    let model = BlastModel::default();
    for level in OverpressureLevel::ALL {
        let mut last = 0.0;
        for energy in energy_sweep() {
            let wind = model.wind_speed_kmh(level, energy);
            assert!(wind >= last, "{level} at {} MT", *energy);
            last = wind;
        }
        // Boost is capped at +50%
        let cap = model.wind_speed_kmh(level, Megatons::new(1e9));
        assert_relative_eq!(
            cap,
            1.5 * model.wind_speed_kmh(level, Megatons::new(50.0)),
            max_relative = 1e-12
        );
    }
}

#[test]
fn test_blast_radius_fractions_fixed() {
    let model = BlastModel::default();
    for energy in energy_sweep() {
        let b = model.blast_effects(energy, Kilometers::ZERO);
        let base = *b.radius(OverpressureLevel::Psi1);
        assert_relative_eq!(*b.radius(OverpressureLevel::Psi5), 0.5 * base, max_relative = 1e-12);
        assert_relative_eq!(*b.radius(OverpressureLevel::Psi10), 0.3 * base, max_relative = 1e-12);
        assert_relative_eq!(*b.radius(OverpressureLevel::Psi50), 0.12 * base, max_relative = 1e-12);
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// SECTION 5: TSUNAMI
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_tsunami_likely_iff_above_one_megaton() {
    let model = TsunamiModel::default();
    for energy in energy_sweep().chain([Megatons::new(1.0), Megatons::ZERO]) {
        for depth in [50.0, 999.0, 1000.0, 4000.0] {
            let t = model.tsunami_effects(energy, depth);
            assert_eq!(t.likely, *energy > 1.0, "{} MT", *energy);
            if !t.likely {
                assert_eq!(t.max_wave_height, Meters::ZERO);
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// SECTION 6: SEISMIC
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_magnitude_never_negative() {
    let model = SeismicModel::default();
    for exp in 0..=26 {
        let energy = Joules::new(10f64.powi(exp));
        for depth in [0.0, 0.5, 2.0] {
            let mw = model.moment_magnitude(energy, Kilometers::new(depth));
            assert!(mw >= 0.0, "Mw {mw} for 1e{exp} J");
        }
    }
}

#[test]
fn test_mmi_is_monotone_step_function() {
    let mut last = MmiCategory::I;
    let mut pga = 0.001;
    while pga < 3.0 {
        let mmi = MmiCategory::from_pga(pga);
        assert!(mmi >= last, "MMI dropped at {pga} g");
        last = mmi;
        pga *= 1.05;
    }
    assert_eq!(last, MmiCategory::IXToX);
}

#[test]
fn test_intensity_map_matches_step_function() {
    let model = SeismicModel::default();
    for mw in [0.0, 3.5, 4.2, 5.7, 6.3, 7.8, 8.4] {
        for soil in [SoilType::Rock, SoilType::HardSoil, SoilType::SoftSoil, SoilType::Sediment] {
            let samples = model.regional_intensities(mw, soil);
            assert_eq!(samples.len(), 6);
            assert!(samples.iter().any(|s| *s.distance >= 5.0));
            for s in samples {
                assert_eq!(s.mmi, MmiCategory::from_pga(s.pga_g));
            }
        }
    }
}
