//! Catalog-driven runs and configuration overrides
//!
//! Covers the error paths of the parameter source (unknown object, unreachable
//! catalog, malformed feed) and confirms configured constants reach the
//! report.
//!
//! Run tests with: `cargo test --test catalog_source`

use approx::assert_relative_eq;
use impact_effects_core::physics::OverpressureLevel;
use impact_effects_core::{
    DateWindow, ImpactEffectsPipeline, ImpactError, ImpactErrorCode, ImpactorParameters,
    NeoCatalog, NeoFeed, NeoRecord, PipelineConfig, Result, TargetType,
};
use std::sync::atomic::{AtomicUsize, Ordering};

#[ctor::ctor]
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

const FEED: &str = r#"{
    "links": { "self": "http://api.nasa.gov/neo/rest/v1/feed?start_date=2026-10-16&end_date=2026-10-18" },
    "element_count": 3,
    "near_earth_objects": {
        "2026-10-16": [{
            "id": "54016523",
            "name": "(2026 TX1)",
            "estimated_diameter": {
                "kilometers": { "estimated_diameter_min": 0.0401, "estimated_diameter_max": 0.0897 },
                "meters": { "estimated_diameter_min": 40.1, "estimated_diameter_max": 89.7 }
            },
            "is_potentially_hazardous_asteroid": false,
            "close_approach_data": [{
                "close_approach_date": "2026-10-16",
                "relative_velocity": { "kilometers_per_second": "15.0", "kilometers_per_hour": "54000.0" },
                "miss_distance": { "kilometers": "4500000.5" },
                "orbiting_body": "Earth"
            }]
        }],
        "2026-10-18": [{
            "id": "3727639",
            "name": "(2015 RC)",
            "estimated_diameter": { "meters": { "estimated_diameter_max": 250.0 } },
            "is_potentially_hazardous_asteroid": true,
            "close_approach_data": [{
                "close_approach_date": "2026-10-18",
                "relative_velocity": { "kilometers_per_hour": "72000" },
                "miss_distance": { "kilometers": "812000" }
            }]
        }, {
            "id": "3999999",
            "name": "(2020 AB)",
            "is_potentially_hazardous_asteroid": false,
            "close_approach_data": []
        }]
    }
}"#;

/// Catalog whose backing service is down; counts how often it is asked
#[derive(Default)]
struct OfflineCatalog {
    calls: AtomicUsize,
}

impl NeoCatalog for OfflineCatalog {
    fn records(&self, _window: &DateWindow) -> Result<Vec<NeoRecord>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(ImpactError::UpstreamUnavailable(
            "connection refused".to_string(),
        ))
    }
}

fn window() -> DateWindow {
    DateWindow::new("2026-10-16", "2026-10-18").unwrap()
}

// ═══════════════════════════════════════════════════════════════════════════════
// SECTION 1: LOOKUP FAILURES
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_unknown_object_is_not_found() {
    let feed = NeoFeed::from_json_str(FEED).unwrap();
    let result = ImpactEffectsPipeline::default().run_from_catalog(
        &feed,
        "(1999 XX)",
        &window(),
        ImpactorParameters::default(),
    );

    let err = result.expect_err("no report for an unknown object");
    assert_eq!(err.code(), ImpactErrorCode::NotFound);
    assert_eq!(err.code().status(), 404);
    let message = err.to_string();
    assert!(message.contains("(1999 XX)"), "{message}");
    assert!(message.contains("2026-10-16") && message.contains("2026-10-18"));
}

#[test]
fn test_object_outside_window_is_not_found() {
    let feed = NeoFeed::from_json_str(FEED).unwrap();
    let first_day = DateWindow::new("2026-10-16", "2026-10-16").unwrap();

    let err = ImpactEffectsPipeline::default()
        .run_from_catalog(&feed, "(2015 RC)", &first_day, ImpactorParameters::default())
        .unwrap_err();
    assert!(matches!(err, ImpactError::NotFound { .. }));
}

#[test]
fn test_offline_catalog_propagates() {
    let catalog = OfflineCatalog::default();
    let err = ImpactEffectsPipeline::default()
        .run_from_catalog(&catalog, "(2015 RC)", &window(), ImpactorParameters::default())
        .unwrap_err();

    assert_eq!(err.code(), ImpactErrorCode::UpstreamUnavailable);
    assert_eq!(err.code().status(), 502);
    assert_eq!(catalog.calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_record_without_velocity_is_rejected() {
    let feed = NeoFeed::from_json_str(FEED).unwrap();
    let err = ImpactEffectsPipeline::default()
        .run_from_catalog(&feed, "(2020 AB)", &window(), ImpactorParameters::default())
        .unwrap_err();
    assert_eq!(err.code(), ImpactErrorCode::InvalidParameter);
}

#[test]
fn test_malformed_feed_is_upstream_error() {
    let err = NeoFeed::from_json_str("{ \"near_earth_objects\": ").unwrap_err();
    assert_eq!(err.code(), ImpactErrorCode::UpstreamUnavailable);

    let bad_number = FEED.replace("\"72000\"", "\"fast\"");
    let err = NeoFeed::from_json_str(&bad_number).unwrap_err();
    assert_eq!(err.code(), ImpactErrorCode::UpstreamUnavailable);
}

#[test]
fn test_reversed_window_is_invalid() {
    let err = DateWindow::new("2026-10-18", "2026-10-16").unwrap_err();
    assert_eq!(err.code(), ImpactErrorCode::InvalidParameter);
    assert!(DateWindow::new("16/10/2026", "2026-10-18").is_err());
}

// ═══════════════════════════════════════════════════════════════════════════════
// SECTION 2: CATALOG RUNS
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_catalog_listing() {
    let feed = NeoFeed::from_json_str(FEED).unwrap();
    let records = feed.records(&window()).unwrap();

    let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["(2026 TX1)", "(2015 RC)", "(2020 AB)"]);
    assert_eq!(
        records.iter().filter(|r| r.is_potentially_hazardous).count(),
        1
    );
}

#[test]
fn test_catalog_object_runs_with_template() {
    let feed = NeoFeed::from_json_str(FEED).unwrap();
    let template = ImpactorParameters::default().on_water(4000.0);

    let report = ImpactEffectsPipeline::default()
        .run_from_catalog(&feed, "(2015 rc)", &window(), template)
        .unwrap();

    assert_eq!(report.name, "(2015 RC)");
    assert_eq!(report.parameters.diameter_m, 250.0);
    assert_relative_eq!(report.parameters.velocity_m_s, 20_000.0, max_relative = 1e-12);
    assert_eq!(report.parameters.density_kg_m3, 3000.0);
    assert_eq!(report.parameters.angle_deg, 45.0);
    assert_eq!(report.parameters.target_type, TargetType::Water);
    assert!(report.tsunami_likely());
}

// ═══════════════════════════════════════════════════════════════════════════════
// SECTION 3: CONFIGURATION
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_config_override_reaches_report() {
    let params = ImpactorParameters::new(100.0, 3000.0, 17_000.0);
    let baseline = ImpactEffectsPipeline::default().evaluate("baseline", &params);

    let config = PipelineConfig::from_json_str(r#"{ "blast": { "scaling_factor": 1.6 } }"#).unwrap();
    let tuned = ImpactEffectsPipeline::new(config).evaluate("tuned", &params);

    assert_relative_eq!(
        *tuned.blast.radius(OverpressureLevel::Psi1),
        2.0 * *baseline.blast.radius(OverpressureLevel::Psi1),
        max_relative = 1e-12
    );
    assert_eq!(tuned.fireball_radius, baseline.fireball_radius);
    assert_eq!(tuned.scaling.blast_scaling, 1.6);
}

#[test]
fn test_bad_config_is_rejected() {
    let err = PipelineConfig::from_json_str(r#"{ "thermal": { "scaling_factor": 0.0 } }"#)
        .unwrap_err();
    assert_eq!(err.code(), ImpactErrorCode::InvalidParameter);

    assert!(PipelineConfig::from_json_str("not json").is_err());
}

#[test]
fn test_batch_keeps_order_and_failures() {
    let scenarios = vec![
        ("small".to_string(), ImpactorParameters::new(20.0, 3000.0, 17_000.0)),
        ("invalid".to_string(), ImpactorParameters::new(-1.0, 3000.0, 17_000.0)),
        ("large".to_string(), ImpactorParameters::new(1000.0, 3000.0, 17_000.0)),
    ];
    let results = ImpactEffectsPipeline::default().evaluate_batch(&scenarios);

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].as_ref().unwrap().name, "small");
    assert!(results[1].is_err());
    let small = results[0].as_ref().unwrap();
    let large = results[2].as_ref().unwrap();
    assert!(large.crater.diameter > small.crater.diameter);
}
