//! Near-Earth-object catalog parameter source
//!
//! Models the NASA `NeoWs` `feed` document (objects grouped by close-approach
//! date, numbers encoded as strings) and turns catalog records into
//! pipeline parameters. Fetching the feed over the network is left to the
//! caller; this module only interprets a document it is handed.

use crate::core_types::{ImpactorParameters, DEFAULT_DENSITY_KG_M3, DEFAULT_IMPACT_ANGLE_DEG};
use crate::error::{ImpactError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// km/h per m/s
const KMH_PER_MS: f64 = 3.6;

/// Inclusive range of close-approach dates (ISO `YYYY-MM-DD`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    /// First day
    pub start_date: String,
    /// Last day
    pub end_date: String,
}

impl DateWindow {
    /// Create a window, checking both bounds are ISO dates in order.
    ///
    /// # Errors
    /// Returns `ImpactError::InvalidParameter` for malformed dates or an
    /// end date before the start date.
    pub fn new(start_date: &str, end_date: &str) -> Result<Self> {
        check_iso_date("start_date", start_date)?;
        check_iso_date("end_date", end_date)?;
        if end_date < start_date {
            return Err(ImpactError::invalid(
                "end_date",
                format!("{end_date} is before {start_date}"),
            ));
        }
        Ok(Self {
            start_date: start_date.to_string(),
            end_date: end_date.to_string(),
        })
    }

    /// Whether an ISO date falls inside the window
    pub fn contains(&self, date: &str) -> bool {
        // ISO dates order lexicographically
        date >= self.start_date.as_str() && date <= self.end_date.as_str()
    }
}

fn days_in_month(year: u32, month: u32) -> u32 {
    match month {
        2 if year % 4 == 0 && (year % 100 != 0 || year % 400 == 0) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

fn check_iso_date(name: &'static str, date: &str) -> Result<()> {
    let bytes = date.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return Err(ImpactError::invalid(
            name,
            format!("expected YYYY-MM-DD, got '{date}'"),
        ));
    }

    let field = |range: std::ops::Range<usize>| date[range].parse::<u32>().unwrap_or(0);
    let (year, month, day) = (field(0..4), field(5..7), field(8..10));
    if !(1..=12).contains(&month) {
        return Err(ImpactError::invalid(
            name,
            format!("month {month:02} out of range in '{date}'"),
        ));
    }
    if !(1..=days_in_month(year, month)).contains(&day) {
        return Err(ImpactError::invalid(
            name,
            format!("day {day:02} out of range in '{date}'"),
        ));
    }
    Ok(())
}

/// One catalog object, reduced to what the pipeline and listings need
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeoRecord {
    /// Designation, e.g. "(2024 YR4)"
    pub name: String,
    /// Upper bound of the estimated diameter (m)
    pub estimated_max_diameter_m: Option<f64>,
    /// Relative velocity at the first listed close approach (km/h)
    pub relative_velocity_km_h: Option<f64>,
    /// Date of the first listed close approach
    pub close_approach_date: Option<String>,
    /// Miss distance at the first listed close approach (km)
    pub miss_distance_km: Option<f64>,
    /// NASA's potentially-hazardous flag
    pub is_potentially_hazardous: bool,
}

impl NeoRecord {
    /// Relative velocity in m/s
    pub fn relative_velocity_m_s(&self) -> Option<f64> {
        self.relative_velocity_km_h.map(|v| v / KMH_PER_MS)
    }

    /// Fill a parameter template with this object's size and speed.
    ///
    /// Catalogs carry no density or trajectory, so density is set to
    /// 3000 kg/m³ and the angle to 45°. Target, altitude, soil and site
    /// come from `template`.
    ///
    /// # Errors
    /// Returns `ImpactError::InvalidParameter` if the record has no
    /// diameter estimate or no close-approach velocity.
    pub fn apply_to(&self, template: ImpactorParameters) -> Result<ImpactorParameters> {
        let diameter_m = self.estimated_max_diameter_m.ok_or_else(|| {
            ImpactError::invalid(
                "estimated_max_diameter_m",
                format!("'{}' has no diameter estimate", self.name),
            )
        })?;
        let velocity_m_s = self.relative_velocity_m_s().ok_or_else(|| {
            ImpactError::invalid(
                "relative_velocity_km_h",
                format!("'{}' has no close-approach velocity", self.name),
            )
        })?;

        Ok(ImpactorParameters {
            diameter_m,
            density_kg_m3: DEFAULT_DENSITY_KG_M3,
            velocity_m_s,
            angle_deg: DEFAULT_IMPACT_ANGLE_DEG,
            ..template
        })
    }
}

/// A source of near-Earth-object records
pub trait NeoCatalog {
    /// Every record with a close approach inside the window.
    ///
    /// # Errors
    /// Returns `ImpactError::UpstreamUnavailable` if the catalog cannot
    /// be read.
    fn records(&self, window: &DateWindow) -> Result<Vec<NeoRecord>>;

    /// Find an object by name (case-insensitive) inside the window.
    ///
    /// # Errors
    /// Returns `ImpactError::NotFound` if no record matches, or whatever
    /// `records` fails with.
    fn lookup(&self, name: &str, window: &DateWindow) -> Result<NeoRecord> {
        let wanted = name.trim().to_lowercase();
        self.records(window)?
            .into_iter()
            .find(|r| r.name.to_lowercase() == wanted)
            .ok_or_else(|| ImpactError::NotFound {
                name: name.to_string(),
                start_date: window.start_date.clone(),
                end_date: window.end_date.clone(),
            })
    }
}

// ============================================================================
// NEOWS FEED DOCUMENT
// ============================================================================

#[derive(Debug, Deserialize)]
struct RawFeed {
    #[serde(default)]
    near_earth_objects: BTreeMap<String, Vec<RawObject>>,
}

#[derive(Debug, Deserialize)]
struct RawObject {
    #[serde(default)]
    name: String,
    #[serde(default)]
    estimated_diameter: Option<RawDiameters>,
    #[serde(default)]
    is_potentially_hazardous_asteroid: Option<bool>,
    #[serde(default)]
    close_approach_data: Vec<RawApproach>,
}

#[derive(Debug, Deserialize)]
struct RawDiameters {
    meters: Option<RawRange>,
}

#[derive(Debug, Deserialize)]
struct RawRange {
    estimated_diameter_max: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawApproach {
    close_approach_date: Option<String>,
    relative_velocity: Option<RawVelocity>,
    miss_distance: Option<RawMissDistance>,
}

#[derive(Debug, Deserialize)]
struct RawVelocity {
    kilometers_per_hour: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawMissDistance {
    kilometers: Option<String>,
}

fn parse_number(field: &str, value: Option<&String>) -> Result<Option<f64>> {
    value
        .map(|s| {
            s.trim().parse::<f64>().map_err(|_| {
                ImpactError::UpstreamUnavailable(format!("{field} is not a number: '{s}'"))
            })
        })
        .transpose()
}

impl RawObject {
    fn into_record(self) -> Result<NeoRecord> {
        let approach = self.close_approach_data.first();

        let relative_velocity_km_h = parse_number(
            "relative_velocity.kilometers_per_hour",
            approach
                .and_then(|a| a.relative_velocity.as_ref())
                .and_then(|v| v.kilometers_per_hour.as_ref()),
        )?;
        let miss_distance_km = parse_number(
            "miss_distance.kilometers",
            approach
                .and_then(|a| a.miss_distance.as_ref())
                .and_then(|m| m.kilometers.as_ref()),
        )?;

        Ok(NeoRecord {
            estimated_max_diameter_m: self
                .estimated_diameter
                .and_then(|d| d.meters)
                .and_then(|m| m.estimated_diameter_max),
            close_approach_date: approach.and_then(|a| a.close_approach_date.clone()),
            relative_velocity_km_h,
            miss_distance_km,
            is_potentially_hazardous: self.is_potentially_hazardous_asteroid.unwrap_or(false),
            name: self.name,
        })
    }
}

/// A parsed `NeoWs` feed: records grouped by close-approach date
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NeoFeed {
    by_date: BTreeMap<String, Vec<NeoRecord>>,
}

impl NeoFeed {
    /// Parse a feed document.
    ///
    /// # Errors
    /// Returns `ImpactError::UpstreamUnavailable` if the document is not
    /// valid JSON or carries non-numeric velocity/distance strings.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: RawFeed = serde_json::from_str(json)?;

        let mut by_date = BTreeMap::new();
        for (date, objects) in raw.near_earth_objects {
            let records = objects
                .into_iter()
                .map(RawObject::into_record)
                .collect::<Result<Vec<_>>>()?;
            by_date.insert(date, records);
        }

        tracing::debug!(
            "Parsed NEO feed: {} dates, {} objects",
            by_date.len(),
            by_date.values().map(Vec::len).sum::<usize>()
        );
        Ok(Self { by_date })
    }

    /// Window spanning every date in the feed, if it has any
    pub fn span(&self) -> Option<DateWindow> {
        let start = self.by_date.keys().next()?;
        let end = self.by_date.keys().next_back()?;
        Some(DateWindow {
            start_date: start.clone(),
            end_date: end.clone(),
        })
    }
}

impl NeoCatalog for NeoFeed {
    fn records(&self, window: &DateWindow) -> Result<Vec<NeoRecord>> {
        Ok(self
            .by_date
            .iter()
            .filter(|(date, _)| window.contains(date))
            .flat_map(|(_, records)| records.iter().cloned())
            .collect())
    }
}
