use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use super::bounds::{Bounds, compute_default_bounds};
use super::normalize::{lifespan, to_count, to_label, to_number};

// ---------------------------------------------------------------------------
// RawValue – a single cell as handed over by the loader
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value, before normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Text(s) => write!(f, "{s}"),
            RawValue::Integer(i) => write!(f, "{i}"),
            RawValue::Float(v) => write!(f, "{v}"),
            RawValue::Bool(b) => write!(f, "{b}"),
            RawValue::Null => write!(f, "<null>"),
        }
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Text(s.to_string())
    }
}

impl From<i64> for RawValue {
    fn from(i: i64) -> Self {
        RawValue::Integer(i)
    }
}

impl From<f64> for RawValue {
    fn from(v: f64) -> Self {
        RawValue::Float(v)
    }
}

// ---------------------------------------------------------------------------
// RawRecord – one row of the source file, columns already resolved
// ---------------------------------------------------------------------------

/// One source row. Column names are resolved by the loader, so every field
/// here is guaranteed to come from the right column.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    pub vessel_type: RawValue,
    pub year_lost: RawValue,
    pub year_built: RawValue,
    pub latitude: RawValue,
    pub longitude: RawValue,
    pub lives_lost: RawValue,
    pub cause_of_loss: RawValue,
    pub ship_name: RawValue,
}

impl Default for RawRecord {
    fn default() -> Self {
        Self {
            vessel_type: RawValue::Null,
            year_lost: RawValue::Null,
            year_built: RawValue::Null,
            latitude: RawValue::Null,
            longitude: RawValue::Null,
            lives_lost: RawValue::Null,
            cause_of_loss: RawValue::Null,
            ship_name: RawValue::Null,
        }
    }
}

// ---------------------------------------------------------------------------
// Record – a normalized shipwreck observation
// ---------------------------------------------------------------------------

/// A normalized shipwreck. `None` means the value is missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Record {
    pub vessel_type: Option<String>,
    pub year_lost: Option<f64>,
    pub year_built: Option<f64>,
    /// `year_lost - year_built`; derived at ingestion, never read from the file.
    pub lifespan: Option<f64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub lives_lost: Option<u64>,
    /// Kept as-is; "Unknown" only appears inside categorical summaries.
    pub cause_of_loss: Option<String>,
    pub ship_name: Option<String>,
}

impl Record {
    /// Normalize a raw row and compute its derived fields.
    pub fn from_raw(raw: &RawRecord) -> Self {
        let year_lost = to_number(&raw.year_lost);
        let year_built = to_number(&raw.year_built);
        Record {
            vessel_type: to_label(&raw.vessel_type),
            year_lost,
            year_built,
            lifespan: lifespan(year_lost, year_built),
            latitude: to_number(&raw.latitude),
            longitude: to_number(&raw.longitude),
            lives_lost: to_count(&raw.lives_lost),
            cause_of_loss: to_label(&raw.cause_of_loss),
            ship_name: to_label(&raw.ship_name),
        }
    }
}

// ---------------------------------------------------------------------------
// Typed field selectors
// ---------------------------------------------------------------------------

/// Numeric columns usable by filters and aggregations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NumericField {
    YearLost,
    Lifespan,
    Latitude,
    Longitude,
    LivesLost,
}

impl NumericField {
    pub fn get(self, record: &Record) -> Option<f64> {
        match self {
            NumericField::YearLost => record.year_lost,
            NumericField::Lifespan => record.lifespan,
            NumericField::Latitude => record.latitude,
            NumericField::Longitude => record.longitude,
            NumericField::LivesLost => record.lives_lost.map(|n| n as f64),
        }
    }
}

/// Categorical columns usable for grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CategoryField {
    VesselType,
    CauseOfLoss,
}

impl CategoryField {
    pub fn get(self, record: &Record) -> Option<&str> {
        match self {
            CategoryField::VesselType => record.vessel_type.as_deref(),
            CategoryField::CauseOfLoss => record.cause_of_loss.as_deref(),
        }
    }
}

// ---------------------------------------------------------------------------
// ShipwreckDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full normalized dataset. Immutable once built.
#[derive(Debug, Clone)]
pub struct ShipwreckDataset {
    /// All records, in file order.
    pub records: Vec<Record>,
    /// Sorted distinct vessel types (missing excluded), for the selector.
    pub vessel_types: Vec<String>,
    /// Extents used to seed the filter controls.
    pub bounds: Bounds,
}

impl ShipwreckDataset {
    /// Normalize raw rows and build the selector index.
    pub fn from_raw(raw: &[RawRecord]) -> Self {
        let records: Vec<Record> = raw.iter().map(Record::from_raw).collect();
        Self::from_records(records)
    }

    pub fn from_records(records: Vec<Record>) -> Self {
        let vessel_types: BTreeSet<String> = records
            .iter()
            .filter_map(|r| r.vessel_type.clone())
            .collect();
        let bounds = compute_default_bounds(&records);
        ShipwreckDataset {
            records,
            vessel_types: vessel_types.into_iter().collect(),
            bounds,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
