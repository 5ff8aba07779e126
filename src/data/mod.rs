/// Data layer: loading, normalization, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Vec<RawRecord>
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ normalize  │  RawValue → Option<f64 / u64 / String>, lifespan
///   └───────────┘
///        │
///        ▼
///   ┌────────────────┐
///   │ShipwreckDataset │  Vec<Record>, vessel types, bounds
///   └────────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  FilterParams → RecordView
///   └──────────┘
///        │
///        ▼
///   ┌──────────────────────────────────────────┐
///   │ extremum · categorical · decade · pivot  │  → Report
///   └──────────────────────────────────────────┘
/// ```

pub mod bounds;
pub mod categorical;
pub mod decade;
pub mod extremum;
pub mod filter;
pub mod loader;
pub mod model;
pub mod normalize;
pub mod pivot;
pub mod report;
pub mod stats;
