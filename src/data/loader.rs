use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use arrow::util::display::array_value_to_string;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::{RawRecord, RawValue, ShipwreckDataset};

// ---------------------------------------------------------------------------
// Schema
// ---------------------------------------------------------------------------

pub const VESSEL_TYPE: &str = "VESSEL TYPE";
pub const YEAR: &str = "YEAR";
pub const YEAR_BUILT: &str = "YEAR BUILT";
pub const LATITUDE: &str = "LATITUDE";
pub const LONGITUDE: &str = "LONGITUDE";
pub const LIVES_LOST: &str = "LIVES LOST";
pub const CAUSE_OF_LOSS: &str = "CAUSE OF LOSS";
pub const SHIPS_NAME: &str = "SHIPS NAME";

/// Required columns, in [`RawRecord`] field order.
pub const COLUMNS: [&str; 8] = [
    VESSEL_TYPE,
    YEAR,
    YEAR_BUILT,
    LATITUDE,
    LONGITUDE,
    LIVES_LOST,
    CAUSE_OF_LOSS,
    SHIPS_NAME,
];

/// Structural problems with an input file. Bad cell values are never errors.
#[derive(Debug, Error, PartialEq)]
pub enum SchemaError {
    #[error("missing required column '{column}' (found: {available:?})")]
    MissingColumn {
        column: String,
        available: Vec<String>,
    },
    #[error("record {0} is not a JSON object")]
    NotAnObject(usize),
}

/// Resolve every required column to its position, once per file.
fn resolve_columns(available: &[String]) -> Result<[usize; 8], SchemaError> {
    let mut indices = [0; 8];
    for (slot, name) in indices.iter_mut().zip(COLUMNS) {
        *slot = available
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| SchemaError::MissingColumn {
                column: name.to_string(),
                available: available.to_vec(),
            })?;
    }
    Ok(indices)
}

fn record_from_cells(cells: [RawValue; 8]) -> RawRecord {
    let [
        vessel_type,
        year_lost,
        year_built,
        latitude,
        longitude,
        lives_lost,
        cause_of_loss,
        ship_name,
    ] = cells;
    RawRecord {
        vessel_type,
        year_lost,
        year_built,
        latitude,
        longitude,
        lives_lost,
        cause_of_loss,
        ship_name,
    }
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load and normalize a shipwreck dataset.
pub fn load_file(path: &Path) -> Result<ShipwreckDataset> {
    let raw = load_records(path)?;
    Ok(ShipwreckDataset::from_raw(&raw))
}

/// Load raw records from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the column names, one wreck per row
/// * `.json`    – `[{ "SHIPS NAME": "...", "YEAR": 1850, ... }, ...]`
/// * `.parquet` – one column per field, any common scalar type
pub fn load_records(path: &Path) -> Result<Vec<RawRecord>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Every cell is read as text; blank cells become [`RawValue::Null`].
/// Cells are decoded lossily, so stray Latin-1 bytes don't fail the load.
fn load_csv(path: &Path) -> Result<Vec<RawRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .context("opening CSV")?;
    let headers: Vec<String> = reader
        .byte_headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| String::from_utf8_lossy(h).trim().to_string())
        .collect();
    let indices = resolve_columns(&headers)?;

    let mut records = Vec::new();
    for (row_no, result) in reader.byte_records().enumerate() {
        let row = result.with_context(|| format!("CSV row {row_no}"))?;
        if row.len() != headers.len() {
            log::warn!(
                "CSV row {row_no}: {} fields, expected {}; absent cells read as blank",
                row.len(),
                headers.len()
            );
        }
        let cells = indices.map(|i| text_cell(row.get(i).unwrap_or_default()));
        records.push(record_from_cells(cells));
    }

    Ok(records)
}

fn text_cell(bytes: &[u8]) -> RawValue {
    let s = String::from_utf8_lossy(bytes);
    if s.trim().is_empty() {
        RawValue::Null
    } else {
        RawValue::Text(s.into_owned())
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `df.to_json(orient='records')`.
/// Keys may be omitted for missing values, but every required column must
/// appear in at least one record.
fn load_json(path: &Path) -> Result<Vec<RawRecord>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let rows = root.as_array().context("Expected top-level JSON array")?;

    let mut objects = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        objects.push(row.as_object().ok_or(SchemaError::NotAnObject(i))?);
    }

    if !objects.is_empty() {
        let mut seen: Vec<String> = Vec::new();
        for obj in &objects {
            for key in obj.keys() {
                if !seen.contains(key) {
                    seen.push(key.clone());
                }
            }
        }
        resolve_columns(&seen)?;
    }

    Ok(objects
        .into_iter()
        .map(|obj| {
            record_from_cells(COLUMNS.map(|col| obj.get(col).map_or(RawValue::Null, json_to_raw)))
        })
        .collect())
}

fn json_to_raw(val: &JsonValue) -> RawValue {
    match val {
        JsonValue::String(s) if s.trim().is_empty() => RawValue::Null,
        JsonValue::String(s) => RawValue::Text(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                RawValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                RawValue::Float(f)
            } else {
                RawValue::Text(n.to_string())
            }
        }
        JsonValue::Bool(b) => RawValue::Bool(*b),
        JsonValue::Null => RawValue::Null,
        other => RawValue::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one column per field.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Vec<RawRecord>> {
    let file = File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;

    let field_names: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let indices = resolve_columns(&field_names)?;

    let reader = builder.build().context("building parquet reader")?;
    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let columns = indices.map(|i| batch.column(i).clone());
        for row in 0..batch.num_rows() {
            let cells = std::array::from_fn(|c| extract_raw_value(&columns[c], row));
            records.push(record_from_cells(cells));
        }
    }

    Ok(records)
}

/// Extract a single cell from an Arrow column at a given row.
fn extract_raw_value(col: &ArrayRef, row: usize) -> RawValue {
    if col.is_null(row) {
        return RawValue::Null;
    }
    match col.data_type() {
        DataType::Utf8 => text_value(col.as_string::<i32>().value(row)),
        DataType::LargeUtf8 => text_value(col.as_string::<i64>().value(row)),
        DataType::Utf8View => text_value(col.as_string_view().value(row)),
        DataType::Int32 => RawValue::Integer(col.as_primitive::<Int32Type>().value(row) as i64),
        DataType::Int64 => RawValue::Integer(col.as_primitive::<Int64Type>().value(row)),
        DataType::Float32 => RawValue::Float(col.as_primitive::<Float32Type>().value(row) as f64),
        DataType::Float64 => RawValue::Float(col.as_primitive::<Float64Type>().value(row)),
        DataType::Boolean => RawValue::Bool(col.as_boolean().value(row)),
        other => match array_value_to_string(col, row) {
            Ok(s) => text_value(&s),
            Err(e) => {
                log::warn!("unreadable {other:?} cell at row {row}: {e}");
                RawValue::Null
            }
        },
    }
}

fn text_value(s: &str) -> RawValue {
    if s.trim().is_empty() {
        RawValue::Null
    } else {
        RawValue::Text(s.to_string())
    }
}
