use super::model::RawValue;

// ---------------------------------------------------------------------------
// Field normalization: raw cell → typed optional value
// ---------------------------------------------------------------------------

/// Interpret a raw cell as a finite number.
///
/// Blank text, unparsable text, booleans, nulls and non-finite values are all
/// treated as missing. Never fails.
pub fn to_number(value: &RawValue) -> Option<f64> {
    let v = match value {
        RawValue::Integer(i) => *i as f64,
        RawValue::Float(f) => *f,
        RawValue::Text(s) => s.trim().parse::<f64>().ok()?,
        RawValue::Bool(_) | RawValue::Null => return None,
    };
    v.is_finite().then_some(v)
}

/// Interpret a raw cell as a non-negative whole count (e.g. lives lost).
pub fn to_count(value: &RawValue) -> Option<u64> {
    let v = to_number(value)?;
    if v < 0.0 || v.fract() != 0.0 || v > u64::MAX as f64 {
        return None;
    }
    Some(v as u64)
}

/// Interpret a raw cell as a category label.
pub fn to_label(value: &RawValue) -> Option<String> {
    match value {
        RawValue::Text(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        RawValue::Integer(_) | RawValue::Float(_) | RawValue::Bool(_) => Some(value.to_string()),
        RawValue::Null => None,
    }
}

/// Years between construction and loss; missing if either year is.
pub fn lifespan(year_lost: Option<f64>, year_built: Option<f64>) -> Option<f64> {
    Some(year_lost? - year_built?)
}
