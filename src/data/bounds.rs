use serde::Serialize;

use super::model::{NumericField, Record};

// ---------------------------------------------------------------------------
// Default bounds for the filter controls
// ---------------------------------------------------------------------------

/// Whole-number extents of the fields that drive the sliders.
/// `None` when no record has the field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Bounds {
    pub years: Option<(i64, i64)>,
    pub casualties: Option<(i64, i64)>,
}

/// Compute slider extents from the full dataset. Called once per load.
pub fn compute_default_bounds(records: &[Record]) -> Bounds {
    Bounds {
        years: field_extent(records, NumericField::YearLost),
        casualties: field_extent(records, NumericField::LivesLost),
    }
}

fn field_extent(records: &[Record], field: NumericField) -> Option<(i64, i64)> {
    let mut values = records.iter().filter_map(|r| field.get(r));
    let first = values.next()?;
    let (min, max) = values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
    Some((min.floor() as i64, max.floor() as i64))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wreck(year: Option<f64>, lives: Option<u64>) -> Record {
        Record {
            year_lost: year,
            lives_lost: lives,
            ..Default::default()
        }
    }

    #[test]
    fn extents_skip_missing_values() {
        let records = vec![
            wreck(Some(1870.0), None),
            wreck(None, Some(40)),
            wreck(Some(1803.0), Some(0)),
            wreck(Some(1921.0), Some(12)),
        ];
        let bounds = compute_default_bounds(&records);
        assert_eq!(bounds.years, Some((1803, 1921)));
        assert_eq!(bounds.casualties, Some((0, 40)));
    }

    #[test]
    fn all_missing_field_has_no_extent() {
        let records = vec![wreck(Some(1900.0), None)];
        let bounds = compute_default_bounds(&records);
        assert_eq!(bounds.years, Some((1900, 1900)));
        assert_eq!(bounds.casualties, None);
        assert_eq!(compute_default_bounds(&[]), Bounds::default());
    }
}
