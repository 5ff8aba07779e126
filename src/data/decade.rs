use std::collections::BTreeMap;

use super::model::{NumericField, Record};
use super::stats::{Mean, round1};

/// The decade a year falls in, e.g. 1859.0 → 1850.
pub fn decade_of(year: f64) -> i64 {
    ((year / 10.0).floor() * 10.0) as i64
}

/// Mean of `value_field` per decade of `year_field`, rounded to one decimal.
///
/// Records missing either field are skipped. Only decades with at least one
/// contributing record appear.
pub fn decade_means<'a, I>(
    records: I,
    year_field: NumericField,
    value_field: NumericField,
) -> BTreeMap<i64, f64>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut buckets: BTreeMap<i64, Mean> = BTreeMap::new();
    for record in records {
        let (Some(year), Some(value)) = (year_field.get(record), value_field.get(record)) else {
            continue;
        };
        buckets.entry(decade_of(year)).or_default().add(value);
    }

    buckets
        .into_iter()
        .filter_map(|(decade, mean)| mean.result().map(|m| (decade, round1(m))))
        .collect()
}
