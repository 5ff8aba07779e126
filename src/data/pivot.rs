use std::collections::BTreeMap;

use super::model::{CategoryField, NumericField, Record};
use super::stats::{Mean, round1};

/// Mean of `value_field` for each distinct `group_field` value, rounded to
/// one decimal and keyed in label order.
///
/// Records with a missing group are dropped; groups whose values are all
/// missing do not appear.
pub fn pivot_mean<'a, I>(
    records: I,
    group_field: CategoryField,
    value_field: NumericField,
) -> BTreeMap<String, f64>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut groups: BTreeMap<String, Mean> = BTreeMap::new();
    for record in records {
        let (Some(group), Some(value)) = (group_field.get(record), value_field.get(record)) else {
            continue;
        };
        groups.entry(group.to_string()).or_default().add(value);
    }

    groups
        .into_iter()
        .filter_map(|(group, mean)| mean.result().map(|m| (group, round1(m))))
        .collect()
}
