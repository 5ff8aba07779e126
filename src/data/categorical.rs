use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use super::model::{CategoryField, Record};

/// Default number of categories reported before the rest fold into "Other".
pub const DEFAULT_CATEGORY_CAP: usize = 30;

/// A row label in a categorical summary.
///
/// The synthetic buckets are their own variants, so a real category spelled
/// "Other" or "Unknown" stays separate from them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum CategoryLabel {
    Value(String),
    /// Records where the field was missing.
    Unknown,
    /// Everything past the cap.
    Other,
}

impl fmt::Display for CategoryLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryLabel::Value(s) => write!(f, "{s}"),
            CategoryLabel::Unknown => write!(f, "Unknown"),
            CategoryLabel::Other => write!(f, "Other"),
        }
    }
}

/// Count records per category, keep the `cap` largest, fold the rest into
/// [`CategoryLabel::Other`], and return the rows ascending by count.
///
/// Equal counts keep first-occurrence order, both when choosing which groups
/// survive the cap and in the final ordering.
pub fn categorical_summary<'a, I>(
    records: I,
    field: CategoryField,
    cap: usize,
) -> Vec<(CategoryLabel, usize)>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut groups: Vec<(CategoryLabel, usize)> = Vec::new();
    let mut index: HashMap<CategoryLabel, usize> = HashMap::new();

    for record in records {
        let label = match field.get(record) {
            Some(v) => CategoryLabel::Value(v.to_string()),
            None => CategoryLabel::Unknown,
        };
        match index.get(&label) {
            Some(&i) => groups[i].1 += 1,
            None => {
                index.insert(label.clone(), groups.len());
                groups.push((label, 1));
            }
        }
    }

    // Stable: ties stay in first-seen order.
    groups.sort_by(|a, b| b.1.cmp(&a.1));

    if groups.len() > cap {
        let other: usize = groups.drain(cap..).map(|(_, n)| n).sum();
        groups.push((CategoryLabel::Other, other));
    }

    groups.sort_by_key(|(_, n)| *n);
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn causes(labels: &[Option<&str>]) -> Vec<Record> {
        labels
            .iter()
            .map(|l| Record {
                cause_of_loss: l.map(str::to_string),
                ..Default::default()
            })
            .collect()
    }

    fn value(s: &str) -> CategoryLabel {
        CategoryLabel::Value(s.to_string())
    }

    #[test]
    fn missing_values_count_as_unknown() {
        let records = causes(&[Some("Fire"), None, Some("Fire"), None, None]);
        let summary =
            categorical_summary(&records, CategoryField::CauseOfLoss, DEFAULT_CATEGORY_CAP);
        assert_eq!(summary, vec![(value("Fire"), 2), (CategoryLabel::Unknown, 3)]);
        // The record itself is not relabelled.
        assert_eq!(records[1].cause_of_loss, None);
    }

    #[test]
    fn cap_boundary_tie_keeps_first_seen() {
        // Counts A:5, B:3, C:3, D:1, with C seen before B.
        let mut labels = vec![Some("A"), Some("C"), Some("B"), Some("D")];
        labels.extend([Some("A"); 4]);
        labels.extend([Some("C"); 2]);
        labels.extend([Some("B"); 2]);
        let records = causes(&labels);

        let summary = categorical_summary(&records, CategoryField::CauseOfLoss, 2);
        assert_eq!(
            summary,
            vec![(value("C"), 3), (CategoryLabel::Other, 4), (value("A"), 5)]
        );
    }

    #[test]
    fn no_other_bucket_within_cap() {
        let records = causes(&[Some("Fire"), Some("Storm"), Some("Storm")]);
        let summary = categorical_summary(&records, CategoryField::CauseOfLoss, 2);
        assert_eq!(summary, vec![(value("Fire"), 1), (value("Storm"), 2)]);
    }

    #[test]
    fn real_other_category_is_not_merged_with_synthetic_one() {
        let records = causes(&[Some("Other"), Some("Other"), Some("Fire"), Some("Ice")]);
        let summary = categorical_summary(&records, CategoryField::CauseOfLoss, 1);
        assert_eq!(summary, vec![(value("Other"), 2), (CategoryLabel::Other, 2)]);
    }

    #[test]
    fn empty_input_gives_empty_summary() {
        let summary = categorical_summary(&causes(&[]), CategoryField::VesselType, 3);
        assert!(summary.is_empty());
    }

    proptest! {
        #[test]
        fn prop_counts_sum_to_input_and_respect_cap(
            labels in prop::collection::vec(
                proptest::option::of(prop::sample::select(vec!["a", "b", "c", "d", "e", "f"])),
                0..60,
            ),
            cap in 0usize..8,
        ) {
            let records = causes(&labels);
            let summary = categorical_summary(&records, CategoryField::CauseOfLoss, cap);
            let total: usize = summary.iter().map(|(_, n)| n).sum();
            prop_assert_eq!(total, records.len());
            prop_assert!(summary.len() <= cap + 1);
            prop_assert!(summary.windows(2).all(|w| w[0].1 <= w[1].1));
        }
    }
}
