use std::cmp::Ordering;

use serde::Serialize;

use super::bounds::Bounds;
use super::model::{NumericField, Record};

// ---------------------------------------------------------------------------
// Vessel type selection
// ---------------------------------------------------------------------------

/// The vessel-type selector value. `All` is the "no constraint" sentinel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub enum VesselSelection {
    #[default]
    All,
    Only(String),
}

impl VesselSelection {
    pub const ALL_LABEL: &'static str = "All";

    /// Build from the selector label, mapping `"All"` to the sentinel.
    pub fn from_label(label: &str) -> Self {
        if label == Self::ALL_LABEL {
            VesselSelection::All
        } else {
            VesselSelection::Only(label.to_string())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            VesselSelection::All => Self::ALL_LABEL,
            VesselSelection::Only(t) => t,
        }
    }
}

// ---------------------------------------------------------------------------
// Predicates
// ---------------------------------------------------------------------------

/// One condition of a conjunctive record filter.
///
/// A record whose referenced field is missing never satisfies an active
/// predicate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Predicate {
    /// Equality on vessel type; `All` matches everything.
    VesselType(VesselSelection),
    /// `year_lost <= max`.
    YearAtMost(i64),
    /// `lo <= lives_lost <= hi`.
    LivesLostWithin(i64, i64),
    /// `lo <= year_lost <= hi`.
    YearWithin(i64, i64),
    /// The field is not missing.
    Present(NumericField),
}

impl Predicate {
    /// Whether this predicate constrains anything at all.
    pub fn is_active(&self) -> bool {
        !matches!(self, Predicate::VesselType(VesselSelection::All))
    }

    pub fn matches(&self, record: &Record) -> bool {
        match self {
            Predicate::VesselType(VesselSelection::All) => true,
            Predicate::VesselType(VesselSelection::Only(wanted)) => {
                record.vessel_type.as_deref() == Some(wanted.as_str())
            }
            Predicate::YearAtMost(max) => record.year_lost.is_some_and(|y| y <= *max as f64),
            Predicate::LivesLostWithin(lo, hi) => {
                within(NumericField::LivesLost.get(record), *lo, *hi)
            }
            Predicate::YearWithin(lo, hi) => within(record.year_lost, *lo, *hi),
            Predicate::Present(field) => field.get(record).is_some(),
        }
    }
}

fn within(value: Option<f64>, lo: i64, hi: i64) -> bool {
    value.is_some_and(|v| v >= lo as f64 && v <= hi as f64)
}

/// How the rows of a filtered view are ordered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RowOrder {
    /// Keep the input order.
    #[default]
    Input,
    /// Ascending by year lost; records without a year go last.
    Display,
}

// ---------------------------------------------------------------------------
// RecordView – the result of filtering
// ---------------------------------------------------------------------------

/// A filtered view borrowing records from the dataset.
///
/// An empty view and an unfiltered view are different things: see
/// [`RecordView::is_constrained`].
#[derive(Debug, Clone)]
pub struct RecordView<'a> {
    rows: Vec<&'a Record>,
    constrained: bool,
}

impl<'a> RecordView<'a> {
    /// A view over every record, with no filter applied.
    pub fn all(records: &'a [Record]) -> Self {
        RecordView {
            rows: records.iter().collect(),
            constrained: false,
        }
    }

    /// Apply further predicates on top of this view.
    pub fn refine(&self, predicates: &[Predicate], order: RowOrder) -> RecordView<'a> {
        let mut view = filter(self.iter(), predicates, order);
        view.constrained |= self.constrained;
        view
    }

    pub fn rows(&self) -> &[&'a Record] {
        &self.rows
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Record> + '_ {
        self.rows.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// True when at least one active predicate produced this view.
    pub fn is_constrained(&self) -> bool {
        self.constrained
    }

    /// Clone the rows out so they can outlive the dataset borrow.
    pub fn to_records(&self) -> Vec<Record> {
        self.rows.iter().map(|r| (*r).clone()).collect()
    }
}

impl<'v, 'a> IntoIterator for &'v RecordView<'a> {
    type Item = &'a Record;
    type IntoIter = std::iter::Copied<std::slice::Iter<'v, &'a Record>>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter().copied()
    }
}

/// Keep records that satisfy every predicate.
///
/// The input is never modified; the result borrows from it.
pub fn filter<'a, I>(records: I, predicates: &[Predicate], order: RowOrder) -> RecordView<'a>
where
    I: IntoIterator<Item = &'a Record>,
{
    let active: Vec<&Predicate> = predicates.iter().filter(|p| p.is_active()).collect();
    let mut rows: Vec<&'a Record> = records
        .into_iter()
        .filter(|r| active.iter().all(|p| p.matches(r)))
        .collect();

    if order == RowOrder::Display {
        rows.sort_by(|a, b| missing_last(a.year_lost, b.year_lost));
    }

    RecordView {
        rows,
        constrained: !active.is_empty(),
    }
}

fn missing_last(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

// ---------------------------------------------------------------------------
// FilterParams – the externally supplied control values
// ---------------------------------------------------------------------------

/// Current values of the vessel selector and the sliders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterParams {
    pub selected_vessel_type: VesselSelection,
    pub max_year: i64,
    pub casualty_range: (i64, i64),
    pub year_range: (i64, i64),
}

impl FilterParams {
    /// Fully open parameters for the given dataset extents.
    pub fn defaults(bounds: &Bounds) -> Self {
        let years = bounds.years.unwrap_or((0, 0));
        let casualties = bounds.casualties.unwrap_or((0, 0));
        FilterParams {
            selected_vessel_type: VesselSelection::All,
            max_year: years.1,
            casualty_range: casualties,
            year_range: years,
        }
    }

    /// Predicates for the main view: vessel type and year ceiling.
    pub fn selection_predicates(&self) -> Vec<Predicate> {
        vec![
            Predicate::VesselType(self.selected_vessel_type.clone()),
            Predicate::YearAtMost(self.max_year),
        ]
    }

    /// Predicates narrowing the main view down to plottable map points.
    pub fn map_predicates(&self) -> Vec<Predicate> {
        vec![
            Predicate::Present(NumericField::Latitude),
            Predicate::Present(NumericField::Longitude),
            Predicate::Present(NumericField::LivesLost),
            Predicate::Present(NumericField::YearLost),
            Predicate::LivesLostWithin(self.casualty_range.0, self.casualty_range.1),
            Predicate::YearWithin(self.year_range.0, self.year_range.1),
        ]
    }
}
