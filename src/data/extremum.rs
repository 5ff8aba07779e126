use std::fmt;

use serde::Serialize;

use super::model::{NumericField, Record};

/// Which end of the range to look for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Min,
    Max,
}

/// The extremal value of a field, or the marker that no record had it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Extreme {
    Value(f64),
    NoData,
}

impl Extreme {
    pub fn value(self) -> Option<f64> {
        match self {
            Extreme::Value(v) => Some(v),
            Extreme::NoData => None,
        }
    }
}

impl fmt::Display for Extreme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Extreme::Value(v) => write!(f, "{v:.0}"),
            Extreme::NoData => write!(f, "No data available"),
        }
    }
}

/// Records holding the extremal value, in input order.
#[derive(Debug, Clone)]
pub struct Extremum<'a> {
    pub matches: Vec<&'a Record>,
    pub value: Extreme,
}

/// Find the min or max of `field`, returning every record that ties for it.
pub fn extremum<'a, I>(records: I, field: NumericField, direction: Direction) -> Extremum<'a>
where
    I: IntoIterator<Item = &'a Record>,
{
    let present: Vec<(&'a Record, f64)> = records
        .into_iter()
        .filter_map(|r| field.get(r).map(|v| (r, v)))
        .collect();

    let best = present.iter().map(|&(_, v)| v).reduce(|acc, v| match direction {
        Direction::Min => acc.min(v),
        Direction::Max => acc.max(v),
    });

    match best {
        Some(best) => Extremum {
            matches: present
                .into_iter()
                .filter(|&(_, v)| v == best)
                .map(|(r, _)| r)
                .collect(),
            value: Extreme::Value(best),
        },
        None => Extremum {
            matches: Vec::new(),
            value: Extreme::NoData,
        },
    }
}
