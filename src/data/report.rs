use std::collections::BTreeMap;

use serde::Serialize;

use super::categorical::{CategoryLabel, categorical_summary};
use super::decade::decade_means;
use super::extremum::{Direction, Extreme, Extremum, extremum};
use super::filter::{FilterParams, RecordView, RowOrder};
use super::model::{CategoryField, NumericField, Record, ShipwreckDataset};
use super::pivot::pivot_mean;
use super::stats::Mean;

// ---------------------------------------------------------------------------
// Output artifacts
// ---------------------------------------------------------------------------

/// Year of the oldest wreck and every wreck lost that year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OldestWrecks {
    pub year: Extreme,
    pub wrecks: Vec<Record>,
}

impl From<Extremum<'_>> for OldestWrecks {
    fn from(ext: Extremum<'_>) -> Self {
        OldestWrecks {
            year: ext.value,
            wrecks: ext.matches.into_iter().cloned().collect(),
        }
    }
}

/// A wreck with everything needed to place and label it on the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapPoint {
    pub ship_name: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub year_lost: f64,
    pub lives_lost: u64,
}

impl MapPoint {
    fn from_record(r: &Record) -> Option<Self> {
        Some(MapPoint {
            ship_name: r.ship_name.clone(),
            latitude: r.latitude?,
            longitude: r.longitude?,
            year_lost: r.year_lost?,
            lives_lost: r.lives_lost?,
        })
    }

    /// Hover text, e.g. `Hesper | Year Lost: 1861 | Lives Lost: 3`.
    pub fn tooltip(&self) -> String {
        format!(
            "{} | Year Lost: {:.0} | Lives Lost: {}",
            self.ship_name.as_deref().unwrap_or("Unnamed"),
            self.year_lost,
            self.lives_lost
        )
    }
}

/// Plottable wrecks plus the point the map view is centred on.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MapLayer {
    pub points: Vec<MapPoint>,
    /// Mean `(latitude, longitude)`; `None` when there are no points.
    pub center: Option<(f64, f64)>,
}

impl MapLayer {
    fn from_view(view: &RecordView<'_>) -> Self {
        let points: Vec<MapPoint> = view.iter().filter_map(MapPoint::from_record).collect();
        let mut lat = Mean::default();
        let mut lon = Mean::default();
        for p in &points {
            lat.add(p.latitude);
            lon.add(p.longitude);
        }
        let center = lat.result().zip(lon.result());
        MapLayer { points, center }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Report – every artifact for one parameter set
// ---------------------------------------------------------------------------

/// All computed outputs for one set of filter parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// The main filtered view, ascending by year lost.
    pub filtered: Vec<Record>,
    pub vessel_types: Vec<(CategoryLabel, usize)>,
    pub oldest_selected: OldestWrecks,
    pub oldest_overall: OldestWrecks,
    pub lifespan_by_decade: BTreeMap<i64, f64>,
    pub map: MapLayer,
    pub casualties_by_type: BTreeMap<String, f64>,
    pub max_casualties: Extreme,
    pub causes: Vec<(CategoryLabel, usize)>,
}

impl Report {
    /// Run the whole pipeline. Pure: identical inputs give identical reports.
    pub fn compute(dataset: &ShipwreckDataset, params: &FilterParams, cap: usize) -> Self {
        let all = RecordView::all(&dataset.records);
        let main = all.refine(&params.selection_predicates(), RowOrder::Display);
        let map_view = main.refine(&params.map_predicates(), RowOrder::Input);

        log::debug!(
            "report: {} of {} records selected, {} on map",
            main.len(),
            dataset.len(),
            map_view.len()
        );

        Report {
            filtered: main.to_records(),
            vessel_types: categorical_summary(&main, CategoryField::VesselType, cap),
            oldest_selected: extremum(&main, NumericField::YearLost, Direction::Min).into(),
            oldest_overall: extremum(&all, NumericField::YearLost, Direction::Min).into(),
            lifespan_by_decade: decade_means(&main, NumericField::YearLost, NumericField::Lifespan),
            map: MapLayer::from_view(&map_view),
            casualties_by_type: pivot_mean(
                &main,
                CategoryField::VesselType,
                NumericField::LivesLost,
            ),
            max_casualties: extremum(&main, NumericField::LivesLost, Direction::Max).value,
            causes: categorical_summary(&main, CategoryField::CauseOfLoss, cap),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::categorical::DEFAULT_CATEGORY_CAP;
    use crate::data::filter::VesselSelection;
    use crate::data::model::{RawRecord, RawValue};
    use pretty_assertions::assert_eq;

    fn raw(
        name: &str,
        kind: &str,
        year: &str,
        built: &str,
        lives: &str,
        cause: &str,
        coords: Option<(f64, f64)>,
    ) -> RawRecord {
        let (lat, lon) = match coords {
            Some((lat, lon)) => (RawValue::Float(lat), RawValue::Float(lon)),
            None => (RawValue::Null, RawValue::Null),
        };
        RawRecord {
            vessel_type: kind.into(),
            year_lost: year.into(),
            year_built: built.into(),
            latitude: lat,
            longitude: lon,
            lives_lost: lives.into(),
            cause_of_loss: cause.into(),
            ship_name: name.into(),
        }
    }

    fn dataset() -> ShipwreckDataset {
        ShipwreckDataset::from_raw(&[
            raw("Hesper", "Steamer", "1861", "1850", "10", "Fire", Some((42.0, -70.0))),
            raw("Alva", "Schooner", "1799", "1790", "", "", None),
            raw("Gazelle", "Steamer", "1875", "", "20", "Storm", Some((44.0, -68.0))),
            raw("Kate", "Bark", "", "1800", "4", "Storm", Some((40.0, -72.0))),
            raw("Mystic", "Steamer", "1799", "1780", "0", "Fire", None),
        ])
    }

    fn names(records: &[Record]) -> Vec<&str> {
        records.iter().filter_map(|r| r.ship_name.as_deref()).collect()
    }

    #[test]
    fn default_parameters_cover_every_dated_wreck() {
        let ds = dataset();
        let params = FilterParams::defaults(&ds.bounds);
        let report = Report::compute(&ds, &params, DEFAULT_CATEGORY_CAP);

        // Kate has no year so the year ceiling excludes her.
        assert_eq!(names(&report.filtered), vec!["Alva", "Mystic", "Hesper", "Gazelle"]);
        assert_eq!(report.oldest_selected.year, Extreme::Value(1799.0));
        assert_eq!(names(&report.oldest_selected.wrecks), vec!["Alva", "Mystic"]);
        assert_eq!(report.oldest_overall, report.oldest_selected);
        assert_eq!(
            report.lifespan_by_decade,
            BTreeMap::from([(1790, 14.0), (1860, 11.0)])
        );
        assert_eq!(report.max_casualties, Extreme::Value(20.0));
        assert_eq!(
            report.causes,
            vec![
                (CategoryLabel::Unknown, 1),
                (CategoryLabel::Value("Storm".into()), 1),
                (CategoryLabel::Value("Fire".into()), 2),
            ]
        );
        assert_eq!(
            report.vessel_types,
            vec![
                (CategoryLabel::Value("Schooner".into()), 1),
                (CategoryLabel::Value("Steamer".into()), 3),
            ]
        );
        assert_eq!(
            report.casualties_by_type,
            BTreeMap::from([("Steamer".to_string(), 10.0)])
        );
    }

    #[test]
    fn map_layer_uses_casualty_and_year_ranges() {
        let ds = dataset();
        let params = FilterParams {
            casualty_range: (5, 15),
            ..FilterParams::defaults(&ds.bounds)
        };
        let report = Report::compute(&ds, &params, DEFAULT_CATEGORY_CAP);
        assert_eq!(report.map.points.len(), 1);
        assert_eq!(report.map.points[0].tooltip(), "Hesper | Year Lost: 1861 | Lives Lost: 10");
        assert_eq!(report.map.center, Some((42.0, -70.0)));

        let params = FilterParams {
            year_range: (1900, 1950),
            ..params
        };
        let report = Report::compute(&ds, &params, DEFAULT_CATEGORY_CAP);
        assert!(report.map.is_empty());
        assert_eq!(report.map.center, None);
    }

    #[test]
    fn selection_narrows_everything_but_the_global_oldest() {
        let ds = dataset();
        let params = FilterParams {
            selected_vessel_type: VesselSelection::from_label("Steamer"),
            max_year: 1870,
            ..FilterParams::defaults(&ds.bounds)
        };
        let report = Report::compute(&ds, &params, DEFAULT_CATEGORY_CAP);
        assert_eq!(names(&report.filtered), vec!["Mystic", "Hesper"]);
        assert_eq!(names(&report.oldest_selected.wrecks), vec!["Mystic"]);
        assert_eq!(names(&report.oldest_overall.wrecks), vec!["Alva", "Mystic"]);
        assert_eq!(report.max_casualties, Extreme::Value(10.0));
        assert_eq!(
            report.casualties_by_type,
            BTreeMap::from([("Steamer".to_string(), 5.0)])
        );
    }

    #[test]
    fn empty_selection_yields_empty_artifacts() {
        let ds = dataset();
        let params = FilterParams {
            selected_vessel_type: VesselSelection::from_label("Junk"),
            ..FilterParams::defaults(&ds.bounds)
        };
        let report = Report::compute(&ds, &params, DEFAULT_CATEGORY_CAP);
        assert!(report.filtered.is_empty());
        assert!(report.vessel_types.is_empty());
        assert!(report.causes.is_empty());
        assert!(report.lifespan_by_decade.is_empty());
        assert!(report.casualties_by_type.is_empty());
        assert!(report.map.is_empty());
        assert_eq!(report.oldest_selected.year, Extreme::NoData);
        assert_eq!(report.max_casualties, Extreme::NoData);
        assert_eq!(report.oldest_overall.year, Extreme::Value(1799.0));
    }

    #[test]
    fn recomputing_is_idempotent() {
        let ds = dataset();
        let params = FilterParams::defaults(&ds.bounds);
        let a = Report::compute(&ds, &params, 1);
        let b = Report::compute(&ds, &params, 1);
        assert_eq!(a, b);
        assert_eq!(
            a.vessel_types,
            vec![(CategoryLabel::Other, 1), (CategoryLabel::Value("Steamer".into()), 3)]
        );
    }

    #[test]
    fn report_serializes_to_json() {
        let ds = dataset();
        let params = FilterParams::defaults(&ds.bounds);
        let report = Report::compute(&ds, &params, DEFAULT_CATEGORY_CAP);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["max_casualties"]["Value"], 20.0);
        assert_eq!(json["lifespan_by_decade"]["1860"], 11.0);
    }
}
