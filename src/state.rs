use std::path::Path;

use crate::cli::ViewerConfig;
use crate::data::filter::{FilterParams, VesselSelection};
use crate::data::loader::load_file;
use crate::data::model::ShipwreckDataset;
use crate::data::report::Report;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Viewer settings from the command line.
    pub config: ViewerConfig,

    /// Loaded dataset (None until a file loads successfully).
    pub dataset: Option<ShipwreckDataset>,

    /// Current selector and slider values.
    pub params: FilterParams,

    /// Outputs for `params`, recomputed whenever they change.
    pub report: Option<Report>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether a file loading operation is in progress.
    pub loading: bool,
}

impl AppState {
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Load a dataset from disk, reporting failure in the status bar.
    pub fn load_path(&mut self, path: &Path) {
        self.loading = true;
        match load_file(path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} shipwrecks ({} vessel types) from {}",
                    dataset.len(),
                    dataset.vessel_types.len(),
                    path.display()
                );
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load {}: {e:#}", path.display());
                self.status_message = Some(format!("Error: {e:#}"));
                self.loading = false;
            }
        }
    }

    /// Ingest a newly loaded dataset, reset the controls and recompute.
    pub fn set_dataset(&mut self, dataset: ShipwreckDataset) {
        self.params = FilterParams::defaults(&dataset.bounds);
        self.status_message = if dataset.is_empty() {
            log::warn!("Dataset contains no shipwrecks");
            Some("The file contains no shipwrecks.".to_string())
        } else {
            None
        };
        self.dataset = Some(dataset);
        self.loading = false;
        self.recompute();
    }

    /// Apply new control values; the report is only rebuilt on change.
    pub fn set_params(&mut self, params: FilterParams) {
        if params != self.params {
            self.params = params;
            self.recompute();
        }
    }

    /// Rebuild the report from scratch for the current parameters.
    pub fn recompute(&mut self) {
        self.report = self
            .dataset
            .as_ref()
            .map(|ds| Report::compute(ds, &self.params, self.config.top_n));
    }

    /// Selector entries: the "All" sentinel followed by every vessel type.
    pub fn vessel_options(&self) -> Vec<VesselSelection> {
        let mut options = vec![VesselSelection::All];
        if let Some(ds) = &self.dataset {
            options.extend(ds.vessel_types.iter().cloned().map(VesselSelection::Only));
        }
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Record;

    fn dataset() -> ShipwreckDataset {
        ShipwreckDataset::from_records(vec![
            Record {
                vessel_type: Some("Steamer".into()),
                year_lost: Some(1861.0),
                lives_lost: Some(4),
                ..Default::default()
            },
            Record {
                vessel_type: Some("Bark".into()),
                year_lost: Some(1890.0),
                lives_lost: Some(9),
                ..Default::default()
            },
        ])
    }

    #[test]
    fn new_dataset_resets_params_and_builds_report() {
        let mut state = AppState::default();
        state.set_dataset(dataset());
        assert_eq!(state.params.max_year, 1890);
        assert_eq!(state.params.casualty_range, (4, 9));
        assert_eq!(state.report.as_ref().map(|r| r.filtered.len()), Some(2));
    }

    #[test]
    fn changing_params_recomputes_report() {
        let mut state = AppState::default();
        state.set_dataset(dataset());
        let params = FilterParams {
            selected_vessel_type: VesselSelection::from_label("Bark"),
            ..state.params.clone()
        };
        state.set_params(params);
        let report = state.report.as_ref().unwrap();
        assert_eq!(report.filtered.len(), 1);
        assert_eq!(report.filtered[0].vessel_type.as_deref(), Some("Bark"));
    }

    #[test]
    fn vessel_options_start_with_all() {
        let mut state = AppState::default();
        assert_eq!(state.vessel_options(), vec![VesselSelection::All]);
        state.set_dataset(dataset());
        let labels: Vec<String> = state
            .vessel_options()
            .iter()
            .map(|o| o.label().to_string())
            .collect();
        assert_eq!(labels, vec!["All", "Bark", "Steamer"]);
    }

    #[test]
    fn empty_dataset_is_reported_in_status() {
        let mut state = AppState::default();
        state.set_dataset(ShipwreckDataset::from_records(Vec::new()));
        assert_eq!(
            state.status_message.as_deref(),
            Some("The file contains no shipwrecks.")
        );
        assert_eq!(state.report.as_ref().map(|r| r.filtered.len()), Some(0));

        state.set_dataset(dataset());
        assert!(state.status_message.is_none());
    }

    #[test]
    fn failed_load_keeps_viewer_usable() {
        let mut state = AppState::default();
        state.load_path(Path::new("/nonexistent/wrecks.csv"));
        assert!(state.dataset.is_none());
        assert!(state.report.is_none());
        assert!(!state.loading);
        assert!(state.status_message.as_deref().unwrap().starts_with("Error:"));
    }
}
