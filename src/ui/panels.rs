use eframe::egui::{self, Color32, RichText, ScrollArea, Slider, Ui};

use crate::data::extremum::Extreme;
use crate::state::AppState;
use crate::ui::{plot, tables};

// ---------------------------------------------------------------------------
// Left side panel – vessel selector and year ceiling
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Shipwreck Modifier");
    ui.separator();

    let Some(dataset) = &state.dataset else {
        ui.label("No dataset loaded.");
        return;
    };
    let years = dataset.bounds.years;
    let options = state.vessel_options();
    let mut params = state.params.clone();

    ui.strong("Select Vessel Type:");
    egui::ComboBox::from_id_salt("vessel_type")
        .selected_text(params.selected_vessel_type.label())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for option in options {
                let label = option.label().to_string();
                ui.selectable_value(&mut params.selected_vessel_type, option, label);
            }
        });
    ui.add_space(8.0);

    ui.strong("Select Maximum Year Lost:");
    match years {
        Some((min, max)) => {
            ui.add(Slider::new(&mut params.max_year, min..=max));
        }
        None => {
            ui.label("No wrecks have a year lost.");
        }
    }
    ui.add_space(8.0);

    ui.label("Use the controls above to filter the shipwreck dataset as you go.");

    state.set_params(params);
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let (Some(ds), Some(report)) = (&state.dataset, &state.report) {
            ui.label(format!(
                "{} shipwrecks loaded, {} selected",
                ds.len(),
                report.filtered.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Central panel – every report section
// ---------------------------------------------------------------------------

/// Render the report for the current selection.
pub fn report_panel(ui: &mut Ui, state: &mut AppState) {
    let (Some(dataset), Some(report)) = (&state.dataset, &state.report) else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a shipwreck dataset to begin  (File → Open…)");
        });
        return;
    };
    let bounds = dataset.bounds;
    let mut params = state.params.clone();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("Shipwreck Data Set Information");
            ui.label(
                "This app visualizes shipwrecks' data to help users explore different info trends.",
            );

            ui.add_space(12.0);
            ui.heading("Shipwrecks by Vessel Type");
            plot::category_bar_chart(ui, "vessel_types", &report.vessel_types);

            ui.add_space(12.0);
            ui.heading("Date of Oldest Wreck in Data");
            ui.label(format!(
                "The year of the oldest wreck in the selected group is: {}",
                report.oldest_selected.year
            ));
            if !report.oldest_selected.wrecks.is_empty() {
                tables::record_table(ui, "oldest_selected", &report.oldest_selected.wrecks, 160.0);
            }
            ui.label(format!(
                "Across the whole dataset the oldest wreck was lost in: {}",
                report.oldest_overall.year
            ));

            ui.add_space(12.0);
            ui.heading("Average Lifespan of Shipwrecks Over Time");
            ui.label(
                "Here is the average lifespan of the ships (before becoming wrecks) over time.",
            );
            plot::decade_line_chart(ui, &report.lifespan_by_decade);

            ui.add_space(12.0);
            ui.heading("Shipwreck Locations Map");
            ui.strong("Filter Map by Casualty Count & Year Range");
            if let Some(casualties) = bounds.casualties {
                range_sliders(
                    ui,
                    "Select casualty range to display on map:",
                    &mut params.casualty_range,
                    casualties,
                );
            }
            if let Some(years) = bounds.years {
                range_sliders(ui, "Select year range:", &mut params.year_range, years);
            }
            if report.map.is_empty() {
                ui.colored_label(
                    Color32::from_rgb(200, 140, 0),
                    "No shipwrecks match the filters. Try adjusting the casualty or year range.",
                );
            } else {
                if let Some((lat, lon)) = report.map.center {
                    ui.label(format!(
                        "{} wrecks, centred on {lat:.2}°, {lon:.2}°",
                        report.map.points.len()
                    ));
                }
                plot::wreck_map(ui, &report.map);
            }

            ui.add_space(12.0);
            ui.heading("Pivot Table Vessel / Casualties Summary");
            if report.casualties_by_type.is_empty() {
                ui.label("No casualty data in the current selection.");
            } else {
                tables::pivot_table(
                    ui,
                    "casualties_by_type",
                    "Vessel type",
                    "Average lives lost",
                    &report.casualties_by_type,
                );
            }

            ui.add_space(12.0);
            ui.heading("Max Casualties");
            ui.label(
                "This is the maximum number of casualties in one shipwreck for this group of data.",
            );
            match report.max_casualties.value() {
                Some(max) => ui.strong(format!("{max:.0}")),
                None => ui.label(Extreme::NoData.to_string()),
            };

            ui.add_space(12.0);
            ui.heading("Shipwrecks by Cause of Loss");
            plot::category_bar_chart(ui, "causes", &report.causes);

            ui.add_space(12.0);
            egui::CollapsingHeader::new(format!("Selected shipwrecks ({})", report.filtered.len()))
                .default_open(false)
                .show(ui, |ui: &mut Ui| {
                    tables::record_table(ui, "filtered", &report.filtered, 400.0);
                });
        });

    state.set_params(params);
}

/// A pair of sliders editing an inclusive `(lo, hi)` range.
fn range_sliders(ui: &mut Ui, label: &str, range: &mut (i64, i64), bounds: (i64, i64)) {
    ui.label(label);
    ui.horizontal(|ui: &mut Ui| {
        ui.add(Slider::new(&mut range.0, bounds.0..=bounds.1).text("from"));
        ui.add(Slider::new(&mut range.1, bounds.0..=bounds.1).text("to"));
    });
    if range.0 > range.1 {
        range.1 = range.0;
    }
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open shipwreck data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}
