use std::collections::BTreeMap;

use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::data::model::Record;

const ROW_HEIGHT: f32 = 18.0;

const RECORD_COLUMNS: [&str; 7] = [
    "Ship",
    "Vessel type",
    "Year lost",
    "Year built",
    "Lifespan",
    "Lives lost",
    "Cause of loss",
];

fn text(value: Option<&str>) -> String {
    value.unwrap_or("").to_string()
}

fn year(value: Option<f64>) -> String {
    value.map(|v| format!("{v:.0}")).unwrap_or_default()
}

/// Display cells for one record; missing values are blank.
fn record_cells(r: &Record) -> [String; 7] {
    [
        text(r.ship_name.as_deref()),
        text(r.vessel_type.as_deref()),
        year(r.year_lost),
        year(r.year_built),
        year(r.lifespan),
        r.lives_lost.map(|n| n.to_string()).unwrap_or_default(),
        text(r.cause_of_loss.as_deref()),
    ]
}

/// Scrollable table of records. Only visible rows are laid out.
pub fn record_table(ui: &mut Ui, id: &str, records: &[Record], max_height: f32) {
    ui.push_id(id, |ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .max_scroll_height(max_height)
            .columns(Column::auto().at_least(70.0), RECORD_COLUMNS.len())
            .header(20.0, |mut header| {
                for title in RECORD_COLUMNS {
                    header.col(|ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, records.len(), |mut row| {
                    let cells = record_cells(&records[row.index()]);
                    for cell in cells {
                        row.col(|ui| {
                            ui.label(cell);
                        });
                    }
                });
            });
    });
}

/// Two-column table of group → rounded mean.
pub fn pivot_table(
    ui: &mut Ui,
    id: &str,
    group_title: &str,
    value_title: &str,
    rows: &BTreeMap<String, f64>,
) {
    ui.push_id(id, |ui| {
        TableBuilder::new(ui)
            .striped(true)
            .max_scroll_height(300.0)
            .column(Column::auto().at_least(160.0))
            .column(Column::remainder())
            .header(20.0, |mut header| {
                header.col(|ui| {
                    ui.strong(group_title);
                });
                header.col(|ui| {
                    ui.strong(value_title);
                });
            })
            .body(|mut body| {
                for (group, mean) in rows {
                    body.row(ROW_HEIGHT, |mut row| {
                        row.col(|ui| {
                            ui.label(group);
                        });
                        row.col(|ui| {
                            ui.label(format!("{mean:.1}"));
                        });
                    });
                }
            });
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_values_render_blank() {
        let r = Record {
            ship_name: Some("Hesper".into()),
            year_lost: Some(1861.0),
            lives_lost: Some(0),
            ..Default::default()
        };
        assert_eq!(
            record_cells(&r),
            ["Hesper", "", "1861", "", "", "0", ""].map(String::from)
        );
    }
}
