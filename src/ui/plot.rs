use std::collections::BTreeMap;

use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, GridMark, Legend, Line, Plot, PlotPoint, PlotPoints, Points};

use crate::color::{TREND_LINE, WRECK_MARKER, generate_palette};
use crate::data::categorical::CategoryLabel;
use crate::data::report::{MapLayer, MapPoint};

// ---------------------------------------------------------------------------
// Category bar chart (vessel types, causes of loss)
// ---------------------------------------------------------------------------

/// Horizontal bar chart, one bar per category, smallest at the bottom.
pub fn category_bar_chart(ui: &mut Ui, id: &str, counts: &[(CategoryLabel, usize)]) {
    if counts.is_empty() {
        ui.label("No shipwrecks in the current selection.");
        return;
    }

    let palette = generate_palette(counts.len());
    let bars: Vec<Bar> = counts
        .iter()
        .zip(palette)
        .enumerate()
        .map(|(i, ((label, n), color))| {
            Bar::new(i as f64, *n as f64)
                .name(label.to_string())
                .fill(color)
        })
        .collect();

    let labels: Vec<String> = counts.iter().map(|(label, _)| label.to_string()).collect();
    let height = (counts.len() as f32 * 18.0).clamp(120.0, 600.0);

    Plot::new(id)
        .height(height)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .x_axis_label("Shipwrecks")
        .y_axis_formatter(move |mark: GridMark, _range| category_tick(&labels, mark.value))
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).horizontal().width(0.7));
        });
}

/// Axis label for a bar position; blank between bars.
fn category_tick(labels: &[String], value: f64) -> String {
    if value < 0.0 || value.fract() != 0.0 {
        return String::new();
    }
    labels.get(value as usize).cloned().unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Lifespan trend (line chart)
// ---------------------------------------------------------------------------

/// Average lifespan per decade.
pub fn decade_line_chart(ui: &mut Ui, means: &BTreeMap<i64, f64>) {
    if means.is_empty() {
        ui.label("No wrecks with both a build year and a loss year in the current selection.");
        return;
    }

    let points: PlotPoints = means
        .iter()
        .map(|(&decade, &mean)| [decade as f64, mean])
        .collect();
    let markers: PlotPoints = means
        .iter()
        .map(|(&decade, &mean)| [decade as f64, mean])
        .collect();

    Plot::new("lifespan_by_decade")
        .height(260.0)
        .legend(Legend::default())
        .x_axis_label("Decade")
        .y_axis_label("Average lifespan (years)")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.line(Line::new(points).name("Average lifespan").color(TREND_LINE).width(2.0));
            plot_ui.points(Points::new(markers).color(TREND_LINE).radius(3.0));
        });
}

// ---------------------------------------------------------------------------
// Wreck locations (longitude / latitude scatter)
// ---------------------------------------------------------------------------

/// Scatter of wreck positions; hovering shows the nearest wreck.
pub fn wreck_map(ui: &mut Ui, layer: &MapLayer) {
    let points: PlotPoints = layer
        .points
        .iter()
        .map(|p| [p.longitude, p.latitude])
        .collect();
    let hover_points = layer.points.clone();

    Plot::new("wreck_map")
        .height(420.0)
        .data_aspect(1.0)
        .x_axis_label("Longitude")
        .y_axis_label("Latitude")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .label_formatter(move |_name, pos: &PlotPoint| {
            nearest(&hover_points, pos)
                .map(MapPoint::tooltip)
                .unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            plot_ui.points(
                Points::new(points)
                    .name("Shipwrecks")
                    .color(WRECK_MARKER)
                    .filled(true)
                    .radius(3.5),
            );
        });
}

fn nearest<'a>(points: &'a [MapPoint], pos: &PlotPoint) -> Option<&'a MapPoint> {
    let dist = |p: &MapPoint| (p.longitude - pos.x).powi(2) + (p.latitude - pos.y).powi(2);
    points.iter().min_by(|a, b| dist(a).total_cmp(&dist(b)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(name: &str, lat: f64, lon: f64) -> MapPoint {
        MapPoint {
            ship_name: Some(name.to_string()),
            latitude: lat,
            longitude: lon,
            year_lost: 1850.0,
            lives_lost: 0,
        }
    }

    #[test]
    fn ticks_only_label_whole_positions() {
        let labels = vec!["Bark".to_string(), "Other".to_string()];
        assert_eq!(category_tick(&labels, 0.0), "Bark");
        assert_eq!(category_tick(&labels, 1.0), "Other");
        assert_eq!(category_tick(&labels, 0.5), "");
        assert_eq!(category_tick(&labels, 2.0), "");
        assert_eq!(category_tick(&labels, -1.0), "");
    }

    #[test]
    fn hover_picks_closest_wreck() {
        let points = vec![point("Hesper", 42.0, -70.0), point("Alva", 10.0, 10.0)];
        let hit = nearest(&points, &PlotPoint::new(9.0, 11.0)).unwrap();
        assert_eq!(hit.ship_name.as_deref(), Some("Alva"));
        assert!(nearest(&[], &PlotPoint::new(0.0, 0.0)).is_none());
    }
}
