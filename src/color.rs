use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Fill colour of wreck markers on the map (200, 30, 0 at ~63% alpha).
pub const WRECK_MARKER: Color32 = Color32::from_rgba_premultiplied(125, 19, 0, 160);

/// Line colour of the lifespan trend.
pub const TREND_LINE: Color32 = Color32::from_rgb(70, 130, 180);

/// Generates `n` visually distinct colours using evenly spaced hues.
/// Used to tell category bars apart.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}
