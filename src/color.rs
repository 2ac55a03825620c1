use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::LossTable;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    let mut colors = Vec::with_capacity(n);
    for i in 0..n {
        let hue = (i as f32 / n.max(1) as f32) * 360.0;
        let rgb: Srgb = Hsl::new(hue, 0.75, 0.55).into_color();
        colors.push(Color32::from_rgb(
            (rgb.red * 255.0) as u8,
            (rgb.green * 255.0) as u8,
            (rgb.blue * 255.0) as u8,
        ));
    }
    colors
}

// ---------------------------------------------------------------------------
// Color mapping: series name → Color32
// ---------------------------------------------------------------------------

/// Assigns each series of a table a stable colour, in table order.
#[derive(Debug, Clone, Default)]
pub struct SeriesColors {
    mapping: BTreeMap<String, Color32>,
}

impl SeriesColors {
    pub fn new(table: &LossTable) -> Self {
        let palette = generate_palette(table.len());
        let mapping = table
            .names()
            .zip(palette)
            .map(|(name, color)| (name.to_string(), color))
            .collect();
        SeriesColors { mapping }
    }

    /// Look up the colour for a series; unknown names fall back to grey.
    pub fn color_for(&self, name: &str) -> Color32 {
        self.mapping.get(name).copied().unwrap_or(Color32::GRAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size() {
        assert!(generate_palette(0).is_empty());
        assert_eq!(generate_palette(5).len(), 5);
    }

    #[test]
    fn small_palettes_are_distinct() {
        let palette = generate_palette(4);
        for (i, a) in palette.iter().enumerate() {
            for b in &palette[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn series_keep_their_colour() {
        let table = LossTable::from_columns(vec![
            ("train".to_string(), vec![1.0]),
            ("val".to_string(), vec![2.0]),
        ]);
        let colors = SeriesColors::new(&table);
        assert_ne!(colors.color_for("train"), colors.color_for("val"));
        assert_eq!(colors.color_for("unknown"), Color32::GRAY);
    }
}
