use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
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

// ---------------------------------------------------------------------------
// Sub-category → colour
// ---------------------------------------------------------------------------

/// Stable colours for the sub-categories of one category.
///
/// Built from the full option list, so a sub-category keeps its colour while
/// the user toggles others on and off.
#[derive(Debug, Clone, Default)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
}

impl ColorMap {
    pub fn new(options: &[String]) -> Self {
        let mapping = options
            .iter()
            .cloned()
            .zip(generate_palette(options.len()))
            .collect();
        ColorMap { mapping }
    }

    pub fn color_for(&self, sub_category: &str) -> Color32 {
        self.mapping
            .get(sub_category)
            .copied()
            .unwrap_or(Color32::GRAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size_and_distinct_colours() {
        let colours = generate_palette(6);
        assert_eq!(colours.len(), 6);
        for (i, a) in colours.iter().enumerate() {
            for b in &colours[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn unknown_sub_category_is_gray() {
        let map = ColorMap::new(&["Chairs".to_string(), "Tables".to_string()]);
        assert_ne!(map.color_for("Chairs"), map.color_for("Tables"));
        assert_eq!(map.color_for("Lamps"), Color32::GRAY);
    }
}
