use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::chart::ChartStyle;

// ---------------------------------------------------------------------------
// Categorical palettes
// ---------------------------------------------------------------------------

/// Default plot cycle.
pub const DEFAULT_PALETTE: [Color32; 10] = [
    Color32::from_rgb(0x1F, 0x77, 0xB4),
    Color32::from_rgb(0xFF, 0x7F, 0x0E),
    Color32::from_rgb(0x2C, 0xA0, 0x2C),
    Color32::from_rgb(0xD6, 0x27, 0x28),
    Color32::from_rgb(0x94, 0x67, 0xBD),
    Color32::from_rgb(0x8C, 0x56, 0x4B),
    Color32::from_rgb(0xE3, 0x77, 0xC2),
    Color32::from_rgb(0x7F, 0x7F, 0x7F),
    Color32::from_rgb(0xBC, 0xBD, 0x22),
    Color32::from_rgb(0x17, 0xBE, 0xCF),
];

/// Muted cycle used by the alternate stylesheet.
pub const ALTERNATE_PALETTE: [Color32; 10] = [
    Color32::from_rgb(0x4C, 0x72, 0xB0),
    Color32::from_rgb(0xDD, 0x84, 0x52),
    Color32::from_rgb(0x55, 0xA8, 0x68),
    Color32::from_rgb(0xC4, 0x4E, 0x52),
    Color32::from_rgb(0x81, 0x72, 0xB3),
    Color32::from_rgb(0x93, 0x78, 0x60),
    Color32::from_rgb(0xDA, 0x8B, 0xC3),
    Color32::from_rgb(0x8C, 0x8C, 0x8C),
    Color32::from_rgb(0xCC, 0xB9, 0x74),
    Color32::from_rgb(0x64, 0xB5, 0xCD),
];

/// Cycle for the given plot style.
pub const fn style_palette(style: ChartStyle) -> &'static [Color32; 10] {
    match style {
        ChartStyle::Default => &DEFAULT_PALETTE,
        ChartStyle::Alternate => &ALTERNATE_PALETTE,
    }
}

/// Generates `n` visually distinct colours using evenly spaced hues, for
/// groupings with more values than the fixed cycles cover.
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
// Color mapping: group label → Color32
// ---------------------------------------------------------------------------

/// Maps group labels (continents, countries) to distinct colours. Falls
/// back to hue-spaced colours when the style cycle is too short.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    /// Build a colour map for the given labels in their given order.
    pub fn new<'a>(labels: impl IntoIterator<Item = &'a str>, style: ChartStyle) -> Self {
        let labels: Vec<&str> = labels.into_iter().collect();
        let cycle = style_palette(style);
        let colors: Vec<Color32> = if labels.len() <= cycle.len() {
            cycle[..labels.len()].to_vec()
        } else {
            generate_palette(labels.len())
        };

        let mapping: BTreeMap<String, Color32> = labels
            .into_iter()
            .zip(colors)
            .map(|(label, color): (&str, Color32)| (label.to_string(), color))
            .collect();

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a group label.
    pub fn color_for(&self, label: &str) -> Color32 {
        self.mapping
            .get(label)
            .copied()
            .unwrap_or(self.default_color)
    }
}

// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_get_distinct_cycle_colors_in_order() {
        let map = ColorMap::new(["Asia", "Europe", "Africa"], ChartStyle::Default);
        assert_eq!(map.color_for("Asia"), DEFAULT_PALETTE[0]);
        assert_eq!(map.color_for("Europe"), DEFAULT_PALETTE[1]);
        assert_eq!(map.color_for("Africa"), DEFAULT_PALETTE[2]);
        assert_eq!(map.color_for("Atlantis"), Color32::GRAY);
    }

    #[test]
    fn oversized_groupings_fall_back_to_generated_hues() {
        let labels: Vec<String> = (0..24).map(|i| format!("country-{i}")).collect();
        let map = ColorMap::new(labels.iter().map(String::as_str), ChartStyle::Default);
        let colors: Vec<Color32> = labels.iter().map(|l| map.color_for(l)).collect();
        let mut unique = colors.clone();
        unique.sort_by_key(|c| (c.r(), c.g(), c.b()));
        unique.dedup();
        assert_eq!(unique.len(), colors.len());
    }

    #[test]
    fn generate_palette_size() {
        assert!(generate_palette(0).is_empty());
        assert_eq!(generate_palette(7).len(), 7);
    }
}
