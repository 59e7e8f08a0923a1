use std::collections::BTreeMap;

use palette::{Hsl, IntoColor, Srgb};
use serde::Serialize;

use crate::data::model::Dataset;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// A plain sRGB color handed to the chart layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// CSS hex form, e.g. `#1fa05c`.
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Rgb> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Rgb {
                r: (rgb.red * 255.0) as u8,
                g: (rgb.green * 255.0) as u8,
                b: (rgb.blue * 255.0) as u8,
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: location → Rgb
// ---------------------------------------------------------------------------

/// Maps each sampling location of a dataset to a distinct, stable colour so
/// that multi-location comparison traces keep their colour across queries.
#[derive(Debug, Clone)]
pub struct LocationColors {
    mapping: BTreeMap<String, Rgb>,
    default_color: Rgb,
}

impl LocationColors {
    /// Build a colour map over the dataset's location vocabulary.
    pub fn new(dataset: &Dataset) -> Self {
        let palette = generate_palette(dataset.locations.len());
        let mapping: BTreeMap<String, Rgb> = dataset
            .locations
            .iter()
            .zip(palette)
            .map(|(loc, c)| (loc.clone(), c))
            .collect();

        LocationColors {
            mapping,
            default_color: Rgb {
                r: 0x80,
                g: 0x80,
                b: 0x80,
            },
        }
    }

    /// Look up the colour for a location.
    pub fn color_for(&self, location: &str) -> Rgb {
        self.mapping
            .get(location)
            .copied()
            .unwrap_or(self.default_color)
    }

    /// Legend entries (location label → colour) for the chart layer.
    pub fn legend_entries(&self) -> Vec<(String, Rgb)> {
        self.mapping
            .iter()
            .map(|(loc, c)| (loc.clone(), *c))
            .collect()
    }
}
