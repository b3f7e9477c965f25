use serde::{Serialize, Serializer};
use std::fmt;

pub const SERIES_PALETTE: [&str; 5] = ["#2c3e50", "#667eea", "#f39c12", "#e74c3c", "#3498db"];

const FALLBACK_SATURATION: u8 = 70;
const FALLBACK_LIGHTNESS: u8 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesColor {
    Palette(&'static str),
    Hsl {
        hue: u16,
        saturation: u8,
        lightness: u8,
    },
}

impl fmt::Display for SeriesColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeriesColor::Palette(hex) => f.write_str(hex),
            SeriesColor::Hsl {
                hue,
                saturation,
                lightness,
            } => write!(f, "hsl({hue}, {saturation}%, {lightness}%)"),
        }
    }
}

impl Serialize for SeriesColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Stable color for the `index`-th series. Past the curated palette, hues
/// rotate in 60 degree steps, so colors repeat every six indices.
pub fn color_for_series_index(index: usize) -> SeriesColor {
    match SERIES_PALETTE.get(index) {
        Some(hex) => SeriesColor::Palette(hex),
        None => SeriesColor::Hsl {
            // (index * 60) mod 360 without overflowing on large indices
            hue: ((index % 6) * 60) as u16,
            saturation: FALLBACK_SATURATION,
            lightness: FALLBACK_LIGHTNESS,
        },
    }
}
