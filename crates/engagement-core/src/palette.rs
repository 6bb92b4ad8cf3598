//! Sequential color palettes for heatmap cells.
//!
//! Each palette is a list of evenly spaced sRGB stops; values in between are
//! linearly interpolated per channel.

use std::fmt;
use std::str::FromStr;

use plotters::style::RGBColor;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

// ColorBrewer YlGnBu, 9 classes
const YL_GN_BU: &[(u8, u8, u8)] = &[
    (0xff, 0xff, 0xd9),
    (0xed, 0xf8, 0xb1),
    (0xc7, 0xe9, 0xb4),
    (0x7f, 0xcd, 0xbb),
    (0x41, 0xb6, 0xc4),
    (0x1d, 0x91, 0xc0),
    (0x22, 0x5e, 0xa8),
    (0x25, 0x34, 0x94),
    (0x08, 0x1d, 0x58),
];

// ColorBrewer Blues, 9 classes
const BLUES: &[(u8, u8, u8)] = &[
    (0xf7, 0xfb, 0xff),
    (0xde, 0xeb, 0xf7),
    (0xc6, 0xdb, 0xef),
    (0x9e, 0xca, 0xe1),
    (0x6b, 0xae, 0xd6),
    (0x42, 0x92, 0xc6),
    (0x21, 0x71, 0xb5),
    (0x08, 0x51, 0x9c),
    (0x08, 0x30, 0x6b),
];

const VIRIDIS: &[(u8, u8, u8)] = &[
    (0x44, 0x01, 0x54),
    (0x3b, 0x52, 0x8b),
    (0x21, 0x91, 0x8c),
    (0x5e, 0xc9, 0x62),
    (0xfd, 0xe7, 0x25),
];

/// Named heatmap palette.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Palette {
    /// Yellow-green-blue
    #[default]
    YlGnBu,
    Blues,
    Viridis,
}

impl Palette {
    pub const ALL: [Palette; 3] = [Palette::YlGnBu, Palette::Blues, Palette::Viridis];

    pub fn name(&self) -> &'static str {
        match self {
            Palette::YlGnBu => "yl-gn-bu",
            Palette::Blues => "blues",
            Palette::Viridis => "viridis",
        }
    }

    fn stops(&self) -> &'static [(u8, u8, u8)] {
        match self {
            Palette::YlGnBu => YL_GN_BU,
            Palette::Blues => BLUES,
            Palette::Viridis => VIRIDIS,
        }
    }

    /// Color at position `t` in `[0, 1]`. Out-of-range and NaN inputs clamp.
    pub fn color_at(&self, t: f64) -> RGBColor {
        let stops = self.stops();
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };

        let scaled = t * (stops.len() - 1) as f64;
        let lower = (scaled.floor() as usize).min(stops.len() - 1);
        let upper = (lower + 1).min(stops.len() - 1);
        let frac = scaled - lower as f64;

        let (r0, g0, b0) = stops[lower];
        let (r1, g1, b1) = stops[upper];
        RGBColor(lerp(r0, r1, frac), lerp(g0, g1, frac), lerp(b0, b1, frac))
    }

    /// Color for `value` on a `[min, max]` scale. A flat scale maps to the low end.
    pub fn color_for(&self, value: u32, min: u32, max: u32) -> RGBColor {
        if max <= min {
            return self.color_at(0.0);
        }
        let t = (value.saturating_sub(min)) as f64 / (max - min) as f64;
        self.color_at(t)
    }
}

fn lerp(a: u8, b: u8, t: f64) -> u8 {
    (a as f64 + (b as f64 - a as f64) * t).round() as u8
}

impl fmt::Display for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Palette {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        match normalized.as_str() {
            "yl-gn-bu" | "ylgnbu" => Ok(Palette::YlGnBu),
            "blues" => Ok(Palette::Blues),
            "viridis" => Ok(Palette::Viridis),
            _ => Err(ValidationError::invalid(
                "palette",
                format!("unknown palette '{s}' (expected yl-gn-bu, blues or viridis)"),
            )),
        }
    }
}
