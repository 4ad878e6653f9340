//! Immutable chart styling.
//!
//! A [`ChartStyle`] is built once per process (defaults or a JSON file) and
//! passed by reference to every render call. Nothing here is global.
//!
//! ```rust
//! use cachebench_viz::style::ChartStyle;
//!
//! let style: ChartStyle = serde_json::from_str(r##"{ "grid": "#DDDDDD" }"##).unwrap();
//! assert_eq!(style.grid.hex(), "#DDDDDD");
//! assert_eq!(style.tick_font_px, ChartStyle::default().tick_font_px);
//! ```

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// 8-bit RGB color, serialized as `#RRGGBB`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` (the leading `#` is optional).
    pub fn from_hex(s: &str) -> Result<Self> {
        let h = s.trim().trim_start_matches('#');
        if h.len() != 6 || !h.chars().all(|c| c.is_ascii_hexdigit()) {
            bail!("invalid color {s:?}, expected #RRGGBB");
        }
        let byte = |i: usize| u8::from_str_radix(&h[i..i + 2], 16);
        Ok(Self::new(byte(0)?, byte(2)?, byte(4)?))
    }

    pub fn hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex())
    }
}

impl TryFrom<String> for Rgb8 {
    type Error = anyhow::Error;

    fn try_from(s: String) -> Result<Self> {
        Self::from_hex(&s)
    }
}

impl From<Rgb8> for String {
    fn from(c: Rgb8) -> Self {
        c.hex()
    }
}

/// Bright series colors used by the speedup charts.
pub mod vibrant {
    use super::Rgb8;

    pub const BLUE: Rgb8 = Rgb8::new(0x1E, 0x88, 0xE5);
    pub const RED: Rgb8 = Rgb8::new(0xE5, 0x39, 0x35);
    pub const GREEN: Rgb8 = Rgb8::new(0x43, 0xA0, 0x47);
    pub const PURPLE: Rgb8 = Rgb8::new(0x8E, 0x24, 0xAA);
    pub const ORANGE: Rgb8 = Rgb8::new(0xFB, 0x8C, 0x00);
    pub const TEAL: Rgb8 = Rgb8::new(0x00, 0x89, 0x7B);
    pub const PINK: Rgb8 = Rgb8::new(0xD8, 0x1B, 0x60);
    pub const YELLOW: Rgb8 = Rgb8::new(0xF9, 0xA8, 0x25);
}

/// Muted series colors used by the timing charts.
pub mod classic {
    use super::Rgb8;

    pub const NAVY: Rgb8 = Rgb8::new(0x2C, 0x3E, 0x50);
    pub const CRIMSON: Rgb8 = Rgb8::new(0xE7, 0x4C, 0x3C);
    pub const EMERALD: Rgb8 = Rgb8::new(0x27, 0xAE, 0x60);
}

/// Look of every chart. Missing JSON fields take their default.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartStyle {
    pub figure_background: Rgb8,
    pub plot_background: Rgb8,
    pub grid: Rgb8,
    pub axis_text: Rgb8,

    pub boundary_line: Rgb8,
    pub boundary_alpha: f64,
    pub boundary_label: Rgb8,
    /// Opacity of the white box behind boundary labels.
    pub label_box_alpha: f64,

    pub band_fill: Rgb8,
    pub band_alpha: f64,
    pub band_label: Rgb8,

    pub line_width: u32,
    /// Timing charts draw thicker smoothed curves.
    pub smooth_line_width: u32,
    pub marker_px: u32,
    pub point_alpha: f64,

    pub title_font_px: u32,
    pub axis_desc_font_px: u32,
    pub tick_font_px: u32,
    pub legend_font_px: u32,
    pub boundary_font_px: u32,
    pub band_font_px: u32,
    pub footnote_font_px: u32,

    /// Font file to register as `sans-serif`; tried before any discovery.
    pub font_path: Option<PathBuf>,
    /// Extra font files to try before the built-in system locations.
    pub font_candidates: Vec<PathBuf>,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            figure_background: Rgb8::new(0xFF, 0xFF, 0xFF),
            plot_background: Rgb8::new(0xF0, 0xF0, 0xF0),
            grid: Rgb8::new(0xE0, 0xE0, 0xE0),
            axis_text: Rgb8::new(0x2F, 0x2F, 0x2F),
            boundary_line: Rgb8::new(0, 0, 0),
            boundary_alpha: 0.5,
            boundary_label: Rgb8::new(0xFF, 0, 0),
            label_box_alpha: 0.8,
            band_fill: Rgb8::new(0xFF, 0xFF, 0),
            band_alpha: 0.2,
            band_label: Rgb8::new(0, 0, 0),
            line_width: 3,
            smooth_line_width: 3,
            marker_px: 5,
            point_alpha: 0.8,
            title_font_px: 24,
            axis_desc_font_px: 18,
            tick_font_px: 13,
            legend_font_px: 15,
            boundary_font_px: 13,
            band_font_px: 12,
            footnote_font_px: 12,
            font_path: None,
            font_candidates: Vec::new(),
        }
    }
}

impl ChartStyle {
    /// Load a style from JSON.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let txt = std::fs::read_to_string(path)
            .with_context(|| format!("reading style {}", path.display()))?;
        let style: ChartStyle = serde_json::from_str(&txt)
            .with_context(|| format!("parsing style {}", path.display()))?;
        style.validate()?;
        Ok(style)
    }

    fn validate(&self) -> Result<()> {
        for (name, a) in [
            ("boundary_alpha", self.boundary_alpha),
            ("label_box_alpha", self.label_box_alpha),
            ("band_alpha", self.band_alpha),
            ("point_alpha", self.point_alpha),
        ] {
            if !(0.0..=1.0).contains(&a) {
                bail!("{name} must be within 0..=1, got {a}");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_parsing() {
        assert_eq!(Rgb8::from_hex("#1E88E5").unwrap(), vibrant::BLUE);
        assert_eq!(Rgb8::from_hex("e53935").unwrap(), vibrant::RED);
        assert!(Rgb8::from_hex("#12345").is_err());
        assert!(Rgb8::from_hex("#GG0000").is_err());
    }
}
