//! Font discovery and one-time registration.
//!
//! The `ab_glyph` text path in plotters does not look up OS fonts, so a TTF/OTF
//! file has to be found on disk and registered under `sans-serif` before the
//! first chart is drawn.

use anyhow::{Context, Result, anyhow, bail};
use log::{debug, info};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::style::ChartStyle;

/// Well-known font files, CJK-capable ones first so column names render.
const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/truetype/wqy/wqy-microhei.ttc",
    "C:/Windows/Fonts/simhei.ttf",
    "C:/Windows/Fonts/msyh.ttc",
    "/System/Library/Fonts/PingFang.ttc",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/Library/Fonts/Arial Unicode.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:/Windows/Fonts/arial.ttf",
];

/// Font files in the user's font directory that are worth trying.
const USER_FONT_NAMES: &[&str] = &["NotoSansCJK-Regular.ttc", "DejaVuSans.ttf", "SimHei.ttf"];

static REGISTERED: Mutex<Option<PathBuf>> = Mutex::new(None);

/// Ordered list of candidate font files for `style`.
pub fn font_candidates(style: &ChartStyle) -> Vec<PathBuf> {
    let mut out: Vec<PathBuf> = Vec::new();
    out.extend(style.font_path.iter().cloned());
    out.extend(style.font_candidates.iter().cloned());
    if let Some(dir) = dirs::font_dir() {
        out.extend(USER_FONT_NAMES.iter().map(|n| dir.join(n)));
    }
    out.extend(SYSTEM_FONTS.iter().map(PathBuf::from));
    out
}

/// First candidate that exists as a file.
pub fn discover_font(candidates: &[PathBuf]) -> Option<PathBuf> {
    candidates.iter().find(|p| p.is_file()).cloned()
}

fn register(path: &Path) -> Result<()> {
    let bytes = std::fs::read(path).with_context(|| format!("reading font {}", path.display()))?;
    // plotters keeps a reference for the rest of the process.
    let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
    plotters::style::register_font("sans-serif", plotters::style::FontStyle::Normal, bytes)
        .map_err(|_| anyhow!("{} is not a usable font", path.display()))
}

/// Register a `sans-serif` font once per process and return its path.
///
/// Once a font is registered later calls return it regardless of `style`. A
/// failed lookup is not remembered, so a later style with a valid `font_path`
/// still gets its font.
pub fn ensure_fonts_registered(style: &ChartStyle) -> Result<PathBuf> {
    register_first(&REGISTERED, &font_candidates(style), register)
}

fn register_first(
    slot: &Mutex<Option<PathBuf>>,
    candidates: &[PathBuf],
    register: impl Fn(&Path) -> Result<()>,
) -> Result<PathBuf> {
    let mut slot = slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    if let Some(path) = slot.as_ref() {
        return Ok(path.clone());
    }
    debug!("font candidates: {candidates:?}");
    for path in candidates.iter().filter(|p| p.is_file()) {
        match register(path) {
            Ok(()) => {
                info!("using font {}", path.display());
                *slot = Some(path.clone());
                return Ok(path.clone());
            }
            Err(e) => debug!("skipping font: {e:#}"),
        }
    }
    bail!("no usable font found; set `font_path` in the style file to a .ttf/.otf")
}
