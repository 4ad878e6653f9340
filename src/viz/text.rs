//! Text measurement for annotation boxes.

/// Heuristic: estimate pixel width of text (Plotters has no built-in text measuring).
/// Wide (CJK) glyphs count double.
pub fn estimate_text_width_px(text: &str, font_px: u32) -> u32 {
    let units: f32 = text
        .chars()
        .map(|c| if (c as u32) >= 0x2E80 { 1.7 } else { 1.0 })
        .sum();
    (units * (font_px as f32) * 0.60).ceil() as u32
}

/// Pixel size of a possibly multi-line label: (width of widest line, total height).
pub fn estimate_block_px(text: &str, font_px: u32) -> (u32, u32) {
    let lines: Vec<&str> = text.lines().collect();
    let w = lines
        .iter()
        .map(|l| estimate_text_width_px(l, font_px))
        .max()
        .unwrap_or(0);
    let h = lines.len().max(1) as u32 * line_height_px(font_px);
    (w, h)
}

pub fn line_height_px(font_px: u32) -> u32 {
    font_px + font_px / 4 + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multi_line_blocks() {
        let (w, h) = estimate_block_px("L1 critical region\nshort", 10);
        assert_eq!(w, estimate_text_width_px("L1 critical region", 10));
        assert_eq!(h, 2 * line_height_px(10));
    }
}
