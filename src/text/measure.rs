use super::segment::segment;
use crate::font::Font;

/// Side of an emoji square relative to the font size, unless configured.
pub const DEFAULT_SYMBOL_RATIO: f32 = 0.95;

/// Measures mixed text and emoji strings.
///
/// Plain runs use the font's kerned advance widths. Symbol runs count as a
/// square of side `round(symbol_ratio * font size)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Measurer {
    symbol_ratio: f32,
}

impl Default for Measurer {
    fn default() -> Self {
        Self::new(DEFAULT_SYMBOL_RATIO)
    }
}

impl Measurer {
    pub fn new(symbol_ratio: f32) -> Self {
        let symbol_ratio = if symbol_ratio.is_finite() && symbol_ratio > 0.0 {
            symbol_ratio
        } else {
            DEFAULT_SYMBOL_RATIO
        };
        Self { symbol_ratio }
    }

    /// Side of the square a symbol occupies at `font`'s size.
    pub fn symbol_side(&self, font: &Font) -> u32 {
        (font.size() * self.symbol_ratio).round().max(1.0) as u32
    }

    /// Pixel width of `text` at `font`.
    pub fn measure_width(&self, text: &str, font: &Font) -> u32 {
        let width: f32 = segment(text)
            .iter()
            .map(|segment| {
                if segment.is_symbol() {
                    self.symbol_side(font) as f32
                } else {
                    font.advance_width(segment.text)
                }
            })
            .sum();
        width.round().max(0.0) as u32
    }
}
