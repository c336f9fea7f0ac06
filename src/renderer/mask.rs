use image::{Rgba, RgbaImage};

use super::{color::blend, glyph_cache::GlyphCache};
use crate::font::{Font, GlyphKind, PlacedGlyph, builtin};

/// Coverage bitmap of the font-drawn parts of one line.
///
/// Coordinates are relative to the line box's top-left corner. The bitmap
/// extends past the box by a margin so glyph overhangs are kept.
pub struct TextMask {
    width: usize,
    height: usize,
    margin: i32,
    coverage: Vec<u8>,
}

impl TextMask {
    /// Empty mask for a line box of `width` x `line_height` at `font`'s size.
    pub fn new(width: u32, font: &Font) -> Self {
        let margin = (font.size() / 4.0).ceil() as i32 + 1;
        let width = width as usize + 2 * margin as usize;
        let height = font.line_height().ceil() as usize + 2 * margin as usize;
        Self {
            width,
            height,
            margin,
            coverage: vec![0; width.saturating_mul(height)],
        }
    }

    /// Draws `text` with its line-box origin shifted right by `pen_x`.
    pub fn draw_text(&mut self, font: &Font, text: &str, pen_x: f32, glyphs: &GlyphCache) {
        for placed in font.place_glyphs(text) {
            self.draw_glyph(font, &placed, pen_x, glyphs);
        }
    }

    fn draw_glyph(&mut self, font: &Font, placed: &PlacedGlyph, pen_x: f32, glyphs: &GlyphCache) {
        let origin_x = (pen_x + placed.x).floor() as i32;
        let origin_y = placed.y.floor() as i32;

        match placed.kind {
            GlyphKind::Outline(glyph_id) => {
                let Some(outline) = font.outline_font() else {
                    return;
                };
                let raster = glyphs.get(glyph_id, outline);
                if raster.width == 0 || raster.height == 0 {
                    return;
                }
                for row in 0..raster.height {
                    for col in 0..raster.width {
                        let value = raster.coverage[row * raster.width + col];
                        if value != 0 {
                            self.accumulate(origin_x + col as i32, origin_y + row as i32, value);
                        }
                    }
                }
            }
            GlyphKind::Builtin { ch, scale } => {
                let scale = scale as i32;
                for (col, row) in builtin::lit_cells(ch) {
                    let cell_x = origin_x + col as i32 * scale;
                    let cell_y = origin_y + row as i32 * scale;
                    for dy in 0..scale {
                        for dx in 0..scale {
                            self.accumulate(cell_x + dx, cell_y + dy, 255);
                        }
                    }
                }
            }
        }
    }

    fn accumulate(&mut self, x: i32, y: i32, value: u8) {
        let mx = x + self.margin;
        let my = y + self.margin;
        if mx < 0 || my < 0 || mx as usize >= self.width || my as usize >= self.height {
            return;
        }
        let idx = my as usize * self.width + mx as usize;
        self.coverage[idx] = self.coverage[idx].saturating_add(value);
    }

    /// Whether any pixel is covered.
    pub fn is_blank(&self) -> bool {
        self.coverage.iter().all(|&value| value == 0)
    }

    /// Blends the mask onto `canvas` in `color`, line box at `(x, y)`.
    pub fn stamp(&self, canvas: &mut RgbaImage, x: i32, y: i32, color: Rgba<u8>) {
        let (canvas_width, canvas_height) = (canvas.width() as i32, canvas.height() as i32);
        let left = x - self.margin;
        let top = y - self.margin;

        for row in 0..self.height {
            let cy = top + row as i32;
            if cy < 0 || cy >= canvas_height {
                continue;
            }
            for col in 0..self.width {
                let value = self.coverage[row * self.width + col];
                if value == 0 {
                    continue;
                }
                let cx = left + col as i32;
                if cx < 0 || cx >= canvas_width {
                    continue;
                }
                blend(canvas.get_pixel_mut(cx as u32, cy as u32), color, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::color::{BLACK, WHITE};

    #[test]
    fn test_builtin_text_covers_cells() {
        let font = Font::builtin(10.0);
        let glyphs = GlyphCache::new(16);
        let mut mask = TextMask::new(6, &font);
        assert!(mask.is_blank());

        mask.draw_text(&font, "I", 0.0, &glyphs);
        assert!(!mask.is_blank());
        let lit = mask.coverage.iter().filter(|&&v| v == 255).count();
        assert_eq!(lit, builtin::lit_cells('I').count());
    }

    #[test]
    fn test_stamp_clips_to_canvas() {
        let font = Font::builtin(20.0);
        let glyphs = GlyphCache::new(16);
        let mut mask = TextMask::new(48, &font);
        mask.draw_text(&font, "HI", 0.0, &glyphs);

        let mut canvas = RgbaImage::from_pixel(30, 30, WHITE);
        mask.stamp(&mut canvas, -10, -5, BLACK);
        mask.stamp(&mut canvas, 25, 25, BLACK);
        assert!(canvas.pixels().any(|p| *p == BLACK));
    }
}
