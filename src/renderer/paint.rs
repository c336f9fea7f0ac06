use image::{Rgba, RgbaImage};
use serde::{Deserialize, Serialize};

use super::{
    Renderer,
    button::{Fill, fill_rounded_rect},
    composite::paste_alpha,
    mask::TextMask,
};
use crate::{
    font::Font,
    layout::{PlacedBlock, Rect},
    text::segment,
};

/// How text is painted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TextStyle {
    Plain {
        fill: Rgba<u8>,
    },
    /// Outline stamped at every offset of a square of `radius`, then the fill.
    Outline {
        fill: Rgba<u8>,
        outline: Rgba<u8>,
        radius: u32,
    },
    /// Shadow stamped `offset` pixels down and right, then the fill.
    Shadow {
        fill: Rgba<u8>,
        shadow: Rgba<u8>,
        offset: i32,
    },
    /// Faint stamps over a square of `radius` build a soft halo.
    Glow {
        fill: Rgba<u8>,
        glow: Rgba<u8>,
        radius: u32,
    },
}

impl TextStyle {
    pub fn fill(&self) -> Rgba<u8> {
        match *self {
            TextStyle::Plain { fill }
            | TextStyle::Outline { fill, .. }
            | TextStyle::Shadow { fill, .. }
            | TextStyle::Glow { fill, .. } => fill,
        }
    }
}

/// Horizontal justification of each line within its area.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HorizontalAlign {
    Left,
    #[default]
    Center,
    Right,
}

impl HorizontalAlign {
    fn line_x(self, area: Rect, line_width: u32) -> i32 {
        let free = area.width as i32 - line_width as i32;
        match self {
            HorizontalAlign::Left => area.x as i32,
            HorizontalAlign::Center => area.x as i32 + free / 2,
            HorizontalAlign::Right => area.x as i32 + free,
        }
    }
}

impl Renderer {
    /// Draws one line of mixed text with its line box's top-left at `(x, y)`.
    ///
    /// Font-drawn runs get the style. Symbols are pasted as bitmaps without
    /// any effect; unavailable symbols leave their square empty.
    pub fn draw_line(
        &self,
        canvas: &mut RgbaImage,
        x: i32,
        y: i32,
        text: &str,
        font: &Font,
        style: &TextStyle,
    ) {
        let width = self.measurer.measure_width(text, font);
        let side = self.measurer.symbol_side(font);
        let mut mask = TextMask::new(width, font);
        let mut symbols = Vec::new();

        let mut pen = 0.0f32;
        for segment in segment(text) {
            if segment.is_symbol() {
                symbols.push((pen, segment.text));
                pen += side as f32;
            } else {
                mask.draw_text(font, segment.text, pen, &self.glyphs);
                pen += font.advance_width(segment.text);
            }
        }

        if !mask.is_blank() {
            stamp_styled(&mask, canvas, x, y, style);
        }

        let symbol_y = y + (font.ascent().round() as i32 - side as i32).max(0);
        for (offset, cluster) in symbols {
            if let Some(bitmap) = self.symbols.get(cluster, side) {
                let symbol_x = x + offset.round() as i32;
                paste_alpha(canvas, &bitmap, symbol_x as i64, symbol_y as i64);
            }
        }
    }

    /// Draws every line of a placed block, each aligned within `area`.
    pub fn draw_block(
        &self,
        canvas: &mut RgbaImage,
        placed: &PlacedBlock,
        area: Rect,
        align: HorizontalAlign,
        style: &TextStyle,
    ) {
        let block = &placed.block;
        for (offset, line) in block.line_offsets() {
            let x = align.line_x(area, line.width);
            let y = (placed.top + offset) as i32;
            self.draw_line(canvas, x, y, &line.text, block.font(), style);
        }
    }

    /// Draws a CTA block as a pill button centered on `center_x`.
    ///
    /// The block's extra height is the vertical padding. Returns the y of the
    /// button's bottom edge.
    pub fn draw_button(
        &self,
        canvas: &mut RgbaImage,
        placed: &PlacedBlock,
        center_x: u32,
        padding_x: u32,
        fill: Fill,
        text_color: Rgba<u8>,
    ) -> u32 {
        let block = &placed.block;
        let width = block.width() + 2 * padding_x;
        let height = block.height();
        let button = Rect::new(
            center_x.saturating_sub(width / 2),
            placed.top,
            width,
            height,
        );
        fill_rounded_rect(canvas, button, height / 2, fill);

        let text_area = Rect::new(
            button.x + padding_x,
            placed.top + block.extra_height() / 2,
            block.width(),
            block.text_height(),
        );
        let text = PlacedBlock {
            block: block.clone(),
            top: text_area.y,
        };
        self.draw_block(
            canvas,
            &text,
            text_area,
            HorizontalAlign::Center,
            &TextStyle::Plain { fill: text_color },
        );

        button.bottom()
    }
}

fn stamp_styled(mask: &TextMask, canvas: &mut RgbaImage, x: i32, y: i32, style: &TextStyle) {
    match *style {
        TextStyle::Plain { fill } => mask.stamp(canvas, x, y, fill),
        TextStyle::Outline {
            fill,
            outline,
            radius,
        } => {
            let r = radius as i32;
            for dy in -r..=r {
                for dx in -r..=r {
                    if dx != 0 || dy != 0 {
                        mask.stamp(canvas, x + dx, y + dy, outline);
                    }
                }
            }
            mask.stamp(canvas, x, y, fill);
        }
        TextStyle::Shadow {
            fill,
            shadow,
            offset,
        } => {
            mask.stamp(canvas, x + offset, y + offset, shadow);
            mask.stamp(canvas, x, y, fill);
        }
        TextStyle::Glow { fill, glow, radius } => {
            let r = radius as i32;
            let stamps = ((2 * r + 1) * (2 * r + 1)) as u32;
            let faint = Rgba([
                glow[0],
                glow[1],
                glow[2],
                ((glow[3] as u32 * 4 / stamps.max(1)).clamp(1, 255)) as u8,
            ]);
            for dy in -r..=r {
                for dx in -r..=r {
                    mask.stamp(canvas, x + dx, y + dy, faint);
                }
            }
            mask.stamp(canvas, x, y, fill);
        }
    }
}
