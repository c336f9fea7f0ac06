use image::{Rgba, RgbaImage};
use tiny_skia::{FillRule, Mask, Paint, PathBuilder, Pixmap, Point, Shader, Transform};

use super::color::to_skia;
use super::composite::{composite_layer, gradient_shader};
use crate::layout::Rect;

/// Used when no sampled pixel qualifies as vibrant.
pub const FALLBACK_BUTTON_COLOR: Rgba<u8> = Rgba([0xFF, 0x57, 0x22, 0xFF]);

/// Samples per axis when looking for a vibrant color.
const VIBRANT_GRID: u32 = 10;
/// Channel sums at or outside these bounds count as near-black or near-white.
const MIN_BRIGHTNESS: u32 = 100;
const MAX_BRIGHTNESS: u32 = 650;

/// Paint of a filled shape.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Fill {
    Solid(Rgba<u8>),
    /// Left to right.
    Horizontal(Rgba<u8>, Rgba<u8>),
}

impl Fill {
    fn shader(&self, width: f32) -> Shader<'static> {
        match *self {
            Fill::Solid(color) => Shader::SolidColor(to_skia(color)),
            Fill::Horizontal(from, to) => gradient_shader(
                &[from, to],
                Point::from_xy(0.0, 0.0),
                Point::from_xy(width, 0.0),
            )
            .unwrap_or(Shader::SolidColor(to_skia(from))),
        }
    }
}

/// Fills `rect` with rounded corners of `radius`.
///
/// The shape is the union of two straddling rectangles and four corner
/// circles, rasterized once into an anti-aliased coverage mask.
pub fn fill_rounded_rect(canvas: &mut RgbaImage, rect: Rect, radius: u32, fill: Fill) {
    let (Some(mut coverage), Some(mut layer)) = (
        Mask::new(rect.width, rect.height),
        Pixmap::new(rect.width, rect.height),
    ) else {
        return;
    };
    let (width, height) = (rect.width as f32, rect.height as f32);
    let radius = radius.min(rect.width / 2).min(rect.height / 2) as f32;

    let bands = [
        tiny_skia::Rect::from_ltrb(radius, 0.0, width - radius, height),
        tiny_skia::Rect::from_ltrb(0.0, radius, width, height - radius),
    ];
    let corners = [
        (radius, radius),
        (width - radius, radius),
        (radius, height - radius),
        (width - radius, height - radius),
    ];
    let shapes = bands
        .into_iter()
        .flatten()
        .map(PathBuilder::from_rect)
        .chain(
            corners
                .into_iter()
                .filter_map(|(cx, cy)| PathBuilder::from_circle(cx, cy, radius)),
        );
    for shape in shapes {
        coverage.fill_path(&shape, FillRule::Winding, true, Transform::identity());
    }

    let Some(bounds) = tiny_skia::Rect::from_xywh(0.0, 0.0, width, height) else {
        return;
    };
    let paint = Paint {
        shader: fill.shader(width),
        ..Paint::default()
    };
    layer.fill_rect(bounds, &paint, Transform::identity(), Some(&coverage));
    composite_layer(canvas, &layer, rect.x, rect.y);
}

/// Most saturated color among evenly spaced samples of `image`.
///
/// Samples whose channel sum is not strictly between 100 and 650 are skipped
/// as near-black or near-white. Saturation is the spread between the largest
/// and smallest channel; the first sample wins ties.
pub fn vibrant_color(image: &RgbaImage) -> Rgba<u8> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return FALLBACK_BUTTON_COLOR;
    }

    let mut best: Option<(u8, Rgba<u8>)> = None;
    for gy in 0..VIBRANT_GRID {
        for gx in 0..VIBRANT_GRID {
            let x = ((2 * gx + 1) * width / (2 * VIBRANT_GRID)).min(width - 1);
            let y = ((2 * gy + 1) * height / (2 * VIBRANT_GRID)).min(height - 1);
            let pixel = *image.get_pixel(x, y);
            let [r, g, b, _] = pixel.0;

            let brightness = r as u32 + g as u32 + b as u32;
            if brightness <= MIN_BRIGHTNESS || brightness >= MAX_BRIGHTNESS {
                continue;
            }
            let spread = r.max(g).max(b) - r.min(g).min(b);
            if best.is_none_or(|(best_spread, _)| spread > best_spread) {
                best = Some((spread, Rgba([r, g, b, 255])));
            }
        }
    }

    best.map_or(FALLBACK_BUTTON_COLOR, |(_, color)| color)
}
