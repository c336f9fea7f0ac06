use image::{Rgba, RgbaImage, imageops::FilterType};
use tiny_skia::{
    FillRule, GradientStop, LinearGradient, Mask, Paint, PathBuilder, Pixmap, Point, Shader,
    SpreadMode, Transform,
};

use super::color::{blend, from_skia, to_skia};

/// Scales `image` to cover `width` x `height` and crops the centered excess.
pub fn cover_resize(image: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    let (source_width, source_height) = image.dimensions();
    if source_width == 0 || source_height == 0 || width == 0 || height == 0 {
        return RgbaImage::new(width, height);
    }

    let scale = (width as f32 / source_width as f32).max(height as f32 / source_height as f32);
    let scaled_width = ((source_width as f32 * scale).ceil() as u32).max(width);
    let scaled_height = ((source_height as f32 * scale).ceil() as u32).max(height);

    let scaled = if (scaled_width, scaled_height) == (source_width, source_height) {
        image.clone()
    } else {
        image::imageops::resize(image, scaled_width, scaled_height, FilterType::Lanczos3)
    };

    let left = (scaled_width - width) / 2;
    let top = (scaled_height - height) / 2;
    image::imageops::crop_imm(&scaled, left, top, width, height).to_image()
}

/// Blends black over the whole canvas with opacity `factor` in `[0, 1]`.
pub fn darken(canvas: &mut RgbaImage, factor: f32) {
    if !factor.is_finite() || factor <= 0.0 {
        return;
    }
    let coverage = (factor.min(1.0) * 255.0).round() as u8;
    for pixel in canvas.pixels_mut() {
        blend(pixel, Rgba([0, 0, 0, 255]), coverage);
    }
}

/// Alpha-composites `overlay` onto `canvas` with its top-left at `(x, y)`.
pub fn paste_alpha(canvas: &mut RgbaImage, overlay: &RgbaImage, x: i64, y: i64) {
    image::imageops::overlay(canvas, overlay, x, y);
}

/// Gradient through evenly spaced `stops` from `start` to `end`.
///
/// Falls back to the first stop when there is nothing to interpolate.
pub(crate) fn gradient_shader(
    stops: &[Rgba<u8>],
    start: Point,
    end: Point,
) -> Option<Shader<'static>> {
    let first = to_skia(*stops.first()?);
    if stops.len() == 1 {
        return Some(Shader::SolidColor(first));
    }
    let last = (stops.len() - 1) as f32;
    let stops = stops
        .iter()
        .enumerate()
        .map(|(i, &color)| GradientStop::new(i as f32 / last, to_skia(color)))
        .collect();
    Some(
        LinearGradient::new(start, end, stops, SpreadMode::Pad, Transform::identity())
            .unwrap_or(Shader::SolidColor(first)),
    )
}

/// Blends a rendered layer onto `canvas` with the layer's top-left at `(x, y)`.
pub(crate) fn composite_layer(canvas: &mut RgbaImage, layer: &Pixmap, x: u32, y: u32) {
    let (width, height) = canvas.dimensions();
    let layer_width = layer.width();
    for (i, &pixel) in layer.pixels().iter().enumerate() {
        if pixel.alpha() == 0 {
            continue;
        }
        let cx = x.saturating_add(i as u32 % layer_width);
        let cy = y.saturating_add(i as u32 / layer_width);
        if cx < width && cy < height {
            blend(canvas.get_pixel_mut(cx, cy), from_skia(pixel), 255);
        }
    }
}

/// Fills the canvas with a top-to-bottom gradient through evenly spaced `stops`.
///
/// The first and last stops land on the centers of the first and last rows.
pub fn fill_vertical_gradient(canvas: &mut RgbaImage, stops: &[Rgba<u8>]) {
    let (width, height) = canvas.dimensions();
    let (start, end) = (Point::from_xy(0.0, 0.5), Point::from_xy(0.0, height as f32 - 0.5));
    let Some(shader) = gradient_shader(stops, start, end) else {
        return;
    };
    let (Some(mut layer), Some(bounds)) = (
        Pixmap::new(width, height),
        tiny_skia::Rect::from_xywh(0.0, 0.0, width as f32, height as f32),
    ) else {
        return;
    };

    let paint = Paint {
        shader,
        ..Paint::default()
    };
    layer.fill_rect(bounds, &paint, Transform::identity(), None);
    for (dst, &src) in canvas.pixels_mut().zip(layer.pixels()) {
        *dst = from_skia(src);
    }
}

/// Straight dividing line of a split canvas.
///
/// The line passes through the horizontal center at mid-height and leans by
/// `tan(angle) * height / 2` at the top and bottom edges. Positive angles lean
/// the top to the right.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SplitDivider {
    center_x: f32,
    offset: f32,
    height: f32,
}

impl SplitDivider {
    pub const MAX_ANGLE: f32 = 60.0;

    pub fn new(width: u32, height: u32, angle_degrees: f32) -> Self {
        let angle = if angle_degrees.is_finite() {
            angle_degrees.clamp(-Self::MAX_ANGLE, Self::MAX_ANGLE)
        } else {
            0.0
        };
        Self {
            center_x: width as f32 / 2.0,
            offset: angle.to_radians().tan() * height as f32 / 2.0,
            height: height as f32,
        }
    }

    /// Horizontal lean at the top and bottom edges.
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// x of the line at row `y`.
    pub fn x_at(&self, y: f32) -> f32 {
        if self.height <= 0.0 {
            return self.center_x;
        }
        self.center_x + self.offset * (1.0 - 2.0 * y / self.height)
    }

    /// Rightmost x the line reaches.
    pub fn max_x(&self) -> f32 {
        self.center_x + self.offset.abs()
    }

    /// Anti-aliased coverage of the region left of the line.
    pub fn left_mask(&self, width: u32, height: u32) -> Option<Mask> {
        let mut mask = Mask::new(width, height)?;
        let bottom = height as f32;
        let mut builder = PathBuilder::new();
        builder.move_to(0.0, 0.0);
        builder.line_to(self.x_at(0.0), 0.0);
        builder.line_to(self.x_at(bottom), bottom);
        builder.line_to(0.0, bottom);
        builder.close();
        mask.fill_path(&builder.finish()?, FillRule::Winding, true, Transform::identity());
        Some(mask)
    }
}

/// Pastes `photo` onto the region left of `divider`.
///
/// The photo is cover-resized to the widest panel the line reaches.
pub fn paste_left_of(canvas: &mut RgbaImage, photo: &RgbaImage, divider: &SplitDivider) {
    let (width, height) = canvas.dimensions();
    let panel_width = (divider.max_x().ceil().max(0.0) as u32).min(width);
    if panel_width == 0 || height == 0 {
        return;
    }
    let Some(coverage) = divider.left_mask(width, height) else {
        return;
    };
    let photo = cover_resize(photo, panel_width, height);

    for (i, &value) in coverage.data().iter().enumerate() {
        let (x, y) = (i as u32 % width, i as u32 / width);
        if value > 0 && x < panel_width {
            blend(canvas.get_pixel_mut(x, y), *photo.get_pixel(x, y), value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cover_resize_fills_target() {
        let wide = RgbaImage::from_pixel(400, 100, Rgba([10, 20, 30, 255]));
        let covered = cover_resize(&wide, 200, 200);
        assert_eq!(covered.dimensions(), (200, 200));
        assert!(covered.pixels().all(|p| p[3] >= 250));
    }

    #[test]
    fn test_darken_halves_brightness() {
        let mut canvas = RgbaImage::from_pixel(4, 4, Rgba([200, 200, 200, 255]));
        darken(&mut canvas, 0.5);
        let value = canvas.get_pixel(0, 0)[0];
        assert!((99..=101).contains(&value), "{value}");

        let mut untouched = RgbaImage::from_pixel(1, 1, Rgba([200, 200, 200, 255]));
        darken(&mut untouched, 0.0);
        assert_eq!(untouched.get_pixel(0, 0)[0], 200);
    }

    #[test]
    fn test_gradient_endpoints() {
        let mut canvas = RgbaImage::new(2, 11);
        let top = Rgba([0, 0, 0, 255]);
        let bottom = Rgba([255, 255, 255, 255]);
        fill_vertical_gradient(&mut canvas, &[top, bottom]);
        assert!(canvas.get_pixel(0, 0)[0] <= 2);
        assert!(canvas.get_pixel(1, 10)[0] >= 253);
        assert!(canvas.pixels().all(|p| p[3] == 255));
        let middle = canvas.get_pixel(0, 5)[0];
        assert!((124..=132).contains(&middle), "{middle}");
    }

    #[test]
    fn test_gradient_single_stop_is_solid() {
        let mut canvas = RgbaImage::new(3, 3);
        let color = Rgba([30, 60, 90, 255]);
        fill_vertical_gradient(&mut canvas, &[color]);
        assert!(canvas.pixels().all(|p| *p == color));
    }

    #[test]
    fn test_divider_geometry() {
        let divider = SplitDivider::new(1080, 1080, 15.0);
        let expected = 15f32.to_radians().tan() * 540.0;
        assert!((divider.offset() - expected).abs() < 1e-3);
        assert!((divider.x_at(0.0) - (540.0 + expected)).abs() < 1e-3);
        assert!((divider.x_at(1080.0) - (540.0 - expected)).abs() < 1e-3);
        assert!((divider.x_at(540.0) - 540.0).abs() < 1e-3);

        let clamped = SplitDivider::new(100, 100, 89.0);
        assert!((clamped.offset() - 60f32.to_radians().tan() * 50.0).abs() < 1e-3);
    }

    #[test]
    fn test_paste_left_of_divider() {
        let mut canvas = RgbaImage::from_pixel(100, 100, Rgba([255, 255, 255, 255]));
        let photo = RgbaImage::from_pixel(50, 100, Rgba([255, 0, 0, 255]));
        let divider = SplitDivider::new(100, 100, 0.0);
        paste_left_of(&mut canvas, &photo, &divider);

        assert_eq!(*canvas.get_pixel(10, 50), Rgba([255, 0, 0, 255]));
        assert_eq!(*canvas.get_pixel(49, 0), Rgba([255, 0, 0, 255]));
        assert_eq!(*canvas.get_pixel(50, 99), Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_photo_is_framed_to_the_panel() {
        // left half green, right half blue
        let mut photo = RgbaImage::from_pixel(100, 100, Rgba([0, 0, 255, 255]));
        for y in 0..100 {
            for x in 0..50 {
                photo.put_pixel(x, y, Rgba([0, 255, 0, 255]));
            }
        }
        let mut canvas = RgbaImage::from_pixel(100, 100, Rgba([255, 255, 255, 255]));
        paste_left_of(&mut canvas, &photo, &SplitDivider::new(100, 100, 0.0));

        assert_eq!(*canvas.get_pixel(5, 50), Rgba([0, 255, 0, 255]));
        assert_eq!(*canvas.get_pixel(45, 50), Rgba([0, 0, 255, 255]));
    }

    #[test]
    fn test_slanted_edge_is_anti_aliased() {
        let mut canvas = RgbaImage::from_pixel(200, 200, Rgba([255, 255, 255, 255]));
        let photo = RgbaImage::from_pixel(200, 200, Rgba([255, 0, 0, 255]));
        let divider = SplitDivider::new(200, 200, 15.0);
        paste_left_of(&mut canvas, &photo, &divider);

        let partial = |y: u32| {
            (0..200)
                .filter(|&x| {
                    let green = canvas.get_pixel(x, y)[1];
                    green > 0 && green < 255
                })
                .count()
        };
        assert!((0..200).map(partial).sum::<usize>() > 100);
        assert!((0..200).all(|y| partial(y) <= 3));
        assert_eq!(canvas.get_pixel(0, 199)[1], 0);
        assert_eq!(canvas.get_pixel(199, 0)[1], 255);
    }
}
