use image::Rgba;

use crate::error::{ComposeError, Result};

pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
pub const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Parses `#rgb`, `#rrggbb`, `#rrggbbaa` (the `#` is optional) or a basic
/// color name.
pub fn parse_color(value: &str) -> Result<Rgba<u8>> {
    let trimmed = value.trim();
    let named = match trimmed.to_ascii_lowercase().as_str() {
        "white" => Some(WHITE),
        "black" => Some(BLACK),
        "red" => Some(Rgba([255, 0, 0, 255])),
        "green" => Some(Rgba([0, 128, 0, 255])),
        "blue" => Some(Rgba([0, 0, 255, 255])),
        "yellow" => Some(Rgba([255, 255, 0, 255])),
        "orange" => Some(Rgba([255, 165, 0, 255])),
        "gray" | "grey" => Some(Rgba([128, 128, 128, 255])),
        "transparent" => Some(Rgba([0, 0, 0, 0])),
        _ => None,
    };
    if let Some(color) = named {
        return Ok(color);
    }

    let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
    let invalid = || ComposeError::InvalidColor(value.to_string());
    if !hex.is_ascii() {
        return Err(invalid());
    }
    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&hex[range], 16).map_err(|_| invalid())
    };

    match hex.len() {
        3 => {
            let mut rgb = [0u8; 3];
            for (i, slot) in rgb.iter_mut().enumerate() {
                *slot = channel(i..i + 1)? * 17;
            }
            Ok(Rgba([rgb[0], rgb[1], rgb[2], 255]))
        }
        6 => Ok(Rgba([channel(0..2)?, channel(2..4)?, channel(4..6)?, 255])),
        8 => Ok(Rgba([
            channel(0..2)?,
            channel(2..4)?,
            channel(4..6)?,
            channel(6..8)?,
        ])),
        _ => Err(invalid()),
    }
}

/// Parses an optional color, falling back to `default` when absent.
pub fn color_or(value: Option<&str>, default: Rgba<u8>) -> Result<Rgba<u8>> {
    value.map_or(Ok(default), parse_color)
}

/// Converts to a tiny-skia paint color.
pub fn to_skia(color: Rgba<u8>) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba8(color[0], color[1], color[2], color[3])
}

/// Converts a rendered tiny-skia pixel back to straight alpha.
pub fn from_skia(pixel: tiny_skia::PremultipliedColorU8) -> Rgba<u8> {
    let color = pixel.demultiply();
    Rgba([color.red(), color.green(), color.blue(), color.alpha()])
}

/// Alpha-blends `color` over `dst` with extra coverage `coverage` (0..=255).
pub fn blend(dst: &mut Rgba<u8>, color: Rgba<u8>, coverage: u8) {
    let alpha = color[3] as u32 * coverage as u32 / 255;
    if alpha == 0 {
        return;
    }
    let inverse = 255 - alpha;
    for i in 0..3 {
        dst[i] = ((color[i] as u32 * alpha + dst[i] as u32 * inverse + 127) / 255) as u8;
    }
    dst[3] = (alpha + dst[3] as u32 * inverse / 255).min(255) as u8;
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_forms() {
        assert_eq!(parse_color("#FF5722").unwrap(), Rgba([255, 87, 34, 255]));
        assert_eq!(parse_color("333").unwrap(), Rgba([51, 51, 51, 255]));
        assert_eq!(parse_color("#00000080").unwrap(), Rgba([0, 0, 0, 128]));
        assert_eq!(parse_color(" White ").unwrap(), WHITE);
    }

    #[test]
    fn test_invalid_colors() {
        for value in ["", "#12", "#GGGGGG", "#ffé", "blurple"] {
            assert!(
                matches!(parse_color(value), Err(ComposeError::InvalidColor(_))),
                "{value}"
            );
        }
    }

    #[test]
    fn test_blend_extremes() {
        let mut pixel = WHITE;
        blend(&mut pixel, BLACK, 0);
        assert_eq!(pixel, WHITE);
        blend(&mut pixel, BLACK, 255);
        assert_eq!(pixel, BLACK);

        let mut pixel = WHITE;
        blend(&mut pixel, BLACK, 128);
        assert!(pixel[0] > 120 && pixel[0] < 135);
    }

    #[test]
    fn test_skia_conversion() {
        let color = Rgba([10, 200, 30, 255]);
        let premultiplied = to_skia(color).premultiply().to_color_u8();
        assert_eq!(from_skia(premultiplied), color);
    }
}
