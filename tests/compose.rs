#![allow(clippy::unwrap_used)]

use std::{io::Cursor, sync::Arc};

use adcomp::{
    BatchOptions, ComposeRequest, ComposedImage, Compositor, CtaStyle, EngineConfig,
    StaticFetcher, StyleOptions, TextVariation,
    image::{self, ImageFormat, Rgba, RgbaImage},
};

const PHOTO_COLOR: Rgba<u8> = Rgba([40, 90, 160, 255]);

fn png(image: &RgbaImage) -> Vec<u8> {
    let mut bytes = Cursor::new(Vec::new());
    image.write_to(&mut bytes, ImageFormat::Png).unwrap();
    bytes.into_inner()
}

fn solid_png(width: u32, height: u32, color: Rgba<u8>) -> Vec<u8> {
    png(&RgbaImage::from_pixel(width, height, color))
}

fn decode(image: &ComposedImage) -> RgbaImage {
    image::load_from_memory(&image.png).unwrap().to_rgba8()
}

fn compositor(fetcher: StaticFetcher) -> Compositor {
    let mut config = EngineConfig::builtin_fonts();
    config.fetch.symbol_url_template = "mem://emoji/{code}.png".into();
    Compositor::with_fetcher(config, Arc::new(fetcher))
}

fn photo_fetcher() -> StaticFetcher {
    StaticFetcher::new().with("mem://photo.png", solid_png(200, 300, PHOTO_COLOR))
}

fn differs(a: &Rgba<u8>, b: &Rgba<u8>) -> bool {
    (0..3).any(|i| a[i].abs_diff(b[i]) > 30)
}

/// Rows in `rows` that contain a pixel far from `background`.
fn rows_with_ink(canvas: &RgbaImage, background: Rgba<u8>, rows: std::ops::Range<u32>) -> Vec<u32> {
    rows.filter(|&y| (0..canvas.width()).any(|x| differs(canvas.get_pixel(x, y), &background)))
        .collect()
}

#[test]
fn text_only_hook_is_centered_on_white() {
    let compositor = compositor(StaticFetcher::new());
    let request =
        ComposeRequest::new("text_only", "instagram_square").with_text("SALE ENDS TODAY", "", "");

    let image = compositor.compose(&request).unwrap();
    assert_eq!((image.width, image.height), (1080, 1080));

    let canvas = decode(&image);
    let white = Rgba([255, 255, 255, 255]);
    let ink: Vec<(u32, u32)> = canvas
        .enumerate_pixels()
        .filter(|(_, _, p)| **p != white)
        .map(|(x, y, _)| (x, y))
        .collect();
    assert!(!ink.is_empty());
    assert!(ink.iter().any(|&(x, y)| *canvas.get_pixel(x, y) == Rgba([0, 0, 0, 255])));

    let (min_x, max_x) = ink.iter().fold((u32::MAX, 0), |(lo, hi), &(x, _)| (lo.min(x), hi.max(x)));
    let (min_y, max_y) = ink.iter().fold((u32::MAX, 0), |(lo, hi), &(_, y)| (lo.min(y), hi.max(y)));
    let center = ((min_x + max_x) / 2, (min_y + max_y) / 2);
    assert!(center.0.abs_diff(540) < 40, "{center:?}");
    assert!(center.1.abs_diff(540) < 40, "{center:?}");
}

#[test]
fn text_only_stack_spans_the_content_area() {
    let compositor = compositor(StaticFetcher::new());
    let request = ComposeRequest::new("text_only", "instagram_square").with_text(
        "SALE ENDS TODAY",
        "Everything must go",
        "Shop now",
    );

    let canvas = decode(&compositor.compose(&request).unwrap());
    let ink = rows_with_ink(&canvas, Rgba([255, 255, 255, 255]), 0..1080);
    let (first, last) = (ink[0], ink[ink.len() - 1]);
    // content area is 60..1020
    assert!((60..110).contains(&first), "{first}");
    assert!((960..=1020).contains(&last), "{last}");
}

#[test]
fn meme_on_tiktok_keeps_middle_and_bottom_band_clear() {
    let compositor = compositor(photo_fetcher());
    let request = ComposeRequest::new("meme", "tiktok")
        .with_text(
            "stop scrolling",
            "Fresh picks every morning, delivered to your door",
            "Order now",
        )
        .with_image("mem://photo.png");

    let image = compositor.compose(&request).unwrap();
    assert_eq!((image.width, image.height), (1080, 1920));
    let canvas = decode(&image);

    // hook near the top margin
    let top = rows_with_ink(&canvas, PHOTO_COLOR, 0..600);
    assert!(!top.is_empty());
    assert!(top[0] >= 145 && top[0] < 200, "hook starts at {}", top[0]);

    // body and CTA between the middle boundary and the UI band
    let bottom = rows_with_ink(&canvas, PHOTO_COLOR, 1000..1920);
    assert!(!bottom.is_empty());
    assert!(*bottom.first().unwrap() >= 1056 - 5);
    assert!(*bottom.last().unwrap() <= 1440 + 5);

    // nothing in the protected middle band or under the platform controls
    assert!(rows_with_ink(&canvas, PHOTO_COLOR, 450..1050).is_empty());
    assert!(rows_with_ink(&canvas, PHOTO_COLOR, 1450..1920).is_empty());
}

#[test]
fn split_has_angled_edge() {
    let red = Rgba([255, 0, 0, 255]);
    let fetcher = StaticFetcher::new().with("mem://red.png", solid_png(300, 300, red));
    let compositor = compositor(fetcher);
    let style = StyleOptions {
        divider_angle: 15.0,
        ..StyleOptions::default()
    };
    let request = ComposeRequest::new("split", "instagram_square")
        .with_text("NEW", "In stores", "")
        .with_image("mem://red.png")
        .with_style(style);

    let canvas = decode(&compositor.compose(&request).unwrap());
    let offset = 15f32.to_radians().tan() * 540.0;
    let is_red = |x: f32, y: u32| {
        let p = canvas.get_pixel(x as u32, y);
        p[0] > 200 && p[1] < 60 && p[2] < 60
    };
    let is_white = |x: f32, y: u32| *canvas.get_pixel(x as u32, y) == Rgba([255, 255, 255, 255]);

    // top row leans right, bottom row leans left
    assert!(is_red(540.0 + offset - 10.0, 2));
    assert!(is_white(540.0 + offset + 10.0, 2));
    assert!(is_red(540.0 - offset - 10.0, 1077));
    assert!(is_white(540.0 - offset + 10.0, 1077));
    assert!(is_red(530.0, 540));
    assert!(is_white(550.0, 540));
}

#[test]
fn stickers_skip_broken_sources() {
    let green = Rgba([0, 200, 0, 255]);
    let fetcher = StaticFetcher::new()
        .with("mem://broken.png", b"<html>not found</html>".to_vec())
        .with("mem://sticker.png", solid_png(64, 64, green));
    let compositor = compositor(fetcher);
    let style = StyleOptions {
        stickers: vec!["mem://broken.png".into(), "mem://sticker.png".into()],
        ..StyleOptions::default()
    };
    let request = ComposeRequest::new("stickers", "instagram_square")
        .with_text("Weekend drop", "Limited pieces", "")
        .with_style(style);

    let canvas = decode(&compositor.compose(&request).unwrap());
    let greenish = |p: &Rgba<u8>| p[1] > 150 && p[0] < 60 && p[2] < 60;

    // the broken source gives up no corner, so the valid sticker takes the first
    let side = 216;
    let count = canvas.pixels().filter(|p| greenish(p)).count();
    assert!(count >= side * side * 9 / 10 && count <= side * side * 11 / 10, "{count}");
    assert!(greenish(canvas.get_pixel(150, 150)));
    assert!(!greenish(canvas.get_pixel(900, 150)));
    assert!(!greenish(canvas.get_pixel(150, 900)));
    assert!(!greenish(canvas.get_pixel(900, 900)));
}

#[test]
fn identical_requests_produce_identical_pixels() {
    let compositor = compositor(photo_fetcher());
    let style = StyleOptions {
        cta_style: CtaStyle::Button,
        ..StyleOptions::default()
    };
    let request = ComposeRequest::new("meme", "instagram_story")
        .with_text("Big news", "We moved downtown 🎉", "Visit us")
        .with_image("mem://photo.png")
        .with_style(style);

    let first = compositor.compose(&request).unwrap();
    let second = compositor.compose(&request).unwrap();
    assert_eq!(first, second);
}

#[test]
fn symbols_are_pasted_from_the_fetcher() {
    let red = Rgba([255, 0, 0, 255]);
    let fetcher = StaticFetcher::new().with("mem://emoji/1f525.png", solid_png(72, 72, red));
    let compositor = compositor(fetcher);
    let request = ComposeRequest::new("text_only", "instagram_square").with_text("HOT 🔥", "", "");

    let canvas = decode(&compositor.compose(&request).unwrap());
    let reds = canvas
        .pixels()
        .filter(|p| p[0] > 200 && p[1] < 60 && p[2] < 60)
        .count();
    // 72px square at round(0.95 * 76)
    assert!(reds > 60 * 60, "{reds}");
}

#[test]
fn batch_matches_single_calls_in_order() {
    let photo = solid_png(200, 300, PHOTO_COLOR);
    let compositor = compositor(photo_fetcher());
    let options = BatchOptions {
        format: "meme".into(),
        output_size: "instagram_square".into(),
        style: StyleOptions::default(),
    };
    let variations = vec![
        TextVariation {
            hook: "One".into(),
            body: "first".into(),
            cta: String::new(),
        },
        TextVariation {
            hook: "Two".into(),
            body: String::new(),
            cta: "second".into(),
        },
        TextVariation {
            hook: "Three".into(),
            body: "third body".into(),
            cta: "go".into(),
        },
    ];

    let results = compositor
        .compose_many(Some(&photo), &variations, &options)
        .unwrap();
    assert_eq!(results.len(), 3);

    for (variation, result) in variations.iter().zip(results) {
        let single = ComposeRequest::new("meme", "instagram_square")
            .with_text(&variation.hook, &variation.body, &variation.cta)
            .with_image("mem://photo.png");
        assert_eq!(result.unwrap(), compositor.compose(&single).unwrap());
    }
}

#[test]
fn batch_from_json() {
    let compositor = compositor(StaticFetcher::new());
    let options = BatchOptions {
        format: "text_only".into(),
        ..BatchOptions::default()
    };
    let results = compositor
        .compose_many_json(
            None,
            r#"[{"hook_text": "A"}, {"hook": "B", "body_text": "b"}]"#,
            &options,
        )
        .unwrap();
    assert_eq!(results.len(), 2);
    assert!(results.iter().all(Result::is_ok));
}

fn close(a: &Rgba<u8>, b: &Rgba<u8>, tolerance: u8) -> bool {
    (0..3).all(|i| a[i].abs_diff(b[i]) <= tolerance)
}

fn rgb(hex: u32) -> Rgba<u8> {
    Rgba([(hex >> 16) as u8, (hex >> 8) as u8, hex as u8, 255])
}

/// Columns of row `y` that stand out from the row's margin color.
fn ink_in_row(canvas: &RgbaImage, y: u32) -> Vec<u32> {
    let background = *canvas.get_pixel(2, y);
    (0..canvas.width())
        .filter(|&x| !close(canvas.get_pixel(x, y), &background, 12))
        .collect()
}

/// Interior colors near the left and right ends of the lowest shape, read on
/// its middle row.
fn button_ends(canvas: &RgbaImage) -> (Rgba<u8>, Rgba<u8>) {
    let mut bottom = canvas.height() - 1;
    while ink_in_row(canvas, bottom).is_empty() {
        bottom -= 1;
    }
    let mut top = bottom;
    while !ink_in_row(canvas, top - 1).is_empty() {
        top -= 1;
    }
    let middle = (top + bottom) / 2;
    let ink = ink_in_row(canvas, middle);
    let (left, right) = (ink[0], ink[ink.len() - 1]);
    (*canvas.get_pixel(left + 4, middle), *canvas.get_pixel(right - 4, middle))
}

fn modern(fetcher: StaticFetcher, theme: Option<&str>, image: Option<&str>) -> RgbaImage {
    let style = StyleOptions {
        theme: theme.map(Into::into),
        ..StyleOptions::default()
    };
    let mut request = ComposeRequest::new("modern", "instagram_square")
        .with_text("New season", "Fresh colors for every room", "Shop now")
        .with_style(style);
    if let Some(image) = image {
        request = request.with_image(image);
    }
    decode(&compositor(fetcher).compose(&request).unwrap())
}

#[test]
fn modern_themes_paint_background_and_button() {
    let cases = [
        ("neon", rgb(0x0f0c29), rgb(0x0f0c29), rgb(0xf72585), rgb(0x7209b7)),
        ("minimal", rgb(0xffffff), rgb(0xffffff), rgb(0x1a1a2e), rgb(0x1a1a2e)),
        ("gradient", rgb(0x667eea), rgb(0x764ba2), rgb(0xff6b6b), rgb(0xee5a5a)),
        ("bold", rgb(0x1e1e2f), rgb(0x1e1e2f), rgb(0xff5722), rgb(0xff5722)),
    ];
    for (theme, top, bottom, left, right) in cases {
        let canvas = modern(StaticFetcher::new(), Some(theme), None);
        assert!(close(canvas.get_pixel(2, 0), &top, 3), "{theme}: {:?}", canvas.get_pixel(2, 0));
        assert!(
            close(canvas.get_pixel(2, 1079), &bottom, 3),
            "{theme}: {:?}",
            canvas.get_pixel(2, 1079)
        );

        let (start, end) = button_ends(&canvas);
        assert!(close(&start, &left, 12), "{theme}: {start:?}");
        assert!(close(&end, &right, 12), "{theme}: {end:?}");
    }
}

#[test]
fn modern_gradient_theme_passes_through_the_midpoint() {
    let canvas = modern(StaticFetcher::new(), Some("gradient"), None);
    let middle = canvas.get_pixel(2, 540);
    assert!(close(middle, &Rgba([110, 100, 198, 255]), 4), "{middle:?}");
}

#[test]
fn modern_glass_button_is_translucent() {
    let canvas = modern(StaticFetcher::new(), Some("glass"), None);
    assert!(close(canvas.get_pixel(2, 0), &rgb(0x1a1a2e), 3));
    assert!(close(canvas.get_pixel(2, 1079), &rgb(0x16213e), 3));

    let (start, end) = button_ends(&canvas);
    let mut bottom = 1079;
    while ink_in_row(&canvas, bottom).is_empty() {
        bottom -= 1;
    }
    let background = canvas.get_pixel(2, bottom);
    for fill in [start, end] {
        // white tint over the background, well short of white
        assert!((0..3).all(|i| fill[i] > background[i].saturating_add(15)), "{fill:?}");
        assert!((0..3).all(|i| fill[i] < 200), "{fill:?}");
    }
}

#[test]
fn modern_photo_is_darkened_by_half() {
    let canvas = modern(photo_fetcher(), None, Some("mem://photo.png"));
    let expected = Rgba([20, 45, 80, 255]);
    for (x, y) in [(5, 5), (1074, 5), (5, 1074), (540, 20)] {
        let pixel = canvas.get_pixel(x, y);
        assert!(close(pixel, &expected, 3), "({x}, {y}): {pixel:?}");
    }

    // default theme button over the photo
    let (start, _) = button_ends(&canvas);
    assert!(close(&start, &rgb(0xf72585), 12), "{start:?}");
}
