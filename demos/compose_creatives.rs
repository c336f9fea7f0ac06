use std::sync::Arc;

use adcomp::{
    BatchOptions, ComposeRequest, Compositor, CtaStyle, EngineConfig, StaticFetcher,
    StyleOptions, TextVariation,
    image::{Rgba, RgbaImage},
};

/// Vertical two-color photo stand-in, so the demo runs offline.
fn sample_photo() -> Vec<u8> {
    let photo = RgbaImage::from_fn(720, 960, |_, y| {
        let t = y as f32 / 960.0;
        Rgba([
            (30.0 + 180.0 * t) as u8,
            (90.0 + 60.0 * t) as u8,
            (160.0 - 100.0 * t) as u8,
            255,
        ])
    });
    let mut bytes = std::io::Cursor::new(Vec::new());
    photo
        .write_to(&mut bytes, adcomp::image::ImageFormat::Png)
        .expect("encode sample photo");
    bytes.into_inner()
}

#[allow(clippy::unwrap_used)]
fn main() {
    let photo = sample_photo();
    let fetcher = StaticFetcher::new().with("demo://photo.png", photo.clone());
    let compositor = Compositor::with_fetcher(EngineConfig::default(), Arc::new(fetcher));

    std::fs::create_dir_all("debug").expect("failed to create debug directory");

    let button = StyleOptions {
        cta_style: CtaStyle::Button,
        ..StyleOptions::default()
    };
    let requests = [
        ComposeRequest::new("text_only", "instagram_square")
            .with_text("Summer sale", "Everything 30% off through Sunday", "Shop now"),
        ComposeRequest::new("meme", "tiktok")
            .with_text(
                "when the coffee hits",
                "Fresh roasted beans delivered every Monday ☕",
                "Try it free",
            )
            .with_image("demo://photo.png")
            .with_style(button.clone()),
        ComposeRequest::new("split", "facebook_feed")
            .with_text("New in", "Linen shirts for warm evenings", "Browse")
            .with_image("demo://photo.png"),
        ComposeRequest::new("modern", "instagram_story")
            .with_text("Launch week", "Three drops. Seven days.", "Get notified")
            .with_style(StyleOptions {
                theme: Some("neon".into()),
                ..button
            }),
    ];

    for request in &requests {
        let timer = std::time::Instant::now();
        let image = compositor.compose(request).unwrap();
        let path = format!("debug/{}_{}.png", request.format, request.output_size);
        std::fs::write(&path, &image.png).expect("failed to save creative");
        println!(
            "{}: {}x{} in {:.2?} -> {}",
            request.format,
            image.width,
            image.height,
            timer.elapsed(),
            path
        );
    }

    let variations: Vec<TextVariation> = ["First", "Second", "Third"]
        .iter()
        .map(|hook| TextVariation {
            hook: hook.to_string(),
            body: "Same photo, different words".into(),
            cta: "Learn more".into(),
        })
        .collect();
    let timer = std::time::Instant::now();
    let batch = compositor
        .compose_many(Some(&photo), &variations, &BatchOptions::default())
        .unwrap();
    println!("batch of {} in {:.2?}", batch.len(), timer.elapsed());
    for (i, result) in batch.into_iter().enumerate() {
        let path = format!("debug/batch_{i}.png");
        std::fs::write(&path, result.unwrap().png).expect("failed to save creative");
    }
}
