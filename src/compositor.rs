use std::{io::Cursor, sync::Arc};

use image::{ImageFormat, RgbaImage};
use rayon::prelude::*;

use crate::{
    config::EngineConfig,
    error::{ComposeError, FetchError, Result},
    fetch::{HttpFetcher, ImageFetcher},
    font::FontResolver,
    format::{FormatType, Job},
    presets::OutputSize,
    renderer::Renderer,
    request::{BatchOptions, ComposeRequest, StyleOptions, TextVariation, parse_variations},
};

/// Encoded output of one composition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComposedImage {
    /// PNG bytes.
    pub png: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Entry point of the engine.
///
/// Coordinates the font resolver, the renderer with its caches and the image
/// fetcher. All of them are internally synchronized, so one compositor can
/// serve any number of concurrent compose calls.
pub struct Compositor {
    config: EngineConfig,
    fonts: FontResolver,
    renderer: Renderer,
    fetcher: Arc<dyn ImageFetcher>,
}

impl Compositor {
    /// Creates a compositor fetching images over HTTP and from local files.
    pub fn new(config: EngineConfig) -> std::result::Result<Self, FetchError> {
        let fetcher = HttpFetcher::new(&config.fetch)?;
        Ok(Self::with_fetcher(config, Arc::new(fetcher)))
    }

    /// Creates a compositor that loads every image through `fetcher`.
    pub fn with_fetcher(config: EngineConfig, fetcher: Arc<dyn ImageFetcher>) -> Self {
        Self {
            fonts: FontResolver::new(config.fonts.clone()),
            renderer: Renderer::new(&config, Arc::clone(&fetcher)),
            fetcher,
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn fonts(&self) -> &FontResolver {
        &self.fonts
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn fetcher(&self) -> &dyn ImageFetcher {
        self.fetcher.as_ref()
    }
}

/// Composition
impl Compositor {
    /// Composes one creative.
    ///
    /// Unknown output sizes and safe zones are substituted with defaults.
    /// Unknown formats, missing or unreadable mandatory photos and invalid
    /// colors are errors. Text that does not fit is never an error.
    pub fn compose(&self, request: &ComposeRequest) -> Result<ComposedImage> {
        let format: FormatType = request.format.parse()?;
        let size = OutputSize::resolve(&request.output_size);

        let background = match &request.image_source {
            Some(source) if format.uses_image() => Some(self.load_background(source)?),
            Some(source) => {
                log::debug!("{} ignores the image {}", format.name(), source);
                None
            }
            None => None,
        };
        if format.requires_image() && background.is_none() {
            return Err(ComposeError::MissingImage(format.name()));
        }

        self.render(
            format,
            size,
            background.as_ref(),
            &TextVariation {
                hook: request.hook.clone(),
                body: request.body.clone(),
                cta: request.cta.clone(),
            },
            &request.style,
        )
    }

    /// Composes one creative per variation over the same base image.
    ///
    /// The base image is decoded once and shared read-only. Variations run in
    /// parallel; results come back in input order. Invalid shared inputs fail
    /// the whole batch before anything is rendered.
    pub fn compose_many(
        &self,
        base_image: Option<&[u8]>,
        variations: &[TextVariation],
        options: &BatchOptions,
    ) -> Result<Vec<Result<ComposedImage>>> {
        let format: FormatType = options.format.parse()?;
        let size = OutputSize::resolve(&options.output_size);

        let background = match base_image {
            Some(bytes) if format.uses_image() => {
                Some(Arc::new(decode(bytes, "base image")?))
            }
            _ => None,
        };
        if format.requires_image() && background.is_none() {
            return Err(ComposeError::MissingImage(format.name()));
        }

        log::debug!(
            "composing {} {} variations at {}",
            variations.len(),
            format.name(),
            size.name
        );
        Ok(variations
            .par_iter()
            .map(|variation| {
                self.render(format, size, background.as_deref(), variation, &options.style)
            })
            .collect())
    }

    /// [`Compositor::compose_many`] over a JSON array of variations.
    pub fn compose_many_json(
        &self,
        base_image: Option<&[u8]>,
        variations_json: &str,
        options: &BatchOptions,
    ) -> Result<Vec<Result<ComposedImage>>> {
        let variations = parse_variations(variations_json)?;
        self.compose_many(base_image, &variations, options)
    }

    fn load_background(&self, source: &str) -> Result<RgbaImage> {
        let bytes = self
            .fetcher
            .fetch(source)
            .map_err(ComposeError::BackgroundFetch)?;
        decode(&bytes, source)
    }

    fn render(
        &self,
        format: FormatType,
        size: OutputSize,
        background: Option<&RgbaImage>,
        text: &TextVariation,
        style: &StyleOptions,
    ) -> Result<ComposedImage> {
        let job = Job {
            compositor: self,
            format,
            hook: &text.hook,
            body: &text.body,
            cta: &text.cta,
            style,
            size,
            background,
        };
        let canvas = format.strategy().render(&job)?;
        encode(&canvas)
    }
}

fn decode(bytes: &[u8], source_name: &str) -> Result<RgbaImage> {
    image::load_from_memory(bytes)
        .map(|image| image.to_rgba8())
        .map_err(|e| ComposeError::ImageDecode {
            source_name: source_name.to_string(),
            reason: e.to_string(),
        })
}

fn encode(canvas: &RgbaImage) -> Result<ComposedImage> {
    let mut png = Cursor::new(Vec::new());
    canvas.write_to(&mut png, ImageFormat::Png)?;
    Ok(ComposedImage {
        png: png.into_inner(),
        width: canvas.width(),
        height: canvas.height(),
    })
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::StaticFetcher;

    fn compositor(fetcher: StaticFetcher) -> Compositor {
        Compositor::with_fetcher(EngineConfig::builtin_fonts(), Arc::new(fetcher))
    }

    #[test]
    fn test_unknown_format_fails_fast() {
        let compositor = compositor(StaticFetcher::new());
        let request = ComposeRequest::new("carousel", "tiktok").with_text("hi", "", "");
        assert!(matches!(
            compositor.compose(&request),
            Err(ComposeError::UnknownFormat(_))
        ));
    }

    #[test]
    fn test_missing_background_is_an_error() {
        let compositor = compositor(StaticFetcher::new());
        let request = ComposeRequest::new("meme", "tiktok").with_text("hi", "", "");
        assert!(matches!(
            compositor.compose(&request),
            Err(ComposeError::MissingImage("meme"))
        ));

        let unreachable = request.with_image("mem://nowhere.png");
        assert!(matches!(
            compositor.compose(&unreachable),
            Err(ComposeError::BackgroundFetch(FetchError::NotFound(_)))
        ));
    }

    #[test]
    fn test_undecodable_background() {
        let compositor = compositor(StaticFetcher::new().with("mem://bad", b"garbage".to_vec()));
        let request = ComposeRequest::new("split", "instagram_square")
            .with_text("hi", "", "")
            .with_image("mem://bad");
        assert!(matches!(
            compositor.compose(&request),
            Err(ComposeError::ImageDecode { source_name, .. }) if source_name == "mem://bad"
        ));
    }

    #[test]
    fn test_unknown_size_falls_back() {
        let compositor = compositor(StaticFetcher::new());
        let request = ComposeRequest::new("text_only", "billboard").with_text("hi", "", "");
        let image = compositor.compose(&request).unwrap();
        assert_eq!((image.width, image.height), (1080, 1080));
    }

    #[test]
    fn test_invalid_color_is_reported() {
        let compositor = compositor(StaticFetcher::new());
        let style = StyleOptions {
            text_color: Some("#nothex".into()),
            ..StyleOptions::default()
        };
        let request = ComposeRequest::new("text_only", "telegram")
            .with_text("hi", "", "")
            .with_style(style);
        assert!(matches!(
            compositor.compose(&request),
            Err(ComposeError::InvalidColor(_))
        ));
    }

    #[test]
    fn test_batch_rejects_bad_json_before_rendering() {
        let compositor = compositor(StaticFetcher::new());
        let options = BatchOptions {
            format: "text_only".into(),
            ..BatchOptions::default()
        };
        assert!(matches!(
            compositor.compose_many_json(None, r#"{"hook":"x"}"#, &options),
            Err(ComposeError::InvalidVariations(_))
        ));
    }
}
