use std::{collections::HashMap, sync::Arc};

use image::{RgbaImage, imageops::FilterType};
use parking_lot::RwLock;

use crate::{config::FetchConfig, fetch::ImageFetcher, text::symbol_code};

type SymbolMap<K> = RwLock<HashMap<K, Option<Arc<RgbaImage>>, fxhash::FxBuildHasher>>;

/// Emoji bitmaps fetched by code point sequence and scaled to square sides.
///
/// Failures are cached too, so an unavailable symbol is requested once per
/// process and then skipped.
pub struct SymbolCache {
    fetcher: Arc<dyn ImageFetcher>,
    url_template: String,
    sources: SymbolMap<String>,
    scaled: SymbolMap<(String, u32)>,
}

impl SymbolCache {
    pub fn new(fetcher: Arc<dyn ImageFetcher>, config: &FetchConfig) -> Self {
        Self {
            fetcher,
            url_template: config.symbol_url_template.clone(),
            sources: RwLock::new(HashMap::with_hasher(fxhash::FxBuildHasher::default())),
            scaled: RwLock::new(HashMap::with_hasher(fxhash::FxBuildHasher::default())),
        }
    }

    /// URL the bitmap of `cluster` is fetched from.
    pub fn url_for(&self, cluster: &str) -> String {
        self.url_template.replace("{code}", &symbol_code(cluster))
    }

    /// Bitmap of `cluster` scaled to `side` x `side`, if it can be fetched.
    pub fn get(&self, cluster: &str, side: u32) -> Option<Arc<RgbaImage>> {
        let code = symbol_code(cluster);
        let key = (code, side.max(1));
        if let Some(cached) = self.scaled.read().get(&key) {
            return cached.clone();
        }

        let scaled = self.source(&key.0).map(|source| {
            Arc::new(image::imageops::resize(
                source.as_ref(),
                key.1,
                key.1,
                FilterType::Lanczos3,
            ))
        });
        self.scaled.write().insert(key, scaled.clone());
        scaled
    }

    fn source(&self, code: &str) -> Option<Arc<RgbaImage>> {
        if let Some(cached) = self.sources.read().get(code) {
            return cached.clone();
        }

        let url = self.url_template.replace("{code}", code);
        let source = match self.fetcher.fetch(&url) {
            Ok(bytes) => match image::load_from_memory(&bytes) {
                Ok(decoded) => Some(Arc::new(decoded.to_rgba8())),
                Err(e) => {
                    log::warn!("symbol {} from {} is not an image: {}", code, url, e);
                    None
                }
            },
            Err(e) => {
                log::warn!("symbol {} unavailable from {}: {}", code, url, e);
                None
            }
        };
        self.sources.write().insert(code.to_string(), source.clone());
        source
    }
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::FetchError, fetch::StaticFetcher};
    use std::{
        io::Cursor,
        sync::atomic::{AtomicUsize, Ordering},
    };

    struct CountingFetcher {
        inner: StaticFetcher,
        calls: AtomicUsize,
    }

    impl ImageFetcher for CountingFetcher {
        fn fetch(&self, source: &str) -> Result<Vec<u8>, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.fetch(source)
        }
    }

    fn png(side: u32) -> Vec<u8> {
        let image = RgbaImage::from_pixel(side, side, image::Rgba([255, 0, 0, 255]));
        let mut bytes = Cursor::new(Vec::new());
        image.write_to(&mut bytes, image::ImageFormat::Png).unwrap();
        bytes.into_inner()
    }

    fn config() -> FetchConfig {
        FetchConfig {
            symbol_url_template: "mem://emoji/{code}.png".into(),
            ..FetchConfig::default()
        }
    }

    #[test]
    fn test_fetches_and_scales_once() {
        let fetcher = Arc::new(CountingFetcher {
            inner: StaticFetcher::new().with("mem://emoji/1f525.png", png(72)),
            calls: AtomicUsize::new(0),
        });
        let cache = SymbolCache::new(fetcher.clone(), &config());

        let fire = cache.get("🔥", 38).unwrap();
        assert_eq!(fire.dimensions(), (38, 38));
        assert!(cache.get("🔥", 38).is_some());
        assert_eq!(cache.get("🔥", 20).unwrap().dimensions(), (20, 20));
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_failures_are_remembered() {
        let fetcher = Arc::new(CountingFetcher {
            inner: StaticFetcher::new().with("mem://emoji/1f389.png", b"not a png".to_vec()),
            calls: AtomicUsize::new(0),
        });
        let cache = SymbolCache::new(fetcher.clone(), &config());

        assert!(cache.get("🎉", 30).is_none());
        assert!(cache.get("🎉", 40).is_none());
        assert!(cache.get("🚀", 30).is_none());
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 2);
        assert_eq!(cache.url_for("🚀"), "mem://emoji/1f680.png");
    }
}
