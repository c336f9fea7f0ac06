//! Pixel painting: styled text, emoji symbols, CTA buttons and image
//! compositing onto an RGBA canvas.

pub mod button;
pub mod color;
pub mod composite;
mod glyph_cache;
mod mask;
mod paint;
mod symbols;

use std::sync::Arc;

pub use button::{FALLBACK_BUTTON_COLOR, Fill, vibrant_color};
pub use glyph_cache::{GlyphCache, RasterGlyph};
pub use paint::{HorizontalAlign, TextStyle};
pub use symbols::SymbolCache;

use crate::{config::EngineConfig, fetch::ImageFetcher, text::Measurer};

/// Draws text and decorations onto canvases.
///
/// Holds the process-wide glyph and symbol caches; share one renderer across
/// compose calls and threads.
pub struct Renderer {
    glyphs: GlyphCache,
    symbols: SymbolCache,
    measurer: Measurer,
}

impl Renderer {
    pub fn new(config: &EngineConfig, fetcher: Arc<dyn ImageFetcher>) -> Self {
        Self {
            glyphs: GlyphCache::new(config.fetch.glyph_cache_capacity),
            symbols: SymbolCache::new(fetcher, &config.fetch),
            measurer: Measurer::new(config.layout.symbol_ratio),
        }
    }

    pub fn measurer(&self) -> &Measurer {
        &self.measurer
    }

    pub fn glyph_cache(&self) -> &GlyphCache {
        &self.glyphs
    }

    pub fn symbol_cache(&self) -> &SymbolCache {
        &self.symbols
    }
}
