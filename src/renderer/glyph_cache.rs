use std::{collections::HashMap, sync::Arc};

use parking_lot::Mutex;

use crate::glyph_id::GlyphId;

/// Coverage bitmap of one rasterized outline glyph.
///
/// Row-major, origin at the top-left, one byte per pixel where `0` is empty
/// and `255` fully covered.
#[derive(Debug, PartialEq, Eq)]
pub struct RasterGlyph {
    pub width: usize,
    pub height: usize,
    pub coverage: Vec<u8>,
}

/// Process-wide cache of rasterized outline glyphs.
///
/// Entries are keyed by font, glyph and quantized size. When the cache grows
/// past its capacity it is emptied and refilled on demand.
pub struct GlyphCache {
    capacity: usize,
    glyphs: Mutex<HashMap<GlyphId, Arc<RasterGlyph>, fxhash::FxBuildHasher>>,
}

impl GlyphCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            glyphs: Mutex::new(HashMap::with_hasher(fxhash::FxBuildHasher::default())),
        }
    }

    /// Returns the bitmap for `glyph_id`, rasterizing it with `font` on a miss.
    ///
    /// Rasterization runs without holding the lock. Two threads missing the
    /// same glyph both rasterize it and the second insert wins, which is
    /// harmless since both produce the same bitmap.
    pub fn get(&self, glyph_id: GlyphId, font: &fontdue::Font) -> Arc<RasterGlyph> {
        if let Some(cached) = self.glyphs.lock().get(&glyph_id) {
            return Arc::clone(cached);
        }

        let (metrics, coverage) =
            font.rasterize_indexed(glyph_id.glyph_index(), glyph_id.font_size());
        let glyph = Arc::new(RasterGlyph {
            width: metrics.width,
            height: metrics.height,
            coverage,
        });

        let mut glyphs = self.glyphs.lock();
        if glyphs.len() >= self.capacity {
            log::debug!("glyph cache reached {} entries, clearing", glyphs.len());
            glyphs.clear();
        }
        glyphs.insert(glyph_id, Arc::clone(&glyph));
        glyph
    }

    pub fn len(&self) -> usize {
        self.glyphs.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.lock().is_empty()
    }

    pub fn clear(&self) {
        self.glyphs.lock().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_is_at_least_one() {
        let cache = GlyphCache::new(0);
        assert_eq!(cache.capacity, 1);
        assert!(cache.is_empty());
    }
}
