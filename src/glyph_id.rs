/// Font sizes are quantized to 1/64 px before they become part of a cache key.
pub const SIZE_QUANTIZE: f32 = 64f32;

/// Key of one rasterized outline glyph in the glyph cache.
///
/// Ids are only meaningful within one `FontStorage`; they are not stable across runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GlyphId {
    font_id: fontdb::ID,
    glyph_index: u16,
    font_size: u32,
}

impl GlyphId {
    pub fn new(font_id: fontdb::ID, glyph_index: u16, font_size: f32) -> Self {
        Self {
            font_id,
            glyph_index,
            font_size: (font_size.max(0.0) * SIZE_QUANTIZE).round() as u32,
        }
    }

    pub fn font_id(&self) -> fontdb::ID {
        self.font_id
    }

    pub fn glyph_index(&self) -> u16 {
        self.glyph_index
    }

    /// The quantized size the glyph is rasterized at.
    pub fn font_size(&self) -> f32 {
        self.font_size as f32 / SIZE_QUANTIZE
    }
}
