//! Resolved font handles.
//!
//! A [`Font`] is either an outline face parsed by `fontdue` or the built-in
//! bitmap font, always bound to one pixel size. Both expose the same metrics
//! so the measurer and renderer never branch on where a font came from.

pub mod builtin;
mod resolver;

pub use resolver::FontResolver;

use std::{fmt, sync::Arc};

use crate::glyph_id::GlyphId;

/// Font face bound to a pixel size. Cheap to clone.
#[derive(Clone)]
pub struct Font {
    family: Arc<str>,
    size: f32,
    face: FontFace,
}

#[derive(Clone)]
pub(crate) enum FontFace {
    Outline {
        id: fontdb::ID,
        font: Arc<fontdue::Font>,
        line_metrics: fontdue::LineMetrics,
    },
    Builtin {
        scale: u32,
    },
}

/// Glyph placed relative to the top-left corner of a line box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct PlacedGlyph {
    pub x: f32,
    pub y: f32,
    pub kind: GlyphKind,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum GlyphKind {
    Outline(GlyphId),
    Builtin { ch: char, scale: u32 },
}

impl Font {
    /// Binds an outline face to `size`. Returns `None` for faces without
    /// horizontal metrics.
    pub(crate) fn outline(
        family: Arc<str>,
        id: fontdb::ID,
        font: Arc<fontdue::Font>,
        size: f32,
    ) -> Option<Self> {
        let line_metrics = font.horizontal_line_metrics(size)?;
        Some(Self {
            family,
            size,
            face: FontFace::Outline {
                id,
                font,
                line_metrics,
            },
        })
    }

    /// The built-in bitmap font scaled as close to `size` as integer scaling allows.
    pub fn builtin(size: f32) -> Self {
        let size = size.max(1.0);
        Self {
            family: Arc::from(builtin::FAMILY),
            size,
            face: FontFace::Builtin {
                scale: builtin::scale_for(size),
            },
        }
    }

    /// Logical family this font was resolved for.
    pub fn family(&self) -> &str {
        &self.family
    }

    /// Requested pixel size.
    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self.face, FontFace::Builtin { .. })
    }

    /// Distance from the top of the line box to the baseline.
    pub fn ascent(&self) -> f32 {
        match &self.face {
            FontFace::Outline { line_metrics, .. } => line_metrics.ascent,
            FontFace::Builtin { scale } => (builtin::ASCENT_ROWS * scale) as f32,
        }
    }

    /// Distance from the baseline to the bottom of the line box (positive).
    pub fn descent(&self) -> f32 {
        match &self.face {
            FontFace::Outline { line_metrics, .. } => -line_metrics.descent,
            FontFace::Builtin { scale } => (builtin::DESCENT_ROWS * scale) as f32,
        }
    }

    /// Height of one line box, without extra line spacing.
    pub fn line_height(&self) -> f32 {
        (self.ascent() + self.descent()).max(1.0)
    }

    /// Kerned advance width of `text` drawn with this font.
    pub fn advance_width(&self, text: &str) -> f32 {
        match &self.face {
            FontFace::Outline { font, .. } => {
                let mut width = 0.0;
                let mut previous: Option<u16> = None;
                for ch in text.chars() {
                    let glyph_idx = font.lookup_glyph_index(ch);
                    if let Some(prev) = previous {
                        width += font
                            .horizontal_kern_indexed(prev, glyph_idx, self.size)
                            .unwrap_or(0.0);
                    }
                    width += font.metrics_indexed(glyph_idx, self.size).advance_width;
                    previous = Some(glyph_idx);
                }
                width
            }
            FontFace::Builtin { scale } => {
                (text.chars().count() as u32 * builtin::CELL_WIDTH * scale) as f32
            }
        }
    }

    pub(crate) fn outline_font(&self) -> Option<&Arc<fontdue::Font>> {
        match &self.face {
            FontFace::Outline { font, .. } => Some(font),
            FontFace::Builtin { .. } => None,
        }
    }

    /// Places every glyph of `text` relative to the line box's top-left corner.
    ///
    /// Outline glyphs carry the top-left corner of their coverage bitmap,
    /// built-in glyphs the top-left corner of their cell.
    pub(crate) fn place_glyphs(&self, text: &str) -> Vec<PlacedGlyph> {
        let mut placed = Vec::with_capacity(text.len());
        match &self.face {
            FontFace::Outline { id, font, .. } => {
                let baseline = self.ascent();
                let mut pen_x = 0.0;
                let mut previous: Option<u16> = None;
                for ch in text.chars() {
                    let glyph_idx = font.lookup_glyph_index(ch);
                    if let Some(prev) = previous {
                        pen_x += font
                            .horizontal_kern_indexed(prev, glyph_idx, self.size)
                            .unwrap_or(0.0);
                    }
                    let metrics = font.metrics_indexed(glyph_idx, self.size);
                    if metrics.width > 0 && metrics.height > 0 {
                        placed.push(PlacedGlyph {
                            x: pen_x + metrics.xmin as f32,
                            y: baseline - (metrics.ymin as f32 + metrics.height as f32),
                            kind: GlyphKind::Outline(GlyphId::new(*id, glyph_idx, self.size)),
                        });
                    }
                    pen_x += metrics.advance_width;
                    previous = Some(glyph_idx);
                }
            }
            FontFace::Builtin { scale } => {
                let cell = (builtin::CELL_WIDTH * scale) as f32;
                for (i, ch) in text.chars().enumerate() {
                    if ch.is_whitespace() {
                        continue;
                    }
                    placed.push(PlacedGlyph {
                        x: i as f32 * cell,
                        y: *scale as f32,
                        kind: GlyphKind::Builtin { ch, scale: *scale },
                    });
                }
            }
        }
        placed
    }
}

impl fmt::Debug for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let face = match &self.face {
            FontFace::Outline { id, .. } => format!("outline({id:?})"),
            FontFace::Builtin { scale } => format!("builtin(x{scale})"),
        };
        f.debug_struct("Font")
            .field("family", &self.family)
            .field("size", &self.size)
            .field("face", &face)
            .finish()
    }
}
