use super::measure::Measurer;
use crate::font::Font;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BlockRole {
    Hook,
    Body,
    Cta,
}

impl BlockRole {
    pub const ALL: [BlockRole; 3] = [BlockRole::Hook, BlockRole::Body, BlockRole::Cta];
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MeasuredLine {
    pub text: String,
    pub width: u32,
    pub height: u32,
}

/// One wrapped and measured text block.
///
/// Immutable once built. Its height is the sum of its line heights, the
/// spacing between consecutive lines, and any extra height (button padding).
#[derive(Clone, Debug)]
pub struct TextBlock {
    role: BlockRole,
    font: Font,
    lines: Vec<MeasuredLine>,
    line_spacing: u32,
    extra_height: u32,
}

impl TextBlock {
    pub fn new(
        role: BlockRole,
        text: &str,
        font: Font,
        measurer: &Measurer,
        max_width: u32,
        line_spacing: u32,
        extra_height: u32,
    ) -> Self {
        let line_height = font.line_height().ceil() as u32;
        let lines = measurer
            .wrap(text, &font, max_width)
            .into_iter()
            .map(|text| MeasuredLine {
                width: measurer.measure_width(&text, &font),
                height: line_height,
                text,
            })
            .collect();

        Self {
            role,
            font,
            lines,
            line_spacing,
            extra_height,
        }
    }

    pub fn role(&self) -> BlockRole {
        self.role
    }

    pub fn font(&self) -> &Font {
        &self.font
    }

    pub fn lines(&self) -> &[MeasuredLine] {
        &self.lines
    }

    pub fn line_spacing(&self) -> u32 {
        self.line_spacing
    }

    pub fn extra_height(&self) -> u32 {
        self.extra_height
    }

    /// Blocks without lines take no space and are skipped by layout.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Width of the widest line.
    pub fn width(&self) -> u32 {
        self.lines.iter().map(|line| line.width).max().unwrap_or(0)
    }

    /// Height of the text alone, without extra height.
    pub fn text_height(&self) -> u32 {
        if self.lines.is_empty() {
            return 0;
        }
        let lines: u32 = self.lines.iter().map(|line| line.height).sum();
        lines + self.line_spacing * (self.lines.len() as u32 - 1)
    }

    pub fn height(&self) -> u32 {
        if self.lines.is_empty() {
            return 0;
        }
        self.text_height() + self.extra_height
    }

    /// Offset of each line's top from the top of the text.
    pub fn line_offsets(&self) -> impl Iterator<Item = (u32, &MeasuredLine)> {
        let spacing = self.line_spacing;
        self.lines.iter().scan(0u32, move |top, line| {
            let offset = *top;
            *top += line.height + spacing;
            Some((offset, line))
        })
    }
}
