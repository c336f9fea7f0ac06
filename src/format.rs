//! Composition formats and the helpers they share.

mod meme;
mod modern;
mod split;
mod stickers;
mod text_only;
mod theme;

pub use theme::{Accent, Background, ColorScheme, GradientStops, Theme};

use std::str::FromStr;

use image::{Rgba, RgbaImage};

use crate::{
    compositor::Compositor,
    error::{ComposeError, Result},
    layout::{BlockRequest, PlacedBlock, Rect, SizingContext, resolve_safe_zone, scale_factor},
    presets::OutputSize,
    renderer::{
        Fill, TextStyle,
        color::{BLACK, WHITE, color_or, parse_color},
        vibrant_color,
    },
    request::{ButtonColor, CtaStyle, StyleOptions, TextEffect},
    text::BlockRole,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FormatType {
    /// Text on a white canvas.
    TextOnly,
    /// Outlined text over a photo.
    Meme,
    /// Text between corner stickers.
    Stickers,
    /// Photo left, text panel right, angled divider.
    Split,
    /// Themed colors with glow, stroke or shadow effects.
    Modern,
}

impl FormatType {
    pub fn name(self) -> &'static str {
        match self {
            FormatType::TextOnly => "text_only",
            FormatType::Meme => "meme",
            FormatType::Stickers => "stickers",
            FormatType::Split => "split",
            FormatType::Modern => "modern",
        }
    }

    /// Formats that fail without a background photo.
    pub fn requires_image(self) -> bool {
        matches!(self, FormatType::Meme | FormatType::Split)
    }

    /// Formats that draw a background photo when one is given.
    pub fn uses_image(self) -> bool {
        self.requires_image() || self == FormatType::Modern
    }

    pub(crate) fn strategy(self) -> &'static dyn FormatStrategy {
        match self {
            FormatType::TextOnly => &text_only::TextOnly,
            FormatType::Meme => &meme::Meme,
            FormatType::Stickers => &stickers::Stickers,
            FormatType::Split => &split::Split,
            FormatType::Modern => &modern::Modern,
        }
    }
}

impl FromStr for FormatType {
    type Err = ComposeError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text_only" => Ok(FormatType::TextOnly),
            "meme" => Ok(FormatType::Meme),
            "stickers" => Ok(FormatType::Stickers),
            "split" => Ok(FormatType::Split),
            "modern" => Ok(FormatType::Modern),
            _ => Err(ComposeError::UnknownFormat(value.to_string())),
        }
    }
}

/// Renders one job into a fresh canvas of the job's output size.
pub(crate) trait FormatStrategy: Sync {
    fn render(&self, job: &Job<'_>) -> Result<RgbaImage>;
}

/// Inputs of a single composition, borrowed from the caller.
pub(crate) struct Job<'a> {
    pub compositor: &'a Compositor,
    pub format: FormatType,
    pub hook: &'a str,
    pub body: &'a str,
    pub cta: &'a str,
    pub style: &'a StyleOptions,
    pub size: OutputSize,
    /// Decoded photo. Never mutated; formats draw resized copies.
    pub background: Option<&'a RgbaImage>,
}

/// Fill colors of the three blocks.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Palette {
    pub hook: Rgba<u8>,
    pub body: Rgba<u8>,
    pub cta: Rgba<u8>,
}

impl Palette {
    fn for_role(&self, role: BlockRole) -> Rgba<u8> {
        match role {
            BlockRole::Hook => self.hook,
            BlockRole::Body => self.body,
            BlockRole::Cta => self.cta,
        }
    }
}

impl Job<'_> {
    pub fn scale(&self) -> f32 {
        scale_factor(
            self.size.width,
            self.size.height,
            self.compositor.config().layout.reference_size,
        )
    }

    /// Scales a pixel constant to this canvas.
    pub fn px(&self, value: f32) -> u32 {
        (value * self.scale()).round().max(0.0) as u32
    }

    pub fn sizing(&self) -> SizingContext<'_> {
        SizingContext {
            resolver: self.compositor.fonts(),
            measurer: self.compositor.renderer().measurer(),
            scale: self.scale(),
        }
    }

    pub fn content_rect(&self) -> Rect {
        resolve_safe_zone(self.size.name, &self.style.safe_zone)
            .content_rect(self.size.width, self.size.height)
    }

    pub fn blank_canvas(&self, color: Rgba<u8>) -> RgbaImage {
        RgbaImage::from_pixel(self.size.width, self.size.height, color)
    }

    /// Hook text, upper-cased when asked or when the format does by default.
    pub fn hook_text(&self, uppercase_by_default: bool) -> String {
        if self.style.uppercase_hook.unwrap_or(uppercase_by_default) {
            self.hook.to_uppercase()
        } else {
            self.hook.to_string()
        }
    }

    pub fn button_cta(&self) -> bool {
        self.style.cta_style == CtaStyle::Button
    }

    pub fn hook_request<'s>(&'s self, hook: &'s str) -> BlockRequest<'s> {
        BlockRequest::new(BlockRole::Hook, hook, self.style.hook_font())
    }

    pub fn body_request(&self) -> BlockRequest<'_> {
        BlockRequest::new(BlockRole::Body, self.body, self.style.body_font())
    }

    /// CTA request, padded when drawn as a button.
    pub fn cta_request(&self, button: bool) -> BlockRequest<'_> {
        let request = BlockRequest::new(BlockRole::Cta, self.cta, &self.style.font);
        if button {
            let layout = &self.compositor.config().layout;
            request.with_padding(
                2 * self.px(layout.button_padding_x),
                2 * self.px(layout.button_padding_y),
            )
        } else {
            request
        }
    }

    /// Palette from the style's colors over the format's defaults.
    pub fn palette(&self, hook: Rgba<u8>, body: Rgba<u8>, cta: Rgba<u8>) -> Result<Palette> {
        let text = self.style.text_color.as_deref();
        Ok(Palette {
            hook: color_or(self.style.hook_color.as_deref().or(text), hook)?,
            body: color_or(text, body)?,
            cta: color_or(text, cta)?,
        })
    }

    pub fn text_style(&self, effect: TextEffect, fill: Rgba<u8>) -> Result<TextStyle> {
        let layout = &self.compositor.config().layout;
        let accent = color_or(self.style.outline_color.as_deref(), BLACK)?;
        Ok(match effect {
            TextEffect::Plain => TextStyle::Plain { fill },
            TextEffect::Outline => TextStyle::Outline {
                fill,
                outline: accent,
                radius: self.px(layout.outline_width).max(1),
            },
            TextEffect::Shadow => TextStyle::Shadow {
                fill,
                shadow: accent,
                offset: self.px(layout.shadow_offset).max(1) as i32,
            },
        })
    }

    /// Button fill: explicit color, or the most vibrant color of `sample`.
    pub fn button_fill(&self, sample: &RgbaImage) -> Result<Fill> {
        match &self.style.cta_color {
            ButtonColor::Explicit(color) => Ok(Fill::Solid(parse_color(color)?)),
            ButtonColor::Auto => Ok(Fill::Solid(vibrant_color(sample))),
        }
    }

    /// Paints placed blocks with one effect. A button CTA is drawn as a pill
    /// whose auto color is sampled from the background photo, or from the
    /// canvas when there is none.
    pub fn paint_blocks<'b>(
        &self,
        canvas: &mut RgbaImage,
        blocks: impl IntoIterator<Item = &'b PlacedBlock>,
        area: Rect,
        palette: &Palette,
        effect: TextEffect,
    ) -> Result<()> {
        let renderer = self.compositor.renderer();
        let button = if self.button_cta() {
            Some(self.button_fill(self.background.unwrap_or(&*canvas))?)
        } else {
            None
        };

        for placed in blocks {
            let role = placed.block.role();
            match button {
                Some(fill) if role == BlockRole::Cta => {
                    let padding_x = self.px(self.compositor.config().layout.button_padding_x);
                    renderer.draw_button(canvas, placed, area.center_x(), padding_x, fill, WHITE);
                }
                _ => {
                    let style = self.text_style(effect, palette.for_role(role))?;
                    renderer.draw_block(canvas, placed, area, self.style.align, &style);
                }
            }
        }
        Ok(())
    }
}
