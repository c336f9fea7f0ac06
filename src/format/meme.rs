use image::RgbaImage;

use super::{FormatStrategy, Job};
use crate::{
    error::{ComposeError, Result},
    layout::anchor_shrink,
    renderer::{
        color::WHITE,
        composite::{cover_resize, darken},
    },
    request::TextEffect,
};

pub(crate) struct Meme;

impl FormatStrategy for Meme {
    fn render(&self, job: &Job<'_>) -> Result<RgbaImage> {
        let photo = job
            .background
            .ok_or(ComposeError::MissingImage(job.format.name()))?;
        let mut canvas = cover_resize(photo, job.size.width, job.size.height);
        if let Some(factor) = job.style.darken {
            darken(&mut canvas, factor);
        }

        let palette = job.palette(WHITE, WHITE, WHITE)?;
        let content = job.content_rect();

        let hook = job.hook_text(true);
        let layout = anchor_shrink(
            &job.sizing(),
            Some(job.hook_request(&hook)),
            Some(job.body_request()),
            Some(job.cta_request(job.button_cta())),
            content,
            job.size.height,
            &job.compositor.config().layout.anchored,
        );

        let effect = job.style.text_effect.unwrap_or(TextEffect::Outline);
        job.paint_blocks(
            &mut canvas,
            layout.hook.iter().chain(&layout.bottom),
            content,
            &palette,
            effect,
        )?;
        Ok(canvas)
    }
}
