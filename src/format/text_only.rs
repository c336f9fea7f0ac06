use image::{Rgba, RgbaImage};

use super::{FormatStrategy, Job};
use crate::{
    error::Result,
    layout::distribute_evenly,
    renderer::color::{BLACK, WHITE},
    request::TextEffect,
};

const BODY_GRAY: Rgba<u8> = Rgba([0x33, 0x33, 0x33, 0xFF]);

pub(crate) struct TextOnly;

impl FormatStrategy for TextOnly {
    fn render(&self, job: &Job<'_>) -> Result<RgbaImage> {
        let mut canvas = job.blank_canvas(WHITE);
        let palette = job.palette(BLACK, BODY_GRAY, BLACK)?;
        let content = job.content_rect();

        let hook = job.hook_text(false);
        let requests = [
            job.hook_request(&hook),
            job.body_request(),
            job.cta_request(job.button_cta()),
        ];
        let stack = distribute_evenly(
            &job.sizing(),
            &requests,
            content,
            &job.compositor.config().layout.even,
        );

        let effect = job.style.text_effect.unwrap_or(TextEffect::Plain);
        job.paint_blocks(&mut canvas, &stack.blocks, content, &palette, effect)?;
        Ok(canvas)
    }
}
