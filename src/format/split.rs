use image::{Rgba, RgbaImage};

use super::{FormatStrategy, Job};
use crate::{
    error::{ComposeError, Result},
    layout::{Rect, distribute_evenly},
    renderer::{
        color::{BLACK, WHITE, color_or},
        composite::{SplitDivider, paste_left_of},
    },
    request::TextEffect,
};

const BODY_GRAY: Rgba<u8> = Rgba([0x33, 0x33, 0x33, 0xFF]);

pub(crate) struct Split;

impl FormatStrategy for Split {
    fn render(&self, job: &Job<'_>) -> Result<RgbaImage> {
        let photo = job
            .background
            .ok_or(ComposeError::MissingImage(job.format.name()))?;
        let panel = color_or(job.style.panel_color.as_deref(), WHITE)?;
        let mut canvas = job.blank_canvas(panel);

        let divider = SplitDivider::new(job.size.width, job.size.height, job.style.divider_angle);
        paste_left_of(&mut canvas, photo, &divider);

        let content = job.content_rect();
        let panel_left = (divider.max_x().ceil() as u32 + content.x).min(content.right());
        let area = Rect::new(
            panel_left,
            content.y,
            content.right() - panel_left,
            content.height,
        );

        let palette = job.palette(BLACK, BODY_GRAY, BLACK)?;
        let hook = job.hook_text(false);
        let requests = [
            job.hook_request(&hook),
            job.body_request(),
            job.cta_request(job.button_cta()),
        ];
        let stack = distribute_evenly(
            &job.sizing(),
            &requests,
            area,
            &job.compositor.config().layout.even,
        );

        let effect = job.style.text_effect.unwrap_or(TextEffect::Plain);
        job.paint_blocks(&mut canvas, &stack.blocks, area, &palette, effect)?;
        Ok(canvas)
    }
}
