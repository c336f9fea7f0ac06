use image::{Rgba, RgbaImage};

use super::{Accent, FormatStrategy, Job, Theme};
use crate::{
    error::Result,
    layout::distribute_evenly,
    renderer::{
        Fill, TextStyle,
        color::parse_color,
        composite::{cover_resize, darken},
    },
    request::ButtonColor,
    text::BlockRole,
};

const DEFAULT_DARKEN: f32 = 0.5;
const HOOK_SHADOW: Rgba<u8> = Rgba([0, 0, 0, 0x66]);
const BODY_SHADOW: Rgba<u8> = Rgba([0, 0, 0, 0x44]);

pub(crate) struct Modern;

impl FormatStrategy for Modern {
    fn render(&self, job: &Job<'_>) -> Result<RgbaImage> {
        let theme = match job.style.theme.as_deref() {
            None => Theme::default(),
            Some(name) => Theme::from_name(name).unwrap_or_else(|| {
                log::warn!("unknown theme '{}', using neon", name);
                Theme::default()
            }),
        };
        let scheme = theme.scheme();

        let mut canvas = match job.background {
            Some(photo) => {
                let mut canvas = cover_resize(photo, job.size.width, job.size.height);
                darken(&mut canvas, job.style.darken.unwrap_or(DEFAULT_DARKEN));
                canvas
            }
            None => {
                let mut canvas = RgbaImage::new(job.size.width, job.size.height);
                scheme.background.paint(&mut canvas);
                canvas
            }
        };

        let palette = job.palette(scheme.hook, scheme.body, scheme.cta_text)?;
        let content = job.content_rect();
        let hook = job.hook_text(false);
        let requests = [
            job.hook_request(&hook),
            job.body_request(),
            job.cta_request(true),
        ];
        let stack = distribute_evenly(
            &job.sizing(),
            &requests,
            content,
            &job.compositor.config().layout.modern,
        );

        let hook_style = match scheme.accent {
            Accent::Glow(glow) => TextStyle::Glow {
                fill: palette.hook,
                glow,
                radius: job.px(6.0).max(1),
            },
            Accent::Stroke(stroke) => TextStyle::Outline {
                fill: palette.hook,
                outline: stroke,
                radius: job.px(job.compositor.config().layout.outline_width).max(1),
            },
            Accent::None => TextStyle::Shadow {
                fill: palette.hook,
                shadow: HOOK_SHADOW,
                offset: job.px(2.0).max(1) as i32,
            },
        };
        let body_style = TextStyle::Shadow {
            fill: palette.body,
            shadow: BODY_SHADOW,
            offset: job.px(1.0).max(1) as i32,
        };

        let renderer = job.compositor.renderer();
        for placed in &stack.blocks {
            match placed.block.role() {
                BlockRole::Hook => {
                    renderer.draw_block(&mut canvas, placed, content, job.style.align, &hook_style)
                }
                BlockRole::Body => {
                    renderer.draw_block(&mut canvas, placed, content, job.style.align, &body_style)
                }
                BlockRole::Cta => {
                    let fill = match &job.style.cta_color {
                        ButtonColor::Explicit(color) => Fill::Solid(parse_color(color)?),
                        ButtonColor::Auto => scheme.cta_background,
                    };
                    let padding_x = job.px(job.compositor.config().layout.button_padding_x);
                    renderer.draw_button(
                        &mut canvas,
                        placed,
                        content.center_x(),
                        padding_x,
                        fill,
                        palette.cta,
                    );
                }
            }
        }
        Ok(canvas)
    }
}
