use image::{Rgba, RgbaImage};

use super::{FormatStrategy, Job};
use crate::{
    error::Result,
    layout::{Rect, distribute_evenly},
    renderer::{
        color::{BLACK, WHITE},
        composite::{cover_resize, paste_alpha},
    },
    request::TextEffect,
};

const BODY_GRAY: Rgba<u8> = Rgba([0x33, 0x33, 0x33, 0xFF]);

/// Corners in sticker order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    const ORDER: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];

    fn is_top(self) -> bool {
        matches!(self, Corner::TopLeft | Corner::TopRight)
    }

    fn origin(self, content: Rect, side: u32) -> (u32, u32) {
        let right = content.right().saturating_sub(side);
        let bottom = content.bottom().saturating_sub(side);
        match self {
            Corner::TopLeft => (content.x, content.y),
            Corner::TopRight => (right, content.y),
            Corner::BottomLeft => (content.x, bottom),
            Corner::BottomRight => (right, bottom),
        }
    }
}

pub(crate) struct Stickers;

impl FormatStrategy for Stickers {
    fn render(&self, job: &Job<'_>) -> Result<RgbaImage> {
        let mut canvas = job.blank_canvas(WHITE);
        let content = job.content_rect();
        let short_side = job.size.width.min(job.size.height) as f32;
        let side = (short_side * job.compositor.config().layout.sticker_ratio)
            .round()
            .max(1.0) as u32;

        let (mut top_used, mut bottom_used) = (false, false);
        let loaded = job
            .style
            .stickers
            .iter()
            .filter_map(|source| load_sticker(job, source, side));
        // corners go to stickers that loaded, in order
        for (corner, sticker) in Corner::ORDER.into_iter().zip(loaded) {
            let (x, y) = corner.origin(content, side);
            paste_alpha(&mut canvas, &sticker, x as i64, y as i64);
            if corner.is_top() {
                top_used = true;
            } else {
                bottom_used = true;
            }
        }

        let gap = job.px(job.compositor.config().layout.even.gap_floor);
        let reserved = side + gap;
        let top = if top_used { reserved } else { 0 };
        let bottom = if bottom_used { reserved } else { 0 };
        let area = Rect::new(
            content.x,
            content.y + top.min(content.height),
            content.width,
            content.height.saturating_sub(top + bottom),
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

/// Fetches and squares one sticker. Failures are logged and skipped.
fn load_sticker(job: &Job<'_>, source: &str, side: u32) -> Option<RgbaImage> {
    let bytes = match job.compositor.fetcher().fetch(source) {
        Ok(bytes) => bytes,
        Err(e) => {
            log::warn!("skipping sticker {}: {}", source, e);
            return None;
        }
    };
    match image::load_from_memory(&bytes) {
        Ok(decoded) => Some(cover_resize(&decoded.to_rgba8(), side, side)),
        Err(e) => {
            log::warn!("skipping sticker {}: not an image: {}", source, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corner_origins() {
        let content = Rect::new(60, 60, 960, 960);
        assert_eq!(Corner::TopLeft.origin(content, 216), (60, 60));
        assert_eq!(Corner::TopRight.origin(content, 216), (804, 60));
        assert_eq!(Corner::BottomLeft.origin(content, 216), (60, 804));
        assert_eq!(Corner::BottomRight.origin(content, 216), (804, 804));
        assert!(Corner::TopRight.is_top());
        assert!(!Corner::BottomLeft.is_top());
    }
}
