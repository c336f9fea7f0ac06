use super::Rect;
use crate::{
    config::{AnchoredSizing, EvenSizing},
    font::FontResolver,
    text::{BlockRole, Measurer, TextBlock},
};

/// Shared inputs of both sizing modes.
pub struct SizingContext<'a> {
    pub resolver: &'a FontResolver,
    pub measurer: &'a Measurer,
    /// Multiplier applied to every pixel constant.
    pub scale: f32,
}

impl SizingContext<'_> {
    fn px(&self, value: f32) -> u32 {
        (value * self.scale).round().max(0.0) as u32
    }

    fn build(&self, request: &BlockRequest<'_>, size: f32, spacing: f32, content: Rect) -> TextBlock {
        let font = self.resolver.resolve(request.font_name, size * self.scale);
        TextBlock::new(
            request.role,
            request.text,
            font,
            self.measurer,
            content.width.saturating_sub(request.extra_width).max(1),
            self.px(spacing),
            request.extra_height,
        )
    }
}

/// Text and font of one block before sizing.
///
/// `extra_width` and `extra_height` reserve room around the text, such as a
/// button's padding, in final pixels.
#[derive(Clone, Copy, Debug)]
pub struct BlockRequest<'a> {
    pub role: BlockRole,
    pub text: &'a str,
    pub font_name: &'a str,
    pub extra_width: u32,
    pub extra_height: u32,
}

impl<'a> BlockRequest<'a> {
    pub fn new(role: BlockRole, text: &'a str, font_name: &'a str) -> Self {
        Self {
            role,
            text,
            font_name,
            extra_width: 0,
            extra_height: 0,
        }
    }

    pub fn with_padding(mut self, extra_width: u32, extra_height: u32) -> Self {
        self.extra_width = extra_width;
        self.extra_height = extra_height;
        self
    }

    fn is_present(&self) -> bool {
        !self.text.trim().is_empty()
    }
}

/// A block with its final top coordinate.
#[derive(Clone, Debug)]
pub struct PlacedBlock {
    pub block: TextBlock,
    pub top: u32,
}

impl PlacedBlock {
    pub fn bottom(&self) -> u32 {
        self.top + self.block.height()
    }
}

/// Output of [`distribute_evenly`].
#[derive(Clone, Debug, Default)]
pub struct StackLayout {
    pub blocks: Vec<PlacedBlock>,
    pub gap: u32,
}

impl StackLayout {
    pub fn top(&self) -> Option<u32> {
        self.blocks.first().map(|placed| placed.top)
    }

    pub fn bottom(&self) -> Option<u32> {
        self.blocks.last().map(PlacedBlock::bottom)
    }
}

/// Output of [`anchor_shrink`].
#[derive(Clone, Debug)]
pub struct AnchoredLayout {
    pub hook: Option<PlacedBlock>,
    /// Body then CTA, bottom-anchored.
    pub bottom: Vec<PlacedBlock>,
    /// Top of the band the bottom stack should stay below.
    pub middle_boundary: u32,
    /// Body size the search settled on, before scaling.
    pub body_size: f32,
    /// Number of shrink steps taken.
    pub steps: u32,
}

fn nominal(role: BlockRole, sizing: &EvenSizing) -> (f32, f32) {
    match role {
        BlockRole::Hook => (sizing.hook_size, sizing.hook_spacing),
        BlockRole::Body => (sizing.body_size, sizing.body_spacing),
        BlockRole::Cta => (sizing.cta_size, sizing.cta_spacing),
    }
}

/// Sizes blocks at their nominal sizes and spreads them over `content`.
///
/// Empty blocks are dropped. Gaps split the free height evenly, never below
/// `gap_floor` (and never above `gap_max` when one is set), so a fitting
/// stack of several blocks spans the content height. The stack is centered;
/// one taller than `content` starts at its top and overflows downwards.
pub fn distribute_evenly(
    ctx: &SizingContext<'_>,
    requests: &[BlockRequest<'_>],
    content: Rect,
    sizing: &EvenSizing,
) -> StackLayout {
    let blocks: Vec<TextBlock> = requests
        .iter()
        .filter(|request| request.is_present())
        .map(|request| {
            let (size, spacing) = nominal(request.role, sizing);
            ctx.build(request, size, spacing, content)
        })
        .filter(|block| !block.is_empty())
        .collect();

    if blocks.is_empty() {
        return StackLayout::default();
    }

    let total: u32 = blocks.iter().map(TextBlock::height).sum();
    let slots = (blocks.len() as u32).saturating_sub(1).max(1);
    let available = content.height as f32 - total as f32;
    let floor = ctx.px(sizing.gap_floor);
    let mut gap = ((available / slots as f32).floor().max(0.0) as u32).max(floor);
    if let Some(ceiling) = sizing.gap_max {
        gap = gap.min(ctx.px(ceiling).max(floor));
    }

    let stack = total + gap * (blocks.len() as u32 - 1);
    let top = content.y + content.height.saturating_sub(stack) / 2;
    log::debug!(
        "even layout: {} blocks, height {}, gap {}, top {}",
        blocks.len(),
        stack,
        gap,
        top
    );

    let mut cursor = top;
    let blocks = blocks
        .into_iter()
        .map(|block| {
            let placed = PlacedBlock { top: cursor, block };
            cursor = placed.bottom() + gap;
            placed
        })
        .collect();

    StackLayout { blocks, gap }
}

/// Pins the hook to the top of `content` and fits body and CTA above its bottom.
///
/// The hook keeps its nominal size. Body and CTA shrink together, one step at
/// a time, until their stack fits between the middle boundary and the content
/// bottom, or the body reaches its floor. The floor is accepted even when the
/// stack still overflows.
pub fn anchor_shrink(
    ctx: &SizingContext<'_>,
    hook: Option<BlockRequest<'_>>,
    body: Option<BlockRequest<'_>>,
    cta: Option<BlockRequest<'_>>,
    content: Rect,
    canvas_height: u32,
    sizing: &AnchoredSizing,
) -> AnchoredLayout {
    let gap = ctx.px(sizing.block_gap);

    let hook = hook
        .filter(BlockRequest::is_present)
        .map(|request| ctx.build(&request, sizing.hook_size, sizing.hook_spacing, content))
        .filter(|block| !block.is_empty())
        .map(|block| PlacedBlock {
            block,
            top: content.y,
        });
    let hook_bottom = hook.as_ref().map_or(content.y, PlacedBlock::bottom);

    let band_end = (canvas_height as f32 * sizing.middle_band_end).round().max(0.0) as u32;
    let middle_boundary = (hook_bottom + gap).max(band_end);
    let bottom_boundary = content.bottom();
    let available = bottom_boundary.saturating_sub(middle_boundary);

    let body = body.filter(BlockRequest::is_present);
    let cta = cta.filter(BlockRequest::is_present);

    let floor = sizing.body_floor.max(1.0);
    let step = if sizing.shrink_step > 0.0 {
        sizing.shrink_step
    } else {
        1.0
    };
    let mut body_size = sizing.body_size.max(floor);
    let mut steps = 0;

    let stack = loop {
        let cta_size = (body_size * sizing.cta_ratio).round().max(floor);
        let stack: Vec<TextBlock> = [
            body.map(|request| ctx.build(&request, body_size, sizing.body_spacing, content)),
            cta.map(|request| ctx.build(&request, cta_size, sizing.cta_spacing, content)),
        ]
        .into_iter()
        .flatten()
        .filter(|block| !block.is_empty())
        .collect();

        let height = stack_height(&stack, gap);
        if height <= available || body_size <= floor {
            log::debug!(
                "anchored layout: body {}px after {} steps, stack {} of {}",
                body_size,
                steps,
                height,
                available
            );
            break stack;
        }
        body_size = (body_size - step).max(floor);
        steps += 1;
    };

    let mut cursor = bottom_boundary.saturating_sub(stack_height(&stack, gap));
    let bottom = stack
        .into_iter()
        .map(|block| {
            let placed = PlacedBlock { top: cursor, block };
            cursor = placed.bottom() + gap;
            placed
        })
        .collect();

    AnchoredLayout {
        hook,
        bottom,
        middle_boundary,
        body_size,
        steps,
    }
}

fn stack_height(blocks: &[TextBlock], gap: u32) -> u32 {
    let heights: u32 = blocks.iter().map(TextBlock::height).sum();
    heights + gap * (blocks.len() as u32).saturating_sub(1)
}
