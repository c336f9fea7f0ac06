//! Canvas geometry: safe zones and adaptive block sizing.

mod safe_zone;
mod sizing;

pub use safe_zone::{SafeZone, SafeZoneProfile, resolve_safe_zone};
pub use sizing::{
    AnchoredLayout, BlockRequest, PlacedBlock, SizingContext, StackLayout, anchor_shrink,
    distribute_evenly,
};

/// Axis-aligned pixel rectangle, y growing downwards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    pub fn center_x(&self) -> u32 {
        self.x + self.width / 2
    }
}

/// Factor applied to every pixel constant: the short canvas side over the
/// reference side the constants were tuned for.
pub fn scale_factor(width: u32, height: u32, reference_size: f32) -> f32 {
    let reference = if reference_size > 0.0 {
        reference_size
    } else {
        1080.0
    };
    (width.min(height) as f32 / reference).max(f32::MIN_POSITIVE)
}
