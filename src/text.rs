//! Mixed text and emoji handling: segmentation, measurement, wrapping and
//! measured text blocks.

/// Splits strings into plain and symbol runs.
pub mod segment;
/// Pixel widths of mixed content.
pub mod measure;
/// Greedy word wrapping.
pub mod wrap;
/// Measured, wrapped text blocks ready for placement.
pub mod block;

pub use block::{BlockRole, MeasuredLine, TextBlock};
pub use measure::Measurer;
pub use segment::{MixedSegment, SegmentKind, segment, symbol_code};
