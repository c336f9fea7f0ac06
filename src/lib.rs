//! # adcomp
//!
//! Adaptive text layout and compositing for advertisement creatives.
//!
//! ## Overview
//!
//! `adcomp` overlays a hook, a body and a call-to-action onto a photo or a
//! plain canvas and returns a PNG sized for a social placement. Font sizes,
//! wrapping, placement around platform UI (safe zones), emoji measurement and
//! the outline / shadow / button effects are all computed so arbitrary text
//! fits the canvas without manual tuning.
//!
//! The entry point is the [`Compositor`], which owns the font resolver, the
//! glyph and emoji caches and the image fetcher.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use adcomp::{ComposeRequest, Compositor, EngineConfig};
//!
//! let compositor = Compositor::new(EngineConfig::default())?;
//!
//! let request = ComposeRequest::new("meme", "tiktok")
//!     .with_text("Summer sale", "Everything 50% off this week 🔥", "Shop now")
//!     .with_image("https://example.com/photo.jpg");
//!
//! let image = compositor.compose(&request)?;
//! std::fs::write("creative.png", &image.png)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Formats
//!
//! *   **text_only**: dark text evenly spread over a white canvas.
//! *   **meme**: outlined text over a photo, hook on top, body and CTA shrunk to fit at the bottom.
//! *   **stickers**: text between up to four corner stickers.
//! *   **split**: photo and text panel separated by an angled edge.
//! *   **modern**: themed colors with glow, stroke and pill buttons.

pub mod config;
pub mod error;
pub mod fetch;
pub mod font;
pub mod font_storage;
pub mod format;
pub mod glyph_id;
pub mod layout;
pub mod presets;
pub mod renderer;
pub mod request;
pub mod text;

mod compositor;

// common re-exports
pub use compositor::{ComposedImage, Compositor};
pub use config::EngineConfig;
pub use error::{ComposeError, FetchError};
pub use fetch::{HttpFetcher, ImageFetcher, StaticFetcher};
pub use font::{Font, FontResolver};
pub use font_storage::FontStorage;
pub use format::FormatType;
pub use glyph_id::GlyphId;
pub use presets::OutputSize;
pub use request::{
    BatchOptions, ButtonColor, ComposeRequest, CtaStyle, StyleOptions, TextEffect, TextVariation,
    parse_variations,
};

// re-export dependencies
pub use fontdb;
pub use fontdue;
pub use image;
pub use parking_lot;
