use image::{Rgba, RgbaImage};

use crate::renderer::{Fill, composite::fill_vertical_gradient};

/// Two or more gradient stops, top to bottom.
#[derive(Clone, Debug, PartialEq)]
pub struct GradientStops(Vec<Rgba<u8>>);

impl GradientStops {
    /// `None` for fewer than two stops.
    pub fn new(stops: Vec<Rgba<u8>>) -> Option<Self> {
        (stops.len() >= 2).then_some(Self(stops))
    }

    pub fn stops(&self) -> &[Rgba<u8>] {
        &self.0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Background {
    Solid(Rgba<u8>),
    Gradient(GradientStops),
}

impl Background {
    pub fn paint(&self, canvas: &mut RgbaImage) {
        match self {
            Background::Solid(color) => fill_vertical_gradient(canvas, &[*color]),
            Background::Gradient(stops) => fill_vertical_gradient(canvas, stops.stops()),
        }
    }
}

/// Extra effect on the hook.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Accent {
    /// Soft shadow only.
    None,
    Glow(Rgba<u8>),
    Stroke(Rgba<u8>),
}

/// Colors of a themed composition.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorScheme {
    pub background: Background,
    pub hook: Rgba<u8>,
    pub body: Rgba<u8>,
    pub cta_background: Fill,
    pub cta_text: Rgba<u8>,
    pub accent: Accent,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Neon,
    Minimal,
    Gradient,
    Bold,
    Glass,
}

const fn rgb(hex: u32) -> Rgba<u8> {
    Rgba([(hex >> 16) as u8, (hex >> 8) as u8, hex as u8, 255])
}

const fn rgba(hex: u32) -> Rgba<u8> {
    Rgba([(hex >> 24) as u8, (hex >> 16) as u8, (hex >> 8) as u8, hex as u8])
}

fn gradient(top: Rgba<u8>, bottom: Rgba<u8>) -> Background {
    Background::Gradient(GradientStops(vec![top, bottom]))
}

impl Theme {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "neon" => Some(Theme::Neon),
            "minimal" => Some(Theme::Minimal),
            "gradient" => Some(Theme::Gradient),
            "bold" => Some(Theme::Bold),
            "glass" | "glassmorphism" => Some(Theme::Glass),
            _ => None,
        }
    }

    pub fn scheme(self) -> ColorScheme {
        match self {
            Theme::Neon => ColorScheme {
                background: Background::Solid(rgb(0x0f0c29)),
                hook: rgb(0xffffff),
                body: rgb(0xe0e0e0),
                cta_background: Fill::Horizontal(rgb(0xf72585), rgb(0x7209b7)),
                cta_text: rgb(0xffffff),
                accent: Accent::Glow(rgb(0xf72585)),
            },
            Theme::Minimal => ColorScheme {
                background: Background::Solid(rgb(0xffffff)),
                hook: rgb(0x1a1a2e),
                body: rgb(0x4a4a5a),
                cta_background: Fill::Solid(rgb(0x1a1a2e)),
                cta_text: rgb(0xffffff),
                accent: Accent::None,
            },
            Theme::Gradient => ColorScheme {
                background: gradient(rgb(0x667eea), rgb(0x764ba2)),
                hook: rgb(0xffffff),
                body: rgb(0xf0f0f0),
                cta_background: Fill::Horizontal(rgb(0xff6b6b), rgb(0xee5a5a)),
                cta_text: rgb(0xffffff),
                accent: Accent::None,
            },
            Theme::Bold => ColorScheme {
                background: Background::Solid(rgb(0x1e1e2f)),
                hook: rgb(0xffffff),
                body: rgb(0xcccccc),
                cta_background: Fill::Solid(rgb(0xff5722)),
                cta_text: rgb(0xffffff),
                accent: Accent::Stroke(rgb(0xff5722)),
            },
            Theme::Glass => ColorScheme {
                background: gradient(rgb(0x1a1a2e), rgb(0x16213e)),
                hook: rgb(0xffffff),
                body: rgb(0xe0e0e0),
                cta_background: Fill::Horizontal(rgba(0xffffff33), rgba(0xffffff22)),
                cta_text: rgb(0xffffff),
                accent: Accent::None,
            },
        }
    }
}
