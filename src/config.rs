//! Explicit engine configuration.
//!
//! An [`EngineConfig`] is built once by the caller and handed to
//! [`Compositor::new`](crate::Compositor::new). All tunable layout constants,
//! font candidate lists and network settings live here so the engine itself
//! carries no hidden process-wide settings.

use std::{collections::HashMap, path::PathBuf};

use serde::{Deserialize, Serialize};

/// Top-level configuration of a [`Compositor`](crate::Compositor).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub fonts: FontConfig,
    pub layout: LayoutConfig,
    pub fetch: FetchConfig,
}

impl EngineConfig {
    /// Parses a (possibly partial) JSON configuration. Missing fields take
    /// their default values.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Configuration that never touches the file system for fonts: every
    /// logical family resolves to the built-in bitmap font.
    ///
    /// Useful for tests and for byte-stable output across machines.
    pub fn builtin_fonts() -> Self {
        Self {
            fonts: FontConfig::builtin_only(),
            ..Self::default()
        }
    }
}

/// One place a font may be loaded from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontCandidate {
    /// A font file on disk. Missing or unparsable files are skipped.
    Path(PathBuf),
    /// A family installed on the system, looked up through `fontdb`.
    Family {
        name: String,
        #[serde(default)]
        bold: bool,
    },
}

impl FontCandidate {
    pub fn path(path: impl Into<PathBuf>) -> Self {
        Self::Path(path.into())
    }

    pub fn family(name: impl Into<String>, bold: bool) -> Self {
        Self::Family {
            name: name.into(),
            bold,
        }
    }
}

/// Ordered candidate list for one logical font name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontSpec {
    pub name: String,
    pub candidates: Vec<FontCandidate>,
}

/// Font families known to the resolver.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    pub families: Vec<FontSpec>,
    /// Role names (`bold`, `clean`, ...) mapped to family names.
    pub aliases: HashMap<String, String>,
    /// Family used for names that are neither a family nor an alias.
    pub default_family: String,
    /// Tried after the family's own candidates, before the built-in font.
    pub fallbacks: Vec<FontCandidate>,
    /// Whether `FontCandidate::Family` lookups may scan system font folders.
    pub load_system_fonts: bool,
}

impl FontConfig {
    /// No candidates at all; the resolver always yields the built-in font.
    pub fn builtin_only() -> Self {
        Self {
            families: Vec::new(),
            fallbacks: Vec::new(),
            load_system_fonts: false,
            ..Self::default()
        }
    }
}

impl Default for FontConfig {
    fn default() -> Self {
        let families = vec![
            FontSpec {
                name: "impact".into(),
                candidates: vec![
                    FontCandidate::path("/usr/share/fonts/truetype/msttcorefonts/Impact.ttf"),
                    FontCandidate::path("/System/Library/Fonts/Supplemental/Impact.ttf"),
                    FontCandidate::path("C:\\Windows\\Fonts\\impact.ttf"),
                    FontCandidate::family("Impact", false),
                    FontCandidate::family("Anton", false),
                    FontCandidate::family("DejaVu Sans", true),
                ],
            },
            FontSpec {
                name: "liberation".into(),
                candidates: vec![
                    FontCandidate::path(
                        "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
                    ),
                    FontCandidate::path("/usr/share/fonts/liberation-sans/LiberationSans-Bold.ttf"),
                    FontCandidate::family("Liberation Sans", true),
                    FontCandidate::family("Arial", true),
                ],
            },
            FontSpec {
                name: "arial".into(),
                candidates: vec![
                    FontCandidate::path("/System/Library/Fonts/Supplemental/Arial Bold.ttf"),
                    FontCandidate::path("/Library/Fonts/Arial Bold.ttf"),
                    FontCandidate::path("/usr/share/fonts/truetype/msttcorefonts/Arial_Bold.ttf"),
                    FontCandidate::path("C:\\Windows\\Fonts\\arialbd.ttf"),
                    FontCandidate::family("Arial", true),
                ],
            },
            FontSpec {
                name: "dejavu".into(),
                candidates: vec![
                    FontCandidate::path("/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf"),
                    FontCandidate::family("DejaVu Sans", true),
                    FontCandidate::family("Helvetica", true),
                ],
            },
            FontSpec {
                name: "serif".into(),
                candidates: vec![
                    FontCandidate::path(
                        "/usr/share/fonts/truetype/liberation/LiberationSerif-Bold.ttf",
                    ),
                    FontCandidate::family("Liberation Serif", true),
                    FontCandidate::family("Georgia", true),
                    FontCandidate::family("Times New Roman", true),
                ],
            },
        ];

        let aliases = [
            ("bold", "impact"),
            ("clean", "liberation"),
            ("modern", "dejavu"),
            ("classic", "serif"),
            ("arial_bold", "arial"),
            ("helvetica_bold", "dejavu"),
        ]
        .into_iter()
        .map(|(alias, family)| (alias.to_string(), family.to_string()))
        .collect();

        Self {
            families,
            aliases,
            default_family: "impact".into(),
            fallbacks: vec![
                FontCandidate::family("DejaVu Sans", false),
                FontCandidate::family("Liberation Sans", false),
                FontCandidate::family("Arial", false),
            ],
            load_system_fonts: true,
        }
    }
}

/// Nominal sizes and spacing for the even-distribution mode, in pixels at
/// [`LayoutConfig::reference_size`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EvenSizing {
    pub hook_size: f32,
    pub body_size: f32,
    pub cta_size: f32,
    pub hook_spacing: f32,
    pub body_spacing: f32,
    pub cta_spacing: f32,
    pub gap_floor: f32,
    /// Optional cap on the gap. Unset, the stack spreads over the whole
    /// content height; set, it stays a compact group in the middle.
    #[serde(default)]
    pub gap_max: Option<f32>,
}

/// Constants of the anchored shrink-to-fit mode, in pixels at
/// [`LayoutConfig::reference_size`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnchoredSizing {
    pub hook_size: f32,
    pub hook_spacing: f32,
    pub body_size: f32,
    pub body_floor: f32,
    pub shrink_step: f32,
    /// CTA size relative to the current body size.
    pub cta_ratio: f32,
    pub body_spacing: f32,
    pub cta_spacing: f32,
    pub block_gap: f32,
    /// Fraction of the canvas height where the protected middle band ends.
    pub middle_band_end: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Short canvas side the pixel constants are tuned for.
    pub reference_size: f32,
    pub even: EvenSizing,
    pub anchored: AnchoredSizing,
    pub modern: EvenSizing,
    /// Side of an emoji square relative to the font size.
    pub symbol_ratio: f32,
    pub outline_width: f32,
    pub shadow_offset: f32,
    pub button_padding_x: f32,
    pub button_padding_y: f32,
    /// Sticker side relative to the short canvas side.
    pub sticker_ratio: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            reference_size: 1080.0,
            even: EvenSizing {
                hook_size: 76.0,
                body_size: 40.0,
                cta_size: 50.0,
                hook_spacing: 6.0,
                body_spacing: 8.0,
                cta_spacing: 6.0,
                gap_floor: 30.0,
                gap_max: None,
            },
            anchored: AnchoredSizing {
                hook_size: 110.0,
                hook_spacing: 10.0,
                body_size: 60.0,
                body_floor: 28.0,
                shrink_step: 2.0,
                cta_ratio: 1.15,
                body_spacing: 5.0,
                cta_spacing: 5.0,
                block_gap: 15.0,
                middle_band_end: 0.55,
            },
            modern: EvenSizing {
                hook_size: 54.0,
                body_size: 36.0,
                cta_size: 34.0,
                hook_spacing: 8.0,
                body_spacing: 8.0,
                cta_spacing: 6.0,
                gap_floor: 30.0,
                gap_max: Some(30.0),
            },
            symbol_ratio: 0.95,
            outline_width: 3.0,
            shadow_offset: 3.0,
            button_padding_x: 45.0,
            button_padding_y: 22.0,
            sticker_ratio: 0.2,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
    /// `{code}` is replaced by the dash-joined lowercase hex code points.
    pub symbol_url_template: String,
    /// Upper bound on cached rasterized glyphs before the cache is reset.
    pub glyph_cache_capacity: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: concat!("adcomp/", env!("CARGO_PKG_VERSION")).into(),
            symbol_url_template:
                "https://cdn.jsdelivr.net/gh/jdecked/twemoji@15.1.0/assets/72x72/{code}.png".into(),
            glyph_cache_capacity: 16_384,
        }
    }
}
