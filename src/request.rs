//! Inputs of compose calls.

use serde::{Deserialize, Serialize};

use crate::{
    error::{ComposeError, Result},
    renderer::HorizontalAlign,
};

/// One compose call.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComposeRequest {
    /// `text_only`, `meme`, `stickers`, `split` or `modern`.
    pub format: String,
    pub hook: String,
    pub body: String,
    pub cta: String,
    /// URL or path of the background photo.
    pub image_source: Option<String>,
    /// Name from the output size table.
    pub output_size: String,
    pub style: StyleOptions,
}

impl ComposeRequest {
    pub fn new(format: impl Into<String>, output_size: impl Into<String>) -> Self {
        Self {
            format: format.into(),
            output_size: output_size.into(),
            ..Self::default()
        }
    }

    pub fn with_text(
        mut self,
        hook: impl Into<String>,
        body: impl Into<String>,
        cta: impl Into<String>,
    ) -> Self {
        self.hook = hook.into();
        self.body = body.into();
        self.cta = cta.into();
        self
    }

    pub fn with_image(mut self, source: impl Into<String>) -> Self {
        self.image_source = Some(source.into());
        self
    }

    pub fn with_style(mut self, style: StyleOptions) -> Self {
        self.style = style;
        self
    }
}

/// Paint applied to font-drawn text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextEffect {
    Outline,
    Shadow,
    Plain,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CtaStyle {
    #[default]
    Text,
    Button,
}

/// Fill of a CTA button: picked from the background, or explicit.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ButtonColor {
    #[default]
    Auto,
    Explicit(String),
}

impl From<String> for ButtonColor {
    fn from(value: String) -> Self {
        if value.trim().eq_ignore_ascii_case("auto") || value.trim().is_empty() {
            ButtonColor::Auto
        } else {
            ButtonColor::Explicit(value)
        }
    }
}

impl From<ButtonColor> for String {
    fn from(value: ButtonColor) -> Self {
        match value {
            ButtonColor::Auto => "auto".into(),
            ButtonColor::Explicit(color) => color,
        }
    }
}

/// Presentation options shared by every format. Unset options take the
/// format's defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleOptions {
    /// Font role or family for all blocks (`bold`, `clean`, `modern`, `classic`, ...).
    pub font: String,
    /// Overrides `font` for body text.
    pub body_font: Option<String>,
    /// Draws the hook with the `bold` role whatever `font` says.
    pub bold_hook: bool,
    pub uppercase_hook: Option<bool>,
    pub hook_color: Option<String>,
    /// Fill of body and CTA text, and of the hook unless `hook_color` is set.
    pub text_color: Option<String>,
    pub outline_color: Option<String>,
    pub text_effect: Option<TextEffect>,
    pub cta_style: CtaStyle,
    pub cta_color: ButtonColor,
    /// `auto`, a profile name or `none`.
    pub safe_zone: String,
    /// Split divider angle in degrees.
    pub divider_angle: f32,
    /// Right panel color of the split format.
    pub panel_color: Option<String>,
    /// Sticker image sources, at most four are used.
    pub stickers: Vec<String>,
    /// Black overlay opacity over photo backgrounds, `0` to `1`.
    pub darken: Option<f32>,
    /// Color scheme of the modern format.
    pub theme: Option<String>,
    pub align: HorizontalAlign,
}

impl Default for StyleOptions {
    fn default() -> Self {
        Self {
            font: "bold".into(),
            body_font: None,
            bold_hook: false,
            uppercase_hook: None,
            hook_color: None,
            text_color: None,
            outline_color: None,
            text_effect: None,
            cta_style: CtaStyle::Text,
            cta_color: ButtonColor::Auto,
            safe_zone: "auto".into(),
            divider_angle: 15.0,
            panel_color: None,
            stickers: Vec::new(),
            darken: None,
            theme: None,
            align: HorizontalAlign::Center,
        }
    }
}

impl StyleOptions {
    pub fn hook_font(&self) -> &str {
        if self.bold_hook { "bold" } else { &self.font }
    }

    pub fn body_font(&self) -> &str {
        self.body_font.as_deref().unwrap_or(&self.font)
    }
}

/// Text of one batch variation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextVariation {
    #[serde(alias = "hook_text")]
    pub hook: String,
    #[serde(alias = "body_text")]
    pub body: String,
    #[serde(alias = "cta_text")]
    pub cta: String,
}

/// Everything but the text, shared by all variations of a batch.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchOptions {
    pub format: String,
    pub output_size: String,
    pub style: StyleOptions,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            format: "meme".into(),
            output_size: "instagram_square".into(),
            style: StyleOptions::default(),
        }
    }
}

/// Parses a JSON array of variations.
///
/// Anything but an array of objects is rejected as a whole.
pub fn parse_variations(json: &str) -> Result<Vec<TextVariation>> {
    let value: serde_json::Value =
        serde_json::from_str(json).map_err(|e| ComposeError::InvalidVariations(e.to_string()))?;
    let serde_json::Value::Array(items) = value else {
        return Err(ComposeError::InvalidVariations(
            "expected a JSON array of variations".into(),
        ));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            if !item.is_object() {
                return Err(ComposeError::InvalidVariations(format!(
                    "variation {index} is not an object"
                )));
            }
            serde_json::from_value(item).map_err(|e| {
                ComposeError::InvalidVariations(format!("variation {index}: {e}"))
            })
        })
        .collect()
}
