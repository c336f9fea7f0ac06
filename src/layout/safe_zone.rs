use super::Rect;

/// Margins reserved for platform UI, in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SafeZone {
    pub top: u32,
    pub bottom: u32,
    pub left: u32,
    pub right: u32,
}

impl SafeZone {
    /// The rectangle left for content on a `width` x `height` canvas.
    ///
    /// Margins that do not fit leave an empty rectangle rather than wrapping.
    pub fn content_rect(&self, width: u32, height: u32) -> Rect {
        let x = self.left.min(width);
        let y = self.top.min(height);
        Rect::new(
            x,
            y,
            width.saturating_sub(self.left + self.right),
            height.saturating_sub(self.top + self.bottom),
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SafeZoneProfile {
    TikTok,
    InstagramReels,
    InstagramStory,
    YoutubeShorts,
    None,
}

impl SafeZoneProfile {
    /// Named profile, if `name` is one.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "tiktok" => Some(Self::TikTok),
            "instagram_reels" => Some(Self::InstagramReels),
            "instagram_story" => Some(Self::InstagramStory),
            "youtube_shorts" => Some(Self::YoutubeShorts),
            "none" => Some(Self::None),
            _ => None,
        }
    }

    /// Profile an output preset maps to under `auto`.
    pub fn for_preset(preset: &str) -> Self {
        match preset.trim().to_ascii_lowercase().as_str() {
            "tiktok" => Self::TikTok,
            "instagram_reels" => Self::InstagramReels,
            "instagram_story" | "facebook_story" => Self::InstagramStory,
            "youtube_shorts" => Self::YoutubeShorts,
            _ => Self::None,
        }
    }

    pub fn margins(self) -> SafeZone {
        let (top, bottom, left, right) = match self {
            Self::TikTok => (150, 480, 60, 140),
            Self::InstagramReels => (220, 420, 60, 120),
            Self::InstagramStory => (250, 340, 60, 60),
            Self::YoutubeShorts => (180, 400, 60, 140),
            Self::None => (60, 60, 60, 60),
        };
        SafeZone {
            top,
            bottom,
            left,
            right,
        }
    }
}

/// Resolves the margins for `preset` under `selector`.
///
/// `auto` picks the profile of the preset's platform. Any other selector names
/// a profile directly; unknown names fall back to `none`.
pub fn resolve_safe_zone(preset: &str, selector: &str) -> SafeZone {
    let profile = if selector.trim().eq_ignore_ascii_case("auto") {
        SafeZoneProfile::for_preset(preset)
    } else {
        SafeZoneProfile::from_name(selector).unwrap_or_else(|| {
            log::warn!("unknown safe zone '{}', using 'none'", selector);
            SafeZoneProfile::None
        })
    };
    profile.margins()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_auto_follows_preset() {
        assert_eq!(resolve_safe_zone("tiktok", "auto"), SafeZoneProfile::TikTok.margins());
        assert_eq!(
            resolve_safe_zone("facebook_story", "AUTO"),
            SafeZoneProfile::InstagramStory.margins()
        );
        assert_eq!(
            resolve_safe_zone("instagram_square", "auto"),
            SafeZoneProfile::None.margins()
        );
    }

    #[test]
    fn test_named_selector_ignores_preset() {
        let zone = resolve_safe_zone("instagram_square", "tiktok");
        assert_eq!(zone.bottom, 480);
        assert_eq!(resolve_safe_zone("tiktok", "none").bottom, 60);
        assert_eq!(resolve_safe_zone("tiktok", "bogus"), SafeZoneProfile::None.margins());
    }

    #[test]
    fn test_content_rect() {
        let rect = SafeZoneProfile::TikTok.margins().content_rect(1080, 1920);
        assert_eq!(rect, Rect::new(60, 150, 880, 1290));

        let tiny = SafeZoneProfile::TikTok.margins().content_rect(100, 100);
        assert_eq!(tiny.width, 0);
        assert_eq!(tiny.height, 0);
    }

    proptest! {
        #[test]
        fn prop_resolution_is_total(preset in "\\PC{0,20}", selector in "\\PC{0,20}") {
            let zone = resolve_safe_zone(&preset, &selector);
            let known = [
                SafeZoneProfile::TikTok,
                SafeZoneProfile::InstagramReels,
                SafeZoneProfile::InstagramStory,
                SafeZoneProfile::YoutubeShorts,
                SafeZoneProfile::None,
            ];
            prop_assert!(known.iter().any(|profile| profile.margins() == zone));
        }
    }
}
