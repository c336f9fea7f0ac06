//! Named output canvas sizes.

/// A named canvas size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutputSize {
    pub name: &'static str,
    pub width: u32,
    pub height: u32,
}

const fn size(name: &'static str, width: u32, height: u32) -> OutputSize {
    OutputSize {
        name,
        width,
        height,
    }
}

pub const DEFAULT_OUTPUT_SIZE: OutputSize = size("instagram_square", 1080, 1080);

pub const OUTPUT_SIZES: [OutputSize; 12] = [
    DEFAULT_OUTPUT_SIZE,
    size("instagram_story", 1080, 1920),
    size("instagram_reels", 1080, 1920),
    size("instagram_portrait", 1080, 1350),
    size("facebook_feed", 1200, 628),
    size("facebook_story", 1080, 1920),
    size("telegram", 1280, 720),
    size("twitter", 1200, 675),
    size("linkedin_post", 1200, 627),
    size("tiktok", 1080, 1920),
    size("youtube_thumbnail", 1280, 720),
    size("youtube_shorts", 1080, 1920),
];

impl OutputSize {
    pub fn lookup(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();
        OUTPUT_SIZES.iter().copied().find(|size| size.name == name)
    }

    /// Like [`OutputSize::lookup`], substituting `instagram_square` for unknown names.
    pub fn resolve(name: &str) -> Self {
        Self::lookup(name).unwrap_or_else(|| {
            log::warn!(
                "unknown output size '{}', using '{}'",
                name,
                DEFAULT_OUTPUT_SIZE.name
            );
            DEFAULT_OUTPUT_SIZE
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_and_unknown_sizes() {
        let tiktok = OutputSize::resolve("tiktok");
        assert_eq!((tiktok.width, tiktok.height), (1080, 1920));
        assert_eq!(OutputSize::resolve("Facebook_Feed").height, 628);
        assert_eq!(OutputSize::resolve("billboard"), DEFAULT_OUTPUT_SIZE);
        assert_eq!(OutputSize::lookup("billboard"), None);
    }
}
