use icu_properties::{
    CodePointSetData,
    props::{EmojiPresentation, ExtendedPictographic, RegionalIndicator},
};
use icu_segmenter::GraphemeClusterSegmenter;

const VARIATION_SELECTOR_16: char = '\u{FE0F}';
const ZERO_WIDTH_JOINER: char = '\u{200D}';
const COMBINING_KEYCAP: char = '\u{20E3}';

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SegmentKind {
    /// Drawn with the font.
    Plain,
    /// Drawn as a square bitmap.
    Symbol,
}

/// A contiguous run of the input string, borrowed from it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MixedSegment<'a> {
    pub text: &'a str,
    pub kind: SegmentKind,
}

impl MixedSegment<'_> {
    pub fn is_symbol(&self) -> bool {
        self.kind == SegmentKind::Symbol
    }
}

/// Splits `text` into plain and symbol runs, in order.
///
/// Every emoji grapheme cluster (including ZWJ sequences, flags and keycaps)
/// becomes its own symbol segment. Everything between symbols is merged into
/// one plain segment, spaces included. Concatenating the segments yields
/// `text` again.
pub fn segment(text: &str) -> Vec<MixedSegment<'_>> {
    let mut segments: Vec<MixedSegment<'_>> = Vec::new();
    let mut plain_start: Option<usize> = None;

    let boundaries: Vec<usize> = GraphemeClusterSegmenter::new().segment_str(text).collect();
    for pair in boundaries.windows(2) {
        let (start, end) = (pair[0], pair[1]);
        let cluster = &text[start..end];

        if is_symbol_cluster(cluster) {
            if let Some(from) = plain_start.take() {
                segments.push(MixedSegment {
                    text: &text[from..start],
                    kind: SegmentKind::Plain,
                });
            }
            segments.push(MixedSegment {
                text: cluster,
                kind: SegmentKind::Symbol,
            });
        } else if plain_start.is_none() {
            plain_start = Some(start);
        }
    }

    if let Some(from) = plain_start {
        segments.push(MixedSegment {
            text: &text[from..],
            kind: SegmentKind::Plain,
        });
    }
    segments
}

fn is_symbol_cluster(cluster: &str) -> bool {
    let presentation = CodePointSetData::new::<EmojiPresentation>();
    let regional = CodePointSetData::new::<RegionalIndicator>();
    let pictographic = CodePointSetData::new::<ExtendedPictographic>();

    let mut has_pictographic = false;
    let mut has_vs16 = false;
    for ch in cluster.chars() {
        if presentation.contains(ch) || regional.contains(ch) || ch == COMBINING_KEYCAP {
            return true;
        }
        has_pictographic |= pictographic.contains(ch);
        has_vs16 |= ch == VARIATION_SELECTOR_16;
    }
    has_pictographic && has_vs16
}

/// File name stem of a symbol bitmap: lowercase hex code points joined by `-`.
///
/// VS16 is dropped unless the cluster is a ZWJ sequence, which matches how
/// twemoji names its assets.
pub fn symbol_code(cluster: &str) -> String {
    let keep_vs16 = cluster.contains(ZERO_WIDTH_JOINER);
    cluster
        .chars()
        .filter(|&ch| keep_vs16 || ch != VARIATION_SELECTOR_16)
        .map(|ch| format!("{:x}", ch as u32))
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(text: &str) -> Vec<(&str, bool)> {
        segment(text)
            .into_iter()
            .map(|s| (s.text, s.is_symbol()))
            .collect()
    }

    #[test]
    fn test_plain_text_is_one_segment() {
        assert_eq!(kinds("Buy now, pay later"), vec![("Buy now, pay later", false)]);
        assert!(segment("").is_empty());
    }

    #[test]
    fn test_symbols_split_plain_runs() {
        assert_eq!(
            kinds("Hot 🔥 deal 🎉"),
            vec![("Hot ", false), ("🔥", true), (" deal ", false), ("🎉", true)]
        );
    }

    #[test]
    fn test_adjacent_symbols_stay_separate() {
        assert_eq!(kinds("🔥🔥"), vec![("🔥", true), ("🔥", true)]);
    }

    #[test]
    fn test_sequences_are_single_symbols() {
        // family ZWJ sequence, a flag and a keycap
        let text = "👩\u{200D}👩\u{200D}👧🇺🇦1\u{FE0F}\u{20E3}";
        let segments = segment(text);
        assert_eq!(segments.len(), 3);
        assert!(segments.iter().all(MixedSegment::is_symbol));
    }

    #[test]
    fn test_text_presentation_stays_plain() {
        // © without VS16 is text, with VS16 it is an emoji
        assert_eq!(kinds("© 2025"), vec![("© 2025", false)]);
        assert_eq!(kinds("\u{00A9}\u{FE0F}"), vec![("\u{00A9}\u{FE0F}", true)]);
    }

    #[test]
    fn test_symbol_codes() {
        assert_eq!(symbol_code("🔥"), "1f525");
        assert_eq!(symbol_code("\u{2764}\u{FE0F}"), "2764");
        assert_eq!(symbol_code("🇺🇦"), "1f1fa-1f1e6");
        assert_eq!(
            symbol_code("\u{2764}\u{FE0F}\u{200D}\u{1F525}"),
            "2764-fe0f-200d-1f525"
        );
    }
}
