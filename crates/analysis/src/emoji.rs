//! Emoji counting behind a small capability trait.

use std::sync::OnceLock;

use regex::Regex;

/// Counts emoji in a piece of text.
pub trait EmojiCounter {
    fn count_emoji(&self, text: &str) -> usize;
}

impl<F> EmojiCounter for F
where
    F: Fn(&str) -> usize,
{
    fn count_emoji(&self, text: &str) -> usize {
        self(text)
    }
}

/// Default counter: one count per emoji sequence.
///
/// A flag pair, a base pictograph with its skin-tone modifier and variation
/// selector, or a whole ZWJ family each count once.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeEmojiCounter;

impl EmojiCounter for UnicodeEmojiCounter {
    fn count_emoji(&self, text: &str) -> usize {
        emoji_re().find_iter(text).count()
    }
}

// Emoji code points outside the pictograph planes.  The surrounding blocks
// also hold plain symbols (★ ✓ ♪ ⌘) that are not emoji.
const BMP_EMOJI: &str = concat!(
    r"\u{00A9}\u{00AE}\u{203C}\u{2049}\u{2122}\u{2139}\u{2194}-\u{2199}\u{21A9}\u{21AA}",
    r"\u{231A}\u{231B}\u{2328}\u{23CF}\u{23E9}-\u{23F3}\u{23F8}-\u{23FA}\u{24C2}",
    r"\u{25AA}\u{25AB}\u{25B6}\u{25C0}\u{25FB}-\u{25FE}",
    r"\u{2600}-\u{2604}\u{260E}\u{2611}\u{2614}\u{2615}\u{2618}\u{261D}\u{2620}",
    r"\u{2622}\u{2623}\u{2626}\u{262A}\u{262E}\u{262F}\u{2638}-\u{263A}\u{2640}\u{2642}",
    r"\u{2648}-\u{2653}\u{265F}\u{2660}\u{2663}\u{2665}\u{2666}\u{2668}\u{267B}",
    r"\u{267E}\u{267F}\u{2692}-\u{2697}\u{2699}\u{269B}\u{269C}\u{26A0}\u{26A1}\u{26A7}",
    r"\u{26AA}\u{26AB}\u{26B0}\u{26B1}\u{26BD}\u{26BE}\u{26C4}\u{26C5}\u{26C8}",
    r"\u{26CE}\u{26CF}\u{26D1}\u{26D3}\u{26D4}\u{26E9}\u{26EA}\u{26F0}-\u{26F5}",
    r"\u{26F7}-\u{26FA}\u{26FD}\u{2702}\u{2705}\u{2708}-\u{270D}\u{270F}\u{2712}",
    r"\u{2714}\u{2716}\u{271D}\u{2721}\u{2728}\u{2733}\u{2734}\u{2744}\u{2747}",
    r"\u{274C}\u{274E}\u{2753}-\u{2755}\u{2757}\u{2763}\u{2764}\u{2795}-\u{2797}",
    r"\u{27A1}\u{27B0}\u{27BF}\u{2934}\u{2935}\u{2B05}-\u{2B07}\u{2B1B}\u{2B1C}",
    r"\u{2B50}\u{2B55}\u{3030}\u{303D}\u{3297}\u{3299}",
);

fn emoji_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        let base = format!(r"[\u{{1F300}}-\u{{1FAFF}}{BMP_EMOJI}]");
        let pattern = format!(
            r"[\u{{1F1E6}}-\u{{1F1FF}}]{{2}}|{base}[\u{{1F3FB}}-\u{{1F3FF}}]?\u{{FE0F}}?(?:\u{{200D}}{base}[\u{{1F3FB}}-\u{{1F3FF}}]?\u{{FE0F}}?)*"
        );
        Regex::new(&pattern).expect("emoji regex")
    })
}
