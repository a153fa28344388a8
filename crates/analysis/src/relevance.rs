//! Relevance gate: separates real reactions from link spam and emoji noise.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, info};

use crate::emoji::{EmojiCounter, UnicodeEmojiCounter};

pub const DEFAULT_EMOJI_RATIO_THRESHOLD: f64 = 0.65;

/// Why a comment was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Nothing alphanumeric left: pure punctuation, emoji or whitespace.
    NoAlphanumeric,
    /// A hyperlink appears anywhere in the comment.
    ContainsLink,
    /// Emoji outweigh the text.
    EmojiHeavy,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Rejection::NoAlphanumeric => "no alphanumeric characters",
            Rejection::ContainsLink => "contains a hyperlink",
            Rejection::EmojiHeavy => "emoji ratio too high",
        };
        f.write_str(reason)
    }
}

fn hyperlink_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"http[s]?://(?:[a-zA-Z]|[0-9]|[$-_@.&+]|[!*\\(\\),]|(?:%[0-9a-fA-F][0-9a-fA-F]))+",
        )
        .expect("hyperlink regex")
    })
}

/// Comment normalisation applied before every relevance check.
///
/// Line breaks fold into a single space, so a normalised comment always fits
/// on one line of the output file.
pub fn normalize(comment: &str) -> String {
    comment
        .to_lowercase()
        .split(is_line_break)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\u{0B}' | '\u{0C}' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

pub struct RelevanceFilter<E = UnicodeEmojiCounter> {
    threshold: f64,
    emoji: E,
}

impl Default for RelevanceFilter {
    fn default() -> Self {
        Self::new(DEFAULT_EMOJI_RATIO_THRESHOLD)
    }
}

impl RelevanceFilter {
    pub fn new(threshold: f64) -> Self {
        Self::with_counter(threshold, UnicodeEmojiCounter)
    }
}

impl<E: EmojiCounter> RelevanceFilter<E> {
    pub fn with_counter(threshold: f64, emoji: E) -> Self {
        Self { threshold, emoji }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Normalise `raw` and decide whether it is worth scoring.
    ///
    /// The emoji ratio is `text_chars / (text_chars + emoji_count)` where
    /// `text_chars` is every non-whitespace char, emoji included.  Emoji are
    /// therefore counted on both sides of the fraction; the formula is kept
    /// as is because acceptance outcomes depend on it.
    pub fn evaluate(&self, raw: &str) -> Result<String, Rejection> {
        let comment = normalize(raw);

        if !comment.chars().any(char::is_alphanumeric) {
            return Err(Rejection::NoAlphanumeric);
        }
        if hyperlink_re().is_match(&comment) {
            return Err(Rejection::ContainsLink);
        }

        let emoji_count = self.emoji.count_emoji(&comment);
        if emoji_count == 0 {
            return Ok(comment);
        }

        let text_chars = comment.chars().filter(|c| !c.is_whitespace()).count();
        let ratio = text_chars as f64 / (text_chars + emoji_count) as f64;
        if ratio > self.threshold {
            Ok(comment)
        } else {
            Err(Rejection::EmojiHeavy)
        }
    }

    /// Keep the relevant comments, normalised, in their original order.
    pub fn filter<T: AsRef<str>>(&self, comments: &[T]) -> Vec<String> {
        let mut kept = Vec::with_capacity(comments.len());
        for raw in comments {
            match self.evaluate(raw.as_ref()) {
                Ok(comment) => kept.push(comment),
                Err(reason) => debug!(%reason, "dropped comment"),
            }
        }
        info!(
            fetched = comments.len(),
            kept = kept.len(),
            threshold = self.threshold,
            "relevance filter applied"
        );
        kept
    }
}
