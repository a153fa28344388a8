//! Extract the 11-character video id from a user-supplied URL.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Canonical YouTube content identifier (always 11 chars of `[A-Za-z0-9_-]`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VideoId(String);

impl VideoId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for VideoId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// URL shapes tried in order: long-form `watch?v=` first, then `youtu.be/`.
fn url_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            r"(?:https?://)?(?:www\.)?youtube\.com/watch\?v=([a-zA-Z0-9_-]{11})",
            r"(?:https?://)?(?:www\.)?youtu\.be/([a-zA-Z0-9_-]{11})",
        ]
        .iter()
        .map(|pattern| Regex::new(pattern).expect("video url pattern"))
        .collect()
    })
}

/// Returns the id captured by the first matching URL shape, or `None`.
///
/// Matching is a substring search, so surrounding text (or trailing query
/// parameters such as `&t=42s`) does not prevent a match.
pub fn resolve_video_id(input: &str) -> Option<VideoId> {
    url_patterns().iter().find_map(|pattern| {
        pattern
            .captures(input)
            .and_then(|caps| caps.get(1))
            .map(|id| VideoId(id.as_str().to_string()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolved(input: &str) -> Option<String> {
        resolve_video_id(input).map(|id| id.to_string())
    }

    #[test]
    fn long_form_url_resolves() {
        assert_eq!(
            resolved("https://youtube.com/watch?v=dQw4w9WgXcQ").as_deref(),
            Some("dQw4w9WgXcQ")
        );
        assert_eq!(
            resolved("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42s").as_deref(),
            Some("dQw4w9WgXcQ")
        );
    }

    #[test]
    fn short_link_resolves() {
        assert_eq!(
            resolved("https://youtu.be/dQw4w9WgXcQ").as_deref(),
            Some("dQw4w9WgXcQ")
        );
        assert_eq!(resolved("youtu.be/a_b-c1234XY").as_deref(), Some("a_b-c1234XY"));
    }

    #[test]
    fn scheme_and_www_are_optional() {
        assert_eq!(
            resolved("youtube.com/watch?v=dQw4w9WgXcQ").as_deref(),
            Some("dQw4w9WgXcQ")
        );
        assert_eq!(
            resolved("http://www.youtu.be/dQw4w9WgXcQ").as_deref(),
            Some("dQw4w9WgXcQ")
        );
    }

    #[test]
    fn unrecognised_input_yields_none() {
        assert_eq!(resolved("not a url"), None);
        assert_eq!(resolved(""), None);
        assert_eq!(resolved("https://vimeo.com/123456789"), None);
        // Too short to be an id.
        assert_eq!(resolved("https://youtu.be/abc"), None);
    }

    #[test]
    fn only_first_eleven_id_characters_are_captured() {
        assert_eq!(
            resolved("https://youtu.be/dQw4w9WgXcQextra").as_deref(),
            Some("dQw4w9WgXcQ")
        );
    }
}
