//! Comment retrieval from the YouTube Data API v3.
//!
//! [`YoutubeClient`] talks HTTP; [`CommentSource`] is the seam the rest of
//! the pipeline depends on, so paging logic in [`CommentPages`] can be driven
//! by an in-memory source in tests.

mod api;
mod client;
mod pages;

use thiserror::Error;

pub use client::YoutubeClient;
pub use pages::{CommentPages, fetch_comments};

#[derive(Debug, Error)]
pub enum YoutubeError {
    #[error("no YouTube API key configured (set YOUTUBE_API_KEY or API_KEY)")]
    MissingApiKey,
    #[error("request to YouTube failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("YouTube API error {status}: {message}")]
    Api { status: u16, message: String },
    #[error("could not decode YouTube response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("video {0} not found")]
    VideoNotFound(String),
}

/// Uploader details for a single video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoInfo {
    pub channel_id: String,
    pub title: String,
}

/// A top-level comment as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawComment {
    pub text: String,
    /// `None` for comments whose author channel was not reported.
    pub author_channel_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentPage {
    pub comments: Vec<RawComment>,
    pub next_page_token: Option<String>,
}

/// Anything that can look up a video and hand out pages of its comments.
pub trait CommentSource {
    fn video(&self, video_id: &str) -> Result<VideoInfo, YoutubeError>;

    fn comment_page(
        &self,
        video_id: &str,
        page_token: Option<&str>,
    ) -> Result<CommentPage, YoutubeError>;
}

impl<S: CommentSource + ?Sized> CommentSource for &S {
    fn video(&self, video_id: &str) -> Result<VideoInfo, YoutubeError> {
        (**self).video(video_id)
    }

    fn comment_page(
        &self,
        video_id: &str,
        page_token: Option<&str>,
    ) -> Result<CommentPage, YoutubeError> {
        (**self).comment_page(video_id, page_token)
    }
}
