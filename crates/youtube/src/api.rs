//! Wire types for the handful of Data API responses we read.

use serde::Deserialize;

use crate::{CommentPage, RawComment, VideoInfo};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VideoListResponse {
    #[serde(default)]
    pub items: Vec<Video>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Video {
    pub snippet: VideoSnippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VideoSnippet {
    pub channel_id: String,
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CommentThreadListResponse {
    #[serde(default)]
    pub items: Vec<CommentThread>,
    pub next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommentThread {
    pub snippet: ThreadSnippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ThreadSnippet {
    pub top_level_comment: TopLevelComment,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TopLevelComment {
    pub snippet: CommentSnippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CommentSnippet {
    #[serde(default)]
    pub text_display: String,
    pub author_channel_id: Option<AuthorChannelId>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AuthorChannelId {
    pub value: String,
}

/// Google's standard error envelope: `{"error": {"code": 403, "message": "..."}}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: String,
}

impl VideoListResponse {
    pub fn into_video_info(self) -> Option<VideoInfo> {
        self.items.into_iter().next().map(|video| VideoInfo {
            channel_id: video.snippet.channel_id,
            title: video.snippet.title,
        })
    }
}

impl From<CommentThreadListResponse> for CommentPage {
    fn from(response: CommentThreadListResponse) -> Self {
        let comments = response
            .items
            .into_iter()
            .map(|thread| {
                let snippet = thread.snippet.top_level_comment.snippet;
                RawComment {
                    text: snippet.text_display,
                    author_channel_id: snippet.author_channel_id.map(|id| id.value),
                }
            })
            .collect();
        CommentPage {
            comments,
            next_page_token: response.next_page_token.filter(|token| !token.is_empty()),
        }
    }
}
