use std::fmt;
use std::time::Duration;

use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use tubemood_config::YoutubeConfig;

use crate::api::{CommentThreadListResponse, ErrorEnvelope, VideoListResponse};
use crate::{CommentPage, CommentSource, VideoInfo, YoutubeError};

const USER_AGENT: &str = "tubemood/0.1 (https://github.com/your-org/tubemood)";
const API_KEY_HEADER: &str = "X-Goog-Api-Key";

/// Blocking Data API v3 client.
///
/// The key travels in a header, never in the query string, so request URLs
/// (which end up in error messages and logs) stay free of it.  A missing key
/// is reported on the first request rather than at construction.
#[derive(Clone)]
pub struct YoutubeClient {
    http: Client,
    base_url: String,
    api_key: String,
    page_size: u32,
}

impl fmt::Debug for YoutubeClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("YoutubeClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("page_size", &self.page_size)
            .finish()
    }
}

impl YoutubeClient {
    pub fn new(config: &YoutubeConfig) -> Result<Self, YoutubeError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.trim().to_string(),
            page_size: config.page_size,
        })
    }

    fn get<T: DeserializeOwned>(
        &self,
        resource: &str,
        params: &[(&str, &str)],
    ) -> Result<T, YoutubeError> {
        if self.api_key.is_empty() {
            return Err(YoutubeError::MissingApiKey);
        }

        let endpoint = format!("{}/{resource}", self.base_url);
        let response = self
            .http
            .get(&endpoint)
            .query(params)
            .header("Accept", "application/json")
            .header(API_KEY_HEADER, self.api_key.as_str())
            .send()
            .map_err(reqwest::Error::without_url)?;

        let status = response.status();
        let body = response.text().map_err(reqwest::Error::without_url)?;
        debug!(%endpoint, status = status.as_u16(), bytes = body.len(), "youtube response");

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .map(|envelope| envelope.error.message)
                .unwrap_or(body);
            return Err(YoutubeError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

impl CommentSource for YoutubeClient {
    fn video(&self, video_id: &str) -> Result<VideoInfo, YoutubeError> {
        let response: VideoListResponse =
            self.get("videos", &[("part", "snippet"), ("id", video_id)])?;
        response
            .into_video_info()
            .ok_or_else(|| YoutubeError::VideoNotFound(video_id.to_string()))
    }

    fn comment_page(
        &self,
        video_id: &str,
        page_token: Option<&str>,
    ) -> Result<CommentPage, YoutubeError> {
        let page_size = self.page_size.to_string();
        let mut params = vec![
            ("part", "snippet"),
            ("videoId", video_id),
            ("maxResults", page_size.as_str()),
            ("textFormat", "plainText"),
        ];
        if let Some(token) = page_token {
            params.push(("pageToken", token));
        }

        let response: CommentThreadListResponse = self.get("commentThreads", &params)?;
        Ok(response.into())
    }
}
