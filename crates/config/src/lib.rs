use std::env;
use std::fs;
use std::path::Path;

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

// ── YouTube Data API ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct YoutubeConfig {
    /// Data API v3 key.  Overridden at runtime by `YOUTUBE_API_KEY` (or the
    /// older `API_KEY`) when set.
    pub api_key: String,
    /// Base URL for the Data API.  `YOUTUBE_BASE_URL` overrides it.
    pub base_url: String,
    /// `maxResults` sent with every commentThreads request (API maximum: 100).
    pub page_size: u32,
    /// Stop paging once this many comments have been collected.
    pub max_comments: usize,
    pub timeout_secs: u64,
}

impl Default for YoutubeConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://www.googleapis.com/youtube/v3".to_string(),
            page_size: 100,
            max_comments: 600,
            timeout_secs: 15,
        }
    }
}

// ── Relevance filter ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// A comment containing emoji is kept only when
    /// `text_chars / (text_chars + emoji_count)` is strictly above this value.
    pub emoji_ratio_threshold: f64,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            emoji_ratio_threshold: 0.65,
        }
    }
}

// ── Report output ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Filtered comments are written here, one per line, overwritten each run.
    pub output_path: String,
    /// How many raw comments / filtered comments / scores to echo.
    pub preview_count: usize,
    pub show_chart: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_path: "ytcomments.txt".to_string(),
            preview_count: 5,
            show_chart: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    pub log_level: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub youtube: YoutubeConfig,
    pub filter: FilterConfig,
    pub report: ReportConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let mut config = Self::default();
        if let Ok(raw) = fs::read_to_string(path) {
            config = toml::from_str(&raw)?;
        }

        config.apply_env_overrides(|name| env::var(name).ok());
        Ok(config)
    }

    /// Apply environment overrides through `lookup`.  Non-empty values win
    /// over whatever the config file said.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if let Some(key) = non_empty("YOUTUBE_API_KEY").or_else(|| non_empty("API_KEY")) {
            self.youtube.api_key = key;
        }

        if let Some(url) = non_empty("YOUTUBE_BASE_URL") {
            self.youtube.base_url = url;
        }
    }

    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)?;
        }

        let rendered = toml::to_string_pretty(self)?;
        fs::write(path, rendered)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        let threshold = self.filter.emoji_ratio_threshold;
        if !(0.0..1.0).contains(&threshold) {
            bail!("filter.emoji_ratio_threshold must be in [0, 1), got {threshold}");
        }
        if self.youtube.max_comments == 0 {
            bail!("youtube.max_comments must be at least 1");
        }
        if !(1..=100).contains(&self.youtube.page_size) {
            bail!(
                "youtube.page_size must be between 1 and 100, got {}",
                self.youtube.page_size
            );
        }
        Ok(())
    }

    pub fn has_api_key(&self) -> bool {
        !self.youtube.api_key.trim().is_empty()
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
