// Upstream track metadata as handed over by the command layer

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use crate::errors::AppError;

/// Provider a track was sourced from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    Apple,
    Resso,
    Spotify,
    Youtube,
    M3u8,
    Soundcloud,
    Telegram,
    Other,
}

impl SourceType {
    /// On-demand streaming services whose tracks are played live until a duration is known.
    pub fn is_streaming_service(&self) -> bool {
        matches!(
            self,
            SourceType::Apple | SourceType::Resso | SourceType::Spotify | SourceType::Youtube
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::Apple => "apple",
            SourceType::Resso => "resso",
            SourceType::Spotify => "spotify",
            SourceType::Youtube => "youtube",
            SourceType::M3u8 => "m3u8",
            SourceType::Soundcloud => "soundcloud",
            SourceType::Telegram => "telegram",
            SourceType::Other => "other",
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "apple" => Ok(SourceType::Apple),
            "resso" => Ok(SourceType::Resso),
            "spotify" => Ok(SourceType::Spotify),
            "youtube" => Ok(SourceType::Youtube),
            "m3u8" => Ok(SourceType::M3u8),
            "soundcloud" => Ok(SourceType::Soundcloud),
            "telegram" => Ok(SourceType::Telegram),
            "other" => Ok(SourceType::Other),
            other => Err(AppError::Validation(format!("Unknown source type: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackInfo {
    pub title: Option<String>,
    pub link: String,
    #[serde(default)]
    pub duration: Option<u64>, // seconds
    pub streamtype: SourceType,
    #[serde(default)]
    pub video: bool,
    #[serde(default)]
    pub thumb: Option<String>,
    /// Used for acquisition instead of `link` when present.
    #[serde(default)]
    pub download_url: Option<String>,
    #[serde(default)]
    pub is_live: Option<bool>,
    /// Already-downloaded asset, e.g. a chat attachment.
    #[serde(default)]
    pub file_path: Option<String>,
}

impl TrackInfo {
    pub fn new(title: Option<String>, link: impl Into<String>, streamtype: SourceType) -> Self {
        Self {
            title,
            link: link.into(),
            duration: None,
            streamtype,
            video: false,
            thumb: None,
            download_url: None,
            is_live: None,
            file_path: None,
        }
    }

    pub fn with_duration(mut self, seconds: u64) -> Self {
        self.duration = Some(seconds);
        self
    }

    pub fn with_video(mut self, video: bool) -> Self {
        self.video = video;
        self
    }

    pub fn with_download_url(mut self, url: Option<String>) -> Self {
        self.download_url = url;
        self
    }

    pub fn with_live(mut self, is_live: Option<bool>) -> Self {
        self.is_live = is_live;
        self
    }

    pub fn with_file_path(mut self, path: Option<String>) -> Self {
        self.file_path = path;
        self
    }
}
