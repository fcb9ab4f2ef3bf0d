//! A playable item and its resolution into a local file or a direct playback URL.

mod context;
mod fields;

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use crate::api::{SourceType, TrackInfo};
use crate::downloader::strategies::AcquireRequest;
use crate::errors::{AppError, Result};
use crate::utils::title_case;

pub use context::ResolveContext;
pub use fields::TrackField;

const VIDEO_HOST_MARKERS: [&str; 2] = ["youtube.com", "youtu.be"];

lazy_static! {
    static ref VIDEO_ID_RE: Regex =
        Regex::new(r"(?:v=|/)([0-9A-Za-z_-]{11})").expect("video id pattern is valid");
}

/// Whether a track is a live broadcast.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Liveness {
    Unknown,
    Live,
    OnDemand,
}

impl From<Option<bool>> for Liveness {
    fn from(value: Option<bool>) -> Self {
        match value {
            None => Liveness::Unknown,
            Some(true) => Liveness::Live,
            Some(false) => Liveness::OnDemand,
        }
    }
}

impl Liveness {
    pub fn as_option(&self) -> Option<bool> {
        match self {
            Liveness::Unknown => None,
            Liveness::Live => Some(true),
            Liveness::OnDemand => Some(false),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum Resolution {
    Unresolved,
    /// Left behind when a resolution is abandoned mid-flight; treated like `Unresolved`.
    Resolving,
    /// A local path or a playback URL.
    Resolved(String),
    Failed(String),
}

#[derive(Debug, Clone, Serialize)]
pub struct Track {
    title: Option<String>,
    link: String,
    duration: u64,
    streamtype: SourceType,
    video: bool,
    thumb: Option<String>,
    download_url: String,
    liveness: Liveness,
    video_id: String,
    state: Resolution,
}

pub fn is_video_host(url: &str) -> bool {
    VIDEO_HOST_MARKERS.iter().any(|marker| url.contains(marker))
}

/// First 11-character id following `v=` or a `/`.
pub fn extract_video_id(url: &str) -> Option<&str> {
    VIDEO_ID_RE
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

impl Track {
    pub fn new(info: TrackInfo) -> Result<Self> {
        let download_url = info
            .download_url
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| info.link.clone());
        if download_url.is_empty() {
            return Err(AppError::Validation("Track needs a link or a download url".to_string()));
        }

        let video_id = if is_video_host(&download_url) {
            extract_video_id(&download_url)
                .map(str::to_string)
                .ok_or_else(|| AppError::MalformedSource(format!("No video id in {}", download_url)))?
        } else {
            String::new()
        };

        let duration = info.duration.unwrap_or(0);
        let mut liveness = Liveness::from(info.is_live);
        if duration == 0 && liveness == Liveness::Unknown && info.streamtype.is_streaming_service() {
            liveness = Liveness::Live;
        }

        let state = match info.file_path.filter(|path| !path.is_empty()) {
            Some(path) => Resolution::Resolved(path),
            None => Resolution::Unresolved,
        };

        Ok(Self {
            title: info.title.as_deref().map(title_case),
            link: info.link,
            duration,
            streamtype: info.streamtype,
            video: info.video,
            thumb: info.thumb,
            download_url,
            liveness,
            video_id,
            state,
        })
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn link(&self) -> &str {
        &self.link
    }

    pub fn duration(&self) -> u64 {
        self.duration
    }

    pub fn streamtype(&self) -> SourceType {
        self.streamtype
    }

    pub fn is_video(&self) -> bool {
        self.video
    }

    pub fn thumb(&self) -> Option<&str> {
        self.thumb.as_deref()
    }

    pub fn download_url(&self) -> &str {
        &self.download_url
    }

    pub fn liveness(&self) -> Liveness {
        self.liveness
    }

    pub fn is_live(&self) -> bool {
        self.liveness == Liveness::Live
    }

    pub fn video_id(&self) -> &str {
        &self.video_id
    }

    pub fn state(&self) -> &Resolution {
        &self.state
    }

    pub fn file_path(&self) -> Option<&str> {
        match &self.state {
            Resolution::Resolved(path) => Some(path),
            _ => None,
        }
    }

    pub fn is_youtube(&self) -> bool {
        is_video_host(&self.download_url)
    }

    pub fn is_m3u8(&self) -> bool {
        self.streamtype == SourceType::M3u8
    }

    pub async fn exists(&self, ctx: &ResolveContext) -> bool {
        if self.file_path().is_none() {
            return false;
        }
        let download_mode = ctx.download_mode().await;
        self.exists_in_mode(download_mode, ctx).await
    }

    /// With downloads on, `file_path` is a local file; otherwise it may be a long signed URL.
    async fn exists_in_mode(&self, download_mode: bool, ctx: &ResolveContext) -> bool {
        let Some(path) = self.file_path() else {
            return false;
        };

        if download_mode {
            match tokio::fs::try_exists(path).await {
                Ok(found) => found,
                Err(e) => {
                    log::warn!("⚠️ [TRACK] Cannot check {}: {}", path, e);
                    false
                }
            }
        } else {
            path.len() > ctx.stream_url_min_len
        }
    }

    async fn acquire_request(&self, ctx: &ResolveContext) -> AcquireRequest {
        let cookie_file = if self.is_youtube() {
            ctx.credentials.cookie_file().await
        } else {
            None
        };

        AcquireRequest {
            url: self.download_url.clone(),
            video: self.video,
            cookie_file,
        }
    }

    /// Returns a playable local path or URL, reusing an earlier result while it is still valid.
    pub async fn resolve(&mut self, ctx: &ResolveContext) -> Result<String> {
        let download_mode = ctx.download_mode().await;

        if let Some(path) = self.file_path() {
            if self.exists_in_mode(download_mode, ctx).await {
                log::debug!("[TRACK] Cache hit for {}: {}", self.download_url, path);
                return Ok(path.to_string());
            }
        }

        let previous = std::mem::replace(&mut self.state, Resolution::Resolving);

        let (via, result) = if download_mode && !(self.is_live() || self.is_m3u8()) {
            let request = self.acquire_request(ctx).await;
            (ctx.download.get_name(), ctx.download.acquire(&request).await)
        } else if self.is_m3u8() {
            let manifest = if self.link.is_empty() { &self.download_url } else { &self.link };
            ("manifest", Ok(manifest.clone()))
        } else {
            let request = self.acquire_request(ctx).await;
            (ctx.direct.get_name(), ctx.direct.acquire(&request).await)
        };

        match result {
            Ok(resolved) => {
                log::info!("✅ [TRACK] {} -> {} ({})", self.title().unwrap_or(&self.link), resolved, via);
                self.state = Resolution::Resolved(resolved.clone());
                Ok(resolved)
            }
            Err(e) => {
                log::error!("❌ [TRACK] Could not resolve {} ({}): {}", self.download_url, via, e);
                // A stale path given upfront stays on the track.
                self.state = match previous {
                    Resolution::Resolved(path) => Resolution::Resolved(path),
                    _ => Resolution::Failed(e.to_string()),
                };
                Err(e)
            }
        }
    }
}
