pub mod strategies;
pub mod ytdlp_rust;

use serde::{Deserialize, Serialize};
use crate::errors::Result;
use std::path::{Path, PathBuf};

pub use ytdlp_rust::YtDlpEngine;

pub const VIDEO_FORMAT: &str = "(bestvideo[height<=?720][width<=?1280][ext=mp4])+(bestaudio[ext=m4a])";
pub const AUDIO_FORMAT: &str = "bestaudio/best";
pub const OUTPUT_TEMPLATE: &str = "%(id)s.%(ext)s";

/// Options handed to the extraction engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExtractOptions {
    pub format: String,
    pub continue_partial: bool,
    pub output_template: String,
    pub geo_bypass: bool,
    pub no_playlist: bool,
    pub no_check_certificate: bool,
    pub retries: u32,
    pub quiet: bool,
    pub no_warnings: bool,
    pub cookie_file: Option<PathBuf>,
}

impl ExtractOptions {
    pub fn for_download(video: bool, download_dir: &Path, retries: u32, cookie_file: Option<PathBuf>) -> Self {
        Self {
            format: (if video { VIDEO_FORMAT } else { AUDIO_FORMAT }).to_string(),
            continue_partial: true,
            output_template: download_dir.join(OUTPUT_TEMPLATE).to_string_lossy().to_string(),
            geo_bypass: true,
            no_playlist: true,
            no_check_certificate: true,
            retries,
            quiet: true,
            no_warnings: true,
            cookie_file,
        }
    }

    /// Renders the options as yt-dlp command line flags.
    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec![
            "--format".to_string(),
            self.format.clone(),
            "--output".to_string(),
            self.output_template.clone(),
            "--retries".to_string(),
            self.retries.to_string(),
        ];

        let flags = [
            (self.continue_partial, "--continue"),
            (self.geo_bypass, "--geo-bypass"),
            (self.no_playlist, "--no-playlist"),
            (self.no_check_certificate, "--no-check-certificate"),
            (self.quiet, "--quiet"),
            (self.no_warnings, "--no-warnings"),
        ];
        args.extend(flags.iter().filter(|(on, _)| *on).map(|(_, flag)| flag.to_string()));

        if let Some(cookies) = &self.cookie_file {
            args.push("--cookies".to_string());
            args.push(cookies.to_string_lossy().to_string());
        }
        args
    }
}

/// Metadata returned by a probe; no media is transferred.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProbeInfo {
    pub id: String,
    pub ext: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub is_live: Option<bool>,
}

impl ProbeInfo {
    /// `<dir>/<id>.<ext>`, where the engine writes the file for this template.
    pub fn target_path(&self, download_dir: &Path) -> PathBuf {
        download_dir.join(format!("{}.{}", self.id, self.ext))
    }
}

/// Turns a source URL into metadata and/or a local file.
///
/// Calls block; callers run them on a blocking worker.
pub trait ExtractionEngine: Send + Sync {
    fn name(&self) -> &str;
    fn probe(&self, url: &str, options: &ExtractOptions) -> Result<ProbeInfo>;
    fn fetch(&self, url: &str, options: &ExtractOptions) -> Result<()>;
}
