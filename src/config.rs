use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use crate::errors::{AppError, Result};

pub const DEFAULT_TOGGLE_KEY: &str = "ytdownloader";

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub download_dir: PathBuf,
    pub ytdlp_path: String,
    pub cookie_file: Option<PathBuf>,
    pub cookies_dir: PathBuf,
    /// Toggle consulted to decide between caching downloads and streaming direct URLs.
    pub download_toggle_key: String,
    /// Used when the toggle lookup itself fails.
    pub toggle_fallback: bool,
    pub retries: u32,
    /// Resolved URLs are longer than this; local paths usually are not.
    pub stream_url_min_len: usize,
    pub features: HashMap<String, bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        let mut features = HashMap::new();
        features.insert(DEFAULT_TOGGLE_KEY.to_string(), true);

        Self {
            download_dir: PathBuf::from("downloads"),
            ytdlp_path: "yt-dlp".to_string(),
            cookie_file: None,
            cookies_dir: PathBuf::from("cookies"),
            download_toggle_key: DEFAULT_TOGGLE_KEY.to_string(),
            toggle_fallback: false,
            retries: 3,
            stream_url_min_len: 30,
            features,
        }
    }
}

impl AppConfig {
    /// Loads from the default config file (if present) and `TRACK_RESOLVER__*` environment variables.
    pub fn load() -> Result<Self> {
        let path = Self::get_config_path()?;
        Self::load_from(Some(&path))
    }

    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            log::debug!("Reading configuration from {:?}", path);
            builder = builder.add_source(config::File::from(path).required(false));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("TRACK_RESOLVER")
                .separator("__")
                .try_parsing(true),
        );

        let config: AppConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.download_dir.as_os_str().is_empty() {
            return Err(AppError::Validation("download_dir cannot be empty".to_string()));
        }
        if self.ytdlp_path.trim().is_empty() {
            return Err(AppError::Validation("ytdlp_path cannot be empty".to_string()));
        }
        if self.stream_url_min_len == 0 {
            return Err(AppError::Validation("stream_url_min_len must be >= 1".to_string()));
        }
        Ok(())
    }

    fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| AppError::Config(config::ConfigError::Message("Could not find config directory".to_string())))?;

        Ok(config_dir.join("track-resolver").join("config.json"))
    }
}
