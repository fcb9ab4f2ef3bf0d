use std::path::{Path, PathBuf};
use async_trait::async_trait;
use rand::seq::SliceRandom;
use crate::config::AppConfig;

/// Supplies provider auth material for video-hosting sources.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    async fn cookie_file(&self) -> Option<PathBuf>;
}

/// Netscape cookie exports on disk.
///
/// An explicitly configured file wins. Otherwise one `*.txt` file is picked at random from the
/// cookies directory on every call, spreading requests over several exported sessions.
pub struct CookieJar {
    cookie_file: Option<PathBuf>,
    cookies_dir: PathBuf,
}

async fn is_file(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|meta| meta.is_file())
        .unwrap_or(false)
}

impl CookieJar {
    pub fn new(cookie_file: Option<PathBuf>, cookies_dir: PathBuf) -> Self {
        Self { cookie_file, cookies_dir }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.cookie_file.clone(), config.cookies_dir.clone())
    }

    async fn candidates(dir: &Path) -> Vec<PathBuf> {
        let mut entries = match tokio::fs::read_dir(dir).await {
            Ok(entries) => entries,
            Err(e) => {
                log::debug!("[COOKIES] Cannot read {:?}: {}", dir, e);
                return Vec::new();
            }
        };

        let mut candidates = Vec::new();
        while let Ok(Some(entry)) = entries.next_entry().await {
            let path = entry.path();
            if path.extension().map_or(false, |ext| ext == "txt") && is_file(&path).await {
                candidates.push(path);
            }
        }
        candidates
    }
}

#[async_trait]
impl CredentialProvider for CookieJar {
    async fn cookie_file(&self) -> Option<PathBuf> {
        if let Some(path) = &self.cookie_file {
            if is_file(path).await {
                return Some(path.clone());
            }
            log::warn!("⚠️ [COOKIES] Configured cookie file {:?} does not exist", path);
        }

        let candidates = Self::candidates(&self.cookies_dir).await;
        let picked = candidates.choose(&mut rand::thread_rng()).cloned();
        if picked.is_none() {
            log::warn!("⚠️ [COOKIES] No cookie files found in {:?}, continuing without cookies", self.cookies_dir);
        }
        picked
    }
}
