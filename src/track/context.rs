use std::sync::Arc;
use crate::config::AppConfig;
use crate::downloader::strategies::{AcquisitionStrategy, DirectUrlStrategy, DownloadStrategy};
use crate::downloader::ExtractionEngine;
use crate::security::CredentialProvider;
use crate::toggles::FeatureToggle;
use crate::utils::CommandRunner;

/// Collaborators shared by every track resolution.
pub struct ResolveContext {
    pub toggles: Arc<dyn FeatureToggle>,
    pub credentials: Arc<dyn CredentialProvider>,
    pub download: Arc<dyn AcquisitionStrategy>,
    pub direct: Arc<dyn AcquisitionStrategy>,
    pub toggle_key: String,
    pub toggle_fallback: bool,
    pub stream_url_min_len: usize,
}

impl ResolveContext {
    pub fn new(
        config: &AppConfig,
        toggles: Arc<dyn FeatureToggle>,
        engine: Arc<dyn ExtractionEngine>,
        credentials: Arc<dyn CredentialProvider>,
        runner: Arc<dyn CommandRunner>,
    ) -> Self {
        let download = DownloadStrategy::new(engine, config.download_dir.clone(), config.retries);
        let direct = DirectUrlStrategy::new(runner, config.ytdlp_path.clone());

        Self {
            toggles,
            credentials,
            download: Arc::new(download),
            direct: Arc::new(direct),
            toggle_key: config.download_toggle_key.clone(),
            toggle_fallback: config.toggle_fallback,
            stream_url_min_len: config.stream_url_min_len,
        }
    }

    /// Whether downloads are cached locally; a failed lookup falls back to the configured default.
    pub async fn download_mode(&self) -> bool {
        match self.toggles.is_enabled(&self.toggle_key).await {
            Ok(enabled) => enabled,
            Err(e) => {
                log::warn!(
                    "⚠️ [TOGGLE] Lookup of '{}' failed ({}), using {}",
                    self.toggle_key,
                    e,
                    self.toggle_fallback
                );
                self.toggle_fallback
            }
        }
    }
}
