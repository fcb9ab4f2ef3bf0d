use std::path::PathBuf;
use std::sync::Arc;
use async_trait::async_trait;
use super::{AcquireRequest, AcquisitionStrategy};
use crate::downloader::{ExtractOptions, ExtractionEngine};
use crate::errors::{AppError, Result};
use crate::utils::ensure_dir_exists;

/// Fetches the media into the download directory and returns the local path.
pub struct DownloadStrategy {
    engine: Arc<dyn ExtractionEngine>,
    download_dir: PathBuf,
    retries: u32,
}

impl DownloadStrategy {
    pub fn new(engine: Arc<dyn ExtractionEngine>, download_dir: PathBuf, retries: u32) -> Self {
        Self { engine, download_dir, retries }
    }
}

#[async_trait]
impl AcquisitionStrategy for DownloadStrategy {
    async fn acquire(&self, request: &AcquireRequest) -> Result<String> {
        let start_time = std::time::Instant::now();
        log::info!("🚀 [DOWNLOAD] {} via {}", request.url, self.engine.name());

        ensure_dir_exists(&self.download_dir)
            .await
            .map_err(|e| e.into_acquisition("preparing download directory"))?;

        let options = ExtractOptions::for_download(
            request.video,
            &self.download_dir,
            self.retries,
            request.cookie_file.clone(),
        );
        let engine = Arc::clone(&self.engine);
        let download_dir = self.download_dir.clone();
        let url = request.url.clone();

        // Probe and fetch block, keep them off the runtime workers.
        let path = tokio::task::spawn_blocking(move || -> Result<PathBuf> {
            let info = engine.probe(&url, &options)?;
            let target = info.target_path(&download_dir);

            if target.try_exists()? {
                log::info!("💾 [DOWNLOAD] Reusing existing file {:?}", target);
            } else {
                engine.fetch(&url, &options)?;
            }
            Ok(target)
        })
        .await
        .map_err(|e| AppError::Acquisition(format!("Extraction worker failed: {}", e)))?
        .map_err(|e| e.into_acquisition("downloading"))?;

        log::info!(
            "✅ [DOWNLOAD] Ready at {:?} (took {:.2} seconds)",
            path,
            start_time.elapsed().as_secs_f64()
        );
        Ok(path.to_string_lossy().to_string())
    }

    fn get_name(&self) -> &str {
        "download"
    }
}
