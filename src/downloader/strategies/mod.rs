pub mod direct_url;
pub mod download;

use std::path::PathBuf;
use async_trait::async_trait;
use crate::errors::Result;

// Re-export strategies for easy access
pub use direct_url::DirectUrlStrategy;
pub use download::DownloadStrategy;

/// What a strategy needs to know about the track being acquired.
#[derive(Debug, Clone, PartialEq)]
pub struct AcquireRequest {
    pub url: String,
    pub video: bool,
    pub cookie_file: Option<PathBuf>,
}

#[async_trait]
pub trait AcquisitionStrategy: Send + Sync {
    /// Returns a local path or a directly playable URL.
    async fn acquire(&self, request: &AcquireRequest) -> Result<String>;
    fn get_name(&self) -> &str;
}
