use std::collections::HashMap;
use std::sync::Arc;
use async_trait::async_trait;
use tokio::sync::RwLock;
use crate::errors::Result;

/// Process-wide on/off switches, e.g. "cache downloads locally".
#[async_trait]
pub trait FeatureToggle: Send + Sync {
    async fn is_enabled(&self, key: &str) -> Result<bool>;
}

/// In-memory toggles seeded from configuration.
pub struct StaticToggles {
    toggles: Arc<RwLock<HashMap<String, bool>>>,
}

impl StaticToggles {
    pub fn new(initial: HashMap<String, bool>) -> Self {
        Self {
            toggles: Arc::new(RwLock::new(initial)),
        }
    }

    pub async fn set(&self, key: &str, enabled: bool) {
        log::info!("🔧 [TOGGLE] {} -> {}", key, enabled);
        let mut toggles = self.toggles.write().await;
        toggles.insert(key.to_string(), enabled);
    }
}

#[async_trait]
impl FeatureToggle for StaticToggles {
    async fn is_enabled(&self, key: &str) -> Result<bool> {
        let toggles = self.toggles.read().await;
        Ok(toggles.get(key).copied().unwrap_or(false))
    }
}
