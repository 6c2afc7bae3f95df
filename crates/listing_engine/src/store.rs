use std::sync::Mutex;

use listing_core::EngineSettings;

/// External owner of the user's settings. The engine only ever reads a copy.
#[async_trait::async_trait]
pub trait SettingsStore: Send + Sync {
    /// Current settings, or the documented defaults when nothing is stored.
    async fn get(&self) -> EngineSettings;

    /// Persist settings. Fire-and-forget: failures are the store's concern.
    async fn set(&self, settings: EngineSettings);
}

#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    settings: Mutex<Option<EngineSettings>>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: EngineSettings) -> Self {
        Self {
            settings: Mutex::new(Some(settings)),
        }
    }
}

#[async_trait::async_trait]
impl SettingsStore for MemorySettingsStore {
    async fn get(&self) -> EngineSettings {
        let guard = self.settings.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        guard.unwrap_or_default()
    }

    async fn set(&self, settings: EngineSettings) {
        let mut guard = self.settings.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = Some(settings);
    }
}
