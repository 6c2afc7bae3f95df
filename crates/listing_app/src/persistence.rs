use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use listing_core::EngineSettings;
use listing_engine::{AtomicFileWriter, SettingsStore};
use listing_logging::{listing_error, listing_info, listing_warn};

pub(crate) const SETTINGS_FILENAME: &str = ".listing_settings.ron";

/// Settings persisted as RON next to the working directory. A missing or
/// unreadable file yields the default settings.
#[derive(Debug, Clone)]
pub(crate) struct FileSettingsStore {
    path: PathBuf,
}

impl FileSettingsStore {
    pub(crate) fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> EngineSettings {
        let content = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return EngineSettings::default();
            }
            Err(err) => {
                listing_warn!("Failed to read settings from {:?}: {}", self.path, err);
                return EngineSettings::default();
            }
        };

        match ron::from_str(&content) {
            Ok(settings) => {
                listing_info!("Loaded settings from {:?}", self.path);
                settings
            }
            Err(err) => {
                listing_warn!("Failed to parse settings from {:?}: {}", self.path, err);
                EngineSettings::default()
            }
        }
    }

    fn save(&self, settings: &EngineSettings) {
        let pretty = ron::ser::PrettyConfig::new();
        let content = match ron::ser::to_string_pretty(settings, pretty) {
            Ok(text) => text,
            Err(err) => {
                listing_error!("Failed to serialize settings: {}", err);
                return;
            }
        };

        if let Err(err) = AtomicFileWriter::new().write(&self.path, &content) {
            listing_error!("Failed to write settings to {:?}: {}", self.path, err);
        }
    }
}

#[async_trait]
impl SettingsStore for FileSettingsStore {
    async fn get(&self) -> EngineSettings {
        self.load()
    }

    async fn set(&self, settings: EngineSettings) {
        self.save(&settings);
    }
}
