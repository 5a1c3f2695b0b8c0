// Settings Store - Persistence port for the settings record
//
// The host decides where settings live. `JsonFileStore` keeps them as a
// pretty-printed JSON file; `MemoryStore` keeps them in process.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use directories::ProjectDirs;

use crate::llm::config::Settings;

/// File name used inside the config directory
const SETTINGS_FILE: &str = "settings.json";

/// Load and save the whole settings record
pub trait SettingsStore {
    fn load(&self) -> Result<Settings, StoreError>;
    fn save(&self, settings: &Settings) -> Result<(), StoreError>;
}

/// Settings persisted as JSON on disk
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store in the platform config directory, if one can be determined
    pub fn default_location() -> Option<Self> {
        let dirs = ProjectDirs::from("", "", "gemini-polish")?;
        Some(Self::new(dirs.config_dir().join(SETTINGS_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for JsonFileStore {
    /// A missing file yields default settings; missing fields are defaulted
    fn load(&self) -> Result<Settings, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::info!("load: no settings file, using defaults");
                return Ok(Settings::default());
            }
            Err(e) => return Err(e.into()),
        };

        let settings: Settings = serde_json::from_str(&content)?;
        tracing::debug!(
            "load: custom_styles={} level={}",
            settings.custom_styles.len(),
            settings.improvement_level.as_str()
        );
        Ok(settings)
    }

    fn save(&self, settings: &Settings) -> Result<(), StoreError> {
        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(settings)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

/// Settings kept in memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    settings: Mutex<Option<Settings>>,
}

impl MemoryStore {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings: Mutex::new(Some(settings)),
        }
    }
}

impl SettingsStore for MemoryStore {
    fn load(&self) -> Result<Settings, StoreError> {
        let guard = self.settings.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(guard.clone().unwrap_or_default())
    }

    fn save(&self, settings: &Settings) -> Result<(), StoreError> {
        let mut guard = self.settings.lock().map_err(|_| StoreError::Poisoned)?;
        *guard = Some(settings.clone());
        Ok(())
    }
}

/// Error type for settings persistence
#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Serialize(serde_json::Error),
    Poisoned,
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "Settings I/O failed: {e}"),
            Self::Serialize(e) => write!(f, "Invalid settings JSON: {e}"),
            Self::Poisoned => write!(f, "Settings lock poisoned"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Serialize(e) => Some(e),
            Self::Poisoned => None,
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialize(e)
    }
}
