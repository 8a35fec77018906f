// GBrowser Settings Engine
// Holds the process-wide settings copy and moves it to and from a key/value store.
// The default store is a JSON file at the platform-specific config path.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::platform;
use crate::types::errors::SettingsError;
use crate::types::settings::BrowserSettings;

pub const KEY_ACRYLIC_COLOR: &str = "acrylic_color";
pub const KEY_THEME: &str = "theme";
pub const KEY_HOME_PAGE: &str = "home_page";
pub const KEY_SYSTEM_TRANSPARENCY: &str = "system_transparency";

/// Key/value persistence backing the settings engine.
///
/// `set` only stages a value; `commit` makes every staged value durable in one
/// step.
pub trait SettingsStore {
    fn get(&self, key: &str) -> Option<Value>;
    fn set(&mut self, key: &str, value: Value);
    fn commit(&mut self) -> Result<(), SettingsError>;
    fn reload(&mut self) -> Result<(), SettingsError>;
}

/// Settings stored as one JSON object on disk.
pub struct JsonFileStore {
    path: PathBuf,
    values: Map<String, Value>,
}

impl JsonFileStore {
    /// Creates a store for `path_override`, or for `settings.json` in the
    /// platform config directory. Nothing is read until `reload`.
    pub fn new(path_override: Option<PathBuf>) -> Self {
        let path = path_override.unwrap_or_else(|| platform::get_config_dir().join("settings.json"));
        Self {
            path,
            values: Map::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Value) {
        self.values.insert(key.to_string(), value);
    }

    /// Writes all values, creating the parent directory if needed.
    fn commit(&mut self) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                SettingsError::IoError(format!("Failed to create config directory: {}", e))
            })?;
        }

        let json = serde_json::to_string_pretty(&self.values).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to serialize settings: {}", e))
        })?;

        fs::write(&self.path, json)
            .map_err(|e| SettingsError::IoError(format!("Failed to write config file: {}", e)))?;
        debug!(path = %self.path.display(), "settings written");
        Ok(())
    }

    /// Re-reads the file. A missing file is an empty store; a malformed one is
    /// an error and leaves the previous values in place.
    fn reload(&mut self) -> Result<(), SettingsError> {
        if !self.path.exists() {
            self.values.clear();
            return Ok(());
        }

        let content = fs::read_to_string(&self.path)
            .map_err(|e| SettingsError::IoError(format!("Failed to read config file: {}", e)))?;

        let values: Map<String, Value> = serde_json::from_str(&content).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to parse config file: {}", e))
        })?;

        self.values = values;
        Ok(())
    }
}

/// In-memory store. `commit` only counts calls.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Map<String, Value>,
    commits: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commits(&self) -> usize {
        self.commits
    }
}

impl SettingsStore for MemoryStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Value) {
        self.values.insert(key.to_string(), value);
    }

    fn commit(&mut self) -> Result<(), SettingsError> {
        self.commits += 1;
        Ok(())
    }

    fn reload(&mut self) -> Result<(), SettingsError> {
        Ok(())
    }
}

/// Trait defining the settings engine interface.
pub trait SettingsEngineTrait {
    fn settings(&self) -> &BrowserSettings;
    fn reload(&mut self) -> Result<&BrowserSettings, SettingsError>;
    fn save(&mut self, settings: BrowserSettings) -> Result<(), SettingsError>;
    fn persist(&mut self) -> Result<(), SettingsError>;
}

/// Owns the single settings copy used by the window.
pub struct SettingsEngine {
    store: Box<dyn SettingsStore>,
    settings: BrowserSettings,
}

impl SettingsEngine {
    /// Wraps `store` without reading it; settings start at their defaults.
    pub fn new(store: Box<dyn SettingsStore>) -> Self {
        Self {
            store,
            settings: BrowserSettings::default(),
        }
    }

    /// Wraps `store` and loads from it.
    pub fn load(store: Box<dyn SettingsStore>) -> Result<Self, SettingsError> {
        let mut engine = Self::new(store);
        engine.reload()?;
        Ok(engine)
    }

    /// Reads one key, falling back to `default` when absent or malformed.
    fn read<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let Some(value) = self.store.get(key) else {
            return default;
        };
        match serde_json::from_value(value) {
            Ok(v) => v,
            Err(e) => {
                let err = SettingsError::InvalidValue {
                    key: key.to_string(),
                    reason: e.to_string(),
                };
                warn!(error = %err, "using default");
                default
            }
        }
    }

    fn write<T: serde::Serialize>(&mut self, key: &str, value: &T) -> Result<(), SettingsError> {
        let value = serde_json::to_value(value).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to serialize '{}': {}", key, e))
        })?;
        self.store.set(key, value);
        Ok(())
    }
}

impl SettingsEngineTrait for SettingsEngine {
    fn settings(&self) -> &BrowserSettings {
        &self.settings
    }

    /// Re-reads every field from the store, defaulting missing ones.
    fn reload(&mut self) -> Result<&BrowserSettings, SettingsError> {
        self.store.reload()?;
        let defaults = BrowserSettings::default();
        self.settings = BrowserSettings {
            acrylic_color: self.read(KEY_ACRYLIC_COLOR, defaults.acrylic_color),
            theme: self.read(KEY_THEME, defaults.theme),
            home_page: self.read(KEY_HOME_PAGE, defaults.home_page),
            system_transparency: self.read(KEY_SYSTEM_TRANSPARENCY, defaults.system_transparency),
        };
        Ok(&self.settings)
    }

    /// Replaces all four fields at once, then persists. The in-memory copy is
    /// replaced even if writing to the store fails.
    fn save(&mut self, settings: BrowserSettings) -> Result<(), SettingsError> {
        self.settings = settings;
        self.persist()
    }

    fn persist(&mut self) -> Result<(), SettingsError> {
        let s = self.settings.clone();
        self.write(KEY_ACRYLIC_COLOR, &s.acrylic_color)?;
        self.write(KEY_THEME, &s.theme)?;
        self.write(KEY_HOME_PAGE, &s.home_page)?;
        self.write(KEY_SYSTEM_TRANSPARENCY, &s.system_transparency)?;
        self.store.commit()
    }
}
