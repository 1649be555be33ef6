//! Player settings persisted between runs
//!
//! Volume and language are the only state that survives a restart. They are
//! stored as pretty JSON in the per-user config directory:
//!
//! ```text
//! <config_dir>/charm_guerra/settings.json
//! ```
//!
//! A missing or unreadable file never stops the game; the defaults are used.

use crate::error::SettingsError;
use crate::i18n::Language;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    volume: f32,
    pub language: Language,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            volume: 0.5,
            language: Language::Pt,
        }
    }
}

impl Settings {
    /// Master volume in `[0.0, 1.0]`
    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Sets the volume, clamped to `[0.0, 1.0]`
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = if volume.is_nan() { 0.0 } else { volume.clamp(0.0, 1.0) };
    }

    /// Re-applies the clamp after deserializing a hand-edited file
    fn sanitized(mut self) -> Self {
        let volume = self.volume;
        self.set_volume(volume);
        self
    }
}

/// Reads and writes `Settings` in a directory
pub struct SettingsStore {
    directory: PathBuf,
}

impl SettingsStore {
    pub fn new(directory: impl AsRef<Path>) -> Self {
        SettingsStore {
            directory: directory.as_ref().to_path_buf(),
        }
    }

    /// Store in the per-user config directory
    pub fn user_default() -> Result<Self, SettingsError> {
        let base = dirs::config_dir().ok_or(SettingsError::NoConfigDir)?;
        Ok(Self::new(base.join("charm_guerra")))
    }

    pub fn path(&self) -> PathBuf {
        self.directory.join(SETTINGS_FILE)
    }

    pub fn load(&self) -> Result<Settings, SettingsError> {
        let json = fs::read_to_string(self.path())?;
        let settings: Settings = serde_json::from_str(&json)?;
        Ok(settings.sanitized())
    }

    /// Loads settings, logging and falling back to defaults on any error
    pub fn load_or_default(&self) -> Settings {
        match self.load() {
            Ok(settings) => {
                debug!(path = %self.path().display(), "loaded settings");
                settings
            }
            Err(e) => {
                warn!("could not load settings ({e}); using defaults");
                Settings::default()
            }
        }
    }

    pub fn save(&self, settings: &Settings) -> Result<PathBuf, SettingsError> {
        fs::create_dir_all(&self.directory)?;
        let path = self.path();
        let json = serde_json::to_string_pretty(settings)?;
        fs::write(&path, json)?;
        debug!(path = %path.display(), "saved settings");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store(name: &str) -> SettingsStore {
        let dir = std::env::temp_dir().join(format!("charm_guerra_test_{}_{name}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        SettingsStore::new(dir)
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.volume(), 0.5);
        assert_eq!(settings.language, Language::Pt);
    }

    #[test]
    fn test_volume_is_clamped() {
        let mut settings = Settings::default();
        settings.set_volume(1.7);
        assert_eq!(settings.volume(), 1.0);
        settings.set_volume(-0.3);
        assert_eq!(settings.volume(), 0.0);
        settings.set_volume(f32::NAN);
        assert_eq!(settings.volume(), 0.0);
    }

    #[test]
    fn test_save_then_load() {
        let store = temp_store("roundtrip");
        let mut settings = Settings::default();
        settings.set_volume(0.8);
        settings.language = Language::En;

        store.save(&settings).unwrap();
        assert_eq!(store.load().unwrap(), settings);

        let _ = fs::remove_dir_all(&store.directory);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let store = temp_store("missing");
        assert!(store.load().is_err());
        assert_eq!(store.load_or_default(), Settings::default());
    }

    #[test]
    fn test_out_of_range_file_is_clamped() {
        let store = temp_store("clamp");
        fs::create_dir_all(&store.directory).unwrap();
        fs::write(store.path(), r#"{ "volume": 4.0, "language": "en" }"#).unwrap();

        let settings = store.load().unwrap();
        assert_eq!(settings.volume(), 1.0);
        assert_eq!(settings.language, Language::En);

        let _ = fs::remove_dir_all(&store.directory);
    }
}
