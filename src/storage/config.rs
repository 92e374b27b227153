//! JSON configuration file.
//!
//! Stored at `<config_dir>/WindowCenter/settings.json` (`%APPDATA%` on Windows).
//! Read once at startup. A missing file is created with the defaults so it can
//! be edited by hand; changes take effect on the next run.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::ConfigError;
use crate::model::{ShortcutConfiguration, APP_NAME, CONFIG_FILE_NAME};

/// Where a loaded configuration came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    File,
    /// No file yet; defaults.
    Missing,
    /// Unreadable or unparseable file; defaults, file kept as is.
    Invalid,
}

pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config_dir>/WindowCenter/settings.json`.
    pub fn default_location() -> Result<Self, ConfigError> {
        let dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(Self::new(dir.join(APP_NAME).join(CONFIG_FILE_NAME)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the configuration, falling back to defaults when the file is
    /// missing or unreadable. Chords without a modifier are replaced by the
    /// default for their slot.
    pub fn load(&self) -> ShortcutConfiguration {
        self.load_with_source().0
    }

    /// Like [`load`](Self::load), also reporting where the values came from.
    pub fn load_with_source(&self) -> (ShortcutConfiguration, ConfigSource) {
        let (mut config, source) = match self.read() {
            Ok(config) => {
                debug!("Loaded configuration from {}", self.path.display());
                (config, ConfigSource::File)
            }
            Err(ConfigError::Io(e)) if e.kind() == ErrorKind::NotFound => {
                info!(
                    "No configuration at {}, using defaults",
                    self.path.display()
                );
                (ShortcutConfiguration::default(), ConfigSource::Missing)
            }
            Err(e) => {
                warn!(
                    "Ignoring configuration at {}: {}",
                    self.path.display(),
                    e
                );
                (ShortcutConfiguration::default(), ConfigSource::Invalid)
            }
        };
        config.validate();
        (config, source)
    }

    /// Startup load. Writes the defaults out only when there is no file yet;
    /// a file that fails to parse is left untouched for the user to fix.
    pub fn load_or_create(&self) -> ShortcutConfiguration {
        let (config, source) = self.load_with_source();
        if source == ConfigSource::Missing {
            if let Err(e) = self.save(&config) {
                warn!("Failed to write {}: {}", self.path.display(), e);
            }
        }
        config
    }

    fn read(&self) -> Result<ShortcutConfiguration, ConfigError> {
        let contents = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Write the configuration as pretty JSON, creating the directory if needed.
    pub fn save(&self, config: &ShortcutConfiguration) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        fs::write(&self.path, json)?;
        debug!("Saved configuration to {}", self.path.display());
        Ok(())
    }
}
