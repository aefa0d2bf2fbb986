//! Persistence for [`ScannerConfig`].
//!
//! The client never touches the store; callers load a value once and pass it on.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use super::ScannerConfig;
use crate::error::ConfigError;

const CONFIG_FILE: &str = "config.json";

/// Load/save contract for the configuration record.
pub trait ConfigStore {
    /// Returns `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> Result<Option<ScannerConfig>, ConfigError>;

    /// Replaces the stored record. Readers never observe a partial write.
    fn save(&self, config: &ScannerConfig) -> Result<(), ConfigError>;
}

/// Pretty-printed JSON file, by default in the per-user config directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config dir>/scanbatch/config.json`, e.g. `~/.config/scanbatch/config.json`.
    pub fn default_location() -> Result<Self, ConfigError> {
        let dirs = ProjectDirs::from("", "", "scanbatch").ok_or(ConfigError::NoConfigDir)?;
        Ok(Self::new(dirs.config_dir().join(CONFIG_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> ConfigError {
        ConfigError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| CONFIG_FILE.into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl ConfigStore for JsonFileStore {
    fn load(&self) -> Result<Option<ScannerConfig>, ConfigError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_error(e)),
        };

        serde_json::from_str(&content)
            .map(Some)
            .map_err(|source| ConfigError::Json {
                path: self.path.clone(),
                source,
            })
    }

    fn save(&self, config: &ScannerConfig) -> Result<(), ConfigError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| self.io_error(e))?;
        }

        let data = serde_json::to_string_pretty(config).map_err(|source| ConfigError::Json {
            path: self.path.clone(),
            source,
        })?;

        // Write next to the target and rename over it.
        let tmp = self.temp_path();
        fs::write(&tmp, data).map_err(|e| self.io_error(e))?;
        fs::rename(&tmp, &self.path).map_err(|e| {
            let _ = fs::remove_file(&tmp);
            self.io_error(e)
        })
    }
}
