//! Settings file and storage root resolution.
//!
//! Lookup order for the storage root: `TENOTE_DIR`, then `storage_dir`
//! from the settings file, then `<data-home>/tenote`. The settings file lives
//! at `TENOTE_CONFIG` or `<config-home>/tenote/config.json` and does not need
//! to exist.

use crate::error::ConfigError;
use crate::note::Section;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const APP_DIR: &str = "tenote";
pub const CONFIG_FILE: &str = "config.json";
pub const ENV_DIR: &str = "TENOTE_DIR";
pub const ENV_CONFIG: &str = "TENOTE_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_dir: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sections: Option<Vec<Section>>,
}

impl AppConfig {
    /// Sections to browse, in order. Defaults to notes and trash.
    pub fn sections(&self) -> Result<Vec<Section>, ConfigError> {
        match &self.sections {
            None => Ok(vec![Section::Notes, Section::Trash]),
            Some(list) if list.contains(&Section::Trash) => Ok(list.clone()),
            Some(_) => Err(ConfigError::MissingTrash),
        }
    }
}

pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    if let Some(path) = env::var_os(ENV_CONFIG) {
        return Ok(PathBuf::from(path));
    }
    let base = dirs::config_dir().ok_or(ConfigError::NoHome)?;
    Ok(base.join(APP_DIR).join(CONFIG_FILE))
}

pub fn default_storage_dir() -> Result<PathBuf, ConfigError> {
    let base = dirs::data_dir().ok_or(ConfigError::NoHome)?;
    Ok(base.join(APP_DIR))
}

/// Reads the settings file, returning defaults when it does not exist.
pub fn load_from(path: &Path) -> Result<AppConfig, ConfigError> {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Ok(AppConfig::default());
        }
        Err(source) => {
            return Err(ConfigError::Read { path: path.to_path_buf(), source });
        }
    };
    if data.trim().is_empty() {
        return Ok(AppConfig::default());
    }
    serde_json::from_str(&data).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn save_to(path: &Path, cfg: &AppConfig) -> Result<(), ConfigError> {
    let write_err = |source: io::Error| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
    }
    let mut data = serde_json::to_string_pretty(cfg)
        .map_err(|e| write_err(io::Error::other(e)))?;
    data.push('\n');
    fs::write(path, data).map_err(write_err)
}

pub fn load() -> Result<AppConfig, ConfigError> {
    load_from(&config_file_path()?)
}

/// Storage root after applying the environment override and defaults.
pub fn storage_root(cfg: &AppConfig) -> Result<PathBuf, ConfigError> {
    if let Some(dir) = env::var_os(ENV_DIR) {
        if !dir.is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    match &cfg.storage_dir {
        Some(dir) if !dir.as_os_str().is_empty() => Ok(dir.clone()),
        _ => default_storage_dir(),
    }
}

/// Checks a user supplied storage directory and returns its absolute form.
pub fn validate_storage_dir(raw: &Path) -> Result<PathBuf, ConfigError> {
    if !raw.is_dir() {
        return Err(ConfigError::NotADirectory(raw.to_path_buf()));
    }
    raw.canonicalize()
        .map_err(|_| ConfigError::NotADirectory(raw.to_path_buf()))
}

/// Persists a new storage directory. The settings file is only rewritten
/// once the directory has been validated.
pub fn set_storage_dir(
    config_path: &Path,
    raw: &Path,
) -> Result<PathBuf, ConfigError> {
    let dir = validate_storage_dir(raw)?;
    let mut cfg = load_from(config_path)?;
    cfg.storage_dir = Some(dir.clone());
    save_to(config_path, &cfg)?;
    log::info!("storage dir set to {}", dir.display());
    Ok(dir)
}
