use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::credential::PLACEHOLDER_API_KEY;
use crate::error::{AppError, AppResult};

const APP_DIR_NAME: &str = "arpdodo";
const CONFIG_FILE_NAME: &str = "config.json";

/// Settings the describe flow reads. Built once per invocation.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_key: String,
}

impl AppConfig {
    pub fn load(path: &Path) -> AppResult<Self> {
        Ok(Self::from_stored(StoredConfig::load_from(path)?))
    }

    pub fn from_stored(stored: StoredConfig) -> Self {
        Self {
            api_key: stored
                .api_key
                .unwrap_or_else(|| PLACEHOLDER_API_KEY.to_string()),
        }
    }
}

/// On-disk shape of the configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredConfig {
    #[serde(rename = "apiKey", default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl StoredConfig {
    pub fn load_from(path: &Path) -> AppResult<Self> {
        match fs::read_to_string(path) {
            Ok(contents) => serde_json::from_str(&contents).map_err(|err| {
                AppError::Configuration(format!("invalid config file {}: {err}", path.display()))
            }),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(AppError::Io(err)),
        }
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(self)
            .map_err(|err| AppError::Configuration(format!("failed to write config: {err}")))?;
        fs::write(path, data)?;
        Ok(())
    }
}

pub fn config_directory() -> AppResult<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .ok_or_else(|| {
            AppError::Configuration("could not determine the user config directory".to_string())
        })
}

/// `override_path` comes from `--config`; otherwise the per-user default is used.
pub fn config_file_path(override_path: Option<&Path>) -> AppResult<PathBuf> {
    match override_path {
        Some(path) => Ok(path.to_path_buf()),
        None => Ok(config_directory()?.join(CONFIG_FILE_NAME)),
    }
}
