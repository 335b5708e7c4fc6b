use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PlumeConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Base URL of the writing-assistant service.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout. Generation calls can take a while.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ExportConfig {
    /// Where downloaded articles are written. Defaults to the platform
    /// downloads directory when unset.
    #[serde(default)]
    pub download_dir: Option<PathBuf>,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}
fn default_timeout() -> u64 {
    120
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl PlumeConfig {
    /// Load config from ~/.config/plume/config.toml, creating defaults if missing.
    pub fn load() -> crate::error::Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(|e| {
                crate::error::PlumeError::Config(format!("Failed to read config: {e}"))
            })?;
            let config: PlumeConfig = toml::from_str(&contents).map_err(|e| {
                crate::error::PlumeError::Config(format!("Failed to parse config: {e}"))
            })?;
            Ok(config)
        } else {
            let config = PlumeConfig::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Save config to disk.
    pub fn save(&self) -> crate::error::Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                crate::error::PlumeError::Config(format!("Failed to create config dir: {e}"))
            })?;
        }

        let contents = toml::to_string_pretty(self).map_err(|e| {
            crate::error::PlumeError::Config(format!("Failed to serialize config: {e}"))
        })?;
        std::fs::write(&config_path, contents)
            .map_err(|e| crate::error::PlumeError::Config(format!("Failed to write config: {e}")))
    }

    /// Get the config file path.
    pub fn config_path() -> crate::error::Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            crate::error::PlumeError::Config("Could not determine config directory".into())
        })?;
        Ok(config_dir.join("plume").join("config.toml"))
    }
}
