//! Config file discovery and parsing.

use std::path::{Path, PathBuf};

use crate::{EngineConfig, Error, Result};

/// Environment variable naming a config file.
pub const CONFIG_ENV: &str = "TEMPEST_CONFIG";

/// `<config_dir>/tempest/config.yaml`, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("tempest").join("config.yaml"))
}

impl EngineConfig {
    /// Load configuration following the documented lookup order.
    ///
    /// An explicit path or `$TEMPEST_CONFIG` must exist. The default path is
    /// optional; when it is missing the built-in defaults are used.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        if let Ok(env_path) = std::env::var(CONFIG_ENV) {
            if !env_path.is_empty() {
                return Self::from_file(Path::new(&env_path));
            }
        }
        match default_config_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => {
                tracing::debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Parse a config file. `.json` files are read as JSON, anything else
    /// as YAML.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.display().to_string(),
            source,
        })?;

        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        let config = if is_json {
            Self::from_json(&text)?
        } else {
            Self::from_yaml(&text)?
        };

        tracing::info!(path = %path.display(), "Loaded engine config");
        Ok(config)
    }

    pub fn from_yaml(text: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}
