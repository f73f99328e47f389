use std::{collections::HashMap, env, fs, path::PathBuf};

use crate::errors::ConfigError;

use super::app_config::{AppConfig, PartialAppConfig, CONFIG_FILE_NAME, USER_CONFIG_PATH};

const ENV_PREFIX: &str = "GITSTATE_";

/// Configuration loader responsible for loading config from files and environment
pub struct ConfigLoader {
    base_path: Option<PathBuf>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Create a new config loader with default paths
    pub fn new() -> Self {
        Self { base_path: None }
    }

    /// Create a config loader with custom base path (for testing)
    pub fn with_base_path(base_path: PathBuf) -> Self {
        Self {
            base_path: Some(base_path),
        }
    }

    /// Load complete application configuration
    pub fn load_config(&self) -> Result<AppConfig, ConfigError> {
        self.load_config_with_env(self.collect_env_vars())
    }

    /// Same as `load_config` but with an explicit environment map
    pub fn load_config_with_env(
        &self,
        env_map: HashMap<String, String>,
    ) -> Result<AppConfig, ConfigError> {
        let config_path = self.config_path()?;
        let partial_config = self.load_partial_config(&config_path)?;
        AppConfig::from_partial_and_env(partial_config, env_map)
    }

    /// Resolve `~/.config/gitstate/config.toml`, or `<base>/config.toml` when a base path is set
    pub fn config_path(&self) -> Result<PathBuf, ConfigError> {
        match &self.base_path {
            Some(base_path) => Ok(base_path.join(CONFIG_FILE_NAME)),
            None => dirs::home_dir()
                .map(|home| home.join(USER_CONFIG_PATH).join(CONFIG_FILE_NAME))
                .ok_or(ConfigError::NoConfigDir),
        }
    }

    /// A missing file is not an error; the caller falls back to defaults.
    fn load_partial_config(
        &self,
        config_path: &PathBuf,
    ) -> Result<Option<PartialAppConfig>, ConfigError> {
        if !config_path.exists() {
            tracing::debug!("配置文件 {} 不存在，使用默认配置", config_path.display());
            return Ok(None);
        }

        let path_str = config_path.to_string_lossy().to_string();
        let content = fs::read_to_string(config_path)
            .map_err(|e| ConfigError::FileRead(path_str.clone(), e))?;

        let partial: PartialAppConfig =
            toml::from_str(&content).map_err(|e| ConfigError::TomlParse(path_str, e))?;

        tracing::debug!("已加载配置文件 {}", config_path.display());
        Ok(Some(partial))
    }

    /// Collect relevant environment variables
    fn collect_env_vars(&self) -> HashMap<String, String> {
        env::vars()
            .filter(|(key, _)| key.starts_with(ENV_PREFIX))
            .collect()
    }
}
