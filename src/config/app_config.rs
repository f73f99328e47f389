use serde::Deserialize;
use std::{collections::HashMap, path::PathBuf};

use crate::errors::ConfigError;
use crate::logging::LoggingConfig;

use super::{
    inspector_config::{InspectorConfig, PartialInspectorConfig},
    loader::ConfigLoader,
    logging_config::PartialLoggingConfig,
};

// Configuration location constants
pub const USER_CONFIG_PATH: &str = ".config/gitstate";
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Main Application Configuration
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub inspector: InspectorConfig,
    pub logging: LoggingConfig,
}

/// Partial Application Configuration for loading from files
#[derive(Deserialize, Debug, Default)]
pub struct PartialAppConfig {
    pub inspector: Option<PartialInspectorConfig>,
    pub logging: Option<PartialLoggingConfig>,
}

impl AppConfig {
    /// Load configuration from file and environment
    pub fn load() -> Result<Self, ConfigError> {
        let loader = ConfigLoader::new();
        loader.load_config()
    }

    /// Load configuration with custom base path (for testing)
    pub fn load_with_base_path(base_path: PathBuf) -> Result<Self, ConfigError> {
        let loader = ConfigLoader::with_base_path(base_path);
        loader.load_config()
    }

    /// Create AppConfig from partial config and environment
    pub fn from_partial_and_env(
        partial: Option<PartialAppConfig>,
        env_map: HashMap<String, String>,
    ) -> Result<Self, ConfigError> {
        let partial = partial.unwrap_or_default();

        let inspector = InspectorConfig::from_env_or_file(partial.inspector, &env_map)?;
        let logging = LoggingConfig::from_env_or_file(partial.logging, &env_map)?;

        Ok(AppConfig { inspector, logging })
    }
}
