use serde::Deserialize;
use std::{collections::HashMap, str::FromStr};
use tracing::Level;

use crate::errors::ConfigError;
use crate::logging::{LogFormat, LoggingConfig};

pub const ENV_LOG_LEVEL: &str = "GITSTATE_LOG_LEVEL";

/// Partial logging configuration for loading from files
#[derive(Deserialize, Debug, Default)]
pub struct PartialLoggingConfig {
    pub level: Option<String>,
    pub format: Option<LogFormat>,
    pub show_target: Option<bool>,
    pub show_thread_ids: Option<bool>,
}

impl LoggingConfig {
    pub fn from_env_or_file(
        partial: Option<PartialLoggingConfig>,
        env_map: &HashMap<String, String>,
    ) -> Result<Self, ConfigError> {
        let partial = partial.unwrap_or_default();
        let defaults = LoggingConfig::default();

        let level = match env_map.get(ENV_LOG_LEVEL) {
            Some(raw) => parse_level(ENV_LOG_LEVEL, raw)?,
            None => match partial.level {
                Some(raw) => parse_level("logging.level", &raw)?,
                None => defaults.level,
            },
        };

        Ok(Self {
            level,
            format: partial.format.unwrap_or(defaults.format),
            show_target: partial.show_target.unwrap_or(defaults.show_target),
            show_thread_ids: partial.show_thread_ids.unwrap_or(defaults.show_thread_ids),
        })
    }
}

fn parse_level(key: &str, raw: &str) -> Result<Level, ConfigError> {
    Level::from_str(raw.trim()).map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: raw.to_string(),
        reason: "expected one of trace, debug, info, warn, error".to_string(),
    })
}
