use serde::Deserialize;
use std::{collections::HashMap, path::PathBuf};

use crate::errors::ConfigError;

/// Default cap on captured stdout/stderr of a single git invocation (1 MiB).
pub const DEFAULT_MAX_OUTPUT_SIZE: usize = 1024 * 1024;

pub const ENV_MAX_OUTPUT_SIZE: &str = "GITSTATE_MAX_OUTPUT_SIZE";
pub const ENV_GIT_BINARY: &str = "GITSTATE_GIT_BINARY";

/// Options accepted by every repository query
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct InspectorConfig {
    /// Maximum number of bytes captured from either output stream.
    /// Exceeding it fails the query with `GitError::OutputTooLarge`.
    #[serde(default = "default_max_output_size")]
    pub max_output_size: usize,

    /// Git executable to invoke
    #[serde(default = "default_git_binary")]
    pub git_binary: PathBuf,
}

/// Partial inspector configuration for loading from files
#[derive(Deserialize, Debug, Default)]
pub struct PartialInspectorConfig {
    pub max_output_size: Option<usize>,
    pub git_binary: Option<PathBuf>,
}

impl Default for InspectorConfig {
    fn default() -> Self {
        Self {
            max_output_size: default_max_output_size(),
            git_binary: default_git_binary(),
        }
    }
}

impl InspectorConfig {
    pub fn with_max_output_size(mut self, max_output_size: usize) -> Self {
        self.max_output_size = max_output_size;
        self
    }

    pub fn with_git_binary(mut self, git_binary: impl Into<PathBuf>) -> Self {
        self.git_binary = git_binary.into();
        self
    }

    /// Environment variables win over the file, the file wins over defaults.
    pub fn from_env_or_file(
        partial: Option<PartialInspectorConfig>,
        env_map: &HashMap<String, String>,
    ) -> Result<Self, ConfigError> {
        let partial = partial.unwrap_or_default();

        let max_output_size = match env_map.get(ENV_MAX_OUTPUT_SIZE) {
            Some(raw) => parse_output_size(ENV_MAX_OUTPUT_SIZE, raw)?,
            None => partial
                .max_output_size
                .unwrap_or_else(default_max_output_size),
        };
        if max_output_size == 0 {
            return Err(ConfigError::InvalidValue {
                key: "max_output_size".to_string(),
                value: "0".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }

        let git_binary = env_map
            .get(ENV_GIT_BINARY)
            .map(PathBuf::from)
            .or(partial.git_binary)
            .unwrap_or_else(default_git_binary);

        Ok(Self {
            max_output_size,
            git_binary,
        })
    }
}

fn parse_output_size(key: &str, raw: &str) -> Result<usize, ConfigError> {
    raw.trim()
        .parse::<usize>()
        .map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            value: raw.to_string(),
            reason: format!("expected a byte count ({})", e),
        })
}

fn default_max_output_size() -> usize {
    DEFAULT_MAX_OUTPUT_SIZE
}

fn default_git_binary() -> PathBuf {
    PathBuf::from("git")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = InspectorConfig::default();
        assert_eq!(config.max_output_size, 1024 * 1024);
        assert_eq!(config.git_binary, PathBuf::from("git"));
    }

    #[test]
    fn test_env_overrides_file() {
        let partial = PartialInspectorConfig {
            max_output_size: Some(2048),
            git_binary: Some(PathBuf::from("/opt/git/bin/git")),
        };
        let mut env = HashMap::new();
        env.insert(ENV_MAX_OUTPUT_SIZE.to_string(), "4096".to_string());

        let config = InspectorConfig::from_env_or_file(Some(partial), &env).unwrap();
        assert_eq!(config.max_output_size, 4096);
        assert_eq!(config.git_binary, PathBuf::from("/opt/git/bin/git"));
    }

    #[test]
    fn test_invalid_env_value() {
        let mut env = HashMap::new();
        env.insert(ENV_MAX_OUTPUT_SIZE.to_string(), "a lot".to_string());
        let err = InspectorConfig::from_env_or_file(None, &env).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == ENV_MAX_OUTPUT_SIZE));
    }

    #[test]
    fn test_zero_limit_rejected() {
        let partial = PartialInspectorConfig {
            max_output_size: Some(0),
            git_binary: None,
        };
        assert!(InspectorConfig::from_env_or_file(Some(partial), &HashMap::new()).is_err());
    }

    #[test]
    fn test_builder_methods() {
        let config = InspectorConfig::default()
            .with_max_output_size(10)
            .with_git_binary("git2");
        assert_eq!(config.max_output_size, 10);
        assert_eq!(config.git_binary, PathBuf::from("git2"));
    }
}
