use crate::types::CommandOutput;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Git command error: {0}")]
    Git(#[from] GitError),
    #[error("I/O error while {0}: {1}")]
    IO(String, #[source] std::io::Error),
    #[error("Background task failed: {0}")]
    Task(String),
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    /// True when the error is the captured-output cap being exceeded.
    ///
    /// This is the one failure kind that every query propagates, including
    /// the ones that otherwise fall back to a sentinel value.
    pub fn is_output_too_large(&self) -> bool {
        matches!(self, AppError::Git(GitError::OutputTooLarge { .. }))
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read file '{0}': {1}")]
    FileRead(String, #[source] std::io::Error),
    #[error("Failed to parse TOML from file '{0}': {1}")]
    TomlParse(String, #[source] toml::de::Error),
    #[error("Invalid value '{value}' for '{key}': {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
    #[error("Could not determine the user configuration directory")]
    NoConfigDir,
}

#[derive(Debug)]
pub enum GitError {
    CommandFailed {
        command: String,
        status_code: Option<i32>,
        stdout: String,
        stderr: String,
    },
    OutputTooLarge {
        command: String,
        limit: usize,
    },
    Spawn {
        command: String,
        source: std::io::Error,
    },
    NotARepository(String),
}

impl std::fmt::Display for GitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GitError::CommandFailed {
                command,
                status_code,
                stdout,
                stderr,
            } => {
                write!(f, "Git command '{}' failed", command)?;
                if let Some(c) = status_code {
                    write!(f, " with exit code {}", c)?;
                }
                if !stdout.is_empty() {
                    write!(f, "\nStdout:\n{}", stdout)?;
                }
                if !stderr.is_empty() {
                    write!(f, "\nStderr:\n{}", stderr)?;
                }
                Ok(())
            }
            GitError::OutputTooLarge { command, limit } => write!(
                f,
                "Output of git command '{}' exceeded the limit of {} bytes",
                command, limit
            ),
            GitError::Spawn { command, source } => {
                write!(f, "Failed to execute git command '{}': {}", command, source)
            }
            GitError::NotARepository(path) => write!(
                f,
                "Not a git repository (or any of the parent directories): {}",
                path
            ),
        }
    }
}

impl std::error::Error for GitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GitError::Spawn { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IO("I/O operation failed".to_string(), err)
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::Task(err.to_string())
    }
}

/// Converts a captured `CommandOutput` into a `GitError::CommandFailed`.
///
/// `status_code` is `None` when the process was terminated by a signal.
pub fn map_command_output_error(cmd_str: &str, output: CommandOutput) -> GitError {
    GitError::CommandFailed {
        command: cmd_str.to_string(),
        status_code: output.status.code(),
        stdout: output.stdout,
        stderr: output.stderr,
    }
}
