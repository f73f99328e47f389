//! Repository status queries answered by the `git` command-line tool.
//!
//! ```no_run
//! use gitstate::{Inspector, InspectorConfig};
//!
//! let inspector = Inspector::with_config(".", InspectorConfig::default());
//! let report = inspector.check()?;
//! println!("{} (+{} -{})", report.branch.unwrap_or_default(), report.ahead, report.behind);
//! # Ok::<(), gitstate::AppError>(())
//! ```

pub mod cli;
pub mod config;
pub mod errors;
pub mod git;
pub mod logging;
pub mod types;

// Re-export commonly used items for convenience
pub use config::{AppConfig, InspectorConfig};
pub use errors::{AppError, AppResult, ConfigError, GitError};
pub use git::{find_repository_root, is_repository, AsyncInspector, Inspector};
pub use types::{RepositoryReport, RevCount, StatusCounts};
