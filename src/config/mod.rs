pub mod app_config;
pub mod inspector_config;
pub mod loader;
pub mod logging_config;

// Re-export commonly used types
pub use app_config::{AppConfig, PartialAppConfig, CONFIG_FILE_NAME};
pub use inspector_config::{InspectorConfig, DEFAULT_MAX_OUTPUT_SIZE};
pub use loader::ConfigLoader;
