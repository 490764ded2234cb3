//! Runtime configuration: TOML file, environment and CLI overrides.

pub mod loader;
pub mod models;
pub mod sources;
pub mod validation;

pub use loader::{ConfigLoad, ConfigLoadError, ConfigLoader};
pub use models::{
    Config, ConfigMetadata, CorsConfig, DatabaseConfig, ServerConfig,
    SessionConfig,
};
pub use validation::{ConfigWarning, ConfigWarnings};
