//! Error types for clonegen-config.

use thiserror::Error;

/// Result type for clonegen-config operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur while loading the run configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file: {0}")]
    ReadConfig(#[from] std::io::Error),

    /// Failed to parse TOML configuration.
    #[error("Failed to parse TOML config: {0}")]
    ParseToml(#[from] toml::de::Error),

    /// Configuration validation error.
    #[error("Config validation error: {0}")]
    Validation(String),
}
