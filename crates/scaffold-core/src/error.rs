//! Error types for the configuration edge of the engine.
//!
//! The geometry itself is total; only user-supplied identifiers and colors
//! can be rejected.

use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Unknown component identifier: {0}")]
    UnknownComponent(String),
    #[error("Component length {0}mm is not a catalog length")]
    NonCatalogLength(u32),
    #[error("Invalid color: {0}")]
    InvalidColor(String),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
