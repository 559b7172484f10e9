//! Error types for mediamap.
//!
//! The geo operations themselves never fail: missing or unusable
//! coordinates are skipped. Errors only come out of checked constructors and
//! configuration loading.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MediamapError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[cfg(feature = "toml")]
    #[error("TOML error: {0}")]
    TomlDe(#[from] toml::de::Error),
    #[cfg(feature = "toml")]
    #[error("TOML error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, MediamapError>;
