//! Error types shared by the pnotes crates.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using the core Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while bootstrapping the application (config, logging, I/O).
#[derive(Error, Debug)]
pub enum Error {
    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid TOML or has the wrong shape
    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A config value is out of range
    #[error("Configuration error: {0}")]
    Config(String),

    /// Platform directories could not be resolved
    #[error("Could not determine {0} directory")]
    NoDirectory(&'static str),

    /// The tracing subscriber could not be installed
    #[error("Logging error: {0}")]
    Logging(String),
}
