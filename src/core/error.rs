//! Error types for fieldtrace

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using fieldtrace's Error
pub type Result<T> = std::result::Result<T, Error>;

/// fieldtrace error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("File not found: {path}")]
    MissingFile { path: PathBuf },

    #[error("Error reading file {path}: {source}")]
    UnreadableFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Root directory not found: {path}")]
    RootNotFound { path: PathBuf },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Worker pool error: {message}")]
    WorkerPool { message: String },

    #[error("Prompt failed: {message}")]
    Prompt { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl Error {
    /// Per-file failures that are reported and skipped rather than aborting a run
    pub fn is_soft(&self) -> bool {
        matches!(self, Error::MissingFile { .. } | Error::UnreadableFile { .. })
    }
}
