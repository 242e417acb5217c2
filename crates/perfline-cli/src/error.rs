//! Error types and handling for the CLI

use colored::Colorize;
use std::io;
use std::path::PathBuf;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for CLI operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error (file operations, etc.)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Error from perfline-core library
    #[error("{0}")]
    Core(#[from] perfline_core::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid configuration file format
    #[error("Invalid file format for {}: expected {} format", path.display(), expected)]
    InvalidFormat { path: PathBuf, expected: String },

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Generic error with context
    #[error("{message}")]
    Other { message: String },
}

impl Error {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a generic error with message
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Io(_) => 1,
            Self::Core(perfline_core::Error::BaselineNotFound { .. }) => 2,
            Self::Core(perfline_core::Error::MissingLogFile { .. }) => 3,
            Self::Core(_) => 4,
            Self::Config(_) => 5,
            Self::InvalidFormat { .. } => 6,
            Self::Json(_) => 7,
            Self::Yaml(_) => 8,
            Self::Other { .. } => 99,
        }
    }
}

/// Render an error for the terminal
pub fn format_error(error: &Error, use_color: bool) -> String {
    if use_color {
        format!("{} {}", "error:".red().bold(), error)
    } else {
        format!("error: {error}")
    }
}
