//! Error types for the Perfline core library
//!
//! Two failure philosophies coexist here: line-level parse failures inside
//! log files are skipped silently by the parsers, while boundary failures
//! (missing required logs, unreadable files, malformed baseline documents)
//! surface as explicit variants carrying the offending path.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Perfline operations
#[derive(Error, Debug)]
pub enum Error {
    /// A required log file for the run prefix could not be located
    #[error("Missing required log file: no '{marker}' log with prefix '{prefix}' in {}", dir.display())]
    MissingLogFile {
        marker: String,
        prefix: String,
        dir: PathBuf,
    },

    /// A log or baseline file exists but could not be read
    #[error("Failed to read {}: {source}", path.display())]
    UnreadableFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A persisted baseline document failed to deserialize
    #[error("Malformed baseline document {}: {source}", path.display())]
    MalformedBaseline {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// No baseline could be resolved for a lookup
    #[error("No baseline found{} in {}", pattern.as_deref().map(|p| format!(" matching '{p}'")).unwrap_or_default(), dir.display())]
    BaselineNotFound {
        pattern: Option<String>,
        dir: PathBuf,
    },

    /// JSON serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// IO errors outside the per-file read path
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic internal error with context
    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Internal {
            message: err.to_string(),
            source: err,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_log_file_display() {
        let err = Error::MissingLogFile {
            marker: "node-stats".to_string(),
            prefix: "run-42".to_string(),
            dir: PathBuf::from("logs"),
        };
        let msg = err.to_string();
        assert!(msg.contains("node-stats"));
        assert!(msg.contains("run-42"));
    }

    #[test]
    fn test_baseline_not_found_display() {
        let err = Error::BaselineNotFound {
            pattern: Some("nightly".to_string()),
            dir: PathBuf::from("data/baselines"),
        };
        assert!(err.to_string().contains("matching 'nightly'"));

        let err = Error::BaselineNotFound {
            pattern: None,
            dir: PathBuf::from("data/baselines"),
        };
        assert!(!err.to_string().contains("matching"));
    }
}
