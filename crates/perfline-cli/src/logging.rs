//! Logging setup for the Perfline CLI
//!
//! Maps the CLI verbosity ladder onto a tracing subscriber, honoring
//! RUST_LOG and a couple of PERFLINE_LOG_* environment overrides, and tags
//! the session with a run id so multi-run log captures stay separable.

use crate::error::{Error, Result};
use is_terminal::IsTerminal;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level filter
    pub level: String,
    /// Output format
    pub format: LogFormat,
    /// Enable console output
    pub console: bool,
    /// Include file and line numbers
    pub source_location: bool,
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LogFormat {
    /// Compact format for interactive use
    Compact,
    /// JSON structured format
    Json,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Compact,
            console: true,
            source_location: false,
        }
    }
}

impl LoggingConfig {
    /// Create logging config from verbosity level
    pub fn from_verbosity(verbosity: u8) -> Self {
        let mut config = Self::default();
        match verbosity {
            0 => config.level = "warn".to_string(),
            1 => config.level = "info".to_string(),
            2 => {
                config.level = "debug".to_string();
                config.source_location = true;
            }
            _ => {
                config.level = "trace".to_string();
                config.source_location = true;
            }
        }
        config
    }

    /// Apply environment overrides
    pub fn merge_with_env(&mut self) {
        if let Ok(rust_log) = std::env::var("RUST_LOG") {
            self.level = rust_log;
        }
        if let Ok(format) = std::env::var("PERFLINE_LOG_FORMAT") {
            match format.to_lowercase().as_str() {
                "compact" => self.format = LogFormat::Compact,
                "json" => self.format = LogFormat::Json,
                other => eprintln!("warning: invalid log format '{other}', using default"),
            }
        }
    }
}

/// Initialize the global logging system
pub fn init_logging(config: LoggingConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    let ansi = config.console && std::io::stderr().is_terminal();

    match config.format {
        LogFormat::Compact => {
            let subscriber = tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_ansi(ansi)
                .with_file(config.source_location)
                .with_line_number(config.source_location)
                .compact()
                .finish();
            tracing::subscriber::set_global_default(subscriber)
                .map_err(|e| Error::other(format!("Failed to initialize logging: {e}")))?;
        }
        LogFormat::Json => {
            let subscriber = tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_ansi(false)
                .with_file(config.source_location)
                .with_line_number(config.source_location)
                .json()
                .finish();
            tracing::subscriber::set_global_default(subscriber)
                .map_err(|e| Error::other(format!("Failed to initialize logging: {e}")))?;
        }
    }

    // One id per invocation keeps multi-run log captures separable
    let run_id = format!("run_{}", Uuid::new_v4().simple());
    tracing::debug!(run_id = %run_id, "logging initialized");

    Ok(())
}

/// Performance timing utilities
pub mod timing {
    use std::time::Instant;

    /// A timer that logs duration when dropped
    pub struct Timer {
        start: Instant,
        operation: String,
    }

    impl Timer {
        pub fn new(operation: &str) -> Self {
            Self {
                start: Instant::now(),
                operation: operation.to_string(),
            }
        }
    }

    impl Drop for Timer {
        fn drop(&mut self) {
            tracing::debug!(
                operation = %self.operation,
                duration_ms = self.start.elapsed().as_millis() as u64,
                "operation completed"
            );
        }
    }
}
