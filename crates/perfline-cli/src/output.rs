//! Output formatting and writing utilities

use crate::cli::OutputFormat;
use crate::error::Result;
use colored::Colorize;
use serde::Serialize;
use std::io::Write;

/// Output writer that handles formats, color, and quiet mode
pub struct OutputWriter {
    format: OutputFormat,
    use_color: bool,
    quiet: bool,
}

impl OutputWriter {
    pub fn new(format: OutputFormat, use_color: bool, quiet: bool) -> Self {
        Self {
            format,
            use_color,
            quiet,
        }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Informational line, suppressed in quiet mode and JSON formats
    pub fn info(&self, message: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }
        writeln!(std::io::stdout(), "{message}")?;
        Ok(())
    }

    /// Success line with a check mark
    pub fn success(&self, message: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }
        let rendered = if self.use_color {
            format!("{} {}", "✓".green(), message)
        } else {
            format!("✓ {message}")
        };
        writeln!(std::io::stdout(), "{rendered}")?;
        Ok(())
    }

    /// Section header
    pub fn section(&self, title: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }
        let rendered = if self.use_color {
            title.bold().to_string()
        } else {
            title.to_string()
        };
        writeln!(std::io::stdout(), "\n{rendered}")?;
        Ok(())
    }

    /// Emit a data payload in the configured format.
    ///
    /// Human format falls back to pretty JSON; the structured formats are
    /// emitted even in quiet mode since they are the command's product.
    pub fn data<T: Serialize>(&self, value: &T) -> Result<()> {
        let rendered = match self.format {
            OutputFormat::Json => serde_json::to_string(value)?,
            OutputFormat::JsonPretty | OutputFormat::Human => {
                serde_json::to_string_pretty(value)?
            }
        };
        writeln!(std::io::stdout(), "{rendered}")?;
        Ok(())
    }
}
