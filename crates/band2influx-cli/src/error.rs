//! Error types for the band2influx CLI
//!
//! Every variant is user-facing: the message says what failed and, where
//! there is one, what to check next.

use band2influx_common::PipelineError;
use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Error, Debug)]
pub enum CliError {
    /// Database file missing or not a SQLite database
    #[error("Cannot open activity database '{path}': {reason}. Check the path points to a Gadgetbridge export.")]
    SourceUnavailable { path: String, reason: String },

    /// The sample query failed after the file was opened
    #[error("Failed to read activity samples: {0}. The file may not be a Gadgetbridge Mi Band database.")]
    SourceQuery(String),

    /// Encoding, point construction or sink write failed
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    /// The collector could not be reached or its answer could not be read
    #[error("Could not reach collector at {url}: {reason}. Ensure band2influx-server is running and --host is correct.")]
    Transport { url: String, reason: String },

    /// The collector answered with something other than 200
    #[error("Collector rejected the datapoints (HTTP {status}): {message}")]
    Rejected { status: u16, message: String },

    /// Configuration is missing or invalid
    #[error("Configuration error: {0}. Check your command-line flags or environment variables.")]
    Config(String),

    /// A blocking task panicked or was cancelled
    #[error("Background task failed: {0}")]
    Task(String),
}

impl CliError {
    pub fn source_unavailable(path: impl Into<String>, reason: impl ToString) -> Self {
        Self::SourceUnavailable {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn source_query(reason: impl ToString) -> Self {
        Self::SourceQuery(reason.to_string())
    }

    pub fn transport(url: impl Into<String>, reason: impl ToString) -> Self {
        Self::Transport {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
