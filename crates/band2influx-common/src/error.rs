//! Error types for the datapoint pipeline

use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Errors raised by the shared pipeline stages (codec, transform, sink)
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Malformed datapoint payload: {0}")]
    Codec(#[from] serde_json::Error),

    #[error("Timestamp {timestamp} cannot be represented as a point time")]
    PointConstruction { timestamp: i64 },

    #[error("Sink write failed: {0}")]
    SinkWrite(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl PipelineError {
    /// Create a sink write error
    pub fn sink_write(msg: impl Into<String>) -> Self {
        Self::SinkWrite(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Short machine-readable code used in error bodies and logs
    pub fn code(&self) -> &'static str {
        match self {
            PipelineError::Codec(_) => "CODEC_ERROR",
            PipelineError::PointConstruction { .. } => "POINT_CONSTRUCTION_ERROR",
            PipelineError::SinkWrite(_) => "SINK_WRITE_ERROR",
            PipelineError::Config(_) => "CONFIG_ERROR",
        }
    }
}
