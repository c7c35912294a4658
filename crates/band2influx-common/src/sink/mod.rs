//! Time-series sink
//!
//! A [`Sink`] receives a finished [`WriteBatch`] together with the target
//! database name and either stores all of it or fails. Sinks never retry.

pub mod influx;
pub mod line_protocol;

use async_trait::async_trait;

use crate::error::Result;
use crate::transform::WriteBatch;

pub use influx::{InfluxConfig, InfluxSink, DEFAULT_INFLUX_ENDPOINT, DEFAULT_SINK_TIMEOUT_SECS};

/// Write-only destination for activity points
#[async_trait]
pub trait Sink: Send + Sync {
    /// Write every point of `batch` into `database`.
    ///
    /// Errors are returned as [`crate::PipelineError::SinkWrite`] carrying
    /// the sink's own message.
    async fn write(&self, database: &str, batch: &WriteBatch) -> Result<()>;

    /// Whether the sink currently answers.
    async fn ping(&self) -> bool;

    /// Short identifier used in logs
    fn sink_type(&self) -> &str;
}
