//! band2influx Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! The datapoint pipeline shared by the extractor CLI and the collector server.
//!
//! # Overview
//!
//! - **Record Model**: [`Datapoint`], one activity sample as stored by the
//!   tracker companion app
//! - **Transport Codec**: JSON encoding of datapoint sequences ([`codec`])
//! - **Ingestion Transform**: datapoints to time-series points ([`transform`])
//! - **Sink**: line-protocol rendering and the InfluxDB HTTP writer ([`sink`])
//! - **Error Handling**: [`PipelineError`] and the [`Result`] alias
//! - **Logging**: `tracing` subscriber setup ([`logging`])
//!
//! # Example
//!
//! ```no_run
//! use band2influx_common::{codec, transform};
//!
//! fn payload_to_batch(body: &[u8]) -> band2influx_common::Result<usize> {
//!     let datapoints = codec::decode(body)?;
//!     let batch = transform::build_batch(&datapoints)?;
//!     Ok(batch.len())
//! }
//! ```

pub mod codec;
pub mod datapoint;
pub mod error;
pub mod logging;
pub mod sink;
pub mod stage;
pub mod transform;

// Re-export commonly used types
pub use datapoint::Datapoint;
pub use error::{PipelineError, Result};
pub use stage::PipelineStage;
pub use transform::{Point, WriteBatch};
