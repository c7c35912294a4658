//! Datapoint ingestion
//!
//! `decode → transform → write`, behind the Access Gate.

pub mod ingest;
pub mod routes;

pub use ingest::{handle, IngestDatapointsCommand, IngestDatapointsResponse};
pub use routes::datapoints_routes;
