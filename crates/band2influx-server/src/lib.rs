//! band2influx collector
//!
//! HTTP service that accepts batches of Mi Band activity datapoints and
//! writes them to InfluxDB.
//!
//! # Overview
//!
//! - **Ingestion**: `POST /api/datapoints` takes a JSON array of datapoints,
//!   turns it into a write batch and hands it to the configured sink
//! - **Access Gate**: HTTP Basic authentication in front of the ingestion
//!   route, compared in constant time
//! - **Health**: `GET /health` reports whether the sink answers its ping
//!
//! # Request Pipeline
//!
//! Every ingestion request walks `authorizing → decoding → transforming →
//! writing`. The first failing stage decides the response status and nothing
//! after it runs.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use band2influx_common::sink::InfluxSink;
//! use band2influx_server::{api::{self, AppState}, config::Config};
//!
//! # async fn run(config: Config) -> anyhow::Result<()> {
//! let sink = InfluxSink::new(config.sink.influx_config())?;
//! let state = AppState::new(Arc::new(sink), &config);
//! api::serve(&config, state).await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod features;
pub mod middleware;

pub use error::AppError;
