//! API client module
//!
//! HTTP client for the band2influx collector.

pub mod client;
pub mod endpoints;

pub use client::CollectorClient;
