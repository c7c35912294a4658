//! Feature modules implementing the collector API
//!
//! Each feature is a vertical slice with its command handlers and routes.
//!
//! # Features
//!
//! - **datapoints**: authenticated ingestion of activity datapoints

pub mod datapoints;

use axum::Router;

use crate::api::AppState;

/// Creates the API router with all feature routes mounted
///
/// - `/datapoints` - Datapoint ingestion
pub fn router(state: AppState) -> Router<()> {
    Router::new().merge(datapoints::datapoints_routes(state))
}
