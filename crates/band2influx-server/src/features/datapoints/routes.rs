//! Datapoint ingestion routes
//!
//! - `POST /api/datapoints` - Ingest a JSON array of datapoints
//!
//! The route sits behind [`require_basic_auth`]; an unauthenticated request
//! is answered before its body is read.

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, DefaultBodyLimit, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};

use super::ingest::{handle, IngestDatapointsCommand};
use crate::{api::AppState, auth::require_basic_auth, error::AppError};

// ============================================================================
// Router Configuration
// ============================================================================

/// Creates the datapoints router with the Access Gate installed
pub fn datapoints_routes(state: AppState) -> Router<()> {
    Router::new()
        .route("/datapoints", post(ingest_datapoints))
        .route_layer(axum::middleware::from_fn_with_state(
            state.credentials.clone(),
            require_basic_auth,
        ))
        .layer(DefaultBodyLimit::max(state.max_body_bytes))
        .with_state(state)
}

// ============================================================================
// Command Handlers (Write Operations)
// ============================================================================

/// Ingest datapoints
///
/// # Endpoint
///
/// `POST /api/datapoints`
///
/// # Responses
///
/// - `200 OK` - JSON array of the accepted datapoints
/// - `400 Bad Request` - Body is not a JSON array of datapoints
/// - `401 Unauthorized` - Missing or wrong credentials
/// - `413 Payload Too Large` - Body exceeds the configured limit
/// - `500 Internal Server Error` - Point construction or sink write failed
#[tracing::instrument(skip_all)]
async fn ingest_datapoints(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, AppError> {
    let body = body?;
    let command = IngestDatapointsCommand {
        database: &state.database,
        payload: &body,
    };
    let response = handle(state.sink.as_ref(), command).await?;

    Ok((StatusCode::OK, Json(response.accepted)).into_response())
}
