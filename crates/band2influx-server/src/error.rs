//! Server-specific error types

use axum::{
    extract::rejection::BytesRejection,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use band2influx_common::PipelineError;
use serde_json::json;
use thiserror::Error;

use crate::auth::WWW_AUTHENTICATE_CHALLENGE;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Request body rejected: {message}")]
    Body { status: StatusCode, message: String },

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::Body { status, .. } if *status == StatusCode::PAYLOAD_TOO_LARGE => {
                "PAYLOAD_TOO_LARGE"
            },
            AppError::Body { .. } => "INVALID_BODY",
            AppError::Pipeline(e) => e.code(),
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Body { status, .. } => *status,
            AppError::Pipeline(PipelineError::Codec(_)) => StatusCode::BAD_REQUEST,
            AppError::Pipeline(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<BytesRejection> for AppError {
    fn from(rejection: BytesRejection) -> Self {
        AppError::Body {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            AppError::Unauthorized(ref message) => message.clone(),
            AppError::Body { ref message, .. } => message.clone(),
            AppError::Pipeline(PipelineError::Config(ref message)) => {
                tracing::error!("Configuration error: {}", message);
                "Server configuration error".to_string()
            },
            AppError::Pipeline(ref e @ PipelineError::Codec(_)) => e.to_string(),
            AppError::Pipeline(ref e) => {
                tracing::error!("Ingestion failed: {}", e);
                e.to_string()
            },
            AppError::Internal(ref message) => {
                tracing::error!("Internal error: {}", message);
                message.clone()
            },
        };

        let body = Json(json!({
            "error": {
                "code": self.code(),
                "message": message,
                "status": status.as_u16(),
            }
        }));

        if status == StatusCode::UNAUTHORIZED {
            return (status, [(header::WWW_AUTHENTICATE, WWW_AUTHENTICATE_CHALLENGE)], body)
                .into_response();
        }
        (status, body).into_response()
    }
}
