//! Shared helpers for collector integration tests

#![allow(dead_code)]

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex,
};
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use band2influx_common::{sink::Sink, PipelineError, WriteBatch};
use band2influx_server::{
    api::{create_router, AppState},
    auth::Credentials,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use tower::ServiceExt;

pub const USER: &str = "collector";
pub const PASS: &str = "hunter2";
pub const DATABASE: &str = "miband";

/// Sink that records every write instead of sending it anywhere
#[derive(Default)]
pub struct SpySink {
    writes: Mutex<Vec<(String, WriteBatch)>>,
    fail_with: Mutex<Option<String>>,
    down: AtomicBool,
    delay: Option<Duration>,
}

impl SpySink {
    pub fn failing(message: &str) -> Self {
        let sink = Self::default();
        *sink.fail_with.lock().unwrap() = Some(message.to_string());
        sink
    }

    pub fn unreachable() -> Self {
        let sink = Self::default();
        sink.down.store(true, Ordering::SeqCst);
        sink
    }

    /// Sink whose writes take `delay` to complete
    pub fn slow(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn writes(&self) -> Vec<(String, WriteBatch)> {
        self.writes.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.writes.lock().unwrap().len()
    }
}

#[async_trait]
impl Sink for SpySink {
    async fn write(&self, database: &str, batch: &WriteBatch) -> band2influx_common::Result<()> {
        self.writes.lock().unwrap().push((database.to_string(), batch.clone()));
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let fail_with = self.fail_with.lock().unwrap().clone();
        match fail_with {
            Some(message) => Err(PipelineError::sink_write(message)),
            None => Ok(()),
        }
    }

    async fn ping(&self) -> bool {
        !self.down.load(Ordering::SeqCst)
    }

    fn sink_type(&self) -> &str {
        "spy"
    }
}

pub fn test_state(sink: Arc<SpySink>) -> AppState {
    AppState {
        sink: sink as Arc<dyn Sink>,
        database: Arc::from(DATABASE),
        credentials: Arc::new(Credentials::new(USER, PASS)),
        max_body_bytes: 1024 * 1024,
    }
}

pub fn test_app(sink: Arc<SpySink>) -> Router {
    create_router(test_state(sink))
}

pub fn basic(user: &str, pass: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{}:{}", user, pass)))
}

/// POST `body` to `/api/datapoints`, optionally with an Authorization header
pub async fn post_datapoints(
    app: &Router,
    authorization: Option<String>,
    body: impl Into<Body>,
) -> (StatusCode, axum::http::HeaderMap, serde_json::Value) {
    let mut builder = Request::builder()
        .uri("/api/datapoints")
        .method("POST")
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(value) = authorization {
        builder = builder.header(header::AUTHORIZATION, value);
    }

    let response = app
        .clone()
        .oneshot(builder.body(body.into()).unwrap())
        .await
        .unwrap();
    read_response(response).await
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, axum::http::HeaderMap, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    read_response(response).await
}

async fn read_response(
    response: axum::response::Response,
) -> (StatusCode, axum::http::HeaderMap, serde_json::Value) {
    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if body.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body).unwrap_or(serde_json::Value::String(
            String::from_utf8_lossy(&body).into_owned(),
        ))
    };
    (status, headers, json)
}
