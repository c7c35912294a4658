//! HTTP API client for the band2influx collector

use std::time::Duration;

use band2influx_common::{codec, Datapoint};
use reqwest::{header, Client, StatusCode};
use tracing::{debug, warn};

use crate::api::endpoints;
use crate::config::CollectorConfig;
use crate::error::{CliError, Result};

/// API client for the collector
pub struct CollectorClient {
    client: Client,
    base_url: String,
    username: String,
    password: String,
}

impl CollectorClient {
    /// Create a new API client
    pub fn new(config: &CollectorConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CliError::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.url.clone(),
            username: config.username.clone(),
            password: config.password.clone(),
        })
    }

    pub fn datapoints_url(&self) -> String {
        endpoints::datapoints_url(&self.base_url)
    }

    /// Submit an encoded datapoint array in one request.
    ///
    /// Returns the datapoints the collector echoed back. Anything other than
    /// `200` is a [`CliError::Rejected`].
    #[tracing::instrument(skip(self, body), fields(bytes = body.len()))]
    pub async fn send_datapoints(&self, body: Vec<u8>) -> Result<Vec<Datapoint>> {
        let url = self.datapoints_url();

        let response = self
            .client
            .post(&url)
            .header(header::CONTENT_TYPE, codec::CONTENT_TYPE_JSON)
            .basic_auth(&self.username, Some(&self.password))
            .body(body)
            .send()
            .await
            .map_err(|e| CliError::transport(&url, describe(&e)))?;

        let status = response.status();
        if status != StatusCode::OK {
            let text = response.text().await.unwrap_or_default();
            warn!(%status, body = %text, "Collector rejected datapoints");
            return Err(CliError::Rejected {
                status: status.as_u16(),
                message: rejection_message(status, &text),
            });
        }

        let echoed = response
            .bytes()
            .await
            .map_err(|e| CliError::transport(&url, describe(&e)))?;
        let accepted = codec::decode(&echoed)?;
        debug!(accepted = accepted.len(), "Collector accepted datapoints");

        Ok(accepted)
    }
}

fn describe(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        return "request timed out".to_string();
    }
    if error.is_connect() {
        return "connection refused".to_string();
    }
    error.to_string()
}

/// Human-readable reason for a non-200 answer.
///
/// Prefers the collector's JSON error message, falls back to the status text.
fn rejection_message(status: StatusCode, body: &str) -> String {
    let from_body = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string));

    let message = from_body.unwrap_or_else(|| {
        status
            .canonical_reason()
            .unwrap_or("unexpected response")
            .to_string()
    });

    if status == StatusCode::UNAUTHORIZED {
        format!("{}. Check --user and --pass", message)
    } else {
        message
    }
}
