//! Configuration for the CLI commands
//!
//! Values come from clap (flags with `B2I_*` environment fallbacks) and are
//! validated here before any file is opened or request sent.

use band2influx_common::sink::InfluxConfig;
use reqwest::Url;

use crate::error::{CliError, Result};

// ============================================================================
// CLI Configuration Constants
// ============================================================================

/// Default collector URL.
pub const DEFAULT_COLLECTOR_URL: &str = "http://localhost:8080";

/// Default InfluxDB database for direct imports.
pub const DEFAULT_DATABASE: &str = "miband";

/// Default timeout for a single request in seconds. A multi-year export is
/// one large request, so this is generous.
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Where `push` sends datapoints
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    pub url: String,
    pub username: String,
    pub password: String,
    pub timeout_secs: u64,
}

impl CollectorConfig {
    pub fn validate(&self) -> Result<()> {
        validate_http_url(&self.url, "--host")?;
        if self.username.is_empty() || self.password.is_empty() {
            return Err(CliError::config("--user and --pass must both be non-empty"));
        }
        validate_timeout(self.timeout_secs)
    }
}

/// Where `import` writes datapoints
#[derive(Debug, Clone)]
pub struct ImportConfig {
    pub endpoint: String,
    pub database: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub timeout_secs: u64,
}

impl ImportConfig {
    pub fn validate(&self) -> Result<()> {
        validate_http_url(&self.endpoint, "--influx-endpoint")?;
        if self.database.trim().is_empty() {
            return Err(CliError::config("--db cannot be empty"));
        }
        validate_timeout(self.timeout_secs)
    }

    pub fn influx_config(&self) -> InfluxConfig {
        InfluxConfig {
            endpoint: self.endpoint.clone(),
            username: self.username.clone().filter(|u| !u.is_empty()),
            password: self.password.clone().filter(|p| !p.is_empty()),
            timeout_secs: self.timeout_secs,
        }
    }
}

fn validate_http_url(url: &str, flag: &str) -> Result<()> {
    let parsed = Url::parse(url)
        .map_err(|e| CliError::config(format!("{} '{}' is not a valid URL: {}", flag, url, e)))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(CliError::config(format!(
            "{} '{}' must use http or https, not {}",
            flag, url, scheme
        ))),
    }
}

fn validate_timeout(timeout_secs: u64) -> Result<()> {
    if timeout_secs == 0 {
        return Err(CliError::config("--timeout-secs must be greater than 0"));
    }
    Ok(())
}
