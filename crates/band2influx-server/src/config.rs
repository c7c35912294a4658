//! Configuration management
//!
//! Every setting is a command-line flag with a `B2I_*` environment fallback.
//! `main` loads `.env` first, so the file counts as environment too.

use band2influx_common::sink::{InfluxConfig, DEFAULT_INFLUX_ENDPOINT, DEFAULT_SINK_TIMEOUT_SECS};
use clap::Parser;

use crate::auth::Credentials;

// ============================================================================
// Server Configuration Constants
// ============================================================================

/// Default server host binding.
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port.
pub const DEFAULT_SERVER_PORT: u16 = 8080;

/// Default shutdown timeout in seconds.
pub const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 30;

/// Default InfluxDB database name.
pub const DEFAULT_DATABASE: &str = "miband";

/// Default request body limit (64 MiB). A year of per-minute samples is
/// roughly 40 MiB of JSON.
pub const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024 * 1024;

/// Command-line arguments of `band2influx-server`
#[derive(Parser, Debug, Clone)]
#[command(name = "band2influx-server")]
#[command(about = "Collect Mi Band activity datapoints and write them to InfluxDB", long_about = None)]
#[command(version)]
pub struct ServerArgs {
    /// Interface to bind
    #[arg(long, env = "B2I_HOST", default_value = DEFAULT_SERVER_HOST)]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "B2I_PORT", default_value_t = DEFAULT_SERVER_PORT)]
    pub port: u16,

    /// InfluxDB base URL
    #[arg(long, env = "B2I_INFLUX_ENDPOINT", default_value = DEFAULT_INFLUX_ENDPOINT)]
    pub influx_endpoint: String,

    /// InfluxDB database to write into
    #[arg(long = "db", env = "B2I_DB", default_value = DEFAULT_DATABASE)]
    pub database: String,

    /// Username clients must present
    #[arg(long, env = "B2I_USER")]
    pub user: String,

    /// Password clients must present
    #[arg(long, env = "B2I_PASS", hide_env_values = true)]
    pub pass: String,

    /// InfluxDB user
    #[arg(long, env = "B2I_INFLUX_USER")]
    pub influx_user: Option<String>,

    /// InfluxDB password
    #[arg(long, env = "B2I_INFLUX_PASS", hide_env_values = true)]
    pub influx_pass: Option<String>,

    /// Seconds to wait for in-flight requests on shutdown
    #[arg(long, env = "B2I_SHUTDOWN_TIMEOUT_SECS", default_value_t = DEFAULT_SHUTDOWN_TIMEOUT_SECS)]
    pub shutdown_timeout_secs: u64,

    /// Timeout for a single InfluxDB request in seconds
    #[arg(long, env = "B2I_SINK_TIMEOUT_SECS", default_value_t = DEFAULT_SINK_TIMEOUT_SECS)]
    pub sink_timeout_secs: u64,

    /// Largest accepted request body in bytes
    #[arg(long, env = "B2I_MAX_BODY_BYTES", default_value_t = DEFAULT_MAX_BODY_BYTES)]
    pub max_body_bytes: usize,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub sink: SinkConfig,
    pub credentials: Credentials,
}

/// Listener settings
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub shutdown_timeout_secs: u64,
    pub max_body_bytes: usize,
}

/// Where accepted datapoints go
#[derive(Debug, Clone)]
pub struct SinkConfig {
    pub endpoint: String,
    pub database: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub timeout_secs: u64,
}

impl SinkConfig {
    pub fn influx_config(&self) -> InfluxConfig {
        InfluxConfig {
            endpoint: self.endpoint.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
            timeout_secs: self.timeout_secs,
        }
    }
}

impl Config {
    /// Build and validate the configuration from parsed arguments
    pub fn from_args(args: ServerArgs) -> anyhow::Result<Self> {
        let config = Config {
            server: ServerConfig {
                host: args.host,
                port: args.port,
                shutdown_timeout_secs: args.shutdown_timeout_secs,
                max_body_bytes: args.max_body_bytes,
            },
            sink: SinkConfig {
                endpoint: args.influx_endpoint,
                database: args.database,
                username: args.influx_user.filter(|u| !u.is_empty()),
                password: args.influx_pass.filter(|p| !p.is_empty()),
                timeout_secs: args.sink_timeout_secs,
            },
            credentials: Credentials::new(args.user, args.pass),
        };

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.server.port == 0 {
            anyhow::bail!("Server port must be greater than 0");
        }

        if self.server.max_body_bytes == 0 {
            anyhow::bail!("Maximum body size must be greater than 0");
        }

        if self.sink.endpoint.trim().is_empty() {
            anyhow::bail!("InfluxDB endpoint cannot be empty");
        }

        if self.sink.database.trim().is_empty() {
            anyhow::bail!("InfluxDB database name cannot be empty");
        }

        if self.sink.timeout_secs == 0 {
            anyhow::bail!("Sink timeout must be greater than 0");
        }

        if !self.credentials.is_complete() {
            anyhow::bail!("Client username and password must both be set (--user, --pass)");
        }

        if self.sink.username.is_some() != self.sink.password.is_some() {
            tracing::warn!("Only one of --influx-user/--influx-pass is set");
        }

        Ok(())
    }
}
