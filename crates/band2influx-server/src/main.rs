//! band2influx collector - Main entry point

use std::sync::Arc;

use anyhow::Result;
use band2influx_common::{
    logging::{init_logging, LogConfig},
    sink::{InfluxSink, Sink},
};
use clap::Parser;
use tracing::info;

use band2influx_server::{
    api::{self, AppState},
    config::{Config, ServerArgs},
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = ServerArgs::parse();

    let log_config = LogConfig::builder()
        .log_file_prefix("band2influx-server")
        .filter_directives("band2influx_server=debug,band2influx_common=debug,tower_http=debug")
        .build()
        .with_env()?;
    let _guard = init_logging(&log_config)?;

    info!("Starting band2influx collector");

    let config = Config::from_args(args)?;
    info!(
        host = %config.server.host,
        port = config.server.port,
        database = %config.sink.database,
        influx = %config.sink.endpoint,
        "Configuration loaded"
    );

    let sink = InfluxSink::new(config.sink.influx_config())?;
    if !sink.ping().await {
        tracing::warn!("InfluxDB at {} is not answering yet", config.sink.endpoint);
    }

    let state = AppState::new(Arc::new(sink), &config);
    api::serve(&config, state).await
}
