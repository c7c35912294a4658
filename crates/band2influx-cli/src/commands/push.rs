//! `band2influx push` command implementation
//!
//! Reads the whole sample table, encodes it and sends it to the collector in
//! one request. The run succeeds only if the collector answers `200`.

use band2influx_common::{codec, PipelineStage};
use colored::Colorize;
use tracing::info;

use crate::api::CollectorClient;
use crate::commands::read_source;
use crate::config::CollectorConfig;
use crate::error::Result;
use crate::progress;
use crate::SourceArgs;

/// Push the source's datapoints to the collector
pub async fn run(source: &SourceArgs, collector: &CollectorConfig) -> Result<()> {
    collector.validate()?;
    let client = CollectorClient::new(collector)?;

    let datapoints = read_source(source).await?;

    let body = PipelineStage::Encoding.track(codec::encode(&datapoints))?;
    let size = progress::format_bytes(body.len() as u64);

    let spinner = progress::create_spinner(&format!(
        "Sending {} datapoints ({}) to {}",
        datapoints.len(),
        size,
        client.datapoints_url()
    ));
    let result = PipelineStage::Transmitting.track(client.send_datapoints(body).await);
    spinner.finish_and_clear();
    let accepted = result?;

    info!(sent = datapoints.len(), accepted = accepted.len(), "Push completed");
    println!(
        "{} Collector accepted {} datapoints ({})",
        "✓".green(),
        accepted.len(),
        size
    );
    println!("{}", "Done".green().bold());

    Ok(())
}
