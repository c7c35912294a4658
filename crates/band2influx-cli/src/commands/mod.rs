//! CLI command implementations
//!
//! Each subcommand has its own module with a `run` function.

pub mod import;
pub mod push;

use band2influx_common::{Datapoint, PipelineStage};
use chrono::DateTime;
use colored::Colorize;

use crate::error::{CliError, Result};
use crate::source::SourceReader;
use crate::SourceArgs;

/// Read every sample from the source on the blocking pool.
pub(crate) async fn read_source(source: &SourceArgs) -> Result<Vec<Datapoint>> {
    println!("{} Opening \"{}\"...", "→".cyan(), source.db_file.display());

    let path = source.db_file.clone();
    let order = source.order;
    let result = tokio::task::spawn_blocking(move || SourceReader::open(&path, order)?.read_all())
        .await
        .map_err(|e| CliError::Task(e.to_string()))?;
    let datapoints = PipelineStage::Reading.track(result)?;

    match describe_span(&datapoints) {
        Some(span) => println!(
            "{} {} datapoints read ({})",
            "✓".green(),
            datapoints.len(),
            span
        ),
        None => println!("{} {} datapoints read", "✓".green(), datapoints.len()),
    }

    Ok(datapoints)
}

/// `"<first> to <last>"` in UTC, or `None` for an empty run.
fn describe_span(datapoints: &[Datapoint]) -> Option<String> {
    let first = datapoints.iter().map(|d| d.timestamp).min()?;
    let last = datapoints.iter().map(|d| d.timestamp).max()?;
    let first = DateTime::from_timestamp(first, 0)?;
    let last = DateTime::from_timestamp(last, 0)?;
    Some(format!(
        "{} to {} UTC",
        first.format("%Y-%m-%d %H:%M"),
        last.format("%Y-%m-%d %H:%M")
    ))
}
