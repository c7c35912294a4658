//! `band2influx import` command implementation
//!
//! Writes the samples straight into InfluxDB without a collector. The whole
//! table becomes one write batch; a sample whose timestamp cannot be
//! represented aborts the run before anything is written.

use band2influx_common::{
    sink::{InfluxSink, Sink},
    transform::build_batch,
    Datapoint, PipelineStage,
};
use colored::Colorize;
use tracing::info;

use crate::commands::read_source;
use crate::config::ImportConfig;
use crate::error::Result;
use crate::progress;
use crate::SourceArgs;

/// Import the source's datapoints into InfluxDB
pub async fn run(source: &SourceArgs, target: &ImportConfig) -> Result<()> {
    target.validate()?;
    let sink = InfluxSink::new(target.influx_config())?;

    let datapoints = read_source(source).await?;
    let written = write_datapoints(&sink, &target.database, &datapoints).await?;

    println!(
        "{} Wrote {} points to database '{}'",
        "✓".green(),
        written,
        target.database
    );
    println!("{}", "Done".green().bold());

    Ok(())
}

/// Transform `datapoints` and write them to `sink` as one batch.
///
/// Returns the number of points written.
pub async fn write_datapoints(
    sink: &dyn Sink,
    database: &str,
    datapoints: &[Datapoint],
) -> Result<usize> {
    println!("{} Preparing {} points", "→".cyan(), datapoints.len());
    let batch = PipelineStage::Transforming.track(build_batch(datapoints))?;

    let spinner = progress::create_spinner(&format!(
        "Writing into {} database '{}'",
        sink.sink_type(),
        database
    ));
    let result = PipelineStage::Writing.track(sink.write(database, &batch).await);
    spinner.finish_and_clear();
    result?;

    info!(points = batch.len(), database, "Import completed");
    Ok(batch.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use band2influx_common::{PipelineError, WriteBatch};
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSink {
        batches: Mutex<Vec<WriteBatch>>,
    }

    #[async_trait]
    impl Sink for RecordingSink {
        async fn write(&self, _database: &str, batch: &WriteBatch) -> band2influx_common::Result<()> {
            self.batches.lock().unwrap().push(batch.clone());
            Ok(())
        }

        async fn ping(&self) -> bool {
            true
        }

        fn sink_type(&self) -> &str {
            "recording"
        }
    }

    #[tokio::test]
    async fn test_write_datapoints_keeps_order() {
        let sink = RecordingSink::default();
        let datapoints = vec![
            Datapoint { timestamp: 1002, heart_rate: 80, ..Default::default() },
            Datapoint { timestamp: 1001, heart_rate: 0, ..Default::default() },
        ];

        let written = write_datapoints(&sink, "miband", &datapoints).await.unwrap();
        assert_eq!(written, 2);

        let batches = sink.batches.lock().unwrap();
        let timestamps: Vec<_> = batches[0].points().iter().map(|p| p.epoch_seconds()).collect();
        assert_eq!(timestamps, vec![1002, 1001]);
    }

    #[tokio::test]
    async fn test_unrepresentable_timestamp_writes_nothing() {
        let sink = RecordingSink::default();
        let datapoints = vec![
            Datapoint { timestamp: 1, ..Default::default() },
            Datapoint { timestamp: i64::MIN, ..Default::default() },
        ];

        let err = write_datapoints(&sink, "miband", &datapoints).await.unwrap_err();
        assert!(matches!(
            err,
            crate::CliError::Pipeline(PipelineError::PointConstruction { .. })
        ));
        assert!(sink.batches.lock().unwrap().is_empty());
    }
}
