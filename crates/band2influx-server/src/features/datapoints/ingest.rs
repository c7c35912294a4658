use band2influx_common::{
    codec, sink::Sink, transform::build_batch, Datapoint, PipelineError, PipelineStage,
};
use serde::Serialize;
use tracing::info;

/// One authenticated ingestion request
#[derive(Debug, Clone, Copy)]
pub struct IngestDatapointsCommand<'a> {
    /// Target database in the sink
    pub database: &'a str,
    /// Raw request body, a JSON array of datapoints
    pub payload: &'a [u8],
}

#[derive(Debug, Clone, Serialize)]
pub struct IngestDatapointsResponse {
    pub accepted: Vec<Datapoint>,
}

/// Decode, transform and write one payload.
///
/// Stops at the first failing stage. A payload that fails to decode or to
/// transform never reaches the sink.
#[tracing::instrument(skip(sink, command), fields(database = command.database, bytes = command.payload.len()))]
pub async fn handle(
    sink: &dyn Sink,
    command: IngestDatapointsCommand<'_>,
) -> Result<IngestDatapointsResponse, PipelineError> {
    let datapoints = PipelineStage::Decoding.track(codec::decode(command.payload))?;
    let batch = PipelineStage::Transforming.track(build_batch(&datapoints))?;
    PipelineStage::Writing.track(sink.write(command.database, &batch).await)?;

    info!(points = batch.len(), sink = sink.sink_type(), "Datapoints ingested");

    Ok(IngestDatapointsResponse {
        accepted: datapoints,
    })
}
