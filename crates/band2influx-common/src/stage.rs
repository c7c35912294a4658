//! Pipeline stages, used to label progress and failures in logs

use serde::Serialize;

/// One hop of the datapoint pipeline.
///
/// The extractor walks `Reading → Encoding → Transmitting`; the collector
/// walks `Authorizing → Decoding → Transforming → Writing` for each request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelineStage {
    Reading,
    Encoding,
    Transmitting,
    Authorizing,
    Decoding,
    Transforming,
    Writing,
}

impl PipelineStage {
    pub fn as_str(self) -> &'static str {
        match self {
            PipelineStage::Reading => "reading",
            PipelineStage::Encoding => "encoding",
            PipelineStage::Transmitting => "transmitting",
            PipelineStage::Authorizing => "authorizing",
            PipelineStage::Decoding => "decoding",
            PipelineStage::Transforming => "transforming",
            PipelineStage::Writing => "writing",
        }
    }
}

impl PipelineStage {
    /// Log the outcome of this stage and hand the result back unchanged.
    pub fn track<T, E: std::fmt::Display>(self, result: Result<T, E>) -> Result<T, E> {
        match result {
            Ok(_) => tracing::debug!(stage = %self, "Pipeline stage completed"),
            Err(ref e) => tracing::warn!(stage = %self, error = %e, "Pipeline stage failed"),
        }
        result
    }
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
