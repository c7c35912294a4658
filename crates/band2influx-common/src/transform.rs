//! Ingestion transform: datapoints to time-series points
//!
//! Every [`Datapoint`] becomes exactly one point in the `activity` series,
//! in input order. The only filtering rule is the heart-rate sentinel: a
//! sample without a real reading gets no `heart-rate` field at all.
//!
//! # Example
//!
//! ```rust
//! use band2influx_common::{transform, Datapoint};
//!
//! let batch = transform::build_batch(&[Datapoint {
//!     timestamp: 1000,
//!     raw_intensity: 5,
//!     steps: 10,
//!     raw_kind: 1,
//!     heart_rate: 0,
//! }])
//! .unwrap();
//!
//! assert_eq!(batch.len(), 1);
//! assert!(!batch.points()[0].fields.contains_key(transform::FIELD_HEART_RATE));
//! ```

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::datapoint::Datapoint;
use crate::error::{PipelineError, Result};

/// Series every activity sample is written to.
pub const SERIES_ACTIVITY: &str = "activity";

pub const FIELD_RAW_INTENSITY: &str = "raw-intensity";
pub const FIELD_RAW_KIND: &str = "raw-kind";
pub const FIELD_STEPS: &str = "steps";
pub const FIELD_HEART_RATE: &str = "heart-rate";

/// Integer fields of a point, sorted by key.
pub type FieldSet = BTreeMap<String, i64>;

/// Tags of a point, sorted by key.
pub type TagSet = BTreeMap<String, String>;

/// Timestamp precision of a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Precision {
    #[default]
    Seconds,
}

impl Precision {
    /// Value of the `precision` parameter understood by the sink.
    pub fn as_str(self) -> &'static str {
        match self {
            Precision::Seconds => "s",
        }
    }
}

/// A single time-series point
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Point {
    pub series: String,
    pub tags: TagSet,
    pub fields: FieldSet,
    pub timestamp: DateTime<Utc>,
}

impl Point {
    /// Point time as whole seconds since the Unix epoch.
    pub fn epoch_seconds(&self) -> i64 {
        self.timestamp.timestamp()
    }
}

/// Ordered points produced from one ingestion request
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WriteBatch {
    precision: Precision,
    points: Vec<Point>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            precision: Precision::Seconds,
            points: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, point: Point) {
        self.points.push(point);
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn precision(&self) -> Precision {
        self.precision
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Map one datapoint to its `activity` point.
///
/// # Errors
///
/// [`PipelineError::PointConstruction`] if the timestamp is outside the
/// range a UTC instant can represent.
pub fn point_from_datapoint(datapoint: &Datapoint) -> Result<Point> {
    let timestamp = DateTime::<Utc>::from_timestamp(datapoint.timestamp, 0).ok_or(
        PipelineError::PointConstruction {
            timestamp: datapoint.timestamp,
        },
    )?;

    let mut fields = FieldSet::new();
    fields.insert(FIELD_RAW_INTENSITY.to_string(), datapoint.raw_intensity);
    fields.insert(FIELD_RAW_KIND.to_string(), datapoint.raw_kind);
    fields.insert(FIELD_STEPS.to_string(), datapoint.steps);

    // Ignore erroneous heart rate measurements
    if let Some(heart_rate) = datapoint.heart_rate_reading() {
        fields.insert(FIELD_HEART_RATE.to_string(), heart_rate);
    }

    Ok(Point {
        series: SERIES_ACTIVITY.to_string(),
        tags: TagSet::new(),
        fields,
        timestamp,
    })
}

/// Build the write batch for a sequence of datapoints.
///
/// The batch is all-or-nothing: the first unrepresentable timestamp aborts
/// construction and no partial batch is returned.
#[tracing::instrument(skip(datapoints), fields(datapoints = datapoints.len()))]
pub fn build_batch(datapoints: &[Datapoint]) -> Result<WriteBatch> {
    let mut batch = WriteBatch::with_capacity(datapoints.len());
    for datapoint in datapoints {
        batch.push(point_from_datapoint(datapoint)?);
    }

    tracing::debug!(points = batch.len(), "Write batch built");
    Ok(batch)
}
