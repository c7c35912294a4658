//! Activity sample record
//!
//! A [`Datapoint`] is one row of the tracker app's activity sample table.
//! The same shape is used on the wire between extractor and collector, with
//! lower-camel field names.

use serde::{Deserialize, Serialize};

// ============================================================================
// Source Store Schema
// ============================================================================

/// Table holding the activity samples in the companion app database.
pub const SAMPLE_TABLE: &str = "MI_BAND_ACTIVITY_SAMPLE";

/// Column names, in the order the reader selects them.
pub const COLUMN_TIMESTAMP: &str = "TIMESTAMP";
pub const COLUMN_RAW_INTENSITY: &str = "RAW_INTENSITY";
pub const COLUMN_STEPS: &str = "STEPS";
pub const COLUMN_RAW_KIND: &str = "RAW_KIND";
pub const COLUMN_HEART_RATE: &str = "HEART_RATE";

pub const SAMPLE_COLUMNS: [&str; 5] = [
    COLUMN_TIMESTAMP,
    COLUMN_RAW_INTENSITY,
    COLUMN_STEPS,
    COLUMN_RAW_KIND,
    COLUMN_HEART_RATE,
];

// ============================================================================
// Heart Rate Sentinels
// ============================================================================

/// Heart rate reported by the device when it took no measurement.
pub const HEART_RATE_NO_READING: i64 = 0;

/// Heart rates at or above this value are device error codes, not readings.
pub const HEART_RATE_CEILING: i64 = 250;

/// Sensor data at a given point in time
///
/// # Examples
///
/// ```rust
/// use band2influx_common::Datapoint;
///
/// let dp = Datapoint {
///     timestamp: 1_600_000_000,
///     raw_intensity: 12,
///     steps: 40,
///     raw_kind: 1,
///     heart_rate: 255,
/// };
/// assert_eq!(dp.heart_rate_reading(), None);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Datapoint {
    /// Sampling instant, seconds since the Unix epoch
    pub timestamp: i64,

    /// Device-specific movement intensity, not normalized
    pub raw_intensity: i64,

    /// Steps counted during the sample interval
    pub steps: i64,

    /// Device-specific activity classifier code
    pub raw_kind: i64,

    /// Beats per minute; only values in `1..250` are readings
    pub heart_rate: i64,
}

impl Datapoint {
    /// The heart rate if it is an actual measurement.
    ///
    /// Returns `Some` only when the value lies strictly between
    /// [`HEART_RATE_NO_READING`] and [`HEART_RATE_CEILING`]. Zero, negative
    /// values and anything at or above the ceiling are not readings.
    pub fn heart_rate_reading(&self) -> Option<i64> {
        if self.heart_rate > HEART_RATE_NO_READING && self.heart_rate < HEART_RATE_CEILING {
            Some(self.heart_rate)
        } else {
            None
        }
    }
}
