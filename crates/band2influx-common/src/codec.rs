//! Transport codec between extractor and collector
//!
//! The wire payload is a JSON array of [`Datapoint`] objects in source order.
//! Decoding is all-or-nothing: a malformed payload never yields a partial
//! sequence.

use crate::datapoint::Datapoint;
use crate::error::Result;

/// Media type of an encoded payload.
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Encode datapoints into a single wire payload.
pub fn encode(datapoints: &[Datapoint]) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(datapoints)?)
}

/// Decode a wire payload back into datapoints.
///
/// Unknown fields are ignored; missing fields, wrong types, a non-array
/// top-level value or trailing data are all errors.
pub fn decode(payload: &[u8]) -> Result<Vec<Datapoint>> {
    Ok(serde_json::from_slice(payload)?)
}
