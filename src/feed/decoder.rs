//! Frame decoding

use super::PriceEvent;
use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// A frame that does not match the `PriceEvent` shape
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Not a JSON object, a required field is missing, or a field has the wrong type
    #[error("Malformed price frame: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Decode a raw text frame into a `PriceEvent`
///
/// Only JSON objects are accepted. Extra fields are ignored; missing or
/// mistyped fields reject the whole frame.
pub fn decode(frame: &str) -> Result<PriceEvent, DecodeError> {
    let object: Map<String, Value> = serde_json::from_str(frame)?;
    Ok(PriceEvent::deserialize(Value::Object(object))?)
}
