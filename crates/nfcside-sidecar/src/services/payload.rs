use serde::de::DeserializeOwned;
use serde_json::value::RawValue;
use serde_json::{Map, Value};

use nfcside_core::error::{Result, SidecarError};

/// Parse a handler payload that must be a JSON object.
///
/// A literal `null` decodes like `{}`. Arrays are rejected up front since
/// serde would otherwise accept them as positional structs.
pub(crate) fn decode_object<T: DeserializeOwned>(
    raw: &RawValue,
    msg_type: &'static str,
) -> Result<T> {
    let mut value: Value =
        serde_json::from_str(raw.get()).map_err(|_| SidecarError::InvalidPayload(msg_type))?;
    if value.is_null() {
        value = Value::Object(Map::new());
    }
    if !value.is_object() {
        tracing::debug!(msg_type, "payload is not an object");
        return Err(SidecarError::InvalidPayload(msg_type));
    }
    serde_json::from_value(value).map_err(|e| {
        tracing::debug!(msg_type, error = %e, "payload shape rejected");
        SidecarError::InvalidPayload(msg_type)
    })
}
