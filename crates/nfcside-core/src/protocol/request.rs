//! Request envelope (one JSON object per line).
//!
//! The envelope stores `payload` as `RawValue` so the selected handler can
//! parse it into its own schema.

use serde::{Deserialize, Deserializer};
use serde_json::value::RawValue;

use crate::error::{Result, SidecarError};

/// Inbound request envelope.
#[derive(Debug, Deserialize)]
pub struct Request {
    /// Caller-chosen correlation id, echoed in the response.
    /// Missing or `null` reads as `""`.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub id: String,
    /// Message type (field name is `type` in JSON). Missing or `null` reads
    /// as `""`, which no handler answers.
    #[serde(rename = "type", default, deserialize_with = "null_as_empty")]
    pub msg_type: String,
    /// Optional payload, stored as raw JSON. `None` only when the member is
    /// missing; an explicit `null` is kept as a raw `null`.
    #[serde(default, deserialize_with = "keep_raw")]
    pub payload: Option<Box<RawValue>>,
}

fn null_as_empty<'de, D>(d: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(d).map(Option::unwrap_or_default)
}

fn keep_raw<'de, D>(d: D) -> std::result::Result<Option<Box<RawValue>>, D::Error>
where
    D: Deserializer<'de>,
{
    Box::<RawValue>::deserialize(d).map(Some)
}

impl Request {
    /// Decode one protocol line.
    ///
    /// The line must already be trimmed and non-blank. Any structural or
    /// encoding problem (including invalid UTF-8) becomes
    /// `SidecarError::InvalidRequest` carrying the parser's description.
    pub fn parse(line: &[u8]) -> Result<Self> {
        // Every member has a default, so serde would accept a JSON array
        // as a positional envelope.
        let first = line.iter().find(|b| !b.is_ascii_whitespace());
        if first == Some(&b'[') {
            return Err(SidecarError::InvalidRequest(
                "envelope must be a JSON object".into(),
            ));
        }

        serde_json::from_slice(line).map_err(|e| {
            tracing::debug!(error = %e, len = line.len(), "request decode failed");
            SidecarError::InvalidRequest(e.to_string())
        })
    }

    /// Borrow the raw payload, if any.
    pub fn payload(&self) -> Option<&RawValue> {
        self.payload.as_deref()
    }
}
