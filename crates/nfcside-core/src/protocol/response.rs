//! Response envelope.
//!
//! Fields are private: the constructors are the only way to build a
//! response, so `ok == true` always pairs with `data` and `ok == false`
//! always pairs with `error`.

use serde::Serialize;
use serde_json::Value;

use crate::error::{Result, SidecarError};

/// Outbound response envelope.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    id: String,
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl Response {
    /// Successful response carrying `data`.
    pub fn success(id: impl Into<String>, data: Value) -> Self {
        Self {
            id: id.into(),
            ok: true,
            data: Some(data),
            error: None,
        }
    }

    /// Failed response; the error's display text becomes the `error` member.
    pub fn failure(id: impl Into<String>, err: &SidecarError) -> Self {
        Self {
            id: id.into(),
            ok: false,
            data: None,
            error: Some(err.to_string()),
        }
    }

    pub fn from_result(id: impl Into<String>, res: Result<Value>) -> Self {
        match res {
            Ok(data) => Self::success(id, data),
            Err(e) => Self::failure(id, &e),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_ok(&self) -> bool {
        self.ok
    }

    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Compact JSON followed by a single `\n`.
    pub fn to_line(&self) -> Result<Vec<u8>> {
        let mut line = serde_json::to_vec(self)
            .map_err(|e| SidecarError::Internal(format!("response encode failed: {e}")))?;
        line.push(b'\n');
        Ok(line)
    }
}
