use serde::Deserialize;
use serde_json::value::RawValue;
use serde_json::{json, Value};

use nfcside_core::error::Result;

use crate::dispatch::Handler;

pub const SET_PID: &str = "SET_PID";

/// Handshake acknowledgement. The pid is accepted and dropped.
#[derive(Debug, Default)]
pub struct HandshakeService;

impl HandshakeService {
    pub fn new() -> Self {
        Self
    }
}

#[derive(Debug, Deserialize)]
struct SetPidReq {
    #[serde(default)]
    pid: Option<i64>,
}

impl Handler for HandshakeService {
    fn msg_type(&self) -> &'static str {
        SET_PID
    }

    fn call(&self, payload: Option<&RawValue>) -> Result<Value> {
        if let Some(raw) = payload {
            let req: SetPidReq = super::payload::decode_object(raw, SET_PID)?;
            tracing::debug!(pid = ?req.pid, "handshake");
        }

        Ok(json!({ "message": "Handshake Successful" }))
    }
}
