use std::sync::Arc;

use serde::Deserialize;
use serde_json::value::RawValue;
use serde_json::{json, Value};

use nfcside_core::error::{Result, SidecarError};

use crate::capability::Clock;
use crate::dispatch::Handler;

pub const LOGIN: &str = "LOGIN";

/// Issues a mock token for any user. The password is never checked.
pub struct LoginService {
    clock: Arc<dyn Clock>,
}

impl LoginService {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }
}

#[derive(Debug, Deserialize)]
struct LoginReq {
    #[serde(default)]
    user: Option<String>,
    #[serde(default)]
    pass: Option<String>,
}

impl Handler for LoginService {
    fn msg_type(&self) -> &'static str {
        LOGIN
    }

    fn call(&self, payload: Option<&RawValue>) -> Result<Value> {
        let raw = payload.ok_or(SidecarError::InvalidPayload(LOGIN))?;
        let req: LoginReq = super::payload::decode_object(raw, LOGIN)?;

        let user = req.user.unwrap_or_default();
        tracing::debug!(user = %user, has_pass = req.pass.is_some(), "issuing mock token");

        let token = format!("mock.jwt.{user}.{}", self.clock.unix_nanos());
        Ok(json!({ "token": token }))
    }
}
