use std::sync::Arc;

use serde_json::value::RawValue;
use serde_json::{json, Value};

use nfcside_core::error::{Result, SidecarError};

use crate::capability::RandomSource;
use crate::dispatch::Handler;

pub const SCAN_NFC: &str = "SCAN_NFC";

/// Tag id length in bytes (rendered as twice as many hex digits).
pub const NFC_ID_BYTES: usize = 4;

/// Simulated tag scan: a fresh random id per call, no collision tracking.
pub struct NfcScanService {
    random: Arc<dyn RandomSource>,
}

impl NfcScanService {
    pub fn new(random: Arc<dyn RandomSource>) -> Self {
        Self { random }
    }
}

impl Handler for NfcScanService {
    fn msg_type(&self) -> &'static str {
        SCAN_NFC
    }

    fn call(&self, _payload: Option<&RawValue>) -> Result<Value> {
        let mut buf = [0u8; NFC_ID_BYTES];
        self.random
            .fill(&mut buf)
            .map_err(|_| SidecarError::NfcIdUnavailable)?;

        Ok(json!({ "id": hex::encode(buf) }))
    }
}
