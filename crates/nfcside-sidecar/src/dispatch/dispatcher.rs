use std::collections::HashMap;
use std::sync::Arc;

use serde_json::value::RawValue;
use serde_json::Value;

use nfcside_core::error::{Result, SidecarError};
use nfcside_core::protocol::{Request, Response};

use crate::capability::{Clock, RandomSource};
use crate::services::{HandshakeService, LoginService, NfcScanService};

/// One message type's behaviour. Handlers keep no state between calls.
pub trait Handler: Send + Sync {
    /// Exact, case-sensitive `type` tag this handler answers.
    fn msg_type(&self) -> &'static str;

    /// Parse the payload and produce the response `data`.
    fn call(&self, payload: Option<&RawValue>) -> Result<Value>;

    fn handle(&self, id: &str, payload: Option<&RawValue>) -> Response {
        Response::from_result(id, self.call(payload))
    }
}

/// Registry mapping a message type to its handler.
#[derive(Default)]
pub struct Dispatcher {
    handlers: HashMap<&'static str, Arc<dyn Handler>>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Dispatcher with SET_PID, SCAN_NFC and LOGIN registered.
    pub fn with_builtin(random: Arc<dyn RandomSource>, clock: Arc<dyn Clock>) -> Self {
        let mut dispatcher = Self::new();
        dispatcher.register(Arc::new(HandshakeService::new()));
        dispatcher.register(Arc::new(NfcScanService::new(random)));
        dispatcher.register(Arc::new(LoginService::new(clock)));
        dispatcher
    }

    /// Register a handler, replacing any previous one for the same type.
    pub fn register(&mut self, handler: Arc<dyn Handler>) {
        let msg_type = handler.msg_type();
        if self.handlers.insert(msg_type, handler).is_some() {
            tracing::warn!(msg_type, "handler replaced an existing registration");
        }
    }

    pub fn registered_types(&self) -> Vec<&'static str> {
        let mut types: Vec<_> = self.handlers.keys().copied().collect();
        types.sort_unstable();
        types
    }

    pub fn dispatch(&self, req: &Request) -> Response {
        match self.handlers.get(req.msg_type.as_str()) {
            Some(handler) => handler.handle(&req.id, req.payload()),
            None => {
                tracing::debug!(msg_type = %req.msg_type, "no handler registered");
                Response::failure(req.id.as_str(), &SidecarError::UnknownType)
            }
        }
    }
}
