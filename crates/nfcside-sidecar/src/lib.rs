//! nfcside sidecar library entry.
//!
//! This crate wires the stdio transport, the dispatcher, and the built-in
//! mock handlers into the request loop. It is consumed by the binary
//! (`main.rs`) and by integration tests.

pub mod app_state;
pub mod capability;
pub mod config;
pub mod dispatch;
pub mod logging;
pub mod services;
pub mod transport;
