//! nfcside core: transport-agnostic protocol envelopes and the error type.
//!
//! This crate defines the line-level contracts shared by the sidecar binary
//! and its tests. It carries no runtime or I/O dependencies so the envelopes
//! can be reused by any frontend harness that speaks the same protocol.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here. Malformed input
//! surfaces as `SidecarError` so one bad line never takes the process down.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod protocol;

/// Shared result type.
pub use error::{Result, SidecarError};
