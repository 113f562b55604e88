//! Line protocol envelopes.
//!
//! - Requests: JSON objects with an optional `RawValue` payload, parsed by
//!   the handler that owns the message type.
//! - Responses: JSON objects whose `ok` flag decides whether `data` or
//!   `error` is present.
//!
//! Each envelope occupies exactly one line on the wire.

pub mod request;
pub mod response;

pub use request::Request;
pub use response::Response;
