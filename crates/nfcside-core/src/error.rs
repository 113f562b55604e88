//! Shared error type across nfcside crates.
//!
//! The `Display` text of every per-request variant is the exact string that
//! travels in a response's `error` member, so changing a message here is a
//! wire change.

use thiserror::Error;

/// Stable error codes used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Line is not a request envelope.
    BadRequest,
    /// Payload missing or not the shape the handler expects.
    InvalidPayload,
    /// A system resource (secure randomness) could not be used.
    ResourceUnavailable,
    /// No handler is registered for the message type.
    UnknownType,
    /// The input stream failed.
    Transport,
    /// Configuration rejected at startup.
    Config,
    /// Internal error.
    Internal,
}

impl ClientCode {
    /// String representation used in log fields.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::InvalidPayload => "INVALID_PAYLOAD",
            ClientCode::ResourceUnavailable => "RESOURCE_UNAVAILABLE",
            ClientCode::UnknownType => "UNKNOWN_TYPE",
            ClientCode::Transport => "TRANSPORT",
            ClientCode::Config => "CONFIG",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, SidecarError>;

/// Unified error type used by core and sidecar.
#[derive(Debug, Error)]
pub enum SidecarError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    /// Carries the message type whose payload was rejected.
    #[error("invalid {0} payload")]
    InvalidPayload(&'static str),
    #[error("failed generating NFC ID")]
    NfcIdUnavailable,
    #[error("unknown message type")]
    UnknownType,
    #[error("stdin read failed: {0}")]
    Transport(#[from] std::io::Error),
    #[error("stdin line exceeds {max} bytes")]
    LineTooLong { max: usize },
    #[error("invalid config: {0}")]
    Config(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl SidecarError {
    /// Map internal error to a stable code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            SidecarError::InvalidRequest(_) => ClientCode::BadRequest,
            SidecarError::InvalidPayload(_) => ClientCode::InvalidPayload,
            SidecarError::NfcIdUnavailable => ClientCode::ResourceUnavailable,
            SidecarError::UnknownType => ClientCode::UnknownType,
            SidecarError::Transport(_) | SidecarError::LineTooLong { .. } => ClientCode::Transport,
            SidecarError::Config(_) => ClientCode::Config,
            SidecarError::Internal(_) => ClientCode::Internal,
        }
    }

    /// Whether the error ends the request loop instead of becoming a response.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            SidecarError::Transport(_) | SidecarError::LineTooLong { .. }
        )
    }
}
