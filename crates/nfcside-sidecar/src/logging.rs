//! Diagnostic logging setup.
//!
//! stdout carries the response stream, so the subscriber always writes to
//! stderr. `RUST_LOG` takes precedence over `logging.filter`.

use tracing_subscriber::{fmt, EnvFilter};

use nfcside_core::error::{Result, SidecarError};

use crate::config::LoggingSection;

pub fn init(cfg: &LoggingSection) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.filter));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init()
        .map_err(|e| SidecarError::Internal(format!("logging init failed: {e}")))
}
