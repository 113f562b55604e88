//! Sidecar config loader (strict parsing).

pub mod schema;

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use nfcside_core::error::{Result, SidecarError};

pub use schema::{LoggingSection, ProtocolSection, SidecarConfig};

pub fn load_from_file(path: impl AsRef<Path>) -> Result<SidecarConfig> {
    let path = path.as_ref();
    let s = fs::read_to_string(path)
        .map_err(|e| SidecarError::Config(format!("read {} failed: {e}", path.display())))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<SidecarConfig> {
    let cfg: SidecarConfig = serde_yaml::from_str(s)
        .map_err(|e| SidecarError::Config(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Like [`load_from_file`], but a missing file yields the built-in defaults.
///
/// A file that exists and fails to parse or validate is still an error.
pub fn load_or_default(path: impl AsRef<Path>) -> Result<SidecarConfig> {
    let path = path.as_ref();
    match fs::read_to_string(path) {
        Ok(s) => load_from_str(&s),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(SidecarConfig::default()),
        Err(e) => Err(SidecarError::Config(format!(
            "read {} failed: {e}",
            path.display()
        ))),
    }
}
