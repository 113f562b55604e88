use serde::Deserialize;
use nfcside_core::error::{Result, SidecarError};

/// Largest accepted `protocol.max_line_bytes`.
pub const MAX_LINE_BYTES_CEILING: usize = 16 * 1024 * 1024;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SidecarConfig {
    pub version: u32,

    #[serde(default)]
    pub protocol: ProtocolSection,

    #[serde(default)]
    pub logging: LoggingSection,
}

impl Default for SidecarConfig {
    fn default() -> Self {
        Self {
            version: 1,
            protocol: ProtocolSection::default(),
            logging: LoggingSection::default(),
        }
    }
}

impl SidecarConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(SidecarError::Config(format!(
                "unsupported config version {}",
                self.version
            )));
        }

        self.protocol.validate()?;
        self.logging.validate()?;

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProtocolSection {
    /// Longest accepted request line; longer input ends the loop.
    #[serde(default = "default_max_line_bytes")]
    pub max_line_bytes: usize,
}

impl Default for ProtocolSection {
    fn default() -> Self {
        Self {
            max_line_bytes: default_max_line_bytes(),
        }
    }
}

impl ProtocolSection {
    pub fn validate(&self) -> Result<()> {
        if !(1024..=MAX_LINE_BYTES_CEILING).contains(&self.max_line_bytes) {
            return Err(SidecarError::Config(format!(
                "protocol.max_line_bytes must be between 1024 and {MAX_LINE_BYTES_CEILING}"
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingSection {
    /// `EnvFilter` directives used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

impl LoggingSection {
    pub fn validate(&self) -> Result<()> {
        if self.filter.trim().is_empty() {
            return Err(SidecarError::Config("logging.filter must not be empty".into()));
        }
        Ok(())
    }
}

fn default_max_line_bytes() -> usize {
    64 * 1024
}
fn default_log_filter() -> String {
    "info".into()
}
