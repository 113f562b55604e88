use ring::rand::{SecureRandom, SystemRandom};

use nfcside_core::error::{Result, SidecarError};

/// Source of cryptographically secure random bytes.
pub trait RandomSource: Send + Sync {
    /// Fill `dest` entirely or fail with `SidecarError::NfcIdUnavailable`.
    fn fill(&self, dest: &mut [u8]) -> Result<()>;
}

/// OS-backed randomness via `ring::rand::SystemRandom`.
pub struct SystemRandomSource {
    rng: SystemRandom,
}

impl SystemRandomSource {
    pub fn new() -> Self {
        Self {
            rng: SystemRandom::new(),
        }
    }
}

impl Default for SystemRandomSource {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for SystemRandomSource {
    fn fill(&self, dest: &mut [u8]) -> Result<()> {
        self.rng.fill(dest).map_err(|e| {
            tracing::warn!(error = %e, len = dest.len(), "system random source failed");
            SidecarError::NfcIdUnavailable
        })
    }
}
