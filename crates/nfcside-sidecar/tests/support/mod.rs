//! Deterministic capabilities shared by sidecar tests.

#![allow(dead_code)]

use std::sync::Arc;

use nfcside_core::error::{Result, SidecarError};
use nfcside_sidecar::capability::{Clock, RandomSource};
use nfcside_sidecar::dispatch::Dispatcher;

/// Repeats `bytes` across the requested buffer.
pub struct FixedRandom(pub Vec<u8>);

impl RandomSource for FixedRandom {
    fn fill(&self, dest: &mut [u8]) -> Result<()> {
        for (d, s) in dest.iter_mut().zip(self.0.iter().cycle()) {
            *d = *s;
        }
        Ok(())
    }
}

/// Always exhausted.
pub struct FailingRandom;

impl RandomSource for FailingRandom {
    fn fill(&self, _dest: &mut [u8]) -> Result<()> {
        Err(SidecarError::Internal("entropy pool unavailable".into()))
    }
}

pub struct FixedClock(pub u128);

impl Clock for FixedClock {
    fn unix_nanos(&self) -> u128 {
        self.0
    }
}

pub const FIXED_NANOS: u128 = 1_700_000_000_123_456_789;

pub fn fixed_dispatcher() -> Dispatcher {
    Dispatcher::with_builtin(
        Arc::new(FixedRandom(vec![0xde, 0xad, 0xbe, 0xef])),
        Arc::new(FixedClock(FIXED_NANOS)),
    )
}
