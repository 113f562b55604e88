//! Narrow capabilities injected into handlers.
//!
//! Handlers never reach for the OS directly; they go through these traits so
//! tests can substitute deterministic fakes.

pub mod clock;
pub mod random;

pub use clock::{Clock, SystemClock};
pub use random::{RandomSource, SystemRandomSource};
