//! Transport layer (stdio).
//!
//! Line framing, the decode/encode codec, and the request loop that ties
//! them to the dispatcher.

pub mod codec;
pub mod framing;
pub mod stdio;
