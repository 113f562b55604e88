//! Built-in message handlers.
//!
//! All three are stubs: they acknowledge, generate or format, and never
//! touch a device or a credential store.

pub mod handshake;
pub mod login;
pub mod nfc_scan;

mod payload;

pub use handshake::HandshakeService;
pub use login::LoginService;
pub use nfc_scan::NfcScanService;
