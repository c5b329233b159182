//! Request and response types for the E*TRADE API.
//!
//! ## Organization
//!
//! - [`enums`]: Shared enumerations (sandbox vs. live environment)
//! - [`auth`]: Consumer keys, access credentials and request tokens
//! - [`market`]: Quote, expiration-date and option-chain payloads
//!
//! All enums are re-exported at the module root via `pub use enums::*`.

pub mod auth;
pub mod enums;
pub mod market;

pub use enums::*;
