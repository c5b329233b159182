//! REST API endpoint implementations.
//!
//! Each sub-module adds high-level `async` methods to
//! [`EtradeClient`](crate::client::EtradeClient). All methods handle OAuth
//! signing, HTTP transport, and error mapping automatically.
//!
//! ## Modules
//!
//! | Module | Endpoints | Description |
//! |---|---|---|
//! | [`auth`] | 3 | Request token, access token, renewal |
//! | [`market`] | 3 | Quote, option expiration dates, option chains |

pub mod auth;
pub mod market;

pub use market::MarketData;
