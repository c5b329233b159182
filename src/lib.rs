//! # etrade-chains
//!
//! Fetch a quote and every option chain for a symbol from the
//! [E*TRADE market API](https://apisb.etrade.com/docs/api/market/api-market-v1.html),
//! convert string-encoded numbers to real ones, and save the lot as JSON.
//!
//! ## Quick Start
//!
//! ```no_run
//! use etrade_chains::{EtradeClient, alter_quote, build_chain_document, get_all_option_chains};
//! use etrade_chains::api::MarketData;
//! use etrade_chains::authenticator::{Authenticator, StdinVerifier};
//! use etrade_chains::token_store::FileTokenStore;
//! use etrade_chains::types::auth::ConsumerKey;
//! use etrade_chains::types::enums::Environment;
//!
//! #[tokio::main]
//! async fn main() -> etrade_chains::Result<()> {
//!     let consumer = ConsumerKey::new("consumer-key", "consumer-secret");
//!     let mut store = FileTokenStore::default();
//!     let auth = Authenticator::new(consumer.clone(), Environment::Sandbox)
//!         .authenticate(&mut store, &StdinVerifier)
//!         .await?;
//!
//!     let client = EtradeClient::new(consumer, auth.credential, Environment::Sandbox)?;
//!     let quote = alter_quote(&client.get_quote("IBM").await?)?;
//!     let chains = get_all_option_chains(&client, "IBM").await?;
//!     let document = build_chain_document(&quote, &chains);
//!     println!("{} expirations", document.len() - 1);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod authenticator;
pub mod chains;
pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod normalize;
pub mod oauth;
pub mod quote;
pub mod run;
pub mod token_store;
pub mod types;
pub mod writer;

/// Re-export the main client type at crate root for convenience.
pub use client::EtradeClient;
/// Re-export the error type and Result alias.
pub use error::{EtradeError, Result};

pub use chains::{get_all_option_chains, option_expire_dates};
pub use normalize::strvals_to_real;
pub use quote::{Quote, alter_quote};
pub use run::{exit_status, run};
pub use writer::{build_chain_document, write_chain_document};
